use super::{Obj, Object};
use crate::workspace::Workspace;

impl Workspace {
    /// Structural equality for scalars, strings, files, arrays and dicts;
    /// identity for everything else.
    pub fn obj_equal(&self, a: Obj, b: Obj) -> bool {
        if a == b {
            return true;
        }

        match (self.obj(a), self.obj(b)) {
            (Object::Bool(x), Object::Bool(y)) => x == y,
            (Object::Number(x), Object::Number(y)) => x == y,
            (Object::String(x), Object::String(y)) | (Object::File(x), Object::File(y)) => {
                self.strs.get(*x) == self.strs.get(*y)
            }
            (Object::FeatureOpt(x), Object::FeatureOpt(y)) => x == y,
            (Object::Array(x), Object::Array(y)) => {
                x.len == y.len
                    && self
                        .array_to_vec(a)
                        .into_iter()
                        .zip(self.array_to_vec(b))
                        .all(|(l, r)| self.obj_equal(l, r))
            }
            (Object::Dict(x), Object::Dict(y)) => {
                x.len == y.len
                    && self.dict_entries(a).into_iter().all(|(k, v)| {
                        self.dict_get(b, self.str(k))
                            .is_some_and(|other| self.obj_equal(v, other))
                    })
            }
            (Object::IncludeDirectory(x), Object::IncludeDirectory(y)) => {
                x.is_system == y.is_system && self.obj_equal(x.path, y.path)
            }
            _ => false,
        }
    }
}
