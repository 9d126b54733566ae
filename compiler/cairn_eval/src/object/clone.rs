//! Copying objects between workspaces.

use super::{IncludeDirectory, InstallTarget, Obj, Object};
use crate::workspace::Workspace;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CloneError {
    #[error("unable to clone '{0}'")]
    Unsupported(&'static str),
}

/// Deep-copy `val` from `src` into `dest`.
///
/// Scalars, strings, files, containers and install-related objects can be
/// cloned; anything tied to its workspace's projects cannot.
pub fn obj_clone(src: &Workspace, dest: &mut Workspace, val: Obj) -> Result<Obj, CloneError> {
    if val == Obj::NULL || val == Obj::DISABLER {
        return Ok(val);
    }

    let cloned = match src.obj(val) {
        Object::Bool(b) => dest.make_bool(*b),
        Object::Number(n) => dest.make_number(*n),
        Object::String(_) => dest.make_str(src.str(val)),
        Object::File(_) => dest.make_file(src.file_path(val)),
        Object::FeatureOpt(state) => dest.make_obj(Object::FeatureOpt(*state)),
        Object::Array(_) => {
            let arr = dest.make_array();
            for v in src.array_to_vec(val) {
                let v = obj_clone(src, dest, v)?;
                dest.array_push(arr, v);
            }
            arr
        }
        Object::Dict(_) => clone_dict(src, dest, val)?,
        Object::Environment(dict) => {
            let dict = clone_dict(src, dest, *dict)?;
            dest.make_obj(Object::Environment(dict))
        }
        Object::ConfigurationData(dict) => {
            let dict = clone_dict(src, dest, *dict)?;
            dest.make_obj(Object::ConfigurationData(dict))
        }
        Object::InstallTarget(t) => {
            let t = *t;
            let src_path = obj_clone(src, dest, t.src)?;
            let dest_path = obj_clone(src, dest, t.dest)?;
            dest.make_obj(Object::InstallTarget(InstallTarget {
                src: src_path,
                dest: dest_path,
            }))
        }
        Object::IncludeDirectory(inc) => {
            let inc = *inc;
            let path = obj_clone(src, dest, inc.path)?;
            dest.make_obj(Object::IncludeDirectory(IncludeDirectory {
                path,
                is_system: inc.is_system,
            }))
        }
        other => return Err(CloneError::Unsupported(other.obj_type().name())),
    };

    Ok(cloned)
}

fn clone_dict(src: &Workspace, dest: &mut Workspace, dict: Obj) -> Result<Obj, CloneError> {
    let out = dest.make_dict();
    for (k, v) in src.dict_entries(dict) {
        let k = dest.make_str(src.str(k));
        let v = obj_clone(src, dest, v)?;
        dest.dict_set(out, k, v);
    }
    Ok(out)
}

impl Workspace {
    /// Copy of `val` that no longer aliases mutable state: containers are
    /// duplicated and environment or configuration objects get their own
    /// backing dict. Other values are returned as-is.
    pub fn obj_unalias(&mut self, val: Obj) -> Obj {
        match self.obj(val) {
            Object::Array(_) => self.array_dup(val),
            Object::Dict(_) => self.dict_dup(val),
            Object::Environment(dict) => {
                let dict = *dict;
                let dict = self.dict_dup(dict);
                self.make_obj(Object::Environment(dict))
            }
            Object::ConfigurationData(dict) => {
                let dict = *dict;
                let dict = self.dict_dup(dict);
                self.make_obj(Object::ConfigurationData(dict))
            }
            _ => val,
        }
    }
}
