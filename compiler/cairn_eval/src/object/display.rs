//! Rendering objects as text.

use std::fmt::Write;

use super::{Obj, Object};
use crate::workspace::Workspace;

impl Workspace {
    /// Debug rendering used in diagnostics: strings are quoted, containers
    /// are bracketed.
    pub fn obj_to_s(&self, o: Obj) -> String {
        let mut out = String::new();
        self.write_obj(&mut out, o);
        out
    }

    fn write_obj(&self, out: &mut String, o: Obj) {
        match self.obj(o) {
            Object::Null => out.push_str("null"),
            Object::Disabler => out.push_str("<disabler>"),
            Object::Meson => out.push_str("<meson>"),
            Object::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Object::Number(n) => {
                let _ = write!(out, "{n}");
            }
            Object::String(s) => {
                out.push('\'');
                for c in self.strs.get(*s).chars() {
                    match c {
                        '\'' => out.push_str("\\'"),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        c if c.is_control() => {
                            let _ = write!(out, "\\x{:02x}", u32::from(c));
                        }
                        c => out.push(c),
                    }
                }
                out.push('\'');
            }
            Object::File(s) => {
                let _ = write!(out, "<file {}>", self.strs.get(*s));
            }
            Object::FeatureOpt(state) => {
                let _ = write!(out, "<feature {}>", state.as_str());
            }
            Object::Array(_) => {
                out.push('[');
                for (i, v) in self.array_to_vec(o).into_iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_obj(out, v);
                }
                out.push(']');
            }
            Object::Dict(_) => {
                out.push('{');
                for (i, (k, v)) in self.dict_entries(o).into_iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_obj(out, k);
                    out.push_str(": ");
                    self.write_obj(out, v);
                }
                out.push('}');
            }
            Object::BuildTarget(t) => {
                let _ = write!(out, "<build_tgt {}>", self.str(t.name));
            }
            Object::CustomTarget(t) => {
                let _ = write!(out, "<custom_tgt {}>", self.str(t.name));
            }
            Object::Dependency(d) => {
                let _ = write!(out, "<dep {}>", self.str(d.name));
            }
            Object::ExternalProgram(p) => {
                let _ = write!(out, "<external_program {}>", self.str(p.name));
            }
            Object::Module(m) => {
                let _ = write!(out, "<module {}>", m.kind.name());
            }
            Object::TypeInfo(t) => {
                let _ = write!(out, "<typeinfo {}>", t.render());
            }
            other => {
                let _ = write!(out, "<{}>", other.obj_type().name());
            }
        }
    }

    /// Plain string form used by string interpolation and `message()`.
    ///
    /// Strings render without quotes and files as their path; other types
    /// use [`Workspace::obj_to_s`]. Returns `None` for values that have no
    /// sensible plain form.
    pub fn coerce_string(&self, o: Obj) -> Option<String> {
        match self.obj(o) {
            Object::String(s) => Some(self.strs.get(*s).to_string()),
            Object::File(s) => Some(self.strs.get(*s).to_string()),
            Object::Bool(b) => Some(b.to_string()),
            Object::Number(n) => Some(n.to_string()),
            Object::FeatureOpt(state) => Some(state.as_str().to_string()),
            Object::Array(_) | Object::Dict(_) => Some(self.obj_to_s(o)),
            _ => None,
        }
    }
}
