//! Dumping builtin signatures.
//!
//! Every builtin binds its arguments before doing anything else. Calling
//! each one with signature dumping enabled makes `interp_args` record the
//! declared slots and stop, which yields a textual reference of every
//! builtin available in a language mode.

use std::fmt::Write as _;

use cairn_ir::{Ast, NodeId, Source};

use crate::analyze::AnalyzeState;
use crate::args::{ArgSlot, Kwarg};
use crate::dispatch::{self, FuncImpl};
use crate::interp::Interp;
use crate::object::{ModuleKind, Obj, ObjType};
use crate::types::TypeTag;
use crate::workspace::Workspace;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Signature {
    pub(crate) name: String,
    pub(crate) is_method: bool,
    pub(crate) posargs: Option<String>,
    pub(crate) varargs: Option<String>,
    pub(crate) optargs: Option<String>,
    pub(crate) kwargs: Option<String>,
    pub(crate) returns: String,
}

/// Rendering of a slot type. Array slots also accept a bare element, so
/// `list[str]` is listed next to `str`.
fn dump_type(ty: TypeTag) -> String {
    let inner = ty.base().render();
    if !ty.contains(TypeTag::ARRAY_OF) {
        return inner;
    }
    let mut parts: Vec<String> = inner.split('|').map(str::to_string).collect();
    parts.push(format!("list[{inner}]"));
    parts.sort();
    parts.join("|")
}

impl AnalyzeState {
    /// Fill in the argument lists of the signature being dumped.
    pub(crate) fn record_signature(&mut self, pos: &[ArgSlot], opt: &[ArgSlot], kw: &[Kwarg]) {
        let Some(sig) = self.signatures.last_mut() else {
            return;
        };

        let mut posargs = String::new();
        for slot in pos {
            let line = format!("    {}\n", dump_type(slot.ty));
            if slot.ty.contains(TypeTag::GLOB) {
                sig.varargs = Some(line);
            } else {
                posargs.push_str(&line);
            }
        }
        if !posargs.is_empty() {
            sig.posargs = Some(posargs);
        }

        if !opt.is_empty() {
            sig.optargs = Some(opt.iter().map(|s| format!("    {}\n", dump_type(s.ty))).collect());
        }

        if !kw.is_empty() {
            let mut lines: Vec<String> = kw
                .iter()
                .map(|k| format!("    {}: {}\n", k.key, dump_type(k.ty)))
                .collect();
            lines.sort();
            sig.kwargs = Some(lines.concat());
        }
    }
}

/// Signatures of every builtin available in the workspace's language
/// mode: functions first, then methods, each group sorted by name.
pub fn dump_function_signatures(wk: &mut Workspace) -> String {
    let src = Source::internal("");
    let ast = Ast::empty();
    let mode = wk.lang_mode();

    let old = wk.analyze.opts;
    wk.analyze.opts.dump_signature = true;
    wk.analyze.signatures.clear();

    let mut interp = Interp::new(wk, &src, &ast);
    for fi in dispatch::kernel_table(mode) {
        interp.dump_one(fi, fi.name.to_string(), false);
    }
    for t in ObjType::ALL {
        for fi in dispatch::method_table(t, mode) {
            interp.dump_one(fi, format!("{}.{}", t.name(), fi.name), true);
        }
    }
    for m in ModuleKind::ALL {
        for fi in dispatch::module_table(m, mode) {
            interp.dump_one(fi, format!("import('{}').{}", m.name(), fi.name), true);
        }
    }

    let mut sigs = std::mem::take(&mut wk.analyze.signatures);
    wk.analyze.opts = old;
    sigs.sort_by(|a, b| a.is_method.cmp(&b.is_method).then_with(|| a.name.cmp(&b.name)));

    let mut out = String::new();
    for sig in &sigs {
        let _ = writeln!(out, "{}", sig.name);
        for (label, section) in [
            ("posargs", &sig.posargs),
            ("varargs", &sig.varargs),
            ("optargs", &sig.optargs),
            ("kwargs", &sig.kwargs),
        ] {
            if let Some(section) = section {
                let _ = write!(out, "  {label}:\n{section}");
            }
        }
        let _ = writeln!(out, "  returns:\n    {}", sig.returns);
    }
    out
}

impl Interp<'_> {
    fn dump_one(&mut self, fi: &FuncImpl, name: String, is_method: bool) {
        self.wk.analyze.signatures.push(Signature {
            name,
            is_method,
            returns: fi.return_type.render(),
            ..Signature::default()
        });
        let _ = (fi.func)(self, Obj::NULL, NodeId::DUMMY);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "dumped names are known to be present")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dump_type_lists_bare_elements() {
        assert_eq!(dump_type(TypeTag::STRING), "str");
        assert_eq!(dump_type(TypeTag::STRING | TypeTag::ARRAY_OF), "list[str]|str");
        assert_eq!(dump_type(TypeTag::NUMBER | TypeTag::GLOB), "int");
    }

    #[test]
    fn functions_sort_before_methods() {
        let mut wk = Workspace::builder().buffered_diagnostics().build();
        let dump = dump_function_signatures(&mut wk);

        let join_paths = dump.find("join_paths\n").unwrap();
        let method = dump.find("str.split\n").unwrap();
        assert!(join_paths < method);
        assert!(dump.contains("import('fs').exists\n"));
        assert!(dump.contains("project\n  posargs:\n    str\n  varargs:\n    str\n"));
        assert_eq!(wk.diagnostics().error_count(), 0);
    }

    #[test]
    fn kwargs_are_sorted() {
        let mut wk = Workspace::builder().buffered_diagnostics().build();
        let dump = dump_function_signatures(&mut wk);
        let start = dump.find("\nexecutable\n").unwrap();
        let section = &dump[start..];
        let deps = section.find("    dependencies:").unwrap();
        let include = section.find("    include_directories:").unwrap();
        assert!(deps < include);
    }
}
