//! Builtin function dispatch.
//!
//! Free functions are looked up in the kernel table of the active language
//! mode, methods in the table for the receiver's type and mode. Module
//! objects consult their module's table before the generic module methods.

use cairn_diagnostic::ErrorGuaranteed;
use cairn_ir::{NodeId, NodeKind};

use crate::errors::{self, CallHalt, CallResult};
use crate::eval_mode::LanguageMode;
use crate::functions;
use crate::interp::Interp;
use crate::object::{ModuleKind, Obj, ObjType};
use crate::types::TypeTag;
use crate::workspace::Workspace;

/// Native implementation of a builtin. Receives the receiver (or
/// [`Obj::NULL`] for free functions) and the call's argument node.
pub type NativeFn = fn(&mut Interp<'_>, Obj, NodeId) -> CallResult;

/// A named builtin.
#[derive(Copy, Clone)]
pub struct FuncImpl {
    pub name: &'static str,
    pub func: NativeFn,
    pub return_type: TypeTag,
    /// Safe to run during analysis: no effects outside the workspace.
    pub pure: bool,
    /// Runs external commands; refused when fuzz-unsafe functions are
    /// disabled.
    pub fuzz_unsafe: bool,
    /// Maps the receiver before the call.
    pub rcvr_transform: Option<fn(&Workspace, Obj) -> Obj>,
}

impl FuncImpl {
    pub const fn new(name: &'static str, func: NativeFn, return_type: TypeTag) -> Self {
        FuncImpl {
            name,
            func,
            return_type,
            pure: false,
            fuzz_unsafe: false,
            rcvr_transform: None,
        }
    }

    #[must_use]
    pub const fn pure(mut self) -> Self {
        self.pure = true;
        self
    }

    #[must_use]
    pub const fn fuzz_unsafe(mut self) -> Self {
        self.fuzz_unsafe = true;
        self
    }

    #[must_use]
    pub const fn rcvr_transform(mut self, f: fn(&Workspace, Obj) -> Obj) -> Self {
        self.rcvr_transform = Some(f);
        self
    }
}

impl std::fmt::Debug for FuncImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuncImpl")
            .field("name", &self.name)
            .field("return_type", &self.return_type)
            .field("pure", &self.pure)
            .finish_non_exhaustive()
    }
}

pub(crate) fn lookup<'t>(tbl: &'t [FuncImpl], name: &str) -> Option<&'t FuncImpl> {
    tbl.iter().find(|fi| fi.name == name)
}

pub(crate) fn kernel_table(mode: LanguageMode) -> &'static [FuncImpl] {
    match mode {
        LanguageMode::Normal => functions::kernel::FUNCS,
        LanguageMode::Internal => functions::kernel::FUNCS_INTERNAL,
        LanguageMode::Opts => functions::options::FUNCS,
    }
}

pub(crate) fn method_table(t: ObjType, mode: LanguageMode) -> &'static [FuncImpl] {
    use functions::*;
    use LanguageMode::{Internal, Normal};

    match (t, mode) {
        (ObjType::Meson, Normal) => meson::METHODS,
        (ObjType::Bool, Normal | Internal) => boolean::METHODS,
        (ObjType::File, Normal | Internal) => file::METHODS,
        (ObjType::FeatureOpt, Normal) => feature_opt::METHODS,
        (ObjType::Number, Normal | Internal) => number::METHODS,
        (ObjType::String, Normal | Internal) => string::METHODS,
        (ObjType::Array, Normal) => array::METHODS,
        (ObjType::Array, Internal) => array::METHODS_INTERNAL,
        (ObjType::Dict, Normal | Internal) => dict::METHODS,
        (ObjType::BuildTarget, Normal) => build_target::METHODS,
        (ObjType::CustomTarget, Normal) => custom_target::METHODS,
        (ObjType::Subproject, Normal) => subproject::METHODS,
        (ObjType::Dependency, Normal) => dependency::METHODS,
        (ObjType::ExternalProgram, Normal | Internal) => external_program::METHODS,
        (ObjType::RunResult, Normal | Internal) => run_result::METHODS,
        (ObjType::ConfigurationData, Normal | Internal) => configuration_data::METHODS,
        (ObjType::Module, Normal | Internal) => module::METHODS,
        (ObjType::Environment, Normal | Internal) => environment::METHODS,
        (ObjType::Generator, Normal) => generator::METHODS,
        (ObjType::BothLibs, Normal) => both_libs::METHODS,
        (ObjType::Disabler, _) => disabler::METHODS,
        _ => &[],
    }
}

pub(crate) fn module_table(m: ModuleKind, mode: LanguageMode) -> &'static [FuncImpl] {
    match (m, mode) {
        (ModuleKind::Fs, LanguageMode::Normal | LanguageMode::Internal) => functions::module::fs::FUNCS,
        (ModuleKind::Keyval, LanguageMode::Normal) => functions::module::keyval::FUNCS,
        _ => &[],
    }
}

/// `function name()` or `method type.name()`, for diagnostics.
pub(crate) fn display_name(rcvr_type: Option<ObjType>, name: &str) -> String {
    match rcvr_type {
        Some(t) => format!("method {}.{name}()", t.name()),
        None => format!("function {name}()"),
    }
}

impl Interp<'_> {
    /// Evaluate the function or method call node `id`. `rcvr` is the
    /// already evaluated receiver of a method call.
    pub(crate) fn builtin_run(&mut self, rcvr: Option<Obj>, id: NodeId) -> Result<Obj, ErrorGuaranteed> {
        let (name_node, args_node) = match &self.node(id).kind {
            NodeKind::Function { name, args, .. } | NodeKind::Method { name, args, .. } => (*name, *args),
            _ => return Err(self.error(id, "expected a function call")),
        };
        let name = self.ident(name_node);

        if rcvr == Some(Obj::NULL) {
            return Err(self.error(name_node, errors::call_on_null()));
        }
        let rcvr_type = rcvr.map(|r| self.wk.obj_type(r));
        let display = display_name(rcvr_type, name);

        if let Some(r) = rcvr.filter(|_| rcvr_type == Some(ObjType::TypeInfo)) {
            return self.builtin_run_typeinfo(r, name_node, args_node, &display);
        }

        let fi = match rcvr {
            Some(r) if rcvr_type == Some(ObjType::Module) => self.module_lookup(r, name_node, name)?,
            _ => {
                let tbl = match rcvr_type {
                    Some(t) => method_table(t, self.wk.lang_mode),
                    None => kernel_table(self.wk.lang_mode),
                };
                match lookup(tbl, name) {
                    Some(fi) => fi,
                    None if rcvr_type == Some(ObjType::Disabler) => return Ok(Obj::DISABLER),
                    None => return Err(self.error(name_node, errors::function_not_found(&display))),
                }
            }
        };

        if fi.fuzz_unsafe && self.wk.disable_fuzz_unsafe {
            return Err(self.error(name_node, errors::function_disabled(&display)));
        }

        let rcvr = match (rcvr, fi.rcvr_transform) {
            (Some(r), Some(transform)) => Some(transform(self.wk, r)),
            _ => rcvr,
        };

        let func = display.as_str();
        tracing::trace!(func, "call");
        let res = if self.wk.mode.is_analyze() {
            let (res, pure) = self.analyze_function(fi, rcvr, args_node);
            self.record_call(display.clone(), name_node, pure);
            res
        } else {
            (fi.func)(self, rcvr.unwrap_or(Obj::NULL), args_node)
        };

        self.finish_call(res, fi.return_type, name_node, &display)
    }

    fn finish_call(
        &mut self,
        res: CallResult,
        return_type: TypeTag,
        name_node: NodeId,
        display: &str,
    ) -> Result<Obj, ErrorGuaranteed> {
        match res {
            Ok(v) => Ok(v),
            Err(CallHalt::Disabler) => Ok(Obj::DISABLER),
            Err(CallHalt::AnalysisStop) if return_type.base().difference(TypeTag::NULL).is_empty() => Ok(Obj::NULL),
            Err(CallHalt::AnalysisStop) => Ok(self.wk.make_typeinfo(return_type.base().difference(TypeTag::NULL))),
            Err(CallHalt::SignatureDumped) => Ok(Obj::NULL),
            Err(CallHalt::Error(_)) => Err(self.error(name_node, errors::in_function(display))),
        }
    }

    fn module_lookup(&mut self, rcvr: Obj, name_node: NodeId, name: &str) -> Result<&'static FuncImpl, ErrorGuaranteed> {
        let m = *self.wk.get_module(rcvr);
        if !m.found && name != "found" {
            return Err(self.error(name_node, errors::module_not_found()));
        }
        let found = lookup(module_table(m.kind, self.wk.lang_mode), name)
            .or_else(|| lookup(method_table(ObjType::Module, self.wk.lang_mode), name));
        match found {
            Some(fi) => Ok(fi),
            None if !m.has_impl => Err(self.error(name_node, errors::module_unimplemented(m.kind.name(), name))),
            None => {
                let msg = format!("{} not found in module {}", display_name(None, name), m.kind.name());
                Err(self.error(name_node, msg))
            }
        }
    }

    /// Method call on a receiver only known by type. Every candidate type
    /// must not reject the call outright; the result is unknown.
    fn builtin_run_typeinfo(
        &mut self,
        rcvr: Obj,
        name_node: NodeId,
        args_node: NodeId,
        display: &str,
    ) -> Result<Obj, ErrorGuaranteed> {
        let tag = self.wk.type_tag_of(rcvr);
        let mode = self.wk.lang_mode;
        let candidates: Vec<&'static FuncImpl> = tag
            .types()
            .filter_map(|t| lookup(method_table(t, mode), self.ident(name_node)))
            .collect();

        let Some(first) = candidates.first().copied() else {
            return Err(self.error(name_node, errors::function_not_found(display)));
        };
        let return_type = candidates.iter().fold(TypeTag::empty(), |acc, fi| acc | fi.return_type);

        let (res, pure) = self.analyze_function(first, Some(rcvr), args_node);
        self.record_call(display.to_string(), name_node, pure);
        self.finish_call(res, return_type, name_node, display)
    }
}
