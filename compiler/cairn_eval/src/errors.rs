//! Evaluation error messages and call outcomes.
//!
//! Diagnostics are emitted where the problem is found. What travels back
//! up the call stack is only proof ([`ErrorGuaranteed`]) that one was
//! emitted, or for builtin calls a [`CallHalt`] explaining why the call
//! produced no value.
//!
//! The message factories keep wording consistent between call sites.

use cairn_diagnostic::ErrorGuaranteed;

use crate::object::ObjType;
use crate::types::TypeTag;

/// Why a builtin call stopped without producing a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallHalt {
    /// A diagnostic was emitted.
    Error(ErrorGuaranteed),
    /// An argument was, or contained, the disabler; the call evaluates to
    /// the disabler without a diagnostic.
    Disabler,
    /// Analysis mode: arguments were validated but the call is impure or
    /// depends on unknown values, so its body must not run.
    AnalysisStop,
    /// Signature dump mode: the argument specification was recorded.
    SignatureDumped,
}

impl From<ErrorGuaranteed> for CallHalt {
    fn from(g: ErrorGuaranteed) -> Self {
        CallHalt::Error(g)
    }
}

/// Result of a builtin function.
pub type CallResult = Result<crate::object::Obj, CallHalt>;

// Lookup

pub fn undefined_object() -> String {
    "undefined object".to_string()
}

pub fn function_not_found(display: &str) -> String {
    format!("{display} not found")
}

pub fn call_on_null() -> String {
    "tried to call function on null".to_string()
}

// Operators

pub fn does_not_support(ty: ObjType, op: char) -> String {
    format!("{} does not support {op}", ty.name())
}

pub fn unsupported_operands(l: ObjType, r: ObjType) -> String {
    format!("unsupported operator for {} and {}", l.name(), r.name())
}

pub fn divide_by_zero() -> String {
    "divide by 0".to_string()
}

pub fn integer_overflow() -> String {
    "integer overflow".to_string()
}

pub fn invalid_path(rendered: &str) -> String {
    format!("{rendered} is an invalid path")
}

pub fn in_not_supported(ty: ObjType) -> String {
    format!("'in' not supported for {}", ty.name())
}

// Indexing

pub fn index_out_of_bounds(i: i64, len: u32) -> String {
    format!("index {i} out of bounds (len {len})")
}

pub fn key_not_in_dict(rendered: &str) -> String {
    format!("key not in dictionary: {rendered}")
}

pub fn index_unsupported(ty: ObjType) -> String {
    format!("index unsupported for {}", ty.name())
}

// Constructors and assignment

pub fn kwarg_in_array() -> String {
    "kwarg not valid in array constructor".to_string()
}

pub fn positional_in_dict() -> String {
    "non-kwarg not valid in dict constructor".to_string()
}

pub fn duplicate_key(rendered: &str) -> String {
    format!("key {rendered} is duplicated")
}

pub fn assign_null() -> String {
    "cannot assign variable to null".to_string()
}

// Control flow

pub fn not_iterable(ty: ObjType) -> String {
    format!("{} is not iterable", ty.name())
}

pub fn array_foreach_arity() -> String {
    "array foreach needs exactly one variable to set".to_string()
}

pub fn dict_foreach_arity() -> String {
    "dict foreach needs exactly two variables to set".to_string()
}

pub fn loop_ctl_outside_loop(stmt: &str) -> String {
    format!("{stmt} outside of a foreach loop")
}

// Type checking

pub fn expected_type(expected: TypeTag, got: &str) -> String {
    format!("expected type {}, got {got}", expected.render())
}

// Argument binding

pub fn missing_arguments(sig: &str) -> String {
    format!("missing arguments {sig}")
}

pub fn kwarg_before_required(sig: &str) -> String {
    format!("unexpected kwarg before required arguments {sig}")
}

pub fn kwargs_not_accepted(sig: &str) -> String {
    format!("this function does not accept kwargs {sig}")
}

pub fn positional_after_kwargs(sig: &str) -> String {
    format!("non-kwarg after kwargs {sig}")
}

pub fn too_many_arguments(sig: &str) -> String {
    format!("too many arguments {sig}")
}

pub fn invalid_kwarg(name: &str) -> String {
    format!("invalid kwarg: '{name}'")
}

pub fn kwarg_set_twice(name: &str) -> String {
    format!("keyword argument '{name}' set twice")
}

pub fn missing_required_kwarg(name: &str) -> String {
    format!("missing required kwarg: {name}")
}

// Dispatch

pub fn module_not_found() -> String {
    "invalid attempt to use not-found module".to_string()
}

pub fn module_unimplemented(module: &str, func: &str) -> String {
    format!("module '{module}' is unimplemented; if you need {func}(), please open an issue")
}

pub fn function_disabled(display: &str) -> String {
    format!("{display} is disabled")
}

pub fn in_function(display: &str) -> String {
    format!("in {display}")
}

// Files

pub fn first_statement_not_project() -> String {
    "first statement is not a call to project()".to_string()
}
