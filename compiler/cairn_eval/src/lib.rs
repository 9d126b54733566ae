//! Cairn Eval - evaluation core of the cairn build language.
//!
//! Build files are evaluated against a [`Workspace`], which owns every
//! object created during configuration, the projects and their scopes, and
//! the global registries (subprojects, overrides, install actions).
//!
//! # Architecture
//!
//! - [`Obj`] / [`Object`]: handle-addressed values stored in the workspace
//!   arena; arrays and dicts are persistent linked lists of handles
//! - [`Interp`]: tree-walking evaluator over a [`cairn_ir::Ast`]
//! - [`FuncImpl`] tables: builtin functions and methods, selected by
//!   [`LanguageMode`] and receiver type
//! - [`ArgSlot`] / [`Kwarg`]: declarative argument binding for builtins
//! - [`EvalMode::Analyze`]: static analysis with [`TypeTag`] typeinfo
//!   standing in for unknown values
//! - [`Debugger`]: hook for break-on-error, stepping and watchpoints
//!
//! Parsing is not part of this crate. Build files reach the evaluator
//! through a [`Frontend`], which hands back parsed trees.

mod analyze;
mod args;
mod command;
mod debug;
mod dispatch;
pub mod errors;
mod eval_mode;
mod frontend;
mod functions;
mod install;
mod interp;
pub mod object;
pub mod path;
mod signature;
mod stack;
mod types;
mod workspace;

#[cfg(test)]
mod tests;

pub use analyze::{AnalysisReport, CallRecord};
pub use args::{ArgSlot, Kwarg};
pub use command::{CommandOutput, CommandRunner, ProcessRunner, RunError};
pub use debug::{BreakReason, DebugAction, Debugger};
pub use dispatch::{FuncImpl, NativeFn};
pub use errors::{CallHalt, CallResult};
pub use eval_mode::{EvalMode, LanguageMode};
pub use frontend::{Frontend, LoadError, Loaded, MemoryFrontend};
pub use interp::{FileKind, Interp, BUILD_FILE, OPTIONS_FILE};
pub use object::{obj_clone, CloneError, Obj, ObjType, Object};
pub use signature::dump_function_signatures;
pub use stack::ensure_sufficient_stack;
pub use types::TypeTag;
pub use workspace::{LoopCtl, Project, Workspace, WorkspaceBuilder};
