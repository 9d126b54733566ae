//! Static analysis mode.
//!
//! Analysis runs the ordinary evaluator with [`EvalMode::Analyze`]. Builtin
//! calls still bind and check their arguments, but only pure builtins whose
//! arguments are fully known actually run. Every other call evaluates to a
//! typeinfo placeholder of its return type, and the rest of the program is
//! checked against that.

use std::mem;

use cairn_diagnostic::{DiagnosticSink, DiagnosticStore};
use cairn_ir::{Ast, NodeId, Source};

use crate::args::{ArgSlot, Kwarg};
use crate::dispatch::FuncImpl;
use crate::errors::{CallHalt, CallResult};
use crate::eval_mode::EvalMode;
use crate::interp::{FileKind, Interp};
use crate::object::{ArrayCursor, DictCursor, Obj, ObjType};
use crate::signature::Signature;
use crate::workspace::Workspace;

/// Flags describing the call currently being analyzed.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct AnalyzeOpts {
    pub(crate) do_analyze: bool,
    pub(crate) pure_function: bool,
    /// The call is `set_variable()`, whose value argument may be unknown
    /// without making the call impure.
    pub(crate) set_variable_special: bool,
    pub(crate) dump_signature: bool,
}

#[derive(Default)]
pub(crate) struct AnalyzeState {
    pub(crate) opts: AnalyzeOpts,
    pub(crate) calls: Vec<CallRecord>,
    pub(crate) dead_code: usize,
    pub(crate) signatures: Vec<Signature>,
}

/// One builtin call seen during analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRecord {
    /// `function name()` or `method type.name()`.
    pub name: String,
    pub line: u32,
    pub col: u32,
    /// Whether the call ran for real. Impure calls, and pure calls with
    /// unknown arguments, were only checked.
    pub pure: bool,
}

/// Outcome of [`Workspace::analyze`].
#[derive(Debug)]
pub struct AnalysisReport {
    pub calls: Vec<CallRecord>,
    /// Statements never reached.
    pub dead_code: usize,
    pub error_count: usize,
    /// Diagnostics emitted during analysis, sorted and deduplicated.
    pub diagnostics: DiagnosticStore,
}

impl AnalysisReport {
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }

    pub fn impure_calls(&self) -> impl Iterator<Item = &CallRecord> {
        self.calls.iter().filter(|c| !c.pure)
    }

    /// Record of the first call to `name`, e.g. `"function files()"`.
    pub fn call(&self, name: &str) -> Option<&CallRecord> {
        self.calls.iter().find(|c| c.name == name)
    }
}

impl Workspace {
    /// Analyze a tree in the current scope without side effects.
    pub fn analyze(&mut self, src: &Source, ast: &Ast) -> AnalysisReport {
        let span = tracing::info_span!("analyze", file = %src.label);
        let _guard = span.enter();
        self.with_analysis(|wk| {
            let _ = Interp::new(wk, src, ast).eval_file(FileKind::Default);
        })
    }

    /// Analyze the project rooted at `cwd`, including its subdirectories
    /// and subprojects.
    pub fn analyze_project(&mut self, cwd: &str, build_dir: &str) -> AnalysisReport {
        let span = tracing::info_span!("analyze", cwd);
        let _guard = span.enter();
        self.with_analysis(|wk| {
            let _ = wk.eval_project(None, cwd, build_dir);
        })
    }

    fn with_analysis(&mut self, run: impl FnOnce(&mut Workspace)) -> AnalysisReport {
        let prev_mode = mem::replace(&mut self.mode, EvalMode::Analyze);
        let prev_sink = mem::replace(&mut self.diagnostics, DiagnosticSink::buffered());
        self.analyze = AnalyzeState::default();

        run(self);

        let state = mem::take(&mut self.analyze);
        let mut sink = mem::replace(&mut self.diagnostics, prev_sink);
        self.mode = prev_mode;

        let mut diagnostics = sink.take_store().unwrap_or_default();
        diagnostics.sort_and_dedup();
        tracing::debug!(
            calls = state.calls.len(),
            dead_code = state.dead_code,
            errors = sink.error_count(),
            "analysis finished"
        );
        AnalysisReport {
            calls: state.calls,
            dead_code: state.dead_code,
            error_count: sink.error_count(),
            diagnostics,
        }
    }

    /// Whether `o` is, or contains, a value only known by type.
    pub fn tainted_by_typeinfo(&self, o: Obj) -> bool {
        if o.is_null() {
            return true;
        }
        match self.obj_type(o) {
            ObjType::TypeInfo => true,
            ObjType::Array => {
                let mut cursor = ArrayCursor::new(self, o);
                while let Some(v) = cursor.next(self) {
                    if self.tainted_by_typeinfo(v) {
                        return true;
                    }
                }
                false
            }
            ObjType::Dict => {
                let mut cursor = DictCursor::new(self, o);
                while let Some((k, v)) = cursor.next(self) {
                    if self.tainted_by_typeinfo(k) || self.tainted_by_typeinfo(v) {
                        return true;
                    }
                }
                false
            }
            _ => false,
        }
    }
}

impl Interp<'_> {
    /// Final step of argument binding during analysis: decide whether the
    /// builtin body may run.
    pub(crate) fn analyze_bound_args(
        &mut self,
        pos: &[ArgSlot],
        opt: &[ArgSlot],
        kw: &[Kwarg],
    ) -> Result<(), CallHalt> {
        let set_variable_special = self.wk.analyze.opts.set_variable_special;
        let positional = pos
            .iter()
            .enumerate()
            .filter(|&(i, _)| !(set_variable_special && i == 1))
            .map(|(_, s)| s)
            .chain(opt);

        let tainted = positional
            .filter(|s| s.set)
            .any(|s| self.wk.tainted_by_typeinfo(s.val))
            || kw.iter().filter(|k| k.set).any(|k| self.wk.tainted_by_typeinfo(k.val));

        if tainted {
            self.wk.analyze.opts.pure_function = false;
        }
        if self.wk.analyze.opts.pure_function {
            Ok(())
        } else {
            Err(CallHalt::AnalysisStop)
        }
    }

    /// Run `fi` under analysis. Returns the result and whether the call
    /// was pure.
    pub(crate) fn analyze_function(
        &mut self,
        fi: &FuncImpl,
        rcvr: Option<Obj>,
        args_node: NodeId,
    ) -> (CallResult, bool) {
        let old = self.wk.analyze.opts;

        let mut pure = fi.pure;
        if rcvr.is_some_and(|r| self.wk.tainted_by_typeinfo(r)) {
            pure = false;
        }

        self.wk.analyze.opts.set_variable_special = rcvr.is_none() && fi.name == "set_variable";
        self.wk.analyze.opts.do_analyze = true;
        self.wk.analyze.opts.pure_function = pure;

        let res = (fi.func)(self, rcvr.unwrap_or(Obj::NULL), args_node);
        let pure = self.wk.analyze.opts.pure_function;
        self.wk.analyze.opts = old;
        (res, pure)
    }

    pub(crate) fn record_call(&mut self, name: String, node: NodeId, pure: bool) {
        let n = self.node(node);
        self.wk.analyze.calls.push(CallRecord {
            name,
            line: n.line,
            col: n.col,
            pure,
        });
    }
}
