//! Debugger hooks.
//!
//! A [`Debugger`] attached to the workspace is consulted when a statement
//! fails under `break_on_err`, when stepping reaches a new line, and when
//! a watched variable is assigned. It receives the live interpreter, so it
//! can inspect variables or evaluate expressions before deciding how to
//! continue.

use std::mem;

use cairn_data::Hash;
use cairn_diagnostic::ErrorGuaranteed;
use cairn_ir::{Ast, NodeId, Source};

use crate::interp::Interp;
use crate::object::Obj;

/// Why evaluation paused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BreakReason {
    /// The statement just evaluated failed.
    Error,
    /// Stepping reached a new line.
    Step,
    /// A watched variable was assigned.
    Watch(String),
}

/// What to do after the debugger returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DebugAction {
    /// Resume and stop stepping.
    Continue,
    /// Resume and pause again at the next line.
    Step,
    /// Fail the current statement.
    Abort,
}

pub trait Debugger {
    fn on_break(&mut self, interp: &mut Interp<'_>, node: NodeId, reason: &BreakReason) -> DebugAction;
}

pub(crate) struct DebugState {
    /// Statement currently being evaluated.
    pub(crate) node: Option<NodeId>,
    pub(crate) last_line: u32,
    pub(crate) stepping: bool,
    pub(crate) break_on_err: bool,
    pub(crate) watched: Hash<String, bool>,
}

impl DebugState {
    pub(crate) fn new(break_on_err: bool) -> Self {
        DebugState {
            node: None,
            last_line: 0,
            stepping: false,
            break_on_err,
            watched: Hash::new(),
        }
    }
}

impl<'a> Interp<'a> {
    /// Hand control to the attached debugger, if any.
    pub(crate) fn break_into(&mut self, node: NodeId, reason: BreakReason) -> Result<(), ErrorGuaranteed> {
        let Some(mut debugger) = self.wk.debugger.take() else {
            return Ok(());
        };
        tracing::debug!(?reason, ?node, "entering debugger");
        let action = debugger.on_break(self, node, &reason);
        self.wk.debugger = Some(debugger);

        match action {
            DebugAction::Continue => {
                self.wk.dbg.stepping = false;
                Ok(())
            }
            DebugAction::Step => {
                self.wk.dbg.stepping = true;
                Ok(())
            }
            DebugAction::Abort => Err(self.error(node, "aborted by debugger")),
        }
    }

    /// Evaluate `ast` against the current variables, with stepping and
    /// break-on-error suspended. Used by debuggers to inspect state.
    pub fn eval_ast(&mut self, src: &Source, ast: &Ast) -> Result<Obj, ErrorGuaranteed> {
        let stepping = mem::replace(&mut self.wk.dbg.stepping, false);
        let break_on_err = mem::replace(&mut self.wk.dbg.break_on_err, false);
        let res = Interp::new(self.wk, src, ast).interp_node(ast.root());
        self.wk.dbg.stepping = stepping;
        self.wk.dbg.break_on_err = break_on_err;
        res
    }

    /// Line of `node` in the file being evaluated.
    pub fn line_of(&self, node: NodeId) -> u32 {
        self.ast.get(node).map_or(0, |n| n.line)
    }
}
