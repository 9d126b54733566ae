//! End-to-end evaluation tests.
//!
//! Trees are built with [`AstBuilder`] and evaluated against a workspace
//! with buffered diagnostics, so tests can inspect what was reported.

#![allow(clippy::unwrap_used, reason = "test trees are built to evaluate")]

mod eval_tests;
mod kernel_tests;
mod project_tests;

use cairn_diagnostic::ErrorGuaranteed;
use cairn_ir::{AstBuilder, NodeId, Source};

use crate::object::Obj;
use crate::workspace::Workspace;

/// Workspace with one project rooted at `/src`.
pub(crate) fn workspace() -> Workspace {
    let mut wk = Workspace::builder().buffered_diagnostics().build();
    wk.make_project(None, "/src", "/build");
    wk
}

/// Build a tree with `build` and evaluate it in the current scope.
pub(crate) fn run(
    wk: &mut Workspace,
    build: impl FnOnce(&mut AstBuilder) -> Vec<NodeId>,
) -> Result<Obj, ErrorGuaranteed> {
    let mut b = AstBuilder::new();
    let stmts = build(&mut b);
    let ast = b.finish(stmts);
    wk.eval(&Source::new("test.build", ""), &ast)
}

/// Messages of every diagnostic emitted so far.
pub(crate) fn messages(wk: &Workspace) -> Vec<String> {
    wk.diagnostics()
        .store()
        .map(|s| s.messages().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Plain rendering of variable `name`.
pub(crate) fn var(wk: &Workspace, name: &str) -> String {
    let o = wk.get_variable(name).unwrap();
    wk.obj_to_s(o)
}
