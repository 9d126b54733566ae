//! File-level evaluation entry points.

use std::path::Path;

use cairn_diagnostic::ErrorGuaranteed;
use cairn_ir::{Ast, NodeId, NodeKind, Source};

use super::Interp;
use crate::errors;
use crate::eval_mode::LanguageMode;
use crate::frontend::{LoadError, Loaded};
use crate::object::Obj;
use crate::path;
use crate::workspace::Workspace;

/// Name of the build file in every source directory.
pub const BUILD_FILE: &str = "meson.build";

/// Name of the option definition file in a project root.
pub const OPTIONS_FILE: &str = "meson_options.txt";

/// How a file is being evaluated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// The top-level file of a project: must start with `project()`.
    Project,
    /// Any other file.
    Default,
    /// Input typed into a debugger or REPL.
    Repl,
}

impl Interp<'_> {
    /// Evaluate the whole tree.
    #[tracing::instrument(level = "debug", skip(self), fields(file = %self.src.label))]
    pub fn eval_file(&mut self, kind: FileKind) -> Result<Obj, ErrorGuaranteed> {
        if kind == FileKind::Project {
            self.ensure_project_first()?;
        }

        let res = self.interp_node(self.ast.root());
        self.wk.subdir_done = false;

        if kind != FileKind::Repl && self.wk.mode.reports_dead_code() {
            self.report_dead_code();
        }
        res
    }

    fn ensure_project_first(&mut self) -> Result<(), ErrorGuaranteed> {
        let root = self.ast.root();
        let first = match &self.node(root).kind {
            NodeKind::Block(stmts) => stmts.first().copied(),
            _ => Some(root),
        };

        let is_project = first.is_some_and(|stmt| {
            matches!(&self.node(stmt).kind, NodeKind::Function { name, .. } if self.ident(*name) == "project")
        });
        if is_project {
            Ok(())
        } else {
            Err(self.error(first.unwrap_or(NodeId::DUMMY), errors::first_statement_not_project()))
        }
    }

    fn report_dead_code(&mut self) {
        for stmt in self.ast.unvisited_statements() {
            self.wk.analyze.dead_code += 1;
            self.warning(stmt, "dead code");
        }
    }
}

impl Workspace {
    /// Evaluate a tree in the current scope.
    pub fn eval(&mut self, src: &Source, ast: &Ast) -> Result<Obj, ErrorGuaranteed> {
        Interp::new(self, src, ast).eval_file(FileKind::Default)
    }

    /// Evaluate the build file of the project rooted at `cwd` in a fresh
    /// project scope, returning the project's index. The previously
    /// current project is restored afterwards.
    pub fn eval_project(
        &mut self,
        subproject_name: Option<&str>,
        cwd: &str,
        build_dir: &str,
    ) -> Result<usize, ErrorGuaranteed> {
        self.eval_project_with(subproject_name, cwd, build_dir, Vec::new())
    }

    pub(crate) fn eval_project_with(
        &mut self,
        subproject_name: Option<&str>,
        cwd: &str,
        build_dir: &str,
        default_options: Vec<String>,
    ) -> Result<usize, ErrorGuaranteed> {
        let span = match subproject_name {
            Some(name) => tracing::info_span!("subproject", name),
            None => tracing::info_span!("project", cwd),
        };
        let _guard = span.enter();

        let prev = self.cur_project;
        let idx = self.make_project(subproject_name, cwd, build_dir);
        self.projects[idx].pending_default_options = default_options;

        let res = self
            .eval_options_file(cwd)
            .and_then(|()| self.eval_build_file(&path::join(cwd, BUILD_FILE), FileKind::Project));
        self.cur_project = prev;
        tracing::debug!(idx, ok = res.is_ok(), "project evaluated");
        res.map(|_| idx)
    }

    /// Evaluate the project's option definitions, if it has any.
    fn eval_options_file(&mut self, cwd: &str) -> Result<(), ErrorGuaranteed> {
        let file = path::join(cwd, OPTIONS_FILE);
        let Some(frontend) = self.frontend.as_mut() else {
            return Ok(());
        };
        let loaded = match frontend.load(Path::new(&file)) {
            Ok(loaded) => loaded,
            Err(LoadError::NotFound(_)) => return Ok(()),
            Err(e) => return Err(self.diagnostics.error(None, 0, 0, &e.to_string())),
        };

        let prev = std::mem::replace(&mut self.lang_mode, LanguageMode::Opts);
        let res = Interp::new(self, &loaded.source, &loaded.ast).eval_file(FileKind::Default);
        self.lang_mode = prev;
        res.map(|_| ())
    }

    pub(crate) fn load_build_file(&mut self, file: &str) -> Result<Loaded, ErrorGuaranteed> {
        let loaded = match self.frontend.as_mut() {
            Some(frontend) => frontend.load(Path::new(file)),
            None => {
                let msg = format!("unable to load {file}: no frontend configured");
                return Err(self.diagnostics.error(None, 0, 0, &msg));
            }
        };
        loaded.map_err(|e| self.diagnostics.error(None, 0, 0, &e.to_string()))
    }

    pub(crate) fn eval_build_file(&mut self, file: &str, kind: FileKind) -> Result<Obj, ErrorGuaranteed> {
        let loaded = self.load_build_file(file)?;
        Interp::new(self, &loaded.source, &loaded.ast).eval_file(kind)
    }
}
