//! The workspace: every object, string and project of one evaluation.

mod builder;
mod project;

pub use builder::WorkspaceBuilder;
pub use project::Project;

use cairn_data::{BucketArray, Hash, StrStore};
use cairn_diagnostic::DiagnosticSink;

use crate::analyze::AnalyzeState;
use crate::command::CommandRunner;
use crate::debug::{DebugState, Debugger};
use crate::eval_mode::{EvalMode, LanguageMode};
use crate::frontend::Frontend;
use crate::object::{Obj, Object};

/// Pending loop control after a `break` or `continue`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LoopCtl {
    #[default]
    Normal,
    Continuing,
    Breaking,
}

/// Objects shared by every project in a workspace.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Globals {
    /// Subproject name to subproject object.
    pub(crate) subprojects: Obj,
    /// Dependency name to dependency object, from `meson.override_dependency`.
    pub(crate) dep_overrides: Obj,
    /// Program name to external program, from `meson.override_find_program`.
    pub(crate) find_program_overrides: Obj,
    /// Pending install actions.
    pub(crate) install: Obj,
    /// Built-in options, name to option object.
    pub(crate) global_opts: Obj,
}

/// Owner of all evaluation state.
///
/// Handles ([`Obj`], [`cairn_data::Str`]) issued by one workspace are
/// meaningless in another; use [`crate::obj_clone`] to move values across.
pub struct Workspace {
    pub(crate) strs: StrStore,
    pub(crate) objs: BucketArray<Object>,
    pub(crate) projects: Vec<Project>,
    pub(crate) cur_project: usize,
    /// Variables of a workspace without projects.
    pub(crate) scope: Hash<String, Obj>,
    pub(crate) globals: Globals,

    pub(crate) lang_mode: LanguageMode,
    pub(crate) mode: EvalMode,
    pub(crate) loop_depth: u32,
    pub(crate) loop_ctl: LoopCtl,
    pub(crate) subdir_done: bool,
    pub(crate) disabler_immunity: bool,
    pub(crate) disable_fuzz_unsafe: bool,

    pub(crate) analyze: AnalyzeState,
    pub(crate) dbg: DebugState,
    pub(crate) diagnostics: DiagnosticSink,
    pub(crate) frontend: Option<Box<dyn Frontend>>,
    pub(crate) runner: Option<Box<dyn CommandRunner>>,
    pub(crate) debugger: Option<Box<dyn Debugger>>,

    pub(crate) source_root: String,
    pub(crate) build_root: String,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Workspace with default settings and built-in options.
    pub fn new() -> Self {
        WorkspaceBuilder::new().build()
    }

    pub fn builder() -> WorkspaceBuilder {
        WorkspaceBuilder::new()
    }

    pub fn lang_mode(&self) -> LanguageMode {
        self.lang_mode
    }

    pub fn set_lang_mode(&mut self, mode: LanguageMode) {
        self.lang_mode = mode;
    }

    pub fn eval_mode(&self) -> EvalMode {
        self.mode
    }

    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticSink {
        &mut self.diagnostics
    }

    pub fn source_root(&self) -> &str {
        &self.source_root
    }

    pub fn build_root(&self) -> &str {
        &self.build_root
    }

    /// Pending install actions, as an array of install targets.
    pub fn install_actions(&self) -> Obj {
        self.globals.install
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.projects.get(self.cur_project)
    }

    pub(crate) fn current_project_mut(&mut self) -> Option<&mut Project> {
        self.projects.get_mut(self.cur_project)
    }

    /// Create a project and make it current, returning its index.
    pub fn make_project(&mut self, subproject_name: Option<&str>, cwd: &str, build_dir: &str) -> usize {
        let project = Project::new(self, subproject_name, cwd, build_dir);
        self.projects.push(project);
        self.cur_project = self.projects.len() - 1;
        let meson = self.make_obj(Object::Meson);
        self.set_variable("meson", meson);
        self.cur_project
    }

    fn scope(&self) -> &Hash<String, Obj> {
        match self.current_project() {
            Some(p) => &p.scope,
            None => &self.scope,
        }
    }

    fn scope_mut(&mut self) -> &mut Hash<String, Obj> {
        match self.projects.get_mut(self.cur_project) {
            Some(p) => &mut p.scope,
            None => &mut self.scope,
        }
    }

    /// Value bound to `name` in the current scope.
    pub fn get_variable(&self, name: &str) -> Option<Obj> {
        self.scope().get(name).copied()
    }

    /// Bind `name` in the current scope.
    pub fn set_variable(&mut self, name: &str, val: Obj) {
        self.scope_mut().set(name.to_string(), val);
    }

    pub fn unset_variable(&mut self, name: &str) {
        self.scope_mut().unset(name);
    }

    /// Turn stepping on or off for the attached debugger.
    pub fn set_stepping(&mut self, stepping: bool) {
        self.dbg.stepping = stepping;
    }

    /// Break into the debugger whenever `name` is assigned.
    pub fn watch(&mut self, name: &str) {
        self.dbg.watched.set(name.to_string(), true);
    }

    pub fn unwatch(&mut self, name: &str) {
        self.dbg.watched.unset(name);
    }

    pub fn set_debugger(&mut self, debugger: Option<Box<dyn Debugger>>) {
        self.debugger = debugger;
    }
}
