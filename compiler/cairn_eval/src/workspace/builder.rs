//! `WorkspaceBuilder` for creating workspaces with various configurations.

use cairn_data::{BucketArray, Hash, StrStore};
use cairn_diagnostic::{ColorMode, DiagnosticSink};

use super::{Globals, LoopCtl, Workspace};
use crate::analyze::AnalyzeState;
use crate::command::CommandRunner;
use crate::debug::{DebugState, Debugger};
use crate::eval_mode::{EvalMode, LanguageMode};
use crate::frontend::Frontend;
use crate::object::{BuildOption, BuildOptionKind, Obj, Object};

const DEFAULT_OBJ_BUCKET: u32 = 1024;
const DEFAULT_STR_BUCKET: u32 = 1024;
const DEFAULT_CHR_BUCKET: u32 = 4096;

/// Builder for [`Workspace`].
///
/// Defaults: normal language mode, execute mode, diagnostics printed to
/// stderr with auto-detected color, no front end, no command runner.
pub struct WorkspaceBuilder {
    lang_mode: LanguageMode,
    mode: EvalMode,
    diagnostics: Option<DiagnosticSink>,
    break_on_err: bool,
    debugger: Option<Box<dyn Debugger>>,
    frontend: Option<Box<dyn Frontend>>,
    runner: Option<Box<dyn CommandRunner>>,
    disable_fuzz_unsafe: bool,
    obj_bucket_size: u32,
    chr_bucket_size: u32,
    source_root: String,
    build_root: String,
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceBuilder {
    pub fn new() -> Self {
        WorkspaceBuilder {
            lang_mode: LanguageMode::Normal,
            mode: EvalMode::Execute,
            diagnostics: None,
            break_on_err: false,
            debugger: None,
            frontend: None,
            runner: None,
            disable_fuzz_unsafe: false,
            obj_bucket_size: DEFAULT_OBJ_BUCKET,
            chr_bucket_size: DEFAULT_CHR_BUCKET,
            source_root: String::new(),
            build_root: String::new(),
        }
    }

    #[must_use]
    pub fn lang_mode(mut self, mode: LanguageMode) -> Self {
        self.lang_mode = mode;
        self
    }

    #[must_use]
    pub fn eval_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Collect diagnostics instead of printing them.
    #[must_use]
    pub fn buffered_diagnostics(mut self) -> Self {
        self.diagnostics = Some(DiagnosticSink::buffered());
        self
    }

    /// Print diagnostics to stderr as they are raised.
    #[must_use]
    pub fn immediate_diagnostics(mut self, color: ColorMode) -> Self {
        self.diagnostics = Some(DiagnosticSink::immediate(color));
        self
    }

    /// Hand failing statements to the debugger instead of aborting.
    #[must_use]
    pub fn break_on_err(mut self, on: bool) -> Self {
        self.break_on_err = on;
        self
    }

    #[must_use]
    pub fn debugger(mut self, debugger: Box<dyn Debugger>) -> Self {
        self.debugger = Some(debugger);
        self
    }

    #[must_use]
    pub fn frontend(mut self, frontend: Box<dyn Frontend>) -> Self {
        self.frontend = Some(frontend);
        self
    }

    #[must_use]
    pub fn command_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Refuse to run builtins that touch the outside world.
    #[must_use]
    pub fn disable_fuzz_unsafe(mut self, on: bool) -> Self {
        self.disable_fuzz_unsafe = on;
        self
    }

    /// Bucket sizes for the object arena and character storage.
    #[must_use]
    pub fn bucket_sizes(mut self, objs: u32, chrs: u32) -> Self {
        self.obj_bucket_size = objs;
        self.chr_bucket_size = chrs;
        self
    }

    #[must_use]
    pub fn roots(mut self, source_root: &str, build_root: &str) -> Self {
        self.source_root = source_root.to_string();
        self.build_root = build_root.to_string();
        self
    }

    /// Workspace with the reserved objects and empty global containers,
    /// but no built-in options. Used for tooling that only needs storage.
    pub fn build_bare(self) -> Workspace {
        let mut objs = BucketArray::new(self.obj_bucket_size);
        let null = objs.push(Object::Null);
        let disabler = objs.push(Object::Disabler);
        debug_assert_eq!((null, disabler), (Obj::NULL.0, Obj::DISABLER.0));

        let mut wk = Workspace {
            strs: StrStore::new(self.chr_bucket_size, DEFAULT_STR_BUCKET),
            objs,
            projects: Vec::new(),
            cur_project: 0,
            scope: Hash::new(),
            globals: Globals {
                subprojects: Obj::NULL,
                dep_overrides: Obj::NULL,
                find_program_overrides: Obj::NULL,
                install: Obj::NULL,
                global_opts: Obj::NULL,
            },
            lang_mode: self.lang_mode,
            mode: self.mode,
            loop_depth: 0,
            loop_ctl: LoopCtl::Normal,
            subdir_done: false,
            disabler_immunity: false,
            disable_fuzz_unsafe: self.disable_fuzz_unsafe,
            analyze: AnalyzeState::default(),
            dbg: DebugState::new(self.break_on_err),
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| DiagnosticSink::immediate(ColorMode::Auto)),
            frontend: self.frontend,
            runner: self.runner,
            debugger: self.debugger,
            source_root: self.source_root,
            build_root: self.build_root,
        };

        wk.globals = Globals {
            subprojects: wk.make_dict(),
            dep_overrides: wk.make_dict(),
            find_program_overrides: wk.make_dict(),
            install: wk.make_array(),
            global_opts: wk.make_dict(),
        };
        wk
    }

    /// Fully initialized workspace with built-in options registered.
    pub fn build(self) -> Workspace {
        let mut wk = self.build_bare();
        register_builtin_options(&mut wk);
        wk
    }
}

fn register_builtin_options(wk: &mut Workspace) {
    let prefix = wk.make_str("/usr/local");
    let buildtype = wk.make_str("debug");
    let default_library = wk.make_str("shared");
    let werror = wk.make_bool(false);
    let defaults = [
        ("prefix", BuildOptionKind::String, prefix),
        ("buildtype", BuildOptionKind::Combo, buildtype),
        ("default_library", BuildOptionKind::Combo, default_library),
        ("werror", BuildOptionKind::Boolean, werror),
    ];

    for (name, kind, val) in defaults {
        let name_obj = wk.make_str(name);
        let opt = wk.make_obj(Object::BuildOption(BuildOption {
            name: name_obj,
            kind,
            val,
            choices: Obj::NULL,
            description: Obj::NULL,
        }));
        let dict = wk.globals.global_opts;
        wk.dict_set(dict, name_obj, opt);
    }
}
