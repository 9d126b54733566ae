//! Free functions.

use std::path::Path;

use cairn_ir::NodeId;

use crate::args::{ArgSlot, Kwarg};
use crate::command::{CommandRunner, ProcessRunner};
use crate::dispatch::FuncImpl;
use crate::errors::{self, CallHalt, CallResult};
use crate::interp::{FileKind, Interp, BUILD_FILE};
use crate::object::{
    AliasTarget, BothLibs, BuildTarget, BuildTargetKind, CustomTarget, Dependency, ExternalProgram,
    Generator, IncludeDirectory, Module, ModuleKind, Obj, ObjType, Object, RunResult, Subproject,
    TestObj,
};
use crate::path;
use crate::types::TypeTag;
use crate::workspace::Workspace;

use super::meson::LANGUAGE_VERSION;
use super::options::{self, option_str};
use super::string::version_compare;
use super::{
    build_target_path, coerce_command_arg, coerce_executable, coerce_files, coerce_requirement,
    current_dir, env_pairs, project_idx, Requirement,
};

pub(crate) static FUNCS: &[FuncImpl] = &[
    FuncImpl::new("alias_target", func_alias_target, TypeTag::ALIAS_TARGET).pure(),
    FuncImpl::new("assert", func_assert, TypeTag::NULL).pure(),
    FuncImpl::new("both_libraries", func_both_libraries, TypeTag::BOTH_LIBS).pure(),
    FuncImpl::new("configuration_data", func_configuration_data, TypeTag::CONFIGURATION_DATA).pure(),
    FuncImpl::new("custom_target", func_custom_target, TypeTag::CUSTOM_TARGET).pure(),
    FuncImpl::new("declare_dependency", func_declare_dependency, TypeTag::DEPENDENCY).pure(),
    FuncImpl::new("dependency", func_dependency, TypeTag::DEPENDENCY),
    FuncImpl::new("disabler", func_disabler, TypeTag::DISABLER).pure(),
    FuncImpl::new("environment", func_environment, TypeTag::ENVIRONMENT).pure(),
    FuncImpl::new("error", func_error, TypeTag::NULL),
    FuncImpl::new("executable", func_executable, TypeTag::BUILD_TARGET).pure(),
    FuncImpl::new("files", func_files, TypeTag::ARRAY).pure(),
    FuncImpl::new("find_program", func_find_program, TypeTag::EXTERNAL_PROGRAM),
    FuncImpl::new("generator", func_generator, TypeTag::GENERATOR).pure(),
    FuncImpl::new("get_option", func_get_option, TypeTag::ANY).pure(),
    FuncImpl::new("get_variable", func_get_variable, TypeTag::ANY).pure(),
    FuncImpl::new("import", func_import, TypeTag::MODULE).pure(),
    FuncImpl::new("include_directories", func_include_directories, TypeTag::INCLUDE_DIRECTORY.union(TypeTag::ARRAY)).pure(),
    FuncImpl::new("install_data", func_install_data, TypeTag::NULL).pure(),
    FuncImpl::new("is_disabler", func_is_disabler, TypeTag::BOOL).pure(),
    FuncImpl::new("is_variable", func_is_variable, TypeTag::BOOL).pure(),
    FuncImpl::new("join_paths", func_join_paths, TypeTag::STRING).pure(),
    FuncImpl::new("library", func_library, TypeTag::BUILD_TARGET.union(TypeTag::BOTH_LIBS)).pure(),
    FuncImpl::new("message", func_message, TypeTag::NULL),
    FuncImpl::new("p", func_p, TypeTag::NULL),
    FuncImpl::new("project", func_project, TypeTag::NULL).pure(),
    FuncImpl::new("range", func_range, TypeTag::ARRAY).pure(),
    FuncImpl::new("run_command", func_run_command, TypeTag::RUN_RESULT).fuzz_unsafe(),
    FuncImpl::new("set_variable", func_set_variable, TypeTag::NULL).pure(),
    FuncImpl::new("shared_library", func_shared_library, TypeTag::BUILD_TARGET).pure(),
    FuncImpl::new("static_library", func_static_library, TypeTag::BUILD_TARGET).pure(),
    FuncImpl::new("subdir", func_subdir, TypeTag::NULL).pure(),
    FuncImpl::new("subdir_done", func_subdir_done, TypeTag::NULL).pure(),
    FuncImpl::new("subproject", func_subproject, TypeTag::SUBPROJECT).pure(),
    FuncImpl::new("summary", func_summary, TypeTag::NULL).pure(),
    FuncImpl::new("test", func_test, TypeTag::NULL).pure(),
    FuncImpl::new("warning", func_warning, TypeTag::NULL),
];

/// Kernel of internal scripts: no projects, targets or subprojects.
pub(crate) static FUNCS_INTERNAL: &[FuncImpl] = &[
    FuncImpl::new("assert", func_assert, TypeTag::NULL).pure(),
    FuncImpl::new("configuration_data", func_configuration_data, TypeTag::CONFIGURATION_DATA).pure(),
    FuncImpl::new("disabler", func_disabler, TypeTag::DISABLER).pure(),
    FuncImpl::new("environment", func_environment, TypeTag::ENVIRONMENT).pure(),
    FuncImpl::new("error", func_error, TypeTag::NULL),
    FuncImpl::new("files", func_files, TypeTag::ARRAY).pure(),
    FuncImpl::new("find_program", func_find_program, TypeTag::EXTERNAL_PROGRAM),
    FuncImpl::new("get_variable", func_get_variable, TypeTag::ANY).pure(),
    FuncImpl::new("import", func_import, TypeTag::MODULE).pure(),
    FuncImpl::new("is_disabler", func_is_disabler, TypeTag::BOOL).pure(),
    FuncImpl::new("is_variable", func_is_variable, TypeTag::BOOL).pure(),
    FuncImpl::new("join_paths", func_join_paths, TypeTag::STRING).pure(),
    FuncImpl::new("message", func_message, TypeTag::NULL),
    FuncImpl::new("p", func_p, TypeTag::NULL),
    FuncImpl::new("range", func_range, TypeTag::ARRAY).pure(),
    FuncImpl::new("run_command", func_run_command, TypeTag::RUN_RESULT).fuzz_unsafe(),
    FuncImpl::new("set_variable", func_set_variable, TypeTag::NULL).pure(),
    FuncImpl::new("warning", func_warning, TypeTag::NULL),
];

fn func_project(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::glob(TypeTag::STRING)];
    let mut kw = [
        Kwarg::new("default_options", TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("license", TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("meson_version", TypeTag::STRING),
        Kwarg::new("subproject_dir", TypeTag::STRING),
        Kwarg::new("version", TypeTag::STRING | TypeTag::FILE),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [name, _languages] = pos;
    let [default_options, license, meson_version, subproject_dir, version] = kw;

    let idx = project_idx(interp, args_node)?;
    if interp.wk.projects[idx].initialized {
        return Err(interp.halt(args_node, "project() may only be called once"));
    }

    if let Some(req) = meson_version.get() {
        let req = interp.wk.str(req).to_string();
        if !version_compare(LANGUAGE_VERSION, &req) {
            let msg = format!("project requires version {req}, this is {LANGUAGE_VERSION}");
            return Err(interp.halt(meson_version.node, msg));
        }
    }

    let version_obj = match version.get() {
        None => interp.wk.make_str("unknown"),
        Some(v) if interp.wk.obj_type(v) == ObjType::File => read_version_file(interp, version.node, v)?,
        Some(v) => v,
    };

    let project = &mut interp.wk.projects[idx];
    project.name = name.val;
    project.version = version_obj;
    project.license = license.get().unwrap_or(Obj::NULL);
    project.initialized = true;
    if let Some(dir) = subproject_dir.get() {
        let dir = interp.wk.str(dir).to_string();
        interp.wk.projects[idx].subproject_dir = dir;
    }

    if let Some(opts) = default_options.get() {
        for o in interp.wk.array_to_vec(opts) {
            let spec = interp.wk.str(o).to_string();
            options::set_default_option(interp, default_options.node, &spec)?;
        }
    }
    let pending = std::mem::take(&mut interp.wk.projects[idx].pending_default_options);
    for spec in &pending {
        options::set_default_option(interp, args_node, spec)?;
    }

    tracing::info!(
        name = interp.wk.str(name.val),
        version = interp.wk.str(version_obj),
        "configuring project"
    );
    Ok(Obj::NULL)
}

fn read_version_file(interp: &mut Interp<'_>, node: NodeId, file: Obj) -> Result<Obj, CallHalt> {
    let path = interp.wk.file_path(file).to_string();
    let Ok(text) = std::fs::read_to_string(&path) else {
        return Err(interp.halt(node, format!("failed to read version file {path}")));
    };
    let text = text.strip_suffix('\n').unwrap_or(&text);
    if text.contains('\n') {
        return Err(interp.halt(node, "version file is more than one line long"));
    }
    Ok(interp.wk.make_str(text))
}

/// Start, stop and step of a `range()` call. `range(n)` counts from 0.
pub(crate) fn range_params(interp: &mut Interp<'_>, args_node: NodeId) -> Result<(i64, i64, i64), CallHalt> {
    let mut pos = [ArgSlot::new(TypeTag::NUMBER)];
    let mut opt = [ArgSlot::new(TypeTag::NUMBER), ArgSlot::new(TypeTag::NUMBER)];
    interp.interp_args(args_node, &mut pos, &mut opt, &mut [])?;
    let [first] = pos;
    let [second, third] = opt;

    let (start, stop) = if second.set {
        (interp.wk.number(first.val), interp.wk.number(second.val))
    } else {
        (0, interp.wk.number(first.val))
    };
    let step = if third.set { interp.wk.number(third.val) } else { 1 };

    if start < 0 {
        return Err(interp.halt(first.node, format!("range start must be >= 0, got {start}")));
    }
    if stop < start {
        let node = if second.set { second.node } else { first.node };
        return Err(interp.halt(node, format!("range stop must be >= start ({start}), got {stop}")));
    }
    if step < 1 {
        return Err(interp.halt(third.node, format!("range step must be >= 1, got {step}")));
    }
    Ok((start, stop, step))
}

fn func_range(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let (start, stop, step) = range_params(interp, args_node)?;
    let arr = interp.wk.make_array();
    let mut i = start;
    while i < stop {
        let n = interp.wk.make_number(i);
        interp.wk.array_push(arr, n);
        i = i.saturating_add(step);
    }
    Ok(arr)
}

/// Space-separated plain rendering of message arguments.
fn render_message(wk: &Workspace, args: Obj) -> String {
    wk.array_to_vec(args)
        .into_iter()
        .map(|v| wk.coerce_string(v).unwrap_or_else(|| wk.obj_to_s(v)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn func_message(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::MESSAGE)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let msg = render_message(interp.wk, pos[0].val);
    tracing::info!("{msg}");
    interp.info(pos[0].node, &msg);
    Ok(Obj::NULL)
}

fn func_warning(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::MESSAGE)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let msg = render_message(interp.wk, pos[0].val);
    tracing::warn!("{msg}");
    interp.warning(pos[0].node, &msg);
    Ok(Obj::NULL)
}

fn func_error(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::MESSAGE)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let msg = render_message(interp.wk, pos[0].val);
    Err(interp.halt(pos[0].node, msg))
}

fn func_assert(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::BOOL)];
    let mut opt = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut opt, &mut [])?;

    if interp.wk.boolean(pos[0].val) {
        return Ok(Obj::NULL);
    }
    let msg = if opt[0].set {
        format!("assertion failed: {}", interp.wk.str(opt[0].val))
    } else {
        "assertion failed".to_string()
    };
    Err(interp.halt(pos[0].node, msg))
}

pub(crate) fn func_p(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::ANY)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    println!("{}", interp.wk.obj_to_s(pos[0].val));
    Ok(Obj::NULL)
}

fn func_disabler(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(Obj::DISABLER)
}

fn func_is_disabler(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::ANY)];
    let immune = std::mem::replace(&mut interp.wk.disabler_immunity, true);
    let res = interp.interp_args(args_node, &mut pos, &mut [], &mut []);
    interp.wk.disabler_immunity = immune;
    res?;

    let val = pos[0].val;
    let disabled = val == Obj::DISABLER
        || (interp.wk.obj_type(val) == ObjType::Array && interp.wk.array_contains_disabler(val));
    Ok(interp.wk.make_bool(disabled))
}

fn func_set_variable(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::new(TypeTag::ANY)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let [name, value] = pos;

    let name_str = interp.wk.str(name.val).to_string();
    let val = interp.wk.obj_unalias(value.val);
    interp.assign_variable(name.node, &name_str, val)?;
    Ok(Obj::NULL)
}

fn func_get_variable(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    let mut opt = [ArgSlot::new(TypeTag::ANY)];
    interp.interp_args(args_node, &mut pos, &mut opt, &mut [])?;

    match interp.wk.get_variable(interp.wk.str(pos[0].val)) {
        Some(v) => Ok(v),
        None if opt[0].set => Ok(opt[0].val),
        None => Err(interp.halt(pos[0].node, errors::undefined_object())),
    }
}

fn func_is_variable(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let defined = interp.wk.get_variable(interp.wk.str(pos[0].val)).is_some();
    Ok(interp.wk.make_bool(defined))
}

/// Whether a dependency or program was found. Other values count as found.
fn is_found(wk: &Workspace, o: Obj) -> bool {
    match wk.obj(o) {
        Object::Dependency(d) => d.found,
        Object::ExternalProgram(p) => p.found,
        Object::Subproject(s) => s.found,
        _ => true,
    }
}

fn func_subdir(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    let mut kw = [Kwarg::new(
        "if_found",
        TypeTag::DEPENDENCY | TypeTag::EXTERNAL_PROGRAM | TypeTag::ARRAY_OF,
    )];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;

    if let Some(deps) = kw[0].get() {
        if !interp.wk.array_to_vec(deps).into_iter().all(|d| is_found(interp.wk, d)) {
            return Ok(Obj::NULL);
        }
    }

    let idx = project_idx(interp, args_node)?;
    let dir = interp.wk.str(pos[0].val).to_string();
    let project = &interp.wk.projects[idx];
    let old_cwd = project.cwd.clone();
    let old_build_dir = project.build_dir.clone();
    let cwd = path::join(&old_cwd, &dir);
    let build_dir = path::join(&old_build_dir, &dir);
    let file = path::join(&cwd, BUILD_FILE);
    tracing::debug!(dir = %cwd, "entering subdir");

    interp.wk.projects[idx].cwd = cwd;
    interp.wk.projects[idx].build_dir = build_dir;
    let res = interp.wk.eval_build_file(&file, FileKind::Default);
    interp.wk.projects[idx].cwd = old_cwd;
    interp.wk.projects[idx].build_dir = old_build_dir;

    res?;
    Ok(Obj::NULL)
}

fn func_subdir_done(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    interp.wk.subdir_done = true;
    Ok(Obj::NULL)
}

fn func_join_paths(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;

    let mut joined = String::new();
    for part in interp.wk.array_to_vec(pos[0].val) {
        joined = path::join(&joined, interp.wk.str(part));
    }
    Ok(interp.wk.make_str(&joined))
}

fn func_files(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::STRING | TypeTag::FILE)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    coerce_files(interp, pos[0].node, pos[0].val)
}

fn func_environment(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut opt = [ArgSlot::new(TypeTag::DICT)];
    interp.interp_args(args_node, &mut [], &mut opt, &mut [])?;

    let dict = if opt[0].set {
        interp.typecheck_dict(opt[0].node, opt[0].val, TypeTag::STRING)?;
        interp.wk.dict_dup(opt[0].val)
    } else {
        interp.wk.make_dict()
    };
    Ok(interp.wk.make_obj(Object::Environment(dict)))
}

fn func_configuration_data(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut opt = [ArgSlot::new(TypeTag::DICT)];
    interp.interp_args(args_node, &mut [], &mut opt, &mut [])?;

    let dict = if opt[0].set {
        let ty = TypeTag::STRING | TypeTag::NUMBER | TypeTag::BOOL;
        interp.typecheck_dict(opt[0].node, opt[0].val, ty)?;
        interp.wk.dict_dup(opt[0].val)
    } else {
        interp.wk.make_dict()
    };
    Ok(interp.wk.make_obj(Object::ConfigurationData(dict)))
}

fn func_import(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    let mut kw = [
        Kwarg::new("disabler", TypeTag::BOOL),
        Kwarg::new("required", TypeTag::BOOL | TypeTag::FEATURE_OPT),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [disabler, required] = kw;

    let req = coerce_requirement(interp.wk, &required);
    let use_disabler = disabler.get().is_some_and(|d| interp.wk.boolean(d));
    let full_name = interp.wk.str(pos[0].val);
    let name = full_name.strip_prefix("unstable-").unwrap_or(full_name);

    let Some(kind) = ModuleKind::from_name(name) else {
        if req != Requirement::Required && use_disabler {
            return Ok(Obj::DISABLER);
        }
        let msg = format!("module '{name}' not found");
        return Err(interp.halt(pos[0].node, msg));
    };

    let found = req != Requirement::Skip;
    if !found && use_disabler {
        return Ok(Obj::DISABLER);
    }
    Ok(interp.wk.make_obj(Object::Module(Module {
        kind,
        found,
        has_impl: matches!(kind, ModuleKind::Fs | ModuleKind::Keyval),
    })))
}

fn make_not_found_subproject(wk: &mut Workspace) -> Obj {
    wk.make_obj(Object::Subproject(Subproject {
        project: None,
        found: false,
    }))
}

/// Evaluate subproject `name` once, caching the result by name.
pub(crate) fn load_subproject(
    interp: &mut Interp<'_>,
    node: NodeId,
    name: &str,
    req: Requirement,
    default_options: Vec<String>,
    version: Option<&str>,
) -> Result<Obj, CallHalt> {
    let subprojects = interp.wk.globals.subprojects;
    if let Some(sp) = interp.wk.dict_get(subprojects, name) {
        return Ok(sp);
    }
    if req == Requirement::Skip {
        return Ok(make_not_found_subproject(interp.wk));
    }

    let idx = project_idx(interp, node)?;
    let project = &interp.wk.projects[idx];
    let rel = path::join(&project.subproject_dir, name);
    let cwd = path::join(&project.source_root, &rel);
    let build_dir = path::join(&project.build_root, &rel);

    let sp = match interp.wk.eval_project_with(Some(name), &cwd, &build_dir, default_options) {
        Ok(sub_idx) => {
            let have = interp.wk.projects[sub_idx].version;
            let have = if have.is_null() { "unknown" } else { interp.wk.str(have) };
            match version {
                Some(want) if !version_compare(have, want) => {
                    let msg = format!("subproject '{name}' version {have} does not satisfy '{want}'");
                    if req == Requirement::Required {
                        return Err(interp.halt(node, msg));
                    }
                    interp.warning(node, msg);
                    make_not_found_subproject(interp.wk)
                }
                _ => interp.wk.make_obj(Object::Subproject(Subproject {
                    project: u32::try_from(sub_idx).ok(),
                    found: true,
                })),
            }
        }
        Err(e) if req == Requirement::Required => return Err(CallHalt::Error(e)),
        Err(_) => {
            interp.warning(node, format!("subproject '{name}' could not be configured"));
            make_not_found_subproject(interp.wk)
        }
    };

    interp.wk.dict_set_str(subprojects, name, sp);
    Ok(sp)
}

fn string_list(wk: &Workspace, arr: Option<Obj>) -> Vec<String> {
    arr.map(|a| wk.array_to_vec(a).into_iter().map(|s| wk.str(s).to_string()).collect())
        .unwrap_or_default()
}

fn func_subproject(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    let mut kw = [
        Kwarg::new("default_options", TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("required", TypeTag::BOOL | TypeTag::FEATURE_OPT),
        Kwarg::new("version", TypeTag::STRING),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [default_options, required, version] = kw;

    let name = interp.wk.str(pos[0].val).to_string();
    let req = coerce_requirement(interp.wk, &required);
    let defaults = string_list(interp.wk, default_options.get());
    let version = version.get().map(|v| interp.wk.str(v).to_string());
    load_subproject(interp, pos[0].node, &name, req, defaults, version.as_deref())
}

/// Flatten strings and include directory objects into include directories
/// relative to the current directory.
fn coerce_include_dirs(interp: &mut Interp<'_>, node: NodeId, val: Obj, is_system: bool) -> Result<Obj, CallHalt> {
    let cwd = current_dir(interp.wk);
    let out = interp.wk.make_array();
    let elems = if interp.wk.obj_type(val) == ObjType::Array {
        interp.wk.array_flat(val)
    } else {
        vec![val]
    };

    for v in elems {
        let inc = match interp.wk.obj_type(v) {
            ObjType::IncludeDirectory => v,
            ObjType::String => {
                let full = path::join(&cwd, interp.wk.str(v));
                let path = interp.wk.make_str(&full);
                interp
                    .wk
                    .make_obj(Object::IncludeDirectory(IncludeDirectory { path, is_system }))
            }
            _ => {
                interp.typecheck(node, v, TypeTag::STRING | TypeTag::INCLUDE_DIRECTORY)?;
                continue;
            }
        };
        interp.wk.array_push(out, inc);
    }
    Ok(out)
}

fn make_dependency(wk: &mut Workspace, name: &str, found: bool) -> Obj {
    let name = wk.make_str(name);
    let version = wk.make_str("unknown");
    let link_with = wk.make_array();
    let include_dirs = wk.make_array();
    let variables = wk.make_dict();
    wk.make_obj(Object::Dependency(Dependency {
        name,
        version,
        found,
        link_with,
        include_dirs,
        variables,
    }))
}

fn func_declare_dependency(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut kw = [
        Kwarg::new("include_directories", TypeTag::INCLUDE_DIRECTORY | TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("link_with", TypeTag::BUILD_TARGET | TypeTag::ARRAY_OF),
        Kwarg::new("variables", TypeTag::DICT),
        Kwarg::new("version", TypeTag::STRING),
    ];
    interp.interp_args(args_node, &mut [], &mut [], &mut kw)?;
    let [include_directories, link_with, variables, version] = kw;

    let dep = make_dependency(interp.wk, "", true);
    if let Some(inc) = include_directories.get() {
        let inc = coerce_include_dirs(interp, include_directories.node, inc, false)?;
        interp.wk.get_dependency_mut(dep).include_dirs = inc;
    }
    if let Some(vars) = variables.get() {
        interp.typecheck_dict(variables.node, vars, TypeTag::STRING)?;
        let vars = interp.wk.dict_dup(vars);
        interp.wk.get_dependency_mut(dep).variables = vars;
    }
    let d = interp.wk.get_dependency_mut(dep);
    if let Some(l) = link_with.get() {
        d.link_with = l;
    }
    if let Some(v) = version.get() {
        d.version = v;
    }
    Ok(dep)
}

fn dependency_satisfies(wk: &Workspace, dep: Obj, want: Option<Obj>) -> bool {
    let Some(want) = want else {
        return true;
    };
    let have = wk.get_dependency(dep).version;
    wk.array_to_vec(want)
        .into_iter()
        .all(|w| version_compare(wk.str(have), wk.str(w)))
}

fn func_dependency(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::STRING)];
    let mut kw = [
        Kwarg::new("default_options", TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("disabler", TypeTag::BOOL),
        Kwarg::new("fallback", TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("method", TypeTag::STRING),
        Kwarg::new("native", TypeTag::BOOL),
        Kwarg::new("not_found_message", TypeTag::STRING),
        Kwarg::new("required", TypeTag::BOOL | TypeTag::FEATURE_OPT),
        Kwarg::new("static", TypeTag::BOOL),
        Kwarg::new("version", TypeTag::STRING | TypeTag::ARRAY_OF),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [default_options, disabler, fallback, _method, _native, not_found_message, required, _static, version] = kw;

    let names = string_list(interp.wk, Some(pos[0].val));
    let Some(first) = names.first().cloned() else {
        return Err(interp.halt(args_node, errors::missing_arguments("(signature: varargs)")));
    };
    let req = coerce_requirement(interp.wk, &required);
    if req == Requirement::Skip {
        return Ok(make_dependency(interp.wk, &first, false));
    }

    let overrides = interp.wk.globals.dep_overrides;
    let lookup_override = |wk: &Workspace| {
        names
            .iter()
            .find_map(|n| wk.dict_get(overrides, n))
            .filter(|d| dependency_satisfies(wk, *d, version.get()))
    };
    if let Some(dep) = lookup_override(interp.wk) {
        return Ok(dep);
    }

    if let Some(fb) = fallback.get() {
        let fb = string_list(interp.wk, Some(fb));
        if let Some(sub_name) = fb.first() {
            let sub_req = if req == Requirement::Required { Requirement::Required } else { Requirement::Auto };
            let defaults = string_list(interp.wk, default_options.get());
            let sp = load_subproject(interp, fallback.node, sub_name, sub_req, defaults, None)?;

            if let Some(dep) = lookup_override(interp.wk) {
                return Ok(dep);
            }
            let sub = *interp.wk.get_subproject(sp);
            if let (true, Some(idx), Some(var)) = (sub.found, sub.project, fb.get(1)) {
                let dep = interp.wk.projects[idx as usize].scope.get(var.as_str()).copied();
                match dep {
                    Some(d) if interp.wk.obj_type(d) == ObjType::Dependency => return Ok(d),
                    Some(_) => {
                        let msg = format!("fallback variable '{var}' in subproject '{sub_name}' is not a dependency");
                        return Err(interp.halt(fallback.node, msg));
                    }
                    None => {}
                }
            }
        }
    }

    if req == Requirement::Required {
        let mut msg = format!("dependency '{first}' not found");
        if let Some(extra) = not_found_message.get() {
            msg = format!("{msg}: {}", interp.wk.str(extra));
        }
        return Err(interp.halt(pos[0].node, msg));
    }
    if disabler.get().is_some_and(|d| interp.wk.boolean(d)) {
        return Ok(Obj::DISABLER);
    }
    tracing::debug!(dependency = %first, "dependency not found");
    Ok(make_dependency(interp.wk, &first, false))
}

/// Bound arguments shared by every build target function.
struct TargetArgs {
    name: Obj,
    sources: Obj,
    deps: Obj,
    include_dirs: Obj,
    link_with: Obj,
    install: bool,
    install_dir: Option<String>,
}

fn bind_target_args(interp: &mut Interp<'_>, args_node: NodeId) -> Result<TargetArgs, CallHalt> {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::glob(TypeTag::COERCIBLE_FILES)];
    let mut kw = [
        Kwarg::new("dependencies", TypeTag::DEPENDENCY | TypeTag::ARRAY_OF),
        Kwarg::new("include_directories", TypeTag::INCLUDE_DIRECTORY | TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("install", TypeTag::BOOL),
        Kwarg::new("install_dir", TypeTag::STRING),
        Kwarg::new("link_with", TypeTag::BUILD_TARGET | TypeTag::ARRAY_OF),
        Kwarg::new("sources", TypeTag::COERCIBLE_FILES | TypeTag::ARRAY_OF),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [name, srcs] = pos;
    let [dependencies, include_directories, install, install_dir, link_with, sources] = kw;

    if let Some(extra) = sources.get() {
        interp.wk.array_extend(srcs.val, extra);
    }
    let sources = coerce_files(interp, srcs.node, srcs.val)?;
    let include_dirs = match include_directories.get() {
        Some(inc) => coerce_include_dirs(interp, include_directories.node, inc, false)?,
        None => interp.wk.make_array(),
    };
    let deps = dependencies.get().unwrap_or_else(|| interp.wk.make_array());
    let link_with = link_with.get().unwrap_or_else(|| interp.wk.make_array());

    Ok(TargetArgs {
        name: name.val,
        sources,
        deps,
        include_dirs,
        link_with,
        install: install.get().is_some_and(|i| interp.wk.boolean(i)),
        install_dir: install_dir.get().map(|d| interp.wk.str(d).to_string()),
    })
}

fn create_target(interp: &mut Interp<'_>, node: NodeId, args: &TargetArgs, kind: BuildTargetKind) -> CallResult {
    let idx = project_idx(interp, node)?;
    let build_dir = interp.wk.projects[idx].build_dir.clone();
    let build_dir = interp.wk.make_str(&build_dir);

    let tgt = interp.wk.make_obj(Object::BuildTarget(BuildTarget {
        name: args.name,
        kind,
        sources: args.sources,
        deps: args.deps,
        include_dirs: args.include_dirs,
        build_dir,
    }));
    let targets = interp.wk.projects[idx].targets;
    interp.wk.array_push(targets, tgt);

    let output = build_target_path(interp.wk, tgt);
    tracing::debug!(output = %output, ?kind, "added target");

    if args.install {
        let dest = args.install_dir.clone().unwrap_or_else(|| {
            let prefix = option_str(interp.wk, "prefix", "/usr/local");
            let sub = if kind == BuildTargetKind::Executable { "bin" } else { "lib" };
            path::join(&prefix, sub)
        });
        interp.wk.push_install_target(&output, &dest);
    }
    Ok(tgt)
}

fn func_executable(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let args = bind_target_args(interp, args_node)?;
    create_target(interp, args_node, &args, BuildTargetKind::Executable)
}

fn func_static_library(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let args = bind_target_args(interp, args_node)?;
    create_target(interp, args_node, &args, BuildTargetKind::StaticLibrary)
}

fn func_shared_library(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let args = bind_target_args(interp, args_node)?;
    create_target(interp, args_node, &args, BuildTargetKind::SharedLibrary)
}

fn both_libraries(interp: &mut Interp<'_>, args_node: NodeId, args: &TargetArgs) -> CallResult {
    let static_lib = create_target(interp, args_node, args, BuildTargetKind::StaticLibrary)?;
    let shared_lib = create_target(interp, args_node, args, BuildTargetKind::SharedLibrary)?;
    Ok(interp.wk.make_obj(Object::BothLibs(BothLibs { static_lib, shared_lib })))
}

fn func_both_libraries(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let args = bind_target_args(interp, args_node)?;
    both_libraries(interp, args_node, &args)
}

/// A static, shared or both kinds of library depending on the
/// `default_library` option.
fn func_library(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let args = bind_target_args(interp, args_node)?;
    match option_str(interp.wk, "default_library", "shared").as_str() {
        "static" => create_target(interp, args_node, &args, BuildTargetKind::StaticLibrary),
        "both" => both_libraries(interp, args_node, &args),
        _ => create_target(interp, args_node, &args, BuildTargetKind::SharedLibrary),
    }
}

fn func_include_directories(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::STRING | TypeTag::INCLUDE_DIRECTORY)];
    let mut kw = [Kwarg::new("is_system", TypeTag::BOOL)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;

    let is_system = kw[0].get().is_some_and(|b| interp.wk.boolean(b));
    let dirs = coerce_include_dirs(interp, pos[0].node, pos[0].val, is_system)?;
    if interp.wk.array_len(dirs) == 1 {
        return Ok(interp.wk.array_index(dirs, 0));
    }
    Ok(dirs)
}

/// Look `name` up next to the build file, then in `dirs`, then on `PATH`.
fn search_program(cwd: &str, dirs: &[String], name: &str) -> Option<String> {
    if path::is_absolute(name) {
        return Path::new(name).is_file().then(|| name.to_string());
    }

    let local = path::join(cwd, name);
    if Path::new(&local).is_file() {
        return Some(local);
    }
    for dir in dirs {
        let candidate = path::join(dir, name);
        if Path::new(&candidate).is_file() {
            return Some(candidate);
        }
    }
    if name.contains('/') {
        return None;
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
        .map(|candidate| candidate.display().to_string())
}

fn func_find_program(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::STRING | TypeTag::FILE)];
    let mut kw = [
        Kwarg::new("dirs", TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("disabler", TypeTag::BOOL),
        Kwarg::new("native", TypeTag::BOOL),
        Kwarg::new("required", TypeTag::BOOL | TypeTag::FEATURE_OPT),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [dirs, disabler, _native, required] = kw;

    let candidates = interp.wk.array_to_vec(pos[0].val);
    let first_name = match candidates.first() {
        Some(&c) if interp.wk.obj_type(c) == ObjType::File => interp.wk.file_path(c).to_string(),
        Some(&c) => interp.wk.str(c).to_string(),
        None => return Err(interp.halt(args_node, errors::missing_arguments("(signature: varargs)"))),
    };
    let req = coerce_requirement(interp.wk, &required);

    let make_prog = |wk: &mut Workspace, name: &str, found_at: Option<&str>| {
        let name = wk.make_str(name);
        let path = wk.make_str(found_at.unwrap_or(""));
        wk.make_obj(Object::ExternalProgram(ExternalProgram {
            name,
            path,
            found: found_at.is_some(),
        }))
    };
    if req == Requirement::Skip {
        return Ok(make_prog(interp.wk, &first_name, None));
    }

    let overrides = interp.wk.globals.find_program_overrides;
    let cwd = current_dir(interp.wk);
    let dirs = string_list(interp.wk, dirs.get());
    for c in candidates {
        if interp.wk.obj_type(c) == ObjType::File {
            let p = interp.wk.file_path(c).to_string();
            if Path::new(&p).is_file() {
                return Ok(make_prog(interp.wk, &p, Some(&p)));
            }
            continue;
        }

        let name = interp.wk.str(c).to_string();
        if let Some(prog) = interp.wk.dict_get(overrides, &name) {
            return Ok(prog);
        }
        if let Some(found) = search_program(&cwd, &dirs, &name) {
            tracing::debug!(program = %name, path = %found, "found program");
            return Ok(make_prog(interp.wk, &name, Some(&found)));
        }
    }

    if req == Requirement::Required {
        return Err(interp.halt(pos[0].node, format!("program '{first_name}' not found")));
    }
    if disabler.get().is_some_and(|d| interp.wk.boolean(d)) {
        return Ok(Obj::DISABLER);
    }
    Ok(make_prog(interp.wk, &first_name, None))
}

fn func_run_command(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::COERCIBLE_EXE)];
    let mut kw = [
        Kwarg::new("capture", TypeTag::BOOL),
        Kwarg::new("check", TypeTag::BOOL),
        Kwarg::new("env", TypeTag::ENVIRONMENT | TypeTag::DICT | TypeTag::STRING | TypeTag::ARRAY),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [capture, check, env] = kw;

    let elems = interp.wk.array_to_vec(pos[0].val);
    let Some((&cmd, rest)) = elems.split_first() else {
        return Err(interp.halt(args_node, "run_command() requires a command"));
    };
    let mut argv = vec![coerce_executable(interp, pos[0].node, cmd)?];
    for &arg in rest {
        argv.push(coerce_command_arg(interp, pos[0].node, arg)?);
    }
    let env = match env.get() {
        Some(e) => env_pairs(interp, env.node, e)?,
        None => Vec::new(),
    };

    let res = match interp.wk.runner.as_mut() {
        Some(runner) => runner.run(&argv, &env),
        None => ProcessRunner.run(&argv, &env),
    };
    let output = match res {
        Ok(output) => output,
        Err(e) => return Err(interp.halt(pos[0].node, e.to_string())),
    };

    if check.get().is_some_and(|c| interp.wk.boolean(c)) && output.status != 0 {
        let msg = format!("command failed: '{}'", output.stderr.trim_end());
        return Err(interp.halt(pos[0].node, msg));
    }

    let capture = capture.get().map_or(true, |c| interp.wk.boolean(c));
    let (out, err) = if capture {
        (interp.wk.make_str(&output.stdout), interp.wk.make_str(&output.stderr))
    } else {
        (interp.wk.make_str(""), interp.wk.make_str(""))
    };
    Ok(interp.wk.make_obj(Object::RunResult(RunResult {
        status: output.status,
        out,
        err,
    })))
}

/// Expand `@INPUT@` and `@OUTPUT@` in a custom target command.
fn expand_command(
    interp: &mut Interp<'_>,
    node: NodeId,
    command: Obj,
    inputs: Obj,
    outputs: Obj,
) -> Result<Obj, CallHalt> {
    let file_strs = |wk: &mut Workspace, files: Obj| -> Vec<Obj> {
        wk.array_to_vec(files)
            .into_iter()
            .map(|f| {
                let p = wk.file_path(f).to_string();
                wk.make_str(&p)
            })
            .collect()
    };

    let out = interp.wk.make_array();
    for (i, arg) in interp.wk.array_to_vec(command).into_iter().enumerate() {
        let expands_to = match interp.wk.obj(arg) {
            Object::String(_) if interp.wk.str_eq(arg, "@INPUT@") => Some(inputs),
            Object::String(_) if interp.wk.str_eq(arg, "@OUTPUT@") => Some(outputs),
            _ => None,
        };
        if let Some(files) = expands_to {
            for s in file_strs(interp.wk, files) {
                interp.wk.array_push(out, s);
            }
            continue;
        }
        let s = if i == 0 {
            coerce_executable(interp, node, arg)?
        } else {
            coerce_command_arg(interp, node, arg)?
        };
        let s = interp.wk.make_str(&s);
        interp.wk.array_push(out, s);
    }
    Ok(out)
}

fn func_custom_target(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut opt = [ArgSlot::new(TypeTag::STRING)];
    let mut kw = [
        Kwarg::new("build_by_default", TypeTag::BOOL),
        Kwarg::new("capture", TypeTag::BOOL),
        Kwarg::new("command", TypeTag::COERCIBLE_EXE | TypeTag::ARRAY_OF).required(),
        Kwarg::new("input", TypeTag::COERCIBLE_FILES | TypeTag::ARRAY_OF),
        Kwarg::new("install", TypeTag::BOOL),
        Kwarg::new("install_dir", TypeTag::STRING),
        Kwarg::new("output", TypeTag::STRING | TypeTag::ARRAY_OF).required(),
    ];
    interp.interp_args(args_node, &mut [], &mut opt, &mut kw)?;
    let [_build_by_default, capture, command, input, install, install_dir, output] = kw;

    let idx = project_idx(interp, args_node)?;
    let build_dir = interp.wk.projects[idx].build_dir.clone();

    let inputs = match input.get() {
        Some(i) => coerce_files(interp, input.node, i)?,
        None => interp.wk.make_array(),
    };
    let outputs = interp.wk.make_array();
    let output_names = string_list(interp.wk, output.get());
    for name in &output_names {
        if name.contains('/') {
            return Err(interp.halt(output.node, format!("output '{name}' must not contain a path separator")));
        }
        let f = interp.wk.make_file(&path::join(&build_dir, name));
        interp.wk.array_push(outputs, f);
    }
    let Some(first_output) = output_names.first() else {
        return Err(interp.halt(output.node, "custom_target() needs at least one output"));
    };
    if capture.get().is_some_and(|c| interp.wk.boolean(c)) && output_names.len() != 1 {
        return Err(interp.halt(output.node, "capture requires exactly one output"));
    }

    let name = if opt[0].set {
        opt[0].val
    } else {
        interp.wk.make_str(first_output)
    };
    let command = command.get().unwrap_or_else(|| interp.wk.make_array());
    let command = expand_command(interp, args_node, command, inputs, outputs)?;

    let tgt = interp.wk.make_obj(Object::CustomTarget(CustomTarget {
        name,
        inputs,
        outputs,
        command,
    }));
    let targets = interp.wk.projects[idx].targets;
    interp.wk.array_push(targets, tgt);

    if install.get().is_some_and(|i| interp.wk.boolean(i)) {
        let Some(dir) = install_dir.get() else {
            return Err(interp.halt(args_node, "install_dir is required when installing a custom target"));
        };
        let dir = interp.wk.str(dir).to_string();
        for f in interp.wk.array_to_vec(outputs) {
            let p = interp.wk.file_path(f).to_string();
            interp.wk.push_install_target(&p, &dir);
        }
    }
    Ok(tgt)
}

fn func_test(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::new(TypeTag::COERCIBLE_EXE)];
    let mut kw = [
        Kwarg::new("args", TypeTag::COERCIBLE_EXE | TypeTag::ARRAY_OF),
        Kwarg::new("env", TypeTag::ENVIRONMENT | TypeTag::DICT | TypeTag::STRING | TypeTag::ARRAY),
        Kwarg::new("should_fail", TypeTag::BOOL),
        Kwarg::new("suite", TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("timeout", TypeTag::NUMBER),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [name, exe] = pos;
    let [args, env, should_fail, _suite, _timeout] = kw;

    let idx = project_idx(interp, args_node)?;
    let exe_path = coerce_executable(interp, exe.node, exe.val)?;
    let exe_obj = interp.wk.make_str(&exe_path);

    let test_args = interp.wk.make_array();
    if let Some(a) = args.get() {
        for v in interp.wk.array_to_vec(a) {
            let s = coerce_command_arg(interp, args.node, v)?;
            let s = interp.wk.make_str(&s);
            interp.wk.array_push(test_args, s);
        }
    }
    if let Some(e) = env.get() {
        env_pairs(interp, env.node, e)?;
    }

    let test = interp.wk.make_obj(Object::Test(TestObj {
        name: name.val,
        exe: exe_obj,
        args: test_args,
        should_fail: should_fail.get().is_some_and(|b| interp.wk.boolean(b)),
    }));
    let tests = interp.wk.projects[idx].tests;
    interp.wk.array_push(tests, test);
    Ok(Obj::NULL)
}

fn func_summary(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING | TypeTag::DICT)];
    let mut opt = [ArgSlot::new(TypeTag::ANY)];
    let mut kw = [
        Kwarg::new("bool_yn", TypeTag::BOOL),
        Kwarg::new("list_sep", TypeTag::STRING),
        Kwarg::new("section", TypeTag::STRING),
    ];
    interp.interp_args(args_node, &mut pos, &mut opt, &mut kw)?;
    let [_bool_yn, _list_sep, section] = kw;

    let entries = if opt[0].set {
        interp.typecheck(pos[0].node, pos[0].val, TypeTag::STRING)?;
        let dict = interp.wk.make_dict();
        interp.wk.dict_set(dict, pos[0].val, opt[0].val);
        dict
    } else {
        interp.typecheck(pos[0].node, pos[0].val, TypeTag::DICT)?;
        pos[0].val
    };

    let idx = project_idx(interp, args_node)?;
    let section = section.get().map_or_else(String::new, |s| interp.wk.str(s).to_string());
    let summary = interp.wk.projects[idx].summary;
    let merged = match interp.wk.dict_get(summary, &section) {
        Some(prev) => interp.wk.dict_merge(prev, entries),
        None => interp.wk.dict_dup(entries),
    };
    interp.wk.dict_set_str(summary, &section, merged);
    Ok(Obj::NULL)
}

fn func_get_option(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;

    let name = interp.wk.str(pos[0].val);
    match options::option_value(interp.wk, name) {
        Some(v) => Ok(interp.wk.obj_unalias(v)),
        None => {
            let msg = format!("undefined option '{name}'");
            Err(interp.halt(pos[0].node, msg))
        }
    }
}

fn func_install_data(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::STRING | TypeTag::FILE)];
    let mut kw = [
        Kwarg::new("install_dir", TypeTag::STRING),
        Kwarg::new("rename", TypeTag::STRING | TypeTag::ARRAY_OF),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [install_dir, rename] = kw;

    let files = coerce_files(interp, pos[0].node, pos[0].val)?;
    let files = interp.wk.array_to_vec(files);
    let renames = string_list(interp.wk, rename.get());
    if rename.set && renames.len() != files.len() {
        let msg = format!("rename has {} entries, but there are {} files", renames.len(), files.len());
        return Err(interp.halt(rename.node, msg));
    }

    let dir = match install_dir.get() {
        Some(d) => interp.wk.str(d).to_string(),
        None => {
            let prefix = option_str(interp.wk, "prefix", "/usr/local");
            let project = interp.wk.current_project().map(|p| p.name).unwrap_or(Obj::NULL);
            let project = if project.is_null() { "" } else { interp.wk.str(project) };
            path::join(&path::join(&prefix, "share"), project)
        }
    };

    for (i, f) in files.into_iter().enumerate() {
        let src = interp.wk.file_path(f).to_string();
        match renames.get(i) {
            Some(new_name) => {
                let dest = path::join(&dir, path::dirname(new_name));
                let tgt = interp.wk.push_install_target(&src, &dest);
                let dest = interp.wk.make_str(&path::join(&dir, new_name));
                interp.wk.get_install_target_mut(tgt).dest = dest;
            }
            None => {
                interp.wk.push_install_target(&src, &dir);
            }
        }
    }
    Ok(Obj::NULL)
}

fn func_generator(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::COERCIBLE_EXE)];
    let mut kw = [
        Kwarg::new("arguments", TypeTag::STRING | TypeTag::ARRAY_OF).required(),
        Kwarg::new("output", TypeTag::STRING | TypeTag::ARRAY_OF).required(),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [arguments, output] = kw;

    let exe = coerce_executable(interp, pos[0].node, pos[0].val)?;
    let exe = interp.wk.make_str(&exe);
    let args = arguments.get().unwrap_or_else(|| interp.wk.make_array());
    let output = output.get().unwrap_or_else(|| interp.wk.make_array());
    Ok(interp.wk.make_obj(Object::Generator(Generator { exe, output, args })))
}

fn func_alias_target(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [
        ArgSlot::new(TypeTag::STRING),
        ArgSlot::glob(TypeTag::BUILD_TARGET | TypeTag::CUSTOM_TARGET),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let [name, depends] = pos;

    let idx = project_idx(interp, args_node)?;
    let tgt = interp.wk.make_obj(Object::AliasTarget(AliasTarget {
        name: name.val,
        depends: depends.val,
    }));
    let targets = interp.wk.projects[idx].targets;
    interp.wk.array_push(targets, tgt);
    Ok(tgt)
}
