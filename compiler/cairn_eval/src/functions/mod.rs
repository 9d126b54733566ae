//! Builtin functions and methods.
//!
//! Each module owns the builtins of one receiver type and exposes them as a
//! static [`FuncImpl`](crate::dispatch::FuncImpl) table. The helpers here
//! cover coercions shared by several builtins.

pub(crate) mod array;
pub(crate) mod boolean;
pub(crate) mod both_libs;
pub(crate) mod build_target;
pub(crate) mod configuration_data;
pub(crate) mod custom_target;
pub(crate) mod dependency;
pub(crate) mod dict;
pub(crate) mod disabler;
pub(crate) mod environment;
pub(crate) mod external_program;
pub(crate) mod feature_opt;
pub(crate) mod file;
pub(crate) mod generator;
pub(crate) mod kernel;
pub(crate) mod meson;
pub(crate) mod module;
pub(crate) mod number;
pub(crate) mod options;
pub(crate) mod run_result;
pub(crate) mod string;
pub(crate) mod subproject;

use cairn_ir::NodeId;

use crate::args::Kwarg;
use crate::errors::{self, CallHalt};
use crate::interp::Interp;
use crate::object::{FeatureState, Obj, ObjType, Object};
use crate::path;
use crate::types::TypeTag;
use crate::workspace::Workspace;

/// Index of the current project, or an error when no project exists.
pub(crate) fn project_idx(interp: &mut Interp<'_>, node: NodeId) -> Result<usize, CallHalt> {
    if interp.wk.projects.is_empty() {
        return Err(interp.halt(node, "this function requires a project"));
    }
    Ok(interp.wk.cur_project)
}

/// Directory of the build file being evaluated.
pub(crate) fn current_dir(wk: &Workspace) -> String {
    wk.current_project().map_or_else(String::new, |p| p.cwd.clone())
}

pub(crate) fn current_build_dir(wk: &Workspace) -> String {
    wk.current_project().map_or_else(String::new, |p| p.build_dir.clone())
}

/// Path of a build target's output.
pub(crate) fn build_target_path(wk: &Workspace, tgt: Obj) -> String {
    let t = wk.get_build_target(tgt);
    path::join(wk.str(t.build_dir), &t.kind.output_name(wk.str(t.name)))
}

fn type_error(interp: &mut Interp<'_>, node: NodeId, expected: TypeTag, val: Obj) -> CallHalt {
    let got = interp.wk.type_tag_of(val).render();
    interp.halt(node, errors::expected_type(expected, &got))
}

/// Turn strings, files and target outputs into a flat array of files.
/// Relative strings are taken relative to the current directory.
pub(crate) fn coerce_files(interp: &mut Interp<'_>, node: NodeId, val: Obj) -> Result<Obj, CallHalt> {
    let cwd = current_dir(interp.wk);
    let elems = if interp.wk.obj_type(val) == ObjType::Array {
        interp.wk.array_flat(val)
    } else {
        vec![val]
    };

    let out = interp.wk.make_array();
    for v in elems {
        match interp.wk.obj_type(v) {
            ObjType::String => {
                if interp.wk.str_has_null(v) {
                    let rendered = interp.wk.obj_to_s(v);
                    return Err(interp.halt(node, errors::invalid_path(&rendered)));
                }
                let p = interp.wk.str(v);
                let full = if path::is_absolute(p) {
                    p.to_string()
                } else {
                    path::join(&cwd, p)
                };
                let f = interp.wk.make_file(&full);
                interp.wk.array_push(out, f);
            }
            ObjType::File | ObjType::GeneratedList => interp.wk.array_push(out, v),
            ObjType::BuildTarget => {
                let full = build_target_path(interp.wk, v);
                let f = interp.wk.make_file(&full);
                interp.wk.array_push(out, f);
            }
            ObjType::CustomTarget => {
                let outputs = interp.wk.get_custom_target(v).outputs;
                interp.wk.array_extend(out, outputs);
            }
            _ => return Err(type_error(interp, node, TypeTag::COERCIBLE_FILES, v)),
        }
    }
    Ok(out)
}

/// Path or name of something that can be run.
pub(crate) fn coerce_executable(interp: &mut Interp<'_>, node: NodeId, val: Obj) -> Result<String, CallHalt> {
    match interp.wk.obj_type(val) {
        ObjType::String => Ok(interp.wk.get_cstr(val).to_string()),
        ObjType::File => Ok(interp.wk.file_path(val).to_string()),
        ObjType::BuildTarget => Ok(build_target_path(interp.wk, val)),
        ObjType::ExternalProgram => {
            let prog = *interp.wk.get_external_program(val);
            if !prog.found {
                let msg = format!("program '{}' was not found", interp.wk.str(prog.name));
                return Err(interp.halt(node, msg));
            }
            Ok(interp.wk.str(prog.path).to_string())
        }
        _ => Err(type_error(interp, node, TypeTag::COERCIBLE_EXE, val)),
    }
}

/// Plain string form of a command argument.
pub(crate) fn coerce_command_arg(interp: &mut Interp<'_>, node: NodeId, val: Obj) -> Result<String, CallHalt> {
    match interp.wk.obj_type(val) {
        ObjType::String => Ok(interp.wk.get_cstr(val).to_string()),
        _ => coerce_executable(interp, node, val),
    }
}

/// Environment variables from an `env:` keyword: an environment object, a
/// dict of strings, or `key=value` strings.
pub(crate) fn env_pairs(interp: &mut Interp<'_>, node: NodeId, val: Obj) -> Result<Vec<(String, String)>, CallHalt> {
    let dict = match interp.wk.obj(val) {
        Object::Environment(dict) => Some(*dict),
        Object::Dict(_) => Some(val),
        _ => None,
    };

    if let Some(dict) = dict {
        let mut pairs = Vec::new();
        for (k, v) in interp.wk.dict_entries(dict) {
            let Some(v) = interp.wk.coerce_string(v) else {
                return Err(type_error(interp, node, TypeTag::STRING, v));
            };
            pairs.push((interp.wk.str(k).to_string(), v));
        }
        return Ok(pairs);
    }

    let elems = if interp.wk.obj_type(val) == ObjType::Array {
        interp.wk.array_flat(val)
    } else {
        vec![val]
    };
    let mut pairs = Vec::with_capacity(elems.len());
    for v in elems {
        interp.typecheck(node, v, TypeTag::STRING)?;
        match interp.wk.str(v).split_once('=') {
            Some((k, v)) => pairs.push((k.to_string(), v.to_string())),
            None => return Err(interp.halt(node, "env elements must be of the form 'key=value'")),
        }
    }
    Ok(pairs)
}

/// How hard a lookup must succeed, from a `required:` keyword.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Requirement {
    Required,
    Auto,
    /// A disabled feature: do not even look.
    Skip,
}

pub(crate) fn coerce_requirement(wk: &Workspace, kw: &Kwarg) -> Requirement {
    let Some(val) = kw.get() else {
        return Requirement::Required;
    };
    match wk.obj(val) {
        Object::Bool(false) | Object::FeatureOpt(FeatureState::Auto) => Requirement::Auto,
        Object::FeatureOpt(FeatureState::Disabled) => Requirement::Skip,
        _ => Requirement::Required,
    }
}

#[cfg(test)]
mod tests;
