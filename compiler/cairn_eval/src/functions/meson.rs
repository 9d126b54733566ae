//! Methods of the `meson` object.

use cairn_ir::NodeId;

use crate::args::ArgSlot;
use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::{ExternalProgram, Obj, ObjType, Object};
use crate::types::TypeTag;

use super::{coerce_executable, current_build_dir, current_dir, project_idx};

/// Language version reported by `meson.version()` and checked by
/// `project(meson_version: ...)`.
pub(crate) const LANGUAGE_VERSION: &str = "1.3.0";

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("build_root", func_build_root, TypeTag::STRING).pure(),
    FuncImpl::new("current_build_dir", func_current_build_dir, TypeTag::STRING).pure(),
    FuncImpl::new("current_source_dir", func_current_source_dir, TypeTag::STRING).pure(),
    FuncImpl::new("global_build_root", func_global_build_root, TypeTag::STRING).pure(),
    FuncImpl::new("global_source_root", func_global_source_root, TypeTag::STRING).pure(),
    FuncImpl::new("is_subproject", func_is_subproject, TypeTag::BOOL).pure(),
    FuncImpl::new("override_dependency", func_override_dependency, TypeTag::NULL).pure(),
    FuncImpl::new("override_find_program", func_override_find_program, TypeTag::NULL).pure(),
    FuncImpl::new("project_build_root", func_build_root, TypeTag::STRING).pure(),
    FuncImpl::new("project_license", func_project_license, TypeTag::ARRAY).pure(),
    FuncImpl::new("project_name", func_project_name, TypeTag::STRING).pure(),
    FuncImpl::new("project_source_root", func_source_root, TypeTag::STRING).pure(),
    FuncImpl::new("project_version", func_project_version, TypeTag::STRING).pure(),
    FuncImpl::new("source_root", func_source_root, TypeTag::STRING).pure(),
    FuncImpl::new("version", func_version, TypeTag::STRING).pure(),
];

fn func_version(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.make_str(LANGUAGE_VERSION))
}

fn func_project_name(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let idx = project_idx(interp, args_node)?;
    Ok(interp.wk.projects[idx].name)
}

fn func_project_version(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let idx = project_idx(interp, args_node)?;
    Ok(interp.wk.projects[idx].version)
}

fn func_project_license(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let idx = project_idx(interp, args_node)?;
    let license = interp.wk.projects[idx].license;
    match interp.wk.obj_type(license) {
        ObjType::Array => Ok(license),
        ObjType::String => Ok(interp.wk.make_array_from(&[license])),
        _ => Ok(interp.wk.make_array()),
    }
}

fn func_current_source_dir(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let dir = current_dir(interp.wk);
    Ok(interp.wk.make_str(&dir))
}

fn func_current_build_dir(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let dir = current_build_dir(interp.wk);
    Ok(interp.wk.make_str(&dir))
}

/// Source root of the current project.
fn func_source_root(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let idx = project_idx(interp, args_node)?;
    let dir = interp.wk.projects[idx].source_root.clone();
    Ok(interp.wk.make_str(&dir))
}

fn func_build_root(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let idx = project_idx(interp, args_node)?;
    let dir = interp.wk.projects[idx].build_root.clone();
    Ok(interp.wk.make_str(&dir))
}

fn func_global_source_root(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let dir = interp.wk.source_root.clone();
    Ok(interp.wk.make_str(&dir))
}

fn func_global_build_root(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let dir = interp.wk.build_root.clone();
    Ok(interp.wk.make_str(&dir))
}

fn func_is_subproject(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let sub = interp.wk.current_project().is_some_and(|p| p.is_subproject());
    Ok(interp.wk.make_bool(sub))
}

fn func_override_dependency(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::new(TypeTag::DEPENDENCY)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let [name, dep] = pos;

    let overrides = interp.wk.globals.dep_overrides;
    interp.wk.dict_set(overrides, name.val, dep.val);
    Ok(Obj::NULL)
}

fn func_override_find_program(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [
        ArgSlot::new(TypeTag::STRING),
        ArgSlot::new(TypeTag::EXTERNAL_PROGRAM | TypeTag::BUILD_TARGET | TypeTag::FILE),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let [name, prog] = pos;

    let prog = match interp.wk.obj_type(prog.val) {
        ObjType::ExternalProgram => prog.val,
        _ => {
            let path = coerce_executable(interp, prog.node, prog.val)?;
            let path = interp.wk.make_str(&path);
            interp.wk.make_obj(Object::ExternalProgram(ExternalProgram {
                name: name.val,
                path,
                found: true,
            }))
        }
    };
    let overrides = interp.wk.globals.find_program_overrides;
    interp.wk.dict_set(overrides, name.val, prog);
    Ok(Obj::NULL)
}
