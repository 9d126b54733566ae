//! The `fs` module.
//!
//! Relative paths resolve against the directory of the build file being
//! evaluated. Functions touching the file system are impure.

use std::path::Path;

use cairn_ir::NodeId;

use crate::args::ArgSlot;
use crate::dispatch::FuncImpl;
use crate::errors::{CallHalt, CallResult};
use crate::functions::current_dir;
use crate::interp::Interp;
use crate::object::{Obj, ObjType};
use crate::path;
use crate::types::TypeTag;

pub(crate) static FUNCS: &[FuncImpl] = &[
    FuncImpl::new("exists", func_exists, TypeTag::BOOL),
    FuncImpl::new("is_absolute", func_is_absolute, TypeTag::BOOL).pure(),
    FuncImpl::new("is_dir", func_is_dir, TypeTag::BOOL),
    FuncImpl::new("is_file", func_is_file, TypeTag::BOOL),
    FuncImpl::new("name", func_name, TypeTag::STRING).pure(),
    FuncImpl::new("parent", func_parent, TypeTag::STRING).pure(),
    FuncImpl::new("read", func_read, TypeTag::STRING),
    FuncImpl::new("stem", func_stem, TypeTag::STRING).pure(),
];

/// Bind one path argument and return it as given.
fn path_arg(interp: &mut Interp<'_>, args_node: NodeId) -> Result<(String, NodeId), CallHalt> {
    let mut pos = [ArgSlot::new(TypeTag::STRING | TypeTag::FILE)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let p = match interp.wk.obj_type(pos[0].val) {
        ObjType::File => interp.wk.file_path(pos[0].val).to_string(),
        _ => interp.wk.str(pos[0].val).to_string(),
    };
    Ok((p, pos[0].node))
}

/// Bind one path argument, resolved against the current directory.
fn resolved_path_arg(interp: &mut Interp<'_>, args_node: NodeId) -> Result<(String, NodeId), CallHalt> {
    let (p, node) = path_arg(interp, args_node)?;
    Ok((path::join(&current_dir(interp.wk), &p), node))
}

fn func_exists(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let (p, _) = resolved_path_arg(interp, args_node)?;
    Ok(interp.wk.make_bool(Path::new(&p).exists()))
}

fn func_is_dir(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let (p, _) = resolved_path_arg(interp, args_node)?;
    Ok(interp.wk.make_bool(Path::new(&p).is_dir()))
}

fn func_is_file(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let (p, _) = resolved_path_arg(interp, args_node)?;
    Ok(interp.wk.make_bool(Path::new(&p).is_file()))
}

fn func_is_absolute(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let (p, _) = path_arg(interp, args_node)?;
    Ok(interp.wk.make_bool(path::is_absolute(&p)))
}

fn func_name(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let (p, _) = path_arg(interp, args_node)?;
    Ok(interp.wk.make_str(path::basename(&p)))
}

fn func_stem(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let (p, _) = path_arg(interp, args_node)?;
    Ok(interp.wk.make_str(path::stem(&p)))
}

fn func_parent(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let (p, _) = path_arg(interp, args_node)?;
    Ok(interp.wk.make_str(path::dirname(&p)))
}

fn func_read(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let (p, node) = resolved_path_arg(interp, args_node)?;
    match std::fs::read_to_string(&p) {
        Ok(text) => Ok(interp.wk.make_str(&text)),
        Err(e) => Err(interp.halt(node, format!("failed to read {p}: {e}"))),
    }
}
