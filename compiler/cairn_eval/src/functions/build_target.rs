//! Methods of `build_tgt`.

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

use super::build_target_path;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("found", func_found, TypeTag::BOOL).pure(),
    FuncImpl::new("full_path", func_full_path, TypeTag::STRING).pure(),
    FuncImpl::new("name", func_name, TypeTag::STRING).pure(),
    FuncImpl::new("path", func_full_path, TypeTag::STRING).pure(),
];

pub(crate) fn func_found(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.make_bool(true))
}

pub(crate) fn func_full_path(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let p = build_target_path(interp.wk, rcvr);
    Ok(interp.wk.make_str(&p))
}

pub(crate) fn func_name(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.get_build_target(rcvr).name)
}
