//! Methods of `both_libs`. Build target methods apply to the shared
//! library.

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;
use crate::workspace::Workspace;

use super::build_target;

fn shared_lib(wk: &Workspace, rcvr: Obj) -> Obj {
    wk.get_both_libs(rcvr).shared_lib
}

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("found", build_target::func_found, TypeTag::BOOL).pure().rcvr_transform(shared_lib),
    FuncImpl::new("full_path", build_target::func_full_path, TypeTag::STRING).pure().rcvr_transform(shared_lib),
    FuncImpl::new("get_shared_lib", func_get_shared_lib, TypeTag::BUILD_TARGET).pure(),
    FuncImpl::new("get_static_lib", func_get_static_lib, TypeTag::BUILD_TARGET).pure(),
    FuncImpl::new("name", build_target::func_name, TypeTag::STRING).pure().rcvr_transform(shared_lib),
    FuncImpl::new("path", build_target::func_full_path, TypeTag::STRING).pure().rcvr_transform(shared_lib),
];

fn func_get_shared_lib(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.get_both_libs(rcvr).shared_lib)
}

fn func_get_static_lib(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.get_both_libs(rcvr).static_lib)
}
