//! Methods of `external_program`.

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("found", func_found, TypeTag::BOOL).pure(),
    FuncImpl::new("full_path", func_full_path, TypeTag::STRING).pure(),
    FuncImpl::new("path", func_full_path, TypeTag::STRING).pure(),
];

fn func_found(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let found = interp.wk.get_external_program(rcvr).found;
    Ok(interp.wk.make_bool(found))
}

fn func_full_path(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let prog = *interp.wk.get_external_program(rcvr);
    if !prog.found {
        let msg = format!("program '{}' was not found", interp.wk.str(prog.name));
        return Err(interp.halt(args_node, msg));
    }
    Ok(prog.path)
}
