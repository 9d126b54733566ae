//! Methods of `runresult`.

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("returncode", func_returncode, TypeTag::NUMBER).pure(),
    FuncImpl::new("stderr", func_stderr, TypeTag::STRING).pure(),
    FuncImpl::new("stdout", func_stdout, TypeTag::STRING).pure(),
];

fn func_returncode(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let status = interp.wk.get_run_result(rcvr).status;
    Ok(interp.wk.make_number(status))
}

fn func_stdout(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.get_run_result(rcvr).out)
}

fn func_stderr(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.get_run_result(rcvr).err)
}
