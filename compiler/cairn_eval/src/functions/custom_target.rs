//! Methods of `custom_tgt`.

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("full_path", func_full_path, TypeTag::STRING).pure(),
    FuncImpl::new("to_list", func_to_list, TypeTag::ARRAY).pure(),
];

/// Path of the only output.
fn func_full_path(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let outputs = interp.wk.get_custom_target(rcvr).outputs;
    if interp.wk.array_len(outputs) != 1 {
        return Err(interp.halt(args_node, "full_path() requires a custom target with exactly one output"));
    }
    let out = interp.wk.array_index(outputs, 0);
    let p = interp.wk.file_path(out).to_string();
    Ok(interp.wk.make_str(&p))
}

fn func_to_list(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let outputs = interp.wk.get_custom_target(rcvr).outputs;
    Ok(interp.wk.array_dup(outputs))
}
