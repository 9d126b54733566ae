//! Methods of `int`.

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("is_even", func_is_even, TypeTag::BOOL).pure(),
    FuncImpl::new("is_odd", func_is_odd, TypeTag::BOOL).pure(),
    FuncImpl::new("to_string", func_to_string, TypeTag::STRING).pure(),
];

fn func_to_string(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let n = interp.wk.number(rcvr);
    Ok(interp.wk.make_strf(format_args!("{n}")))
}

fn func_is_even(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let even = interp.wk.number(rcvr) % 2 == 0;
    Ok(interp.wk.make_bool(even))
}

fn func_is_odd(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let odd = interp.wk.number(rcvr) % 2 != 0;
    Ok(interp.wk.make_bool(odd))
}
