//! Methods of `bool`.

use cairn_ir::NodeId;

use crate::args::ArgSlot;
use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("to_int", func_to_int, TypeTag::NUMBER).pure(),
    FuncImpl::new("to_string", func_to_string, TypeTag::STRING).pure(),
];

/// `true.to_string()` is `'true'`, unless replacement strings are given.
fn func_to_string(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut opt = [ArgSlot::new(TypeTag::STRING), ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut [], &mut opt, &mut [])?;
    let [if_true, if_false] = opt;

    if if_true.set != if_false.set {
        return Err(interp.halt(args_node, "to_string() takes either zero or two arguments"));
    }
    let b = interp.wk.boolean(rcvr);
    match (b, if_true.set) {
        (true, true) => Ok(if_true.val),
        (false, true) => Ok(if_false.val),
        (true, false) => Ok(interp.wk.make_str("true")),
        (false, false) => Ok(interp.wk.make_str("false")),
    }
}

fn func_to_int(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let n = i64::from(interp.wk.boolean(rcvr));
    Ok(interp.wk.make_number(n))
}
