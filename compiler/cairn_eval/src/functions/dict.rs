//! Methods of `dict`.

use cairn_ir::NodeId;

use crate::args::ArgSlot;
use crate::dispatch::FuncImpl;
use crate::errors::{self, CallResult};
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("get", func_get, TypeTag::ANY).pure(),
    FuncImpl::new("has_key", func_has_key, TypeTag::BOOL).pure(),
    FuncImpl::new("keys", func_keys, TypeTag::ARRAY).pure(),
];

/// Keys in sorted order.
fn func_keys(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let keys = interp.wk.dict_keys(rcvr);
    Ok(interp.wk.array_sort_strings(keys))
}

fn func_has_key(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let has = interp.wk.dict_contains(rcvr, interp.wk.str(pos[0].val));
    Ok(interp.wk.make_bool(has))
}

fn func_get(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    let mut opt = [ArgSlot::new(TypeTag::ANY)];
    interp.interp_args(args_node, &mut pos, &mut opt, &mut [])?;

    match interp.wk.dict_get(rcvr, interp.wk.str(pos[0].val)) {
        Some(v) => Ok(v),
        None if opt[0].set => Ok(opt[0].val),
        None => {
            let rendered = interp.wk.obj_to_s(pos[0].val);
            Err(interp.halt(pos[0].node, errors::key_not_in_dict(&rendered)))
        }
    }
}
