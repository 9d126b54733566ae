//! Methods of `list`.

use cairn_ir::NodeId;

use crate::args::ArgSlot;
use crate::dispatch::FuncImpl;
use crate::errors::{self, CallResult};
use crate::interp::{resolve_index, Interp};
use crate::object::{Obj, ObjType};
use crate::types::TypeTag;
use crate::workspace::Workspace;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("contains", func_contains, TypeTag::BOOL).pure(),
    FuncImpl::new("get", func_get, TypeTag::ANY).pure(),
    FuncImpl::new("length", func_length, TypeTag::NUMBER).pure(),
];

pub(crate) static METHODS_INTERNAL: &[FuncImpl] = &[
    FuncImpl::new("contains", func_contains, TypeTag::BOOL).pure(),
    FuncImpl::new("delete", func_delete, TypeTag::NULL),
    FuncImpl::new("get", func_get, TypeTag::ANY).pure(),
    FuncImpl::new("length", func_length, TypeTag::NUMBER).pure(),
];

fn func_length(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let len = interp.wk.array_len(rcvr);
    Ok(interp.wk.make_number(i64::from(len)))
}

/// Element `i`, or the fallback when `i` is out of bounds.
fn func_get(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::NUMBER)];
    let mut opt = [ArgSlot::new(TypeTag::ANY)];
    interp.interp_args(args_node, &mut pos, &mut opt, &mut [])?;

    let i = interp.wk.number(pos[0].val);
    let len = interp.wk.array_len(rcvr);
    match resolve_index(i, len as usize) {
        #[expect(clippy::cast_possible_truncation, reason = "index is below the u32 array length")]
        Some(at) => Ok(interp.wk.array_index(rcvr, at as u32)),
        None if opt[0].set => Ok(opt[0].val),
        None => Err(interp.halt(pos[0].node, errors::index_out_of_bounds(i, len))),
    }
}

/// Membership, looking into nested lists.
fn contains_deep(wk: &Workspace, arr: Obj, item: Obj) -> bool {
    wk.array_to_vec(arr).into_iter().any(|v| {
        (wk.obj_type(v) == ObjType::Array && contains_deep(wk, v, item)) || wk.obj_equal(v, item)
    })
}

fn func_contains(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::ANY)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let found = contains_deep(interp.wk, rcvr, pos[0].val);
    Ok(interp.wk.make_bool(found))
}

fn func_delete(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::NUMBER)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;

    let i = interp.wk.number(pos[0].val);
    let len = interp.wk.array_len(rcvr);
    let Some(at) = resolve_index(i, len as usize) else {
        return Err(interp.halt(pos[0].node, errors::index_out_of_bounds(i, len)));
    };
    #[expect(clippy::cast_possible_truncation, reason = "index is below the u32 array length")]
    interp.wk.array_del(rcvr, at as u32);
    Ok(Obj::NULL)
}
