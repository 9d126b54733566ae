//! Methods of `cfg_data`.

use cairn_ir::NodeId;

use crate::args::{ArgSlot, Kwarg};
use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("get", func_get, TypeTag::ANY).pure(),
    FuncImpl::new("has", func_has, TypeTag::BOOL).pure(),
    FuncImpl::new("keys", func_keys, TypeTag::ARRAY).pure(),
    FuncImpl::new("set", func_set, TypeTag::NULL).pure(),
    FuncImpl::new("set10", func_set10, TypeTag::NULL).pure(),
    FuncImpl::new("set_quoted", func_set_quoted, TypeTag::NULL).pure(),
];

const VALUE: TypeTag = TypeTag::STRING.union(TypeTag::NUMBER).union(TypeTag::BOOL);

fn func_set(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::new(VALUE)];
    let mut kw = [Kwarg::new("description", TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [key, val] = pos;

    let dict = *interp.wk.get_configuration_data(rcvr);
    interp.wk.dict_set(dict, key.val, val.val);
    Ok(Obj::NULL)
}

/// Store a bool as `1` or `0`.
fn func_set10(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::new(TypeTag::BOOL)];
    let mut kw = [Kwarg::new("description", TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [key, val] = pos;

    let n = i64::from(interp.wk.boolean(val.val));
    let n = interp.wk.make_number(n);
    let dict = *interp.wk.get_configuration_data(rcvr);
    interp.wk.dict_set(dict, key.val, n);
    Ok(Obj::NULL)
}

fn func_set_quoted(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::new(TypeTag::STRING)];
    let mut kw = [Kwarg::new("description", TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [key, val] = pos;

    let quoted = format!("\"{}\"", interp.wk.str(val.val).replace('"', "\\\""));
    let quoted = interp.wk.make_str(&quoted);
    let dict = *interp.wk.get_configuration_data(rcvr);
    interp.wk.dict_set(dict, key.val, quoted);
    Ok(Obj::NULL)
}

fn func_get(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    let mut opt = [ArgSlot::new(TypeTag::ANY)];
    interp.interp_args(args_node, &mut pos, &mut opt, &mut [])?;

    let dict = *interp.wk.get_configuration_data(rcvr);
    match interp.wk.dict_get(dict, interp.wk.str(pos[0].val)) {
        Some(v) => Ok(v),
        None if opt[0].set => Ok(opt[0].val),
        None => {
            let msg = format!("key '{}' not found", interp.wk.str(pos[0].val));
            Err(interp.halt(pos[0].node, msg))
        }
    }
}

fn func_has(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let dict = *interp.wk.get_configuration_data(rcvr);
    let has = interp.wk.dict_contains(dict, interp.wk.str(pos[0].val));
    Ok(interp.wk.make_bool(has))
}

fn func_keys(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let dict = *interp.wk.get_configuration_data(rcvr);
    let keys = interp.wk.dict_keys(dict);
    Ok(interp.wk.array_sort_strings(keys))
}
