//! Methods of `env`.

use cairn_ir::NodeId;

use crate::args::{ArgSlot, Kwarg};
use crate::dispatch::FuncImpl;
use crate::errors::{CallHalt, CallResult};
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("append", func_append, TypeTag::NULL).pure(),
    FuncImpl::new("prepend", func_prepend, TypeTag::NULL).pure(),
    FuncImpl::new("set", func_set, TypeTag::NULL).pure(),
];

#[derive(Copy, Clone, PartialEq, Eq)]
enum Edit {
    Set,
    Append,
    Prepend,
}

fn modify(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId, edit: Edit) -> Result<(), CallHalt> {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::glob(TypeTag::STRING)];
    let mut kw = [Kwarg::new("separator", TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [key, values] = pos;

    let sep = kw[0].get().map_or_else(|| ":".to_string(), |s| interp.wk.str(s).to_string());
    let Some(joined) = interp.wk.array_join(values.val, &sep) else {
        return Err(interp.halt(values.node, "environment values must be strings"));
    };

    let dict = *interp.wk.get_environment(rcvr);
    let key_str = interp.wk.str(key.val).to_string();
    let val = match (edit, interp.wk.dict_get(dict, &key_str)) {
        (Edit::Append, Some(prev)) => {
            let s = format!("{}{sep}{}", interp.wk.str(prev), interp.wk.str(joined));
            interp.wk.make_str(&s)
        }
        (Edit::Prepend, Some(prev)) => {
            let s = format!("{}{sep}{}", interp.wk.str(joined), interp.wk.str(prev));
            interp.wk.make_str(&s)
        }
        _ => joined,
    };
    interp.wk.dict_set(dict, key.val, val);
    Ok(())
}

fn func_set(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    modify(interp, rcvr, args_node, Edit::Set)?;
    Ok(Obj::NULL)
}

fn func_append(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    modify(interp, rcvr, args_node, Edit::Append)?;
    Ok(Obj::NULL)
}

fn func_prepend(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    modify(interp, rcvr, args_node, Edit::Prepend)?;
    Ok(Obj::NULL)
}
