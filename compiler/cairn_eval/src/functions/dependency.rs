//! Methods of `dep`.

use cairn_ir::NodeId;

use crate::args::{ArgSlot, Kwarg};
use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("found", func_found, TypeTag::BOOL).pure(),
    FuncImpl::new("get_variable", func_get_variable, TypeTag::STRING).pure(),
    FuncImpl::new("name", func_name, TypeTag::STRING).pure(),
    FuncImpl::new("version", func_version, TypeTag::STRING).pure(),
];

fn func_found(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let found = interp.wk.get_dependency(rcvr).found;
    Ok(interp.wk.make_bool(found))
}

fn func_name(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.get_dependency(rcvr).name)
}

fn func_version(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.get_dependency(rcvr).version)
}

/// Variable declared through `declare_dependency(variables: ...)`.
fn func_get_variable(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut opt = [ArgSlot::new(TypeTag::STRING)];
    let mut kw = [
        Kwarg::new("default_value", TypeTag::STRING),
        Kwarg::new("internal", TypeTag::STRING),
    ];
    interp.interp_args(args_node, &mut [], &mut opt, &mut kw)?;
    let [default_value, internal] = kw;

    let Some(name) = opt[0].get().or(internal.get()) else {
        return Err(interp.halt(args_node, "get_variable() requires a variable name"));
    };
    let vars = interp.wk.get_dependency(rcvr).variables;
    match interp.wk.dict_get(vars, interp.wk.str(name)) {
        Some(v) => Ok(v),
        None => match default_value.get() {
            Some(d) => Ok(d),
            None => {
                let msg = format!("dependency has no variable '{}'", interp.wk.str(name));
                Err(interp.halt(args_node, msg))
            }
        },
    }
}
