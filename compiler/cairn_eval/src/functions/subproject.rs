//! Methods of `subproject`.

use cairn_ir::NodeId;

use crate::args::ArgSlot;
use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("found", func_found, TypeTag::BOOL).pure(),
    FuncImpl::new("get_variable", func_get_variable, TypeTag::ANY).pure(),
];

fn func_found(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let found = interp.wk.get_subproject(rcvr).found;
    Ok(interp.wk.make_bool(found))
}

/// Variable from the subproject's scope.
fn func_get_variable(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    let mut opt = [ArgSlot::new(TypeTag::ANY)];
    interp.interp_args(args_node, &mut pos, &mut opt, &mut [])?;

    let sub = *interp.wk.get_subproject(rcvr);
    let Some(idx) = sub.project.filter(|_| sub.found) else {
        return Err(interp.halt(args_node, "subproject was not found"));
    };

    let name = interp.wk.str(pos[0].val);
    match interp.wk.projects[idx as usize].scope.get(name).copied() {
        Some(v) => Ok(v),
        None if opt[0].set => Ok(opt[0].val),
        None => {
            let msg = format!("subproject does not define '{name}'");
            Err(interp.halt(pos[0].node, msg))
        }
    }
}
