//! Methods of the disabler. Any other method called on it yields the
//! disabler again.

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[FuncImpl::new("found", func_found, TypeTag::BOOL).pure()];

fn func_found(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    Ok(interp.wk.make_bool(false))
}
