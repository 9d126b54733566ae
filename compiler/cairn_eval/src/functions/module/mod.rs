//! Module objects returned by `import()`.
//!
//! Methods shared by every module live here; each implemented module owns a
//! table of its own functions, consulted first.

pub(crate) mod fs;
pub(crate) mod keyval;

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[FuncImpl::new("found", func_found, TypeTag::BOOL).pure()];

fn func_found(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let found = interp.wk.get_module(rcvr).found;
    Ok(interp.wk.make_bool(found))
}
