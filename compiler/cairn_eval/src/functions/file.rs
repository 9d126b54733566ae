//! Methods of `file`.

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[FuncImpl::new("full_path", func_full_path, TypeTag::STRING).pure()];

fn func_full_path(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let p = interp.wk.file_path(rcvr).to_string();
    Ok(interp.wk.make_str(&p))
}
