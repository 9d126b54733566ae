//! Methods of `generator`.

use cairn_ir::NodeId;

use crate::args::{ArgSlot, Kwarg};
use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::{GeneratedList, Obj, Object};
use crate::types::TypeTag;

use super::coerce_files;

pub(crate) static METHODS: &[FuncImpl] = &[FuncImpl::new("process", func_process, TypeTag::GENERATED_LIST).pure()];

fn func_process(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::COERCIBLE_FILES)];
    let mut kw = [Kwarg::new("extra_args", TypeTag::STRING | TypeTag::ARRAY_OF)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;

    let input = coerce_files(interp, pos[0].node, pos[0].val)?;
    Ok(interp.wk.make_obj(Object::GeneratedList(GeneratedList { generator: rcvr, input })))
}
