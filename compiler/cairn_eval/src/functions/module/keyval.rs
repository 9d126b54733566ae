//! The `keyval` module: `KEY=value` files as dicts.

use cairn_ir::NodeId;

use crate::args::ArgSlot;
use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::functions::current_dir;
use crate::interp::Interp;
use crate::object::{Obj, ObjType};
use crate::path;
use crate::types::TypeTag;
use crate::workspace::Workspace;

pub(crate) static FUNCS: &[FuncImpl] = &[FuncImpl::new("load", func_load, TypeTag::DICT)];

/// Parse `KEY=value` lines. Blank lines and `#` comments are skipped, as
/// are lines without `=`.
pub(crate) fn parse_keyval(wk: &mut Workspace, text: &str) -> Obj {
    let dict = wk.make_dict();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, val)) = line.split_once('=') else {
            continue;
        };
        let val = wk.make_str(val.trim());
        wk.dict_set_str(dict, key.trim(), val);
    }
    dict
}

fn func_load(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING | TypeTag::FILE)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;

    let p = match interp.wk.obj_type(pos[0].val) {
        ObjType::File => interp.wk.file_path(pos[0].val).to_string(),
        _ => path::join(&current_dir(interp.wk), interp.wk.str(pos[0].val)),
    };
    match std::fs::read_to_string(&p) {
        Ok(text) => Ok(parse_keyval(interp.wk, &text)),
        Err(e) => Err(interp.halt(pos[0].node, format!("failed to read {p}: {e}"))),
    }
}
