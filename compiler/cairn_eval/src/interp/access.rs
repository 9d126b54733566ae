//! Indexing and chained method/index access.

use cairn_diagnostic::ErrorGuaranteed;
use cairn_ir::{NodeId, NodeKind};

use super::Interp;
use crate::errors;
use crate::object::{Obj, ObjType};
use crate::types::TypeTag;

impl Interp<'_> {
    /// Continue a chain, if there is one, with `l` as receiver.
    pub(super) fn interp_chain(&mut self, chain: Option<NodeId>, l: Obj) -> Result<Obj, ErrorGuaranteed> {
        match chain {
            Some(next) => self.interp_chained(next, l),
            None => Ok(l),
        }
    }

    /// Apply method or index node `id` to an already evaluated receiver.
    pub(super) fn interp_chained(&mut self, id: NodeId, l: Obj) -> Result<Obj, ErrorGuaranteed> {
        let node = self.node(id);
        node.mark_visited();
        match &node.kind {
            NodeKind::Method { chain, .. } => {
                let res = self.builtin_run(Some(l), id)?;
                self.interp_chain(*chain, res)
            }
            NodeKind::Index { index, chain, .. } => {
                let res = self.interp_index(id, l, *index)?;
                self.interp_chain(*chain, res)
            }
            _ => Err(self.error(id, "expected a method call or index")),
        }
    }

    fn interp_index(&mut self, id: NodeId, l: Obj, index: NodeId) -> Result<Obj, ErrorGuaranteed> {
        let r = self.interp_node(index)?;
        if l == Obj::DISABLER || r == Obj::DISABLER {
            return Ok(Obj::DISABLER);
        }

        match self.wk.obj_type(l) {
            ObjType::TypeInfo => {
                self.typecheck(id, l, TypeTag::ARRAY | TypeTag::DICT | TypeTag::STRING | TypeTag::CUSTOM_TARGET)?;
                self.typecheck(index, r, TypeTag::NUMBER | TypeTag::STRING)?;
                Ok(self.wk.make_typeinfo(TypeTag::ANY))
            }
            ObjType::Array => self.index_array(index, l, r),
            ObjType::CustomTarget => {
                let outputs = self.wk.get_custom_target(l).outputs;
                self.index_array(index, outputs, r)
            }
            ObjType::Dict => {
                self.typecheck(index, r, TypeTag::STRING)?;
                if self.wk.obj_type(r) == ObjType::TypeInfo {
                    return Ok(self.wk.make_typeinfo(TypeTag::ANY));
                }
                match self.wk.dict_get(l, self.wk.str(r)) {
                    Some(v) => Ok(v),
                    None => {
                        let key = self.wk.obj_to_s(r);
                        Err(self.error(index, errors::key_not_in_dict(&key)))
                    }
                }
            }
            ObjType::String => {
                self.typecheck(index, r, TypeTag::NUMBER)?;
                if self.wk.obj_type(r) == ObjType::TypeInfo {
                    return Ok(self.wk.make_typeinfo(TypeTag::STRING));
                }
                let chars: Vec<char> = self.wk.str(l).chars().collect();
                let i = self.wk.number(r);
                let Some(at) = resolve_index(i, chars.len()) else {
                    return Err(self.error(index, errors::index_out_of_bounds(i, saturating_len(chars.len()))));
                };
                let ch = chars[at].to_string();
                Ok(self.wk.make_str(&ch))
            }
            t => Err(self.error(id, errors::index_unsupported(t))),
        }
    }

    #[expect(clippy::cast_possible_truncation, reason = "index is below the u32 array length")]
    fn index_array(&mut self, index: NodeId, arr: Obj, r: Obj) -> Result<Obj, ErrorGuaranteed> {
        self.typecheck(index, r, TypeTag::NUMBER)?;
        if self.wk.obj_type(r) == ObjType::TypeInfo {
            return Ok(self.wk.make_typeinfo(TypeTag::ANY));
        }
        let len = self.wk.array_len(arr);
        let i = self.wk.number(r);
        match resolve_index(i, len as usize) {
            Some(at) => Ok(self.wk.array_index(arr, at as u32)),
            None => Err(self.error(index, errors::index_out_of_bounds(i, len))),
        }
    }
}

/// Position addressed by `i` in a sequence of `len`, counting from the end
/// when negative.
pub(crate) fn resolve_index(i: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let at = if i < 0 { i.checked_add(len)? } else { i };
    if (0..len).contains(&at) {
        usize::try_from(at).ok()
    } else {
        None
    }
}

fn saturating_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
