//! Arithmetic and comparison operators.

use cairn_diagnostic::ErrorGuaranteed;
use cairn_ir::{ArithOp, CompareOp, NodeId};

use super::Interp;
use crate::errors;
use crate::object::{Obj, ObjType};
use crate::path;
use crate::types::TypeTag;

/// Operand types arithmetic is defined for.
const ARITH_TYPES: TypeTag = TypeTag::STRING
    .union(TypeTag::NUMBER)
    .union(TypeTag::ARRAY)
    .union(TypeTag::DICT);

impl Interp<'_> {
    pub(super) fn interp_arithmetic(
        &mut self,
        id: NodeId,
        op: ArithOp,
        nl: NodeId,
        nr: NodeId,
    ) -> Result<Obj, ErrorGuaranteed> {
        let l = self.interp_node(nl)?;
        let r = self.interp_node(nr)?;
        self.arith(id, op, false, (l, nl), (r, nr))
    }

    /// Apply `op`. With `plus_assign`, arrays and dicts on the left are
    /// extended in place instead of copied, and strings are appended to a
    /// fresh copy of the left side.
    pub(crate) fn arith(
        &mut self,
        id: NodeId,
        op: ArithOp,
        plus_assign: bool,
        (l, nl): (Obj, NodeId),
        (r, nr): (Obj, NodeId),
    ) -> Result<Obj, ErrorGuaranteed> {
        if l == Obj::DISABLER || r == Obj::DISABLER {
            return Ok(Obj::DISABLER);
        }

        let lt = self.wk.obj_type(l);
        let rt = self.wk.obj_type(r);
        if lt == ObjType::TypeInfo || rt == ObjType::TypeInfo {
            return self.arith_typeinfo(op, (l, nl), (r, nr));
        }

        match lt {
            ObjType::String => {
                self.typecheck(nr, r, TypeTag::STRING)?;
                match op {
                    ArithOp::Add if plus_assign => {
                        let (head, tail) = (self.wk.str(l).to_owned(), self.wk.str(r).to_owned());
                        let res = self.wk.make_str(&head);
                        self.wk.str_app(res, &tail);
                        Ok(res)
                    }
                    ArithOp::Add => {
                        let joined = [self.wk.str(l), self.wk.str(r)].concat();
                        Ok(self.wk.make_str(&joined))
                    }
                    ArithOp::Div => {
                        let joined = path::join(self.wk.str(l), self.wk.str(r));
                        if joined.contains('\0') {
                            return Err(self.error(id, errors::invalid_path(&format!("{joined:?}"))));
                        }
                        Ok(self.wk.make_str(&joined))
                    }
                    _ => Err(self.error(id, errors::does_not_support(lt, op.symbol()))),
                }
            }
            ObjType::Number => {
                self.typecheck(nr, r, TypeTag::NUMBER)?;
                let (a, b) = (self.wk.number(l), self.wk.number(r));
                let res = match op {
                    ArithOp::Add => a.checked_add(b),
                    ArithOp::Sub => a.checked_sub(b),
                    ArithOp::Mul => a.checked_mul(b),
                    ArithOp::Div | ArithOp::Mod if b == 0 => {
                        return Err(self.error(nr, errors::divide_by_zero()));
                    }
                    ArithOp::Div => a.checked_div(b),
                    ArithOp::Mod => a.checked_rem(b),
                };
                match res {
                    Some(n) => Ok(self.wk.make_number(n)),
                    None => Err(self.error(id, errors::integer_overflow())),
                }
            }
            ObjType::Array => {
                if op != ArithOp::Add {
                    return Err(self.error(id, errors::does_not_support(lt, op.symbol())));
                }
                let arr = if plus_assign { l } else { self.wk.array_dup(l) };
                if rt == ObjType::Array {
                    self.wk.array_extend(arr, r);
                } else {
                    self.wk.array_push(arr, r);
                }
                Ok(arr)
            }
            ObjType::Dict => {
                if op != ArithOp::Add {
                    return Err(self.error(id, errors::does_not_support(lt, op.symbol())));
                }
                self.typecheck(nr, r, TypeTag::DICT)?;
                if plus_assign {
                    self.wk.dict_merge_nodup(l, r);
                    Ok(l)
                } else {
                    Ok(self.wk.dict_merge(l, r))
                }
            }
            _ => Err(self.error(id, errors::unsupported_operands(lt, rt))),
        }
    }

    /// Arithmetic where at least one side is only known by type.
    fn arith_typeinfo(
        &mut self,
        op: ArithOp,
        (l, nl): (Obj, NodeId),
        (r, nr): (Obj, NodeId),
    ) -> Result<Obj, ErrorGuaranteed> {
        self.typecheck(nl, l, ARITH_TYPES)?;
        let lt = self.wk.type_tag_of(l).base() & ARITH_TYPES;

        // Only the type of the left side decides what the right may be.
        let mut allowed_rhs = TypeTag::empty();
        if lt.contains(TypeTag::STRING) {
            allowed_rhs |= TypeTag::STRING;
        }
        if lt.contains(TypeTag::NUMBER) {
            allowed_rhs |= TypeTag::NUMBER;
        }
        if lt.contains(TypeTag::ARRAY) && op == ArithOp::Add {
            allowed_rhs |= TypeTag::ANY;
        }
        if lt.contains(TypeTag::DICT) && op == ArithOp::Add {
            allowed_rhs |= TypeTag::DICT;
        }
        if !allowed_rhs.is_empty() {
            self.typecheck(nr, r, allowed_rhs)?;
        }

        let res = if lt.is_empty() { TypeTag::ANY } else { lt };
        Ok(self.wk.make_typeinfo(res))
    }

    pub(super) fn interp_comparison(
        &mut self,
        op: CompareOp,
        nl: NodeId,
        nr: NodeId,
    ) -> Result<Obj, ErrorGuaranteed> {
        let l = self.interp_node(nl)?;
        let r = self.interp_node(nr)?;

        if l == Obj::DISABLER || r == Obj::DISABLER {
            return Ok(Obj::DISABLER);
        }
        if self.wk.obj_type(l) == ObjType::TypeInfo || self.wk.obj_type(r) == ObjType::TypeInfo {
            return Ok(self.wk.make_typeinfo(TypeTag::BOOL));
        }

        let res = match op {
            CompareOp::Eq => self.wk.obj_equal(l, r),
            CompareOp::Ne => !self.wk.obj_equal(l, r),
            CompareOp::In | CompareOp::NotIn => {
                let found = match self.wk.obj_type(r) {
                    ObjType::Array => self.wk.array_in(r, l),
                    ObjType::Dict => {
                        self.typecheck(nl, l, TypeTag::STRING)?;
                        self.wk.dict_contains(r, self.wk.str(l))
                    }
                    ObjType::String => {
                        self.typecheck(nl, l, TypeTag::STRING)?;
                        self.wk.str(r).contains(self.wk.str(l))
                    }
                    t => return Err(self.error(nr, errors::in_not_supported(t))),
                };
                found == (op == CompareOp::In)
            }
            CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge => {
                self.typecheck(nl, l, TypeTag::NUMBER)?;
                self.typecheck(nr, r, TypeTag::NUMBER)?;
                let (a, b) = (self.wk.number(l), self.wk.number(r));
                match op {
                    CompareOp::Lt => a < b,
                    CompareOp::Le => a <= b,
                    CompareOp::Gt => a > b,
                    _ => a >= b,
                }
            }
        };
        Ok(self.wk.make_bool(res))
    }
}
