//! Conditionals and loops.

use cairn_diagnostic::ErrorGuaranteed;
use cairn_ir::{IfClause, NodeId, NodeKind};

use super::Interp;
use crate::errors::{self, CallHalt};
use crate::object::{ArrayCursor, DictCursor, Obj, ObjType};
use crate::types::TypeTag;
use crate::workspace::LoopCtl;

/// Evaluation of a condition.
enum Cond {
    Known(bool),
    Unknown,
    Disabled,
}

impl<'a> Interp<'a> {
    fn eval_cond(&mut self, node: NodeId) -> Result<Cond, ErrorGuaranteed> {
        let cond = self.interp_node(node)?;
        if cond == Obj::DISABLER {
            return Ok(Cond::Disabled);
        }
        self.typecheck(node, cond, TypeTag::BOOL)?;
        if self.wk.obj_type(cond) == ObjType::TypeInfo {
            return Ok(Cond::Unknown);
        }
        Ok(Cond::Known(self.wk.boolean(cond)))
    }

    pub(super) fn interp_if(&mut self, clauses: &'a [IfClause]) -> Result<Obj, ErrorGuaranteed> {
        for clause in clauses {
            let Some(cond) = clause.cond else {
                self.interp_node(clause.body)?;
                return Ok(Obj::NULL);
            };

            match self.eval_cond(cond)? {
                Cond::Disabled => return Ok(Obj::NULL),
                Cond::Known(true) => {
                    self.interp_node(clause.body)?;
                    return Ok(Obj::NULL);
                }
                Cond::Known(false) => {}
                // Either branch may run; explore this one and keep going.
                // A break or subdir_done inside it only might happen.
                Cond::Unknown => {
                    let (loop_ctl, subdir_done) = (self.wk.loop_ctl, self.wk.subdir_done);
                    self.interp_node(clause.body)?;
                    self.wk.loop_ctl = loop_ctl;
                    self.wk.subdir_done = subdir_done;
                }
            }
        }
        Ok(Obj::NULL)
    }

    pub(super) fn interp_ternary(
        &mut self,
        cond: NodeId,
        then: NodeId,
        otherwise: NodeId,
    ) -> Result<Obj, ErrorGuaranteed> {
        match self.eval_cond(cond)? {
            Cond::Disabled => Ok(Obj::DISABLER),
            Cond::Known(true) => self.interp_node(then),
            Cond::Known(false) => self.interp_node(otherwise),
            Cond::Unknown => {
                let a = self.interp_node(then)?;
                let b = self.interp_node(otherwise)?;
                let ty = self.wk.type_tag_of(a) | self.wk.type_tag_of(b);
                Ok(self.wk.make_typeinfo(ty))
            }
        }
    }

    pub(super) fn interp_foreach(
        &mut self,
        vars: &'a [NodeId],
        iterable: NodeId,
        body: NodeId,
    ) -> Result<Obj, ErrorGuaranteed> {
        self.wk.loop_depth += 1;
        let res = self.foreach_inner(vars, iterable, body);
        self.wk.loop_depth -= 1;
        self.wk.loop_ctl = LoopCtl::Normal;
        res.map(|()| Obj::NULL)
    }

    fn foreach_inner(&mut self, vars: &'a [NodeId], iterable: NodeId, body: NodeId) -> Result<(), ErrorGuaranteed> {
        if let Some(range) = self.range_fast_path(vars, iterable)? {
            let (start, stop, step) = range;
            let mut i = start;
            while i < stop {
                let n = self.wk.make_number(i);
                self.assign_variable(vars[0], self.ident(vars[0]), n)?;
                if self.foreach_step(body)? {
                    break;
                }
                i = i.saturating_add(step);
            }
            return Ok(());
        }

        let it = self.interp_node(iterable)?;
        match self.wk.obj_type(it) {
            ObjType::Array => {
                if vars.len() != 1 {
                    return Err(self.error(vars[0], errors::array_foreach_arity()));
                }
                let mut cursor = ArrayCursor::new(self.wk, it);
                while let Some(v) = cursor.next(self.wk) {
                    let v = self.wk.obj_unalias(v);
                    self.assign_variable(vars[0], self.ident(vars[0]), v)?;
                    if self.foreach_step(body)? {
                        break;
                    }
                }
                Ok(())
            }
            ObjType::Dict => {
                if vars.len() != 2 {
                    return Err(self.error(vars[0], errors::dict_foreach_arity()));
                }
                let mut cursor = DictCursor::new(self.wk, it);
                while let Some((k, v)) = cursor.next(self.wk) {
                    self.assign_variable(vars[0], self.ident(vars[0]), k)?;
                    let v = self.wk.obj_unalias(v);
                    self.assign_variable(vars[1], self.ident(vars[1]), v)?;
                    if self.foreach_step(body)? {
                        break;
                    }
                }
                Ok(())
            }
            ObjType::TypeInfo => {
                self.typecheck(iterable, it, TypeTag::ARRAY | TypeTag::DICT)?;
                for &var in vars {
                    let unknown = self.wk.make_typeinfo(TypeTag::ANY);
                    self.assign_variable(var, self.ident(var), unknown)?;
                }
                self.foreach_step(body)?;
                Ok(())
            }
            t => Err(self.error(iterable, errors::not_iterable(t))),
        }
    }

    /// Run one iteration of the body. Returns whether the loop should stop.
    fn foreach_step(&mut self, body: NodeId) -> Result<bool, ErrorGuaranteed> {
        self.interp_node(body)?;
        match std::mem::take(&mut self.wk.loop_ctl) {
            LoopCtl::Breaking => Ok(true),
            LoopCtl::Continuing | LoopCtl::Normal => Ok(false),
        }
    }

    /// `foreach i : range(...)` iterates without building an array. Not
    /// taken during analysis, where the arguments may be unknown.
    fn range_fast_path(
        &mut self,
        vars: &'a [NodeId],
        iterable: NodeId,
    ) -> Result<Option<(i64, i64, i64)>, ErrorGuaranteed> {
        if vars.len() != 1 || self.wk.mode.is_analyze() {
            return Ok(None);
        }
        let node = self.node(iterable);
        let NodeKind::Function {
            name,
            args,
            chain: None,
        } = &node.kind
        else {
            return Ok(None);
        };
        if self.ident(*name) != "range" {
            return Ok(None);
        }
        node.mark_visited();

        match crate::functions::kernel::range_params(self, *args) {
            Ok(range) => Ok(Some(range)),
            Err(CallHalt::Error(e)) => Err(e),
            Err(CallHalt::Disabler) => Err(self.error(iterable, errors::not_iterable(ObjType::Disabler))),
            Err(CallHalt::AnalysisStop | CallHalt::SignatureDumped) => Ok(None),
        }
    }
}
