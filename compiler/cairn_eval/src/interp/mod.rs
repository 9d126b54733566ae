//! Tree-walking evaluator.
//!
//! An [`Interp`] evaluates one syntax tree against a workspace. Loading
//! another file (`subdir`, `subproject`) creates a nested `Interp` over the
//! same workspace. Every node evaluation yields an object handle or an
//! [`ErrorGuaranteed`] proving a diagnostic was emitted.

mod access;
mod control;
mod eval;
mod ops;

pub use eval::{FileKind, BUILD_FILE, OPTIONS_FILE};
pub(crate) use access::resolve_index;

use cairn_diagnostic::{ErrorGuaranteed, Severity};
use cairn_ir::{Arg, Ast, Node, NodeId, NodeKind, Source};

use crate::debug::BreakReason;
use crate::errors::{self, CallHalt};
use crate::object::{Obj, ObjType};
use crate::stack::ensure_sufficient_stack;
use crate::types::TypeTag;
use crate::workspace::{LoopCtl, Workspace};

pub struct Interp<'a> {
    pub(crate) wk: &'a mut Workspace,
    pub(crate) src: &'a Source,
    pub(crate) ast: &'a Ast,
}

impl<'a> Interp<'a> {
    pub fn new(wk: &'a mut Workspace, src: &'a Source, ast: &'a Ast) -> Self {
        Interp { wk, src, ast }
    }

    pub fn workspace(&mut self) -> &mut Workspace {
        self.wk
    }

    pub fn source(&self) -> &'a Source {
        self.src
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &'a Node {
        self.ast.node(id)
    }

    /// Name held by identifier node `id`.
    pub(crate) fn ident(&self, id: NodeId) -> &'a str {
        self.ast.ident(id).unwrap_or("")
    }

    /// Diagnostic position of `node` in the file being evaluated.
    fn position(&self, node: NodeId) -> (Option<&'a Source>, u32, u32) {
        match self.ast.get(node) {
            Some(n) if !node.is_dummy() => (Some(self.src), n.line, n.col),
            _ => (None, 0, 0),
        }
    }

    fn emit(&mut self, node: NodeId, severity: Severity, msg: &str) {
        let (src, line, col) = self.position(node);
        self.wk.diagnostics.emit(src, line, col, severity, msg);
    }

    /// Emit an error positioned at `node`.
    pub fn error(&mut self, node: NodeId, msg: impl AsRef<str>) -> ErrorGuaranteed {
        let (src, line, col) = self.position(node);
        self.wk.diagnostics.error(src, line, col, msg.as_ref())
    }

    pub fn warning(&mut self, node: NodeId, msg: impl AsRef<str>) {
        self.emit(node, Severity::Warning, msg.as_ref());
    }

    pub fn info(&mut self, node: NodeId, msg: impl AsRef<str>) {
        self.emit(node, Severity::Info, msg.as_ref());
    }

    /// Emit an error and wrap it as a call halt.
    pub(crate) fn halt(&mut self, node: NodeId, msg: impl AsRef<str>) -> CallHalt {
        CallHalt::Error(self.error(node, msg))
    }

    /// Fail unless `o` satisfies `ty`.
    pub(crate) fn typecheck(&mut self, node: NodeId, o: Obj, ty: TypeTag) -> Result<(), ErrorGuaranteed> {
        if self.wk.type_matches(o, ty) {
            return Ok(());
        }
        let got = self.wk.type_tag_of(o).render();
        Err(self.error(node, errors::expected_type(ty, &got)))
    }

    /// Arguments of an [`NodeKind::Args`] node.
    pub(crate) fn args_of(&self, id: NodeId) -> &'a [Arg] {
        match self.ast.get(id).map(|n| &n.kind) {
            Some(NodeKind::Args(args)) => args,
            _ => &[],
        }
    }

    /// Evaluate `id`, growing the native stack when needed.
    pub fn interp_node(&mut self, id: NodeId) -> Result<Obj, ErrorGuaranteed> {
        ensure_sufficient_stack(|| self.interp_node_inner(id))
    }

    fn interp_node_inner(&mut self, id: NodeId) -> Result<Obj, ErrorGuaranteed> {
        let node = self.node(id);
        if self.wk.subdir_done || self.wk.loop_ctl != LoopCtl::Normal {
            return Ok(Obj::NULL);
        }
        node.mark_visited();

        match &node.kind {
            NodeKind::Empty => Ok(Obj::NULL),
            NodeKind::Bool(b) => Ok(self.wk.make_bool(*b)),
            NodeKind::Number(n) => Ok(self.wk.make_number(*n)),
            NodeKind::String(s) => Ok(self.wk.make_str(s)),
            NodeKind::Id(name) => self.interp_id(id, name),
            NodeKind::Array(args) => self.interp_array(*args),
            NodeKind::Dict(args) => self.interp_dict(*args),
            NodeKind::Args(_) => Err(self.error(id, "unexpected argument list")),
            NodeKind::Block(stmts) => self.interp_block(stmts),
            NodeKind::If(clauses) => self.interp_if(clauses),
            NodeKind::Foreach {
                vars,
                iterable,
                body,
            } => self.interp_foreach(vars, *iterable, *body),
            NodeKind::Continue => self.interp_loop_ctl(id, LoopCtl::Continuing, "continue"),
            NodeKind::Break => self.interp_loop_ctl(id, LoopCtl::Breaking, "break"),
            NodeKind::Function { chain, .. } => {
                let res = self.builtin_run(None, id)?;
                self.interp_chain(*chain, res)
            }
            NodeKind::Method {
                recv: Some(recv), ..
            }
            | NodeKind::Index {
                recv: Some(recv), ..
            } => {
                let l = self.interp_node(*recv)?;
                self.interp_chained(id, l)
            }
            NodeKind::Method { recv: None, .. } | NodeKind::Index { recv: None, .. } => {
                Err(self.error(id, "chained expression without a receiver"))
            }
            NodeKind::Assign { target, value } => self.interp_assign(*target, *value),
            NodeKind::PlusAssign { target, value } => self.interp_plus_assign(id, *target, *value),
            NodeKind::Not(v) => self.interp_not(*v),
            NodeKind::And(l, r) => self.interp_andor(*l, *r, true),
            NodeKind::Or(l, r) => self.interp_andor(*l, *r, false),
            NodeKind::Comparison { op, lhs, rhs } => self.interp_comparison(*op, *lhs, *rhs),
            NodeKind::Ternary {
                cond,
                then,
                otherwise,
            } => self.interp_ternary(*cond, *then, *otherwise),
            NodeKind::UMinus(v) => self.interp_u_minus(id, *v),
            NodeKind::Arithmetic { op, lhs, rhs } => self.interp_arithmetic(id, *op, *lhs, *rhs),
            NodeKind::Stringify(v) => self.interp_stringify(*v),
        }
    }

    fn interp_id(&mut self, id: NodeId, name: &str) -> Result<Obj, ErrorGuaranteed> {
        match self.wk.get_variable(name) {
            Some(o) => Ok(o),
            None => Err(self.error(id, errors::undefined_object())),
        }
    }

    fn interp_block(&mut self, stmts: &'a [NodeId]) -> Result<Obj, ErrorGuaranteed> {
        let mut res = Obj::NULL;
        for &stmt in stmts {
            let line = self.node(stmt).line;
            self.wk.dbg.node = Some(stmt);

            if self.wk.dbg.stepping && line != self.wk.dbg.last_line && !self.src.is_internal() {
                self.wk.dbg.last_line = line;
                self.break_into(stmt, BreakReason::Step)?;
            }

            match self.interp_node(stmt) {
                Ok(v) => res = v,
                Err(e) => {
                    if self.wk.dbg.break_on_err && self.wk.debugger.is_some() {
                        self.break_into(stmt, BreakReason::Error)?;
                    } else {
                        return Err(e);
                    }
                }
            }
        }
        Ok(res)
    }

    fn interp_array(&mut self, args: NodeId) -> Result<Obj, ErrorGuaranteed> {
        let arr = self.wk.make_array();
        for arg in self.args_of(args) {
            match *arg {
                Arg::Keyword { key, .. } => return Err(self.error(key, errors::kwarg_in_array())),
                Arg::Positional(n) => {
                    let v = self.interp_node(n)?;
                    self.wk.array_push(arr, v);
                }
            }
        }
        Ok(arr)
    }

    fn interp_dict(&mut self, args: NodeId) -> Result<Obj, ErrorGuaranteed> {
        let dict = self.wk.make_dict();
        let mut unknown_keys = false;

        for arg in self.args_of(args) {
            let (key, value) = match *arg {
                Arg::Positional(n) => return Err(self.error(n, errors::positional_in_dict())),
                Arg::Keyword { key, value } => (key, value),
            };

            let k = self.interp_node(key)?;
            self.typecheck(key, k, TypeTag::STRING)?;
            let v = self.interp_node(value)?;

            if self.wk.obj_type(k) == ObjType::TypeInfo {
                unknown_keys = true;
                continue;
            }
            if self.wk.dict_contains(dict, self.wk.str(k)) {
                let rendered = self.wk.obj_to_s(k);
                return Err(self.error(key, errors::duplicate_key(&rendered)));
            }
            self.wk.dict_set(dict, k, v);
        }

        if unknown_keys {
            return Ok(self.wk.make_typeinfo(TypeTag::DICT));
        }
        Ok(dict)
    }

    fn interp_assign(&mut self, target: NodeId, value: NodeId) -> Result<Obj, ErrorGuaranteed> {
        let rhs = self.interp_node(value)?;
        if rhs == Obj::NULL {
            return Err(self.error(value, errors::assign_null()));
        }
        let rhs = self.wk.obj_unalias(rhs);
        self.assign_variable(target, self.ident(target), rhs)?;
        Ok(Obj::NULL)
    }

    fn interp_plus_assign(
        &mut self,
        id: NodeId,
        target: NodeId,
        value: NodeId,
    ) -> Result<Obj, ErrorGuaranteed> {
        let name = self.ident(target);
        let Some(lhs) = self.wk.get_variable(name) else {
            return Err(self.error(target, errors::undefined_object()));
        };
        let rhs = self.interp_node(value)?;
        let res = self.arith(id, cairn_ir::ArithOp::Add, true, (lhs, target), (rhs, value))?;
        self.assign_variable(target, name, res)?;
        Ok(Obj::NULL)
    }

    /// Bind `name`, breaking into the debugger if it is watched.
    pub(crate) fn assign_variable(&mut self, node: NodeId, name: &str, val: Obj) -> Result<(), ErrorGuaranteed> {
        self.wk.set_variable(name, val);
        if self.wk.dbg.watched.contains_key(name) {
            self.break_into(node, BreakReason::Watch(name.to_string()))?;
        }
        Ok(())
    }

    fn interp_not(&mut self, v: NodeId) -> Result<Obj, ErrorGuaranteed> {
        let o = self.interp_node(v)?;
        if o == Obj::DISABLER {
            return Ok(Obj::DISABLER);
        }
        self.typecheck(v, o, TypeTag::BOOL)?;
        if self.wk.obj_type(o) == ObjType::TypeInfo {
            return Ok(self.wk.make_typeinfo(TypeTag::BOOL));
        }
        let b = self.wk.boolean(o);
        Ok(self.wk.make_bool(!b))
    }

    fn interp_andor(&mut self, l: NodeId, r: NodeId, is_and: bool) -> Result<Obj, ErrorGuaranteed> {
        let lhs = self.interp_node(l)?;
        if lhs == Obj::DISABLER {
            return Ok(Obj::DISABLER);
        }
        self.typecheck(l, lhs, TypeTag::BOOL)?;

        let unknown = self.wk.obj_type(lhs) == ObjType::TypeInfo;
        if !unknown {
            let b = self.wk.boolean(lhs);
            if is_and != b {
                return Ok(self.wk.make_bool(b));
            }
        }

        let rhs = self.interp_node(r)?;
        if rhs == Obj::DISABLER {
            return Ok(Obj::DISABLER);
        }
        self.typecheck(r, rhs, TypeTag::BOOL)?;
        if unknown || self.wk.obj_type(rhs) == ObjType::TypeInfo {
            return Ok(self.wk.make_typeinfo(TypeTag::BOOL));
        }
        let b = self.wk.boolean(rhs);
        Ok(self.wk.make_bool(b))
    }

    fn interp_u_minus(&mut self, id: NodeId, v: NodeId) -> Result<Obj, ErrorGuaranteed> {
        let o = self.interp_node(v)?;
        if o == Obj::DISABLER {
            return Ok(Obj::DISABLER);
        }
        self.typecheck(v, o, TypeTag::NUMBER)?;
        if self.wk.obj_type(o) == ObjType::TypeInfo {
            return Ok(self.wk.make_typeinfo(TypeTag::NUMBER));
        }
        match self.wk.number(o).checked_neg() {
            Some(n) => Ok(self.wk.make_number(n)),
            None => Err(self.error(id, errors::integer_overflow())),
        }
    }

    fn interp_stringify(&mut self, v: NodeId) -> Result<Obj, ErrorGuaranteed> {
        let o = self.interp_node(v)?;
        if o == Obj::DISABLER {
            return Ok(Obj::DISABLER);
        }
        if self.wk.obj_type(o) == ObjType::TypeInfo {
            return Ok(self.wk.make_typeinfo(TypeTag::STRING));
        }
        match self.wk.coerce_string(o) {
            Some(s) => Ok(self.wk.make_str(&s)),
            None => {
                let ty = self.wk.obj_type(o).name();
                Err(self.error(v, format!("unable to coerce {ty} to str")))
            }
        }
    }

    fn interp_loop_ctl(&mut self, id: NodeId, ctl: LoopCtl, stmt: &str) -> Result<Obj, ErrorGuaranteed> {
        if self.wk.loop_depth == 0 {
            return Err(self.error(id, errors::loop_ctl_outside_loop(stmt)));
        }
        self.wk.loop_ctl = ctl;
        Ok(Obj::NULL)
    }
}
