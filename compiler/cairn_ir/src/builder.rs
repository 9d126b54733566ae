//! Programmatic construction of [`Ast`]s.
//!
//! Every node takes the builder's current position; [`AstBuilder::line`]
//! moves it. Chains are attached after the fact with
//! [`AstBuilder::chain`], mirroring how a parser folds `a.b().c[0]`.

use smallvec::SmallVec;

use crate::ast::{Arg, ArithOp, Ast, CompareOp, IfClause, Node, NodeId, NodeKind};

pub struct AstBuilder {
    nodes: Vec<Node>,
    line: u32,
    col: u32,
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AstBuilder {
    pub fn new() -> Self {
        AstBuilder {
            nodes: Vec::new(),
            line: 1,
            col: 1,
        }
    }

    /// Position subsequent nodes at `line`, column 1.
    pub fn line(&mut self, line: u32) -> &mut Self {
        self.line = line;
        self.col = 1;
        self
    }

    /// Position subsequent nodes at `line:col`.
    pub fn at(&mut self, line: u32, col: u32) -> &mut Self {
        self.line = line;
        self.col = col;
        self
    }

    pub fn push(&mut self, kind: NodeKind) -> NodeId {
        let idx = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1);
        self.nodes.push(Node::new(kind, self.line, self.col));
        NodeId::new(idx)
    }

    pub fn empty(&mut self) -> NodeId {
        self.push(NodeKind::Empty)
    }

    pub fn bool_lit(&mut self, v: bool) -> NodeId {
        self.push(NodeKind::Bool(v))
    }

    pub fn number(&mut self, v: i64) -> NodeId {
        self.push(NodeKind::Number(v))
    }

    pub fn string(&mut self, v: &str) -> NodeId {
        self.push(NodeKind::String(v.into()))
    }

    pub fn id(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::Id(name.into()))
    }

    /// Keyword argument `name: value`.
    pub fn kw(&mut self, name: &str, value: NodeId) -> Arg {
        let key = self.id(name);
        Arg::Keyword { key, value }
    }

    pub fn args(&mut self, args: Vec<Arg>) -> NodeId {
        self.push(NodeKind::Args(args))
    }

    /// Array literal of positional elements.
    pub fn array(&mut self, elems: &[NodeId]) -> NodeId {
        let args = elems.iter().map(|&e| Arg::Positional(e)).collect();
        self.array_args(args)
    }

    /// Array literal from raw arguments, keyword arguments included.
    pub fn array_args(&mut self, args: Vec<Arg>) -> NodeId {
        let args = self.args(args);
        self.push(NodeKind::Array(args))
    }

    /// Dict literal from `(key, value)` expression pairs.
    pub fn dict(&mut self, entries: &[(NodeId, NodeId)]) -> NodeId {
        let args = entries
            .iter()
            .map(|&(key, value)| Arg::Keyword { key, value })
            .collect();
        self.dict_args(args)
    }

    pub fn dict_args(&mut self, args: Vec<Arg>) -> NodeId {
        let args = self.args(args);
        self.push(NodeKind::Dict(args))
    }

    pub fn block(&mut self, stmts: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::Block(stmts))
    }

    /// `if` chain from `(condition, body)` pairs; a `None` condition is the
    /// `else` branch.
    pub fn if_chain(&mut self, clauses: &[(Option<NodeId>, NodeId)]) -> NodeId {
        let clauses = clauses
            .iter()
            .map(|&(cond, body)| IfClause { cond, body })
            .collect();
        self.push(NodeKind::If(clauses))
    }

    pub fn foreach(&mut self, vars: &[&str], iterable: NodeId, body: NodeId) -> NodeId {
        let vars: SmallVec<[NodeId; 2]> = vars.iter().map(|v| self.id(v)).collect();
        self.push(NodeKind::Foreach {
            vars,
            iterable,
            body,
        })
    }

    pub fn break_stmt(&mut self) -> NodeId {
        self.push(NodeKind::Break)
    }

    pub fn continue_stmt(&mut self) -> NodeId {
        self.push(NodeKind::Continue)
    }

    /// Free function call.
    pub fn call(&mut self, name: &str, args: Vec<Arg>) -> NodeId {
        let name = self.id(name);
        let args = self.args(args);
        self.push(NodeKind::Function {
            name,
            args,
            chain: None,
        })
    }

    /// `recv.name(args)`.
    pub fn method(&mut self, recv: NodeId, name: &str, args: Vec<Arg>) -> NodeId {
        self.method_node(Some(recv), name, args)
    }

    /// Method call meant to be attached with [`AstBuilder::chain`].
    pub fn chained_method(&mut self, name: &str, args: Vec<Arg>) -> NodeId {
        self.method_node(None, name, args)
    }

    fn method_node(&mut self, recv: Option<NodeId>, name: &str, args: Vec<Arg>) -> NodeId {
        let name = self.id(name);
        let args = self.args(args);
        self.push(NodeKind::Method {
            recv,
            name,
            args,
            chain: None,
        })
    }

    /// `recv[index]`.
    pub fn index(&mut self, recv: NodeId, index: NodeId) -> NodeId {
        self.push(NodeKind::Index {
            recv: Some(recv),
            index,
            chain: None,
        })
    }

    /// Index operation meant to be attached with [`AstBuilder::chain`].
    pub fn chained_index(&mut self, index: NodeId) -> NodeId {
        self.push(NodeKind::Index {
            recv: None,
            index,
            chain: None,
        })
    }

    /// Attach `next` as the chain continuation of `node`.
    ///
    /// # Panics
    /// If `node` is not a call or index node.
    pub fn chain(&mut self, node: NodeId, next: NodeId) -> NodeId {
        match &mut self.nodes[node.index()].kind {
            NodeKind::Function { chain, .. }
            | NodeKind::Method { chain, .. }
            | NodeKind::Index { chain, .. } => *chain = Some(next),
            other => panic!("cannot chain onto {other:?}"),
        }
        node
    }

    pub fn assign(&mut self, name: &str, value: NodeId) -> NodeId {
        let target = self.id(name);
        self.push(NodeKind::Assign { target, value })
    }

    pub fn plus_assign(&mut self, name: &str, value: NodeId) -> NodeId {
        let target = self.id(name);
        self.push(NodeKind::PlusAssign { target, value })
    }

    pub fn not(&mut self, v: NodeId) -> NodeId {
        self.push(NodeKind::Not(v))
    }

    pub fn and(&mut self, l: NodeId, r: NodeId) -> NodeId {
        self.push(NodeKind::And(l, r))
    }

    pub fn or(&mut self, l: NodeId, r: NodeId) -> NodeId {
        self.push(NodeKind::Or(l, r))
    }

    pub fn compare(&mut self, op: CompareOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(NodeKind::Comparison { op, lhs, rhs })
    }

    pub fn ternary(&mut self, cond: NodeId, then: NodeId, otherwise: NodeId) -> NodeId {
        self.push(NodeKind::Ternary {
            cond,
            then,
            otherwise,
        })
    }

    pub fn neg(&mut self, v: NodeId) -> NodeId {
        self.push(NodeKind::UMinus(v))
    }

    pub fn arith(&mut self, op: ArithOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(NodeKind::Arithmetic { op, lhs, rhs })
    }

    pub fn stringify(&mut self, v: NodeId) -> NodeId {
        self.push(NodeKind::Stringify(v))
    }

    /// Finish with a block of `stmts` as the root.
    pub fn finish(mut self, stmts: Vec<NodeId>) -> Ast {
        let root = self.block(stmts);
        Ast::new(self.nodes, root)
    }
}
