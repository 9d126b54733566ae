//! Flattened syntax tree.
//!
//! Nodes live in one vector and refer to each other by [`NodeId`]. Every
//! node records its source position and a `visited` flag the evaluator
//! sets on entry; unvisited statements after analysis are dead code.

use std::cell::Cell;
use std::fmt;

use smallvec::SmallVec;

/// Index of a node in its [`Ast`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Placeholder for "no node". Diagnostics attached to it carry no
    /// source position.
    pub const DUMMY: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_dummy(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dummy() {
            write!(f, "NodeId(DUMMY)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    pub fn symbol(self) -> char {
        match self {
            ArithOp::Add => '+',
            ArithOp::Sub => '-',
            ArithOp::Mul => '*',
            ArithOp::Div => '/',
            ArithOp::Mod => '%',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
}

/// One argument of a call, array literal or dict literal.
///
/// For calls the key of a keyword argument is an identifier node; for dict
/// literals it is an arbitrary expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    Positional(NodeId),
    Keyword { key: NodeId, value: NodeId },
}

/// Branch of an `if` chain. `cond` is `None` for the trailing `else`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IfClause {
    pub cond: Option<NodeId>,
    pub body: NodeId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Empty,
    Bool(bool),
    Number(i64),
    String(Box<str>),
    Id(Box<str>),
    /// Array literal; `args` is an [`NodeKind::Args`] node.
    Array(NodeId),
    /// Dict literal; `args` is an [`NodeKind::Args`] node.
    Dict(NodeId),
    Args(Vec<Arg>),
    Block(Vec<NodeId>),
    If(Vec<IfClause>),
    Foreach {
        vars: SmallVec<[NodeId; 2]>,
        iterable: NodeId,
        body: NodeId,
    },
    Continue,
    Break,
    /// Free function call `name(args)`, optionally followed by a chain of
    /// method calls and index operations.
    Function {
        name: NodeId,
        args: NodeId,
        chain: Option<NodeId>,
    },
    /// `recv.name(args)`. `recv` is `None` when this node is a link of
    /// another node's chain.
    Method {
        recv: Option<NodeId>,
        name: NodeId,
        args: NodeId,
        chain: Option<NodeId>,
    },
    /// `recv[index]`. `recv` is `None` when this node is a chain link.
    Index {
        recv: Option<NodeId>,
        index: NodeId,
        chain: Option<NodeId>,
    },
    Assign {
        target: NodeId,
        value: NodeId,
    },
    PlusAssign {
        target: NodeId,
        value: NodeId,
    },
    Not(NodeId),
    And(NodeId, NodeId),
    Or(NodeId, NodeId),
    Comparison {
        op: CompareOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Ternary {
        cond: NodeId,
        then: NodeId,
        otherwise: NodeId,
    },
    UMinus(NodeId),
    Arithmetic {
        op: ArithOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Stringify(NodeId),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub line: u32,
    pub col: u32,
    visited: Cell<bool>,
}

impl Node {
    pub fn new(kind: NodeKind, line: u32, col: u32) -> Self {
        Node {
            kind,
            line,
            col,
            visited: Cell::new(false),
        }
    }

    #[inline]
    pub fn mark_visited(&self) {
        self.visited.set(true);
    }

    #[inline]
    pub fn visited(&self) -> bool {
        self.visited.get()
    }
}

/// A parsed build file.
#[derive(Clone, Debug)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    /// # Panics
    /// If `root` is not an index into `nodes`.
    pub fn new(nodes: Vec<Node>, root: NodeId) -> Self {
        assert!(root.index() < nodes.len(), "root {root:?} out of bounds");
        Ast { nodes, root }
    }

    /// Tree holding a single empty block.
    pub fn empty() -> Self {
        Ast::new(vec![Node::new(NodeKind::Block(Vec::new()), 1, 1)], NodeId(0))
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Name stored in an [`NodeKind::Id`] node, if `id` is one.
    pub fn ident(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Id(name) => Some(name),
            _ => None,
        }
    }

    /// Clear every `visited` flag.
    pub fn reset_visited(&self) {
        for node in &self.nodes {
            node.visited.set(false);
        }
    }

    /// Statement-level nodes that were never evaluated, skipping the
    /// interiors of unvisited statements.
    pub fn unvisited_statements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_unvisited(self.root, &mut out);
        out
    }

    fn collect_unvisited(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Block(stmts) => {
                for &stmt in stmts {
                    if self.node(stmt).visited() {
                        self.collect_unvisited(stmt, out);
                    } else if !matches!(self.node(stmt).kind, NodeKind::Empty) {
                        out.push(stmt);
                    }
                }
            }
            NodeKind::If(clauses) => {
                for clause in clauses {
                    let body = self.node(clause.body);
                    if body.visited() {
                        self.collect_unvisited(clause.body, out);
                    } else if !matches!(&body.kind, NodeKind::Block(s) if s.is_empty()) {
                        out.push(clause.body);
                    }
                }
            }
            NodeKind::Foreach { body, .. } if self.node(*body).visited() => {
                self.collect_unvisited(*body, out);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests;
