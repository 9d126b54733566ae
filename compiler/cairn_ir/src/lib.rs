//! Cairn IR - syntax tree types
//!
//! This crate contains the inputs the evaluator consumes:
//! - [`Source`]: a build file's label and text, for diagnostics
//! - [`Ast`] / [`Node`] / [`NodeKind`]: the parsed tree, flattened into a
//!   vector and addressed by [`NodeId`]
//! - [`AstBuilder`]: programmatic tree construction
//!
//! Parsing is not part of this crate. Front ends produce an [`Ast`]
//! directly, or through [`AstBuilder`].

pub mod ast;
mod builder;
mod source;

pub use ast::{Arg, ArithOp, Ast, CompareOp, IfClause, Node, NodeId, NodeKind};
pub use builder::AstBuilder;
pub use source::Source;
