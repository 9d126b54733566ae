use super::*;
use crate::AstBuilder;
use pretty_assertions::assert_eq;

#[test]
fn dummy_node_id() {
    assert!(NodeId::DUMMY.is_dummy());
    assert!(!NodeId::new(0).is_dummy());
    assert_eq!(format!("{:?}", NodeId::DUMMY), "NodeId(DUMMY)");
}

#[test]
fn empty_ast_root_is_block() {
    let ast = Ast::empty();
    assert!(matches!(ast.node(ast.root()).kind, NodeKind::Block(ref s) if s.is_empty()));
}

#[test]
fn unvisited_statements_skip_visited_ones() {
    let mut b = AstBuilder::new();
    let one = b.number(1);
    let a = b.assign("a", one);
    b.line(2);
    let two = b.number(2);
    let c = b.assign("c", two);
    let ast = b.finish(vec![a, c]);

    ast.node(ast.root()).mark_visited();
    ast.node(a).mark_visited();
    assert_eq!(ast.unvisited_statements(), vec![c]);

    ast.reset_visited();
    assert!(!ast.node(a).visited());
}

#[test]
fn unvisited_if_body_is_reported_once() {
    let mut b = AstBuilder::new();
    let cond = b.bool_lit(false);
    let one = b.number(1);
    let inner = b.assign("x", one);
    let body = b.block(vec![inner]);
    let stmt = b.if_chain(&[(Some(cond), body)]);
    let ast = b.finish(vec![stmt]);

    ast.node(ast.root()).mark_visited();
    ast.node(stmt).mark_visited();
    ast.node(cond).mark_visited();
    assert_eq!(ast.unvisited_statements(), vec![body]);
}

#[test]
fn arith_symbols() {
    let ops = [ArithOp::Add, ArithOp::Sub, ArithOp::Mul, ArithOp::Div, ArithOp::Mod];
    let syms: String = ops.iter().map(|o| o.symbol()).collect();
    assert_eq!(syms, "+-*/%");
}
