use super::*;
use crate::build::*;
use pretty_assertions::assert_eq;

#[test]
fn builders_produce_expected_nodes() {
    let stmt = def("x", num(1.0));
    assert_eq!(
        stmt,
        Stmt::Def {
            name: "x".into(),
            value: Expr::Num(1.0),
        }
    );
}

#[test]
fn stmt_kind_labels() {
    assert_eq!(def("x", null()).kind(), "def");
    assert_eq!(assign("x", null()).kind(), "assign");
    assert_eq!(block([]).kind(), "block");
    assert_eq!(if_(boolean(true), []).end().kind(), "if");
    assert_eq!(for_times(num(1.0), []).kind(), "for-times");
    assert_eq!(for_range("i", num(0.0), num(1.0), []).kind(), "for-range");
    assert_eq!(for_of("v", array([]), []).kind(), "for-of");
    assert_eq!(ret_none().kind(), "return");
    // Expression statements report the wrapped expression's kind.
    assert_eq!(expr(var("x")).kind(), "var");
}

#[test]
fn expr_kind_labels() {
    assert_eq!(template([text("a")]).kind(), "template");
    assert_eq!(object([("k", num(1.0))]).kind(), "object");
    assert_eq!(path("a", ["b"]).kind(), "path");
    assert_eq!(path_call("a", ["b"], []).kind(), "path-call");
    assert_eq!(index(var("a"), num(1.0)).kind(), "index");
    assert_eq!(func(["a"], []).kind(), "function");
    assert_eq!(call("f", []).kind(), "call");
}

#[test]
fn function_literal_body_is_shared_on_clone() {
    let Expr::Function(lit) = func(["a", "b"], [ret(var("a"))]) else {
        panic!("expected function literal");
    };
    let copy = lit.clone();
    assert!(Arc::ptr_eq(&lit.body, &copy.body));
    assert_eq!(lit.params.len(), 2);
}

#[test]
fn if_builder_collects_branches_in_order() {
    let stmt = if_(var("a"), [expr(num(1.0))])
        .elseif(var("b"), [expr(num(2.0))])
        .elseif(var("c"), [expr(num(3.0))])
        .otherwise([expr(num(4.0))]);
    let Stmt::If(if_stmt) = stmt else {
        panic!("expected if statement");
    };
    assert_eq!(if_stmt.else_ifs.len(), 2);
    assert_eq!(if_stmt.else_ifs[1].cond, var("c"));
    assert!(if_stmt.else_body.is_some());
}

#[test]
fn program_len_counts_top_level_statements() {
    let prog = program([def("x", num(1.0)), expr(var("x"))]);
    assert_eq!(prog.len(), 2);
    assert!(!prog.is_empty());
    assert!(program([]).is_empty());
}
