use super::*;
use crate::environment::{LocalScope, Scope};
use crate::print_handler::buffer_handler;
use crate::value::FunctionValue;
use crate::EvalErrorKind;
use kestrel_ir::build::*;
use pretty_assertions::assert_eq;

fn empty_scope() -> ScopeRef {
    LocalScope::new(Scope::new())
}

#[test]
fn flow_into_value() {
    assert_eq!(Flow::Normal(Value::Num(1.0)).into_value(), Value::Num(1.0));
    assert!(Flow::Return(Value::Null).is_return());
    assert!(!Flow::Normal(Value::Null).is_return());
}

#[test]
fn default_interpreter_discards_output() {
    let interp = Interpreter::new();
    interp.print_handler().println("dropped");
    assert_eq!(interp.get_print_output(), "");
    assert!(interp.input().is_none());
    assert_eq!(interp.control().max_steps(), None);
}

#[test]
fn builder_wires_print_handler_and_limit() {
    let interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .max_steps(10)
        .build();
    interp.print_handler().println("kept");
    assert_eq!(interp.get_print_output(), "kept\n");
    assert_eq!(interp.control().max_steps(), Some(10));
}

#[test]
fn clones_share_the_session() {
    let interp = Interpreter::new();
    let clone = interp.clone();
    let handle = interp.abort_handle();
    assert!(handle.abort());
    assert!(clone.is_aborted());
    assert!(!interp.abort());
}

#[tokio::test]
async fn literals_need_no_scope() {
    let interp = Interpreter::new();
    let scope = empty_scope();
    let value = interp
        .eval(&array([null(), boolean(true), num(2.0), string("s")]), &scope)
        .await;
    assert_eq!(
        value,
        Ok(Value::array(vec![
            Value::Null,
            Value::Bool(true),
            Value::Num(2.0),
            Value::string("s"),
        ]))
    );
}

#[tokio::test]
async fn undefined_variable_carries_node_label() {
    let interp = Interpreter::new();
    let err = interp.eval(&var("nope"), &empty_scope()).await.err();
    assert_eq!(
        err.as_ref().map(|e| &e.kind),
        Some(&EvalErrorKind::UndefinedVariable {
            name: "nope".into()
        })
    );
    assert_eq!(err.map(|e| e.to_string()), Some("undefined variable: nope (in var)".to_owned()));
}

#[tokio::test]
async fn function_literal_captures_current_frame() {
    let interp = Interpreter::new();
    let scope = empty_scope();
    let value = interp.eval(&func(["a"], []), &scope).await;
    let Ok(Value::Fn(FunctionValue::User(user))) = value else {
        panic!("expected a user function");
    };
    assert!(user.closure.ptr_eq(&scope));
    assert_eq!(user.params.len(), 1);
}

#[tokio::test]
async fn run_block_reports_return_flow() {
    let interp = Interpreter::new();
    let scope = empty_scope();
    let body = [expr(num(1.0)), ret(num(2.0)), expr(num(3.0))];
    let flow = interp.run_block(&body, &scope).await;
    assert_eq!(flow, Ok(Flow::Return(Value::Num(2.0))));

    let body = [expr(num(1.0)), expr(num(3.0))];
    let flow = interp.run_block(&body, &scope).await;
    assert_eq!(flow, Ok(Flow::Normal(Value::Num(3.0))));
}

#[tokio::test]
async fn object_literal_later_key_wins() {
    let interp = Interpreter::new();
    let value = interp
        .eval(&object([("k", num(1.0)), ("k", num(2.0))]), &empty_scope())
        .await;
    assert_eq!(value, Ok(Value::object_from([("k", Value::Num(2.0))])));
}

#[tokio::test]
async fn host_calls_count_against_the_step_budget() {
    let interp = Interpreter::builder().max_steps(3).build();
    let scope = empty_scope();
    let f = interp
        .eval(&func::<&str>([], [expr(num(1.0)), expr(num(2.0)), expr(num(3.0))]), &scope)
        .await;
    let f = match f {
        Ok(value) => value,
        Err(err) => panic!("literal failed: {err}"),
    };
    // The literal itself used one step; the body needs three more.
    let result = interp.call_function(&f, vec![]).await;
    assert_eq!(
        result.map_err(|e| e.kind),
        Err(EvalErrorKind::StepLimitExceeded { limit: 3 })
    );
}
