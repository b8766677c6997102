use super::base;
use super::*;
use crate::tests::support::{run, run_capturing};
use crate::{EvalErrorKind, Interpreter, LineQueue};
use kestrel_ir::build::{call, def, expr, num, ret, string, var};
use pretty_assertions::assert_eq;

fn nums(values: &[f64]) -> Vec<Value> {
    values.iter().copied().map(Value::Num).collect()
}

fn kind(result: crate::EvalResult) -> Option<EvalErrorKind> {
    result.err().map(|e| e.kind)
}

#[test]
fn arithmetic() {
    assert_eq!(base::add(&nums(&[2.0, 3.0])), Ok(Value::Num(5.0)));
    assert_eq!(base::sub(&nums(&[2.0, 3.0])), Ok(Value::Num(-1.0)));
    assert_eq!(base::mul(&nums(&[2.0, 3.0])), Ok(Value::Num(6.0)));
    assert_eq!(base::div(&nums(&[3.0, 2.0])), Ok(Value::Num(1.5)));
    assert_eq!(base::rem(&nums(&[-7.0, 3.0])), Ok(Value::Num(-1.0)));
    assert_eq!(base::div(&nums(&[1.0, 0.0])), Ok(Value::Num(f64::INFINITY)));
}

#[test]
fn add_concatenates_strings() {
    let args = [Value::string("ab"), Value::string("cd")];
    assert_eq!(base::add(&args), Ok(Value::string("abcd")));
    let mixed = [Value::string("a"), Value::Num(1.0)];
    assert_eq!(
        kind(base::add(&mixed)),
        Some(EvalErrorKind::TypeMismatch {
            expected: "str",
            got: "num"
        })
    );
}

#[test]
fn arity_is_checked() {
    assert_eq!(
        kind(base::sub(&nums(&[1.0]))),
        Some(EvalErrorKind::WrongArgCount {
            function: "sub".into(),
            expected: 2,
            got: 1
        })
    );
    assert_eq!(
        kind(base::not(&[])),
        Some(EvalErrorKind::WrongArgCount {
            function: "not".into(),
            expected: 1,
            got: 0
        })
    );
}

#[test]
fn comparisons_on_numbers_and_strings() {
    assert_eq!(base::lt(&nums(&[1.0, 2.0])), Ok(Value::Bool(true)));
    assert_eq!(base::lte(&nums(&[2.0, 2.0])), Ok(Value::Bool(true)));
    assert_eq!(base::gt(&nums(&[1.0, 2.0])), Ok(Value::Bool(false)));
    assert_eq!(base::gte(&nums(&[f64::NAN, 1.0])), Ok(Value::Bool(false)));
    let words = [Value::string("apple"), Value::string("banana")];
    assert_eq!(base::lt(&words), Ok(Value::Bool(true)));
    assert_eq!(
        kind(base::lt(&[Value::Bool(true), Value::Num(1.0)])),
        Some(EvalErrorKind::TypeMismatch {
            expected: "num",
            got: "bool"
        })
    );
}

#[test]
fn equality_is_structural() {
    let a = [
        Value::array(nums(&[1.0, 2.0])),
        Value::array(nums(&[1.0, 2.0])),
    ];
    assert_eq!(base::eq(&a), Ok(Value::Bool(true)));
    assert_eq!(
        base::neq(&[Value::Null, Value::Bool(false)]),
        Ok(Value::Bool(true))
    );
}

#[test]
fn logic_requires_bools() {
    let t = Value::Bool(true);
    let f = Value::Bool(false);
    assert_eq!(base::and(&[t.clone(), f.clone()]), Ok(f.clone()));
    assert_eq!(base::or(&[t.clone(), f.clone()]), Ok(t.clone()));
    assert_eq!(base::not(&[f]), Ok(t));
    assert!(base::and(&[Value::Num(1.0), Value::Bool(true)]).is_err());
}

#[test]
fn collection_helpers() {
    let xs = Value::array(nums(&[1.0]));
    assert_eq!(
        base::push(&[xs.clone(), Value::Num(2.0)]),
        Ok(Value::array(nums(&[1.0, 2.0])))
    );
    assert_eq!(base::len(&[xs]), Ok(Value::Num(1.0)));
    assert_eq!(base::len(&[Value::string("héllo")]), Ok(Value::Num(5.0)));
    assert_eq!(
        kind(base::len(&[Value::Num(1.0)])),
        Some(EvalErrorKind::Native {
            function: "len".into(),
            message: "expected str, arr or obj, got num".to_owned()
        })
    );

    let obj = Value::object_from([("b", Value::Num(2.0)), ("a", Value::Num(1.0))]);
    assert_eq!(
        base::keys(&[obj.clone()]),
        Ok(Value::array(vec![Value::string("a"), Value::string("b")]))
    );
    assert_eq!(
        base::get(&[obj.clone(), Value::string("b")]),
        Ok(Value::Num(2.0))
    );
    assert_eq!(base::get(&[obj, Value::string("zz")]), Ok(Value::Null));
}

#[test]
fn string_helpers() {
    assert_eq!(base::to_str(&[Value::Num(4.0)]), Ok(Value::string("4")));
    assert_eq!(
        base::concat(&[Value::string("a"), Value::string("b"), Value::string("c")]),
        Ok(Value::string("abc"))
    );
    assert_eq!(
        base::concat(&[Value::array(nums(&[1.0])), Value::array(nums(&[2.0]))]),
        Ok(Value::array(nums(&[1.0, 2.0])))
    );
    assert_eq!(base::concat(&[]), Ok(Value::string("")));
    assert_eq!(base::type_of(&[Value::Null]), Ok(Value::string("null")));
}

#[test]
fn registries_have_unique_names() {
    let mut names: Vec<String> = stdlib()
        .iter()
        .chain(io().iter())
        .map(|native| native.name().to_string())
        .collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[tokio::test]
async fn print_joins_arguments_with_spaces() {
    let (result, lines) = run_capturing([
        expr(call("print", [string("total:"), num(3.0)])),
        expr(call("print", [])),
    ])
    .await;
    assert_eq!(result, Ok(Value::Null));
    assert_eq!(lines, vec!["total: 3", ""]);
}

#[tokio::test]
async fn readline_returns_lines_then_null() {
    let queue = LineQueue::from_lines(["first"]);
    let interp = Interpreter::builder().input(queue).build();
    let result = run(
        &interp,
        [
            def("a", call("readline", [string("name? ")])),
            def("b", call("readline", [])),
            ret(kestrel_ir::build::array([var("a"), var("b")])),
        ],
    )
    .await;
    assert_eq!(
        result,
        Ok(Value::array(vec![Value::string("first"), Value::Null]))
    );
}

#[tokio::test]
async fn readline_without_provider_yields_null() {
    let interp = Interpreter::new();
    let result = run(&interp, [ret(call("readline", [string("> ")]))]).await;
    assert_eq!(result, Ok(Value::Null));
}

#[tokio::test]
async fn map_rejects_non_callable() {
    let interp = Interpreter::new();
    let result = run(
        &interp,
        [ret(call(
            "map",
            [kestrel_ir::build::array([num(1.0)]), num(2.0)],
        ))],
    )
    .await;
    assert_eq!(
        kind(result),
        Some(EvalErrorKind::NotCallable { type_name: "num" })
    );
}
