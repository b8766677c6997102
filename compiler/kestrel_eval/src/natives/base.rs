//! Arithmetic, comparison, logic, collection and string natives.

use std::cmp::Ordering;

use crate::errors::{native_error, type_mismatch, EvalError, EvalResult};
use crate::interpreter::CallContext;
use crate::value::NativeFuture;
use crate::Value;

use super::check_arity;

// Arithmetic

fn numeric(name: &str, args: &[Value], op: fn(f64, f64) -> f64) -> EvalResult {
    check_arity(name, args, 2)?;
    Ok(Value::Num(op(args[0].as_num()?, args[1].as_num()?)))
}

/// Numbers add; two strings concatenate.
pub(super) fn add(args: &[Value]) -> EvalResult {
    check_arity("add", args, 2)?;
    match (&args[0], &args[1]) {
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        (Value::Str(_), other) => Err(type_mismatch("str", other.type_name())),
        (a, b) => Ok(Value::Num(a.as_num()? + b.as_num()?)),
    }
}

pub(super) fn sub(args: &[Value]) -> EvalResult {
    numeric("sub", args, |a, b| a - b)
}

pub(super) fn mul(args: &[Value]) -> EvalResult {
    numeric("mul", args, |a, b| a * b)
}

/// IEEE division: dividing by zero gives an infinity or NaN, not an error.
pub(super) fn div(args: &[Value]) -> EvalResult {
    numeric("div", args, |a, b| a / b)
}

/// Remainder with the sign of the dividend.
pub(super) fn rem(args: &[Value]) -> EvalResult {
    numeric("mod", args, |a, b| a % b)
}

// Comparison

pub(super) fn eq(args: &[Value]) -> EvalResult {
    check_arity("eq", args, 2)?;
    Ok(Value::Bool(args[0] == args[1]))
}

pub(super) fn neq(args: &[Value]) -> EvalResult {
    check_arity("neq", args, 2)?;
    Ok(Value::Bool(args[0] != args[1]))
}

/// Order two numbers or two strings. NaN compares false against everything.
fn compare(name: &str, args: &[Value], accept: fn(Ordering) -> bool) -> EvalResult {
    check_arity(name, args, 2)?;
    let ordering = match (&args[0], &args[1]) {
        (Value::Num(a), Value::Num(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some((**a).cmp(&**b)),
        (Value::Str(_), other) => return Err(type_mismatch("str", other.type_name())),
        (Value::Num(_), other) | (other, _) => {
            return Err(type_mismatch("num", other.type_name()))
        }
    };
    Ok(Value::Bool(ordering.is_some_and(accept)))
}

pub(super) fn lt(args: &[Value]) -> EvalResult {
    compare("lt", args, Ordering::is_lt)
}

pub(super) fn lte(args: &[Value]) -> EvalResult {
    compare("lte", args, Ordering::is_le)
}

pub(super) fn gt(args: &[Value]) -> EvalResult {
    compare("gt", args, Ordering::is_gt)
}

pub(super) fn gte(args: &[Value]) -> EvalResult {
    compare("gte", args, Ordering::is_ge)
}

// Logic. Arguments are already evaluated, so `and` / `or` do not short-circuit.

pub(super) fn not(args: &[Value]) -> EvalResult {
    check_arity("not", args, 1)?;
    Ok(Value::Bool(!args[0].as_bool()?))
}

pub(super) fn and(args: &[Value]) -> EvalResult {
    check_arity("and", args, 2)?;
    Ok(Value::Bool(args[0].as_bool()? && args[1].as_bool()?))
}

pub(super) fn or(args: &[Value]) -> EvalResult {
    check_arity("or", args, 2)?;
    Ok(Value::Bool(args[0].as_bool()? || args[1].as_bool()?))
}

// Collections and strings

#[allow(
    clippy::cast_precision_loss,
    reason = "collection sizes stay far below 2^53"
)]
pub(super) fn len(args: &[Value]) -> EvalResult {
    check_arity("len", args, 1)?;
    let len = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::Arr(items) => items.len(),
        Value::Obj(map) => map.len(),
        other => {
            return Err(native_error(
                "len",
                format!("expected str, arr or obj, got {}", other.type_name()),
            ))
        }
    };
    Ok(Value::Num(len as f64))
}

/// New array with `item` appended; the original is unchanged.
pub(super) fn push(args: &[Value]) -> EvalResult {
    check_arity("push", args, 2)?;
    let items = args[0].as_array()?;
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(items);
    out.push(args[1].clone());
    Ok(Value::array(out))
}

/// Object keys as strings, sorted.
pub(super) fn keys(args: &[Value]) -> EvalResult {
    check_arity("keys", args, 1)?;
    let mut names: Vec<_> = args[0].as_object()?.keys().collect();
    names.sort();
    Ok(Value::array(names.into_iter().map(Value::string).collect()))
}

/// Field lookup by computed key; `null` when absent.
pub(super) fn get(args: &[Value]) -> EvalResult {
    check_arity("get", args, 2)?;
    let map = args[0].as_object()?;
    let key = args[1].as_str()?;
    Ok(map.get(key).cloned().unwrap_or(Value::Null))
}

pub(super) fn to_str(args: &[Value]) -> EvalResult {
    check_arity("str", args, 1)?;
    Ok(Value::string(args[0].to_string()))
}

/// Concatenate any number of strings, or any number of arrays.
pub(super) fn concat(args: &[Value]) -> EvalResult {
    match args.first() {
        None | Some(Value::Str(_)) => {
            let mut out = String::new();
            for arg in args {
                out.push_str(arg.as_str()?);
            }
            Ok(Value::string(out))
        }
        Some(Value::Arr(_)) => {
            let mut out = Vec::new();
            for arg in args {
                out.extend_from_slice(arg.as_array()?);
            }
            Ok(Value::array(out))
        }
        Some(other) => Err(type_mismatch("str", other.type_name())),
    }
}

pub(super) fn type_of(args: &[Value]) -> EvalResult {
    check_arity("type", args, 1)?;
    Ok(Value::string(args[0].type_name()))
}

// Higher-order

/// `map(arr, f)`: new array of `f(item)`.
pub(super) fn map(args: Vec<Value>, ctx: CallContext) -> NativeFuture {
    Box::pin(async move {
        check_arity("map", &args, 2)?;
        let items = args[0].as_array()?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(ctx.call(&args[1], vec![item.clone()]).await?);
        }
        Ok(Value::array(out))
    })
}

/// `filter(arr, pred)`: items for which `pred(item)` is `true`.
pub(super) fn filter(args: Vec<Value>, ctx: CallContext) -> NativeFuture {
    Box::pin(async move {
        check_arity("filter", &args, 2)?;
        let items = args[0].as_array()?;
        let mut out = Vec::new();
        for item in items {
            let keep = ctx.call(&args[1], vec![item.clone()]).await?;
            if predicate_result("filter", &keep)? {
                out.push(item.clone());
            }
        }
        Ok(Value::array(out))
    })
}

fn predicate_result(name: &str, value: &Value) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(native_error(
            name,
            format!("predicate must return bool, got {}", other.type_name()),
        )),
    }
}
