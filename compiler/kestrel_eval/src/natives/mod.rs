//! Built-in native functions.
//!
//! The language has no operators, so arithmetic, comparison and logic are
//! natives too. Two sets are exported:
//! - [`io()`]: `print` and `readline`, which every host injects
//! - [`stdlib()`]: everything else, which a host may leave out

mod base;
mod io;
mod time;

use crate::errors::{wrong_arg_count, EvalError};
use crate::value::NativeFunction;
use crate::Value;

/// `print` and `readline`.
pub fn io() -> Vec<NativeFunction> {
    vec![
        NativeFunction::new("print", io::print),
        NativeFunction::new("readline", io::readline),
    ]
}

/// The standard library.
pub fn stdlib() -> Vec<NativeFunction> {
    vec![
        // Arithmetic
        NativeFunction::sync("add", base::add),
        NativeFunction::sync("sub", base::sub),
        NativeFunction::sync("mul", base::mul),
        NativeFunction::sync("div", base::div),
        NativeFunction::sync("mod", base::rem),
        // Comparison
        NativeFunction::sync("eq", base::eq),
        NativeFunction::sync("neq", base::neq),
        NativeFunction::sync("lt", base::lt),
        NativeFunction::sync("lte", base::lte),
        NativeFunction::sync("gt", base::gt),
        NativeFunction::sync("gte", base::gte),
        // Logic
        NativeFunction::sync("not", base::not),
        NativeFunction::sync("and", base::and),
        NativeFunction::sync("or", base::or),
        // Collections and strings
        NativeFunction::sync("len", base::len),
        NativeFunction::sync("push", base::push),
        NativeFunction::sync("keys", base::keys),
        NativeFunction::sync("get", base::get),
        NativeFunction::sync("str", base::to_str),
        NativeFunction::sync("concat", base::concat),
        NativeFunction::sync("type", base::type_of),
        // Higher-order
        NativeFunction::new("map", base::map),
        NativeFunction::new("filter", base::filter),
        // Time
        NativeFunction::new("sleep", time::sleep),
    ]
}

fn check_arity(function: &str, args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(wrong_arg_count(function, expected, args.len()))
    }
}

#[cfg(test)]
mod tests;
