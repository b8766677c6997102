//! Expression evaluation.

use kestrel_ir::{Expr, Name, TemplatePart};
use rustc_hash::FxHashMap;

use super::{EvalFuture, Interpreter};
use crate::environment::ScopeRef;
use crate::errors::{index_out_of_bounds, not_callable, EvalError, EvalResult};
use crate::value::UserFunction;
use crate::Value;

impl Interpreter {
    /// Evaluate an expression to a value.
    pub fn eval<'a>(&'a self, expr: &'a Expr, scope: &'a ScopeRef) -> EvalFuture<'a> {
        Box::pin(async move {
            let kind = expr.kind();
            if !self.enter(kind)? {
                return Ok(Value::Null);
            }
            self.eval_inner(expr, scope)
                .await
                .map_err(|err| err.with_node_if_absent(kind))
        })
    }

    async fn eval_inner(&self, expr: &Expr, scope: &ScopeRef) -> EvalResult {
        match expr {
            Expr::Null => Ok(Value::Null),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Num(n) => Ok(Value::Num(*n)),
            Expr::Str(s) => Ok(Value::string(s)),
            Expr::Template(parts) => self.eval_template(parts, scope).await,
            Expr::Array(items) => Ok(Value::array(self.eval_args(items, scope).await?)),
            Expr::Object(entries) => {
                let mut map = FxHashMap::default();
                map.reserve(entries.len());
                for (key, value) in entries {
                    let value = self.eval(value, scope).await?;
                    map.insert(key.clone(), value);
                }
                Ok(Value::object(map))
            }
            Expr::Var(name) => self.lookup(scope, name),
            Expr::Path { base, keys } => self.resolve_path(base, keys, scope),
            Expr::PathCall { base, keys, args } => {
                let target = self.resolve_path(base, keys, scope)?;
                if !target.is_callable() {
                    return Err(not_callable(target.type_name()));
                }
                let args = self.eval_args(args, scope).await?;
                self.call(&target, args).await
            }
            Expr::Index { target, index } => {
                let target = self.eval(target, scope).await?;
                let index = self.eval(index, scope).await?;
                index_array(target.as_array()?, index.as_num()?)
            }
            Expr::Function(lit) => Ok(Value::user(UserFunction {
                params: lit.params.clone(),
                body: lit.body.clone(),
                closure: scope.clone(),
            })),
            Expr::Call { callee, args } => {
                let callee = self.eval(callee, scope).await?;
                let args = self.eval_args(args, scope).await?;
                self.call(&callee, args).await
            }
        }
    }

    /// Evaluate expressions left to right.
    async fn eval_args(&self, exprs: &[Expr], scope: &ScopeRef) -> Result<Vec<Value>, EvalError> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            values.push(self.eval(expr, scope).await?);
        }
        Ok(values)
    }

    /// Concatenate literal text and interpolated strings.
    async fn eval_template(&self, parts: &[TemplatePart], scope: &ScopeRef) -> EvalResult {
        let mut out = String::new();
        for part in parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Interpolation(expr) => {
                    let value = self.eval(expr, scope).await?;
                    out.push_str(value.as_str()?);
                }
            }
        }
        Ok(Value::string(out))
    }

    /// Walk `base.k1.k2...`. A missing key yields `Null`; a non-object on the
    /// way is a `TypeMismatch`.
    fn resolve_path(&self, base: &Name, keys: &[Name], scope: &ScopeRef) -> EvalResult {
        let mut current = self.lookup(scope, base)?;
        for key in keys {
            let next = current.as_object()?.get(key).cloned();
            match next {
                Some(value) => current = value,
                None => return Ok(Value::Null),
            }
        }
        Ok(current)
    }
}

/// 1-based element access.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "index is checked to be a whole number in 1..=len before the cast"
)]
fn index_array(items: &[Value], index: f64) -> EvalResult {
    let len = items.len();
    if index.fract() == 0.0 && index >= 1.0 && index <= len as f64 {
        if let Some(item) = items.get(index as usize - 1) {
            return Ok(item.clone());
        }
    }
    Err(index_out_of_bounds(index, len))
}
