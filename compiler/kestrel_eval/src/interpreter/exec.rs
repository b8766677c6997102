//! Statement execution and control flow.

use kestrel_ir::{Expr, IfStmt, Name, Stmt};

use super::{Flow, FlowFuture, FlowResult, Interpreter};
use crate::environment::{Scope, ScopeRef};
use crate::errors::EvalError;
use crate::observer::EvalEvent;
use crate::Value;

impl Interpreter {
    /// Run statements in order in `scope`, stopping at the first `return`.
    ///
    /// The caller chooses the frame: blocks and branches pass a fresh child,
    /// the top level passes the root, calls pass the call frame.
    pub fn run_block<'a>(&'a self, stmts: &'a [Stmt], scope: &'a ScopeRef) -> FlowFuture<'a> {
        Box::pin(async move {
            self.notify(EvalEvent::BlockEntered);
            let mut last = Value::Null;
            for stmt in stmts {
                match self.exec(stmt, scope).await? {
                    Flow::Normal(value) => last = value,
                    flow @ Flow::Return(_) => {
                        self.notify(EvalEvent::BlockReturned);
                        return Ok(flow);
                    }
                }
            }
            self.notify(EvalEvent::BlockLeft);
            Ok(Flow::Normal(last))
        })
    }

    /// Execute one statement.
    pub fn exec<'a>(&'a self, stmt: &'a Stmt, scope: &'a ScopeRef) -> FlowFuture<'a> {
        Box::pin(async move {
            let kind = stmt.kind();
            // Expression statements are entered once, by `eval`.
            if !matches!(stmt, Stmt::Expr(_)) && !self.enter(kind)? {
                return Ok(Flow::Normal(Value::Null));
            }
            self.exec_inner(stmt, scope)
                .await
                .map_err(|err| err.with_node_if_absent(kind))
        })
    }

    async fn exec_inner(&self, stmt: &Stmt, scope: &ScopeRef) -> FlowResult {
        match stmt {
            Stmt::Expr(expr) => self.eval(expr, scope).await.map(Flow::Normal),
            Stmt::Def { name, value } => {
                let value = self.eval(value, scope).await?;
                // An abort while the value was pending must not bind its `Null`.
                if self.control.is_stopped() {
                    return Ok(Flow::Normal(Value::Null));
                }
                self.define(scope, name, value.clone())?;
                Ok(Flow::Normal(value))
            }
            Stmt::Assign { name, value } => {
                let value = self.eval(value, scope).await?;
                if self.control.is_stopped() {
                    return Ok(Flow::Normal(Value::Null));
                }
                self.assign(scope, name, value.clone())?;
                Ok(Flow::Normal(value))
            }
            Stmt::Block(body) => self.run_child(body, scope).await,
            Stmt::If(if_stmt) => self.exec_if(if_stmt, scope).await,
            Stmt::ForTimes { count, body } => self.exec_for_times(count, body, scope).await,
            Stmt::ForRange { var, from, to, body } => {
                self.exec_for_range(var, from, to, body, scope).await
            }
            Stmt::ForOf {
                var,
                iterable,
                body,
            } => self.exec_for_of(var, iterable, body, scope).await,
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr, scope).await?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
        }
    }

    async fn run_child(&self, body: &[Stmt], scope: &ScopeRef) -> FlowResult {
        let frame = Scope::child(scope);
        self.run_block(body, &frame).await
    }

    async fn condition(&self, cond: &Expr, scope: &ScopeRef) -> Result<bool, EvalError> {
        self.eval(cond, scope).await?.as_bool()
    }

    /// First branch whose condition is `true` runs; later conditions are not evaluated.
    async fn exec_if(&self, stmt: &IfStmt, scope: &ScopeRef) -> FlowResult {
        if self.condition(&stmt.cond, scope).await? {
            return self.run_child(&stmt.then_body, scope).await;
        }
        for branch in &stmt.else_ifs {
            if self.condition(&branch.cond, scope).await? {
                return self.run_child(&branch.body, scope).await;
            }
        }
        match &stmt.else_body {
            Some(body) => self.run_child(body, scope).await,
            None => Ok(Flow::Normal(Value::Null)),
        }
    }

    /// `for N times`: the body runs directly in the enclosing scope, with no
    /// frame of its own. A `def` in the body binds there, so it is visible
    /// after the loop and is a duplicate on the second pass.
    async fn exec_for_times(&self, count: &Expr, body: &[Stmt], scope: &ScopeRef) -> FlowResult {
        let count = self.eval(count, scope).await?.as_num()?;
        let mut done = 0.0;
        while done < count {
            if self.control.is_stopped() {
                break;
            }
            if let flow @ Flow::Return(_) = self.run_block(body, scope).await? {
                return Ok(flow);
            }
            done += 1.0;
        }
        Ok(Flow::Normal(Value::Null))
    }

    /// `for v from a to b`: `v` takes `a+1, a+2, ...` while `<= b`. Each
    /// iteration gets its own frame, so closures capture that iteration's `v`.
    ///
    /// The iteration count is fixed up front, so the loop ends even where
    /// `f64` can no longer step by one.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "span is a non-negative whole number; the cast saturates"
    )]
    async fn exec_for_range(
        &self,
        var: &Name,
        from: &Expr,
        to: &Expr,
        body: &[Stmt],
        scope: &ScopeRef,
    ) -> FlowResult {
        let from = self.eval(from, scope).await?.as_num()?;
        let to = self.eval(to, scope).await?.as_num()?;
        let start = from + 1.0;
        if start.is_nan() || to.is_nan() || start > to {
            return Ok(Flow::Normal(Value::Null));
        }
        let iterations = ((to - start).floor() as u64).saturating_add(1);
        for step in 0..iterations {
            if self.control.is_stopped() {
                break;
            }
            let frame = Scope::child(scope);
            self.define(&frame, var, Value::Num(start + step as f64))?;
            if let flow @ Flow::Return(_) = self.run_block(body, &frame).await? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal(Value::Null))
    }

    /// `for v of arr`: one frame per element, in array order.
    async fn exec_for_of(
        &self,
        var: &Name,
        iterable: &Expr,
        body: &[Stmt],
        scope: &ScopeRef,
    ) -> FlowResult {
        let source = self.eval(iterable, scope).await?;
        for item in source.as_array()? {
            if self.control.is_stopped() {
                break;
            }
            let frame = Scope::child(scope);
            self.define(&frame, var, item.clone())?;
            if let flow @ Flow::Return(_) = self.run_block(body, &frame).await? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal(Value::Null))
    }
}
