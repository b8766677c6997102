//! Constructor helpers for building trees without a parser.
//!
//! Used by hosts that generate programs directly and by tests:
//!
//! ```
//! use kestrel_ir::build::*;
//!
//! let program = program([
//!     def("x", num(1.0)),
//!     assign("x", call("add", [var("x"), num(1.0)])),
//!     ret(var("x")),
//! ]);
//! assert_eq!(program.len(), 3);
//! ```

use std::sync::Arc;

use crate::{ElseIf, Expr, FunctionLit, IfStmt, Name, Program, Stmt, StmtList, TemplatePart};

fn list(body: impl IntoIterator<Item = Stmt>) -> StmtList {
    body.into_iter().collect()
}

pub fn program(body: impl IntoIterator<Item = Stmt>) -> Program {
    Program::new(list(body))
}

// Expressions

pub fn null() -> Expr {
    Expr::Null
}

pub fn boolean(b: bool) -> Expr {
    Expr::Bool(b)
}

pub fn num(n: f64) -> Expr {
    Expr::Num(n)
}

pub fn string(s: &str) -> Expr {
    Expr::Str(Arc::from(s))
}

pub fn template(parts: impl IntoIterator<Item = TemplatePart>) -> Expr {
    Expr::Template(parts.into_iter().collect())
}

/// Literal template segment.
pub fn text(s: &str) -> TemplatePart {
    TemplatePart::Literal(Arc::from(s))
}

/// Interpolated template segment.
pub fn interp(expr: Expr) -> TemplatePart {
    TemplatePart::Interpolation(expr)
}

pub fn array(items: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Array(items.into_iter().collect())
}

pub fn object<K: Into<Name>>(entries: impl IntoIterator<Item = (K, Expr)>) -> Expr {
    Expr::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
}

pub fn var(name: impl Into<Name>) -> Expr {
    Expr::Var(name.into())
}

pub fn path<K: Into<Name>>(base: impl Into<Name>, keys: impl IntoIterator<Item = K>) -> Expr {
    Expr::Path {
        base: base.into(),
        keys: keys.into_iter().map(Into::into).collect(),
    }
}

pub fn path_call<K: Into<Name>>(
    base: impl Into<Name>,
    keys: impl IntoIterator<Item = K>,
    args: impl IntoIterator<Item = Expr>,
) -> Expr {
    Expr::PathCall {
        base: base.into(),
        keys: keys.into_iter().map(Into::into).collect(),
        args: args.into_iter().collect(),
    }
}

pub fn index(target: Expr, idx: Expr) -> Expr {
    Expr::Index {
        target: Box::new(target),
        index: Box::new(idx),
    }
}

pub fn func<P: Into<Name>>(
    params: impl IntoIterator<Item = P>,
    body: impl IntoIterator<Item = Stmt>,
) -> Expr {
    Expr::Function(FunctionLit {
        params: params.into_iter().map(Into::into).collect(),
        body: list(body),
    })
}

/// Call a function stored in a variable.
pub fn call(name: impl Into<Name>, args: impl IntoIterator<Item = Expr>) -> Expr {
    call_expr(var(name), args)
}

/// Call the result of an arbitrary expression.
pub fn call_expr(callee: Expr, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Call {
        callee: Box::new(callee),
        args: args.into_iter().collect(),
    }
}

// Statements

pub fn expr(e: Expr) -> Stmt {
    Stmt::Expr(e)
}

pub fn def(name: impl Into<Name>, value: Expr) -> Stmt {
    Stmt::Def {
        name: name.into(),
        value,
    }
}

pub fn assign(name: impl Into<Name>, value: Expr) -> Stmt {
    Stmt::Assign {
        name: name.into(),
        value,
    }
}

pub fn block(body: impl IntoIterator<Item = Stmt>) -> Stmt {
    Stmt::Block(list(body))
}

pub fn ret(value: Expr) -> Stmt {
    Stmt::Return(Some(value))
}

pub fn ret_none() -> Stmt {
    Stmt::Return(None)
}

pub fn for_times(count: Expr, body: impl IntoIterator<Item = Stmt>) -> Stmt {
    Stmt::ForTimes {
        count,
        body: list(body),
    }
}

pub fn for_range(
    var: impl Into<Name>,
    from: Expr,
    to: Expr,
    body: impl IntoIterator<Item = Stmt>,
) -> Stmt {
    Stmt::ForRange {
        var: var.into(),
        from,
        to,
        body: list(body),
    }
}

pub fn for_of(var: impl Into<Name>, iterable: Expr, body: impl IntoIterator<Item = Stmt>) -> Stmt {
    Stmt::ForOf {
        var: var.into(),
        iterable,
        body: list(body),
    }
}

/// Start an `if` chain; finish with [`IfBuilder::end`] or [`IfBuilder::otherwise`].
pub fn if_(cond: Expr, then_body: impl IntoIterator<Item = Stmt>) -> IfBuilder {
    IfBuilder {
        stmt: IfStmt {
            cond,
            then_body: list(then_body),
            else_ifs: Vec::new(),
            else_body: None,
        },
    }
}

/// Builder for `if` / `elseif` / `else` chains.
#[derive(Debug)]
pub struct IfBuilder {
    stmt: IfStmt,
}

impl IfBuilder {
    #[must_use]
    pub fn elseif(mut self, cond: Expr, body: impl IntoIterator<Item = Stmt>) -> Self {
        self.stmt.else_ifs.push(ElseIf {
            cond,
            body: list(body),
        });
        self
    }

    /// Attach the `else` branch and finish the statement.
    pub fn otherwise(mut self, body: impl IntoIterator<Item = Stmt>) -> Stmt {
        self.stmt.else_body = Some(list(body));
        Stmt::If(self.stmt)
    }

    /// Finish the statement without an `else` branch.
    pub fn end(self) -> Stmt {
        Stmt::If(self.stmt)
    }
}
