//! Statement nodes.

use super::{Expr, StmtList};
use crate::Name;

/// An `elseif` branch.
#[derive(Clone, Debug, PartialEq)]
pub struct ElseIf {
    pub cond: Expr,
    pub body: StmtList,
}

/// `if cond { ... } elseif cond { ... } else { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_body: StmtList,
    pub else_ifs: Vec<ElseIf>,
    pub else_body: Option<StmtList>,
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Expression evaluated for its value or side effects.
    Expr(Expr),
    /// `def name = value`
    Def { name: Name, value: Expr },
    /// `name = value`
    Assign { name: Name, value: Expr },
    /// `{ ... }` with its own scope.
    Block(StmtList),
    If(IfStmt),
    /// `for count times { ... }`
    ForTimes { count: Expr, body: StmtList },
    /// `for var from from to to { ... }`
    ForRange {
        var: Name,
        from: Expr,
        to: Expr,
        body: StmtList,
    },
    /// `for var of iterable { ... }`
    ForOf {
        var: Name,
        iterable: Expr,
        body: StmtList,
    },
    /// `return` or `return value`
    Return(Option<Expr>),
}

impl Stmt {
    /// Stable label for this node kind, used in diagnostics and observer events.
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::Expr(expr) => expr.kind(),
            Stmt::Def { .. } => "def",
            Stmt::Assign { .. } => "assign",
            Stmt::Block(_) => "block",
            Stmt::If(_) => "if",
            Stmt::ForTimes { .. } => "for-times",
            Stmt::ForRange { .. } => "for-range",
            Stmt::ForOf { .. } => "for-of",
            Stmt::Return(_) => "return",
        }
    }
}

impl From<Expr> for Stmt {
    fn from(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }
}
