//! Expression nodes.

use std::sync::Arc;

use super::StmtList;
use crate::Name;

/// One piece of a template string.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplatePart {
    /// Literal text copied verbatim.
    Literal(Arc<str>),
    /// Embedded expression; must evaluate to a string.
    Interpolation(Expr),
}

/// Function literal: parameter names plus body.
///
/// Both halves are shared so that every closure created from the same
/// literal points at the same allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLit {
    pub params: Arc<[Name]>,
    pub body: StmtList,
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    // Literals
    Null,
    Bool(bool),
    Num(f64),
    Str(Arc<str>),

    /// Template string: literal segments interleaved with expressions.
    Template(Vec<TemplatePart>),
    /// Array literal `[a, b, c]`.
    Array(Vec<Expr>),
    /// Object literal `{ k: v, ... }`, entries in declaration order.
    Object(Vec<(Name, Expr)>),

    /// Variable reference.
    Var(Name),
    /// Property path `base.k1.k2`.
    Path { base: Name, keys: Vec<Name> },
    /// Property path followed by a call `base.k1.k2(args)`.
    PathCall {
        base: Name,
        keys: Vec<Name>,
        args: Vec<Expr>,
    },
    /// 1-based array indexing `target[index]`.
    Index { target: Box<Expr>, index: Box<Expr> },

    /// Function literal `fn(a, b) { ... }`.
    Function(FunctionLit),
    /// Call `callee(args)`.
    Call { callee: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    /// Stable label for this node kind, used in diagnostics and observer events.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Null => "null",
            Expr::Bool(_) => "bool",
            Expr::Num(_) => "num",
            Expr::Str(_) => "str",
            Expr::Template(_) => "template",
            Expr::Array(_) => "array",
            Expr::Object(_) => "object",
            Expr::Var(_) => "var",
            Expr::Path { .. } => "path",
            Expr::PathCall { .. } => "path-call",
            Expr::Index { .. } => "index",
            Expr::Function(_) => "function",
            Expr::Call { .. } => "call",
        }
    }
}
