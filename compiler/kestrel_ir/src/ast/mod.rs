//! AST node definitions.
//!
//! Split into expression nodes (`expr`) and statement nodes (`stmt`).
//! Only statements can carry control flow (`return`); expressions always
//! produce a value.

mod expr;
mod stmt;

use std::sync::Arc;

pub use expr::{Expr, FunctionLit, TemplatePart};
pub use stmt::{ElseIf, IfStmt, Stmt};

/// Shared, immutable statement sequence.
///
/// Blocks, loop bodies and function bodies all use this so that closures can
/// hold on to their body without copying it.
pub type StmtList = Arc<[Stmt]>;

/// A parsed top-level program.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub body: StmtList,
}

impl Program {
    pub fn new(body: impl Into<StmtList>) -> Self {
        Program { body: body.into() }
    }

    /// Number of top-level statements.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests;
