//! Kestrel IR - syntax tree types.
//!
//! This crate contains the tree the parser hands to the evaluator:
//! - `Name` for identifiers and object keys
//! - `Stmt` / `Expr` node enums
//! - `Program` for a parsed top-level statement list
//! - `build` helpers for constructing trees by hand
//!
//! # Design Philosophy
//!
//! - **Closed enums**: every node kind is a variant, so consumers match exhaustively
//! - **Statements vs expressions**: only statements can end a sequence early
//! - **Immutable and shareable**: bodies are `Arc<[Stmt]>`, so a function literal
//!   can be captured by many closures without copying, and trees are `Send + Sync`

pub mod ast;
pub mod build;
mod name;

pub use ast::{
    ElseIf, Expr, FunctionLit, IfStmt, Program, Stmt, StmtList, TemplatePart,
};
pub use name::Name;
