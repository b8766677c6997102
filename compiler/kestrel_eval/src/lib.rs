//! Kestrel Eval - async tree-walking evaluator.
//!
//! This crate evaluates `kestrel_ir` trees directly, without compiling them.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Value`: dynamically typed runtime values, heap data behind `Heap<T>`
//! - `Scope` / `LocalScope`: the lexical scope chain
//! - `Interpreter`: boxed-future `eval` / `exec` / `call` over the tree
//! - `SessionControl`: stop flag, step budget and abort handlers, shared with
//!   `AbortHandle` so hosts can stop a run from anywhere
//! - `natives`: the operator-free standard library plus `print` / `readline`
//!
//! Evaluation is single-threaded (`Rc`-based values) but asynchronous: a
//! native may suspend on a timer or on input, and an abort wakes it.
//!
//! # Re-exports
//!
//! Value and error types are re-exported at the crate root:
//! - `Value`, `FunctionValue`, `NativeFunction`, `UserFunction`, `Heap`
//! - `EvalError`, `EvalErrorKind`, `EvalResult`

mod environment;
pub mod errors;
mod input;
pub mod interpreter;
pub mod natives;
mod observer;
mod print_handler;
mod session;
mod stack;
pub mod value;

pub use environment::{LocalScope, Scope, ScopeError, ScopeRef};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use input::{InputProvider, LineQueue, LineSender, SharedInputProvider};
pub use interpreter::{CallContext, Flow, Interpreter, InterpreterBuilder};
pub use observer::{EvalEvent, EvalObserver, SharedObserver, TracingObserver};
pub use print_handler::{
    buffer_handler, forward_handler, silent_handler, stdout_handler, BufferPrintHandler,
    PrintHandlerImpl, SharedPrintHandler,
};
pub use session::{AbortHandle, AbortHandlerId, SessionControl, StepLimitExceeded};
pub use stack::ensure_sufficient_stack;
pub use value::{FunctionValue, Heap, NativeFunction, NativeFuture, ObjectMap, UserFunction, Value};

#[cfg(test)]
mod tests;
