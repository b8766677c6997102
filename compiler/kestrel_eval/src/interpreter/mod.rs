//! Tree-walking interpreter.
//!
//! Every node is evaluated by an async method returning a boxed future, so
//! natives can suspend (timers, input) in the middle of an expression and
//! resume where they left off. Recursion depth is bounded by the host stack,
//! which [`StackGuarded`](crate::stack::StackGuarded) grows on demand around
//! user-function bodies.
//!
//! # Node entry
//!
//! Each node entry does three things, in order:
//! 1. If the session is stopped, the node yields `Null` without side effects.
//! 2. The step counter is advanced; past the ceiling this fails with
//!    `StepLimitExceeded`.
//! 3. The observer, if any, sees `NodeEntered`.
//!
//! # Control flow
//!
//! `return` is not an error and not a value: statements produce a [`Flow`],
//! and blocks stop at the first `Flow::Return`.

mod builder;
mod call;
mod eval;
mod exec;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use kestrel_ir::{Name, Program};

use crate::environment::{ScopeError, ScopeRef};
use crate::errors::{
    duplicate_declaration, step_limit_exceeded, undefined_variable, EvalError, EvalResult,
};
use crate::input::SharedInputProvider;
use crate::observer::{EvalEvent, SharedObserver};
use crate::print_handler::SharedPrintHandler;
use crate::session::{AbortHandle, SessionControl, SharedControl};
use crate::Value;

pub use builder::InterpreterBuilder;
pub use call::CallContext;

/// Boxed future for expression evaluation and calls.
pub type EvalFuture<'a> = Pin<Box<dyn Future<Output = EvalResult> + 'a>>;

/// Result of executing a statement.
pub type FlowResult = Result<Flow, EvalError>;

/// Boxed future for statement execution.
pub type FlowFuture<'a> = Pin<Box<dyn Future<Output = FlowResult> + 'a>>;

/// How a statement or block finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Ran to completion with this value.
    Normal(Value),
    /// A `return` fired; the enclosing function (or the run) ends with this value.
    Return(Value),
}

impl Flow {
    pub fn into_value(self) -> Value {
        match self {
            Flow::Normal(value) | Flow::Return(value) => value,
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Flow::Return(_))
    }
}

/// The evaluator for one session.
///
/// Cloning is cheap and clones share the session: the stop flag, the step
/// counter, the abort handlers, and the sinks.
#[derive(Clone)]
pub struct Interpreter {
    pub(crate) control: SharedControl,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) input: Option<SharedInputProvider>,
    pub(crate) observer: Option<SharedObserver>,
}

impl Interpreter {
    /// Interpreter with no step ceiling, a silent print sink and no input.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    // Session

    pub fn control(&self) -> &SessionControl {
        &self.control
    }

    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle::new(Arc::clone(&self.control))
    }

    /// Stop the session and run its abort handlers. Idempotent.
    pub fn abort(&self) -> bool {
        self.control.abort()
    }

    pub fn is_aborted(&self) -> bool {
        self.control.is_stopped()
    }

    pub fn steps(&self) -> u64 {
        self.control.steps()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn input(&self) -> Option<&SharedInputProvider> {
        self.input.as_ref()
    }

    /// Captured output, when the print sink is a buffer.
    pub fn get_print_output(&self) -> String {
        self.print_handler.get_output()
    }

    // Entry points

    /// Execute a program's top-level statements in `scope`.
    ///
    /// Resolves to the `return` value, or the last statement's value.
    /// Once the session is aborted this resolves to `Null`.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub async fn run_program(&self, program: &Program, scope: &ScopeRef) -> EvalResult {
        let result = self.run_block(&program.body, scope).await.map(Flow::into_value);
        let result = self.settle(result);
        if result.is_ok() {
            let steps = self.control.steps();
            self.notify(EvalEvent::RunCompleted { steps });
            tracing::debug!(steps, "run completed");
        }
        result
    }

    /// Invoke a function value from the host.
    ///
    /// Same protocol as a call from inside the language. Once the session is
    /// aborted this resolves to `Null`.
    pub async fn call_function(&self, func: &Value, args: Vec<Value>) -> EvalResult {
        let result = self.call(func, args).await;
        self.settle(result)
    }

    /// After an abort, partially evaluated nodes see `Null` where they expected
    /// other values; the errors that causes are not reported.
    fn settle(&self, result: EvalResult) -> EvalResult {
        match result {
            Err(err) if self.control.is_stopped() => {
                tracing::debug!(error = %err, "discarding error raised after abort");
                Ok(Value::Null)
            }
            other => other,
        }
    }

    // Node entry

    /// Returns `Ok(false)` if the session is stopped and the node must be skipped.
    #[inline]
    fn enter(&self, kind: &'static str) -> Result<bool, EvalError> {
        if self.control.is_stopped() {
            return Ok(false);
        }
        if let Err(exceeded) = self.control.tick() {
            tracing::warn!(limit = exceeded.limit, node = kind, "step limit exceeded");
            return Err(step_limit_exceeded(exceeded.limit).with_node_if_absent(kind));
        }
        self.notify(EvalEvent::NodeEntered { kind });
        Ok(true)
    }

    #[inline]
    fn notify(&self, event: EvalEvent<'_>) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }

    // Bindings

    fn define(&self, scope: &ScopeRef, name: &Name, value: Value) -> Result<(), EvalError> {
        scope
            .borrow_mut()
            .define(name.clone(), value.clone())
            .map_err(|_| duplicate_declaration(name.clone()))?;
        self.notify(EvalEvent::VariableDefined {
            name: name.as_str(),
            value: &value,
        });
        Ok(())
    }

    fn lookup(&self, scope: &ScopeRef, name: &Name) -> EvalResult {
        let value = scope
            .borrow()
            .lookup(name)
            .ok_or_else(|| undefined_variable(name.clone()))?;
        self.notify(EvalEvent::VariableRead {
            name: name.as_str(),
            value: &value,
        });
        Ok(value)
    }

    fn assign(&self, scope: &ScopeRef, name: &Name, value: Value) -> Result<(), EvalError> {
        scope
            .borrow_mut()
            .assign(name, value.clone())
            .map_err(|err| match err {
                ScopeError::Undefined => undefined_variable(name.clone()),
                ScopeError::Duplicate => duplicate_declaration(name.clone()),
            })?;
        self.notify(EvalEvent::VariableWritten {
            name: name.as_str(),
            value: &value,
        });
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
