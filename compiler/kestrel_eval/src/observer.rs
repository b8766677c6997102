//! Optional evaluation observer.
//!
//! Debuggers, tracers and step-through UIs attach an [`EvalObserver`] to see
//! node entries, block boundaries and variable traffic. With no observer
//! attached the evaluator skips event construction entirely.

use std::rc::Rc;

use crate::Value;

/// Something the evaluator just did.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalEvent<'a> {
    /// A node was entered and counted against the step budget.
    NodeEntered { kind: &'static str },
    BlockEntered,
    /// Block ran to its end.
    BlockLeft,
    /// Block ended early through `return`.
    BlockReturned,
    VariableDefined { name: &'a str, value: &'a Value },
    VariableRead { name: &'a str, value: &'a Value },
    VariableWritten { name: &'a str, value: &'a Value },
    /// A top-level run finished without error.
    RunCompleted { steps: u64 },
}

pub trait EvalObserver {
    fn on_event(&self, event: &EvalEvent<'_>);
}

pub type SharedObserver = Rc<dyn EvalObserver>;

/// Observer that forwards every event to `tracing` at TRACE level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl EvalObserver for TracingObserver {
    fn on_event(&self, event: &EvalEvent<'_>) {
        match event {
            EvalEvent::NodeEntered { kind } => tracing::trace!(kind, "enter node"),
            EvalEvent::BlockEntered => tracing::trace!("enter block"),
            EvalEvent::BlockLeft => tracing::trace!("leave block"),
            EvalEvent::BlockReturned => tracing::trace!("block returned"),
            EvalEvent::VariableDefined { name, value } => {
                tracing::trace!(name, %value, "define");
            }
            EvalEvent::VariableRead { name, value } => tracing::trace!(name, %value, "read"),
            EvalEvent::VariableWritten { name, value } => {
                tracing::trace!(name, %value, "write");
            }
            EvalEvent::RunCompleted { steps } => tracing::trace!(steps, "run completed"),
        }
    }
}
