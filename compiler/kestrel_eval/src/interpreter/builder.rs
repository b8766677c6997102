//! `InterpreterBuilder` for configuring a session.

use std::rc::Rc;
use std::sync::Arc;

use super::Interpreter;
use crate::input::{InputProvider, SharedInputProvider};
use crate::observer::{EvalObserver, SharedObserver};
use crate::print_handler::{silent_handler, SharedPrintHandler};
use crate::session::SessionControl;

/// Builder for [`Interpreter`].
///
/// Defaults: no step ceiling, output discarded, no input provider (so
/// `readline` yields `null`), no observer.
#[derive(Default)]
pub struct InterpreterBuilder {
    max_steps: Option<u64>,
    print_handler: Option<SharedPrintHandler>,
    input: Option<SharedInputProvider>,
    observer: Option<SharedObserver>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `StepLimitExceeded` once more than `limit` nodes have been entered.
    #[must_use]
    pub fn max_steps(mut self, limit: u64) -> Self {
        self.max_steps = Some(limit);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn input(mut self, provider: impl InputProvider + 'static) -> Self {
        self.input = Some(Rc::new(provider));
        self
    }

    /// Share an input provider the host keeps a handle to.
    #[must_use]
    pub fn shared_input(mut self, provider: SharedInputProvider) -> Self {
        self.input = Some(provider);
        self
    }

    #[must_use]
    pub fn observer(mut self, observer: impl EvalObserver + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    #[must_use]
    pub fn shared_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Interpreter {
        tracing::debug!(
            max_steps = ?self.max_steps,
            has_input = self.input.is_some(),
            has_observer = self.observer.is_some(),
            "building interpreter"
        );
        Interpreter {
            control: Arc::new(SessionControl::new(self.max_steps)),
            print_handler: self.print_handler.unwrap_or_else(silent_handler),
            input: self.input,
            observer: self.observer,
        }
    }
}
