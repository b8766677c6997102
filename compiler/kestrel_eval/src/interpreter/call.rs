//! Function call protocol and the context handed to natives.

use std::fmt;

use super::{EvalFuture, Interpreter};
use crate::environment::Scope;
use crate::errors::EvalResult;
use crate::input::SharedInputProvider;
use crate::print_handler::SharedPrintHandler;
use crate::session::AbortHandlerId;
use crate::stack::StackGuarded;
use crate::value::{FunctionValue, UserFunction};
use crate::Value;

impl Interpreter {
    /// Call `func` with already-evaluated arguments.
    ///
    /// Natives receive the arguments as given. User functions bind them
    /// positionally in a fresh frame under their closure scope: missing
    /// arguments bind `null`, extras are dropped. A `return` in the body ends
    /// the call with its value; otherwise the call yields the last statement's
    /// value.
    pub fn call<'a>(&'a self, func: &'a Value, args: Vec<Value>) -> EvalFuture<'a> {
        Box::pin(async move {
            if self.control.is_stopped() {
                return Ok(Value::Null);
            }
            match func.as_function()? {
                FunctionValue::Native(native) => {
                    tracing::trace!(function = %native.name(), argc = args.len(), "native call");
                    native.invoke(args, CallContext::new(self.clone())).await
                }
                FunctionValue::User(user) => self.call_user(user, args).await,
            }
        })
    }

    async fn call_user(&self, func: &UserFunction, args: Vec<Value>) -> EvalResult {
        let frame = Scope::child(&func.closure);
        let mut args = args.into_iter();
        for param in func.params.iter() {
            self.define(&frame, param, args.next().unwrap_or(Value::Null))?;
        }
        let flow = StackGuarded::new(self.run_block(&func.body, &frame)).await?;
        Ok(flow.into_value())
    }
}

/// What a native can do besides computing from its arguments.
///
/// The context owns a handle to the session, so it can be moved into the
/// native's future and outlive the call expression.
#[derive(Clone)]
pub struct CallContext {
    interpreter: Interpreter,
}

impl CallContext {
    pub(crate) fn new(interpreter: Interpreter) -> Self {
        CallContext { interpreter }
    }

    /// Call back into the language (user function or native).
    pub async fn call(&self, func: &Value, args: Vec<Value>) -> EvalResult {
        self.interpreter.call(func, args).await
    }

    /// Run `handler` when the session is aborted; immediately if it already was.
    ///
    /// Natives that suspend register a handler that wakes them, and remove it
    /// once they resume normally.
    pub fn on_abort(&self, handler: impl FnOnce() + Send + 'static) -> AbortHandlerId {
        self.interpreter.control.register(Box::new(handler))
    }

    pub fn remove_abort_handler(&self, id: AbortHandlerId) -> bool {
        self.interpreter.control.unregister(id)
    }

    pub fn is_aborted(&self) -> bool {
        self.interpreter.is_aborted()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        self.interpreter.print_handler()
    }

    pub fn input(&self) -> Option<&SharedInputProvider> {
        self.interpreter.input()
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("aborted", &self.is_aborted())
            .field("steps", &self.interpreter.steps())
            .finish()
    }
}
