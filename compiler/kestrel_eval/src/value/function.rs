//! Function values: host-provided natives and closures created by function literals.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use kestrel_ir::{Name, StmtList};

use crate::environment::ScopeRef;
use crate::errors::EvalResult;
use crate::interpreter::CallContext;

use super::Value;

/// Future returned by a native. Owns everything it touches.
pub type NativeFuture = Pin<Box<dyn Future<Output = EvalResult>>>;

/// Signature of a native implementation.
pub type NativeFn = dyn Fn(Vec<Value>, CallContext) -> NativeFuture;

/// A callable value.
#[derive(Clone)]
pub enum FunctionValue {
    Native(NativeFunction),
    User(UserFunction),
}

impl FunctionValue {
    /// Identity comparison. Two closures are equal only if they come from the
    /// same literal evaluation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        match (a, b) {
            (FunctionValue::Native(a), FunctionValue::Native(b)) => Rc::ptr_eq(&a.func, &b.func),
            (FunctionValue::User(a), FunctionValue::User(b)) => {
                Arc::ptr_eq(&a.body, &b.body) && a.closure.ptr_eq(&b.closure)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Native(native) => write!(f, "Native({})", native.name),
            FunctionValue::User(user) => write!(f, "User({:?})", user.params),
        }
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Native(native) => write!(f, "<native {}>", native.name),
            FunctionValue::User(user) => {
                f.write_str("<fn(")?;
                for (i, param) in user.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(param)?;
                }
                f.write_str(")>")
            }
        }
    }
}

/// A host-provided function.
///
/// Natives receive their evaluated arguments by value plus a [`CallContext`]
/// through which they can call back into the language, register abort
/// handlers, or reach the session's print and input sinks.
#[derive(Clone)]
pub struct NativeFunction {
    name: Name,
    func: Rc<NativeFn>,
}

impl NativeFunction {
    /// Wrap an asynchronous implementation.
    pub fn new(
        name: impl Into<Name>,
        func: impl Fn(Vec<Value>, CallContext) -> NativeFuture + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            func: Rc::new(func),
        }
    }

    /// Wrap a pure synchronous implementation.
    pub fn sync(name: impl Into<Name>, func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        Self::new(name, move |args, _ctx| {
            Box::pin(std::future::ready(func(&args))) as NativeFuture
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub(crate) fn invoke(&self, args: Vec<Value>, ctx: CallContext) -> NativeFuture {
        (self.func)(args, ctx)
    }
}

impl From<NativeFunction> for Value {
    fn from(native: NativeFunction) -> Self {
        Value::native(native)
    }
}

/// A closure: parameters, body, and the scope the literal was evaluated in.
#[derive(Clone)]
pub struct UserFunction {
    pub params: Arc<[Name]>,
    pub body: StmtList,
    pub closure: ScopeRef,
}
