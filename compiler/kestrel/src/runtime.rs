//! `Runtime`: one session plus its root scope.

use kestrel_eval::errors::duplicate_declaration;
use kestrel_eval::{
    natives, AbortHandle, EvalError, EvalObserver, EvalResult, InputProvider, Interpreter,
    InterpreterBuilder, LocalScope, NativeFunction, Scope, ScopeRef, SharedInputProvider,
    SharedObserver, SharedPrintHandler, Value,
};
use kestrel_ir::{Name, Program};

/// Builder for [`Runtime`].
///
/// The root scope is filled in a fixed order: `print` / `readline`, then the
/// standard library, then host globals. A name bound twice fails the build.
pub struct RuntimeBuilder {
    interpreter: InterpreterBuilder,
    stdlib: bool,
    globals: Vec<(Name, Value)>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        RuntimeBuilder {
            interpreter: Interpreter::builder(),
            stdlib: true,
            globals: Vec::new(),
        }
    }

    #[must_use]
    pub fn max_steps(mut self, limit: u64) -> Self {
        self.interpreter = self.interpreter.max_steps(limit);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.interpreter = self.interpreter.print_handler(handler);
        self
    }

    #[must_use]
    pub fn input(mut self, provider: impl InputProvider + 'static) -> Self {
        self.interpreter = self.interpreter.input(provider);
        self
    }

    #[must_use]
    pub fn shared_input(mut self, provider: SharedInputProvider) -> Self {
        self.interpreter = self.interpreter.shared_input(provider);
        self
    }

    #[must_use]
    pub fn observer(mut self, observer: impl EvalObserver + 'static) -> Self {
        self.interpreter = self.interpreter.observer(observer);
        self
    }

    #[must_use]
    pub fn shared_observer(mut self, observer: SharedObserver) -> Self {
        self.interpreter = self.interpreter.shared_observer(observer);
        self
    }

    /// Bind `name` in the root scope.
    #[must_use]
    pub fn global(mut self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
        self.globals.push((name.into(), value.into()));
        self
    }

    /// Bind a host native under its own name.
    #[must_use]
    pub fn native(mut self, native: NativeFunction) -> Self {
        let name = native.name().clone();
        self.globals.push((name, Value::native(native)));
        self
    }

    /// Leave out everything but `print` and `readline`.
    #[must_use]
    pub fn without_stdlib(mut self) -> Self {
        self.stdlib = false;
        self
    }

    pub fn build(self) -> Result<Runtime, EvalError> {
        let root = LocalScope::new(Scope::new());
        let library = if self.stdlib {
            natives::stdlib()
        } else {
            Vec::new()
        };
        let builtins = natives::io()
            .into_iter()
            .chain(library)
            .map(|native| (native.name().clone(), Value::native(native)));

        for (name, value) in builtins.chain(self.globals) {
            if root.borrow_mut().define(name.clone(), value).is_err() {
                return Err(duplicate_declaration(name));
            }
        }

        let interpreter = self.interpreter.build();
        tracing::debug!(globals = root.borrow().local_names().len(), "runtime ready");
        Ok(Runtime { interpreter, root })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A configured evaluation session and the root scope its programs share.
///
/// Top-level `def`s of one `run` stay visible to later runs on the same
/// runtime. Cloning is cheap and shares both the session and the scope.
#[derive(Clone)]
pub struct Runtime {
    interpreter: Interpreter,
    root: ScopeRef,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Runtime with the full standard library and default session settings.
    pub fn new() -> Result<Self, EvalError> {
        RuntimeBuilder::new().build()
    }

    /// Execute `program` in the root scope.
    pub async fn run(&self, program: &Program) -> EvalResult {
        self.interpreter.run_program(program, &self.root).await
    }

    /// Execute `program` to completion on a fresh current-thread executor.
    ///
    /// For hosts without an async runtime of their own. Fails only if the
    /// executor cannot be created.
    pub fn run_blocking(&self, program: &Program) -> std::io::Result<EvalResult> {
        let executor = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        Ok(executor.block_on(self.run(program)))
    }

    /// Call a function value, typically one a program returned or defined.
    pub async fn call_function(&self, func: &Value, args: Vec<Value>) -> EvalResult {
        self.interpreter.call_function(func, args).await
    }

    /// Stop the session. Returns `false` if it was already stopped.
    pub fn abort(&self) -> bool {
        self.interpreter.abort()
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.interpreter.abort_handle()
    }

    pub fn is_aborted(&self) -> bool {
        self.interpreter.is_aborted()
    }

    pub fn steps(&self) -> u64 {
        self.interpreter.steps()
    }

    /// Bind `name` in the root scope of an already-built runtime.
    pub fn define_global(
        &self,
        name: impl Into<Name>,
        value: impl Into<Value>,
    ) -> Result<(), EvalError> {
        let name = name.into();
        self.root
            .borrow_mut()
            .define(name.clone(), value.into())
            .map_err(|_| duplicate_declaration(name))
    }

    /// Current value of a root-scope binding.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.root.borrow().lookup(name)
    }

    pub fn root_scope(&self) -> &ScopeRef {
        &self.root
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Captured output, when the print sink is a buffer.
    pub fn print_output(&self) -> String {
        self.interpreter.get_print_output()
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("steps", &self.steps())
            .field("aborted", &self.is_aborted())
            .field("root", &self.root)
            .finish()
    }
}
