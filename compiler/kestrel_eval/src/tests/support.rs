use kestrel_ir::{build, Stmt};

use crate::{
    buffer_handler, natives, EvalResult, Interpreter, LocalScope, Scope, ScopeRef, Value,
};

/// Root frame holding the standard library and the I/O natives.
pub(crate) fn stdlib_scope() -> ScopeRef {
    let root = LocalScope::new(Scope::new());
    for native in natives::stdlib().into_iter().chain(natives::io()) {
        let name = native.name().clone();
        let defined = root.borrow_mut().define(name.clone(), Value::native(native));
        assert!(defined.is_ok(), "native {name} registered twice");
    }
    root
}

/// Interpreter whose `print` output is captured.
pub(crate) fn capturing() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

/// Run `body` as a program in a fresh stdlib scope.
pub(crate) async fn run(interp: &Interpreter, body: impl IntoIterator<Item = Stmt>) -> EvalResult {
    let scope = stdlib_scope();
    interp.run_program(&build::program(body), &scope).await
}

/// Run with a fresh capturing interpreter; returns the result and printed lines.
pub(crate) async fn run_capturing(
    body: impl IntoIterator<Item = Stmt>,
) -> (EvalResult, Vec<String>) {
    let interp = capturing();
    let result = run(&interp, body).await;
    (result, interp.print_handler().lines())
}
