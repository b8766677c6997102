//! Kestrel - embedding API for the Kestrel scripting language.
//!
//! A host builds a [`Runtime`], which owns one evaluation session and the
//! root scope holding the standard library, then feeds it programs:
//!
//! ```ignore
//! let runtime = Runtime::builder().print_handler(buffer_handler()).build()?;
//! runtime.run(&program).await?;
//! ```
//!
//! The runtime is single-threaded; its futures are `!Send` and belong on a
//! current-thread executor or a `LocalSet`. An [`AbortHandle`] obtained from
//! it is `Send` and can stop the session from any thread.

use std::sync::Once;

mod runtime;

pub use runtime::{Runtime, RuntimeBuilder};

pub use kestrel_eval::{
    buffer_handler, forward_handler, silent_handler, stdout_handler, AbortHandle, CallContext,
    EvalError, EvalErrorKind, EvalEvent, EvalObserver, EvalResult, InputProvider, LineQueue,
    LineSender, NativeFunction, NativeFuture, SharedPrintHandler, TracingObserver, Value,
};
pub use kestrel_ir::{build, Expr, Name, Program, Stmt};

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber for evaluator diagnostics.
///
/// Reads `RUST_LOG` for the filter (e.g. `RUST_LOG=kestrel_eval=trace`).
/// Does nothing when `RUST_LOG` is unset; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
