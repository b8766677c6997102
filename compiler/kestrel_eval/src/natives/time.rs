//! `sleep`.

use std::time::Duration;

use tokio::sync::oneshot;

use crate::interpreter::CallContext;
use crate::value::NativeFuture;
use crate::Value;

use super::check_arity;

/// `sleep(ms)`: suspend for `ms` milliseconds. An abort ends the wait early.
///
/// Needs a tokio runtime with the time driver enabled.
pub(super) fn sleep(args: Vec<Value>, ctx: CallContext) -> NativeFuture {
    Box::pin(async move {
        check_arity("sleep", &args, 1)?;
        let millis = args[0].as_num()?;
        let duration =
            Duration::try_from_secs_f64(millis.max(0.0) / 1000.0).unwrap_or(Duration::MAX);

        let (wake, aborted) = oneshot::channel::<()>();
        let handler = ctx.on_abort(move || {
            let _ = wake.send(());
        });
        tokio::select! {
            () = tokio::time::sleep(duration) => {}
            _ = aborted => {
                tracing::debug!("sleep interrupted by abort");
            }
        }
        ctx.remove_abort_handler(handler);
        Ok(Value::Null)
    })
}
