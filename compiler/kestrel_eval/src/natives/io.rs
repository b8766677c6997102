//! `print` and `readline`.

use tokio::sync::oneshot;

use crate::interpreter::CallContext;
use crate::value::NativeFuture;
use crate::Value;

/// Render every argument and send them, space-separated, to the print sink.
pub(super) fn print(args: Vec<Value>, ctx: CallContext) -> NativeFuture {
    ctx.print_handler().print_values(&args);
    Box::pin(std::future::ready(Ok(Value::Null)))
}

/// `readline(prompt?)`: next line from the input provider as a string.
///
/// Yields `null` when there is no provider, when input is exhausted, or when
/// the session is aborted while waiting.
pub(super) fn readline(args: Vec<Value>, ctx: CallContext) -> NativeFuture {
    Box::pin(async move {
        let prompt = match args.first() {
            Some(value) => value.as_str()?.to_owned(),
            None => String::new(),
        };
        let Some(input) = ctx.input().cloned() else {
            tracing::debug!("readline without an input provider");
            return Ok(Value::Null);
        };

        let (wake, aborted) = oneshot::channel::<()>();
        let handler = ctx.on_abort(move || {
            let _ = wake.send(());
        });
        let line = tokio::select! {
            line = input.read_line(&prompt) => line,
            _ = aborted => None,
        };
        ctx.remove_abort_handler(handler);

        Ok(line.map_or(Value::Null, Value::string))
    })
}
