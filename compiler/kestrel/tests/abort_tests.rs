//! Stopping a session from the host.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kestrel::build::*;
use kestrel::{buffer_handler, CallContext, NativeFunction, NativeFuture, Runtime, Value};
use pretty_assertions::assert_eq;

/// Runtime with a `watch` native that registers an abort handler bumping `fired`.
fn watched(fired: &Arc<AtomicUsize>) -> Runtime {
    let fired = Arc::clone(fired);
    let watch = move |_args: Vec<Value>, ctx: CallContext| -> NativeFuture {
        let fired = Arc::clone(&fired);
        ctx.on_abort(move || {
            fired.fetch_add(1, Ordering::SeqCst);
        });
        Box::pin(std::future::ready(Ok(Value::Null)))
    };
    Runtime::builder()
        .print_handler(buffer_handler())
        .native(NativeFunction::new("watch", watch))
        .build()
        .unwrap()
}

#[tokio::test]
async fn abort_is_idempotent() {
    let fired = Arc::new(AtomicUsize::new(0));
    let runtime = watched(&fired);
    let result = runtime
        .run(&program([expr(call("watch", [])), expr(call("watch", []))]))
        .await;
    assert_eq!(result, Ok(Value::Null));
    assert_eq!(runtime.interpreter().control().pending_handlers(), 2);

    assert!(runtime.abort());
    assert!(!runtime.abort());
    assert!(!runtime.abort_handle().abort());
    assert_eq!(fired.load(Ordering::SeqCst), 2);
    assert_eq!(runtime.interpreter().control().pending_handlers(), 0);
}

#[tokio::test]
async fn calls_after_abort_are_skipped() {
    let fired = Arc::new(AtomicUsize::new(0));
    let runtime = watched(&fired);
    runtime.abort();
    let skipped = runtime
        .call_function(&runtime.global("watch").unwrap(), vec![])
        .await;
    assert_eq!(skipped, Ok(Value::Null));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn abort_from_another_thread_wakes_sleep() {
    let runtime = Runtime::builder()
        .print_handler(buffer_handler())
        .build()
        .unwrap();
    let handle = runtime.abort_handle();
    let body = program([
        expr(call("print", [string("before")])),
        expr(call("sleep", [num(86_400_000.0)])),
        expr(call("print", [string("after")])),
    ]);

    let (result, ()) = tokio::join!(runtime.run(&body), async move {
        tokio::task::yield_now().await;
        std::thread::spawn(move || handle.abort()).join().unwrap();
    });
    assert_eq!(result, Ok(Value::Null));
    assert!(runtime.is_aborted());
    assert_eq!(runtime.print_output(), "before\n");
}

#[tokio::test]
async fn aborted_runtime_runs_nothing_more() {
    let runtime = Runtime::builder()
        .print_handler(buffer_handler())
        .build()
        .unwrap();
    runtime.abort();
    let result = runtime
        .run(&program([
            expr(call("print", [string("x")])),
            ret(num(1.0)),
        ]))
        .await;
    assert_eq!(result, Ok(Value::Null));
    assert_eq!(runtime.print_output(), "");
    assert_eq!(runtime.steps(), 0);
}

#[tokio::test]
async fn aborted_readline_binds_nothing() {
    let (queue, _sender) = kestrel::LineQueue::channel();
    let runtime = Runtime::builder().input(queue).build().unwrap();
    let handle = runtime.abort_handle();
    let body = program([def("line", call("readline", [])), ret(var("line"))]);

    let (result, ()) = tokio::join!(runtime.run(&body), async move {
        tokio::task::yield_now().await;
        handle.abort();
    });
    assert_eq!(result, Ok(Value::Null));
    assert_eq!(runtime.global("line"), None);
}
