//! Stack growth for deep recursion.
//!
//! Evaluation is a chain of boxed futures, and polling the outermost one polls
//! every nested one on the native stack. Deeply recursive scripts therefore
//! need the same red-zone growth a synchronous tree-walker does, applied at
//! poll time.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Future wrapper whose every poll runs under [`ensure_sufficient_stack`].
pub(crate) struct StackGuarded<'a, T> {
    inner: Pin<Box<dyn Future<Output = T> + 'a>>,
}

impl<'a, T> StackGuarded<'a, T> {
    pub(crate) fn new(inner: Pin<Box<dyn Future<Output = T> + 'a>>) -> Self {
        StackGuarded { inner }
    }
}

impl<T> Future for StackGuarded<'_, T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        let inner = self.inner.as_mut();
        ensure_sufficient_stack(move || inner.poll(cx))
    }
}
