//! Per-session control state: the stop flag, the step counter, and the
//! registry of abort handlers.
//!
//! A session is one `run` (plus any `call_function` calls made against the
//! same interpreter). The control block is the only part of the evaluator
//! that is `Send + Sync`, so hosts can abort from another thread or task
//! through an [`AbortHandle`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

/// Callback run once when the session is aborted.
pub type AbortHandler = Box<dyn FnOnce() + Send + 'static>;

/// Token returned by handler registration, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AbortHandlerId(u64);

/// The step counter went past its ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepLimitExceeded {
    pub limit: u64,
    pub steps: u64,
}

#[derive(Default)]
struct HandlerRegistry {
    next_id: u64,
    // Usually empty or holding the one pending native.
    pending: SmallVec<[(AbortHandlerId, AbortHandler); 2]>,
}

/// Stop flag, step budget, and abort handlers for one session.
pub struct SessionControl {
    stopped: AtomicBool,
    steps: AtomicU64,
    max_steps: Option<u64>,
    handlers: Mutex<HandlerRegistry>,
}

impl SessionControl {
    pub fn new(max_steps: Option<u64>) -> Self {
        SessionControl {
            stopped: AtomicBool::new(false),
            steps: AtomicU64::new(0),
            max_steps,
            handlers: Mutex::new(HandlerRegistry::default()),
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Nodes entered so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }

    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    /// Count one node entry against the budget.
    #[inline]
    pub fn tick(&self) -> Result<(), StepLimitExceeded> {
        let steps = self.steps.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        match self.max_steps {
            Some(limit) if steps > limit => Err(StepLimitExceeded { limit, steps }),
            _ => Ok(()),
        }
    }

    /// Register a handler to run when the session is aborted.
    ///
    /// If the session is already aborted the handler runs immediately, on the
    /// caller's thread, before this returns.
    pub fn register(&self, handler: AbortHandler) -> AbortHandlerId {
        let mut registry = self.handlers.lock();
        let id = AbortHandlerId(registry.next_id);
        registry.next_id += 1;
        if self.is_stopped() {
            drop(registry);
            handler();
            return id;
        }
        registry.pending.push((id, handler));
        id
    }

    /// Drop a pending handler without running it. Returns whether it was pending.
    pub fn unregister(&self, id: AbortHandlerId) -> bool {
        let mut registry = self.handlers.lock();
        match registry.pending.iter().position(|(pending, _)| *pending == id) {
            Some(pos) => {
                registry.pending.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of handlers waiting for an abort.
    pub fn pending_handlers(&self) -> usize {
        self.handlers.lock().pending.len()
    }

    /// Set the stop flag and run every pending handler in registration order.
    ///
    /// Only the first call does anything; it returns `true`. Handlers run
    /// after the registry lock is released, so they may register or
    /// unregister other handlers.
    pub fn abort(&self) -> bool {
        // The flag flips under the lock so a concurrent `register` either
        // lands in the drained list or sees the flag and runs inline.
        let drained = {
            let mut registry = self.handlers.lock();
            if self.stopped.swap(true, Ordering::AcqRel) {
                return false;
            }
            std::mem::take(&mut registry.pending)
        };
        tracing::debug!(handlers = drained.len(), "session aborted");
        for (_, handler) in drained {
            handler();
        }
        true
    }
}

impl Default for SessionControl {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Shared ownership of a session's control block.
pub type SharedControl = Arc<SessionControl>;

/// Cloneable, thread-safe handle for aborting a session from outside.
#[derive(Clone)]
pub struct AbortHandle(SharedControl);

impl AbortHandle {
    pub(crate) fn new(control: SharedControl) -> Self {
        AbortHandle(control)
    }

    /// Abort the session. Returns `false` if it was already aborted.
    pub fn abort(&self) -> bool {
        self.0.abort()
    }

    pub fn is_aborted(&self) -> bool {
        self.0.is_stopped()
    }
}

impl std::fmt::Debug for AbortHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbortHandle")
            .field("aborted", &self.is_aborted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> AbortHandler) {
        let hits = Arc::new(AtomicUsize::new(0));
        let make = {
            let hits = Arc::clone(&hits);
            move || {
                let hits = Arc::clone(&hits);
                Box::new(move || {
                    hits.fetch_add(1, Ordering::SeqCst);
                }) as AbortHandler
            }
        };
        (hits, make)
    }

    #[test]
    fn unlimited_budget_never_trips() {
        let control = SessionControl::new(None);
        for _ in 0..10_000 {
            assert_eq!(control.tick(), Ok(()));
        }
        assert_eq!(control.steps(), 10_000);
    }

    #[test]
    fn budget_trips_on_the_step_after_the_limit() {
        let control = SessionControl::new(Some(3));
        assert_eq!(control.tick(), Ok(()));
        assert_eq!(control.tick(), Ok(()));
        assert_eq!(control.tick(), Ok(()));
        assert_eq!(
            control.tick(),
            Err(StepLimitExceeded { limit: 3, steps: 4 })
        );
    }

    #[test]
    fn abort_runs_pending_handlers_once_in_order() {
        let control = SessionControl::default();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in 0..3 {
            let order = Arc::clone(&order);
            control.register(Box::new(move || order.lock().push(tag)));
        }

        assert!(control.abort());
        assert!(!control.abort());
        assert!(control.is_stopped());
        assert_eq!(*order.lock(), vec![0, 1, 2]);
        assert_eq!(control.pending_handlers(), 0);
    }

    #[test]
    fn unregistered_handler_does_not_run() {
        let control = SessionControl::default();
        let (hits, make) = counter();
        let id = control.register(make());
        control.register(make());

        assert!(control.unregister(id));
        assert!(!control.unregister(id));
        control.abort();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handler_registered_after_abort_runs_immediately() {
        let control = SessionControl::default();
        let (hits, make) = counter();
        control.abort();

        control.register(make());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(control.pending_handlers(), 0);
    }

    #[test]
    fn handler_may_register_during_abort() {
        let control = Arc::new(SessionControl::default());
        let (hits, make) = counter();
        let inner = make();
        let reentrant = Arc::clone(&control);
        control.register(Box::new(move || {
            reentrant.register(inner);
        }));

        control.abort();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handle_aborts_from_another_thread() {
        let control = Arc::new(SessionControl::default());
        let handle = AbortHandle::new(Arc::clone(&control));
        let joined = std::thread::spawn(move || handle.abort()).join();
        assert!(matches!(joined, Ok(true)));
        assert!(control.is_stopped());
    }
}
