//! # Dispatch subscription: one worker per registration.
//!
//! Each successful registration spawns a worker that owns its own
//! `broadcast::Receiver` on the emitter's [`Bus`](crate::events::Bus) and filters
//! by event identifier.
//!
//! ## Worker loop
//! ```text
//! loop {
//!   ├─► closed token        → exit
//!   ├─► recv() = Closed     → exit
//!   ├─► recv() = Lagged(n)  → report ListenerError::Lagged (never cancels)
//!   └─► recv() = Ok(n):
//!         ├─ n.event != event             → skip
//!         ├─ listener in removed(event)   → skip
//!         └─ listener.on_event([...extra, payload])
//!               ├─ Ok             → continue
//!               ├─ Err / panic    → report; cancel_on_error → exit
//!   after every notification: progress.advance(n.seq) + notify settle() waiters
//! }
//! on exit: on_done(), then progress.finish()
//! ```
//!
//! ## Rules
//! - Per-subscription FIFO; no ordering across subscriptions.
//! - The registry lock is never held while the listener runs, so listeners may
//!   call back into the emitter. `settle` and `shutdown` skip the worker they are
//!   called from, since it cannot make progress until the listener returns.
//! - The worker only holds a weak reference to the emitter state: dropping the
//!   last emitter handle closes the bus and ends every worker.
//! - Panics are caught with `catch_unwind` and reported as `ListenerError::Panicked`.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a listener panics while holding a lock of its own.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use futures::FutureExt;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::emitter::Shared;
use crate::error::ListenerError;
use crate::events::Notification;
use crate::listeners::{ListenerId, ListenerRef, RegisterOptions};

/// How far a worker got through the notification stream.
#[derive(Debug)]
pub(crate) struct Progress {
    processed: AtomicU64,
    finished: AtomicBool,
}

impl Progress {
    fn new(start: u64) -> Self {
        Self {
            processed: AtomicU64::new(start),
            finished: AtomicBool::new(false),
        }
    }

    fn advance(&self, seq: u64) {
        self.processed.fetch_max(seq, Ordering::AcqRel);
    }

    fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// True once every notification up to `seq` was handled (or the worker is gone).
    pub(crate) fn caught_up(&self, seq: u64) -> bool {
        self.is_finished() || self.processed.load(Ordering::Acquire) >= seq
    }
}

/// Handle to a running subscription worker.
pub(crate) struct Worker {
    pub(crate) event: Arc<str>,
    pub(crate) listener: ListenerId,
    pub(crate) progress: Arc<Progress>,
    pub(crate) join: JoinHandle<()>,
}

impl Worker {
    pub(crate) fn is_live(&self) -> bool {
        !self.progress.is_finished()
    }

    pub(crate) fn matches(&self, event: &str, listener: ListenerId) -> bool {
        &*self.event == event && self.listener == listener
    }

    /// True when called from inside this worker's own task.
    pub(crate) fn is_current(&self) -> bool {
        tokio::task::try_id() == Some(self.join.id())
    }
}

/// Everything a worker needs besides its receiver.
pub(crate) struct Subscription {
    pub(crate) event: Arc<str>,
    pub(crate) listener: ListenerRef,
    pub(crate) options: RegisterOptions,
    pub(crate) shared: Weak<Shared>,
    pub(crate) token: CancellationToken,
    pub(crate) notify: Arc<Notify>,
}

impl Subscription {
    /// Spawns the worker. `start` is the last sequence published before `rx` was created.
    pub(crate) fn spawn(self, rx: broadcast::Receiver<Notification>, start: u64) -> Worker {
        let progress = Arc::new(Progress::new(start));
        let event = Arc::clone(&self.event);
        let listener = ListenerId::of(&self.listener);
        let progress_for_worker = Arc::clone(&progress);

        let join = tokio::spawn(async move { self.run(rx, progress_for_worker).await });

        Worker {
            event,
            listener,
            progress,
            join,
        }
    }

    async fn run(self, mut rx: broadcast::Receiver<Notification>, progress: Arc<Progress>) {
        loop {
            let msg = tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                msg = rx.recv() => msg,
            };

            match msg {
                Ok(n) => {
                    let keep_going = self.handle(&n).await;
                    progress.advance(n.seq);
                    self.notify.notify_waiters();
                    if !keep_going {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    self.report(ListenerError::Lagged { skipped });
                }
                Err(RecvError::Closed) => break,
            }
        }

        debug!(event = %self.event, listener = self.listener.name(), "subscription ended");
        if let Some(done) = &self.options.on_done {
            done();
        }
        progress.finish();
        self.notify.notify_waiters();
    }

    /// Handles one notification. Returns `false` when the subscription must end.
    async fn handle(&self, n: &Notification) -> bool {
        if n.event() != &*self.event {
            return true;
        }

        let id = ListenerId::of(&self.listener);
        let eligible = match self.shared.upgrade() {
            Some(shared) => !shared.state.read().await.registry.is_removed(&self.event, id),
            None => return false,
        };
        if !eligible {
            return true;
        }

        match self.deliver(n).await {
            Ok(()) => true,
            Err(err) => {
                let fatal = err.is_fatal();
                self.report(err);
                !(fatal && self.options.cancel_on_error)
            }
        }
    }

    /// Invokes the listener with `[...extra, payload]`, converting panics into errors.
    async fn deliver(&self, n: &Notification) -> Result<(), ListenerError> {
        let args = n.args_with(&self.options.extra_args);
        let fut = self.listener.on_event(args);

        match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
            Ok(res) => res,
            Err(panic_err) => {
                let any = &*panic_err;
                let info = if let Some(msg) = any.downcast_ref::<&'static str>() {
                    (*msg).to_string()
                } else if let Some(msg) = any.downcast_ref::<String>() {
                    msg.clone()
                } else {
                    "unknown panic".to_string()
                };
                Err(ListenerError::Panicked { info })
            }
        }
    }

    fn report(&self, err: ListenerError) {
        match &self.options.on_error {
            Some(hook) => hook(&err),
            None => warn!(
                event = %self.event,
                listener = self.listener.name(),
                label = err.as_label(),
                "{err}"
            ),
        }
    }
}
