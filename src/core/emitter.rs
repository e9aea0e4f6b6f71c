//! # Emitter: listener registry, removal ledger and broadcast dispatch.
//!
//! The [`Emitter`] owns one dispatch [`Bus`], the listener [`Registry`] with its
//! removal ledger, and the listener/emit counters.
//!
//! ## High-level architecture
//! ```text
//! on(event, L) ──► capacity check ──► Registry[event].active += L
//!                                 └─► spawn subscription(event, L) on Bus
//!
//! emit(event) ──► seq += 1 ──► Bus.publish(Notification) ──► event_count += 1
//!                                 │
//!                                 ├──► subscription(a, L1): match? not removed? ──► L1.on_event()
//!                                 ├──► subscription(a, L2): match? not removed? ──► L2.on_event()
//!                                 └──► subscription(b, L1): no match
//!
//! remove_listener(event, L) ──► Registry[event]: active -= L, removed += L
//!                               (subscription keeps running, filters L out)
//!
//! destroy() ──► drop Bus + cancel token ──► every subscription ends ──► on_done()
//! ```
//!
//! ## Rules
//! - One `RwLock` guards the registry, the bus and the sequence counter; operations
//!   on one emitter never interleave inside it. Separate emitters share nothing.
//! - `emit` returns once the notification is published, not once listeners ran.
//!   Use [`Emitter::settle`] to wait for delivery.
//! - `listener_count` is decremented on detach and never reconciled against the registry.
//! - Destroy is one-way and idempotent. A notification published right before
//!   `destroy` may or may not reach its listeners.
//!
//! ## Example
//! ```rust
//! use herald::{Emitter, ListenerError, ListenerFn, ListenerRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter = Emitter::new(10);
//!
//!     let greet: ListenerRef = ListenerFn::arc("greet", |args| async move {
//!         println!("got {args:?}");
//!         Ok::<_, ListenerError>(())
//!     });
//!
//!     emitter.on("ready", greet.clone()).await?;
//!     emitter.emit("ready").await?;
//!     emitter.settle().await;
//!
//!     emitter.remove_listener("ready", &greet).await?;
//!     emitter.destroy().await;
//!     assert!(emitter.emit("ready").await.is_err());
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Notify, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{EmitterConfig, RegistrationMode};
use crate::core::builder::EmitterBuilder;
use crate::core::registry::Registry;
use crate::core::subscription::{Subscription, Worker};
use crate::error::EmitterError;
use crate::events::{Bus, Notification};
use crate::listeners::{ListenerId, ListenerRef, RegisterOptions};

/// State guarded by the emitter lock.
pub(crate) struct State {
    pub(crate) registry: Registry,
    /// `None` once destroyed.
    bus: Option<Bus>,
    /// Sequence number of the last published notification.
    seq: u64,
    workers: Vec<Worker>,
}

/// Shared core behind every [`Emitter`] clone.
pub(crate) struct Shared {
    pub(crate) state: RwLock<State>,
    listener_count: AtomicUsize,
    event_count: AtomicU64,
    max_listeners: AtomicUsize,
    mode: RegistrationMode,
    /// Cancelled exactly once, by `destroy`.
    token: CancellationToken,
    /// Woken whenever a subscription makes progress; `settle` waits on it.
    notify: Arc<Notify>,
}

/// In-process publish/subscribe registry.
///
/// Cheap to clone: clones share the same registry, bus and counters.
/// Registration spawns tokio tasks, so it must run inside a tokio runtime.
#[derive(Clone)]
pub struct Emitter {
    shared: Arc<Shared>,
}

impl Emitter {
    /// Creates an emitter with the given listener ceiling and default settings otherwise.
    pub fn new(max_listeners: usize) -> Self {
        Self::with_config(EmitterConfig {
            max_listeners,
            ..EmitterConfig::default()
        })
    }

    /// Creates an emitter from a full configuration.
    pub fn with_config(cfg: EmitterConfig) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let shared = Shared {
            state: RwLock::new(State {
                registry: Registry::default(),
                bus: Some(bus),
                seq: 0,
                workers: Vec::new(),
            }),
            listener_count: AtomicUsize::new(0),
            event_count: AtomicU64::new(0),
            max_listeners: AtomicUsize::new(cfg.max_listeners),
            mode: cfg.mode,
            token: CancellationToken::new(),
            notify: Arc::new(Notify::new()),
        };
        Self {
            shared: Arc::new(shared),
        }
    }

    /// Returns a builder starting from [`EmitterConfig::default`].
    pub fn builder() -> EmitterBuilder {
        EmitterBuilder::new()
    }

    /// Registers `listener` for `event` with default options.
    ///
    /// See [`on_with`](Self::on_with).
    pub async fn on(&self, event: &str, listener: ListenerRef) -> Result<ListenerId, EmitterError> {
        self.on_with(event, listener, RegisterOptions::default()).await
    }

    /// Registers `listener` for `event`.
    ///
    /// ### Errors
    /// - [`EmitterError::EmptyEvent`] if `event` is empty.
    /// - [`EmitterError::Closed`] if the emitter was destroyed; nothing is registered.
    /// - [`EmitterError::CapacityExceeded`] if the registration would push
    ///   `listener_count` past `max_listeners`; state is left unchanged.
    ///
    /// ### Repeated registration
    /// Governed by [`RegistrationMode`]. In `Unique` mode an already active pair is a
    /// no-op, and a detached pair is re-activated on its existing subscription.
    pub async fn on_with(
        &self,
        event: &str,
        listener: ListenerRef,
        options: RegisterOptions,
    ) -> Result<ListenerId, EmitterError> {
        if event.is_empty() {
            return Err(EmitterError::EmptyEvent);
        }
        let id = ListenerId::of(&listener);

        let mut guard = self.shared.state.write().await;
        let state = &mut *guard;
        let Some(bus) = state.bus.as_ref() else {
            debug!(event, listener = %id, "registration on closed emitter ignored");
            return Err(EmitterError::Closed);
        };

        state.workers.retain(Worker::is_live);

        let unique = self.shared.mode == RegistrationMode::Unique;
        let active = state.registry.get(event).is_some_and(|e| e.is_active(id));
        let subscribed = unique && state.workers.iter().any(|w| w.matches(event, id));
        if active && subscribed {
            return Ok(id);
        }

        let counts = !unique || !active;
        if counts {
            let current = self.shared.listener_count.load(Ordering::Acquire);
            let limit = self.shared.max_listeners.load(Ordering::Acquire);
            if current >= limit {
                debug!(event, listener = %id, current, limit, "registration rejected");
                return Err(EmitterError::CapacityExceeded { limit, current });
            }
        }

        state.registry.activate(event, &listener);
        if counts {
            self.shared.listener_count.fetch_add(1, Ordering::AcqRel);
        }

        if !subscribed {
            let name = listener.name().to_owned();
            let sub = Subscription {
                event: Arc::from(event),
                listener,
                options,
                shared: Arc::downgrade(&self.shared),
                token: self.shared.token.clone(),
                notify: Arc::clone(&self.shared.notify),
            };
            let worker = sub.spawn(bus.subscribe(), state.seq);
            state.workers.push(worker);
            debug!(event, listener = %id, name = %name, "listener registered");
        } else {
            debug!(event, listener = %id, "listener re-activated");
        }

        Ok(id)
    }

    /// Publishes `event` with the identifier itself as payload.
    ///
    /// ### Errors
    /// [`EmitterError::Closed`] after [`destroy`](Self::destroy); `event_count` is not incremented.
    pub async fn emit(&self, event: &str) -> Result<(), EmitterError> {
        self.publish(event, None).await
    }

    /// Publishes `event` with an explicit payload.
    pub async fn emit_with(&self, event: &str, payload: Value) -> Result<(), EmitterError> {
        self.publish(event, Some(payload)).await
    }

    async fn publish(&self, event: &str, payload: Option<Value>) -> Result<(), EmitterError> {
        let mut guard = self.shared.state.write().await;
        let state = &mut *guard;
        let Some(bus) = state.bus.as_ref() else {
            warn!(event, "emit on closed emitter");
            return Err(EmitterError::Closed);
        };

        state.seq += 1;
        let mut n = Notification::new(state.seq, event);
        if let Some(payload) = payload {
            n = n.with_payload(payload);
        }
        let receivers = bus.publish(n);
        self.shared.event_count.fetch_add(1, Ordering::AcqRel);

        debug!(event, seq = state.seq, receivers, "emitted");
        Ok(())
    }

    /// Detaches `listener` from `event`.
    ///
    /// Moves the identity from the active set to the removal ledger of `event` and
    /// decrements `listener_count` by one. Registrations under other events are untouched.
    /// Detaching a listener that is not active still records it in the ledger.
    ///
    /// ### Errors
    /// [`EmitterError::UnknownEvent`] if `event` was never registered.
    pub async fn remove_listener(
        &self,
        event: &str,
        listener: impl Into<ListenerId>,
    ) -> Result<(), EmitterError> {
        self.remove_listeners(event, [listener]).await
    }

    /// Batch form of [`remove_listener`](Self::remove_listener).
    ///
    /// `listener_count` is decremented by the number of distinct identities given.
    pub async fn remove_listeners<I>(&self, event: &str, listeners: I) -> Result<(), EmitterError>
    where
        I: IntoIterator,
        I::Item: Into<ListenerId>,
    {
        let ids: HashSet<ListenerId> = listeners.into_iter().map(Into::into).collect();

        let mut state = self.shared.state.write().await;
        let entry = state
            .registry
            .get_mut(event)
            .ok_or_else(|| EmitterError::UnknownEvent {
                event: event.to_owned(),
            })?;

        for id in &ids {
            entry.detach(*id);
        }
        self.decrement(ids.len());

        debug!(event, detached = ids.len(), "listeners detached");
        Ok(())
    }

    /// Detaches every active listener of `event`; returns how many were moved.
    ///
    /// The event entry itself survives with an empty active set.
    /// An unknown event is a no-op returning 0.
    pub async fn remove_all_listeners(&self, event: &str) -> usize {
        let mut state = self.shared.state.write().await;
        let moved = match state.registry.get_mut(event) {
            Some(entry) => entry.detach_all(),
            None => 0,
        };
        self.decrement(moved);

        debug!(event, detached = moved, "all listeners detached");
        moved
    }

    /// Permanently closes the emitter.
    ///
    /// Afterwards `emit` and `on` fail with [`EmitterError::Closed`]. Subscriptions
    /// end in the background and run their `on_done` hooks. Calling it again is a no-op.
    pub async fn destroy(&self) {
        let mut state = self.shared.state.write().await;
        if state.bus.take().is_some() {
            self.shared.token.cancel();
            debug!(subscriptions = state.workers.len(), "emitter destroyed");
        }
    }

    /// Destroys the emitter and waits until every subscription worker has exited.
    ///
    /// Called from inside a listener, the listener's own worker is not waited for;
    /// it exits once the listener returns.
    pub async fn shutdown(&self) {
        self.destroy().await;

        let workers = {
            let mut state = self.shared.state.write().await;
            std::mem::take(&mut state.workers)
        };
        for w in workers {
            if w.is_current() {
                continue;
            }
            let _ = w.join.await;
        }
    }

    /// Waits until every live subscription has handled every notification published so far.
    ///
    /// Notifications emitted by listeners while waiting are waited for as well.
    /// Called from inside a listener, that listener's own subscription is skipped.
    /// Two listeners settling the same emitter wait on each other and never return.
    pub async fn settle(&self) {
        loop {
            let notified = self.shared.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_settled().await {
                return;
            }
            notified.await;
        }
    }

    async fn is_settled(&self) -> bool {
        let state = self.shared.state.read().await;
        let target = state.seq;
        state
            .workers
            .iter()
            .filter(|w| !w.is_current())
            .all(|w| w.progress.caught_up(target))
    }

    /// True once [`destroy`](Self::destroy) was called.
    pub fn is_closed(&self) -> bool {
        self.shared.token.is_cancelled()
    }

    /// Number of successful emits.
    pub fn event_count(&self) -> u64 {
        self.shared.event_count.load(Ordering::Acquire)
    }

    /// Number of listeners currently counted as registered, across all events.
    pub fn listener_count(&self) -> usize {
        self.shared.listener_count.load(Ordering::Acquire)
    }

    /// Current listener ceiling.
    pub fn max_listeners(&self) -> usize {
        self.shared.max_listeners.load(Ordering::Acquire)
    }

    /// Changes the listener ceiling. Checked at registration only; never evicts.
    pub fn set_max_listeners(&self, max: usize) {
        self.shared.max_listeners.store(max, Ordering::Release);
    }

    /// Overwrites both counters. Intended for tests and state seeding.
    pub fn reset_counters(&self, listener_count: usize, event_count: u64) {
        self.shared
            .listener_count
            .store(listener_count, Ordering::Release);
        self.shared.event_count.store(event_count, Ordering::Release);
    }

    /// Active listeners of `event`, sorted. Empty for unknown events.
    pub async fn listeners(&self, event: &str) -> Vec<ListenerId> {
        let state = self.shared.state.read().await;
        state
            .registry
            .get(event)
            .map(|e| e.active_sorted())
            .unwrap_or_default()
    }

    /// True if `listener` sits in the removal ledger of `event`.
    pub async fn is_removed(&self, event: &str, listener: impl Into<ListenerId>) -> bool {
        let state = self.shared.state.read().await;
        state.registry.is_removed(event, listener.into())
    }

    /// Sorted identifiers of every event that was ever registered.
    pub async fn event_names(&self) -> Vec<String> {
        self.shared.state.read().await.registry.names()
    }

    /// Number of dispatch subscriptions still running.
    pub async fn subscription_count(&self) -> usize {
        let state = self.shared.state.read().await;
        state.workers.iter().filter(|w| w.is_live()).count()
    }

    fn decrement(&self, n: usize) {
        let _ = self
            .shared
            .listener_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| {
                Some(c.saturating_sub(n))
            });
    }
}

impl Default for Emitter {
    /// An emitter with [`EmitterConfig::default`] (50 listeners).
    fn default() -> Self {
        Self::with_config(EmitterConfig::default())
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listener_count", &self.listener_count())
            .field("event_count", &self.event_count())
            .field("max_listeners", &self.max_listeners())
            .field("closed", &self.is_closed())
            .finish()
    }
}
