//! # herald
//!
//! **Herald** is an in-process publish/subscribe registry for async Rust.
//!
//! Callers register listeners against string event identifiers and later emit an
//! identifier to invoke every listener currently registered for it. A listener can
//! be detached from one event without affecting its registration on another, and
//! the total number of listeners is capped.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Listener L1 │   │  Listener L2 │   │  Listener L3 │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼ on("a")          ▼ on("a")          ▼ on("b")
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Emitter                                                          │
//! │  - Registry      event → { active, removed }                      │
//! │  - Bus           single broadcast channel (dispatch backbone)     │
//! │  - counters      listener_count ≤ max_listeners, event_count      │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   subscription(a,L1) subscription(a,L2) subscription(b,L3)
//!   filter event == a  filter event == a  filter event == b
//!   skip if removed    skip if removed    skip if removed
//!        ▼                  ▼                  ▼
//!   L1.on_event()      L2.on_event()      L3.on_event()
//! ```
//!
//! ### Lifecycle
//! ```text
//! Emitter::new ──► on / emit / remove_listener ... ──► destroy ──► closed (terminal)
//!
//! emit(event):
//!   ├─► closed?            ─► Err(Closed), event_count unchanged
//!   ├─► seq += 1, publish  ─► every subscription receives it (per-subscription FIFO)
//!   └─► event_count += 1
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                          |
//! |-------------------|-------------------------------------------------------------|---------------------------------------------|
//! | **Emitter**       | Register, emit, detach, destroy.                            | [`Emitter`], [`EmitterBuilder`]             |
//! | **Listeners**     | Async handlers with stable identity.                        | [`Listen`], [`ListenerFn`], [`ListenerId`]  |
//! | **Options**       | Extra arguments, error/done hooks, cancel on error.         | [`RegisterOptions`]                         |
//! | **Errors**        | Typed errors for callers and listener failures.             | [`EmitterError`], [`ListenerError`]         |
//! | **Configuration** | Ceiling, channel capacity, repeated-registration behavior.  | [`EmitterConfig`], [`RegistrationMode`]     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` listener _(demo/reference only)_.
//!
//! Diagnostics are emitted through [`tracing`]; install any subscriber to see them.
//!
//! ## Example
//! ```rust
//! use herald::{Emitter, ListenerError, ListenerFn, ListenerRef, RegisterOptions};
//! use serde_json::json;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter = Emitter::new(50);
//!
//!     let audit: ListenerRef = ListenerFn::arc("audit", |args| async move {
//!         // args == [5, "saved"]
//!         println!("audit: {args:?}");
//!         Ok::<_, ListenerError>(())
//!     });
//!
//!     let opts = RegisterOptions::new().with_args(vec![json!(5)]);
//!     emitter.on_with("saved", audit.clone(), opts).await?;
//!
//!     emitter.emit("saved").await?;
//!     emitter.settle().await;
//!     assert_eq!(emitter.event_count(), 1);
//!
//!     emitter.remove_listener("saved", &audit).await?;
//!     emitter.shutdown().await;
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use config::{EmitterConfig, RegistrationMode, DEFAULT_BUS_CAPACITY, DEFAULT_MAX_LISTENERS};
pub use crate::core::{Emitter, EmitterBuilder};
pub use error::{EmitterError, ListenerError};
pub use events::Notification;
pub use listeners::{
    DoneHook, ErrorHook, Listen, ListenerFn, ListenerId, ListenerRef, RegisterOptions,
};

// Optional: expose a simple built-in logger listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
