//! Dispatch notifications: types and broadcast bus.
//!
//! ## Contents
//! - [`Notification`] one emitted event with payload and sequence number
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publisher**: `Emitter::emit` / `Emitter::emit_with`.
//! - **Consumers**: one subscription worker per registration (see `core/subscription.rs`).

mod bus;
mod notification;

pub(crate) use bus::Bus;
pub use notification::Notification;
