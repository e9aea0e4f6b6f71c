//! # Listeners: what the emitter invokes.
//!
//! ## Contents
//! - [`Listen`] async handler trait, [`ListenerRef`] shared handle, [`ListenerId`] identity
//! - [`ListenerFn`] closure-backed listener
//! - [`RegisterOptions`] extra arguments and subscription hooks
//! - `LogWriter` built-in printer (feature `logging`)
//!
//! ## Implementing custom listeners
//! ```no_run
//! use async_trait::async_trait;
//! use herald::{Listen, ListenerError};
//! use serde_json::Value;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! #[derive(Default)]
//! struct Counter(AtomicU64);
//!
//! #[async_trait]
//! impl Listen for Counter {
//!     async fn on_event(&self, _args: Vec<Value>) -> Result<(), ListenerError> {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     }
//! }
//! ```

mod listener;
mod listener_fn;
#[cfg(feature = "logging")]
mod log;
mod options;

pub use listener::{Listen, ListenerId, ListenerRef};
pub use listener_fn::ListenerFn;
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use options::{DoneHook, ErrorHook, RegisterOptions};
