//! # Notifications carried by the dispatch channel.
//!
//! A [`Notification`] is what one `emit` call publishes: the event identifier,
//! the payload delivered to listeners, and an emitter-scoped sequence number.
//!
//! ## Ordering guarantees
//! `seq` starts at 1 and increases by one per successful emit of the same emitter.
//! Each subscription observes notifications in `seq` order.
//!
//! ## Example
//! ```rust
//! use herald::Notification;
//! use serde_json::json;
//!
//! let n = Notification::new(1, "ready");
//! assert_eq!(n.event(), "ready");
//! assert_eq!(n.payload(), &json!("ready"));
//!
//! let n = Notification::new(2, "tick").with_payload(json!(42));
//! assert_eq!(n.payload(), &json!(42));
//! ```

use std::sync::Arc;

use serde_json::Value;

/// One published event with its payload.
#[derive(Clone, Debug)]
pub struct Notification {
    /// Emitter-scoped sequence number (1-based).
    pub seq: u64,

    event: Arc<str>,
    payload: Value,
}

impl Notification {
    /// Creates a notification whose payload is the event identifier itself.
    pub fn new(seq: u64, event: impl Into<Arc<str>>) -> Self {
        let event = event.into();
        Self {
            seq,
            payload: Value::String(event.to_string()),
            event,
        }
    }

    /// Replaces the default payload.
    #[inline]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// The event identifier this notification was emitted under.
    #[inline]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The payload delivered after any extra arguments.
    #[inline]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Builds the argument list `[...extra, payload]` handed to a listener.
    pub(crate) fn args_with(&self, extra: &[Value]) -> Vec<Value> {
        let mut args = Vec::with_capacity(extra.len() + 1);
        args.extend_from_slice(extra);
        args.push(self.payload.clone());
        args
    }
}
