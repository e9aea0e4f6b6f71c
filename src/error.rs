//! Error types used by the emitter and its listeners.
//!
//! This module defines two main error enums:
//!
//! - [`EmitterError`] - errors returned to the caller by [`Emitter`](crate::Emitter) operations.
//! - [`ListenerError`] - errors raised while a subscription delivers to its listener.
//!
//! Both types provide [`as_label`](EmitterError::as_label) for logging/metrics.
//! Nothing in the crate retries automatically; retry policy belongs to the caller.

use thiserror::Error;

/// # Errors produced by emitter operations.
///
/// All variants are synchronous, caller-visible failures.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitterError {
    /// Accepting the registration would push the listener count past the ceiling.
    ///
    /// Raise the ceiling or remove a listener first.
    #[error("listener capacity exceeded: {current} registered, limit {limit}")]
    CapacityExceeded {
        /// The configured ceiling at the time of the call.
        limit: usize,
        /// The listener count at the time of the call.
        current: usize,
    },

    /// The emitter was destroyed. Permanent for this instance.
    #[error("emitter is closed")]
    Closed,

    /// Detachment requested for an event identifier that was never registered.
    #[error("unknown event {event:?}")]
    UnknownEvent {
        /// The offending event identifier.
        event: String,
    },

    /// Event identifiers must be non-empty.
    #[error("event identifier must not be empty")]
    EmptyEvent,
}

impl EmitterError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use herald::EmitterError;
    ///
    /// let err = EmitterError::CapacityExceeded { limit: 1, current: 1 };
    /// assert_eq!(err.as_label(), "emitter_capacity_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitterError::CapacityExceeded { .. } => "emitter_capacity_exceeded",
            EmitterError::Closed => "emitter_closed",
            EmitterError::UnknownEvent { .. } => "emitter_unknown_event",
            EmitterError::EmptyEvent => "emitter_empty_event",
        }
    }
}

/// # Errors produced while delivering to a listener.
///
/// These never reach the caller of [`emit`](crate::Emitter::emit); they are
/// handed to the subscription's `on_error` hook (or logged when none is set).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The listener body returned an error.
    #[error("listener failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The listener panicked; the panic was caught by its subscription.
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// The subscription fell behind the channel and skipped notifications.
    #[error("subscription lagged, skipped {skipped} notifications")]
    Lagged {
        /// Number of skipped notifications.
        skipped: u64,
    },
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        ListenerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Fail { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
            ListenerError::Lagged { .. } => "listener_lagged",
        }
    }

    /// Indicates whether `cancel_on_error` ends the subscription on this error.
    ///
    /// Returns `true` for [`ListenerError::Fail`] and [`ListenerError::Panicked`],
    /// `false` for [`ListenerError::Lagged`].
    ///
    /// # Example
    /// ```
    /// use herald::ListenerError;
    ///
    /// assert!(ListenerError::fail("boom").is_fatal());
    /// assert!(!ListenerError::Lagged { skipped: 3 }.is_fatal());
    /// ```
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ListenerError::Fail { .. } | ListenerError::Panicked { .. }
        )
    }
}
