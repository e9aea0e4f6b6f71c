//! # Per-registration options.
//!
//! [`RegisterOptions`] carries everything `on_with` accepts besides the event and
//! the listener: extra arguments prepended to every delivery and the subscription
//! hooks.
//!
//! ## Hooks
//! ```text
//! delivery ─► listener.on_event(args)
//!               ├─ Ok  ──► next notification
//!               └─ Err ──► on_error(&err)
//!                           ├─ cancel_on_error && err.is_fatal() ─► subscription ends ─► on_done()
//!                           └─ otherwise                         ─► next notification
//! channel closed (destroy) ─────────────────────────────────────────► on_done()
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ListenerError;

/// Callback invoked with each listener failure.
pub type ErrorHook = Arc<dyn Fn(&ListenerError) + Send + Sync>;

/// Callback invoked once when a subscription ends.
pub type DoneHook = Arc<dyn Fn() + Send + Sync>;

/// Options for a single registration.
///
/// ## Example
/// ```rust
/// use herald::RegisterOptions;
/// use serde_json::json;
///
/// let opts = RegisterOptions::new()
///     .with_args(vec![json!(5)])
///     .on_error(|err| eprintln!("listener failed: {err}"))
///     .cancel_on_error(false);
///
/// assert_eq!(opts.extra_args(), &[json!(5)]);
/// ```
#[derive(Clone)]
pub struct RegisterOptions {
    pub(crate) extra_args: Vec<Value>,
    pub(crate) on_error: Option<ErrorHook>,
    pub(crate) on_done: Option<DoneHook>,
    pub(crate) cancel_on_error: bool,
}

impl RegisterOptions {
    /// No extra arguments, no hooks, `cancel_on_error = true`.
    pub fn new() -> Self {
        Self {
            extra_args: Vec::new(),
            on_error: None,
            on_done: None,
            cancel_on_error: true,
        }
    }

    /// Arguments prepended before the payload on every delivery.
    #[must_use]
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.extra_args = args;
        self
    }

    /// Hook called with every listener failure of this subscription.
    #[must_use]
    pub fn on_error(mut self, hook: impl Fn(&ListenerError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Hook called once when this subscription ends.
    #[must_use]
    pub fn on_done(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_done = Some(Arc::new(hook));
        self
    }

    /// Whether a failing or panicking listener ends the subscription (default `true`).
    #[must_use]
    pub fn cancel_on_error(mut self, cancel: bool) -> Self {
        self.cancel_on_error = cancel;
        self
    }

    /// The configured extra arguments.
    pub fn extra_args(&self) -> &[Value] {
        &self.extra_args
    }
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RegisterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterOptions")
            .field("extra_args", &self.extra_args)
            .field("on_error", &self.on_error.is_some())
            .field("on_done", &self.on_done.is_some())
            .field("cancel_on_error", &self.cancel_on_error)
            .finish()
    }
}
