//! # Listener abstraction and identity.
//!
//! This module defines the [`Listen`] trait (async, fallible), the shared handle
//! type [`ListenerRef`] and the identity token [`ListenerId`].
//!
//! ## Identity
//! A listener is identified by its **handle**, not by its behavior: the same
//! `ListenerRef` (or any clone of it) always maps to the same [`ListenerId`],
//! while two separately created listeners never collide, even when structurally
//! identical. Box a listener once and keep the handle (or the id returned by
//! `on`) for later detachment.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ListenerError;

/// # Asynchronous event handler.
///
/// Called once per matching notification with `[...extra_args, payload]`.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use herald::{Listen, ListenerError};
/// use serde_json::Value;
///
/// struct Printer;
///
/// #[async_trait]
/// impl Listen for Printer {
///     async fn on_event(&self, args: Vec<Value>) -> Result<(), ListenerError> {
///         println!("{args:?}");
///         Ok(())
///     }
///
///     fn name(&self) -> &str { "printer" }
/// }
/// ```
#[async_trait]
pub trait Listen: Send + Sync + 'static {
    /// Handles one delivery.
    ///
    /// Runs on the subscription's worker task, never in the emitter's context.
    /// Deliveries to one subscription are sequential (FIFO).
    async fn on_event(&self, args: Vec<Value>) -> Result<(), ListenerError>;

    /// Returns the listener name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared listener handle (`Arc<dyn Listen>`).
pub type ListenerRef = Arc<dyn Listen>;

/// Stable identity of a listener handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(usize);

impl ListenerId {
    /// Returns the identity of `listener`.
    ///
    /// Works on the concrete handle (`Arc<ListenerFn<_>>`) and on the erased one
    /// (`ListenerRef`) alike. Stable for as long as any clone of the handle is
    /// alive; an emitter pins every handle it ever registered, so identities it
    /// has seen are never reused by a later allocation.
    pub fn of<T: ?Sized>(listener: &Arc<T>) -> Self {
        Self(Arc::as_ptr(listener) as *const () as usize)
    }
}

impl<T: Listen + ?Sized> From<&Arc<T>> for ListenerId {
    fn from(listener: &Arc<T>) -> Self {
        Self::of(listener)
    }
}

impl fmt::Debug for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerId({:#x})", self.0)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener@{:#x}", self.0)
    }
}
