//! # Function-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(Vec<Value>) -> Fut`, producing a fresh
//! future per delivery. Shared state belongs in an explicit `Arc<...>` captured
//! by the closure.
//!
//! ## Example
//! ```rust
//! use herald::{ListenerFn, ListenerRef, ListenerError};
//!
//! let l: ListenerRef = ListenerFn::arc("printer", |args| async move {
//!     println!("{args:?}");
//!     Ok::<_, ListenerError>(())
//! });
//!
//! assert_eq!(l.name(), "printer");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ListenerError;
use crate::listeners::listener::Listen;

/// Function-backed listener implementation.
#[derive(Debug)]
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenerFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`](crate::ListenerRef).
    pub fn new<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut,
        Fut: Future<Output = Result<(), ListenerError>>,
    {
        Self { name: name.into(), f }
    }

    /// Creates the listener and returns it as a shared handle.
    ///
    /// The returned `Arc` is the listener's identity: keep it (or the id `on`
    /// returns) to detach later.
    pub fn arc<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self>
    where
        F: Fn(Vec<Value>) -> Fut,
        Fut: Future<Output = Result<(), ListenerError>>,
    {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Listen for ListenerFn<F>
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ListenerError>> + Send + 'static,
{
    async fn on_event(&self, args: Vec<Value>) -> Result<(), ListenerError> {
        (self.f)(args).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
