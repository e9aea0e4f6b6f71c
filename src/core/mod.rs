//! Emitter core: registry, dispatch and lifecycle.
//!
//! The only public API from this module is [`Emitter`] and its [`EmitterBuilder`].
//!
//! Internal modules:
//! - [`registry`]: per-event active sets and the removal ledger;
//! - [`subscription`]: one dispatch worker per registration, filtering the bus;
//! - [`emitter`]: registration, emission, detachment, counters, destroy;
//! - [`builder`]: fluent construction from [`EmitterConfig`](crate::EmitterConfig).

mod builder;
mod emitter;
mod registry;
mod subscription;

pub use builder::EmitterBuilder;
pub use emitter::Emitter;
