use crate::config::{EmitterConfig, RegistrationMode};

use super::emitter::Emitter;

/// Builder for constructing an [`Emitter`] with non-default settings.
///
/// ```rust
/// use herald::{Emitter, RegistrationMode};
///
/// let emitter = Emitter::builder()
///     .max_listeners(8)
///     .bus_capacity(64)
///     .mode(RegistrationMode::PerCall)
///     .build();
///
/// assert_eq!(emitter.max_listeners(), 8);
/// ```
#[derive(Debug, Default)]
pub struct EmitterBuilder {
    cfg: EmitterConfig,
}

impl EmitterBuilder {
    /// Creates a new builder with [`EmitterConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    pub fn from_config(cfg: EmitterConfig) -> Self {
        Self { cfg }
    }

    /// Sets the listener ceiling.
    pub fn max_listeners(mut self, max: usize) -> Self {
        self.cfg.max_listeners = max;
        self
    }

    /// Sets the dispatch channel capacity (clamped to at least 1).
    pub fn bus_capacity(mut self, capacity: usize) -> Self {
        self.cfg.bus_capacity = capacity;
        self
    }

    /// Sets the repeated-registration behavior.
    pub fn mode(mut self, mode: RegistrationMode) -> Self {
        self.cfg.mode = mode;
        self
    }

    /// Builds the emitter.
    pub fn build(self) -> Emitter {
        Emitter::with_config(self.cfg)
    }
}
