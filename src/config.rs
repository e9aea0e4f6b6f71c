//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`], the centralized settings for an [`Emitter`](crate::Emitter),
//! and [`RegistrationMode`], which decides what repeated registration of the same
//! listener for the same event does.
//!
//! Config is used in two ways:
//! 1. **Direct**: `Emitter::with_config(config)`
//! 2. **Builder**: `Emitter::builder().max_listeners(8).build()`
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by the bus
//! - `max_listeners = 0` → every registration fails with `CapacityExceeded`

/// Default ceiling on registered listeners.
pub const DEFAULT_MAX_LISTENERS: usize = 50;

/// Default ring buffer size of the dispatch channel.
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

/// What `on` does when the (event, listener) pair is already known.
///
/// ```text
/// Unique:   on(a, L) ─► sub#1      on(a, L) ─► no-op (same sub#1)
/// PerCall:  on(a, L) ─► sub#1      on(a, L) ─► sub#2 (L runs twice per emit)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationMode {
    /// One dispatch subscription per (event, listener) pair.
    ///
    /// Re-registering an active pair is a no-op and does not count against capacity.
    /// Re-registering a detached pair re-activates it and counts again.
    #[default]
    Unique,

    /// Every registration installs its own dispatch subscription and counts
    /// against capacity, so a listener registered N times runs N times per emit.
    PerCall,
}

/// Configuration for an emitter.
///
/// ## Field semantics
/// - `max_listeners`: ceiling checked at registration time only (lowering it never evicts)
/// - `bus_capacity`: dispatch ring buffer size; slower subscriptions lag and skip
/// - `mode`: repeated-registration behavior, see [`RegistrationMode`]
#[derive(Clone, Debug)]
pub struct EmitterConfig {
    /// Maximum number of listeners counted as registered at once.
    pub max_listeners: usize,

    /// Capacity of the dispatch broadcast channel.
    ///
    /// Subscriptions that fall more than `bus_capacity` notifications behind
    /// observe `ListenerError::Lagged` and skip the oldest ones.
    pub bus_capacity: usize,

    /// Repeated-registration behavior.
    pub mode: RegistrationMode,
}

impl EmitterConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for EmitterConfig {
    /// Default configuration:
    ///
    /// - `max_listeners = 50`
    /// - `bus_capacity = 1024`
    /// - `mode = RegistrationMode::Unique`
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
            bus_capacity: DEFAULT_BUS_CAPACITY,
            mode: RegistrationMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EmitterConfig::default();
        assert_eq!(cfg.max_listeners, 50);
        assert_eq!(cfg.bus_capacity, 1024);
        assert_eq!(cfg.mode, RegistrationMode::Unique);
    }

    #[test]
    fn test_bus_capacity_clamped() {
        let cfg = EmitterConfig {
            bus_capacity: 0,
            ..EmitterConfig::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
