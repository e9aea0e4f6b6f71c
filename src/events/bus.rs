//! # Dispatch channel for emitted notifications.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. It is the single
//! dispatch backbone of an [`Emitter`](crate::Emitter): every registration holds
//! its own receiver and filters by event identifier.
//!
//! ## Architecture
//! ```text
//! Emitter::emit ──► Bus ──┬──► subscription (a, L1) ──► L1.on_event()
//!                         ├──► subscription (a, L2) ──► L2.on_event()
//!                         └──► subscription (b, L1) ──► (filtered out)
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never waits for receivers.
//! - **Bounded capacity**: one ring buffer is shared by all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **Closing**: the bus is not `Clone`; dropping it closes the channel and
//!   receivers observe `RecvError::Closed` after draining.

use tokio::sync::broadcast;

use super::notification::Notification;

/// Broadcast channel for notifications.
#[derive(Debug)]
pub(crate) struct Bus {
    tx: broadcast::Sender<Notification>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity.
    ///
    /// The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Notification>(capacity);
        Self { tx }
    }

    /// Publishes a notification to all active receivers.
    ///
    /// Returns the number of receivers that will see it; zero receivers is not an error.
    pub fn publish(&self, n: Notification) -> usize {
        self.tx.send(n).unwrap_or(0)
    }

    /// Creates a new receiver that observes subsequent notifications only.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_every_receiver() {
        let bus = Bus::new(4);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.publish(Notification::new(1, "a")), 2);

        assert_eq!(rx1.recv().await.unwrap().event(), "a");
        assert_eq!(rx2.recv().await.unwrap().event(), "a");
    }

    #[tokio::test]
    async fn publish_without_receivers_is_fine() {
        let bus = Bus::new(0);
        assert_eq!(bus.publish(Notification::new(1, "a")), 0);
    }

    #[tokio::test]
    async fn dropping_bus_closes_receivers_after_drain() {
        let bus = Bus::new(4);
        let mut rx = bus.subscribe();
        bus.publish(Notification::new(1, "a"));
        drop(bus);

        assert_eq!(rx.recv().await.unwrap().seq, 1);
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Closed)
        ));
    }
}
