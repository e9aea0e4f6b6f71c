//! # Listener registry and removal ledger.
//!
//! [`Registry`] maps event identifiers to an [`EventEntry`] holding two sets:
//! - `active`: identities currently eligible to run for the event
//! - `removed`: identities explicitly detached from the event
//!
//! ## Rules
//! - Entries are created lazily on first registration and never dropped
//!   (an entry with an empty `active` set survives `detach_all`).
//! - The two sets are per event: detaching from `a` leaves `b` untouched.
//! - An identity in `removed` is never dispatched, whatever `active` says.
//! - Detaching an identity that is not active still records it in `removed`.
//! - Every activated handle is pinned for the registry's lifetime. Identities are
//!   derived from the handle address, so an unpinned handle could be freed and its
//!   address handed to an unrelated listener.
//!
//! ```text
//! activate(L):   removed -= L, active += L
//! detach(L):     active  -= L, removed += L
//! detach_all():  removed += active, active = ∅
//! ```

use std::collections::{HashMap, HashSet};

use std::sync::Arc;

use crate::listeners::{ListenerId, ListenerRef};

/// Bookkeeping for one event identifier.
#[derive(Debug, Default)]
pub(crate) struct EventEntry {
    active: HashSet<ListenerId>,
    removed: HashSet<ListenerId>,
}

impl EventEntry {
    pub(crate) fn is_active(&self, id: ListenerId) -> bool {
        self.active.contains(&id)
    }

    pub(crate) fn is_removed(&self, id: ListenerId) -> bool {
        self.removed.contains(&id)
    }

    /// Marks `id` eligible again. Returns `true` if it was not active before.
    pub(crate) fn activate(&mut self, id: ListenerId) -> bool {
        self.removed.remove(&id);
        self.active.insert(id)
    }

    pub(crate) fn detach(&mut self, id: ListenerId) {
        self.active.remove(&id);
        self.removed.insert(id);
    }

    /// Moves every active identity to the ledger; returns how many moved.
    pub(crate) fn detach_all(&mut self) -> usize {
        let moved = self.active.len();
        self.removed.extend(self.active.drain());
        moved
    }

    /// Active identities in a stable order.
    pub(crate) fn active_sorted(&self) -> Vec<ListenerId> {
        let mut ids: Vec<ListenerId> = self.active.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Event identifier → [`EventEntry`].
#[derive(Default)]
pub(crate) struct Registry {
    events: HashMap<String, EventEntry>,
    handles: HashMap<ListenerId, ListenerRef>,
}

impl Registry {
    /// Activates `listener` for `event` and pins its handle.
    ///
    /// Returns `true` if it was not active for `event` before.
    pub(crate) fn activate(&mut self, event: &str, listener: &ListenerRef) -> bool {
        let id = ListenerId::of(listener);
        self.handles
            .entry(id)
            .or_insert_with(|| Arc::clone(listener));
        self.entry_mut(event).activate(id)
    }

    /// Returns the entry for `event`, creating it on first use.
    pub(crate) fn entry_mut(&mut self, event: &str) -> &mut EventEntry {
        self.events.entry(event.to_owned()).or_default()
    }

    pub(crate) fn get(&self, event: &str) -> Option<&EventEntry> {
        self.events.get(event)
    }

    pub(crate) fn get_mut(&mut self, event: &str) -> Option<&mut EventEntry> {
        self.events.get_mut(event)
    }

    /// Returns `true` if `id` must not run for `event`.
    pub(crate) fn is_removed(&self, event: &str, id: ListenerId) -> bool {
        self.get(event).is_some_and(|e| e.is_removed(id))
    }

    /// Returns sorted list of known event identifiers.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
