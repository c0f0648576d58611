//! Per-identity async locks used to coalesce concurrent cold lookups.
//!
//! Same idea as a registry with per-entry locks: the outer map is only
//! touched briefly to find or create the entry, and the long wait happens on
//! the entry's own [`tokio::sync::Mutex`]. Different identities never
//! contend. Entries are dropped again once no task holds or awaits them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;

use crate::domain::SummonerIdentity;

type Slot = Arc<tokio::sync::Mutex<()>>;

/// Map of in-flight identities to their locks.
#[derive(Debug, Default)]
pub struct IdentityLocks {
    slots: Mutex<HashMap<SummonerIdentity, Slot>>,
}

/// Exclusive hold on one identity; released on drop.
#[derive(Debug)]
pub struct IdentityGuard<'a> {
    locks: &'a IdentityLocks,
    identity: SummonerIdentity,
    guard: Option<OwnedMutexGuard<()>>,
}

impl IdentityLocks {
    /// Creates an empty lock map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other task holds `identity`, then holds it.
    pub async fn acquire(&self, identity: &SummonerIdentity) -> IdentityGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(identity.clone()).or_default())
        };
        let guard = slot.lock_owned().await;
        IdentityGuard {
            locks: self,
            identity: identity.clone(),
            guard: Some(guard),
        }
    }

    /// Number of identities currently held or awaited.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for IdentityGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut slots = self
            .locks
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // only the map's own reference left: nobody holds or awaits this slot
        if slots
            .get(&self.identity)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&self.identity);
        }
    }
}
