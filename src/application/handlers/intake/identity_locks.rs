//! Per-identity serialization.
//!
//! Every step for one identity runs under that identity's async mutex, so a
//! step's read-modify-write of the session never interleaves with another
//! step or with the sweeper. Different identities never contend.
//!
//! Mutexes are created on demand and pruned on release once no other task
//! holds or awaits them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::Identity;

type Slot = Arc<AsyncMutex<()>>;

#[derive(Debug, Clone, Default)]
pub struct IdentityLocks {
    slots: Arc<Mutex<HashMap<Identity, Slot>>>,
}

impl IdentityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until `identity` is free and holds it until the guard drops.
    pub async fn acquire(&self, identity: &Identity) -> IdentityGuard {
        let slot = self.slot(identity);
        let guard = slot.lock_owned().await;
        IdentityGuard::new(self.clone(), identity.clone(), guard)
    }

    /// Holds `identity` only if nobody else does right now.
    pub fn try_acquire(&self, identity: &Identity) -> Option<IdentityGuard> {
        let slot = self.slot(identity);
        match slot.try_lock_owned() {
            Ok(guard) => Some(IdentityGuard::new(self.clone(), identity.clone(), guard)),
            Err(_) => {
                self.prune(identity);
                None
            }
        }
    }

    /// Number of identities with a live mutex.
    pub fn len(&self) -> usize {
        self.with_slots(|slots| slots.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, identity: &Identity) -> Slot {
        self.with_slots(|slots| slots.entry(identity.clone()).or_default().clone())
    }

    /// Drops the map entry when the map holds the only reference.
    fn prune(&self, identity: &Identity) {
        self.with_slots(|slots| {
            if slots
                .get(identity)
                .is_some_and(|slot| Arc::strong_count(slot) == 1)
            {
                slots.remove(identity);
            }
        });
    }

    fn with_slots<R>(&self, f: impl FnOnce(&mut HashMap<Identity, Slot>) -> R) -> R {
        // The map is only touched in short synchronous sections, so a poisoned
        // lock still holds a consistent map.
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut slots)
    }
}

/// Exclusive hold on one identity.
#[derive(Debug)]
pub struct IdentityGuard {
    locks: IdentityLocks,
    identity: Identity,
    guard: Option<OwnedMutexGuard<()>>,
}

impl IdentityGuard {
    fn new(locks: IdentityLocks, identity: Identity, guard: OwnedMutexGuard<()>) -> Self {
        Self {
            locks,
            identity,
            guard: Some(guard),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl Drop for IdentityGuard {
    fn drop(&mut self) {
        // Release before pruning so the guard's own reference is gone.
        drop(self.guard.take());
        self.locks.prune(&self.identity);
    }
}
