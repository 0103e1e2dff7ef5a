//! Registry rotation via atomically published snapshots.
//!
//! [`crate::registry::SecretRegistry`] itself has no synchronization: it is
//! built once and read immutably. When keys must rotate at runtime, a new
//! registry is built off to the side and published as a whole, so concurrent
//! readers only ever observe a complete mapping: either the old snapshot or
//! the new one, never a partially updated map.

use std::sync::{Arc, RwLock};

use crate::registry::{KeyId, Secret, SecretRegistry};

/// Shared handle publishing immutable [`SecretRegistry`] snapshots.
///
/// Readers take a cheap [`snapshot`](Self::snapshot) per request and keep
/// using it for however long the request lives; a concurrent
/// [`replace`](Self::replace) never invalidates a snapshot already handed out.
#[derive(Debug)]
pub struct SharedRegistry {
    current: RwLock<Arc<SecretRegistry>>,
}

impl SharedRegistry {
    #[must_use]
    pub fn new(registry: SecretRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// The currently published registry.
    #[must_use]
    pub fn snapshot(&self) -> Arc<SecretRegistry> {
        Arc::clone(&self.current.read().expect("registry lock poisoned"))
    }

    /// Publishes `registry` as the new snapshot, returning the previous one.
    pub fn replace(&self, registry: SecretRegistry) -> Arc<SecretRegistry> {
        let next = Arc::new(registry);
        let mut current = self.current.write().expect("registry lock poisoned");
        let previous = std::mem::replace(&mut *current, next);
        log::info!(
            "published secret registry snapshot with {} key(s)",
            current.len()
        );
        previous
    }

    /// Rebuilds the current snapshot with `secret` registered under `id` and
    /// publishes the result. Existing entries are carried over; an entry with
    /// the same id is superseded.
    pub fn rotate(&self, id: KeyId, secret: Secret) {
        let snapshot = self.snapshot();
        let target = id.clone();
        let rebuilt: SecretRegistry = snapshot
            .iter()
            .filter(|(existing, _)| **existing != target)
            .map(|(existing, s)| (existing.clone(), s.clone()))
            .chain(std::iter::once((id, secret)))
            .collect();
        self.replace(rebuilt);
    }
}
