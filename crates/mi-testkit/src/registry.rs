//! Handle registry for callback dispatch
//!
//! Maps context handles back to the state that owns them, so plain `fn`
//! callbacks can find their way home. Handles come from a monotonic counter
//! and are never reused: once an owner deregisters, its handle misses for
//! the rest of the process instead of silently resolving to a newer owner.
//!
//! The registry holds weak references only; owners keep their state alive
//! and must deregister when they go away.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use mi_sdk::ContextHandle;

/// Thread-safe map from context handles to weakly held owners.
pub struct HandleRegistry<T> {
    map: DashMap<u64, Weak<T>>,
    next_id: AtomicU64,
}

impl<T> HandleRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register an owner and return its fresh handle.
    pub fn register(&self, owner: &Arc<T>) -> ContextHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.map.insert(id, Arc::downgrade(owner));
        log::debug!("registered ctx#{} ({} live)", id, self.map.len());
        ContextHandle::from_raw(id)
    }

    /// Owner of a handle, if it is still registered and alive.
    pub fn lookup(&self, handle: ContextHandle) -> Option<Arc<T>> {
        self.map
            .get(&handle.as_raw())
            .and_then(|entry| entry.value().upgrade())
    }

    /// Remove a handle. Returns false if it was not registered.
    pub fn deregister(&self, handle: ContextHandle) -> bool {
        let removed = self.map.remove(&handle.as_raw()).is_some();
        log::debug!("deregistered {} ({} live)", handle, self.map.len());
        removed
    }

    /// Number of registered handles
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no handle is registered
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_lookup_deregister() {
        let registry = HandleRegistry::new();
        let owner = Arc::new(5u32);
        let handle = registry.register(&owner);

        assert_eq!(registry.lookup(handle).as_deref(), Some(&5));
        assert_eq!(registry.len(), 1);
        assert!(registry.deregister(handle));
        assert!(registry.lookup(handle).is_none());
        assert!(!registry.deregister(handle));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handles_are_never_reused() {
        let registry = HandleRegistry::new();
        let first = registry.register(&Arc::new(1u32));
        registry.deregister(first);
        let second = registry.register(&Arc::new(2u32));
        assert_ne!(first, second);
        assert!(registry.lookup(first).is_none());
    }

    #[test]
    fn test_dropped_owner_does_not_resolve() {
        let registry = HandleRegistry::new();
        let owner = Arc::new(String::from("gone"));
        let handle = registry.register(&owner);
        drop(owner);
        assert!(registry.lookup(handle).is_none());
    }
}
