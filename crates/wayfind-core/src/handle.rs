// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Publish point for engine snapshots.
use std::sync::{Arc, RwLock};

use crate::wayfinder::Wayfinder;

/// Shared, atomically replaceable [`Wayfinder`] snapshot.
///
/// Readers take an `Arc` to the current snapshot and keep using it for the
/// whole request; a reload builds a fresh snapshot and swaps the pointer.
/// Snapshots themselves are never mutated.
#[derive(Debug)]
pub struct WayfinderHandle {
    current: RwLock<Arc<Wayfinder>>,
}

impl WayfinderHandle {
    /// Wraps the initial snapshot.
    pub fn new(wayfinder: Wayfinder) -> Self {
        Self {
            current: RwLock::new(Arc::new(wayfinder)),
        }
    }

    /// The snapshot new requests should use.
    pub fn current(&self) -> Arc<Wayfinder> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replaces the snapshot, returning the previous one.
    pub fn publish(&self, wayfinder: Wayfinder) -> Arc<Wayfinder> {
        let next = Arc::new(wayfinder);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoordinateRegistry, FacilityGraph, MarkerLayers, NameIndex};

    fn snapshot(names: &[&str]) -> Wayfinder {
        Wayfinder::new(
            FacilityGraph::default(),
            CoordinateRegistry::default(),
            NameIndex::new(names.iter().copied()),
            MarkerLayers::default(),
        )
    }

    #[test]
    fn readers_keep_their_snapshot_across_publish() {
        let handle = WayfinderHandle::new(snapshot(&["Aldo"]));
        let before = handle.current();
        let previous = handle.publish(snapshot(&["Aldo", "Asics"]));

        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.search_stores("a"), ["Aldo"]);
        assert_eq!(handle.current().search_stores("a"), ["Aldo", "Asics"]);
    }
}
