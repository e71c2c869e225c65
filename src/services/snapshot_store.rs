use std::sync::RwLock;

use crate::models::{Snapshot, SnapshotId};

/// Ordered, newest-first collection of captured snapshots.
///
/// The collection owns its contents; callers mutate it only through
/// `insert` and `remove_by_id`. `all()` hands out a point-in-time copy that
/// stays coherent across later mutations. No eviction, no size cap.
pub struct SnapshotStore {
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    snapshots: Vec<Snapshot>,
    version: u64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                snapshots: Vec::new(),
                version: 0,
            }),
        }
    }

    /// Prepend a snapshot. Duplicate parameter sets are distinct entities.
    pub fn insert(&self, snapshot: Snapshot) {
        let mut inner = self.inner.write().unwrap();
        tracing::debug!(id = %snapshot.id, method = %snapshot.method, "Captured snapshot");
        inner.snapshots.insert(0, snapshot);
        inner.version += 1;
    }

    /// Remove the snapshot with the given id. No-op if absent.
    pub fn remove_by_id(&self, id: SnapshotId) {
        let mut inner = self.inner.write().unwrap();
        let before = inner.snapshots.len();
        inner.snapshots.retain(|snap| snap.id != id);
        if inner.snapshots.len() != before {
            inner.version += 1;
        }
    }

    /// Current contents, newest first, as a snapshot-in-time copy.
    pub fn all(&self) -> Vec<Snapshot> {
        self.inner.read().unwrap().snapshots.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped on every effective mutation.
    pub fn version(&self) -> u64 {
        self.inner.read().unwrap().version
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
