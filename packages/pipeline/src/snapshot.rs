//! Immutable snapshot of one loaded dataset pair.

use chrono::{DateTime, Utc};
use sighting_map_geography::store::BoundaryStore;
use sighting_map_occurrence::store::RecordStore;
use uuid::Uuid;

/// The records and boundaries of one load, frozen together.
///
/// Constructed once after loading and shared by reference; per-run
/// derived data is keyed by [`version`](Self::version), so two
/// snapshots never share cache entries even when their contents match.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    version: Uuid,
    loaded_at: DateTime<Utc>,
    records: RecordStore,
    boundaries: BoundaryStore,
}

impl DatasetSnapshot {
    /// Freezes a loaded record and boundary pair under a fresh version.
    #[must_use]
    pub fn new(records: RecordStore, boundaries: BoundaryStore) -> Self {
        Self {
            version: Uuid::new_v4(),
            loaded_at: Utc::now(),
            records,
            boundaries,
        }
    }

    /// Unique identity of this snapshot.
    #[must_use]
    pub const fn version(&self) -> Uuid {
        self.version
    }

    /// When the snapshot was constructed.
    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// The occurrence records.
    #[must_use]
    pub const fn records(&self) -> &RecordStore {
        &self.records
    }

    /// The country boundaries.
    #[must_use]
    pub const fn boundaries(&self) -> &BoundaryStore {
        &self.boundaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_snapshot_gets_its_own_version() {
        let a = DatasetSnapshot::new(RecordStore::default(), BoundaryStore::default());
        let b = DatasetSnapshot::new(RecordStore::default(), BoundaryStore::default());
        assert_ne!(a.version(), b.version());
    }

    #[test]
    fn exposes_the_frozen_stores() {
        let snapshot = DatasetSnapshot::new(RecordStore::default(), BoundaryStore::default());
        assert!(snapshot.records().is_empty());
        assert!(snapshot.boundaries().is_empty());
    }
}
