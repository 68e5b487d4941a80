//! Memoized per-country aggregation results.

use std::collections::HashMap;

use sighting_map_occurrence_models::{CountryAggregate, YearSelection};
use uuid::Uuid;

/// Aggregation results keyed by snapshot version and year selection.
///
/// Entries are cloned out on hit so every run still privately owns its
/// derived rows. Keying by snapshot version makes entries from a
/// replaced dataset unreachable even before [`clear`](Self::clear)
/// runs.
#[derive(Debug, Clone, Default)]
pub struct AggregateCache {
    entries: HashMap<(Uuid, YearSelection), Vec<CountryAggregate>>,
}

impl AggregateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached aggregation for a snapshot and selection, if any.
    #[must_use]
    pub fn get(&self, version: Uuid, selection: YearSelection) -> Option<Vec<CountryAggregate>> {
        self.entries.get(&(version, selection)).cloned()
    }

    /// Stores an aggregation result.
    pub fn insert(
        &mut self,
        version: Uuid,
        selection: YearSelection,
        aggregates: Vec<CountryAggregate>,
    ) {
        self.entries.insert((version, selection), aggregates);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached aggregations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregates() -> Vec<CountryAggregate> {
        vec![CountryAggregate {
            country_code: "BR".to_string(),
            total_count: 3,
        }]
    }

    #[test]
    fn hit_returns_a_clone_of_the_stored_rows() {
        let version = Uuid::new_v4();
        let mut cache = AggregateCache::new();
        cache.insert(version, YearSelection::Year(2020), aggregates());

        let hit = cache.get(version, YearSelection::Year(2020)).unwrap();
        assert_eq!(hit, aggregates());
        // Still present after the clone-out.
        assert!(cache.get(version, YearSelection::Year(2020)).is_some());
    }

    #[test]
    fn misses_on_other_versions_and_selections() {
        let version = Uuid::new_v4();
        let mut cache = AggregateCache::new();
        cache.insert(version, YearSelection::Year(2020), aggregates());

        assert!(cache.get(version, YearSelection::AllYears).is_none());
        assert!(cache.get(Uuid::new_v4(), YearSelection::Year(2020)).is_none());
    }

    #[test]
    fn clear_drops_everything() {
        let version = Uuid::new_v4();
        let mut cache = AggregateCache::new();
        cache.insert(version, YearSelection::AllYears, aggregates());
        cache.clear();
        assert!(cache.is_empty());
    }
}
