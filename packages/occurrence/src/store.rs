//! In-memory store over loaded occurrence records.

use std::collections::BTreeSet;

use sighting_map_occurrence_models::{OccurrenceRecord, YearSelection};

/// Sanitized occurrence records, queryable for the distinct years they
/// span.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordStore {
    records: Vec<OccurrenceRecord>,
}

impl RecordStore {
    /// Creates a store over `records`.
    #[must_use]
    pub const fn new(records: Vec<OccurrenceRecord>) -> Self {
        Self { records }
    }

    /// All records, in load order.
    #[must_use]
    pub fn records(&self) -> &[OccurrenceRecord] {
        &self.records
    }

    /// Number of records in the store.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Selectable year options: the all-years option first, then each
    /// distinct year ascending.
    #[must_use]
    pub fn year_options(&self) -> Vec<YearSelection> {
        let years: BTreeSet<i32> = self.records.iter().map(|record| record.year).collect();

        let mut options = Vec::with_capacity(years.len() + 1);
        options.push(YearSelection::AllYears);
        options.extend(years.into_iter().map(YearSelection::Year));
        options
    }
}
