//! Year filtering over occurrence records.

use sighting_map_occurrence_models::{OccurrenceRecord, YearSelection};

/// Returns the records matching `selection`, preserving input order.
///
/// The all-years selection copies the whole input; a concrete year
/// keeps the matching subsequence. A year with no sightings yields an
/// empty vec, never an error.
#[must_use]
pub fn filter_records(
    records: &[OccurrenceRecord],
    selection: YearSelection,
) -> Vec<OccurrenceRecord> {
    records
        .iter()
        .filter(|record| selection.matches(record.year))
        .cloned()
        .collect()
}
