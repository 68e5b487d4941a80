//! Per-country aggregation of filtered records.

use std::collections::BTreeMap;

use sighting_map_occurrence_models::{CountryAggregate, OccurrenceRecord};

/// Sums individual counts per country code.
///
/// One row per distinct code, ordered by total descending with ties
/// broken by code ascending. The bar chart renders rows in this order,
/// so it must be deterministic.
#[must_use]
pub fn aggregate_by_country(records: &[OccurrenceRecord]) -> Vec<CountryAggregate> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.country_code.as_str()).or_insert(0) +=
            u64::from(record.individual_count);
    }

    let mut aggregates: Vec<CountryAggregate> = totals
        .into_iter()
        .map(|(country_code, total_count)| CountryAggregate {
            country_code: country_code.to_owned(),
            total_count,
        })
        .collect();

    aggregates.sort_by(|a, b| {
        b.total_count
            .cmp(&a.total_count)
            .then_with(|| a.country_code.cmp(&b.country_code))
    });

    aggregates
}
