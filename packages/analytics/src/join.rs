//! Left join of country boundaries against per-country totals.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use sighting_map_geography_models::{CountryBoundary, JoinedCountry};
use sighting_map_occurrence_models::CountryAggregate;

/// An aggregate whose country code matched no boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedKeyWarning {
    /// The country code with no boundary polygon.
    pub country_code: String,
    /// The sightings dropped with it.
    pub total_count: u64,
}

/// What the join dropped.
///
/// Boundaries without records are zero-filled, not reported; only
/// record totals that vanish from the map appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JoinReport {
    /// One entry per aggregate code without a boundary, in aggregate
    /// input order.
    pub warnings: Vec<UnmatchedKeyWarning>,
    /// Total sightings dropped across all warnings.
    pub dropped_total: u64,
}

impl JoinReport {
    /// Whether anything was dropped.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Joined rows plus the report of what was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    /// Exactly one row per boundary, in boundary input order.
    pub joined: Vec<JoinedCountry>,
    /// Aggregates that matched no boundary.
    pub report: JoinReport,
}

/// Left-joins `boundaries` against `aggregates` on country code.
///
/// Every boundary yields one row; boundaries with no aggregate carry a
/// total of 0. Aggregates matching no boundary are dropped from the
/// rows, logged at `warn`, and recorded in the report. Never fails.
#[must_use]
pub fn join_boundaries(
    boundaries: &[CountryBoundary],
    aggregates: &[CountryAggregate],
) -> JoinOutcome {
    let totals: BTreeMap<&str, u64> = aggregates
        .iter()
        .map(|aggregate| (aggregate.country_code.as_str(), aggregate.total_count))
        .collect();

    let joined: Vec<JoinedCountry> = boundaries
        .iter()
        .map(|boundary| JoinedCountry {
            boundary: boundary.clone(),
            total_count: totals.get(boundary.code.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let boundary_codes: BTreeSet<&str> = boundaries
        .iter()
        .map(|boundary| boundary.code.as_str())
        .collect();

    let mut report = JoinReport::default();
    for aggregate in aggregates {
        if !boundary_codes.contains(aggregate.country_code.as_str()) {
            log::warn!(
                "Dropping {} sightings for country code '{}': no matching boundary",
                aggregate.total_count,
                aggregate.country_code
            );
            report.dropped_total += aggregate.total_count;
            report.warnings.push(UnmatchedKeyWarning {
                country_code: aggregate.country_code.clone(),
                total_count: aggregate.total_count,
            });
        }
    }

    JoinOutcome { joined, report }
}
