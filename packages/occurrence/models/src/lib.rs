#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical occurrence record types and the year selection sentinel.
//!
//! Every data source that feeds the sighting map normalizes its rows into
//! [`OccurrenceRecord`] before anything downstream sees them. The derived
//! per-country totals ([`CountryAggregate`]) and the "all years" filter
//! sentinel ([`YearSelection`]) live here too so that the filter,
//! aggregation, and view crates share one vocabulary.

use serde::{Deserialize, Serialize};

/// Display label for the [`YearSelection::AllYears`] sentinel.
pub const ALL_YEARS_LABEL: &str = "Todos los años";

/// A single observed sighting event, normalized from the raw source.
///
/// The raw column `rightsHolder` is renamed to `observer` at load time;
/// all other fields keep their source names. Loaders guarantee that
/// `country_code` is non-empty and that `individual_count` has been
/// sanitized (missing or non-numeric source values become 0) before a
/// record is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceRecord {
    /// ISO country code of the sighting (e.g. "BR").
    pub country_code: String,
    /// State or province name, free-form from the source.
    pub state_province: String,
    /// Calendar year of the sighting. No range is enforced; filtering by
    /// an out-of-range year simply yields no records.
    pub year: i32,
    /// Number of individuals observed in this event.
    pub individual_count: u32,
    /// Who reported the sighting.
    pub observer: String,
}

/// Total sightings for one country over the filtered record set.
///
/// Derived entity: rebuilt on every filter/aggregate cycle, never
/// persisted. One row exists per distinct country code in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryAggregate {
    /// ISO country code this row aggregates.
    pub country_code: String,
    /// Sum of `individual_count` over the country's records.
    pub total_count: u64,
}

/// The year filter selection: either one concrete year or the
/// "all years" sentinel that passes every record through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearSelection {
    /// Do not filter by year.
    AllYears,
    /// Keep only records whose `year` equals the given value.
    Year(i32),
}

impl YearSelection {
    /// Returns `true` if a record with the given year passes this filter.
    #[must_use]
    pub const fn matches(self, year: i32) -> bool {
        match self {
            Self::AllYears => true,
            Self::Year(selected) => selected == year,
        }
    }
}

impl std::fmt::Display for YearSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllYears => f.write_str(ALL_YEARS_LABEL),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

impl std::str::FromStr for YearSelection {
    type Err = InvalidYearSelectionError;

    /// Accepts `"all"`, `"todos"`, the full sentinel label, or an integer
    /// year. Matching on the words is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_lowercase();
        if lowered == "all" || lowered == "todos" || lowered == ALL_YEARS_LABEL.to_lowercase() {
            return Ok(Self::AllYears);
        }
        trimmed
            .parse::<i32>()
            .map(Self::Year)
            .map_err(|_| InvalidYearSelectionError {
                input: trimmed.to_string(),
            })
    }
}

/// Error returned when a string is neither a year nor an "all years"
/// spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYearSelectionError {
    /// The rejected input.
    pub input: String,
}

impl std::fmt::Display for InvalidYearSelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid year selection '{}': expected a year or \"all\"",
            self.input
        )
    }
}

impl std::error::Error for InvalidYearSelectionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_years_matches_everything() {
        assert!(YearSelection::AllYears.matches(1990));
        assert!(YearSelection::AllYears.matches(-44));
        assert!(YearSelection::AllYears.matches(9999));
    }

    #[test]
    fn concrete_year_matches_only_itself() {
        let selection = YearSelection::Year(2020);
        assert!(selection.matches(2020));
        assert!(!selection.matches(2021));
    }

    #[test]
    fn displays_sentinel_label() {
        assert_eq!(YearSelection::AllYears.to_string(), "Todos los años");
        assert_eq!(YearSelection::Year(2020).to_string(), "2020");
    }

    #[test]
    fn parses_all_years_spellings() {
        for input in ["all", "ALL", "todos", "Todos los años", " todos "] {
            assert_eq!(
                input.parse::<YearSelection>().unwrap(),
                YearSelection::AllYears,
                "failed for {input:?}"
            );
        }
    }

    #[test]
    fn parses_concrete_year() {
        assert_eq!(
            "2020".parse::<YearSelection>().unwrap(),
            YearSelection::Year(2020)
        );
    }

    #[test]
    fn rejects_garbage_selection() {
        let err = "twenty-twenty".parse::<YearSelection>().unwrap_err();
        assert!(err.to_string().contains("twenty-twenty"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for selection in [YearSelection::AllYears, YearSelection::Year(1999)] {
            let label = selection.to_string();
            assert_eq!(label.parse::<YearSelection>().unwrap(), selection);
        }
    }
}
