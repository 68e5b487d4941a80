#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset snapshots and full dashboard-frame runs.
//!
//! A [`Pipeline`] owns a frozen [`DatasetSnapshot`](snapshot::DatasetSnapshot)
//! and turns one year selection into one [`DashboardFrame`]: filter,
//! aggregate (memoized per snapshot and selection), join, color scale,
//! and the three view shapes. Runs are synchronous and each frame's
//! derived data is privately owned.

pub mod cache;
pub mod snapshot;

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use sighting_map_analytics::aggregate::aggregate_by_country;
use sighting_map_analytics::filter::filter_records;
use sighting_map_analytics::join::{JoinReport, join_boundaries};
use sighting_map_geography_models::JoinedCountry;
use sighting_map_map::EmptyDomainError;
use sighting_map_map::color::{ColorScaleBuilder, DomainPolicy};
use sighting_map_map::layer::{MapLayer, assemble_layer};
use sighting_map_occurrence_models::{CountryAggregate, YearSelection};
use sighting_map_views::chart::{BarChartSpec, build_chart};
use sighting_map_views::table::{TableView, build_table};
use thiserror::Error;

use crate::cache::AggregateCache;
use crate::snapshot::DatasetSnapshot;

/// Species label used when none is configured.
pub const DEFAULT_SPECIES_LABEL: &str = "jaguares";

/// Errors that can abort a dashboard-frame run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The snapshot has no boundaries to scale or draw.
    #[error(transparent)]
    EmptyDomain(#[from] EmptyDomainError),
}

/// Everything one year selection renders to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFrame {
    /// The selection's display label, embedded in every title.
    pub year_label: String,
    /// Tabular view of the filtered records.
    pub table: TableView,
    /// Bar chart of per-country totals.
    pub chart: BarChartSpec,
    /// Choropleth layer.
    pub map_layer: MapLayer,
    /// What the boundary join dropped.
    pub join_report: JoinReport,
}

/// Runs dashboard frames over one dataset snapshot.
#[derive(Debug, Clone)]
pub struct Pipeline {
    snapshot: Arc<DatasetSnapshot>,
    policy: DomainPolicy,
    species_label: String,
    cache: AggregateCache,
}

impl Pipeline {
    /// Creates a pipeline over `snapshot` with the default domain
    /// policy and species label.
    #[must_use]
    pub fn new(snapshot: Arc<DatasetSnapshot>) -> Self {
        Self {
            snapshot,
            policy: DomainPolicy::default(),
            species_label: DEFAULT_SPECIES_LABEL.to_string(),
            cache: AggregateCache::new(),
        }
    }

    /// Sets which joined totals feed the color-scale domain.
    #[must_use]
    pub const fn with_policy(mut self, policy: DomainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the species label embedded in view titles.
    #[must_use]
    pub fn with_species_label(mut self, species_label: impl Into<String>) -> Self {
        self.species_label = species_label.into();
        self
    }

    /// The snapshot this pipeline runs over.
    #[must_use]
    pub fn snapshot(&self) -> &DatasetSnapshot {
        &self.snapshot
    }

    /// The configured domain policy.
    #[must_use]
    pub const fn policy(&self) -> DomainPolicy {
        self.policy
    }

    /// Number of memoized aggregation results.
    #[must_use]
    pub fn cached_aggregations(&self) -> usize {
        self.cache.len()
    }

    /// Replaces the snapshot, invalidating every memoized aggregation.
    pub fn set_snapshot(&mut self, snapshot: Arc<DatasetSnapshot>) {
        self.snapshot = snapshot;
        self.cache.clear();
    }

    /// Selectable year options for the snapshot's records.
    #[must_use]
    pub fn year_options(&self) -> Vec<YearSelection> {
        self.snapshot.records().year_options()
    }

    /// Runs one full dashboard frame for `selection`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::EmptyDomain`] when the snapshot has no
    /// boundaries at all.
    pub fn run(&mut self, selection: YearSelection) -> Result<DashboardFrame, PipelineError> {
        let year_label = selection.to_string();
        log::debug!("Building dashboard frame for '{year_label}'");

        let filtered = filter_records(self.snapshot.records().records(), selection);

        let aggregates = if let Some(hit) = self.cache.get(self.snapshot.version(), selection) {
            log::debug!("Aggregation cache hit for '{year_label}'");
            hit
        } else {
            let computed = aggregate_by_country(&filtered);
            self.cache
                .insert(self.snapshot.version(), selection, computed.clone());
            computed
        };

        let outcome = join_boundaries(self.snapshot.boundaries().boundaries(), &aggregates);
        let values = domain_values(self.policy, &outcome.joined, &aggregates);
        let scale = ColorScaleBuilder::new().build(&values)?;
        let map_layer = assemble_layer(&outcome.joined, &scale, &year_label);

        let table = build_table(&filtered, &self.species_label, &year_label);
        let chart = build_chart(&aggregates, &self.species_label, &year_label);

        Ok(DashboardFrame {
            year_label,
            table,
            chart,
            map_layer,
            join_report: outcome.report,
        })
    }
}

/// Selects the joined totals the scale domain spans.
///
/// `ObservedOnly` with zero matched countries falls back to the
/// zero-filled totals so the scale still has a (degenerate) domain.
fn domain_values(
    policy: DomainPolicy,
    joined: &[JoinedCountry],
    aggregates: &[CountryAggregate],
) -> Vec<u64> {
    let all_totals = || joined.iter().map(|row| row.total_count).collect();
    match policy {
        DomainPolicy::IncludeZeroFill => all_totals(),
        DomainPolicy::ObservedOnly => {
            let observed: BTreeSet<&str> = aggregates
                .iter()
                .map(|aggregate| aggregate.country_code.as_str())
                .collect();
            let values: Vec<u64> = joined
                .iter()
                .filter(|row| observed.contains(row.code()))
                .map(|row| row.total_count)
                .collect();
            if values.is_empty() { all_totals() } else { values }
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, polygon};
    use sighting_map_geography::store::BoundaryStore;
    use sighting_map_geography_models::CountryBoundary;
    use sighting_map_occurrence::store::RecordStore;
    use sighting_map_occurrence_models::OccurrenceRecord;

    use super::*;

    fn record(country_code: &str, year: i32, individual_count: u32) -> OccurrenceRecord {
        OccurrenceRecord {
            country_code: country_code.to_string(),
            state_province: "Amazonas".to_string(),
            year,
            individual_count,
            observer: "Ana".to_string(),
        }
    }

    fn boundary(code: &str, name: &str, origin: f64) -> CountryBoundary {
        CountryBoundary {
            code: code.to_string(),
            name: name.to_string(),
            geometry: MultiPolygon(vec![polygon![
                (x: origin, y: origin),
                (x: origin + 1.0, y: origin),
                (x: origin + 1.0, y: origin + 1.0),
                (x: origin, y: origin + 1.0),
            ]]),
        }
    }

    fn sample_records() -> Vec<OccurrenceRecord> {
        vec![
            record("BR", 2020, 2),
            record("BR", 2020, 1),
            record("AR", 2020, 1),
            record("BR", 2019, 5),
        ]
    }

    fn sample_boundaries() -> Vec<CountryBoundary> {
        vec![
            boundary("BR", "Brazil", 0.0),
            boundary("AR", "Argentina", 10.0),
            boundary("CL", "Chile", -20.0),
        ]
    }

    fn sample_pipeline() -> Pipeline {
        Pipeline::new(Arc::new(DatasetSnapshot::new(
            RecordStore::new(sample_records()),
            BoundaryStore::new(sample_boundaries()),
        )))
    }

    #[test]
    fn single_year_frame_end_to_end() {
        let mut pipeline = sample_pipeline();
        let frame = pipeline.run(YearSelection::Year(2020)).unwrap();

        assert_eq!(frame.year_label, "2020");

        let table_codes: Vec<&str> = frame
            .table
            .rows
            .iter()
            .map(|r| r.country_code.as_str())
            .collect();
        assert_eq!(table_codes, vec!["BR", "BR", "AR"]);

        let bars: Vec<(&str, u64)> = frame
            .chart
            .bars
            .iter()
            .map(|b| (b.country_code.as_str(), b.total_count))
            .collect();
        assert_eq!(bars, vec![("BR", 3), ("AR", 1)]);

        let features: Vec<(&str, u64)> = frame
            .map_layer
            .features
            .iter()
            .map(|f| (f.code.as_str(), f.total_count))
            .collect();
        assert_eq!(features, vec![("BR", 3), ("AR", 1), ("CL", 0)]);

        assert_eq!(frame.map_layer.legend.domain_min, 0);
        assert_eq!(frame.map_layer.legend.domain_max, 3);
        assert_eq!(frame.map_layer.features[0].style.fill_color, "#800026");
        assert_eq!(frame.map_layer.features[2].style.fill_color, "#ffffcc");

        assert!(frame.join_report.is_clean());
    }

    #[test]
    fn all_years_frame_covers_every_record() {
        let mut pipeline = sample_pipeline();
        let frame = pipeline.run(YearSelection::AllYears).unwrap();

        assert_eq!(frame.year_label, "Todos los años");
        assert_eq!(frame.table.rows.len(), 4);
        assert_eq!(
            frame.table.title,
            "Avistamientos de jaguares en América en el año Todos los años"
        );

        let bars: Vec<(&str, u64)> = frame
            .chart
            .bars
            .iter()
            .map(|b| (b.country_code.as_str(), b.total_count))
            .collect();
        assert_eq!(bars, vec![("BR", 8), ("AR", 1)]);
    }

    #[test]
    fn boundary_without_records_zero_fills_without_warning() {
        let mut boundaries = sample_boundaries();
        boundaries.push(boundary("ZZ", "Zedland", 30.0));
        let mut pipeline = Pipeline::new(Arc::new(DatasetSnapshot::new(
            RecordStore::new(sample_records()),
            BoundaryStore::new(boundaries),
        )));

        let frame = pipeline.run(YearSelection::Year(2020)).unwrap();

        let zz = frame
            .map_layer
            .features
            .iter()
            .find(|f| f.code == "ZZ")
            .unwrap();
        assert_eq!(zz.total_count, 0);
        assert!(frame.join_report.is_clean());
    }

    #[test]
    fn aggregate_without_boundary_is_reported() {
        let mut records = sample_records();
        records.push(record("XX", 2020, 4));
        let mut pipeline = Pipeline::new(Arc::new(DatasetSnapshot::new(
            RecordStore::new(records),
            BoundaryStore::new(sample_boundaries()),
        )));

        let frame = pipeline.run(YearSelection::Year(2020)).unwrap();

        assert!(frame.map_layer.features.iter().all(|f| f.code != "XX"));
        assert_eq!(frame.join_report.dropped_total, 4);
        assert_eq!(frame.join_report.warnings.len(), 1);
        assert_eq!(frame.join_report.warnings[0].country_code, "XX");
    }

    #[test]
    fn empty_boundaries_abort_with_empty_domain() {
        let mut pipeline = Pipeline::new(Arc::new(DatasetSnapshot::new(
            RecordStore::new(sample_records()),
            BoundaryStore::new(Vec::new()),
        )));

        let err = pipeline.run(YearSelection::Year(2020)).unwrap_err();
        assert_eq!(err.to_string(), "no boundary data available");
    }

    #[test]
    fn repeated_runs_reuse_the_memoized_aggregation() {
        let mut pipeline = sample_pipeline();

        let first = pipeline.run(YearSelection::Year(2020)).unwrap();
        let second = pipeline.run(YearSelection::Year(2020)).unwrap();
        assert_eq!(first, second);
        assert_eq!(pipeline.cached_aggregations(), 1);

        pipeline.run(YearSelection::AllYears).unwrap();
        assert_eq!(pipeline.cached_aggregations(), 2);
    }

    #[test]
    fn replacing_the_snapshot_invalidates_the_cache() {
        let mut pipeline = sample_pipeline();
        pipeline.run(YearSelection::Year(2020)).unwrap();
        assert_eq!(pipeline.cached_aggregations(), 1);

        pipeline.set_snapshot(Arc::new(DatasetSnapshot::new(
            RecordStore::new(vec![record("CL", 2021, 2)]),
            BoundaryStore::new(sample_boundaries()),
        )));
        assert_eq!(pipeline.cached_aggregations(), 0);

        let frame = pipeline.run(YearSelection::Year(2021)).unwrap();
        assert_eq!(frame.chart.bars[0].country_code, "CL");
    }

    #[test]
    fn observed_only_scales_over_observed_totals() {
        let mut pipeline = sample_pipeline().with_policy(DomainPolicy::ObservedOnly);
        let frame = pipeline.run(YearSelection::Year(2020)).unwrap();

        assert_eq!(frame.map_layer.legend.domain_min, 1);
        assert_eq!(frame.map_layer.legend.domain_max, 3);
        // The zero-filled country clamps to the domain floor.
        assert_eq!(frame.map_layer.features[2].style.fill_color, "#ffffcc");
        assert_eq!(frame.map_layer.features[0].style.fill_color, "#800026");
    }

    #[test]
    fn observed_only_falls_back_when_nothing_matched() {
        let mut pipeline = sample_pipeline().with_policy(DomainPolicy::ObservedOnly);
        let frame = pipeline.run(YearSelection::Year(1900)).unwrap();

        assert_eq!(frame.map_layer.legend.domain_min, 0);
        assert_eq!(frame.map_layer.legend.domain_max, 0);
        assert!(
            frame
                .map_layer
                .features
                .iter()
                .all(|f| f.style.fill_color == "#ffffcc")
        );
    }

    #[test]
    fn year_options_come_from_the_snapshot() {
        let pipeline = sample_pipeline();
        assert_eq!(
            pipeline.year_options(),
            vec![
                YearSelection::AllYears,
                YearSelection::Year(2019),
                YearSelection::Year(2020),
            ]
        );
    }
}
