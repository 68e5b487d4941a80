//! Bar-chart spec for per-country sighting totals.

use serde::{Deserialize, Serialize};
use sighting_map_occurrence_models::CountryAggregate;

/// X-axis label.
pub const CHART_X_LABEL: &str = "País";

/// Y-axis label.
pub const CHART_Y_LABEL: &str = "Avistamientos";

/// Fill color for every bar.
pub const CHART_BAR_COLOR: &str = "orange";

/// A serializable bar-chart description.
///
/// Bars are emitted in aggregate order (total descending), which is the
/// order the chart renders them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartSpec {
    /// Chart title.
    pub title: String,
    /// X-axis label.
    pub x_label: String,
    /// Y-axis label.
    pub y_label: String,
    /// Bar fill color.
    pub color: String,
    /// One bar per country, in input order.
    pub bars: Vec<CountryAggregate>,
}

/// Builds the bar-chart spec over aggregated totals.
///
/// `species_label` and `year_label` are embedded verbatim in the title.
#[must_use]
pub fn build_chart(
    aggregates: &[CountryAggregate],
    species_label: &str,
    year_label: &str,
) -> BarChartSpec {
    BarChartSpec {
        title: format!("Avistamientos de {species_label} en América por país ({year_label})"),
        x_label: CHART_X_LABEL.to_string(),
        y_label: CHART_Y_LABEL.to_string(),
        color: CHART_BAR_COLOR.to_string(),
        bars: aggregates.to_vec(),
    }
}
