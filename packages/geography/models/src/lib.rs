#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Country boundary polygon types and the joined choropleth row.
//!
//! Boundaries are the left-hand side of the map join: every boundary in
//! the loaded set appears exactly once in the joined output, matched or
//! not. Geometry is held as [`geo::MultiPolygon`] so single polygons and
//! island groups go through the same code path.

use geo::MultiPolygon;

/// One country polygon from the boundary dataset.
///
/// `code` is unique across the loaded set (the loader rejects duplicate
/// codes). Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryBoundary {
    /// ISO country code, the join key (e.g. "BR").
    pub code: String,
    /// Human-readable country name for tooltips.
    pub name: String,
    /// Country outline in WGS84 lon/lat coordinates.
    pub geometry: MultiPolygon<f64>,
}

/// A boundary with its sighting total after the left join.
///
/// Exactly one `JoinedCountry` exists per input boundary. A boundary
/// with no matching aggregate carries `total_count == 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedCountry {
    /// The boundary this row renders.
    pub boundary: CountryBoundary,
    /// Total sightings joined onto the boundary (0 if unmatched).
    pub total_count: u64,
}

impl JoinedCountry {
    /// Returns the country code of the underlying boundary.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.boundary.code
    }

    /// Returns the country name of the underlying boundary.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.boundary.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, LineString, Polygon};

    fn square(origin: f64) -> MultiPolygon<f64> {
        let ring = LineString::from(vec![
            Coord {
                x: origin,
                y: origin,
            },
            Coord {
                x: origin + 1.0,
                y: origin,
            },
            Coord {
                x: origin + 1.0,
                y: origin + 1.0,
            },
            Coord {
                x: origin,
                y: origin + 1.0,
            },
            Coord {
                x: origin,
                y: origin,
            },
        ]);
        MultiPolygon(vec![Polygon::new(ring, vec![])])
    }

    #[test]
    fn joined_country_exposes_boundary_fields() {
        let joined = JoinedCountry {
            boundary: CountryBoundary {
                code: "BR".to_string(),
                name: "Brazil".to_string(),
                geometry: square(0.0),
            },
            total_count: 3,
        };
        assert_eq!(joined.code(), "BR");
        assert_eq!(joined.name(), "Brazil");
    }
}
