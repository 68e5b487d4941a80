#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Country boundary loading and storage.
//!
//! Parses a `GeoJSON` `FeatureCollection` of country polygons into
//! [`CountryBoundary`](sighting_map_geography_models::CountryBoundary)
//! values and holds them in a [`BoundaryStore`](store::BoundaryStore)
//! that preserves source order. Damaged features are skipped with a
//! warning; duplicate country codes abort the load.

pub mod loader;
pub mod store;

use thiserror::Error;

/// Errors that can occur while loading boundary data.
#[derive(Debug, Error)]
pub enum BoundaryLoadError {
    /// File read failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// GeoJSON parsing failed.
    #[error("GeoJSON parse error: {0}")]
    Geojson(#[from] geojson::Error),

    /// The file parsed as GeoJSON but is not a `FeatureCollection`.
    #[error("boundary file is not a GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    /// Two features carried the same country code.
    #[error("duplicate country code '{code}' in boundary file")]
    DuplicateCode {
        /// The country code that appeared more than once.
        code: String,
    },
}
