#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for loading sighting datasets and writing dashboard frames.
//!
//! The binary in this package is a thin clap shell over these helpers:
//! a [`config::DatasetDefinition`] names the two input files, the load
//! functions turn them into a
//! [`DatasetSnapshot`](sighting_map_pipeline::snapshot::DatasetSnapshot),
//! and [`write_frame`] lays a finished frame out on disk.

pub mod config;

use std::path::Path;

use sighting_map_geography::loader::BoundaryGeoJsonLoader;
use sighting_map_geography::store::BoundaryStore;
use sighting_map_occurrence::loader::OccurrenceCsvLoader;
use sighting_map_occurrence::store::RecordStore;
use sighting_map_pipeline::DashboardFrame;
use sighting_map_pipeline::snapshot::DatasetSnapshot;

use crate::config::DatasetDefinition;

/// File name for the tabular view document.
pub const TABLE_FILE: &str = "table.json";
/// File name for the bar chart document.
pub const CHART_FILE: &str = "chart.json";
/// File name for the choropleth layer document.
pub const MAP_LAYER_FILE: &str = "map_layer.json";

/// Loads the occurrence CSV named by `definition` into a record store.
///
/// # Errors
///
/// Returns an error if the definition has no occurrence path or the CSV
/// fails to load.
pub fn load_records(
    definition: &DatasetDefinition,
) -> Result<RecordStore, Box<dyn std::error::Error>> {
    let path = definition.occurrences.as_deref().ok_or_else(|| {
        "No occurrence CSV configured; pass --occurrences or set it in the dataset TOML".to_string()
    })?;
    let outcome = OccurrenceCsvLoader::new()
        .with_delimiter(definition.delimiter_byte())
        .with_columns(definition.columns.clone())
        .load(path)?;
    Ok(RecordStore::new(outcome.records))
}

/// Loads the boundary GeoJSON named by `definition` into a boundary store.
///
/// # Errors
///
/// Returns an error if the definition has no boundary path or the GeoJSON
/// fails to load.
pub fn load_boundaries(
    definition: &DatasetDefinition,
) -> Result<BoundaryStore, Box<dyn std::error::Error>> {
    let path = definition.boundaries.as_deref().ok_or_else(|| {
        "No boundary GeoJSON configured; pass --boundaries or set it in the dataset TOML"
            .to_string()
    })?;
    let outcome = BoundaryGeoJsonLoader::new()
        .with_fields(definition.fields.clone())
        .load(path)?;
    Ok(BoundaryStore::new(outcome.boundaries))
}

/// Loads both dataset files into an immutable snapshot.
///
/// # Errors
///
/// Returns an error if either file is unconfigured or fails to load.
pub fn load_snapshot(
    definition: &DatasetDefinition,
) -> Result<DatasetSnapshot, Box<dyn std::error::Error>> {
    Ok(DatasetSnapshot::new(
        load_records(definition)?,
        load_boundaries(definition)?,
    ))
}

/// Writes the frame's three view documents into `dir`, creating the
/// directory if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a document
/// fails to serialize or write.
pub fn write_frame(dir: &Path, frame: &DashboardFrame) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(
        dir.join(TABLE_FILE),
        serde_json::to_string_pretty(&frame.table)?,
    )?;
    std::fs::write(
        dir.join(CHART_FILE),
        serde_json::to_string_pretty(&frame.chart)?,
    )?;
    std::fs::write(
        dir.join(MAP_LAYER_FILE),
        serde_json::to_string_pretty(&frame.map_layer)?,
    )?;
    Ok(())
}
