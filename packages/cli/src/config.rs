//! Config-driven sighting dataset definition.
//!
//! [`DatasetDefinition`] captures everything unique about one occurrence
//! dataset in a serializable config struct: where the two files live, how
//! the CSV is delimited, and which columns and properties to read. A
//! definition matching the original jaguar export is embedded at compile
//! time via [`include_str!`] and used when no TOML path is given.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sighting_map_geography::loader::BoundaryFields;
use sighting_map_occurrence::loader::{DEFAULT_DELIMITER, OccurrenceColumns};
use sighting_map_pipeline::DEFAULT_SPECIES_LABEL;

/// Default dataset config embedded at compile time.
const DEFAULT_DATASET_TOML: &str = include_str!("../datasets/jaguares.toml");

/// A complete, config-driven sighting dataset definition.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDefinition {
    /// Species label embedded in view titles (e.g., `"jaguares"`).
    #[serde(default = "default_species_label")]
    pub species_label: String,
    /// Path to the occurrence CSV export (plain or gzip-compressed).
    #[serde(default)]
    pub occurrences: Option<PathBuf>,
    /// Path to the country boundary GeoJSON.
    #[serde(default)]
    pub boundaries: Option<PathBuf>,
    /// Field delimiter for the occurrence CSV.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Occurrence CSV column names.
    #[serde(default)]
    pub columns: OccurrenceColumns,
    /// Boundary GeoJSON property names.
    #[serde(default)]
    pub fields: BoundaryFields,
}

impl DatasetDefinition {
    /// Overlays explicitly passed file paths over the definition's own.
    #[must_use]
    pub fn with_paths(
        mut self,
        occurrences: Option<PathBuf>,
        boundaries: Option<PathBuf>,
    ) -> Self {
        if occurrences.is_some() {
            self.occurrences = occurrences;
        }
        if boundaries.is_some() {
            self.boundaries = boundaries;
        }
        self
    }

    /// The delimiter as the single byte the CSV reader takes.
    ///
    /// Only the first byte of the configured string is used; an empty
    /// string falls back to the default delimiter.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter
            .as_bytes()
            .first()
            .copied()
            .unwrap_or(DEFAULT_DELIMITER)
    }
}

fn default_species_label() -> String {
    DEFAULT_SPECIES_LABEL.to_string()
}

fn default_delimiter() -> String {
    char::from(DEFAULT_DELIMITER).to_string()
}

/// Parses a [`DatasetDefinition`] from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or doesn't match the schema.
pub fn parse_dataset_toml(toml_str: &str) -> Result<DatasetDefinition, String> {
    toml::de::from_str(toml_str).map_err(|e| e.to_string())
}

/// Reads and parses a dataset definition TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn load_dataset_toml(path: &Path) -> Result<DatasetDefinition, String> {
    let toml_str = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_dataset_toml(&toml_str)
}

/// Returns the embedded default jaguar dataset definition.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (a compile-time guarantee
/// since the config is baked into the binary).
#[must_use]
pub fn default_dataset() -> DatasetDefinition {
    parse_dataset_toml(DEFAULT_DATASET_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse jaguares.toml: {e}"))
}
