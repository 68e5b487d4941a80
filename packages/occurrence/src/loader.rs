//! Occurrence CSV file loader.
//!
//! Reads a delimited text export from disk (gunzipping `.gz` paths),
//! decodes it as UTF-8 with a windows-1252 fallback for latin1 exports,
//! and extracts the five canonical columns by header name. Extra columns
//! in the source are ignored.

use std::io::Read as _;
use std::path::Path;

use serde::Deserialize;
use sighting_map_occurrence_models::OccurrenceRecord;

use crate::OccurrenceLoadError;

/// Default field delimiter; the original export is semicolon-delimited.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Source column names for the five canonical record fields.
///
/// Defaults match the original occurrence export. Datasets with other
/// headers override individual names in their dataset definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OccurrenceColumns {
    /// Column holding the ISO country code.
    #[serde(default = "default_country_code_column")]
    pub country_code: String,
    /// Column holding the state or province name.
    #[serde(default = "default_state_province_column")]
    pub state_province: String,
    /// Column holding the sighting year.
    #[serde(default = "default_year_column")]
    pub year: String,
    /// Column holding the individual count.
    #[serde(default = "default_individual_count_column")]
    pub individual_count: String,
    /// Column holding the observer; the original export calls this
    /// `rightsHolder`.
    #[serde(default = "default_observer_column")]
    pub observer: String,
}

fn default_country_code_column() -> String {
    "countryCode".to_string()
}

fn default_state_province_column() -> String {
    "stateProvince".to_string()
}

fn default_year_column() -> String {
    "year".to_string()
}

fn default_individual_count_column() -> String {
    "individualCount".to_string()
}

fn default_observer_column() -> String {
    "rightsHolder".to_string()
}

impl Default for OccurrenceColumns {
    fn default() -> Self {
        Self {
            country_code: default_country_code_column(),
            state_province: default_state_province_column(),
            year: default_year_column(),
            individual_count: default_individual_count_column(),
            observer: default_observer_column(),
        }
    }
}

/// Result of a load: the clean records plus counts of what was dropped
/// or coerced on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Sanitized records in source row order.
    pub records: Vec<OccurrenceRecord>,
    /// Rows rejected for an empty country code or unparseable year.
    pub rejected: u64,
    /// Rows whose individual count was missing or non-numeric and was
    /// coerced to 0.
    pub coerced_counts: u64,
}

/// Loader for occurrence CSV exports.
#[derive(Debug, Clone)]
pub struct OccurrenceCsvLoader {
    delimiter: u8,
    columns: OccurrenceColumns,
}

impl Default for OccurrenceCsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl OccurrenceCsvLoader {
    /// Creates a loader with the original export's defaults
    /// (semicolon-delimited, canonical column names).
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            columns: OccurrenceColumns::default(),
        }
    }

    /// Sets the field delimiter (e.g. `b','` for comma-separated exports).
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the source column names.
    #[must_use]
    pub fn with_columns(mut self, columns: OccurrenceColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Loads and sanitizes occurrence records from `path`.
    ///
    /// Paths ending in `.gz` are gunzipped before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`OccurrenceLoadError`] if the file cannot be read, the
    /// CSV is malformed, or a required column is missing from the header.
    pub fn load(&self, path: &Path) -> Result<LoadOutcome, OccurrenceLoadError> {
        let raw = std::fs::read(path)?;

        let csv_bytes: Vec<u8> = if path.extension().is_some_and(|ext| ext == "gz") {
            let mut decoder = flate2::read::GzDecoder::new(raw.as_slice());
            let mut decompressed = Vec::new();
            decoder.read_to_end(&mut decompressed)?;
            log::debug!("Decompressed {} to {} bytes", path.display(), decompressed.len());
            decompressed
        } else {
            raw
        };

        let text = decode_text(&csv_bytes);
        let outcome = self.parse(&text)?;

        log::info!(
            "Parsed {} occurrence records from {} ({} rejected, {} counts coerced to 0)",
            outcome.records.len(),
            path.display(),
            outcome.rejected,
            outcome.coerced_counts
        );

        Ok(outcome)
    }

    /// Parses occurrence records from already-decoded CSV text.
    ///
    /// # Errors
    ///
    /// Returns [`OccurrenceLoadError`] if the CSV is malformed or a
    /// required column is missing from the header.
    pub fn parse(&self, text: &str) -> Result<LoadOutcome, OccurrenceLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();

        let country_idx = require_column(&headers, &self.columns.country_code)?;
        let state_idx = require_column(&headers, &self.columns.state_province)?;
        let year_idx = require_column(&headers, &self.columns.year)?;
        let count_idx = require_column(&headers, &self.columns.individual_count)?;
        let observer_idx = require_column(&headers, &self.columns.observer)?;

        let mut records = Vec::new();
        let mut rejected: u64 = 0;
        let mut coerced_counts: u64 = 0;

        for result in reader.records() {
            let row = result?;

            let country_code = field(&row, country_idx);
            if country_code.is_empty() {
                log::debug!("Rejecting row {:?}: empty country code", row.position());
                rejected += 1;
                continue;
            }

            let Ok(year) = field(&row, year_idx).parse::<i32>() else {
                log::debug!("Rejecting row {:?}: unparseable year", row.position());
                rejected += 1;
                continue;
            };

            let count_field = field(&row, count_idx);
            let individual_count = match count_field.parse::<u32>() {
                Ok(count) => count,
                Err(_) => {
                    coerced_counts += 1;
                    0
                }
            };

            records.push(OccurrenceRecord {
                country_code: country_code.to_owned(),
                state_province: field(&row, state_idx).to_owned(),
                year,
                individual_count,
                observer: field(&row, observer_idx).to_owned(),
            });
        }

        Ok(LoadOutcome {
            records,
            rejected,
            coerced_counts,
        })
    }
}

/// Decodes raw CSV bytes, preferring UTF-8 and falling back to
/// windows-1252 for latin1 exports. A leading byte-order mark is
/// stripped so the first header cell matches by name.
fn decode_text(bytes: &[u8]) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(utf8) => utf8.to_owned(),
        Err(_) => {
            let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
            if had_errors {
                log::warn!("Occurrence CSV contained bytes invalid even as windows-1252");
            } else {
                log::debug!("Decoded occurrence CSV as windows-1252");
            }
            decoded.into_owned()
        }
    };
    text.trim_start_matches('\u{feff}').to_owned()
}

/// Finds the index of `column` in the header row.
fn require_column(headers: &[String], column: &str) -> Result<usize, OccurrenceLoadError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| OccurrenceLoadError::MissingColumn {
            column: column.to_owned(),
        })
}

/// Returns the trimmed field at `idx`, or `""` for short rows.
fn field<'a>(row: &'a csv::StringRecord, idx: usize) -> &'a str {
    row.get(idx).unwrap_or("").trim()
}
