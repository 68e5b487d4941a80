//! `GeoJSON` boundary file loader.
//!
//! Reads a `FeatureCollection` of country polygons and extracts one
//! [`CountryBoundary`] per feature. Features with missing properties or
//! non-areal geometry are skipped with a warning; duplicate country
//! codes fail the whole load.

use std::collections::BTreeSet;
use std::path::Path;

use geo::MultiPolygon;
use geojson::GeoJson;
use serde::Deserialize;
use sighting_map_geography_models::CountryBoundary;

use crate::BoundaryLoadError;

/// Property names carrying each feature's country code and display name.
///
/// Defaults match the original country-polygon dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoundaryFields {
    /// Property holding the ISO country code.
    #[serde(default = "default_code_property")]
    pub code: String,
    /// Property holding the country display name.
    #[serde(default = "default_name_property")]
    pub name: String,
}

fn default_code_property() -> String {
    "Code".to_string()
}

fn default_name_property() -> String {
    "NAME".to_string()
}

impl Default for BoundaryFields {
    fn default() -> Self {
        Self {
            code: default_code_property(),
            name: default_name_property(),
        }
    }
}

/// Result of a load: the usable boundaries plus a count of skipped
/// features.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLoadOutcome {
    /// Boundaries in feature order.
    pub boundaries: Vec<CountryBoundary>,
    /// Features skipped for missing properties or unsupported geometry.
    pub skipped: u64,
}

/// Loader for country boundary `GeoJSON` files.
#[derive(Debug, Clone, Default)]
pub struct BoundaryGeoJsonLoader {
    fields: BoundaryFields,
}

impl BoundaryGeoJsonLoader {
    /// Creates a loader with the original dataset's property names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the property names to read the code and name from.
    #[must_use]
    pub fn with_fields(mut self, fields: BoundaryFields) -> Self {
        self.fields = fields;
        self
    }

    /// Loads country boundaries from the `GeoJSON` file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryLoadError`] if the file cannot be read, is not
    /// valid `GeoJSON`, is not a `FeatureCollection`, or contains two
    /// features with the same country code.
    pub fn load(&self, path: &Path) -> Result<BoundaryLoadOutcome, BoundaryLoadError> {
        let text = std::fs::read_to_string(path)?;
        let outcome = self.parse(&text)?;

        log::info!(
            "Loaded {} country boundaries from {} ({} features skipped)",
            outcome.boundaries.len(),
            path.display(),
            outcome.skipped
        );

        Ok(outcome)
    }

    /// Parses country boundaries from `GeoJSON` text.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryLoadError`] if the text is not valid `GeoJSON`,
    /// is not a `FeatureCollection`, or contains duplicate country codes.
    pub fn parse(&self, text: &str) -> Result<BoundaryLoadOutcome, BoundaryLoadError> {
        let geojson: GeoJson = text.parse()?;
        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(BoundaryLoadError::NotAFeatureCollection);
        };

        let mut boundaries = Vec::with_capacity(collection.features.len());
        let mut seen_codes = BTreeSet::new();
        let mut skipped: u64 = 0;

        for feature in collection.features {
            let Some(code) = string_property(&feature, &self.fields.code) else {
                log::warn!("Skipping boundary feature without '{}'", self.fields.code);
                skipped += 1;
                continue;
            };
            let Some(name) = string_property(&feature, &self.fields.name) else {
                log::warn!("Skipping boundary '{code}' without '{}'", self.fields.name);
                skipped += 1;
                continue;
            };

            let Some(geometry) = feature.geometry else {
                log::warn!("Skipping boundary '{code}': no geometry");
                skipped += 1;
                continue;
            };
            let Ok(geo_geometry) = geo::Geometry::<f64>::try_from(geometry) else {
                log::warn!("Skipping boundary '{code}': unconvertible geometry");
                skipped += 1;
                continue;
            };
            let geometry = match geo_geometry {
                geo::Geometry::MultiPolygon(multi_polygon) => multi_polygon,
                geo::Geometry::Polygon(polygon) => MultiPolygon(vec![polygon]),
                _ => {
                    log::warn!("Skipping boundary '{code}': not a polygonal geometry");
                    skipped += 1;
                    continue;
                }
            };

            if !seen_codes.insert(code.clone()) {
                return Err(BoundaryLoadError::DuplicateCode { code });
            }

            boundaries.push(CountryBoundary {
                code,
                name,
                geometry,
            });
        }

        Ok(BoundaryLoadOutcome {
            boundaries,
            skipped,
        })
    }
}

/// Reads a non-empty trimmed string property from a feature.
fn string_property(feature: &geojson::Feature, name: &str) -> Option<String> {
    feature
        .properties
        .as_ref()?
        .get(name)?
        .as_str()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
