//! Serializable choropleth layer assembly.
//!
//! Builds the full layer an external renderer needs: one styled
//! `GeoJSON` feature per joined country, a tooltip spec, a legend
//! carrying the scale endpoints and ramp stops, and the default
//! viewport with the fitted bounds of all geometry.

use geo::BoundingRect as _;
use serde::{Deserialize, Serialize};
use sighting_map_geography_models::JoinedCountry;

use crate::color::ColorScale;

/// Tooltip alias shown before the country name.
pub const TOOLTIP_COUNTRY_ALIAS: &str = "País: ";

/// Tooltip alias shown before the sighting total.
pub const TOOLTIP_COUNT_ALIAS: &str = "Número de avistamientos: ";

/// Per-feature polygon styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    /// Fill color as `#rrggbb`.
    pub fill_color: String,
    /// Border color.
    pub color: String,
    /// Border stroke weight.
    pub weight: f64,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f64,
}

impl FeatureStyle {
    /// The dashboard's boundary styling around a computed fill color.
    #[must_use]
    pub fn with_fill(fill_color: String) -> Self {
        Self {
            fill_color,
            color: "black".to_string(),
            weight: 0.5,
            fill_opacity: 0.7,
        }
    }
}

/// Styling applied to whichever feature the pointer hovers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightStyle {
    /// Border stroke weight while highlighted.
    pub weight: f64,
    /// Border color while highlighted.
    pub color: String,
    /// Fill opacity while highlighted.
    pub fill_opacity: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            weight: 3.0,
            color: "black".to_string(),
            fill_opacity: 0.9,
        }
    }
}

/// Which feature properties the tooltip shows, and their aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipSpec {
    /// Serialized feature property keys, in display order.
    pub fields: Vec<String>,
    /// Alias text shown before each field, same order.
    pub aliases: Vec<String>,
}

impl Default for TooltipSpec {
    fn default() -> Self {
        Self {
            fields: vec!["name".to_string(), "totalCount".to_string()],
            aliases: vec![
                TOOLTIP_COUNTRY_ALIAS.to_string(),
                TOOLTIP_COUNT_ALIAS.to_string(),
            ],
        }
    }
}

/// Colorbar legend data for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Caption below the colorbar.
    pub caption: String,
    /// Lower end of the scale domain.
    pub domain_min: u64,
    /// Upper end of the scale domain.
    pub domain_max: u64,
    /// Ramp stops as `#rrggbb`, start to end.
    pub ramp_stops: Vec<String>,
}

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Center as `[latitude, longitude]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: [20.0, -60.0],
            zoom: 2,
        }
    }
}

/// Bounding box of all layer geometry, for renderers that fit bounds
/// instead of using the fixed viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerBounds {
    /// Minimum longitude.
    pub west: f64,
    /// Minimum latitude.
    pub south: f64,
    /// Maximum longitude.
    pub east: f64,
    /// Maximum latitude.
    pub north: f64,
}

/// One styled country feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFeature {
    /// ISO country code.
    pub code: String,
    /// Country display name.
    pub name: String,
    /// Sighting total for the selected year.
    pub total_count: u64,
    /// Polygon styling with the scale-derived fill.
    pub style: FeatureStyle,
    /// Country geometry as a `GeoJSON` geometry object.
    pub geometry: geojson::Geometry,
}

/// The assembled choropleth layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayer {
    /// Layer name shown in the renderer's layer control.
    pub name: String,
    /// One feature per joined country, in boundary order.
    pub features: Vec<MapFeature>,
    /// Hover styling shared by all features.
    pub highlight_style: HighlightStyle,
    /// Tooltip fields and aliases.
    pub tooltip: TooltipSpec,
    /// Colorbar legend.
    pub legend: Legend,
    /// Initial viewport.
    pub viewport: Viewport,
    /// Fitted bounds of all geometry; `None` when the layer is empty.
    pub bounds: Option<LayerBounds>,
}

/// Assembles the choropleth layer for one dashboard frame.
///
/// `year_label` is embedded verbatim in the layer name and legend
/// caption, whether it is a year or the all-years label.
#[must_use]
pub fn assemble_layer(
    joined: &[JoinedCountry],
    scale: &ColorScale,
    year_label: &str,
) -> MapLayer {
    let features = joined
        .iter()
        .map(|row| MapFeature {
            code: row.code().to_owned(),
            name: row.name().to_owned(),
            total_count: row.total_count,
            style: FeatureStyle::with_fill(scale.color(row.total_count).to_hex()),
            geometry: geojson::Geometry::new(geojson::Value::from(&row.boundary.geometry)),
        })
        .collect();

    MapLayer {
        name: format!("Avistamientos por país ({year_label})"),
        features,
        highlight_style: HighlightStyle::default(),
        tooltip: TooltipSpec::default(),
        legend: Legend {
            caption: format!("Avistamientos ({year_label})"),
            domain_min: scale.domain_min(),
            domain_max: scale.domain_max(),
            ramp_stops: scale
                .ramp()
                .stops()
                .iter()
                .map(|stop| stop.to_hex())
                .collect(),
        },
        viewport: Viewport::default(),
        bounds: layer_bounds(joined),
    }
}

/// Unions every boundary's bounding rect.
fn layer_bounds(joined: &[JoinedCountry]) -> Option<LayerBounds> {
    let mut bounds: Option<LayerBounds> = None;
    for row in joined {
        let Some(rect) = row.boundary.geometry.bounding_rect() else {
            continue;
        };
        bounds = Some(match bounds {
            None => LayerBounds {
                west: rect.min().x,
                south: rect.min().y,
                east: rect.max().x,
                north: rect.max().y,
            },
            Some(current) => LayerBounds {
                west: current.west.min(rect.min().x),
                south: current.south.min(rect.min().y),
                east: current.east.max(rect.max().x),
                north: current.north.max(rect.max().y),
            },
        });
    }
    bounds
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, polygon};
    use sighting_map_geography_models::CountryBoundary;

    use super::*;
    use crate::color::ColorScaleBuilder;

    fn joined(code: &str, name: &str, origin: f64, total_count: u64) -> JoinedCountry {
        JoinedCountry {
            boundary: CountryBoundary {
                code: code.to_string(),
                name: name.to_string(),
                geometry: MultiPolygon(vec![polygon![
                    (x: origin, y: origin),
                    (x: origin + 1.0, y: origin),
                    (x: origin + 1.0, y: origin + 1.0),
                    (x: origin, y: origin + 1.0),
                ]]),
            },
            total_count,
        }
    }

    fn sample_rows() -> Vec<JoinedCountry> {
        vec![
            joined("BR", "Brazil", 0.0, 3),
            joined("AR", "Argentina", 10.0, 1),
            joined("CL", "Chile", -20.0, 0),
        ]
    }

    #[test]
    fn one_feature_per_row_in_row_order() {
        let rows = sample_rows();
        let scale = ColorScaleBuilder::new().build(&[0, 1, 3]).unwrap();
        let layer = assemble_layer(&rows, &scale, "2020");

        let codes: Vec<&str> = layer.features.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["BR", "AR", "CL"]);
    }

    #[test]
    fn fills_come_from_the_scale() {
        let rows = sample_rows();
        let scale = ColorScaleBuilder::new().build(&[0, 1, 3]).unwrap();
        let layer = assemble_layer(&rows, &scale, "2020");

        assert_eq!(layer.features[0].style.fill_color, "#800026");
        assert_eq!(layer.features[2].style.fill_color, "#ffffcc");
    }

    #[test]
    fn boundary_styling_is_fixed() {
        let rows = sample_rows();
        let scale = ColorScaleBuilder::new().build(&[0, 3]).unwrap();
        let layer = assemble_layer(&rows, &scale, "2020");

        let style = &layer.features[0].style;
        assert_eq!(style.color, "black");
        assert!((style.weight - 0.5).abs() < f64::EPSILON);
        assert!((style.fill_opacity - 0.7).abs() < f64::EPSILON);

        let highlight = &layer.highlight_style;
        assert!((highlight.weight - 3.0).abs() < f64::EPSILON);
        assert_eq!(highlight.color, "black");
        assert!((highlight.fill_opacity - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn year_label_is_embedded_verbatim() {
        let rows = sample_rows();
        let scale = ColorScaleBuilder::new().build(&[0, 3]).unwrap();
        let layer = assemble_layer(&rows, &scale, "Todos los años");

        assert_eq!(layer.name, "Avistamientos por país (Todos los años)");
        assert_eq!(layer.legend.caption, "Avistamientos (Todos los años)");
    }

    #[test]
    fn legend_carries_domain_and_ramp() {
        let rows = sample_rows();
        let scale = ColorScaleBuilder::new().build(&[0, 1, 3]).unwrap();
        let layer = assemble_layer(&rows, &scale, "2020");

        assert_eq!(layer.legend.domain_min, 0);
        assert_eq!(layer.legend.domain_max, 3);
        assert_eq!(layer.legend.ramp_stops.len(), 9);
        assert_eq!(layer.legend.ramp_stops[0], "#ffffcc");
        assert_eq!(layer.legend.ramp_stops[8], "#800026");
    }

    #[test]
    fn default_viewport_is_the_americas() {
        let rows = sample_rows();
        let scale = ColorScaleBuilder::new().build(&[0, 3]).unwrap();
        let layer = assemble_layer(&rows, &scale, "2020");

        assert_eq!(layer.viewport.center, [20.0, -60.0]);
        assert_eq!(layer.viewport.zoom, 2);
    }

    #[test]
    fn bounds_union_all_geometry() {
        let rows = sample_rows();
        let scale = ColorScaleBuilder::new().build(&[0, 3]).unwrap();
        let bounds = assemble_layer(&rows, &scale, "2020").bounds.unwrap();

        assert!((bounds.west - -20.0).abs() < f64::EPSILON);
        assert!((bounds.south - -20.0).abs() < f64::EPSILON);
        assert!((bounds.east - 11.0).abs() < f64::EPSILON);
        assert!((bounds.north - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_layer_has_no_bounds() {
        let scale = ColorScaleBuilder::new().build(&[0]).unwrap();
        let layer = assemble_layer(&[], &scale, "2020");

        assert!(layer.features.is_empty());
        assert!(layer.bounds.is_none());
    }

    #[test]
    fn serialized_shape_uses_camel_case_keys() {
        let rows = sample_rows();
        let scale = ColorScaleBuilder::new().build(&[0, 3]).unwrap();
        let layer = assemble_layer(&rows, &scale, "2020");

        let json = serde_json::to_value(&layer).unwrap();
        assert!(json.pointer("/features/0/style/fillColor").is_some());
        assert!(json.pointer("/highlightStyle/fillOpacity").is_some());
        assert_eq!(
            json.pointer("/tooltip/aliases/1").and_then(|v| v.as_str()),
            Some("Número de avistamientos: ")
        );
        assert_eq!(
            json.pointer("/features/0/geometry/type")
                .and_then(|v| v.as_str()),
            Some("MultiPolygon")
        );
    }
}
