//! In-memory store over loaded country boundaries.

use sighting_map_geography_models::CountryBoundary;

/// Country boundaries in source feature order.
///
/// Join output and map-layer feature order both follow this order, so
/// the store never reorders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryStore {
    boundaries: Vec<CountryBoundary>,
}

impl BoundaryStore {
    /// Creates a store over `boundaries`.
    #[must_use]
    pub const fn new(boundaries: Vec<CountryBoundary>) -> Self {
        Self { boundaries }
    }

    /// All boundaries, in source order.
    #[must_use]
    pub fn boundaries(&self) -> &[CountryBoundary] {
        &self.boundaries
    }

    /// Number of boundaries in the store.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Whether the store holds no boundaries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Finds a boundary by its country code.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&CountryBoundary> {
        self.boundaries.iter().find(|boundary| boundary.code == code)
    }
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, polygon};

    use super::*;

    fn boundary(code: &str, name: &str) -> CountryBoundary {
        CountryBoundary {
            code: code.to_string(),
            name: name.to_string(),
            geometry: MultiPolygon(vec![polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 1.0),
            ]]),
        }
    }

    #[test]
    fn preserves_source_order() {
        let store = BoundaryStore::new(vec![
            boundary("BR", "Brazil"),
            boundary("AR", "Argentina"),
            boundary("CL", "Chile"),
        ]);
        let codes: Vec<&str> = store
            .boundaries()
            .iter()
            .map(|b| b.code.as_str())
            .collect();
        assert_eq!(codes, vec!["BR", "AR", "CL"]);
    }

    #[test]
    fn finds_by_code() {
        let store = BoundaryStore::new(vec![boundary("BR", "Brazil")]);
        assert_eq!(store.find("BR").map(|b| b.name.as_str()), Some("Brazil"));
        assert!(store.find("ZZ").is_none());
    }
}
