//! Tabular sightings view with the dashboard's Spanish headers.

use serde::{Deserialize, Serialize};
use sighting_map_occurrence_models::OccurrenceRecord;

/// Column headers in display order. The count column sits before the
/// year column, matching the dashboard's layout.
pub const TABLE_COLUMNS: [&str; 5] = [
    "Código País",
    "Provincia o Estado",
    "Número de individuos",
    "Año",
    "Observador",
];

/// One display row, serialized under the Spanish headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// ISO country code.
    #[serde(rename = "Código País")]
    pub country_code: String,
    /// State or province of the sighting.
    #[serde(rename = "Provincia o Estado")]
    pub state_province: String,
    /// Individuals observed.
    #[serde(rename = "Número de individuos")]
    pub individual_count: u32,
    /// Sighting year.
    #[serde(rename = "Año")]
    pub year: i32,
    /// Who reported the sighting.
    #[serde(rename = "Observador")]
    pub observer: String,
}

impl From<&OccurrenceRecord> for TableRow {
    fn from(record: &OccurrenceRecord) -> Self {
        Self {
            country_code: record.country_code.clone(),
            state_province: record.state_province.clone(),
            individual_count: record.individual_count,
            year: record.year,
            observer: record.observer.clone(),
        }
    }
}

/// The assembled table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    /// Heading above the table.
    pub title: String,
    /// Column headers in display order.
    pub columns: Vec<String>,
    /// Rows in post-filter record order.
    pub rows: Vec<TableRow>,
}

/// Builds the table view over post-filter records.
///
/// `species_label` and `year_label` are embedded verbatim in the
/// heading.
#[must_use]
pub fn build_table(
    records: &[OccurrenceRecord],
    species_label: &str,
    year_label: &str,
) -> TableView {
    TableView {
        title: format!("Avistamientos de {species_label} en América en el año {year_label}"),
        columns: TABLE_COLUMNS.iter().map(|&column| column.to_owned()).collect(),
        rows: records.iter().map(TableRow::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country_code: &str, year: i32) -> OccurrenceRecord {
        OccurrenceRecord {
            country_code: country_code.to_string(),
            state_province: "Amazonas".to_string(),
            year,
            individual_count: 2,
            observer: "Ana".to_string(),
        }
    }

    #[test]
    fn rows_keep_record_order() {
        let records = vec![record("BR", 2020), record("AR", 2020), record("CL", 2019)];
        let table = build_table(&records, "jaguares", "Todos los años");

        let codes: Vec<&str> = table.rows.iter().map(|r| r.country_code.as_str()).collect();
        assert_eq!(codes, vec!["BR", "AR", "CL"]);
    }

    #[test]
    fn title_embeds_species_and_year_label() {
        let table = build_table(&[], "jaguares", "2020");
        assert_eq!(
            table.title,
            "Avistamientos de jaguares en América en el año 2020"
        );
    }

    #[test]
    fn columns_put_count_before_year() {
        let table = build_table(&[], "jaguares", "2020");
        assert_eq!(
            table.columns,
            vec![
                "Código País",
                "Provincia o Estado",
                "Número de individuos",
                "Año",
                "Observador",
            ]
        );
    }

    #[test]
    fn rows_serialize_under_spanish_headers() {
        let json = serde_json::to_string(&TableRow::from(&record("BR", 2020))).unwrap();
        assert!(json.contains(r#""Código País":"BR""#));
        assert!(json.contains(r#""Número de individuos":2"#));
        assert!(json.contains(r#""Año":2020"#));
    }

    #[test]
    fn empty_records_build_an_empty_table() {
        let table = build_table(&[], "jaguares", "2020");
        assert!(table.rows.is_empty());
    }
}
