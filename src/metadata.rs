//! Schema and README generation for a normalized dataset.

use serde::{Deserialize, Serialize};

use crate::mapping::ColumnTable;

/// Column naming the observed place (resolved by ISO code on import)
pub const PLACE_COLUMN: &str = "isoCode";

/// Column holding the observation month
pub const DATE_COLUMN: &str = "Date";

/// Identifying columns; every other column is a statistical variable
const KEY_COLUMNS: [&str; 3] = ["State", PLACE_COLUMN, DATE_COLUMN];

/// Documentation for one canonical output column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDoc {
    /// Canonical identifier (output column name)
    pub id: String,

    /// Human-readable label
    pub label: String,

    /// Raw source headers that map onto this column
    pub source_columns: Vec<String>,
}

/// Schema describing every column of a normalized dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub dataset: String,
    pub description: String,
    pub data_level: String,
    pub columns: Vec<ColumnDoc>,
}

impl DatasetSchema {
    /// Build the schema for `columns` (canonical identifiers) using `table`
    pub fn from_table(
        dataset: &str,
        description: &str,
        data_level: &str,
        table: &ColumnTable,
        columns: &[&str],
    ) -> Self {
        let columns = columns
            .iter()
            .map(|&id| ColumnDoc {
                id: id.to_string(),
                label: table.label_for(id).unwrap_or(id).to_string(),
                source_columns: table.synonyms(id).iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        Self {
            dataset: dataset.to_string(),
            description: description.to_string(),
            data_level: data_level.to_string(),
            columns,
        }
    }

    /// Canonical columns that carry observation values
    pub fn statvar_columns(&self) -> impl Iterator<Item = &ColumnDoc> {
        self.columns
            .iter()
            .filter(|c| !KEY_COLUMNS.contains(&c.id.as_str()))
    }

    /// Render the template MCF for the dataset CSV: one place node keyed by
    /// ISO code, then one StatVarObservation node per value column
    pub fn tmcf(&self) -> String {
        let ds = &self.dataset;
        let mut out = format!(
            "Node: E:{ds}->E0\ntypeOf: dcs:Place\nisoCode: C:{ds}->{PLACE_COLUMN}\n"
        );
        for (index, column) in self.statvar_columns().enumerate() {
            out.push_str(&format!(
                "\nNode: E:{ds}->E{}\n\
                 typeOf: dcs:StatVarObservation\n\
                 variableMeasured: dcs:{}\n\
                 observationAbout: E:{ds}->E0\n\
                 observationDate: C:{ds}->{DATE_COLUMN}\n\
                 value: C:{ds}->{}\n",
                index + 1,
                column.id,
                column.id
            ));
        }
        out
    }

    /// Render a README describing the dataset and its columns
    pub fn readme(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.dataset));
        out.push_str(&format!("{} ({}).\n\n", self.description, self.data_level));
        out.push_str(&format!(
            "Generated file: `{ds}.csv`. Schema: `{ds}_schema.json`. Template MCF: `{ds}.tmcf`.\n\n",
            ds = self.dataset
        ));
        out.push_str("## Columns\n\n");
        out.push_str("| Column | Description | Source columns |\n");
        out.push_str("| --- | --- | --- |\n");
        for column in &self.columns {
            let sources = column
                .source_columns
                .iter()
                .map(|s| format!("`{}`", s))
                .collect::<Vec<_>>()
                .join("<br>");
            out.push_str(&format!("| {} | {} | {} |\n", column.id, column.label, sources));
        }
        out
    }
}
