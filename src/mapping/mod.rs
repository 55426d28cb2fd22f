pub mod birth_control;

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Column table for the NHM birth-control dataset
pub static BIRTH_CONTROL: Lazy<ColumnTable> = Lazy::new(|| {
    ColumnTable::new(
        "birth_control",
        birth_control::COLS_TO_NODES,
        birth_control::CLEAN_NAMES,
    )
});

/// Result of resolving a raw column header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLookup {
    /// Header is known; carries the canonical identifier and clean label
    Mapped {
        id: &'static str,
        label: &'static str,
    },
    /// Header is not in the table; the column is dropped
    Unmapped,
}

/// Immutable raw-header -> canonical-column mapping, indexed once
#[derive(Debug)]
pub struct ColumnTable {
    name: &'static str,
    nodes: &'static [(&'static str, &'static str)],
    node_index: HashMap<&'static str, &'static str>,
    label_index: HashMap<&'static str, &'static str>,
}

impl ColumnTable {
    pub fn new(
        name: &'static str,
        nodes: &'static [(&'static str, &'static str)],
        labels: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name,
            nodes,
            node_index: nodes.iter().copied().collect(),
            label_index: labels.iter().copied().collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve a raw header. Matching is exact: case and whitespace count.
    pub fn lookup(&self, raw: &str) -> ColumnLookup {
        match self.node_index.get(raw) {
            Some(&id) => ColumnLookup::Mapped {
                id,
                label: self.label_index.get(raw).copied().unwrap_or(id),
            },
            None => ColumnLookup::Unmapped,
        }
    }

    /// Distinct canonical identifiers, in table order
    pub fn canonical_columns(&self) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> = Vec::new();
        for (_, id) in self.nodes {
            if !columns.contains(id) {
                columns.push(*id);
            }
        }
        columns
    }

    /// Every raw header that maps to `id`, in table order
    pub fn synonyms(&self, id: &str) -> Vec<&'static str> {
        self.nodes
            .iter()
            .filter(|(_, node)| *node == id)
            .map(|(raw, _)| *raw)
            .collect()
    }

    /// Clean label of a canonical column, taken from its first raw synonym
    pub fn label_for(&self, id: &str) -> Option<&'static str> {
        self.synonyms(id)
            .first()
            .and_then(|raw| self.label_index.get(raw).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(raw: &str) -> Option<&'static str> {
        match BIRTH_CONTROL.lookup(raw) {
            ColumnLookup::Mapped { id, .. } => Some(id),
            ColumnLookup::Unmapped => None,
        }
    }

    #[test]
    fn test_lookup_oral_pills() {
        assert_eq!(
            BIRTH_CONTROL.lookup("Oral Pills distributed"),
            ColumnLookup::Mapped {
                id: "Count_ContraceptiveDistribution_OralPill",
                label: "Number of distributed contraceptives (oral pills)",
            }
        );
    }

    #[test]
    fn test_lookup_iucd_synonyms() {
        let a = id_of("Total IUCD Insertions done(public+private)");
        let b = id_of("Total Interval IUCD Insertions done");
        assert_eq!(a, Some("Count_BirthControlEvent_IUCDInsertion"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(BIRTH_CONTROL.lookup("oral pills distributed"), ColumnLookup::Unmapped);
        assert_eq!(BIRTH_CONTROL.lookup("Oral Pills distributed "), ColumnLookup::Unmapped);
        assert_eq!(BIRTH_CONTROL.lookup(""), ColumnLookup::Unmapped);
        assert_eq!(BIRTH_CONTROL.lookup("Remarks"), ColumnLookup::Unmapped);
    }

    #[test]
    fn test_every_synonym_resolves_to_its_canonical_column() {
        for id in BIRTH_CONTROL.canonical_columns() {
            let synonyms = BIRTH_CONTROL.synonyms(id);
            assert!(!synonyms.is_empty());
            for raw in synonyms {
                assert_eq!(id_of(raw), Some(id));
            }
        }
    }

    #[test]
    fn test_canonical_columns_are_distinct() {
        let columns = BIRTH_CONTROL.canonical_columns();
        assert_eq!(columns.len(), 12);
        assert_eq!(&columns[..3], &["State", "isoCode", "Date"]);
        assert_eq!(
            columns
                .iter()
                .filter(|c| **c == "Count_BirthControlEvent_IUCDInsertion")
                .count(),
            1
        );
    }

    #[test]
    fn test_label_for() {
        assert_eq!(
            BIRTH_CONTROL.label_for("Count_Death_BirthControlSterilisation"),
            Some("Total cases of deaths following Sterilisation (Male and Female)")
        );
        assert_eq!(BIRTH_CONTROL.label_for("Count_Unknown"), None);
    }
}
