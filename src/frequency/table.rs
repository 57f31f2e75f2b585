//! The lemma frequency table.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, WordFreqError};

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    /// The lemma.
    pub lemma: String,
    /// Number of occurrences, always positive.
    pub frequency: usize,
}

/// Distinct lemmas with their occurrence counts, ordered by lemma.
///
/// Lemmas are compared byte-wise, so the order does not depend on locale.
/// A table is immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from lemma counts.
    ///
    /// Zero counts are dropped.
    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        let rows = counts
            .into_iter()
            .filter(|(_, frequency)| *frequency > 0)
            .map(|(lemma, frequency)| FrequencyRow { lemma, frequency })
            .collect();
        FrequencyTable { rows }
    }

    /// Rows ordered by lemma ascending.
    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    /// Rows ordered by frequency ascending.
    ///
    /// The sort is stable, so lemmas with equal counts keep their lexical
    /// order.
    pub fn by_frequency(&self) -> Vec<&FrequencyRow> {
        let mut rows: Vec<&FrequencyRow> = self.rows.iter().collect();
        rows.sort_by_key(|row| row.frequency);
        rows
    }

    /// Rows paired with a 1-based row number.
    pub fn indexed_rows(&self) -> impl Iterator<Item = (usize, &FrequencyRow)> {
        self.rows.iter().enumerate().map(|(i, row)| (i + 1, row))
    }

    /// Count of a lemma, or `None` if it does not occur.
    pub fn get(&self, lemma: &str) -> Option<usize> {
        self.rows
            .binary_search_by(|row| row.lemma.as_str().cmp(lemma))
            .ok()
            .map(|idx| self.rows[idx].frequency)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.frequency).sum()
    }

    /// Number of distinct lemmas.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(lemma, frequency)` pairs in row order.
    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.rows
            .iter()
            .map(|row| (row.lemma.as_str(), row.frequency))
            .collect()
    }
}

impl TryFrom<Vec<FrequencyRow>> for FrequencyTable {
    type Error = WordFreqError;

    /// Build a table from rows in any order.
    ///
    /// Rows with a zero count or a repeated lemma are rejected.
    fn try_from(mut rows: Vec<FrequencyRow>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|row| row.frequency == 0) {
            return Err(WordFreqError::invalid_config(format!(
                "frequency of '{}' must be positive",
                row.lemma
            )));
        }

        rows.sort_by(|a, b| a.lemma.cmp(&b.lemma));
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].lemma == pair[1].lemma) {
            return Err(WordFreqError::invalid_config(format!(
                "duplicate lemma '{}'",
                pair[0].lemma
            )));
        }

        Ok(FrequencyTable { rows })
    }
}

impl<'de> Deserialize<'de> for FrequencyTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<FrequencyRow>::deserialize(deserializer)?;
        FrequencyTable::try_from(rows).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyRow;
    type IntoIter = std::slice::Iter<'a, FrequencyRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Count a lemma sequence into a frequency table.
pub fn aggregate<S: AsRef<str>>(lemmas: &[S]) -> FrequencyTable {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for lemma in lemmas {
        let lemma = lemma.as_ref();
        match counts.get_mut(lemma) {
            Some(count) => *count += 1,
            None => {
                counts.insert(lemma.to_string(), 1);
            }
        }
    }

    let table = FrequencyTable::from_counts(counts);
    debug!(
        "aggregated {} lemmas into {} rows",
        lemmas.len(),
        table.len()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_lexical_order() {
        let table = aggregate(&["dog", "cat", "cat", "ant"]);

        assert_eq!(table.pairs(), vec![("ant", 1), ("cat", 2), ("dog", 1)]);
        assert_eq!(table.total(), 4);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_empty() {
        let table = aggregate::<&str>(&[]);

        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert!(table.by_frequency().is_empty());
    }

    #[test]
    fn test_byte_order() {
        let table = aggregate(&["zebra", "Zebra", "éclair", "apple"]);
        let lemmas: Vec<_> = table.rows().iter().map(|r| r.lemma.as_str()).collect();

        assert_eq!(lemmas, vec!["Zebra", "apple", "zebra", "éclair"]);
    }

    #[test]
    fn test_by_frequency_is_stable() {
        let table = aggregate(&["pear", "fig", "pear", "apple", "kiwi", "kiwi", "kiwi"]);
        let ordered: Vec<_> = table
            .by_frequency()
            .into_iter()
            .map(|r| (r.lemma.as_str(), r.frequency))
            .collect();

        assert_eq!(
            ordered,
            vec![("apple", 1), ("fig", 1), ("pear", 2), ("kiwi", 3)]
        );
    }

    #[test]
    fn test_indexed_rows() {
        let table = aggregate(&["b", "a"]);
        let indexed: Vec<_> = table
            .indexed_rows()
            .map(|(i, r)| (i, r.lemma.as_str()))
            .collect();

        assert_eq!(indexed, vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn test_get() {
        let table = aggregate(&["fox", "quick", "quick"]);

        assert_eq!(table.get("quick"), Some(2));
        assert_eq!(table.get("fox"), Some(1));
        assert_eq!(table.get("the"), None);
    }

    #[test]
    fn test_from_counts_drops_zero() {
        let mut counts = BTreeMap::new();
        counts.insert("kept".to_string(), 2);
        counts.insert("gone".to_string(), 0);

        let table = FrequencyTable::from_counts(counts);
        assert_eq!(table.pairs(), vec![("kept", 2)]);
    }

    #[test]
    fn test_serde() {
        let table = aggregate(&["cat", "cat", "ant"]);
        let json = serde_json::to_string(&table).unwrap();

        assert_eq!(
            json,
            r#"[{"lemma":"ant","frequency":1},{"lemma":"cat","frequency":2}]"#
        );
        let back: FrequencyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_deserialize_sorts_rows() {
        let table: FrequencyTable = serde_json::from_str(
            r#"[{"lemma":"dog","frequency":1},{"lemma":"ant","frequency":2}]"#,
        )
        .unwrap();

        assert_eq!(table.pairs(), vec![("ant", 2), ("dog", 1)]);
        assert_eq!(table.get("dog"), Some(1));
    }

    #[test]
    fn test_deserialize_rejects_broken_tables() {
        let zero = r#"[{"lemma":"dog","frequency":1},{"lemma":"cat","frequency":0}]"#;
        let err = serde_json::from_str::<FrequencyTable>(zero).unwrap_err();
        assert!(err.to_string().contains("must be positive"));

        let duplicate = r#"[{"lemma":"ant","frequency":2},{"lemma":"ant","frequency":3}]"#;
        let err = serde_json::from_str::<FrequencyTable>(duplicate).unwrap_err();
        assert!(err.to_string().contains("duplicate lemma 'ant'"));
    }
}
