//! CSV and JSON export of frequency tables.
//!
//! CSV output has a `lemma,frequency` header, optionally preceded by an
//! `index` column numbering rows from 1:
//! ```csv
//! index,lemma,frequency
//! 1,ant,1
//! 2,cat,2
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordFreqError};
use crate::frequency::table::FrequencyTable;

/// Serialization format of an exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

#[derive(Serialize)]
struct IndexedRow<'a> {
    index: usize,
    lemma: &'a str,
    frequency: usize,
}

/// Writes [`FrequencyTable`]s in a fixed format.
#[derive(Debug, Clone)]
pub struct TableExporter {
    format: ExportFormat,
    /// Prepend a 1-based `index` column.
    include_index: bool,
    /// Pretty-print JSON output.
    pretty: bool,
    /// CSV delimiter character (default: ',')
    delimiter: u8,
}

impl Default for TableExporter {
    fn default() -> Self {
        Self::new(ExportFormat::Csv)
    }
}

impl TableExporter {
    /// Create an exporter for the given format.
    pub fn new(format: ExportFormat) -> Self {
        TableExporter {
            format,
            include_index: false,
            pretty: false,
            delimiter: b',',
        }
    }

    /// Set whether to include the row number column.
    pub fn with_index(mut self, include_index: bool) -> Self {
        self.include_index = include_index;
        self
    }

    /// Set whether JSON output is pretty-printed.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set a custom CSV delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The output format.
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Write a table to `writer`.
    pub fn write<W: Write>(&self, table: &FrequencyTable, writer: W) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.write_csv(table, writer),
            ExportFormat::Json => self.write_json(table, writer),
        }
    }

    /// Render a table to a string.
    pub fn render(&self, table: &FrequencyTable) -> Result<String> {
        let mut buf = Vec::new();
        self.write(table, &mut buf)?;
        String::from_utf8(buf).map_err(|e| WordFreqError::encoding(e.to_string()))
    }

    /// Write a table to a file, creating parent directories as needed.
    pub fn write_to_path<P: AsRef<Path>>(&self, table: &FrequencyTable, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.write(table, &mut writer)?;
        writer.flush()?;

        debug!("wrote {} rows to {}", table.len(), path.display());
        Ok(())
    }

    fn write_csv<W: Write>(&self, table: &FrequencyTable, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(writer);

        if self.include_index {
            csv_writer.write_record(["index", "lemma", "frequency"])?;
            for (index, row) in table.indexed_rows() {
                csv_writer.serialize(IndexedRow {
                    index,
                    lemma: &row.lemma,
                    frequency: row.frequency,
                })?;
            }
        } else {
            csv_writer.write_record(["lemma", "frequency"])?;
            for row in table {
                csv_writer.serialize(row)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn write_json<W: Write>(&self, table: &FrequencyTable, mut writer: W) -> Result<()> {
        if self.include_index {
            let rows: Vec<IndexedRow<'_>> = table
                .indexed_rows()
                .map(|(index, row)| IndexedRow {
                    index,
                    lemma: &row.lemma,
                    frequency: row.frequency,
                })
                .collect();
            self.write_json_value(&rows, &mut writer)?;
        } else {
            self.write_json_value(table, &mut writer)?;
        }
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn write_json_value<T: Serialize + ?Sized, W: Write>(&self, value: &T, writer: W) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(writer, value)?;
        } else {
            serde_json::to_writer(writer, value)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct CsvRow {
    lemma: String,
    frequency: usize,
}

/// Read a table back from CSV produced by [`TableExporter`].
///
/// An `index` column, if present, is ignored. Duplicate lemmas are summed.
pub fn read_csv<R: Read>(reader: R) -> Result<FrequencyTable> {
    let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in csv_reader.deserialize::<CsvRow>() {
        let row = record?;
        *counts.entry(row.lemma).or_insert(0) += row.frequency;
    }

    Ok(FrequencyTable::from_counts(counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::table::aggregate;

    fn sample() -> FrequencyTable {
        aggregate(&["dog", "cat", "cat", "ant"])
    }

    #[test]
    fn test_csv() {
        let out = TableExporter::new(ExportFormat::Csv)
            .render(&sample())
            .unwrap();

        assert_eq!(out, "lemma,frequency\nant,1\ncat,2\ndog,1\n");
    }

    #[test]
    fn test_csv_with_index() {
        let out = TableExporter::new(ExportFormat::Csv)
            .with_index(true)
            .render(&sample())
            .unwrap();

        assert_eq!(out, "index,lemma,frequency\n1,ant,1\n2,cat,2\n3,dog,1\n");
    }

    #[test]
    fn test_csv_empty_table() {
        let out = TableExporter::default()
            .render(&FrequencyTable::new())
            .unwrap();

        assert_eq!(out, "lemma,frequency\n");
    }

    #[test]
    fn test_csv_quotes_delimiters() {
        let table = aggregate(&["a,b", "c"]);
        let out = TableExporter::default().render(&table).unwrap();

        assert_eq!(out, "lemma,frequency\n\"a,b\",1\nc,1\n");
    }

    #[test]
    fn test_json() {
        let out = TableExporter::new(ExportFormat::Json)
            .render(&sample())
            .unwrap();

        assert_eq!(
            out,
            "[{\"lemma\":\"ant\",\"frequency\":1},{\"lemma\":\"cat\",\"frequency\":2},{\"lemma\":\"dog\",\"frequency\":1}]\n"
        );
    }

    #[test]
    fn test_json_with_index() {
        let out = TableExporter::new(ExportFormat::Json)
            .with_index(true)
            .render(&aggregate(&["x"]))
            .unwrap();

        assert_eq!(out, "[{\"index\":1,\"lemma\":\"x\",\"frequency\":1}]\n");
    }

    #[test]
    fn test_read_csv() {
        let csv = "index,lemma,frequency\n1,ant,1\n2,cat,2\n";
        let table = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(table.pairs(), vec![("ant", 1), ("cat", 2)]);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path("out.json"), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path("out.CSV"), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path("out"), ExportFormat::Csv);
    }

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("freq.csv");

        TableExporter::default()
            .write_to_path(&sample(), &path)
            .unwrap();

        let file = File::open(&path).unwrap();
        assert_eq!(read_csv(file).unwrap(), sample());
    }
}
