//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, WordFreqArgs};
use crate::error::{Result, WordFreqError};
use crate::frequency::{ExportFormat, FrequencyTable, TableExporter};

/// Result structure for a single run.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub input: String,
    pub output: Option<String>,
    pub distinct_lemmas: usize,
    pub total_lemmas: usize,
    pub duration_ms: u64,
    pub archived: Option<bool>,
}

/// Result structure for one input of a batch.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchEntry {
    pub input: String,
    pub output: Option<String>,
    pub distinct_lemmas: Option<usize>,
    pub total_lemmas: Option<usize>,
    pub error: Option<String>,
}

/// Result structure for a batch run.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchSummary {
    pub entries: Vec<BatchEntry>,
    pub succeeded: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// Result structure for uploads.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResult {
    pub bucket: String,
    pub keys: Vec<String>,
}

/// Result structure for downloads.
#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadResult {
    pub bucket: String,
    pub key: String,
    pub path: String,
    pub bytes: u64,
}

/// Result structure for listings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResult {
    pub bucket: String,
    pub prefix: String,
    pub keys: Vec<String>,
}

/// Result structure for deletions.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResult {
    pub bucket: String,
    pub key: String,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &WordFreqArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Csv => output_csv(result, args),
    }
}

/// Print a frequency table in the specified format.
pub fn output_table(table: &FrequencyTable, include_index: bool, args: &WordFreqArgs) -> Result<()> {
    let export_format = match args.output_format {
        OutputFormat::Human => {
            print!("{}", format_table_human(table, include_index));
            return Ok(());
        }
        OutputFormat::Json => ExportFormat::Json,
        OutputFormat::Csv => ExportFormat::Csv,
    };

    let exporter = TableExporter::new(export_format)
        .with_index(include_index)
        .with_pretty(args.pretty);
    print!("{}", exporter.render(table)?);
    Ok(())
}

/// Render a table as aligned columns.
fn format_table_human(table: &FrequencyTable, include_index: bool) -> String {
    let lemma_width = table
        .rows()
        .iter()
        .map(|row| row.lemma.chars().count())
        .max()
        .unwrap_or(0)
        .max("lemma".len());
    let index_width = table.len().to_string().len().max("#".len());

    let mut out = String::new();
    if include_index {
        out.push_str(&format!("{:>index_width$}  ", "#"));
    }
    out.push_str(&format!("{:<lemma_width$}  frequency\n", "lemma"));

    for (index, row) in table.indexed_rows() {
        if include_index {
            out.push_str(&format!("{index:>index_width$}  "));
        }
        out.push_str(&format!("{:<lemma_width$}  {}\n", row.lemma, row.frequency));
    }

    out.push_str(&format!(
        "\n{} distinct lemmas, {} total\n",
        table.len(),
        table.total()
    ));
    out
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &WordFreqArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    if let Some(obj) = value.as_object() {
        for (key, val) in obj {
            match val {
                serde_json::Value::Array(items) if items.iter().all(|v| v.is_object()) => {
                    println!("{key}:");
                    for item in items {
                        println!("  - {}", format_value(item));
                    }
                }
                serde_json::Value::Array(items) => {
                    println!("{key}: ({})", items.len());
                    for item in items {
                        println!("  {}", format_value(item));
                    }
                }
                _ => println!("{key}: {}", format_value(val)),
            }
        }
    } else {
        println!("{}", format_value(&value));
    }

    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &WordFreqArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Output in CSV format.
fn output_csv<T: Serialize>(result: &T, _args: &WordFreqArgs) -> Result<()> {
    print!("{}", render_csv(result)?);
    Ok(())
}

/// Render a result as `key,value` records; non-object results become a
/// single `value` column.
fn render_csv<T: Serialize>(result: &T) -> Result<String> {
    let value = serde_json::to_value(result)?;
    let mut writer = csv::Writer::from_writer(Vec::new());

    match value {
        serde_json::Value::Object(obj) => {
            writer.write_record(["key", "value"])?;
            for (key, value) in obj {
                writer.write_record([key.as_str(), format_csv_value(&value).as_str()])?;
            }
        }
        value => {
            writer.write_record(["value"])?;
            writer.write_record([format_csv_value(&value)])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| WordFreqError::other(format!("Failed to flush CSV output: {e}")))?;
    String::from_utf8(bytes).map_err(|e| WordFreqError::other(e.to_string()))
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => obj
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| format!("{k}={}", format_value(v)))
            .collect::<Vec<_>>()
            .join(" "),
        serde_json::Value::Null => "-".to_string(),
    }
}

/// Format a JSON value as one CSV field; the writer does the quoting.
fn format_csv_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join("; "),
        other => format_value(other),
    }
}
