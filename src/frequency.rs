//! Frequency aggregation and export.
//!
//! [`aggregate`] counts a lemma sequence into a [`FrequencyTable`]; the
//! [`export`] module writes tables as CSV or JSON.
//!
//! # Example
//!
//! ```
//! use wordfreq::frequency::aggregate;
//!
//! let table = aggregate(&["dog", "cat", "cat", "ant"]);
//! let rows: Vec<_> = table.rows().iter().map(|r| (r.lemma.as_str(), r.frequency)).collect();
//! assert_eq!(rows, vec![("ant", 1), ("cat", 2), ("dog", 1)]);
//! assert_eq!(table.total(), 4);
//! ```

pub mod export;
pub mod table;

pub use export::{ExportFormat, TableExporter, read_csv};
pub use table::{FrequencyRow, FrequencyTable, aggregate};
