//! The text-to-frequency-table pipeline.
//!
//! A run is strictly linear:
//!
//! ```text
//! load → normalize (stopword removal) → lemmatize → aggregate
//! ```
//!
//! Any stage failure aborts the run and is reported wrapped in
//! [`WordFreqError::Stage`](crate::error::WordFreqError::Stage); no partial
//! table is ever returned.
//!
//! # Example
//!
//! ```
//! use wordfreq::pipeline::{LemmaModel, Pipeline, PipelineConfig};
//!
//! # fn main() -> wordfreq::error::Result<()> {
//! let config = PipelineConfig::default().with_lemma_model(LemmaModel::Identity);
//! let pipeline = Pipeline::new(config)?;
//!
//! let table = pipeline.run_text("The quick, quick fox!")?;
//! assert_eq!(table.pairs(), vec![("fox", 1), ("quick", 2)]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod loader;
pub mod observer;
pub mod orchestrator;

pub use config::{LemmaModel, PipelineConfig, StopwordSource};
pub use loader::load_text;
pub use observer::{LogObserver, NoopObserver, PipelineObserver};
pub use orchestrator::{BatchItem, Pipeline};
