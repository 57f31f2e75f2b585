//! # wordfreq
//!
//! Lemma frequency tables for plain-text corpora.
//!
//! ## Features
//!
//! - Text normalization: lowercasing, punctuation stripping, stopword removal
//! - Dictionary lemmatization with an optional plural-suffix fallback
//! - Lazily fetched, process-wide stopword and lexicon resources
//! - Frequency tables exported as CSV or JSON
//! - Parallel batch processing
//! - Best-effort archival to a blob store

pub mod analysis;
pub mod cli;
pub mod error;
pub mod frequency;
pub mod pipeline;
pub mod resource;
pub mod storage;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
