//! Error types for the wordfreq library.
//!
//! All errors are represented by the [`WordFreqError`] enum. Every variant maps
//! onto an [`ErrorKind`] so callers can branch on the failure class without
//! matching on message text, and pipeline failures carry the [`Stage`] they
//! happened in.
//!
//! # Examples
//!
//! ```
//! use wordfreq::error::{ErrorKind, Result, WordFreqError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(WordFreqError::not_found("data/raw_data/alice.txt"))
//! }
//!
//! let err = example_operation().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! ```

use std::fmt;
use std::io;

use anyhow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A processing stage of the frequency pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Reading and decoding the source text.
    Load,
    /// Cleaning, tokenizing and stopword removal.
    Normalize,
    /// Resolving tokens to lemmas.
    Lemmatize,
    /// Counting lemmas.
    Aggregate,
    /// Writing the table to a sink.
    Export,
}

impl Stage {
    /// Stage name as used in log lines and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Normalize => "normalize",
            Stage::Lemmatize => "lemmatize",
            Stage::Aggregate => "aggregate",
            Stage::Export => "export",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a [`WordFreqError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Encoding,
    ResourceUnavailable,
    UploadFailure,
    Io,
    Config,
    Storage,
    Serialization,
    Other,
}

/// The main error type for wordfreq operations.
#[derive(Error, Debug)]
pub enum WordFreqError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input text or blob does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input bytes are not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A stopword list or lemma dictionary could not be fetched
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// A blob-store upload failed
    #[error("Upload failure: {0}")]
    UploadFailure(String),

    /// Invalid configuration or arguments
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Blob-store errors other than uploads
    #[error("Storage error: {0}")]
    Storage(String),

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A failure attributed to a pipeline stage
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<WordFreqError>,
    },

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with WordFreqError.
pub type Result<T> = std::result::Result<T, WordFreqError>;

impl WordFreqError {
    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        WordFreqError::NotFound(msg.into())
    }

    /// Create a new encoding error.
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        WordFreqError::Encoding(msg.into())
    }

    /// Create a new resource unavailable error.
    pub fn resource_unavailable<S: Into<String>>(msg: S) -> Self {
        WordFreqError::ResourceUnavailable(msg.into())
    }

    /// Create a new upload failure error.
    pub fn upload<S: Into<String>>(msg: S) -> Self {
        WordFreqError::UploadFailure(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        WordFreqError::Config(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        WordFreqError::Storage(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WordFreqError::Other(msg.into())
    }

    /// Wrap this error with the stage it occurred in.
    ///
    /// An error that is already attributed to a stage keeps its original stage.
    pub fn at_stage(self, stage: Stage) -> Self {
        match self {
            err @ WordFreqError::Stage { .. } => err,
            err => WordFreqError::Stage {
                stage,
                source: Box::new(err),
            },
        }
    }

    /// The stage this error was attributed to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            WordFreqError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Classify this error. Stage wrappers report the kind of the wrapped error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WordFreqError::Io(e) if e.kind() == io::ErrorKind::NotFound => ErrorKind::NotFound,
            WordFreqError::Io(_) => ErrorKind::Io,
            WordFreqError::NotFound(_) => ErrorKind::NotFound,
            WordFreqError::Encoding(_) => ErrorKind::Encoding,
            WordFreqError::ResourceUnavailable(_) => ErrorKind::ResourceUnavailable,
            WordFreqError::UploadFailure(_) => ErrorKind::UploadFailure,
            WordFreqError::Config(_) => ErrorKind::Config,
            WordFreqError::Storage(_) => ErrorKind::Storage,
            WordFreqError::Csv(_) | WordFreqError::Json(_) => ErrorKind::Serialization,
            WordFreqError::Stage { source, .. } => source.kind(),
            WordFreqError::Other(_) | WordFreqError::Anyhow(_) => ErrorKind::Other,
        }
    }
}
