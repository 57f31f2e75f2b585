//! Best-effort archival uploads.
//!
//! Archiving runs after a table has been produced. A failed upload is logged
//! as an `UploadFailure` and reported in the returned outcome, never as an
//! error, so it cannot affect the result already computed.

use std::path::Path;

use log::warn;

use crate::error::WordFreqError;
use crate::storage::BlobStore;

/// What happened to a best-effort upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// The listed keys were written.
    Uploaded(Vec<String>),
    /// The upload failed; the message describes why.
    Failed(String),
}

impl ArchiveOutcome {
    /// Whether the upload succeeded.
    pub fn is_uploaded(&self) -> bool {
        matches!(self, ArchiveOutcome::Uploaded(_))
    }
}

fn swallow(err: WordFreqError) -> ArchiveOutcome {
    let err = match err {
        err @ WordFreqError::UploadFailure(_) => err,
        other => WordFreqError::upload(other.to_string()),
    };
    warn!("{err}");
    ArchiveOutcome::Failed(err.to_string())
}

/// Upload one local file, logging instead of returning failures.
pub fn archive(store: &dyn BlobStore, local_path: &Path, bucket: &str, key: &str) -> ArchiveOutcome {
    match store.put(local_path, bucket, key) {
        Ok(()) => ArchiveOutcome::Uploaded(vec![key.to_string()]),
        Err(err) => swallow(err),
    }
}

/// Upload a folder's matching files, logging instead of returning failures.
pub fn archive_all(
    store: &dyn BlobStore,
    folder: &Path,
    bucket: &str,
    prefix: &str,
    suffix: &str,
) -> ArchiveOutcome {
    match store.put_all(folder, bucket, prefix, suffix) {
        Ok(keys) => ArchiveOutcome::Uploaded(keys),
        Err(err) => swallow(err),
    }
}
