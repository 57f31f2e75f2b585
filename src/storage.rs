//! Blob storage for archiving inputs and exported tables.
//!
//! Objects are addressed by a bucket name and a `/`-separated key, the way
//! object stores address them. Two backends are provided: a local directory
//! tree and an in-memory map. Backends can be swapped without touching the
//! code that archives through them.
//!
//! # Architecture
//!
//! - **BlobStore trait**: byte-level primitives plus file-level helpers
//!   (`put`, `put_all`, `get`) built on them
//! - **BlobStoreConfig enum**: type-safe configuration for supported backends
//! - **BlobStoreFactory**: helper for constructing concrete store instances
//! - **archive**: best-effort uploads that log failures instead of returning them
//!
//! # Example
//!
//! ```
//! use wordfreq::storage::{BlobStore, BlobStoreConfig, BlobStoreFactory};
//!
//! # fn main() -> wordfreq::error::Result<()> {
//! let store = BlobStoreFactory::create(BlobStoreConfig::Memory)?;
//! store.put_bytes("corpus", "raw/alice.txt", b"Alice was beginning")?;
//!
//! assert_eq!(store.list("corpus", "raw/")?, vec!["raw/alice.txt"]);
//! assert_eq!(store.get_bytes("corpus", "raw/alice.txt")?, b"Alice was beginning");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordFreqError};

pub mod archive;
pub mod file;
pub mod memory;

pub use archive::{ArchiveOutcome, archive, archive_all};
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

/// A key-addressed object store.
///
/// Implementors provide the byte-level primitives; the file-level helpers
/// have default implementations on top of them.
pub trait BlobStore: Send + Sync + fmt::Debug {
    /// Store `data` under `bucket`/`key`, replacing any existing object.
    fn put_bytes(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()>;

    /// Fetch the object at `bucket`/`key`.
    ///
    /// Returns `NotFound` if there is no such object.
    fn get_bytes(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// List keys in `bucket` starting with `prefix`, sorted.
    ///
    /// A bucket that holds no objects lists as empty.
    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;

    /// Delete the object at `bucket`/`key`. Deleting a missing object succeeds.
    fn delete(&self, bucket: &str, key: &str) -> Result<()>;

    /// Whether an object exists at `bucket`/`key`.
    fn exists(&self, bucket: &str, key: &str) -> bool {
        self.get_bytes(bucket, key).is_ok()
    }

    /// Upload a local file to `bucket`/`key`.
    ///
    /// A missing local file is `NotFound`; a failed store write is
    /// `UploadFailure`.
    fn put(&self, local_path: &Path, bucket: &str, key: &str) -> Result<()> {
        let data = read_local(local_path)?;
        self.put_bytes(bucket, key, &data).map_err(|e| {
            WordFreqError::upload(format!(
                "{} to {bucket}/{key}: {e}",
                local_path.display()
            ))
        })?;
        info!("uploaded {} to {bucket}/{key}", local_path.display());
        Ok(())
    }

    /// Upload every regular file directly inside `folder` whose name ends
    /// with `suffix`, keyed `prefix` + file name. Returns the uploaded keys in
    /// file-name order.
    ///
    /// Stops at the first failure.
    fn put_all(
        &self,
        folder: &Path,
        bucket: &str,
        prefix: &str,
        suffix: &str,
    ) -> Result<Vec<String>> {
        let mut uploaded = Vec::new();
        for (name, path) in folder_files(folder, suffix)? {
            let key = join_key(prefix, &name);
            self.put(&path, bucket, &key)?;
            uploaded.push(key);
        }
        debug!(
            "uploaded {} files from {} to {bucket}",
            uploaded.len(),
            folder.display()
        );
        Ok(uploaded)
    }

    /// Download `bucket`/`key` to a local file, creating parent directories
    /// as needed.
    fn get(&self, bucket: &str, key: &str, local_path: &Path) -> Result<()> {
        let data = self.get_bytes(bucket, key)?;
        if let Some(parent) = local_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(local_path, data)?;
        info!("downloaded {bucket}/{key} to {}", local_path.display());
        Ok(())
    }
}

/// Configuration for a blob store backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobStoreConfig {
    /// Buckets are directories under `root`.
    File { root: PathBuf },

    /// Objects live in process memory.
    #[default]
    Memory,
}

/// A factory for creating blob store instances.
pub struct BlobStoreFactory;

impl BlobStoreFactory {
    /// Create a blob store from its configuration.
    pub fn create(config: BlobStoreConfig) -> Result<Arc<dyn BlobStore>> {
        match config {
            BlobStoreConfig::File { root } => Ok(Arc::new(FileBlobStore::new(root)?)),
            BlobStoreConfig::Memory => Ok(Arc::new(MemoryBlobStore::new())),
        }
    }
}

/// Check that a bucket name is a single non-empty path segment not
/// starting with `.`.
pub(crate) fn validate_bucket(bucket: &str) -> Result<()> {
    if bucket.is_empty() || bucket.contains('/') || bucket.starts_with('.') {
        return Err(WordFreqError::storage(format!(
            "invalid bucket name: '{bucket}'"
        )));
    }
    Ok(())
}

/// Check that a key is relative and has no empty, `.` or `..` segments.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
    if !valid {
        return Err(WordFreqError::storage(format!("invalid key: '{key}'")));
    }
    Ok(())
}

/// Join a key prefix and a name, inserting a `/` when the prefix lacks one.
pub fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        format!("{prefix}{name}")
    } else {
        format!("{prefix}/{name}")
    }
}

fn read_local(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(WordFreqError::not_found(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Regular files directly inside `folder` with names ending in `suffix`,
/// sorted by name.
fn folder_files(folder: &Path, suffix: &str) -> Result<Vec<(String, PathBuf)>> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(WordFreqError::not_found(folder.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.ends_with(suffix) {
            files.push((name, entry.path()));
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_key() {
        assert_eq!(join_key("", "a.txt"), "a.txt");
        assert_eq!(join_key("raw", "a.txt"), "raw/a.txt");
        assert_eq!(join_key("raw/", "a.txt"), "raw/a.txt");
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("raw/crime.txt").is_ok());
        assert!(validate_key("crime.txt").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/abs").is_err());
        assert!(validate_key("raw//x").is_err());
        assert!(validate_key("../escape").is_err());
    }

    #[test]
    fn test_validate_bucket() {
        assert!(validate_bucket("wordfreq-bucket").is_ok());
        assert!(validate_bucket("").is_err());
        assert!(validate_bucket("a/b").is_err());
        assert!(validate_bucket("..").is_err());
        assert!(validate_bucket(".tmp").is_err());
    }

    #[test]
    fn test_folder_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("c.csv"), "c").unwrap();
        fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let names: Vec<String> = folder_files(dir.path(), ".txt")
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        assert_eq!(folder_files(dir.path(), "").unwrap().len(), 3);
    }

    #[test]
    fn test_factory() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStoreFactory::create(BlobStoreConfig::File {
            root: dir.path().to_path_buf(),
        })
        .unwrap();
        store.put_bytes("bucket", "k", b"v").unwrap();
        assert!(store.exists("bucket", "k"));

        let store = BlobStoreFactory::create(BlobStoreConfig::default()).unwrap();
        assert!(!store.exists("bucket", "k"));
    }
}
