//! On-disk cache for fetched resources.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::{Result, WordFreqError};
use crate::resource::provider::CacheCodec;

/// A directory of `<id>.cache` files, one per resource.
///
/// Entries are written to a temporary file and renamed into place, so a
/// reader never sees a half-written entry.
#[derive(Clone, Debug)]
pub struct DiskCache {
    directory: PathBuf,
}

impl DiskCache {
    /// Open a cache rooted at `directory`, creating it if needed.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            fs::create_dir_all(&directory).map_err(|e| {
                WordFreqError::storage(format!("Failed to create cache directory: {e}"))
            })?;
        }

        if !directory.is_dir() {
            return Err(WordFreqError::storage(format!(
                "Cache path is not a directory: {}",
                directory.display()
            )));
        }

        Ok(DiskCache { directory })
    }

    /// The cache root.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the entry for a resource id.
    pub fn entry_path(&self, id: &str) -> PathBuf {
        let file_name: String = id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.directory.join(format!("{file_name}.cache"))
    }

    /// Load a cached resource. Returns `Ok(None)` when no entry exists.
    pub fn load<T: CacheCodec>(&self, id: &str) -> Result<Option<T>> {
        let path = self.entry_path(id);
        match fs::read_to_string(&path) {
            Ok(text) => T::decode(&text).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist a resource, replacing any previous entry.
    pub fn store<T: CacheCodec>(&self, id: &str, value: &T) -> Result<()> {
        let path = self.entry_path(id);
        let temp_path = path.with_extension("cache.tmp");

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.encode().as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Remove the entry for a resource id, if present.
    pub fn invalidate(&self, id: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Cache key for a resource read from a local file.
///
/// The key folds the file's modification time and length into `id`, so an
/// edited file misses the cache. Returns `None` when the file metadata is
/// unavailable.
pub fn file_cache_key(id: &str, path: &Path) -> Option<String> {
    let metadata = fs::metadata(path).ok()?;
    let modified = metadata.modified().ok()?.duration_since(UNIX_EPOCH).ok()?;
    Some(format!("{id}-{}-{}", modified.as_nanos(), metadata.len()))
}
