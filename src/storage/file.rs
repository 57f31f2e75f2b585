//! Directory-backed blob store.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, WordFreqError};
use crate::storage::{BlobStore, validate_bucket, validate_key};

/// Directory under the root holding in-flight writes. Bucket names cannot
/// start with `.`, so it never collides with a bucket.
const STAGING_DIR: &str = ".tmp";

static STAGING_SEQ: AtomicUsize = AtomicUsize::new(0);

/// A blob store that keeps each bucket as a directory under a root.
///
/// Key segments map to nested directories, so `raw/crime.txt` in bucket
/// `corpus` lives at `<root>/corpus/raw/crime.txt`. Objects are written to
/// a staging file first and renamed into place.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    /// The root directory for storage.
    root: PathBuf,
}

impl FileBlobStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.exists() {
            fs::create_dir_all(&root)
                .map_err(|e| WordFreqError::storage(format!("Failed to create directory: {e}")))?;
        }

        if !root.is_dir() {
            return Err(WordFreqError::storage(format!(
                "Path is not a directory: {}",
                root.display()
            )));
        }

        Ok(FileBlobStore { root })
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        validate_bucket(bucket)?;
        validate_key(key)?;

        let mut path = self.root.join(bucket);
        path.extend(key.split('/'));
        Ok(path)
    }

    fn collect_keys(dir: &Path, relative: &str, keys: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };

            let key = if relative.is_empty() {
                name
            } else {
                format!("{relative}/{name}")
            };

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                Self::collect_keys(&entry.path(), &key, keys)?;
            } else if file_type.is_file() {
                keys.push(key);
            }
        }
        Ok(())
    }
}

impl BlobStore for FileBlobStore {
    fn put_bytes(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| WordFreqError::storage(format!("Failed to create directory: {e}")))?;
        }

        let staging = self.root.join(STAGING_DIR);
        fs::create_dir_all(&staging)
            .map_err(|e| WordFreqError::storage(format!("Failed to create directory: {e}")))?;
        let tmp_path = staging.join(format!(
            "{}-{}",
            process::id(),
            STAGING_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        let written = write_file(&tmp_path, data).and_then(|()| {
            fs::rename(&tmp_path, &path)
                .map_err(|e| WordFreqError::storage(format!("Failed to write {key}: {e}")))
        });
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }

    fn get_bytes(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        if path.is_dir() {
            return Err(WordFreqError::not_found(format!("{bucket}/{key}")));
        }

        fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                WordFreqError::not_found(format!("{bucket}/{key}"))
            } else {
                WordFreqError::Io(e)
            }
        })
    }

    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        validate_bucket(bucket)?;

        let bucket_dir = self.root.join(bucket);
        if !bucket_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        Self::collect_keys(&bucket_dir, "", &mut keys)?;
        keys.retain(|key| key.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }

    fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WordFreqError::storage(format!(
                "Failed to delete {bucket}/{key}: {e}"
            ))),
        }
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::create(path)
        .map_err(|e| WordFreqError::storage(format!("Failed to create {}: {e}", path.display())))?;
    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::error::ErrorKind as WordFreqErrorKind;

    fn store() -> (TempDir, FileBlobStore) {
        let dir = TempDir::new().unwrap();
        let store = FileBlobStore::new(dir.path().join("blobs")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_put_get() {
        let (_dir, store) = store();
        store.put_bytes("corpus", "raw/crime.txt", b"Crime").unwrap();

        assert_eq!(store.get_bytes("corpus", "raw/crime.txt").unwrap(), b"Crime");
        assert!(store.root().join("corpus/raw/crime.txt").is_file());
    }

    #[test]
    fn test_missing_object() {
        let (_dir, store) = store();

        let err = store.get_bytes("corpus", "raw/none.txt").unwrap_err();
        assert_eq!(err.kind(), WordFreqErrorKind::NotFound);

        store.put_bytes("corpus", "raw/a.txt", b"a").unwrap();
        let err = store.get_bytes("corpus", "raw").unwrap_err();
        assert_eq!(err.kind(), WordFreqErrorKind::NotFound);
    }

    #[test]
    fn test_list_nested() {
        let (_dir, store) = store();
        store.put_bytes("corpus", "raw/b.txt", b"").unwrap();
        store.put_bytes("corpus", "raw/a.txt", b"").unwrap();
        store.put_bytes("corpus", "out/a.csv", b"").unwrap();
        store.put_bytes("corpus", "top.txt", b"").unwrap();

        assert_eq!(
            store.list("corpus", "").unwrap(),
            vec!["out/a.csv", "raw/a.txt", "raw/b.txt", "top.txt"]
        );
        assert_eq!(
            store.list("corpus", "raw/").unwrap(),
            vec!["raw/a.txt", "raw/b.txt"]
        );
        assert!(store.list("other", "").unwrap().is_empty());
    }

    #[test]
    fn test_part_suffix_is_an_ordinary_key() {
        let (_dir, store) = store();
        store.put_bytes("corpus", "archive/volume.part", b"v1").unwrap();

        assert_eq!(store.list("corpus", "").unwrap(), vec!["archive/volume.part"]);
        assert!(store.exists("corpus", "archive/volume.part"));
    }

    #[test]
    fn test_staging_is_emptied() {
        let (_dir, store) = store();
        store.put_bytes("corpus", "a.txt", b"a").unwrap();
        store.put_bytes("corpus", "a.txt", b"b").unwrap();

        let staging = store.root().join(STAGING_DIR);
        assert_eq!(fs::read_dir(&staging).unwrap().count(), 0);
        assert_eq!(store.get_bytes("corpus", "a.txt").unwrap(), b"b");
    }

    #[test]
    fn test_failed_write_leaves_no_staging_file() {
        let (_dir, store) = store();
        // A directory where the object should go makes the rename fail.
        fs::create_dir_all(store.root().join("corpus/taken/child")).unwrap();

        assert!(store.put_bytes("corpus", "taken", b"x").is_err());
        let staging = store.root().join(STAGING_DIR);
        assert_eq!(fs::read_dir(&staging).unwrap().count(), 0);
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = store();
        store.put_bytes("corpus", "k.txt", b"v").unwrap();

        store.delete("corpus", "k.txt").unwrap();
        assert!(!store.exists("corpus", "k.txt"));
        store.delete("corpus", "k.txt").unwrap();
    }

    #[test]
    fn test_rejects_escaping_keys() {
        let (_dir, store) = store();
        let err = store.put_bytes("corpus", "../../etc/passwd", b"").unwrap_err();
        assert_eq!(err.kind(), WordFreqErrorKind::Storage);
    }

    #[test]
    fn test_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();

        assert!(FileBlobStore::new(&file).is_err());
    }
}
