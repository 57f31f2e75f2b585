//! In-memory blob store for testing and ephemeral runs.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::error::{Result, WordFreqError};
use crate::storage::{BlobStore, validate_bucket, validate_key};

/// An in-memory blob store.
///
/// Objects are kept in a map ordered by (bucket, key), so listings come out
/// sorted without extra work.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of objects stored.
    pub fn object_count(&self) -> usize {
        self.objects.lock().len()
    }

    /// Get the total size of all objects.
    pub fn total_size(&self) -> u64 {
        self.objects
            .lock()
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }

    /// Remove every object.
    pub fn clear(&self) {
        self.objects.lock().clear();
    }
}

impl BlobStore for MemoryBlobStore {
    fn put_bytes(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()> {
        validate_bucket(bucket)?;
        validate_key(key)?;

        self.objects
            .lock()
            .insert((bucket.to_string(), key.to_string()), data.to_vec());
        Ok(())
    }

    fn get_bytes(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        validate_bucket(bucket)?;
        validate_key(key)?;

        self.objects
            .lock()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| WordFreqError::not_found(format!("{bucket}/{key}")))
    }

    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        validate_bucket(bucket)?;

        let objects = self.objects.lock();
        let start = (bucket.to_string(), prefix.to_string());
        Ok(objects
            .range(start..)
            .take_while(|((b, key), _)| b == bucket && key.starts_with(prefix))
            .map(|((_, key), _)| key.clone())
            .collect())
    }

    fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        validate_bucket(bucket)?;
        validate_key(key)?;

        self.objects
            .lock()
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }
}
