//! Once-only resource population.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use log::{debug, warn};
use parking_lot::Mutex;

use crate::error::{Result, WordFreqError};
use crate::resource::cache::DiskCache;

/// Where a resource is fetched from when no cached copy exists.
pub trait ResourceSource<T>: Send + Sync {
    /// Identifier of the resource, used for cache file names and log lines.
    fn id(&self) -> &str;

    /// Build the resource from scratch.
    fn fetch(&self) -> Result<T>;

    /// Name of the disk-cache entry for the current state of the source,
    /// or `None` to bypass the disk cache.
    ///
    /// Sources whose content can change must fold that state into the key,
    /// otherwise a stale entry keeps being served.
    fn cache_key(&self) -> Option<String> {
        Some(self.id().to_string())
    }
}

/// Text encoding of a resource for the disk cache.
pub trait CacheCodec: Sized {
    /// Serialize the resource.
    fn encode(&self) -> String;

    /// Rebuild the resource from its serialized form.
    fn decode(text: &str) -> Result<Self>;
}

/// Outcome of resolving a resource.
#[derive(Debug)]
pub enum Resolution<T> {
    /// Served from memory or from the pre-fetched disk cache without fetching.
    CacheHit(Arc<T>),
    /// Not cached; fetched from the source and published.
    CacheMissFetchedOk(Arc<T>),
    /// Not cached and the fetch failed. Nothing was published; the next call
    /// fetches again.
    CacheMissFetchFailed(WordFreqError),
}

impl<T> Resolution<T> {
    /// The resolved value, if any.
    pub fn value(&self) -> Option<&Arc<T>> {
        match self {
            Resolution::CacheHit(value) | Resolution::CacheMissFetchedOk(value) => Some(value),
            Resolution::CacheMissFetchFailed(_) => None,
        }
    }

    /// Whether the value was served without fetching.
    pub fn is_cache_hit(&self) -> bool {
        matches!(self, Resolution::CacheHit(_))
    }

    /// Convert into a plain result.
    pub fn into_result(self) -> Result<Arc<T>> {
        match self {
            Resolution::CacheHit(value) | Resolution::CacheMissFetchedOk(value) => Ok(value),
            Resolution::CacheMissFetchFailed(err) => Err(err),
        }
    }
}

/// Lazily populated, process-lifetime holder of a shared resource.
///
/// The value is published only once it is fully built, so concurrent readers
/// either see nothing or the complete resource. Concurrent first callers
/// serialize on a fetch guard, so the source is fetched once. A failed fetch
/// leaves the provider empty.
pub struct ResourceProvider<T> {
    source: Box<dyn ResourceSource<T>>,
    cache: Option<DiskCache>,
    value: OnceLock<Arc<T>>,
    fetch_guard: Mutex<()>,
    fetches: AtomicUsize,
}

impl<T> ResourceProvider<T>
where
    T: CacheCodec + Send + Sync,
{
    /// Create a provider with no disk cache.
    pub fn new(source: Box<dyn ResourceSource<T>>) -> Self {
        ResourceProvider {
            source,
            cache: None,
            value: OnceLock::new(),
            fetch_guard: Mutex::new(()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Attach a disk cache consulted before fetching and written after a fetch.
    pub fn with_cache(mut self, cache: DiskCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Identifier of the underlying source.
    pub fn id(&self) -> &str {
        self.source.id()
    }

    /// Resolve the resource, reporting how it was obtained.
    pub fn resolve(&self) -> Resolution<T> {
        if let Some(value) = self.value.get() {
            return Resolution::CacheHit(Arc::clone(value));
        }

        let _guard = self.fetch_guard.lock();

        // Another caller may have published while we waited.
        if let Some(value) = self.value.get() {
            return Resolution::CacheHit(Arc::clone(value));
        }

        let cache_key = self.cache.as_ref().and_then(|_| self.source.cache_key());
        if let Some(value) = cache_key.as_deref().and_then(|key| self.load_from_cache(key)) {
            debug!("resource '{}' loaded from disk cache", self.id());
            return Resolution::CacheHit(self.publish(value));
        }

        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.source.fetch() {
            Ok(value) => {
                debug!("resource '{}' fetched", self.id());
                if let Some(key) = &cache_key {
                    self.store_to_cache(key, &value);
                }
                Resolution::CacheMissFetchedOk(self.publish(value))
            }
            Err(err) => {
                warn!("failed to fetch resource '{}': {err}", self.id());
                Resolution::CacheMissFetchFailed(WordFreqError::resource_unavailable(format!(
                    "{}: {err}",
                    self.id()
                )))
            }
        }
    }

    /// Get the resource, fetching it on first use.
    pub fn get(&self) -> Result<Arc<T>> {
        self.resolve().into_result()
    }

    /// Whether the resource has been published.
    pub fn is_loaded(&self) -> bool {
        self.value.get().is_some()
    }

    /// Number of fetches performed against the source.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn publish(&self, value: T) -> Arc<T> {
        Arc::clone(self.value.get_or_init(|| Arc::new(value)))
    }

    fn load_from_cache(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        match cache.load::<T>(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("ignoring unreadable cache entry for '{}': {err}", self.id());
                None
            }
        }
    }

    fn store_to_cache(&self, key: &str, value: &T) {
        if let Some(cache) = &self.cache
            && let Err(err) = cache.store(key, value)
        {
            warn!("failed to persist resource '{}': {err}", self.id());
        }
    }
}

impl<T> fmt::Debug for ResourceProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceProvider")
            .field("source", &self.source.id())
            .field("cache", &self.cache)
            .field("loaded", &self.value.get().is_some())
            .field("fetches", &self.fetches.load(Ordering::SeqCst))
            .finish()
    }
}
