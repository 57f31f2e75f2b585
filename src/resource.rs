//! Linguistic resources shared by pipeline runs.
//!
//! A resource (the stopword set, the lemma lexicon) is fetched at most once
//! per process through a [`ResourceProvider`], optionally persisted to a
//! [`DiskCache`] so later processes can skip the fetch entirely.
//!
//! # Architecture
//!
//! - **ResourceSource**: where a resource comes from (built-in data, a local file)
//! - **CacheCodec**: how a resource is written to and read from the disk cache
//! - **ResourceProvider**: lazy, thread-safe, once-only population with
//!   all-or-nothing visibility
//!
//! # Example
//!
//! ```
//! use wordfreq::resource::stopwords::{BuiltinStopwords, StopwordProvider};
//!
//! # fn main() -> wordfreq::error::Result<()> {
//! let provider = StopwordProvider::new(Box::new(BuiltinStopwords));
//! let stopwords = provider.get()?;
//! assert!(stopwords.contains("the"));
//! assert_eq!(provider.fetch_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod lexicon;
pub mod provider;
pub mod stopwords;

pub use cache::DiskCache;
pub use lexicon::{Lexicon, LexiconProvider};
pub use provider::{CacheCodec, Resolution, ResourceProvider, ResourceSource};
pub use stopwords::{StopwordProvider, StopwordSet};
