//! Stopword sets and their sources.
//!
//! The built-in list is the conventional English list used for word-frequency
//! studies, stored in normalized form: entries that carry an apostrophe in
//! their written form (`don't`, `isn't`) are omitted because the normalizer
//! strips apostrophes before stopword removal, which leaves the bare stems
//! (`don`, `isn`) that the list already contains.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use ahash::AHashSet;

use crate::error::{Result, WordFreqError};
use crate::resource::cache::file_cache_key;
use crate::resource::provider::{CacheCodec, ResourceProvider, ResourceSource};

/// Built-in English stopwords, already lowercase and apostrophe-free.
const DEFAULT_ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn",
    "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan",
    "shouldn", "wasn", "weren", "won", "wouldn",
];

/// An immutable set of lowercase stopwords.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: AHashSet<String>,
}

impl StopwordSet {
    /// Build a set from words. Entries are lowercased and trimmed; blank
    /// entries are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        StopwordSet { words }
    }

    /// The built-in English set.
    pub fn english() -> Self {
        Self::from_words(DEFAULT_ENGLISH_STOPWORDS)
    }

    /// Parse a word list: one word per line, `#` starts a comment line.
    pub fn parse(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Check whether a (lowercase) token is a stopword.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of stopwords in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words in ascending order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

impl CacheCodec for StopwordSet {
    fn encode(&self) -> String {
        self.sorted().join("\n")
    }

    fn decode(text: &str) -> Result<Self> {
        Ok(Self::parse(text))
    }
}

/// The built-in English stopword list.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinStopwords;

impl ResourceSource<StopwordSet> for BuiltinStopwords {
    fn id(&self) -> &str {
        "stopwords-english"
    }

    fn fetch(&self) -> Result<StopwordSet> {
        Ok(StopwordSet::english())
    }
}

/// A stopword list read from a local file.
#[derive(Clone, Debug)]
pub struct FileStopwords {
    path: PathBuf,
    id: String,
}

impl FileStopwords {
    /// Read stopwords from `path` when fetched.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let id = format!("stopwords-{}", path.display());
        FileStopwords { path, id }
    }
}

impl ResourceSource<StopwordSet> for FileStopwords {
    fn id(&self) -> &str {
        &self.id
    }

    fn cache_key(&self) -> Option<String> {
        file_cache_key(&self.id, &self.path)
    }

    fn fetch(&self) -> Result<StopwordSet> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(StopwordSet::parse(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(WordFreqError::not_found(
                self.path.display().to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

/// Provider of the stopword set.
pub type StopwordProvider = ResourceProvider<StopwordSet>;

static DEFAULT_PROVIDER: LazyLock<Arc<StopwordProvider>> =
    LazyLock::new(|| Arc::new(StopwordProvider::new(Box::new(BuiltinStopwords))));

/// The process-wide provider of the built-in English stopwords.
pub fn default_provider() -> Arc<StopwordProvider> {
    Arc::clone(&DEFAULT_PROVIDER)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::error::ErrorKind as WordFreqErrorKind;

    #[test]
    fn test_english_set() {
        let set = StopwordSet::english();
        assert!(set.contains("the"));
        assert!(set.contains("don"));
        assert!(!set.contains("rabbit"));
        assert!(set.sorted().iter().all(|w| !w.contains('\'')));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let set = StopwordSet::parse("# custom list\nThe\n\n  and \n");
        assert_eq!(set.len(), 2);
        assert!(set.contains("the"));
        assert!(set.contains("and"));
    }

    #[test]
    fn test_codec_round_trip_is_sorted() {
        let set = StopwordSet::from_words(["of", "and", "the"]);
        assert_eq!(set.encode(), "and\nof\nthe");
        assert_eq!(StopwordSet::decode(&set.encode()).unwrap(), set);
    }

    #[test]
    fn test_file_source() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "alice\nrabbit").unwrap();

        let provider = StopwordProvider::new(Box::new(FileStopwords::new(file.path())));
        let set = provider.get().unwrap();
        assert!(set.contains("alice"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_missing_file_is_resource_unavailable() {
        let provider = StopwordProvider::new(Box::new(FileStopwords::new("/no/such/list.txt")));
        let err = provider.get().unwrap_err();
        assert_eq!(err.kind(), WordFreqErrorKind::ResourceUnavailable);
        assert_eq!(provider.fetch_count(), 1);
    }

    #[test]
    fn test_default_provider_is_shared() {
        let a = default_provider();
        let b = default_provider();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.get().unwrap().contains("the"));
    }
}
