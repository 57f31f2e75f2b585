//! Normalizer: raw text to an ordered sequence of lowercase tokens.
//!
//! The normalizer applies processing in this order:
//! 1. Char Filters: lowercase, punctuation stripping, whitespace collapsing
//! 2. Tokenizer: splits the cleaned text on whitespace
//! 3. Stop Filter: drops stopwords, when requested
//!
//! # Examples
//!
//! ```
//! use wordfreq::analysis::normalizer::Normalizer;
//!
//! # fn main() -> wordfreq::error::Result<()> {
//! let normalizer = Normalizer::new()?;
//! assert_eq!(normalizer.clean("The quick, quick fox!"), "the quick quick fox");
//!
//! let tokens = normalizer.normalize("The quick, quick fox!", true)?;
//! assert_eq!(tokens, vec!["quick", "quick", "fox"]);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::char_filter::{
    CharFilter, CollapseWhitespaceCharFilter, LowercaseCharFilter, PunctuationCharFilter,
};
use crate::analysis::token::{TokenSequence, TokenStream, collect_texts};
use crate::analysis::token_filter::{Filter, StopFilter};
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::error::Result;
use crate::resource::stopwords::{self, StopwordProvider};

/// Default number of characters shown by [`preview`].
pub const DEFAULT_PREVIEW_LEN: usize = 500;

/// Return at most `max_chars` leading characters of `text`.
///
/// Never splits a multi-byte character.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Turns raw text into a [`TokenSequence`].
#[derive(Clone)]
pub struct Normalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
    tokenizer: Arc<dyn Tokenizer>,
    stopwords: Arc<StopwordProvider>,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let char_filters: Vec<_> = self.char_filters.iter().map(|cf| cf.name()).collect();
        f.debug_struct("Normalizer")
            .field("char_filters", &char_filters)
            .field("tokenizer", &self.tokenizer.name())
            .field("stopwords", &self.stopwords.id())
            .finish()
    }
}

impl Normalizer {
    /// Create a normalizer with the default punctuation set and the
    /// process-wide built-in stopword provider.
    pub fn new() -> Result<Self> {
        Self::with_stopwords(stopwords::default_provider())
    }

    /// Create a normalizer backed by the given stopword provider.
    pub fn with_stopwords(stopwords: Arc<StopwordProvider>) -> Result<Self> {
        Ok(Normalizer {
            char_filters: vec![
                Arc::new(LowercaseCharFilter::new()),
                Arc::new(PunctuationCharFilter::new()),
                Arc::new(CollapseWhitespaceCharFilter::new()?),
            ],
            tokenizer: Arc::new(WhitespaceTokenizer::new()),
            stopwords,
        })
    }

    /// Replace the punctuation char filter with one stripping `chars`.
    pub fn with_strip_chars<I>(mut self, chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.char_filters[1] = Arc::new(PunctuationCharFilter::with_chars(chars));
        self
    }

    /// The stopword provider used when stopword removal is requested.
    pub fn stopwords(&self) -> &Arc<StopwordProvider> {
        &self.stopwords
    }

    /// Lowercase, strip punctuation and collapse whitespace.
    pub fn clean(&self, raw_text: &str) -> String {
        let mut text = raw_text.to_string();
        for char_filter in &self.char_filters {
            text = char_filter.filter(&text);
        }
        text
    }

    /// Clean, tokenize and optionally drop stopwords.
    ///
    /// The stopword set is only fetched when `remove_stopwords` is set, so a
    /// run without stopword removal never touches the resource.
    pub fn analyze(&self, raw_text: &str, remove_stopwords: bool) -> Result<TokenStream> {
        let cleaned = self.clean(raw_text);
        let mut tokens = self.tokenizer.tokenize(&cleaned)?;

        if remove_stopwords {
            let stop_words = self.stopwords.get()?;
            tokens = StopFilter::new(stop_words).filter(tokens)?;
        }

        Ok(tokens)
    }

    /// Normalize raw text into an ordered token sequence.
    pub fn normalize(&self, raw_text: &str, remove_stopwords: bool) -> Result<TokenSequence> {
        let tokens = collect_texts(self.analyze(raw_text, remove_stopwords)?);
        debug!(
            "normalized {} chars into {} tokens (stopwords removed: {})",
            raw_text.len(),
            tokens.len(),
            remove_stopwords
        );
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, WordFreqError};
    use crate::resource::provider::ResourceSource;
    use crate::resource::stopwords::StopwordSet;

    fn normalizer_with(words: &[&str]) -> Normalizer {
        struct Fixed(Vec<String>);

        impl ResourceSource<StopwordSet> for Fixed {
            fn id(&self) -> &str {
                "fixed"
            }

            fn fetch(&self) -> Result<StopwordSet> {
                Ok(StopwordSet::from_words(&self.0))
            }
        }

        let words = words.iter().map(|w| w.to_string()).collect();
        let provider = StopwordProvider::new(Box::new(Fixed(words)));
        Normalizer::with_stopwords(Arc::new(provider)).unwrap()
    }

    #[test]
    fn test_clean() {
        let normalizer = Normalizer::new().unwrap();

        assert_eq!(
            normalizer.clean("  “Curiouser  and curiouser!”\n\tcried Alice.  "),
            "curiouser and curiouser cried alice"
        );
        assert_eq!(normalizer.clean(""), "");
    }

    #[test]
    fn test_normalize_without_stopwords() {
        let normalizer = normalizer_with(&["the"]);
        let tokens = normalizer.normalize("The quick, quick fox!", false).unwrap();

        assert_eq!(tokens, vec!["the", "quick", "quick", "fox"]);
        assert!(!normalizer.stopwords().is_loaded());
    }

    #[test]
    fn test_normalize_with_stopwords() {
        let normalizer = normalizer_with(&["the"]);
        let tokens = normalizer.normalize("The quick, quick fox!", true).unwrap();

        assert_eq!(tokens, vec!["quick", "quick", "fox"]);
    }

    #[test]
    fn test_tokens_are_clean() {
        let normalizer = Normalizer::new().unwrap();
        let text = "¿Qué? ¡Sí! -- (Well) “said” ‘she’; it's: done.";
        let stripped = PunctuationCharFilter::new();

        for token in normalizer.normalize(text, false).unwrap() {
            assert!(!token.is_empty());
            assert!(!token.chars().any(char::is_whitespace));
            assert!(!token.chars().any(|c| stripped.strips(c)));
            assert_eq!(token, token.to_lowercase());
        }
    }

    #[test]
    fn test_other_punctuation_kept() {
        let normalizer = Normalizer::new().unwrap();
        let tokens = normalizer.normalize("a*b [c] e&f", false).unwrap();

        assert_eq!(tokens, vec!["a*b", "[c]", "e&f"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        let normalizer = Normalizer::new().unwrap();

        assert!(normalizer.normalize("", true).unwrap().is_empty());
        assert!(normalizer.normalize(" \n\t ", false).unwrap().is_empty());
        assert!(normalizer.normalize("!!! ... ---", false).unwrap().is_empty());
    }

    #[test]
    fn test_custom_strip_chars() {
        let normalizer = Normalizer::new().unwrap().with_strip_chars(['#']);
        let tokens = normalizer.normalize("#Hello, world", false).unwrap();

        assert_eq!(tokens, vec!["hello,", "world"]);
    }

    #[test]
    fn test_stopword_failure_is_resource_unavailable() {
        struct Broken;

        impl ResourceSource<StopwordSet> for Broken {
            fn id(&self) -> &str {
                "broken"
            }

            fn fetch(&self) -> Result<StopwordSet> {
                Err(WordFreqError::other("offline"))
            }
        }

        let provider = Arc::new(StopwordProvider::new(Box::new(Broken)));
        let normalizer = Normalizer::with_stopwords(provider).unwrap();

        let err = normalizer.normalize("the fox", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);

        // Without stopword removal the resource is never needed.
        assert_eq!(normalizer.normalize("the fox", false).unwrap().len(), 2);
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("hello world", 5), "hello");
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("short", 500), "short");
        assert_eq!(preview("", 3), "");
    }
}
