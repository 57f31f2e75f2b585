//! Char filter implementations for text cleaning.
//!
//! Char filters rewrite the raw text before it is passed to the tokenizer.
//! The normalizer chains them in a fixed order: lowercase, punctuation
//! stripping, whitespace collapsing.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode lowercasing of the whole text
//! - [`punctuation::PunctuationCharFilter`] - Removes a configurable set of characters
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`whitespace::CollapseWhitespaceCharFilter`] - Collapses whitespace runs and trims
//!
//! # Examples
//!
//! ```
//! use wordfreq::analysis::char_filter::CharFilter;
//! use wordfreq::analysis::char_filter::punctuation::PunctuationCharFilter;
//!
//! let filter = PunctuationCharFilter::new();
//! assert_eq!(filter.filter("quick, quick fox!"), "quick quick fox");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
pub mod punctuation;
pub mod whitespace;

pub use lowercase::LowercaseCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
pub use punctuation::PunctuationCharFilter;
pub use whitespace::CollapseWhitespaceCharFilter;
