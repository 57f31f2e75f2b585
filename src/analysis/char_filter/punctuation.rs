//! Punctuation stripping char filter.
//!
//! Only an explicit character class is removed. The default class covers the
//! ASCII sentence punctuation, brackets, quotes and the hyphen found in
//! Gutenberg texts, plus the Spanish inverted marks and the common smart-quote
//! variants. Other Unicode punctuation (e.g. `—`, `…`, `«`) is left alone.

use super::CharFilter;

/// Characters removed by [`PunctuationCharFilter::new`].
pub const DEFAULT_STRIP_CHARS: &[char] = &[
    '.', ',', '!', '?', ';', ':', '¿', '¡', '(', ')', '"', '\u{201C}', '\u{201D}', '\u{2018}',
    '\u{2019}', '\'', '-',
];

/// A char filter that deletes every character of a fixed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PunctuationCharFilter {
    /// Sorted, deduplicated set of characters to delete
    chars: Vec<char>,
}

impl Default for PunctuationCharFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PunctuationCharFilter {
    /// Create a filter with the default character class.
    pub fn new() -> Self {
        Self::with_chars(DEFAULT_STRIP_CHARS.iter().copied())
    }

    /// Create a filter that deletes exactly the given characters.
    pub fn with_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut chars: Vec<char> = chars.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        PunctuationCharFilter { chars }
    }

    /// Check whether a character is deleted by this filter.
    pub fn strips(&self, c: char) -> bool {
        self.chars.binary_search(&c).is_ok()
    }

    /// The characters deleted by this filter, in sorted order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl CharFilter for PunctuationCharFilter {
    fn filter(&self, input: &str) -> String {
        input.chars().filter(|&c| !self.strips(c)).collect()
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_default_class() {
        let filter = PunctuationCharFilter::new();
        let input = "“Well!” said Alice; (she’d read it) -- ¿qué? ¡sí!";
        assert_eq!(filter.filter(input), "Well said Alice shed read it  qué sí");
    }

    #[test]
    fn test_keeps_other_unicode_punctuation() {
        let filter = PunctuationCharFilter::new();
        assert_eq!(filter.filter("wait… «now» — go"), "wait… «now» — go");
    }

    #[test]
    fn test_custom_class() {
        let filter = PunctuationCharFilter::with_chars(['*', '_', '*']);
        assert_eq!(filter.chars(), &['*', '_']);
        assert_eq!(filter.filter("_emph_ and *bold*, too"), "emph and bold, too");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(PunctuationCharFilter::new().filter(""), "");
    }
}
