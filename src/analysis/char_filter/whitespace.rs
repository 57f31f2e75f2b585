//! Whitespace collapsing char filter.

use super::CharFilter;
use super::pattern_replace::PatternReplaceCharFilter;
use crate::error::Result;

/// A char filter that turns every whitespace run into a single space and
/// trims both ends.
#[derive(Clone, Debug)]
pub struct CollapseWhitespaceCharFilter {
    inner: PatternReplaceCharFilter,
}

impl CollapseWhitespaceCharFilter {
    /// Create a new whitespace collapsing filter.
    pub fn new() -> Result<Self> {
        Ok(CollapseWhitespaceCharFilter {
            inner: PatternReplaceCharFilter::new(r"\s+", " ")?,
        })
    }
}

impl CharFilter for CollapseWhitespaceCharFilter {
    fn filter(&self, input: &str) -> String {
        let collapsed = self.inner.filter(input);
        collapsed.trim().to_string()
    }

    fn name(&self) -> &'static str {
        "collapse_whitespace"
    }
}
