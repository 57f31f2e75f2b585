//! Diagnostic hooks called between pipeline stages.
//!
//! Observers only look at intermediate values. Nothing they do can change the
//! table a run produces.

use log::info;

use crate::analysis::normalizer::preview;
use crate::frequency::FrequencyTable;

/// Receives intermediate results of a pipeline run.
///
/// Every method has an empty default body, so an observer only implements
/// the hooks it cares about. `source` names the input (a path or `<text>`).
pub trait PipelineObserver: Send + Sync {
    /// Called with the raw text after loading.
    fn on_text(&self, _source: &str, _text: &str) {}

    /// Called with the normalized tokens.
    fn on_tokens(&self, _source: &str, _tokens: &[String]) {}

    /// Called with the lemma sequence.
    fn on_lemmas(&self, _source: &str, _lemmas: &[String]) {}

    /// Called with the finished table.
    fn on_table(&self, _source: &str, _table: &FrequencyTable) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that logs bounded previews at info level.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    preview_len: usize,
}

impl LogObserver {
    /// Create an observer that shows at most `preview_len` characters.
    pub fn new(preview_len: usize) -> Self {
        LogObserver { preview_len }
    }

    /// Maximum number of characters shown.
    pub fn preview_len(&self) -> usize {
        self.preview_len
    }

    /// The first `preview_len` characters of `words` joined by spaces.
    /// Words past the limit are never visited.
    fn preview_words(&self, words: &[String]) -> String {
        let mut out = String::new();
        let mut chars = 0;

        for word in words {
            if chars >= self.preview_len {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
                chars += 1;
            }
            for c in word.chars() {
                if chars >= self.preview_len {
                    break;
                }
                out.push(c);
                chars += 1;
            }
        }
        out
    }
}

impl PipelineObserver for LogObserver {
    fn on_text(&self, source: &str, text: &str) {
        info!(
            "{source}: raw text ({} chars): {}",
            text.chars().count(),
            preview(text, self.preview_len)
        );
    }

    fn on_tokens(&self, source: &str, tokens: &[String]) {
        info!(
            "{source}: {} tokens: {}",
            tokens.len(),
            self.preview_words(tokens)
        );
    }

    fn on_lemmas(&self, source: &str, lemmas: &[String]) {
        info!(
            "{source}: {} lemmas: {}",
            lemmas.len(),
            self.preview_words(lemmas)
        );
    }

    fn on_table(&self, source: &str, table: &FrequencyTable) {
        let top: Vec<String> = table
            .by_frequency()
            .into_iter()
            .rev()
            .take(10)
            .map(|row| format!("{}={}", row.lemma, row.frequency))
            .collect();
        info!(
            "{source}: {} distinct lemmas, {} total; most frequent: {}",
            table.len(),
            table.total(),
            top.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_words_bounded() {
        let observer = LogObserver::new(9);
        let words: Vec<String> = ["alice", "was", "beginning"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        assert_eq!(observer.preview_words(&words), "alice was");
        assert_eq!(LogObserver::new(12).preview_words(&words), "alice was be");
        assert_eq!(LogObserver::new(100).preview_words(&words), "alice was beginning");
        assert_eq!(LogObserver::new(0).preview_words(&words), "");
    }

    #[test]
    fn test_preview_words_of_long_text() {
        let words = vec!["été".to_string(); 100_000];
        let preview = LogObserver::new(7).preview_words(&words);

        assert_eq!(preview, "été été");
        assert_eq!(preview.chars().count(), 7);
    }

    #[test]
    fn test_noop_is_silent() {
        let observer = NoopObserver;
        observer.on_text("<text>", "anything");
        observer.on_tokens("<text>", &[]);
    }
}
