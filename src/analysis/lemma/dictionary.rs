//! Dictionary-backed resolver implementation.

use std::sync::Arc;

use super::LemmaResolver;
use super::rules::SuffixRules;
use crate::resource::lexicon::Lexicon;

/// Resolver that looks tokens up in a [`Lexicon`], then falls back to suffix
/// rules, then to the token itself.
///
/// A token absent from the lexicon and untouched by the rules is its own
/// base form.
#[derive(Debug, Clone)]
pub struct DictionaryResolver {
    lexicon: Arc<Lexicon>,
    rules: Option<SuffixRules>,
}

impl DictionaryResolver {
    /// Create a resolver over a lexicon with the default English suffix rules.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        DictionaryResolver {
            lexicon,
            rules: Some(SuffixRules::english()),
        }
    }

    /// Enable or disable the suffix-rule fallback.
    pub fn with_suffix_rules(mut self, enabled: bool) -> Self {
        self.rules = enabled.then(SuffixRules::english);
        self
    }

    /// The lexicon behind this resolver.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl LemmaResolver for DictionaryResolver {
    fn resolve(&self, token: &str) -> String {
        if let Some(lemma) = self.lexicon.lookup(token) {
            return lemma.to_string();
        }

        self.rules
            .as_ref()
            .and_then(|rules| rules.apply(token))
            .unwrap_or_else(|| token.to_string())
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn version(&self) -> String {
        match self.rules {
            Some(_) => format!("{}+rules", self.lexicon.version()),
            None => self.lexicon.version().to_string(),
        }
    }
}
