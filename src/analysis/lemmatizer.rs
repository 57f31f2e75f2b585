//! Lemmatizer: token sequence to lemma sequence.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::lemma::{DictionaryResolver, IdentityResolver, LemmaResolver};
use crate::analysis::token::{IntoTokenStream, LemmaSequence, Token};
use crate::analysis::token_filter::{Filter, LemmaFilter};
use crate::error::Result;
use crate::resource::lexicon::{self, LexiconProvider};

/// Where the lemmatizer gets its resolver from.
#[derive(Clone)]
pub enum LemmaBackend {
    /// Tokens are their own lemmas.
    Identity,
    /// Dictionary lookup over a lexicon obtained from a provider.
    Dictionary {
        /// Provider of the lexicon.
        provider: Arc<LexiconProvider>,
        /// Whether regular plurals missing from the lexicon are reduced by
        /// suffix rules.
        suffix_rules: bool,
    },
}

impl fmt::Debug for LemmaBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LemmaBackend::Identity => f.write_str("Identity"),
            LemmaBackend::Dictionary {
                provider,
                suffix_rules,
            } => f
                .debug_struct("Dictionary")
                .field("provider", &provider.id())
                .field("suffix_rules", suffix_rules)
                .finish(),
        }
    }
}

/// Maps every token to its base form, one lemma per token.
#[derive(Clone, Debug)]
pub struct Lemmatizer {
    backend: LemmaBackend,
}

impl Lemmatizer {
    /// Dictionary lemmatizer over the process-wide built-in lexicon.
    pub fn new() -> Self {
        Self::with_provider(lexicon::default_provider())
    }

    /// Dictionary lemmatizer over the given lexicon provider.
    pub fn with_provider(provider: Arc<LexiconProvider>) -> Self {
        Lemmatizer {
            backend: LemmaBackend::Dictionary {
                provider,
                suffix_rules: true,
            },
        }
    }

    /// Pass-through lemmatizer.
    pub fn identity() -> Self {
        Lemmatizer {
            backend: LemmaBackend::Identity,
        }
    }

    /// Enable or disable the suffix-rule fallback of a dictionary lemmatizer.
    pub fn with_suffix_rules(mut self, enabled: bool) -> Self {
        if let LemmaBackend::Dictionary { suffix_rules, .. } = &mut self.backend {
            *suffix_rules = enabled;
        }
        self
    }

    /// The backend of this lemmatizer.
    pub fn backend(&self) -> &LemmaBackend {
        &self.backend
    }

    /// Obtain the resolver, loading the lexicon on first use.
    ///
    /// A lexicon that cannot be loaded is reported as `ResourceUnavailable`;
    /// tokens are never passed through unchanged as a fallback.
    pub fn resolver(&self) -> Result<Arc<dyn LemmaResolver>> {
        match &self.backend {
            LemmaBackend::Identity => Ok(Arc::new(IdentityResolver::new())),
            LemmaBackend::Dictionary {
                provider,
                suffix_rules,
            } => {
                let lexicon = provider.get()?;
                Ok(Arc::new(
                    DictionaryResolver::new(lexicon).with_suffix_rules(*suffix_rules),
                ))
            }
        }
    }

    /// Version of the resolver, e.g. `builtin-en-1+rules`.
    pub fn version(&self) -> Result<String> {
        Ok(self.resolver()?.version())
    }

    /// Lemmatize a token sequence.
    pub fn lemmatize<S: AsRef<str>>(&self, tokens: &[S]) -> Result<LemmaSequence> {
        let filter = LemmaFilter::new(self.resolver()?);

        let stream = tokens
            .iter()
            .map(|token| Token::new(token.as_ref()))
            .collect::<Vec<_>>()
            .into_token_stream();

        let lemmas: LemmaSequence = filter.filter(stream)?.map(|token| token.text).collect();
        debug!(
            "lemmatized {} tokens with {} resolver",
            lemmas.len(),
            filter.resolver().name()
        );
        Ok(lemmas)
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}
