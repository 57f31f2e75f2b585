//! Lemmatizing token filter.

use std::fmt;
use std::sync::Arc;

use super::Filter;
use crate::analysis::lemma::{IdentityResolver, LemmaResolver};
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Filter that replaces each token's text with its lemma.
///
/// The mapping is 1:1: no token is dropped, and a resolver that yields an
/// empty lemma leaves the token unchanged.
#[derive(Clone)]
pub struct LemmaFilter {
    resolver: Arc<dyn LemmaResolver>,
}

impl fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("resolver", &self.resolver.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a lemma filter with the given resolver.
    pub fn new(resolver: Arc<dyn LemmaResolver>) -> Self {
        LemmaFilter { resolver }
    }

    /// Create a pass-through lemma filter.
    pub fn identity() -> Self {
        Self::new(Arc::new(IdentityResolver::new()))
    }

    /// The resolver used by this filter.
    pub fn resolver(&self) -> &Arc<dyn LemmaResolver> {
        &self.resolver
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let lemma = self.resolver.resolve(&token.text);
                if lemma.is_empty() {
                    token
                } else {
                    token.with_text(lemma)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
