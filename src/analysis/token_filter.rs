//! Token filter implementations for token transformation.
//!
//! Filters receive a token stream and produce a new one.
//!
//! # Available Filters
//!
//! - [`stop::StopFilter`] - Removes stopwords
//! - [`lemma::LemmaFilter`] - Replaces each token with its lemma
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Stop Words → Lemma
//! ```
//!
//! Stopword removal runs on surface tokens, before lemmatization.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use wordfreq::analysis::token::{Token, TokenStream};
/// use wordfreq::analysis::token_filter::Filter;
/// use wordfreq::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lemma;
pub mod stop;

pub use lemma::LemmaFilter;
pub use stop::StopFilter;
