//! Tokenizer implementations for text analysis.
//!
//! Tokenizers break cleaned text into [`Token`](crate::analysis::token::Token)s.
//! The frequency pipeline cleans punctuation with char filters first, so a
//! plain whitespace split is all it needs.
//!
//! # Examples
//!
//! ```
//! use wordfreq::analysis::tokenizer::Tokenizer;
//! use wordfreq::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one tokenizer can serve concurrent
/// pipeline runs.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;

pub use whitespace::WhitespaceTokenizer;
