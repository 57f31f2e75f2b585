//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows from the tokenizer through the token
//! filters. The normalizer and lemmatizer collapse token streams into plain
//! string sequences ([`TokenSequence`], [`LemmaSequence`]) once a stage is
//! finished.
//!
//! # Examples
//!
//! ```
//! use wordfreq::analysis::token::Token;
//!
//! let token = Token::new("running").with_text("run");
//! assert_eq!(token.text, "run");
//! ```

use std::fmt;

/// A single word after tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The text content of the token
    pub text: String,
}

impl Token {
    /// Create a new token with the given text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token { text: text.into() }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text of this token.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

/// Ordered lowercase words produced by the normalizer.
///
/// Every element is non-empty and contains no whitespace.
pub type TokenSequence = Vec<String>;

/// Ordered base forms, one per token of the [`TokenSequence`] they came from.
pub type LemmaSequence = Vec<String>;

/// Collect the non-empty token texts of a stream.
pub fn collect_texts(tokens: TokenStream) -> Vec<String> {
    tokens
        .filter(|token| !token.is_empty())
        .map(|token| token.text)
        .collect()
}
