//! Text analysis: cleaning, tokenization, stopword removal and lemmatization.
//!
//! The building blocks follow the usual analysis chain:
//!
//! ```text
//! raw text → CharFilter* → Tokenizer → Filter* → tokens
//! ```
//!
//! [`normalizer::Normalizer`] wires the char filters, the whitespace tokenizer
//! and the stop filter together; [`lemmatizer::Lemmatizer`] maps the resulting
//! tokens to their lemmas.

pub mod char_filter;
pub mod lemma;
pub mod lemmatizer;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use lemmatizer::Lemmatizer;
pub use normalizer::Normalizer;
