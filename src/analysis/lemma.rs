//! Lemma resolvers.
//!
//! A [`LemmaResolver`] maps one lowercase token to its base form. Resolution
//! looks at the token alone: the same token always yields the same lemma for a
//! given resolver version, whatever its neighbours are.

/// Trait for token -> lemma resolution.
pub trait LemmaResolver: Send + Sync {
    /// Resolve a token to its lemma.
    fn resolve(&self, token: &str) -> String;

    /// Get the name of this resolver.
    fn name(&self) -> &'static str;

    /// Revision of the data behind this resolver.
    fn version(&self) -> String;
}

pub mod dictionary;
pub mod identity;
pub mod rules;

pub use dictionary::DictionaryResolver;
pub use identity::IdentityResolver;
pub use rules::SuffixRules;
