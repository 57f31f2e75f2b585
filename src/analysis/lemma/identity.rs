//! Identity resolver implementation.

use crate::analysis::lemma::LemmaResolver;

/// Identity resolver that returns tokens unchanged.
///
/// This is the explicit pass-through mode; it is never substituted for a
/// dictionary that failed to load.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver;

impl IdentityResolver {
    pub fn new() -> Self {
        IdentityResolver
    }
}

impl LemmaResolver for IdentityResolver {
    fn resolve(&self, token: &str) -> String {
        token.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }

    fn version(&self) -> String {
        "identity".to_string()
    }
}
