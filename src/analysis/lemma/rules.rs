//! Suffix rules for regular English plurals.

/// Ordered suffix rewrite rules applied to forms missing from the lexicon.
///
/// Only regular noun plurals are handled. Verb inflections (`-ed`, `-ing`)
/// need part-of-speech context to undo safely and are left to the lexicon.
#[derive(Debug, Clone)]
pub struct SuffixRules {
    /// (suffix, replacement, minimum word length in chars)
    rules: Vec<(String, String, usize)>,
    /// Endings that block the bare `-s` rule.
    keep_endings: Vec<String>,
}

impl Default for SuffixRules {
    fn default() -> Self {
        Self::english()
    }
}

impl SuffixRules {
    /// The default English plural rules.
    pub fn english() -> Self {
        let rules = [
            ("sses", "ss", 5),
            ("shes", "sh", 5),
            ("ches", "ch", 5),
            ("zzes", "zz", 5),
            ("xes", "x", 4),
            ("ies", "y", 5),
            ("s", "", 4),
        ];
        let keep_endings = ["ss", "us", "is"];

        SuffixRules {
            rules: rules
                .iter()
                .map(|&(suffix, replacement, min_len)| {
                    (suffix.to_string(), replacement.to_string(), min_len)
                })
                .collect(),
            keep_endings: keep_endings.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create rules from custom (suffix, replacement, minimum length) triples.
    /// Rules are tried in the given order; the first match wins.
    pub fn with_rules(rules: Vec<(String, String, usize)>) -> Self {
        SuffixRules {
            rules,
            keep_endings: Vec::new(),
        }
    }

    /// Apply the first matching rule, or return `None` if no rule applies.
    pub fn apply(&self, word: &str) -> Option<String> {
        let length = word.chars().count();

        for (suffix, replacement, min_len) in &self.rules {
            if length < *min_len || !word.ends_with(suffix.as_str()) {
                continue;
            }
            if suffix == "s" && self.keep_endings.iter().any(|e| word.ends_with(e.as_str())) {
                return None;
            }
            let stem = &word[..word.len() - suffix.len()];
            return Some(format!("{stem}{replacement}"));
        }

        None
    }
}
