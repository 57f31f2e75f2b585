//! Configuration for pipeline runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::DEFAULT_PREVIEW_LEN;
use crate::error::{Result, WordFreqError};

/// Which lemma resolver a pipeline uses.
///
/// In JSON, `"builtin"` and `"identity"` are plain strings and a dictionary
/// is `{"dictionary": {"path": "lemmas.tsv"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LemmaModel {
    /// Built-in English lexicon.
    #[default]
    Builtin,
    /// Tokens are their own lemmas.
    Identity,
    /// `form<TAB>lemma` dictionary file.
    Dictionary { path: PathBuf },
}

/// Where the stopword set comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordSource {
    /// Built-in English list.
    #[default]
    Builtin,
    /// One word per line.
    File { path: PathBuf },
}

/// Configuration for a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Lemma resolver.
    pub lemma_model: LemmaModel,

    /// Whether dictionary lemmatization reduces regular plurals missing from
    /// the lexicon.
    pub suffix_rules: bool,

    /// Whether stopwords are removed before lemmatization.
    pub remove_stopwords: bool,

    /// Stopword set source.
    pub stopwords: StopwordSource,

    /// Emit bounded previews of each stage through the observer.
    pub preview: bool,

    /// Maximum number of characters in a preview.
    pub preview_len: usize,

    /// Directory for persisted linguistic resources.
    /// If None, resources are only held in memory.
    pub cache_dir: Option<PathBuf>,

    /// Thread pool size for batch runs.
    /// If None, uses the number of CPU cores.
    pub threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lemma_model: LemmaModel::Builtin,
            suffix_rules: true,
            remove_stopwords: true,
            stopwords: StopwordSource::Builtin,
            preview: false,
            preview_len: DEFAULT_PREVIEW_LEN,
            cache_dir: None,
            threads: None,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WordFreqError::not_found(format!("config file {}", path.display()))
            } else {
                WordFreqError::Io(e)
            }
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(text)
            .map_err(|e| WordFreqError::invalid_config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values no run can use.
    pub fn validate(&self) -> Result<()> {
        if self.preview && self.preview_len == 0 {
            return Err(WordFreqError::invalid_config(
                "preview_len must be positive when preview is enabled",
            ));
        }
        if self.threads == Some(0) {
            return Err(WordFreqError::invalid_config("threads must be positive"));
        }
        if let LemmaModel::Dictionary { path } = &self.lemma_model
            && path.as_os_str().is_empty()
        {
            return Err(WordFreqError::invalid_config("dictionary path is empty"));
        }
        if let StopwordSource::File { path } = &self.stopwords
            && path.as_os_str().is_empty()
        {
            return Err(WordFreqError::invalid_config("stopword file path is empty"));
        }
        Ok(())
    }

    /// Set the lemma model.
    pub fn with_lemma_model(mut self, lemma_model: LemmaModel) -> Self {
        self.lemma_model = lemma_model;
        self
    }

    /// Enable or disable the suffix-rule fallback.
    pub fn with_suffix_rules(mut self, suffix_rules: bool) -> Self {
        self.suffix_rules = suffix_rules;
        self
    }

    /// Enable or disable stopword removal.
    pub fn with_remove_stopwords(mut self, remove_stopwords: bool) -> Self {
        self.remove_stopwords = remove_stopwords;
        self
    }

    /// Set the stopword source.
    pub fn with_stopwords(mut self, stopwords: StopwordSource) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Enable previews, optionally changing their length.
    pub fn with_preview(mut self, preview: bool, preview_len: Option<usize>) -> Self {
        self.preview = preview;
        if let Some(len) = preview_len {
            self.preview_len = len;
        }
        self
    }

    /// Set the resource cache directory.
    pub fn with_cache_dir<P: Into<PathBuf>>(mut self, cache_dir: P) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// Set the batch thread pool size.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Effective thread pool size.
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }
}
