//! The pipeline orchestrator.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::normalizer::Normalizer;
use crate::error::{Result, Stage, WordFreqError};
use crate::frequency::{FrequencyTable, TableExporter, aggregate};
use crate::pipeline::config::{LemmaModel, PipelineConfig, StopwordSource};
use crate::pipeline::loader::load_text;
use crate::pipeline::observer::{LogObserver, NoopObserver, PipelineObserver};
use crate::resource::cache::DiskCache;
use crate::resource::lexicon::{self, BuiltinLexicon, FileLexicon, Lexicon, LexiconProvider};
use crate::resource::provider::{CacheCodec, ResourceProvider, ResourceSource};
use crate::resource::stopwords::{
    self, BuiltinStopwords, FileStopwords, StopwordProvider, StopwordSet,
};

/// Label used for in-memory inputs in log lines and observer calls.
const TEXT_SOURCE: &str = "<text>";

/// Result of one input of a batch run.
#[derive(Debug)]
pub struct BatchItem {
    /// The input path.
    pub path: PathBuf,
    /// The table, or the error that aborted this input.
    pub result: Result<FrequencyTable>,
}

/// Load, normalize, lemmatize and aggregate texts.
///
/// A pipeline is cheap to share: its resource providers are reference
/// counted and fetched at most once, whichever run needs them first.
#[derive(Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    normalizer: Normalizer,
    lemmatizer: Lemmatizer,
    observer: Arc<dyn PipelineObserver>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("normalizer", &self.normalizer)
            .field("lemmatizer", &self.lemmatizer)
            .finish()
    }
}

impl Pipeline {
    /// Build a pipeline from a configuration.
    ///
    /// Resources are not fetched here; the first run that needs one fetches
    /// it.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let cache = match &config.cache_dir {
            Some(dir) => Some(DiskCache::new(dir)?),
            None => None,
        };

        let normalizer = Normalizer::with_stopwords(stopword_provider(&config, cache.clone()))?;
        let lemmatizer = match &config.lemma_model {
            LemmaModel::Identity => Lemmatizer::identity(),
            model => Lemmatizer::with_provider(lexicon_provider(model, cache)),
        }
        .with_suffix_rules(config.suffix_rules);

        let observer: Arc<dyn PipelineObserver> = if config.preview {
            Arc::new(LogObserver::new(config.preview_len))
        } else {
            Arc::new(NoopObserver)
        };

        Ok(Pipeline {
            config,
            normalizer,
            lemmatizer,
            observer,
        })
    }

    /// Assemble a pipeline from already built stages.
    pub fn from_parts(config: PipelineConfig, normalizer: Normalizer, lemmatizer: Lemmatizer) -> Self {
        Pipeline {
            config,
            normalizer,
            lemmatizer,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replace the observer.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The configuration of this pipeline.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The normalizer stage.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// The lemmatizer stage.
    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    /// Run the pipeline over a text file.
    pub fn run<P: AsRef<Path>>(&self, source: P) -> Result<FrequencyTable> {
        let path = source.as_ref();
        let label = path.display().to_string();
        let started = Instant::now();

        debug!("{label}: load");
        let text = load_text(path).map_err(|e| e.at_stage(Stage::Load))?;
        let table = self.process(&label, &text)?;

        info!(
            "{label}: {} distinct lemmas from {} tokens in {:?}",
            table.len(),
            table.total(),
            started.elapsed()
        );
        Ok(table)
    }

    /// Run the pipeline over in-memory text.
    pub fn run_text(&self, text: &str) -> Result<FrequencyTable> {
        self.process(TEXT_SOURCE, text)
    }

    /// Run the pipeline over a text file and write the table to `output`.
    pub fn run_to_path<P, Q>(&self, source: P, output: Q, exporter: &TableExporter) -> Result<FrequencyTable>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let table = self.run(source)?;
        exporter
            .write_to_path(&table, output)
            .map_err(|e| e.at_stage(Stage::Export))?;
        Ok(table)
    }

    /// Run the pipeline over several files in parallel.
    ///
    /// Inputs are independent: one failing input does not affect the others.
    /// Results come back in input order.
    pub fn run_batch<P>(&self, sources: &[P]) -> Result<Vec<BatchItem>>
    where
        P: AsRef<Path> + Sync,
    {
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(self.config.thread_count())
            .thread_name(|i| format!("wordfreq-batch-{i}"))
            .build()
            .map_err(|e| WordFreqError::other(format!("Failed to create thread pool: {e}")))?;

        debug!(
            "batch of {} inputs on {} threads",
            sources.len(),
            thread_pool.current_num_threads()
        );

        let items = thread_pool.install(|| {
            sources
                .par_iter()
                .map(|source| BatchItem {
                    path: source.as_ref().to_path_buf(),
                    result: self.run(source),
                })
                .collect::<Vec<_>>()
        });

        Ok(items)
    }

    fn process(&self, label: &str, text: &str) -> Result<FrequencyTable> {
        self.observer.on_text(label, text);

        debug!("{label}: normalize");
        let tokens = self
            .normalizer
            .normalize(text, self.config.remove_stopwords)
            .map_err(|e| e.at_stage(Stage::Normalize))?;
        self.observer.on_tokens(label, &tokens);

        debug!("{label}: lemmatize");
        let lemmas = self
            .lemmatizer
            .lemmatize(&tokens)
            .map_err(|e| e.at_stage(Stage::Lemmatize))?;
        self.observer.on_lemmas(label, &lemmas);

        debug!("{label}: aggregate");
        let table = aggregate(&lemmas);
        self.observer.on_table(label, &table);

        Ok(table)
    }
}

fn stopword_provider(config: &PipelineConfig, cache: Option<DiskCache>) -> Arc<StopwordProvider> {
    let source: Box<dyn ResourceSource<StopwordSet>> = match &config.stopwords {
        StopwordSource::Builtin if cache.is_none() => return stopwords::default_provider(),
        StopwordSource::Builtin => Box::new(BuiltinStopwords),
        StopwordSource::File { path } => Box::new(FileStopwords::new(path)),
    };
    Arc::new(with_cache(StopwordProvider::new(source), cache))
}

fn lexicon_provider(model: &LemmaModel, cache: Option<DiskCache>) -> Arc<LexiconProvider> {
    let source: Box<dyn ResourceSource<Lexicon>> = match model {
        LemmaModel::Dictionary { path } => Box::new(FileLexicon::new(path)),
        _ if cache.is_none() => return lexicon::default_provider(),
        _ => Box::new(BuiltinLexicon),
    };
    Arc::new(with_cache(LexiconProvider::new(source), cache))
}

fn with_cache<T>(provider: ResourceProvider<T>, cache: Option<DiskCache>) -> ResourceProvider<T>
where
    T: CacheCodec + Send + Sync,
{
    match cache {
        Some(cache) => provider.with_cache(cache),
        None => provider,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use parking_lot::Mutex;

    use super::*;
    use crate::error::ErrorKind;

    fn identity_pipeline(stop: &[&str]) -> Pipeline {
        struct Fixed(Vec<String>);

        impl ResourceSource<StopwordSet> for Fixed {
            fn id(&self) -> &str {
                "fixed"
            }

            fn fetch(&self) -> Result<StopwordSet> {
                Ok(StopwordSet::from_words(&self.0))
            }
        }

        let words = stop.iter().map(|w| w.to_string()).collect();
        let provider = Arc::new(StopwordProvider::new(Box::new(Fixed(words))));
        Pipeline::from_parts(
            PipelineConfig::default().with_lemma_model(LemmaModel::Identity),
            Normalizer::with_stopwords(provider).unwrap(),
            Lemmatizer::identity(),
        )
    }

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl PipelineObserver for Recorder {
        fn on_text(&self, source: &str, _text: &str) {
            self.calls.lock().push(format!("text:{source}"));
        }

        fn on_tokens(&self, _source: &str, tokens: &[String]) {
            self.calls.lock().push(format!("tokens:{}", tokens.len()));
        }

        fn on_lemmas(&self, _source: &str, lemmas: &[String]) {
            self.calls.lock().push(format!("lemmas:{}", lemmas.len()));
        }

        fn on_table(&self, _source: &str, table: &FrequencyTable) {
            self.calls.lock().push(format!("table:{}", table.len()));
        }
    }

    #[test]
    fn test_quick_fox() {
        let table = identity_pipeline(&["the"])
            .run_text("The quick, quick fox!")
            .unwrap();

        assert_eq!(table.pairs(), vec![("fox", 1), ("quick", 2)]);
    }

    #[test]
    fn test_empty_text() {
        let table = identity_pipeline(&["the"]).run_text("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let recorder = Arc::new(Recorder::default());
        let pipeline = identity_pipeline(&["the"]).with_observer(recorder.clone());

        let observed = pipeline.run_text("The quick, quick fox!").unwrap();
        let plain = identity_pipeline(&["the"])
            .run_text("The quick, quick fox!")
            .unwrap();

        assert_eq!(observed, plain);
        assert_eq!(
            *recorder.calls.lock(),
            vec!["text:<text>", "tokens:3", "lemmas:3", "table:2"]
        );
    }

    #[test]
    fn test_missing_input_is_load_stage() {
        let err = identity_pipeline(&[])
            .run("/nonexistent/book.txt")
            .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Load));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_dictionary_is_lemmatize_stage() {
        let config = PipelineConfig::default().with_lemma_model(LemmaModel::Dictionary {
            path: PathBuf::from("/nonexistent/lemmas.tsv"),
        });
        let pipeline = Pipeline::new(config).unwrap();

        let err = pipeline.run_text("mice").unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Lemmatize));
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
    }

    #[test]
    fn test_default_pipeline() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let table = pipeline
            .run_text("The mice were running and the mouse ran.")
            .unwrap();

        assert_eq!(table.pairs(), vec![("mouse", 2), ("run", 2)]);
    }

    #[test]
    fn test_run_to_path_and_batch() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        fs::write(&first, "cat cat dog").unwrap();
        fs::write(&second, "ant").unwrap();

        let pipeline = identity_pipeline(&[]);
        let output = dir.path().join("out").join("first.csv");
        pipeline
            .run_to_path(&first, &output, &TableExporter::default())
            .unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "lemma,frequency\ncat,2\ndog,1\n"
        );

        let missing = dir.path().join("missing.txt");
        let items = pipeline
            .run_batch(&[first.clone(), missing.clone(), second.clone()])
            .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].path, first);
        assert_eq!(
            items[0].result.as_ref().unwrap().pairs(),
            vec![("cat", 2), ("dog", 1)]
        );
        assert_eq!(
            items[1].result.as_ref().unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(items[2].result.as_ref().unwrap().pairs(), vec![("ant", 1)]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Pipeline::new(PipelineConfig::default().with_threads(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
