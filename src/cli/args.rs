//! Command line argument parsing for the wordfreq CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordFreqError};
use crate::pipeline::{LemmaModel, PipelineConfig, StopwordSource};

/// wordfreq - lemma frequency tables for plain-text corpora
#[derive(Parser, Debug, Clone)]
#[command(name = "wordfreq")]
#[command(about = "Build lemma frequency tables from plain-text books")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct WordFreqArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl WordFreqArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Whether the command asks for stage previews, by flag or config file.
    ///
    /// Previews are logged at `info`, so the binary raises the log level
    /// when this is set.
    pub fn preview_requested(&self) -> bool {
        let pipeline = match &self.command {
            Command::Run(run) => &run.pipeline,
            Command::Batch(batch) => &batch.pipeline,
            _ => return false,
        };
        pipeline.preview
            || pipeline
                .to_config()
                .map(|config| config.preview)
                .unwrap_or(false)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the frequency table of one text
    Run(RunArgs),

    /// Build frequency tables of several texts in parallel
    Batch(BatchArgs),

    /// Upload a file, or every matching file of a folder, to the blob store
    Upload(UploadArgs),

    /// Download an object from the blob store
    Download(DownloadArgs),

    /// List objects in a bucket
    List(ListArgs),

    /// Delete an object from the blob store
    Delete(DeleteArgs),
}

/// Lemma models selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LemmaModelArg {
    /// Built-in English lexicon
    Builtin,
    /// Tokens are their own lemmas
    Identity,
    /// Dictionary file given by --dictionary
    Dictionary,
}

/// Pipeline options shared by `run` and `batch`.
///
/// Flags given here override values from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Lemma model
    #[arg(short = 'm', long)]
    pub lemma_model: Option<LemmaModelArg>,

    /// Lemma dictionary (form<TAB>lemma per line); implies --lemma-model dictionary
    #[arg(long, value_name = "DICTIONARY_FILE")]
    pub dictionary: Option<PathBuf>,

    /// Do not reduce regular plurals missing from the lexicon
    #[arg(long)]
    pub no_suffix_rules: bool,

    /// Keep stopwords
    #[arg(long)]
    pub keep_stopwords: bool,

    /// Stopword list (one word per line) instead of the built-in list
    #[arg(long, value_name = "STOPWORD_FILE")]
    pub stopwords: Option<PathBuf>,

    /// Log previews of each stage
    #[arg(long)]
    pub preview: bool,

    /// Maximum number of characters per preview
    #[arg(long, value_name = "CHARS")]
    pub preview_len: Option<usize>,

    /// Directory for cached linguistic resources
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

impl PipelineArgs {
    /// Build the pipeline configuration: config file first, then flags.
    pub fn to_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        match (self.lemma_model, &self.dictionary) {
            (Some(LemmaModelArg::Builtin), None) => config.lemma_model = LemmaModel::Builtin,
            (Some(LemmaModelArg::Identity), None) => config.lemma_model = LemmaModel::Identity,
            (Some(LemmaModelArg::Dictionary) | None, Some(path)) => {
                config.lemma_model = LemmaModel::Dictionary { path: path.clone() }
            }
            (Some(LemmaModelArg::Dictionary), None) => {
                if !matches!(config.lemma_model, LemmaModel::Dictionary { .. }) {
                    return Err(WordFreqError::invalid_config(
                        "--lemma-model dictionary requires --dictionary",
                    ));
                }
            }
            (Some(model), Some(_)) => {
                return Err(WordFreqError::invalid_config(format!(
                    "--dictionary cannot be combined with --lemma-model {model:?}"
                )));
            }
            (None, None) => {}
        }

        if self.no_suffix_rules {
            config.suffix_rules = false;
        }
        if self.keep_stopwords {
            config.remove_stopwords = false;
        }
        if let Some(path) = &self.stopwords {
            config.stopwords = StopwordSource::File { path: path.clone() };
        }
        if self.preview {
            config.preview = true;
        }
        if let Some(len) = self.preview_len {
            config.preview_len = len;
        }
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

/// Blob store location shared by commands that use it.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Root directory of the blob store (one subdirectory per bucket)
    #[arg(long = "store", value_name = "STORE_DIR", default_value = "blobs")]
    pub store_dir: PathBuf,
}

/// Arguments for a single run
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Input text file (UTF-8)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (.csv or .json); print the table if omitted
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Include a 1-based index column
    #[arg(long)]
    pub index: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Archive the input and output to this bucket after the run
    #[arg(long, value_name = "BUCKET")]
    pub archive: Option<String>,

    /// Key prefix for archived objects
    #[arg(long, default_value = "")]
    pub archive_prefix: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for a batch run
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// Input text files (UTF-8)
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving one table per input
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Table format of the written files
    #[arg(long, default_value = "csv")]
    pub table_format: TableFormat,

    /// Include a 1-based index column
    #[arg(long)]
    pub index: bool,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments for uploading
#[derive(Parser, Debug, Clone)]
pub struct UploadArgs {
    /// Local file or folder
    #[arg(value_name = "LOCAL_PATH")]
    pub local_path: PathBuf,

    /// Target bucket
    #[arg(value_name = "BUCKET")]
    pub bucket: String,

    /// Object key for a single file (default: prefix + file name)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Key prefix
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Only upload files of a folder whose names end with this suffix
    #[arg(short, long, default_value = "")]
    pub suffix: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for downloading
#[derive(Parser, Debug, Clone)]
pub struct DownloadArgs {
    /// Source bucket
    #[arg(value_name = "BUCKET")]
    pub bucket: String,

    /// Object key
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Local destination file
    #[arg(value_name = "LOCAL_PATH")]
    pub local_path: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for listing
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Bucket to list
    #[arg(value_name = "BUCKET")]
    pub bucket: String,

    /// Only list keys starting with this prefix
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for deleting
#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    /// Bucket holding the object
    #[arg(value_name = "BUCKET")]
    pub bucket: String,

    /// Object key
    #[arg(value_name = "KEY")]
    pub key: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Output formats for CLI results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// File formats for written tables
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Comma-separated values
    Csv,
    /// JSON array of rows
    Json,
}

impl TableFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
        }
    }
}
