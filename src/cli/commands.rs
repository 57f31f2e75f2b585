//! Command implementations for the wordfreq CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, Stage, WordFreqError};
use crate::frequency::{ExportFormat, TableExporter};
use crate::pipeline::Pipeline;
use crate::storage::{ArchiveOutcome, BlobStore, FileBlobStore, archive, join_key};

/// Execute a CLI command.
pub fn execute_command(args: WordFreqArgs) -> Result<()> {
    match &args.command {
        Command::Run(run_args) => run_pipeline(run_args.clone(), &args),
        Command::Batch(batch_args) => run_batch(batch_args.clone(), &args),
        Command::Upload(upload_args) => upload(upload_args.clone(), &args),
        Command::Download(download_args) => download(download_args.clone(), &args),
        Command::List(list_args) => list_objects(list_args.clone(), &args),
        Command::Delete(delete_args) => delete_object(delete_args.clone(), &args),
    }
}

/// Build the table of one text.
fn run_pipeline(args: RunArgs, cli_args: &WordFreqArgs) -> Result<()> {
    let config = args.pipeline.to_config()?;
    let pipeline = Pipeline::new(config)?;
    let start_time = Instant::now();

    let table = match &args.output {
        Some(output) => {
            let exporter = TableExporter::new(ExportFormat::from_path(output))
                .with_index(args.index)
                .with_pretty(cli_args.pretty);
            pipeline.run_to_path(&args.input, output, &exporter)?
        }
        None => pipeline.run(&args.input)?,
    };
    let duration = start_time.elapsed();

    let archived = args.archive.as_deref().map(|bucket| {
        let store = match FileBlobStore::new(&args.store.store_dir) {
            Ok(store) => store,
            Err(e) => {
                warn!("{}", WordFreqError::upload(e.to_string()));
                return false;
            }
        };
        let mut uploaded = archive_file(&store, &args.input, bucket, &args.archive_prefix, "raw");
        if let Some(output) = &args.output {
            uploaded &= archive_file(&store, output, bucket, &args.archive_prefix, "processed");
        }
        uploaded
    });

    match &args.output {
        Some(output) => output_result(
            "Frequency table written",
            &RunSummary {
                input: args.input.to_string_lossy().to_string(),
                output: Some(output.to_string_lossy().to_string()),
                distinct_lemmas: table.len(),
                total_lemmas: table.total(),
                duration_ms: duration.as_millis() as u64,
                archived,
            },
            cli_args,
        ),
        None => output_table(&table, args.index, cli_args),
    }
}

/// Upload `path` as `<prefix>/<area>/<file name>`, logging failures.
fn archive_file(store: &dyn BlobStore, path: &Path, bucket: &str, prefix: &str, area: &str) -> bool {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let key = join_key(&join_key(prefix, area), &name);

    match archive(store, path, bucket, &key) {
        ArchiveOutcome::Uploaded(_) => {
            info!("archived {} as {bucket}/{key}", path.display());
            true
        }
        ArchiveOutcome::Failed(_) => false,
    }
}

/// Build tables for several texts.
fn run_batch(args: BatchArgs, cli_args: &WordFreqArgs) -> Result<()> {
    let mut config = args.pipeline.to_config()?;
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    let pipeline = Pipeline::new(config)?;

    fs::create_dir_all(&args.output_dir)?;
    let export_format = match args.table_format {
        TableFormat::Csv => ExportFormat::Csv,
        TableFormat::Json => ExportFormat::Json,
    };
    let exporter = TableExporter::new(export_format)
        .with_index(args.index)
        .with_pretty(cli_args.pretty);

    let start_time = Instant::now();
    let items = pipeline.run_batch(&args.inputs[..])?;

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let input = item.path.to_string_lossy().to_string();
        let output = output_path(&args.output_dir, &item.path, args.table_format);

        let written = item.result.and_then(|table| {
            exporter
                .write_to_path(&table, &output)
                .map(|()| table)
                .map_err(|e| e.at_stage(Stage::Export))
        });

        let entry = match written {
            Ok(table) => BatchEntry {
                input,
                output: Some(output.to_string_lossy().to_string()),
                distinct_lemmas: Some(table.len()),
                total_lemmas: Some(table.total()),
                error: None,
            },
            Err(e) => {
                warn!("{input}: {e}");
                BatchEntry {
                    input,
                    output: None,
                    distinct_lemmas: None,
                    total_lemmas: None,
                    error: Some(e.to_string()),
                }
            }
        };
        entries.push(entry);
    }

    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    let summary = BatchSummary {
        succeeded: entries.len() - failed,
        failed,
        entries,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };
    output_result("Batch finished", &summary, cli_args)?;

    if failed > 0 {
        return Err(WordFreqError::other(format!(
            "{failed} of {} inputs failed",
            summary.entries.len()
        )));
    }
    Ok(())
}

/// `<output_dir>/<input stem>.<ext>`
fn output_path(output_dir: &Path, input: &Path, format: TableFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{stem}.{}", format.extension()))
}

/// Upload a file or a folder.
fn upload(args: UploadArgs, cli_args: &WordFreqArgs) -> Result<()> {
    let store = FileBlobStore::new(&args.store.store_dir)?;

    let keys = if args.local_path.is_dir() {
        if args.key.is_some() {
            return Err(WordFreqError::invalid_config(
                "--key applies to single files; use --prefix for folders",
            ));
        }
        store.put_all(&args.local_path, &args.bucket, &args.prefix, &args.suffix)?
    } else {
        let key = match &args.key {
            Some(key) => key.clone(),
            None => {
                let name = args
                    .local_path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .ok_or_else(|| {
                        WordFreqError::invalid_config(format!(
                            "cannot derive a key from {}",
                            args.local_path.display()
                        ))
                    })?;
                join_key(&args.prefix, &name)
            }
        };
        store.put(&args.local_path, &args.bucket, &key)?;
        vec![key]
    };

    output_result(
        "Upload finished",
        &UploadResult {
            bucket: args.bucket,
            keys,
        },
        cli_args,
    )
}

/// Download an object.
fn download(args: DownloadArgs, cli_args: &WordFreqArgs) -> Result<()> {
    let store = FileBlobStore::new(&args.store.store_dir)?;
    store.get(&args.bucket, &args.key, &args.local_path)?;
    let bytes = fs::metadata(&args.local_path)?.len();

    output_result(
        "Download finished",
        &DownloadResult {
            bucket: args.bucket,
            key: args.key,
            path: args.local_path.to_string_lossy().to_string(),
            bytes,
        },
        cli_args,
    )
}

/// List objects of a bucket.
fn list_objects(args: ListArgs, cli_args: &WordFreqArgs) -> Result<()> {
    let store = FileBlobStore::new(&args.store.store_dir)?;
    let keys = store.list(&args.bucket, &args.prefix)?;

    output_result(
        &format!("Objects in {}", args.bucket),
        &ListResult {
            bucket: args.bucket,
            prefix: args.prefix,
            keys,
        },
        cli_args,
    )
}

/// Delete an object.
fn delete_object(args: DeleteArgs, cli_args: &WordFreqArgs) -> Result<()> {
    let store = FileBlobStore::new(&args.store.store_dir)?;
    store.delete(&args.bucket, &args.key)?;

    output_result(
        "Object deleted",
        &DeleteResult {
            bucket: args.bucket,
            key: args.key,
        },
        cli_args,
    )
}
