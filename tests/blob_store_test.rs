use std::fs;

use tempfile::tempdir;

use wordfreq::error::ErrorKind;
use wordfreq::frequency::{ExportFormat, TableExporter};
use wordfreq::pipeline::{Pipeline, PipelineConfig};
use wordfreq::storage::{ArchiveOutcome, BlobStoreConfig, BlobStoreFactory, archive, archive_all};

#[test]
fn test_file_store_lifecycle() {
    let dir = tempdir().unwrap();
    let config = BlobStoreConfig::File {
        root: dir.path().join("blobs"),
    };
    let store = BlobStoreFactory::create(config).unwrap();

    let local = dir.path().join("alice.txt");
    fs::write(&local, "Alice was beginning to get very tired").unwrap();

    store.put(&local, "gutenberg", "raw/alice.txt").unwrap();
    assert_eq!(store.list("gutenberg", "raw/").unwrap(), vec!["raw/alice.txt"]);

    let copy = dir.path().join("download/alice.txt");
    store.get("gutenberg", "raw/alice.txt", &copy).unwrap();
    assert_eq!(
        fs::read_to_string(&copy).unwrap(),
        "Alice was beginning to get very tired"
    );

    store.delete("gutenberg", "raw/alice.txt").unwrap();
    assert!(store.list("gutenberg", "").unwrap().is_empty());

    let err = store
        .get("gutenberg", "raw/alice.txt", &copy)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_put_all_filters_by_suffix() {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("processed");
    fs::create_dir_all(folder.join("nested")).unwrap();
    fs::write(folder.join("crime.csv"), "lemma,frequency\n").unwrap();
    fs::write(folder.join("alice.csv"), "lemma,frequency\n").unwrap();
    fs::write(folder.join("notes.md"), "skip").unwrap();
    fs::write(folder.join("nested/deep.csv"), "skip").unwrap();

    let store = BlobStoreFactory::create(BlobStoreConfig::File {
        root: dir.path().join("blobs"),
    })
    .unwrap();
    let keys = store.put_all(&folder, "gutenberg", "tables", ".csv").unwrap();

    assert_eq!(keys, vec!["tables/alice.csv", "tables/crime.csv"]);
    assert_eq!(store.list("gutenberg", "tables/").unwrap(), keys);
}

#[test]
fn test_put_missing_local_file() {
    let store = BlobStoreFactory::create(BlobStoreConfig::Memory).unwrap();

    let dir = tempdir().unwrap();
    let err = store
        .put(&dir.path().join("absent.txt"), "gutenberg", "absent.txt")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_archive_after_run() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("crime.txt");
    let output = dir.path().join("out/crime.csv");
    fs::write(&input, "The mice ran; the mouse runs.").unwrap();

    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let exporter = TableExporter::new(ExportFormat::Csv);
    let table = pipeline.run_to_path(&input, &output, &exporter).unwrap();
    assert_eq!(table.pairs(), vec![("mouse", 2), ("run", 2)]);

    let store = BlobStoreFactory::create(BlobStoreConfig::Memory).unwrap();
    let raw = archive(store.as_ref(), &input, "gutenberg", "raw/crime.txt");
    let processed = archive_all(
        store.as_ref(),
        output.parent().unwrap(),
        "gutenberg",
        "processed",
        ".csv",
    );

    assert!(raw.is_uploaded());
    assert_eq!(
        processed,
        ArchiveOutcome::Uploaded(vec!["processed/crime.csv".to_string()])
    );
    assert_eq!(
        store.get_bytes("gutenberg", "processed/crime.csv").unwrap(),
        b"lemma,frequency\nmouse,2\nrun,2\n"
    );
}

#[test]
fn test_archive_failure_keeps_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("crime.txt");
    fs::write(&input, "The mice ran").unwrap();

    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let table = pipeline.run(&input).unwrap();

    // A bucket name the store rejects stands in for an unreachable backend.
    let store = BlobStoreFactory::create(BlobStoreConfig::Memory).unwrap();
    let outcome = archive(store.as_ref(), &input, "", "raw/crime.txt");

    match outcome {
        ArchiveOutcome::Failed(msg) => assert!(msg.starts_with("Upload failure:")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(table.pairs(), vec![("mouse", 1), ("run", 1)]);
}
