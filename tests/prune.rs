// Pruner behavior: the size threshold is inclusive, non-matching files are
// left alone, and only an unwalkable root is fatal.

use docpile::config::PruneConfig;
use docpile::prune::prune_large_files;
use std::path::Path;
use tempfile::tempdir;

const THRESHOLD: u64 = 4096;

fn small_prune_config() -> PruneConfig {
    PruneConfig {
        extension: ".pdf".to_string(),
        threshold_bytes: THRESHOLD,
    }
}

fn write_bytes(path: &Path, len: u64) {
    std::fs::write(path, vec![0u8; len as usize]).expect("write test file");
}

#[test]
fn file_at_threshold_is_deleted_and_one_byte_under_is_kept() {
    let root = tempdir().expect("create temp dir");
    let at = root.path().join("at_threshold.pdf");
    let under = root.path().join("one_under.pdf");
    write_bytes(&at, THRESHOLD);
    write_bytes(&under, THRESHOLD - 1);

    let report = prune_large_files(root.path(), &small_prune_config()).expect("prune succeeds");

    assert!(!at.exists(), "file at the threshold must be deleted");
    assert!(under.exists(), "file one byte under must be kept");
    assert_eq!(report.removed, vec![at]);
}

#[test]
fn non_matching_extension_is_never_deleted() {
    let root = tempdir().expect("create temp dir");
    let big_txt = root.path().join("huge.txt");
    write_bytes(&big_txt, THRESHOLD * 2);

    let report = prune_large_files(root.path(), &small_prune_config()).expect("prune succeeds");

    assert!(big_txt.exists());
    assert!(report.removed.is_empty());
}

#[test]
fn prune_recurses_into_subdirectories() {
    let root = tempdir().expect("create temp dir");
    let nested = root.path().join("a").join("b");
    std::fs::create_dir_all(&nested).expect("create nested dirs");
    let deep = nested.join("deep.pdf");
    write_bytes(&deep, THRESHOLD);

    let report = prune_large_files(root.path(), &small_prune_config()).expect("prune succeeds");

    assert!(!deep.exists(), "nested oversized file must be deleted");
    assert_eq!(report.removed, vec![deep]);
}

#[test]
fn extension_match_is_case_insensitive() {
    let root = tempdir().expect("create temp dir");
    let upper = root.path().join("SHOUTY.PDF");
    write_bytes(&upper, THRESHOLD);

    prune_large_files(root.path(), &small_prune_config()).expect("prune succeeds");

    assert!(!upper.exists());
}

#[test]
fn missing_root_is_the_only_fatal_error() {
    let root = tempdir().expect("create temp dir");
    let gone = root.path().join("never_created");

    let result = prune_large_files(&gone, &small_prune_config());

    assert!(result.is_err(), "unwalkable root must be an error");
}

#[test]
fn empty_root_prunes_nothing() {
    let root = tempdir().expect("create temp dir");
    let report = prune_large_files(root.path(), &small_prune_config()).expect("prune succeeds");
    assert!(report.removed.is_empty());
}
