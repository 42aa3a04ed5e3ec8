use docpile::load_config::load_config;
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn no_path_yields_builtin_defaults() {
    let config = load_config(None).expect("defaults always load");
    assert_eq!(config.sync.interval_secs, 15);
    assert!(config.sync.rebase);
    assert_eq!(config.fetch.max_downloads, 5000);
}

#[test]
fn full_config_file_parses() {
    let file = NamedTempFile::new().expect("create temp config file");
    write(
        file.path(),
        b"sync:\n  repo_dir: /srv/archive\n  interval_secs: 60\n  rebase: false\n  prune:\n    extension: .pdf\n    threshold_bytes: 1048576\nfetch:\n  input_file: urls.txt\n  output_dir: out\n  max_downloads: 10\n",
    )
    .expect("write config");

    let config = load_config(Some(file.path())).expect("config should parse");

    assert_eq!(config.sync.repo_dir, PathBuf::from("/srv/archive"));
    assert_eq!(config.sync.interval_secs, 60);
    assert!(!config.sync.rebase);
    let prune = config.sync.prune.expect("prune section present");
    assert_eq!(prune.threshold_bytes, 1_048_576);
    assert_eq!(config.fetch.input_file, PathBuf::from("urls.txt"));
    assert_eq!(config.fetch.max_downloads, 10);
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let file = NamedTempFile::new().expect("create temp config file");
    write(file.path(), b"sync:\n  interval_secs: 5\n").expect("write config");

    let config = load_config(Some(file.path())).expect("config should parse");

    assert_eq!(config.sync.interval_secs, 5);
    assert!(config.sync.rebase, "unset fields keep their defaults");
    assert!(config.sync.prune.is_none());
    assert_eq!(config.fetch.max_downloads, 5000);
}

#[test]
fn empty_prune_section_enables_prune_defaults() {
    let file = NamedTempFile::new().expect("create temp config file");
    write(file.path(), b"sync:\n  prune: {}\n").expect("write config");

    let config = load_config(Some(file.path())).expect("config should parse");

    let prune = config.sync.prune.expect("prune enabled");
    assert_eq!(prune.extension, ".pdf");
    assert_eq!(prune.threshold_bytes, 100 * 1024 * 1024);
}

#[test]
fn missing_file_is_an_error() {
    let result = load_config(Some(std::path::Path::new("/definitely/not/here.yaml")));
    assert!(result.is_err());
}

#[test]
fn invalid_yaml_is_an_error() {
    let file = NamedTempFile::new().expect("create temp config file");
    write(file.path(), b"sync: [this is not a mapping\n").expect("write config");

    let result = load_config(Some(file.path()));
    assert!(result.is_err());
}
