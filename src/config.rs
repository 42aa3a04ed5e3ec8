use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Seconds slept between auto-sync cycles.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 15;
/// Files at or above this size are deleted when pruning is enabled.
pub const DEFAULT_PRUNE_THRESHOLD_BYTES: u64 = 100 * 1024 * 1024;
/// Extension of files considered by the pruner.
pub const DEFAULT_PRUNE_EXTENSION: &str = ".pdf";
/// Newline-delimited list of DocumentCloud URLs to fetch.
pub const DEFAULT_INPUT_FILE: &str = "extracted_urls.txt";
/// Directory the fetched PDFs are written into.
pub const DEFAULT_OUTPUT_DIR: &str = "pdfs";
/// Maximum number of new downloads per fetch run.
pub const DEFAULT_MAX_DOWNLOADS: usize = 5000;

/// Top-level configuration: one section per subcommand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Config {
    pub fn trace_loaded(&self) {
        self.sync.trace_loaded();
        self.fetch.trace_loaded();
        debug!(?self, "Config loaded (full debug)");
    }
}

/// Settings for the auto-sync loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_repo_dir")]
    pub repo_dir: PathBuf,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Rebase onto the remote before pushing.
    #[serde(default = "default_rebase")]
    pub rebase: bool,
    /// When present, oversized files are deleted every cycle.
    #[serde(default)]
    pub prune: Option<PruneConfig>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            repo_dir: default_repo_dir(),
            interval_secs: default_interval_secs(),
            rebase: default_rebase(),
            prune: None,
        }
    }
}

impl SyncConfig {
    pub fn trace_loaded(&self) {
        info!(
            repo_dir = %self.repo_dir.display(),
            interval_secs = self.interval_secs,
            rebase = self.rebase,
            prune = self.prune.is_some(),
            "Loaded sync config"
        );
    }
}

/// Settings for the large-file pruner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruneConfig {
    #[serde(default = "default_prune_extension")]
    pub extension: String,
    #[serde(default = "default_prune_threshold")]
    pub threshold_bytes: u64,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            extension: default_prune_extension(),
            threshold_bytes: default_prune_threshold(),
        }
    }
}

/// Settings for the batch downloader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_max_downloads")]
    pub max_downloads: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            input_file: default_input_file(),
            output_dir: default_output_dir(),
            max_downloads: default_max_downloads(),
        }
    }
}

impl FetchConfig {
    pub fn trace_loaded(&self) {
        info!(
            input_file = %self.input_file.display(),
            output_dir = %self.output_dir.display(),
            max_downloads = self.max_downloads,
            "Loaded fetch config"
        );
    }
}

fn default_repo_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_interval_secs() -> u64 {
    DEFAULT_SYNC_INTERVAL_SECS
}

fn default_rebase() -> bool {
    true
}

fn default_prune_extension() -> String {
    DEFAULT_PRUNE_EXTENSION.to_string()
}

fn default_prune_threshold() -> u64 {
    DEFAULT_PRUNE_THRESHOLD_BYTES
}

fn default_input_file() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_FILE)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_max_downloads() -> usize {
    DEFAULT_MAX_DOWNLOADS
}
