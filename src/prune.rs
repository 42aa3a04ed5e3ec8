//! Deletes oversized files from the working tree.
//!
//! Runs every sync cycle when enabled. Per-entry errors are skipped; only a
//! failure to read the root directory is fatal.

use crate::config::PruneConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// What a prune pass removed.
#[derive(Debug, Default)]
pub struct PruneReport {
    pub removed: Vec<PathBuf>,
}

/// Walk `root` recursively and delete every regular file whose extension
/// matches the config and whose size is at or above the threshold.
///
/// Deletion is immediate and irreversible. Unreadable subdirectories and
/// unstattable entries are skipped; a deletion failure is logged and the
/// walk continues.
pub fn prune_large_files(root: &Path, config: &PruneConfig) -> std::io::Result<PruneReport> {
    let mut report = PruneReport::default();
    // The root directory must be walkable; everything below is best-effort.
    for entry in fs::read_dir(root)?.flatten() {
        visit(&entry.path(), config, &mut report);
    }
    info!(
        root = %root.display(),
        removed = report.removed.len(),
        "Prune pass complete"
    );
    Ok(report)
}

fn visit(path: &Path, config: &PruneConfig, report: &mut PruneReport) {
    if path.is_dir() {
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(error = ?e, path = %path.display(), "Skipping unreadable directory");
                return;
            }
        };
        for entry in entries.flatten() {
            visit(&entry.path(), config, report);
        }
        return;
    }

    if !matches_extension(path, &config.extension) {
        return;
    }
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            debug!(error = ?e, path = %path.display(), "Skipping unstattable entry");
            return;
        }
    };
    if !meta.is_file() || meta.len() < config.threshold_bytes {
        return;
    }

    info!(path = %path.display(), size = meta.len(), "Removing oversized file");
    match fs::remove_file(path) {
        Ok(()) => report.removed.push(path.to_path_buf()),
        Err(e) => error!(error = ?e, path = %path.display(), "Failed to remove file"),
    }
}

fn matches_extension(path: &Path, wanted: &str) -> bool {
    let wanted = wanted.trim_start_matches('.');
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case_and_leading_dot() {
        assert!(matches_extension(Path::new("a/b/doc.PDF"), ".pdf"));
        assert!(matches_extension(Path::new("doc.pdf"), "pdf"));
        assert!(!matches_extension(Path::new("doc.txt"), ".pdf"));
        assert!(!matches_extension(Path::new("pdf"), ".pdf"));
    }
}
