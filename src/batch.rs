//! Batch driver: read input URLs, resolve them, and fetch up to the cap.

use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::FetchConfig;
use crate::fetch::{download_pdf, FetchOutcome, Transport};
use crate::resolve::resolve_document_url;

/// Counts per run. Only newly created artifacts count against the cap.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub downloaded: usize,
    pub skipped_existing: usize,
    pub unrecognized: usize,
    pub failed: usize,
}

/// Process the input file in order: resolve each URL, fetch what is missing,
/// and stop once `max_downloads` new artifacts were created.
///
/// Every per-entry failure is logged and skipped; the batch itself never
/// fails. A missing or unreadable input file behaves as an empty list.
pub async fn run_batch(config: &FetchConfig, transport: &dyn Transport) -> BatchReport {
    let urls = read_input_lines(&config.input_file);
    info!(
        input_file = %config.input_file.display(),
        count = urls.len(),
        "Read input URL list"
    );

    let mut report = BatchReport::default();
    for raw in &urls {
        if report.downloaded >= config.max_downloads {
            info!(
                limit = config.max_downloads,
                "Reached maximum download limit, stopping"
            );
            break;
        }

        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let Some(final_url) = resolve_document_url(raw) else {
            warn!(url = %raw, "Invalid or unrecognized DocumentCloud URL");
            report.unrecognized += 1;
            continue;
        };

        match download_pdf(transport, &final_url, &config.output_dir).await {
            Ok(FetchOutcome::Downloaded(_)) => report.downloaded += 1,
            Ok(FetchOutcome::AlreadyExists(path)) => {
                info!(path = %path.display(), "File already exists, not counting as a download");
                report.skipped_existing += 1;
            }
            Err(e) => {
                // Failed fetches never consume the cap; only newly created
                // artifacts count.
                error!(error = ?e, url = %final_url, "Download failed");
                report.failed += 1;
            }
        }
    }

    info!(?report, "Batch complete");
    report
}

fn read_input_lines(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) => {
            error!(error = ?e, path = %path.display(), "Failed to read input file, treating as empty");
            Vec::new()
        }
    }
}
