//! The auto-sync loop: commit and push local changes on a fixed interval,
//! optionally rebasing first and pruning oversized files every cycle.

use chrono::Utc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

use crate::config::SyncConfig;
use crate::prune::prune_large_files;
use crate::repo::{has_changes, Repository};

/// One scheduler tick: commit-and-push, then prune if enabled.
///
/// Git failures abort the rest of the commit-and-push sequence and are
/// logged; they never propagate across ticks. The only fatal error is an
/// unwalkable repository root during pruning.
pub async fn run_cycle(repo: &dyn Repository, config: &SyncConfig) -> std::io::Result<()> {
    commit_and_push(repo, config).await;

    if let Some(prune) = &config.prune {
        let report = prune_large_files(&config.repo_dir, prune)?;
        if !report.removed.is_empty() {
            info!(removed = report.removed.len(), "Pruned oversized files");
        }
    }
    Ok(())
}

async fn commit_and_push(repo: &dyn Repository, config: &SyncConfig) {
    let status = match repo.status_porcelain().await {
        Ok(status) => status,
        Err(e) => {
            error!(error = ?e, "Failed to query git status");
            return;
        }
    };

    if !has_changes(&status) {
        info!("No changes detected");
        return;
    }
    info!(
        files = status.trim().lines().count(),
        "Detected modified or untracked files"
    );

    if let Err(e) = repo.stage_all().await {
        error!(error = ?e, "git add failed");
        return;
    }

    let message = format!("Auto-update: {}", Utc::now().to_rfc3339());
    if let Err(e) = repo.commit(&message).await {
        error!(error = ?e, "git commit failed");
        return;
    }

    if config.rebase {
        if let Err(e) = repo.pull_rebase().await {
            error!(error = ?e, "git pull --rebase failed");
            return;
        }
    }

    if let Err(e) = repo.push().await {
        error!(error = ?e, "git push failed");
        return;
    }

    info!("Changes committed and pushed");
}

/// Run [`run_cycle`] forever with a fixed sleep between ticks, until the
/// shutdown signal fires. A dropped sender counts as shutdown.
pub async fn run_loop(
    repo: &dyn Repository,
    config: &SyncConfig,
    mut shutdown: watch::Receiver<bool>,
) -> std::io::Result<()> {
    loop {
        run_cycle(repo, config).await?;

        info!(seconds = config.interval_secs, "Waiting for next cycle");
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(config.interval_secs)) => {}
            _ = shutdown.changed() => {
                info!("Shutdown signal received, stopping sync loop");
                return Ok(());
            }
        }
    }
}
