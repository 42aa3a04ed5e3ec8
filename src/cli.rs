use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::watch;

use crate::batch::run_batch;
use crate::config::PruneConfig;
use crate::fetch::HttpTransport;
use crate::load_config::load_config;
use crate::repo::GitCli;
use crate::sync::run_loop;

/// CLI for docpile: harvest DocumentCloud PDFs and auto-publish the archive.
#[derive(Parser)]
#[clap(
    name = "docpile",
    version,
    about = "Harvest DocumentCloud PDFs and auto-publish the local archive repository"
)]
pub struct Cli {
    /// Path to an optional YAML config file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Periodically commit and push local changes, forever
    Sync {
        /// Repository to watch (defaults to the current directory)
        #[clap(long)]
        repo_dir: Option<PathBuf>,
        /// Seconds to sleep between cycles
        #[clap(long)]
        interval_secs: Option<u64>,
        /// Push without rebasing onto the remote first
        #[clap(long)]
        no_rebase: bool,
        /// Delete oversized .pdf files from the working tree every cycle
        #[clap(long)]
        prune: bool,
    },
    /// Download the DocumentCloud PDFs listed in the input file
    Fetch {
        /// Newline-delimited list of input URLs
        #[clap(long)]
        input: Option<PathBuf>,
        /// Directory the PDFs are written into
        #[clap(long)]
        output_dir: Option<PathBuf>,
        /// Maximum number of new downloads this run
        #[clap(long)]
        limit: Option<usize>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main().
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sync {
            repo_dir,
            interval_secs,
            no_rebase,
            prune,
        } => {
            let mut sync = config.sync;
            if let Some(repo_dir) = repo_dir {
                sync.repo_dir = repo_dir;
            }
            if let Some(interval_secs) = interval_secs {
                sync.interval_secs = interval_secs;
            }
            if no_rebase {
                sync.rebase = false;
            }
            if prune && sync.prune.is_none() {
                sync.prune = Some(PruneConfig::default());
            }
            sync.trace_loaded();

            let repo = GitCli::new(sync.repo_dir.clone());
            // Held for the lifetime of the loop; dropping the sender would
            // count as a shutdown signal.
            let (_shutdown_tx, shutdown_rx) = watch::channel(false);
            run_loop(&repo, &sync, shutdown_rx).await?;
            Ok(())
        }
        Commands::Fetch {
            input,
            output_dir,
            limit,
        } => {
            let mut fetch = config.fetch;
            if let Some(input) = input {
                fetch.input_file = input;
            }
            if let Some(output_dir) = output_dir {
                fetch.output_dir = output_dir;
            }
            if let Some(limit) = limit {
                fetch.max_downloads = limit;
            }
            fetch.trace_loaded();

            let transport = HttpTransport::new();
            println!("Fetch starting...");
            let report = run_batch(&fetch, &transport).await;
            println!("Fetch complete.\nReport:");
            println!("{:#?}", report);
            Ok(())
        }
    }
}
