//! docpile: two single-purpose utilities behind one CLI.
//!
//! `sync` watches a git repository and periodically commits and pushes local
//! changes, optionally rebasing first and pruning oversized files. `fetch`
//! rewrites DocumentCloud viewer URLs into direct S3 asset URLs and downloads
//! them to disk under a session cap. The two commands share no runtime state.

pub mod batch;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod load_config;
pub mod prune;
pub mod repo;
pub mod resolve;
pub mod sync;
