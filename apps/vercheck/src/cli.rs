//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;
use vercheck_types::QueryMode;

/// vercheck - Is this F-Droid app reproducibly built?
#[derive(Parser, Debug)]
#[command(name = "vercheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check F-Droid apps against the reproducible-build verification ledger")]
#[command(long_about = None)]
pub struct Cli {
    /// Package id, or a name fragment with --search
    pub query: String,

    /// Match app names case-insensitively instead of the exact package id
    #[arg(long)]
    pub search: bool,

    /// Discard cached index and ledger snapshots before loading
    #[arg(long)]
    pub refresh: bool,

    /// Inspect the signing certificate when the index is inconclusive
    #[arg(long)]
    pub try_harder: bool,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    #[must_use]
    pub fn mode(&self) -> QueryMode {
        if self.search {
            QueryMode::Search
        } else {
            QueryMode::Exact
        }
    }
}
