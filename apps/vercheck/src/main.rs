//! vercheck - reproducible-build status of F-Droid apps
//!
//! Loads the repository index and the verification ledger, reconciles
//! them through the ops crate and prints one block per matching app.

mod cli;
mod display;
mod error;

use crate::cli::Cli;
use crate::error::CliError;
use clap::Parser;
use std::process;
use tracing::{debug, info};
use vercheck_config::Config;
use vercheck_ops::{CheckRequest, OpsContextBuilder};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    // Run the application and handle errors
    if let Err(e) = run(cli).await {
        debug!("Application error: {e:?}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting vercheck v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. CLI flags only shape the request below

    let ctx = OpsContextBuilder::new().with_config(config).build()?;

    let request = CheckRequest {
        query: cli.query.clone(),
        mode: cli.mode(),
        refresh: cli.refresh,
        try_harder: cli.try_harder,
    };

    let reports = vercheck_ops::check(&ctx, &request).await?;
    debug!(reports = reports.len(), "check complete");

    let stdout = std::io::stdout();
    display::write_reports(&mut stdout.lock(), &reports)?;

    info!("Command completed successfully");
    Ok(())
}

/// Filter used when `RUST_LOG` is unset
///
/// Fatal errors are printed once by `main`; the default filter stays above
/// the level they are logged at.
fn default_filter(debug_enabled: bool) -> &'static str {
    if debug_enabled {
        "debug,hyper=info,hyper_util=info,reqwest=info"
    } else {
        "warn"
    }
}

/// Initialize tracing on stderr
fn init_tracing(debug_enabled: bool) {
    let default_filter = default_filter(debug_enabled);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(debug_enabled)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
