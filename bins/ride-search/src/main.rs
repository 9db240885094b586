//! ride-search: search and rank shared-ride offers from a pool snapshot.

use clap::{Parser, Subcommand};
use rideshare_cli::output::Status;
use rideshare_core::config::Config;
use rideshare_core::Error;
use rideshare_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod checks;
mod commands;
mod pool;

use commands::{search, validate};

/// Search shared-ride offers between two places
#[derive(Parser)]
#[command(name = "ride-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the pool and print matching rides
    Search(search::SearchArgs),

    /// Check pool records for missing or invalid data
    Validate {
        /// Pool snapshot (JSON array of ride offers)
        #[arg(short, long)]
        pool: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&e, json),
    };

    let telemetry = TelemetryConfig::new(
        config.schema.telemetry.log_level.clone(),
        config.schema.telemetry.json,
    )
    .verbose(cli.verbose);
    if let Err(e) = rideshare_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }

    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let result = match cli.command {
        Commands::Search(args) => search::run(args, &config.schema, json).await,
        Commands::Validate { pool } => validate::run(pool.as_deref(), &config.schema, json).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, json),
    }
}

/// Print `err` on stderr, as an error report when JSON output is requested.
fn report(err: &Error, json: bool) -> ExitCode {
    let rendered = if json {
        serde_json::to_string_pretty(&err.to_report()).ok()
    } else {
        None
    };

    match rendered {
        Some(report) => eprintln!("{}", report),
        None => Status::error(&err.to_string()),
    }

    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}
