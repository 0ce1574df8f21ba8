//! `denea-sync` -- command-line entry point for the Cromos <-> Denea sync.
//!
//! One-shot imports from CSV/XML exports or the Denea API, plus a
//! `schedule` mode that repeats the API sync on a fixed interval until
//! interrupted. Exit code 0 on a completed run (including partial runs
//! with item errors); nonzero on an uncaught failure.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cromos_denea::{DeneaClient, DeneaConfig};
use cromos_store::{StoreClient, StoreConfig};
use cromos_sync::{run_scheduled, SyncEngine, DEFAULT_SYNC_INTERVAL};

#[derive(Debug, Parser)]
#[command(
    name = "denea-sync",
    version,
    about = "Synchronize inventory and prices from the Denea ERP into the Cromos storefront"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import a Denea CSV export file.
    Csv {
        /// Path to the CSV file.
        file: PathBuf,
    },
    /// Import a Denea XML export file.
    Xml {
        /// Path to the XML file.
        file: PathBuf,
    },
    /// Run one sync against the Denea API.
    Api,
    /// Run the API sync on a fixed interval until interrupted.
    Schedule {
        /// Seconds between runs (default: `SYNC_INTERVAL_SECS` or 300).
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "denea_sync=info,cromos_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let engine = SyncEngine::new(
        StoreClient::new(StoreConfig::from_env()),
        DeneaClient::new(DeneaConfig::from_env()),
    );

    let result = match cli.command {
        Command::Csv { file } => engine.import_csv_file(&file).await.map(Some),
        Command::Xml { file } => engine.import_xml_file(&file).await.map(Some),
        Command::Api => engine.sync_from_api().await.map(Some),
        Command::Schedule { interval_secs } => {
            let period = interval_secs
                .map(Duration::from_secs)
                .unwrap_or_else(sync_interval_from_env);
            schedule(&engine, period).await;
            Ok(None)
        }
    };

    match result {
        Ok(Some(report)) => {
            println!("{}", report.summary);
            for item in &report.errors {
                eprintln!("  {}: {}", item.sku, item.error);
            }
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Sync failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run the scheduler until Ctrl-C.
async fn schedule(engine: &SyncEngine<StoreClient>, period: Duration) {
    let cancel = CancellationToken::new();

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C, stopping scheduled sync");
            signal_cancel.cancel();
        }
    });

    run_scheduled(engine, period, cancel).await;
}

/// Interval from `SYNC_INTERVAL_SECS`, falling back to the 5-minute
/// default.
fn sync_interval_from_env() -> Duration {
    std::env::var("SYNC_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_SYNC_INTERVAL)
}
