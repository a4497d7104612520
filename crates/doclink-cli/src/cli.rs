//! doclink - connect and manage named document database connections

mod logging;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use doclink_connection::{ConnectionRegistry, ConnectionSettings};
use doclink_driver_mongodb::MongoDbConnector;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "doclink", version, about = "Connect and manage named MongoDB connections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect every configured connection, report, then close them all
    Connect {
        /// Path to the TOML settings file
        #[arg(env = "DOCLINK_SETTINGS")]
        settings: PathBuf,

        /// Keep connections open this many seconds before closing them
        #[arg(long, default_value_t = 0)]
        keep_open_secs: u64,
    },
    /// Validate a settings file and print the effective options per connection
    Check {
        /// Path to the TOML settings file
        #[arg(env = "DOCLINK_SETTINGS")]
        settings: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Connect {
            settings,
            keep_open_secs,
        } => connect(settings, Duration::from_secs(keep_open_secs)).await,
        Command::Check { settings } => check(settings).await,
    }
}

async fn load(path: &Path) -> anyhow::Result<ConnectionSettings> {
    let settings = ConnectionSettings::load(path)
        .await
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    logging::init(&settings.logging)?;
    Ok(settings)
}

fn new_registry() -> ConnectionRegistry {
    ConnectionRegistry::new(MongoDbConnector::new())
}

async fn connect(path: PathBuf, keep_open: Duration) -> anyhow::Result<ExitCode> {
    let settings = load(&path).await?;
    let registry = new_registry();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, abandoning remaining connection attempts");
            on_interrupt.cancel();
        }
    });

    let results = registry
        .connect_all_with_cancel(&settings.connections, &cancel)
        .await;
    println!("{}", report::connect_results(&results));

    if !keep_open.is_zero() && !registry.is_empty() && !cancel.is_cancelled() {
        tracing::info!(seconds = keep_open.as_secs(), "keeping connections open");
        tokio::select! {
            _ = tokio::time::sleep(keep_open) => {}
            _ = cancel.cancelled() => {}
        }
    }

    let closed = registry.close_all().await;
    tracing::info!(closed, "all connections closed");

    let failed = results.values().any(|result| result.is_err());
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn check(path: PathBuf) -> anyhow::Result<ExitCode> {
    let settings = load(&path).await?;
    let registry = new_registry();
    println!(
        "{}",
        report::effective_settings(&settings, registry.pool_defaults())
    );
    Ok(ExitCode::SUCCESS)
}
