use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aur_autoupdater::config::Config;
use aur_autoupdater::package::DEFAULT_PACKAGES;
use aur_autoupdater::updater::{UpdateOutcome, Updater};

#[derive(Parser)]
#[command(name = "aur-autoupdater")]
#[command(version, about = "Updates AUR packages to their latest upstream release")]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run())
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let updater = Updater::from_config(&config).context("failed to create HTTP clients")?;

    let outcomes = updater
        .run_all(DEFAULT_PACKAGES)
        .await
        .context("update aborted")?;

    for (name, outcome) in outcomes {
        match outcome {
            UpdateOutcome::UpToDate { version } => info!("{}: up to date at {}", name, version),
            UpdateOutcome::Published { version, commit } => {
                info!("{}: published {} as {}", name, version, commit)
            }
        }
    }

    Ok(())
}
