pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::rate_store::RateStore;
use crate::providers::{ExchangeRateHostProvider, OpenErApiProvider};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Rate { reverse: bool },
    Convert { amount: String, reverse: bool },
    Interactive { reverse: bool },
}

/// Wires the configured rate sources into a store.
pub fn build_store(config: &AppConfig, reverse: bool) -> Result<RateStore> {
    let timeout = config.timeout_secs.map(Duration::from_secs);
    let primary = OpenErApiProvider::new(&config.providers.primary.base_url, timeout)
        .context("Failed to create primary rate client")?;
    let backup = ExchangeRateHostProvider::new(&config.providers.backup.base_url, timeout)
        .context("Failed to create backup rate client")?;

    let direction = if reverse {
        config.direction.toggled()
    } else {
        config.direction
    };
    Ok(RateStore::new(Arc::new(primary), Arc::new(backup), direction))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("yenconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Rate { reverse } => {
            let store = build_store(&config, reverse)?;
            let direction = store.snapshot().await.direction;
            cli::rate::run(&store, direction).await
        }
        AppCommand::Convert { amount, reverse } => {
            let store = build_store(&config, reverse)?;
            let direction = store.snapshot().await.direction;
            cli::convert::run(&store, direction, &amount).await
        }
        AppCommand::Interactive { reverse } => {
            cli::interactive::run(build_store(&config, reverse)?).await
        }
    }
}
