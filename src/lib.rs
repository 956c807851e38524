pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{API_KEY_ENV, AppConfig};
use crate::providers::AlphaVantageProvider;
use anyhow::Result;
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Quote {
        symbol: String,
        json: bool,
    },
    History {
        symbol: String,
        range: Option<String>,
        json: bool,
    },
}

/// The command-line range wins; otherwise `history.default_range` from the config.
pub fn history_range(requested: Option<String>, config: &AppConfig) -> Option<String> {
    requested.or_else(|| config.history.default_range.clone())
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("stockview starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = %config.providers.alpha_vantage.base_url,
        timeout_secs = config.timeout_secs(),
        "Loaded config"
    );

    let api_key = config.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;
    let provider = Arc::new(AlphaVantageProvider::from_config(&config, api_key)?);

    match command {
        AppCommand::Quote { symbol, json } => cli::quote::run(provider, &symbol, json),
        AppCommand::History {
            symbol,
            range,
            json,
        } => {
            let range = history_range(range, &config);
            cli::history::run(
                provider,
                &symbol,
                range.as_deref(),
                Local::now().date_naive(),
                json,
            )
        }
    }
}
