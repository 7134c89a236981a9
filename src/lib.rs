pub mod cli;
pub mod core;
pub mod providers;

use crate::core::ExchangeRateReport;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

/// Days fetched when none are requested.
pub const DEFAULT_DAYS: u32 = 2;
/// Upper bound on the number of days per run.
pub const MAX_DAYS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Rejects day counts above [`MAX_DAYS`]. Must pass before any request is made.
pub fn validate_days(days: u32) -> Result<()> {
    if days > MAX_DAYS {
        anyhow::bail!("You can fetch exchange rates for up to {MAX_DAYS} days only");
    }
    Ok(())
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Fetches the rates for the `days` days before today, most recent first.
pub async fn fetch_rates(days: u32, config: &AppConfig) -> Result<ExchangeRateReport> {
    validate_days(days)?;
    let dates = crate::core::generate(days);
    providers::privatbank::fetch(&config.provider, &dates, &|| ()).await
}

pub async fn run(days: u32, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
    validate_days(days)?;
    info!(days, "PrivatBank rates starting...");

    let config = load_config(config_path)?;
    let dates = crate::core::generate(days);

    match format {
        OutputFormat::Table => {
            let report = cli::report::fetch_with_progress(&config.provider, &dates).await?;
            cli::report::print_table(&report);
        }
        OutputFormat::Json => {
            let report = providers::privatbank::fetch(&config.provider, &dates, &|| ()).await?;
            cli::report::print_json(&report)?;
        }
    }

    Ok(())
}
