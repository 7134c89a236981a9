use crate::core::config::ProviderConfig;
use crate::core::{
    DateKey, ExchangeRateProvider, ExchangeRateReport, ExchangeRateSnapshot, extract_rates,
    fetch_report,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Parses an archive response body, treating anything that is not a JSON object as empty.
fn parse_snapshot(body: &str) -> ExchangeRateSnapshot {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) if payload.is_object() => extract_rates(&payload),
        Ok(_) => {
            warn!(response = %body, "Rates response is not a JSON object");
            ExchangeRateSnapshot::new()
        }
        Err(e) => {
            warn!(error = ?e, response = %body, "Failed to parse rates response");
            ExchangeRateSnapshot::new()
        }
    }
}

/// Client for the PrivatBank exchange rate archive.
///
/// All requests made through one provider share its connection pool; the
/// connections are closed when the provider is dropped.
pub struct PrivatBankProvider {
    base_url: String,
    client: reqwest::Client,
}

impl PrivatBankProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pbrates/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(PrivatBankProvider {
            base_url: base_url.to_string(),
            client,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// `<base_url>?json=&date=DD.MM.YYYY`; an empty `json` value selects JSON output.
    fn request_url(&self, date: &DateKey) -> Result<Url> {
        Url::parse_with_params(&self.base_url, &[("json", ""), ("date", date.as_str())])
            .with_context(|| format!("Invalid base URL: {}", self.base_url))
    }
}

#[async_trait]
impl ExchangeRateProvider for PrivatBankProvider {
    #[instrument(
        name = "PrivatBankRatesFetch",
        skip(self),
        fields(date = %date)
    )]
    async fn fetch_snapshot(&self, date: &DateKey) -> Result<ExchangeRateSnapshot> {
        let url = self.request_url(date)?;
        debug!("Requesting rates from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request error for date: {date} URL: {url}"))?
            .error_for_status()
            .with_context(|| format!("Unexpected response status for date: {date}"))?;

        let response_text = response
            .text()
            .await
            .context("Failed to get response text")?;

        let snapshot = parse_snapshot(&response_text);
        debug!(currencies = snapshot.len(), "Extracted rates");
        Ok(snapshot)
    }
}

/// Fetches the report for `dates` with a client that lives only for this call.
pub async fn fetch(
    config: &ProviderConfig,
    dates: &[DateKey],
    update_callback: &(dyn Fn() + Sync),
) -> Result<ExchangeRateReport> {
    let provider = PrivatBankProvider::from_config(config)?;
    let report = fetch_report(&provider, dates, config.concurrency, update_callback).await;
    Ok(report)
}
