use crate::core::dates::DateKey;
use crate::core::rates::{DailyRates, ExchangeRateProvider, ExchangeRateReport, ExchangeRateSnapshot};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

/// Fetches a snapshot for every date and assembles the report in input order.
///
/// Up to `concurrency` requests are in flight at once. A failed date never aborts
/// the report: it is logged and recorded with an empty snapshot, so the report
/// always has one entry per date. `update_callback` runs once per finished date.
pub async fn fetch_report(
    provider: &(dyn ExchangeRateProvider + Send + Sync),
    dates: &[DateKey],
    concurrency: usize,
    update_callback: &(dyn Fn() + Sync),
) -> ExchangeRateReport {
    debug!(days = dates.len(), concurrency, "Fetching exchange rate report");

    stream::iter(dates)
        .map(|date| async move {
            let rates = match provider.fetch_snapshot(date).await {
                Ok(rates) => rates,
                Err(e) => {
                    warn!(date = %date, error = %e, "Failed to fetch rates, leaving date empty");
                    ExchangeRateSnapshot::new()
                }
            };
            update_callback();
            DailyRates {
                date: date.clone(),
                rates,
            }
        })
        // `buffered` yields in input order regardless of completion order
        .buffered(concurrency.max(1))
        .collect()
        .await
}
