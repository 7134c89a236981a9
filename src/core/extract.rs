use crate::core::rates::{Currency, ExchangeRateSnapshot, RateEntry};
use serde_json::Value;

/// Field holding the list of rate records in an archive response.
pub const RATE_LIST_FIELD: &str = "exchangeRate";

/// Picks the EUR and USD records out of an archive response.
///
/// The payload is loosely structured, so every lookup is optional: a missing or
/// non-array list yields an empty snapshot, records without a string `currency`
/// are skipped, and missing or non-numeric rates become `None`.
pub fn extract_rates(payload: &Value) -> ExchangeRateSnapshot {
    let mut snapshot = ExchangeRateSnapshot::new();

    let Some(records) = payload.get(RATE_LIST_FIELD).and_then(Value::as_array) else {
        return snapshot;
    };

    for record in records {
        let Some(currency) = record
            .get("currency")
            .and_then(Value::as_str)
            .and_then(|code| code.parse::<Currency>().ok())
        else {
            continue;
        };

        snapshot.insert(
            currency,
            RateEntry {
                sale: record.get("saleRate").and_then(Value::as_f64),
                purchase: record.get("purchaseRate").and_then(Value::as_f64),
            },
        );
    }

    snapshot
}
