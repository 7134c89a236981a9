//! Exchange rate abstractions and core types

use crate::core::dates::DateKey;
use anyhow::Result;
use async_trait::async_trait;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Currencies kept in a snapshot. Anything else reported upstream is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Eur, Currency::Usd];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    /// Matches the exact upstream code; `eur` is not `EUR`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            _ => Err(anyhow::anyhow!("Unsupported currency: {}", s)),
        }
    }
}

/// Sale and purchase rate of one currency on one date.
///
/// `None` means the field was absent upstream; it is serialized as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RateEntry {
    pub sale: Option<f64>,
    pub purchase: Option<f64>,
}

/// Rates found for a single date, keyed by currency.
pub type ExchangeRateSnapshot = BTreeMap<Currency, RateEntry>;

/// One report entry: a date and the rates found for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRates {
    pub date: DateKey,
    pub rates: ExchangeRateSnapshot,
}

/// Serialized as a single-key object, `{"01.01.2024": {"EUR": {...}}}`.
impl Serialize for DailyRates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.rates)?;
        map.end()
    }
}

/// Report entries in the order the dates were requested.
pub type ExchangeRateReport = Vec<DailyRates>;

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn fetch_snapshot(&self, date: &DateKey) -> Result<ExchangeRateSnapshot>;
}
