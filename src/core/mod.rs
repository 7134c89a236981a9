//! Core business logic abstractions

pub mod config;
pub mod dates;
pub mod extract;
pub mod fetch;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use dates::{DateKey, date_range, generate};
pub use extract::extract_rates;
pub use fetch::fetch_report;
pub use rates::{
    Currency, DailyRates, ExchangeRateProvider, ExchangeRateReport, ExchangeRateSnapshot,
    RateEntry,
};
