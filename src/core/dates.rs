//! Date keys and the range of past days to query

use chrono::{Days, Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Date format understood by the archive API, e.g. `01.12.2024`.
pub const DATE_KEY_FORMAT: &str = "%d.%m.%Y";

/// A calendar date rendered as `DD.MM.YYYY`.
///
/// Used both as the `date` query parameter and as the key of a report entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    date: NaiveDate,
    key: String,
}

impl DateKey {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey {
            date,
            key: date.format(DATE_KEY_FORMAT).to_string(),
        }
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

/// Returns the `days` dates preceding `today`, most recent first.
///
/// Element `i` (1-indexed) is `today - i` days, so `today` itself is never included.
pub fn date_range(today: NaiveDate, days: u32) -> Vec<DateKey> {
    (1..=u64::from(days))
        .map_while(|offset| today.checked_sub_days(Days::new(offset)))
        .map(DateKey::from)
        .collect()
}

/// Same as [`date_range`], anchored at the local calendar date.
pub fn generate(days: u32) -> Vec<DateKey> {
    date_range(Local::now().date_naive(), days)
}
