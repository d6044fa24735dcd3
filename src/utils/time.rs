/// Time utilities for timestamp input and as-of keys
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::America::New_York;

use crate::error::{CalendarError, Result};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an exchange-local timestamp.
///
/// A bare `YYYY-MM-DD` parses to midnight, the date-only form the market
/// clock never treats as before the open.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(ts);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| CalendarError::InvalidTimestamp(input.to_string()))
}

/// Current wall-clock time at the exchange
pub fn exchange_now() -> NaiveDateTime {
    exchange_time(Utc::now())
}

pub fn exchange_time(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&New_York).naive_local()
}

/// Julian date key: year followed by the zero-padded day of the year
pub fn jul_date(date: NaiveDate) -> String {
    format!("{}{:03}", date.year(), date.ordinal())
}
