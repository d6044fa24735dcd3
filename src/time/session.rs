/// Market session cutoff handling
use chrono::{NaiveDateTime, NaiveTime, Timelike};

use crate::error::{CalendarError, Result};

/// Opening cutoff of the exchange session.
///
/// Timestamps are read as exchange-local wall-clock time; no zone
/// conversion happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketClock {
    open_hour: u32,
    open_minute: u32,
}

impl Default for MarketClock {
    fn default() -> Self {
        // 9:30 AM exchange time
        MarketClock {
            open_hour: 9,
            open_minute: 30,
        }
    }
}

impl MarketClock {
    pub fn new(open_hour: u32, open_minute: u32) -> Result<Self> {
        if open_hour > 23 || open_minute > 59 {
            return Err(CalendarError::InvalidParameter(format!(
                "market open {:02}:{:02} is not a valid time of day",
                open_hour, open_minute
            )));
        }
        Ok(MarketClock {
            open_hour,
            open_minute,
        })
    }

    pub fn from_time(open: NaiveTime) -> Result<Self> {
        Self::new(open.hour(), open.minute())
    }

    pub fn open_hour(&self) -> u32 {
        self.open_hour
    }

    pub fn open_minute(&self) -> u32 {
        self.open_minute
    }

    /// Check whether `timestamp` falls before the session has opened.
    ///
    /// A timestamp at exactly midnight carries no intraday information and
    /// is never before the open. Within the opening hour the comparison is
    /// by minute only, so the cutoff minute itself still counts as before
    /// the open.
    pub fn is_before_market_open(&self, timestamp: &NaiveDateTime) -> bool {
        if timestamp.time() == NaiveTime::MIN {
            return false;
        }

        if timestamp.hour() < self.open_hour {
            return true;
        }

        if timestamp.hour() == self.open_hour && timestamp.minute() <= self.open_minute {
            return true;
        }

        false
    }
}

/// Check against the default 9:30 cutoff
pub fn is_before_market_open(timestamp: &NaiveDateTime) -> bool {
    MarketClock::default().is_before_market_open(timestamp)
}
