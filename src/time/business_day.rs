/// Business day resolution: walk back from a timestamp to the last completed trading day
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

use crate::error::{CalendarError, Result};
use crate::time::holidays::HolidayCalendar;
use crate::time::session::MarketClock;

/// Upper bound on walk steps. The longest weekend-plus-holiday run in the
/// built-in data is four days.
pub const DEFAULT_MAX_STEPS: usize = 32;

fn days_back(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or(CalendarError::DateOutOfRange(date))
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Resolves timestamps to the as-of business day.
///
/// Input timestamps must already be in exchange-local time.
#[derive(Debug, Clone)]
pub struct BusinessDayResolver {
    clock: MarketClock,
    calendar: HolidayCalendar,
    max_steps: usize,
}

impl Default for BusinessDayResolver {
    fn default() -> Self {
        BusinessDayResolver::new(MarketClock::default(), HolidayCalendar::builtin().clone())
    }
}

impl BusinessDayResolver {
    pub fn new(clock: MarketClock, calendar: HolidayCalendar) -> Self {
        BusinessDayResolver {
            clock,
            calendar,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn clock(&self) -> &MarketClock {
        &self.clock
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Get the business day whose market data is current as of `timestamp`.
    ///
    /// Saturday and Sunday fall back to Friday. A weekday before the market
    /// open falls back one day. A holiday candidate moves back one more day
    /// and the walk repeats from that midnight, where only the weekend rule
    /// can apply.
    ///
    /// The before-open shift is not followed by a weekend check: a Monday
    /// query before the open yields Sunday unless that Sunday is a holiday.
    pub fn get_business_day(&self, timestamp: NaiveDateTime) -> Result<NaiveDate> {
        let mut current = timestamp;

        for _ in 0..self.max_steps {
            let weekday = current.weekday();
            debug!("Resolving {} ({:?})", current, weekday);

            let date = current.date();
            let candidate = match weekday {
                Weekday::Sat => days_back(date, 1)?,
                Weekday::Sun => days_back(date, 2)?,
                _ if self.clock.is_before_market_open(&current) => days_back(date, 1)?,
                _ => date,
            };
            debug!("Candidate business day {}", candidate);

            if !self.calendar.is_holiday(candidate)? {
                return Ok(candidate);
            }

            current = days_back(candidate, 1)?.and_time(NaiveTime::MIN);
        }

        Err(CalendarError::ResolutionLimitExceeded {
            start: timestamp,
            steps: self.max_steps,
        })
    }

    /// Check if `date` is itself a business day
    pub fn is_business_day(&self, date: NaiveDate) -> Result<bool> {
        Ok(!is_weekend(date) && !self.calendar.is_holiday(date)?)
    }
}

/// Resolve against the default 9:30 cutoff and the built-in calendar
pub fn get_business_day(timestamp: NaiveDateTime) -> Result<NaiveDate> {
    BusinessDayResolver::default().get_business_day(timestamp)
}
