/// Core type definitions for business day resolution
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

/// A single exchange holiday.
///
/// Entries are plain data: `month` and `day` are validated only when the
/// entry is inserted into a calendar table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub description: String,
}

impl HolidayEntry {
    pub fn new(year: i32, month: u32, day: u32, description: impl Into<String>) -> Self {
        HolidayEntry {
            year,
            month,
            day,
            description: description.into(),
        }
    }

    /// Calendar date of the entry, `None` when month/day do not name a real day
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        self.year == date.year() && self.month == date.month() && self.day == date.day()
    }
}

/// Outcome of resolving one timestamp, as printed by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub input: NaiveDateTime,
    pub business_day: NaiveDate,
    pub julian_date: String,
}

impl Resolution {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Configuration for the resolver
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Market Session
    #[serde(default = "default_market_open")]
    pub market_open: String,

    // Resolution
    #[serde(default = "default_max_resolution_steps")]
    pub max_resolution_steps: usize,

    // Logging
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // Calendar Extensions
    #[serde(default)]
    pub holiday_files: Vec<PathBuf>,
    #[serde(default)]
    pub holidays: Vec<HolidayEntry>,
}

fn default_market_open() -> String {
    "09:30".to_string()
}

fn default_max_resolution_steps() -> usize {
    32
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            market_open: default_market_open(),
            max_resolution_steps: default_max_resolution_steps(),
            log_level: default_log_level(),
            holiday_files: Vec::new(),
            holidays: Vec::new(),
        }
    }
}
