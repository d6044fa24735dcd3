/// Configuration loading from TOML file
use chrono::NaiveTime;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::error::{CalendarError, Result};
use crate::time::{BusinessDayResolver, HolidayCalendar, MarketClock};
use crate::types::{Config, HolidayEntry};

#[derive(Debug, Deserialize)]
struct HolidayFile {
    #[serde(default)]
    holidays: Vec<HolidayEntry>,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CalendarError::ConfigError(format!("Failed to read config file: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CalendarError::ConfigError(format!("Failed to parse config: {}", e)))?;

    // Validate config
    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    parse_market_open(&config.market_open)?;

    if config.max_resolution_steps == 0 {
        return Err(CalendarError::ConfigError(
            "max_resolution_steps must be >= 1".to_string(),
        ));
    }

    if config.log_level.trim().is_empty() {
        return Err(CalendarError::ConfigError("log_level is empty".to_string()));
    }

    Ok(())
}

fn parse_market_open(value: &str) -> Result<MarketClock> {
    let open = NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| CalendarError::ConfigError(format!("Invalid market_open: {}", value)))?;
    MarketClock::from_time(open)
}

/// Load holiday entries from a `.csv` or `.toml` file
pub fn load_holiday_file<P: AsRef<Path>>(path: P) -> Result<Vec<HolidayEntry>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let entries = match extension.as_deref() {
        Some("csv") => {
            let mut reader = csv::Reader::from_path(path)?;
            reader
                .deserialize()
                .collect::<std::result::Result<Vec<HolidayEntry>, csv::Error>>()?
        }
        Some("toml") => {
            let content = std::fs::read_to_string(path)?;
            let file: HolidayFile = toml::from_str(&content)?;
            file.holidays
        }
        _ => {
            return Err(CalendarError::ConfigError(format!(
                "Unsupported holiday file type: {}",
                path.display()
            )))
        }
    };

    info!("Loaded {} holidays from {}", entries.len(), path.display());
    Ok(entries)
}

/// Build a resolver over the built-in calendar plus every configured holiday
pub fn build_resolver(config: &Config) -> Result<BusinessDayResolver> {
    validate_config(config)?;
    let clock = parse_market_open(&config.market_open)?;

    let mut extra = config.holidays.clone();
    for file in &config.holiday_files {
        extra.extend(load_holiday_file(file)?);
    }

    let calendar = HolidayCalendar::builtin().with_entries(extra)?;
    info!(
        "Calendar ready: years {:?}, market open {:02}:{:02}",
        calendar.supported_years(),
        clock.open_hour(),
        clock.open_minute()
    );

    Ok(BusinessDayResolver::new(clock, calendar).with_max_steps(config.max_resolution_steps))
}
