/// Centralized error types for business day resolution
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    // Calendar Errors
    #[error("Unsupported calendar year: {0}")]
    UnsupportedYear(i32),

    #[error("Invalid holiday entry: {0}")]
    InvalidHoliday(String),

    // Resolution Errors
    #[error("Business day resolution from {start} exceeded {steps} steps")]
    ResolutionLimitExceeded { start: NaiveDateTime, steps: usize },

    #[error("Date arithmetic out of range at {0}")]
    DateOutOfRange(NaiveDate),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // File I/O Errors
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("CSV parsing failed: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing failed: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalendarError>;

impl CalendarError {
    /// True when the holiday table has to be extended before the call can succeed
    pub fn requires_calendar_update(&self) -> bool {
        matches!(self, CalendarError::UnsupportedYear(_))
    }

    /// Get error code for logging
    pub fn error_code(&self) -> &str {
        match self {
            CalendarError::UnsupportedYear(_) => "CAL_001",
            CalendarError::InvalidHoliday(_) => "CAL_002",
            CalendarError::ResolutionLimitExceeded { .. } => "RES_001",
            CalendarError::DateOutOfRange(_) => "RES_002",
            CalendarError::InvalidTimestamp(_) => "RES_003",
            CalendarError::ConfigError(_) => "CFG_001",
            CalendarError::InvalidParameter(_) => "CFG_002",
            CalendarError::FileError(_) => "FILE_001",
            CalendarError::CsvError(_) => "FILE_002",
            CalendarError::TomlError(_) => "FILE_003",
            CalendarError::SerializationError(_) => "DATA_001",
        }
    }
}
