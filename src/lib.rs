//! As-of business day resolution for exchange market data.
//!
//! All timestamps are naive exchange-local wall-clock values. Nothing here
//! converts zones: callers holding a UTC instant or another zone must
//! convert to exchange time first (see [`utils::exchange_time`]).

pub mod types;
pub mod error;
pub mod time;
pub mod config;
pub mod utils;

pub use types::*;
pub use error::{CalendarError, Result};
pub use time::{
    get_business_day, is_before_market_open, is_holiday, BusinessDayResolver, HolidayCalendar,
    MarketClock,
};
