pub mod session;
pub mod holidays;
pub mod business_day;

pub use session::{is_before_market_open, MarketClock};
pub use holidays::{is_holiday, CalendarTable, HolidayCalendar};
pub use business_day::{get_business_day, BusinessDayResolver, DEFAULT_MAX_STEPS};
