/// Exchange Holiday Calendar Management
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::{error, warn};

use crate::error::{CalendarError, Result};
use crate::types::HolidayEntry;

/// Holidays observed on their nominal date in every year, weekend or not
const FIXED_HOLIDAYS: [(u32, u32, &str); 3] = [
    (1, 1, "New Years Day"),
    (7, 4, "Independence Day"),
    (12, 25, "Christmas"),
];

/// Exchange holidays 2019-2024 (update annually)
const EXCHANGE_HOLIDAYS: &[(i32, u32, u32, &str)] = &[
    // 2024
    (2024, 12, 25, "Christmas"),
    (2024, 11, 28, "Thanksgiving"),
    (2024, 9, 2, "Labor Day"),
    (2024, 7, 4, "Independence Day"),
    (2024, 6, 19, "Juneteenth"),
    (2024, 5, 27, "Memorial Day"),
    (2024, 3, 29, "Good Friday"),
    (2024, 2, 19, "Washington's Birthday"),
    (2024, 1, 15, "Martin Luther King, Jr. Day"),
    (2024, 1, 1, "New Years Day"),
    // 2023
    (2023, 12, 25, "Christmas"),
    (2023, 11, 23, "Thanksgiving"),
    (2023, 9, 4, "Labor Day"),
    (2023, 7, 4, "July 4th"),
    (2023, 6, 19, "Juneteenth"),
    (2023, 5, 29, "Memorial Day"),
    (2023, 4, 7, "Good Friday"),
    (2023, 2, 20, "Presidents Day"),
    (2023, 1, 16, "Martin Luther King, Jr. Day"),
    (2023, 1, 2, "New Years Day Observed"),
    // 2022 (New Years Day fell on a Saturday and was not observed)
    (2022, 12, 26, "Christmas Observed"),
    (2022, 11, 24, "Thanksgiving"),
    (2022, 9, 5, "Labor Day"),
    (2022, 7, 4, "July 4th"),
    (2022, 6, 20, "Juneteenth"),
    (2022, 5, 30, "Memorial Day"),
    (2022, 4, 15, "Good Friday"),
    (2022, 2, 21, "Presidents Day"),
    (2022, 1, 17, "MLK Jr Day"),
    // 2021
    (2021, 9, 6, "Labor Day"),
    (2021, 12, 24, "Christmas Observed"),
    (2021, 11, 25, "Thanksgiving"),
    (2021, 7, 5, "July 4th Observed"),
    (2021, 5, 31, "Memorial Day"),
    (2021, 4, 2, "Good Friday"),
    (2021, 2, 15, "Presidents Day"),
    (2021, 1, 18, "MLK Jr Day"),
    (2021, 1, 1, "New Years Day"),
    // 2020
    (2020, 9, 7, "Labor Day"),
    (2020, 12, 25, "Christmas"),
    (2020, 11, 26, "Thanksgiving"),
    (2020, 7, 3, "July 4th Observed"),
    (2020, 5, 25, "Memorial Day"),
    (2020, 4, 10, "Good Friday"),
    (2020, 2, 17, "Presidents Day"),
    (2020, 1, 20, "MLK Jr Day"),
    (2020, 1, 1, "New Years Day"),
    // 2019
    (2019, 9, 2, "Labor Day"),
    (2019, 12, 25, "Christmas"),
    (2019, 11, 28, "Thanksgiving"),
    (2019, 7, 4, "July 4th"),
    (2019, 5, 27, "Memorial Day"),
    (2019, 4, 19, "Good Friday"),
    (2019, 2, 18, "Presidents Day"),
    (2019, 1, 21, "MLK Jr Day"),
    (2019, 1, 1, "New Years Day"),
];

static BUILTIN: OnceLock<HolidayCalendar> = OnceLock::new();

fn fixed_holiday(date: NaiveDate) -> Option<&'static str> {
    FIXED_HOLIDAYS
        .iter()
        .find(|(month, day, _)| date.month() == *month && date.day() == *day)
        .map(|(_, _, name)| *name)
}

/// Year-indexed holiday entries, each year kept in date order
#[derive(Debug, Clone, Default)]
pub struct CalendarTable {
    years: BTreeMap<i32, Vec<HolidayEntry>>,
}

impl CalendarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its own year.
    ///
    /// Impossible dates are rejected. A date already present is kept twice
    /// and logged, since lookups are unaffected.
    pub fn insert(&mut self, entry: HolidayEntry) -> Result<()> {
        let date = entry.date().ok_or_else(|| {
            CalendarError::InvalidHoliday(format!(
                "{} ({:04}-{:02}-{:02}) is not a calendar date",
                entry.description, entry.year, entry.month, entry.day
            ))
        })?;

        let entries = self.years.entry(entry.year).or_default();
        if let Some(existing) = entries.iter().find(|h| h.matches(date)) {
            warn!(
                "Duplicate holiday on {}: '{}' and '{}'",
                date, existing.description, entry.description
            );
        }

        let pos = entries.partition_point(|h| (h.month, h.day) <= (entry.month, entry.day));
        entries.insert(pos, entry);
        Ok(())
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn entries(&self, year: i32) -> Option<&[HolidayEntry]> {
        self.years.get(&year).map(Vec::as_slice)
    }
}

/// Read-only holiday calendar.
///
/// The table sits behind an `Arc`, so clones share it and the calendar
/// can be read from any number of threads without locking.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    table: Arc<CalendarTable>,
}

impl HolidayCalendar {
    /// The built-in exchange calendar, initialised on first use
    pub fn builtin() -> &'static HolidayCalendar {
        BUILTIN.get_or_init(|| {
            let mut table = CalendarTable::new();
            for (year, month, day, description) in EXCHANGE_HOLIDAYS {
                if let Err(e) = table.insert(HolidayEntry::new(*year, *month, *day, *description)) {
                    error!("Skipping built-in holiday: {}", e);
                }
            }
            HolidayCalendar {
                table: Arc::new(table),
            }
        })
    }

    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = HolidayEntry>,
    {
        HolidayCalendar::default().with_entries(entries)
    }

    /// New calendar with `entries` merged into a copy of this one's table
    pub fn with_entries<I>(&self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = HolidayEntry>,
    {
        let mut table = (*self.table).clone();
        for entry in entries {
            table.insert(entry)?;
        }
        Ok(HolidayCalendar {
            table: Arc::new(table),
        })
    }

    /// Check if `date` is an exchange holiday.
    ///
    /// January 1, July 4 and December 25 are holidays in every year. Any
    /// other date in a year missing from the table fails with
    /// `UnsupportedYear` instead of reporting a trading day.
    pub fn is_holiday(&self, date: NaiveDate) -> Result<bool> {
        if fixed_holiday(date).is_some() {
            return Ok(true);
        }

        let entries = self
            .table
            .entries(date.year())
            .ok_or(CalendarError::UnsupportedYear(date.year()))?;

        Ok(entries.iter().any(|h| h.matches(date)))
    }

    /// Description of the holiday on `date`, if there is one
    pub fn holiday_name(&self, date: NaiveDate) -> Result<Option<&str>> {
        if let Some(name) = fixed_holiday(date) {
            return Ok(Some(name));
        }

        let entries = self
            .table
            .entries(date.year())
            .ok_or(CalendarError::UnsupportedYear(date.year()))?;

        Ok(entries
            .iter()
            .find(|h| h.matches(date))
            .map(|h| h.description.as_str()))
    }

    pub fn holidays_in(&self, year: i32) -> Result<&[HolidayEntry]> {
        self.table
            .entries(year)
            .ok_or(CalendarError::UnsupportedYear(year))
    }

    pub fn supports_year(&self, year: i32) -> bool {
        self.table.contains_year(year)
    }

    pub fn supported_years(&self) -> Vec<i32> {
        self.table.years().collect()
    }
}

/// Check a date against the built-in calendar
pub fn is_holiday(date: NaiveDate) -> Result<bool> {
    HolidayCalendar::builtin().is_holiday(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_known_holidays() {
        assert!(is_holiday(ymd(2023, 12, 25)).unwrap());
        assert!(is_holiday(ymd(2024, 7, 4)).unwrap());
        assert!(is_holiday(ymd(2024, 6, 19)).unwrap());
        assert!(is_holiday(ymd(2022, 4, 15)).unwrap());
    }

    #[test]
    fn test_regular_day_not_holiday() {
        assert!(!is_holiday(ymd(2019, 11, 1)).unwrap());
        assert!(!is_holiday(ymd(2024, 1, 2)).unwrap());
    }

    #[test]
    fn test_observed_holidays() {
        // July 4th 2021 was a Sunday, observed Monday
        assert!(is_holiday(ymd(2021, 7, 5)).unwrap());
        assert!(is_holiday(ymd(2021, 7, 4)).unwrap());
        // Christmas 2022 was a Sunday, observed Monday
        assert!(is_holiday(ymd(2022, 12, 26)).unwrap());
        assert!(is_holiday(ymd(2021, 12, 24)).unwrap());
        assert!(is_holiday(ymd(2020, 7, 3)).unwrap());
        assert!(is_holiday(ymd(2023, 1, 2)).unwrap());
    }

    #[test]
    fn test_fixed_holidays_outside_supported_years() {
        assert!(is_holiday(ymd(2030, 1, 1)).unwrap());
        assert!(is_holiday(ymd(2030, 7, 4)).unwrap());
        assert!(is_holiday(ymd(1999, 12, 25)).unwrap());
    }

    #[test]
    fn test_unsupported_year_fails() {
        let err = is_holiday(ymd(2030, 3, 15)).unwrap_err();
        assert!(matches!(err, CalendarError::UnsupportedYear(2030)));
        assert!(matches!(
            is_holiday(ymd(2018, 12, 31)),
            Err(CalendarError::UnsupportedYear(2018))
        ));
    }

    #[test]
    fn test_builtin_years() {
        let calendar = HolidayCalendar::builtin();
        assert_eq!(calendar.supported_years(), vec![2019, 2020, 2021, 2022, 2023, 2024]);
        assert!(calendar.supports_year(2022));
        assert!(!calendar.supports_year(2025));
    }

    #[test]
    fn test_builtin_data_is_complete() {
        // Every built-in row must survive validation
        let calendar = HolidayCalendar::builtin();
        let total: usize = calendar
            .supported_years()
            .into_iter()
            .map(|year| calendar.holidays_in(year).unwrap().len())
            .sum();
        assert_eq!(total, EXCHANGE_HOLIDAYS.len());
    }

    #[test]
    fn test_entries_are_keyed_and_sorted() {
        let calendar = HolidayCalendar::builtin();
        for year in calendar.supported_years() {
            let entries = calendar.holidays_in(year).unwrap();
            assert!(entries.iter().all(|h| h.year == year));
            assert!(entries
                .windows(2)
                .all(|w| (w[0].month, w[0].day) <= (w[1].month, w[1].day)));
        }
    }

    #[test]
    fn test_holiday_name() {
        let calendar = HolidayCalendar::builtin();
        assert_eq!(calendar.holiday_name(ymd(2023, 11, 23)).unwrap(), Some("Thanksgiving"));
        assert_eq!(calendar.holiday_name(ymd(2030, 12, 25)).unwrap(), Some("Christmas"));
        assert_eq!(calendar.holiday_name(ymd(2023, 11, 22)).unwrap(), None);
        assert!(calendar.holiday_name(ymd(2030, 11, 22)).is_err());
    }

    #[test]
    fn test_with_entries_adds_year() {
        let extended = HolidayCalendar::builtin()
            .with_entries(vec![
                HolidayEntry::new(2025, 1, 20, "MLK Jr Day"),
                HolidayEntry::new(2025, 4, 18, "Good Friday"),
            ])
            .unwrap();

        assert!(extended.is_holiday(ymd(2025, 4, 18)).unwrap());
        assert!(!extended.is_holiday(ymd(2025, 4, 17)).unwrap());
        assert!(extended.is_holiday(ymd(2023, 12, 25)).unwrap());
        // Built-in calendar is untouched
        assert!(is_holiday(ymd(2025, 4, 18)).is_err());
    }

    #[test]
    fn test_invalid_entry_rejected() {
        let err = HolidayCalendar::from_entries(vec![HolidayEntry::new(2025, 13, 1, "Bogus")])
            .unwrap_err();
        assert!(matches!(err, CalendarError::InvalidHoliday(_)));
    }

    #[test]
    fn test_duplicate_entry_is_harmless() {
        let calendar = HolidayCalendar::from_entries(vec![
            HolidayEntry::new(2025, 5, 26, "Memorial Day"),
            HolidayEntry::new(2025, 5, 26, "Memorial Day"),
        ])
        .unwrap();
        assert!(calendar.is_holiday(ymd(2025, 5, 26)).unwrap());
        assert_eq!(calendar.holidays_in(2025).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_calendar_supports_only_fixed_holidays() {
        let calendar = HolidayCalendar::default();
        assert!(calendar.is_holiday(ymd(2023, 7, 4)).unwrap());
        assert!(calendar.is_holiday(ymd(2023, 7, 5)).is_err());
    }
}
