use crate::system::{CalendarDate, CalendarSystem};
use chrono::{Datelike, NaiveDate};

/// Proleptic gregorian calendar.
///
/// This is what chrono uses anyway, so this is just a
/// thin wrapper.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gregorian;

impl Gregorian {
    pub fn is_leap_year(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }
}

impl CalendarSystem for Gregorian {
    fn identifier(&self) -> &str {
        "gregorian"
    }

    fn to_ymd(&self, date: NaiveDate) -> Option<CalendarDate> {
        Some(CalendarDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
    }

    fn from_ymd(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn months_in_year(&self, _year: i32) -> u32 {
        12
    }

    fn days_in_month(&self, year: i32, month: u32) -> Option<u32> {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
            4 | 6 | 9 | 11 => Some(30),
            2 if Self::is_leap_year(year) => Some(29),
            2 => Some(28),
            _ => None,
        }
    }
}
