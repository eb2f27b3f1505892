//!
//! Calendar systems.
//!
//! A [NaiveDate] is just a day number in the proleptic gregorian
//! calendar. A calendar system maps this day to its own
//! year/month/day and back, and all period boundaries are derived
//! from that mapping.
//!
//! Use [Calendar] as a handle to one of the systems. There are
//! the [Gregorian] and the tabular islamic calendar [IslamicTabular].
//! Anything else can be plugged in with [Calendar::custom].
//!

use crate::error::CalendarError;
use crate::grid::DateRange;
use chrono::{Days, NaiveDate};
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

mod gregorian;
mod hijri;

pub use gregorian::Gregorian;
pub use hijri::{HijriEpoch, IslamicTabular};

/// Year/month/day in some calendar system.
///
/// Month and day are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Rules for months and years of a calendar.
///
/// Weeks are not part of this, they are the same 7 days for
/// every system supported here.
pub trait CalendarSystem: Debug + Send + Sync {
    /// Unique identifier. Two systems with the same identifier
    /// are considered equal.
    fn identifier(&self) -> &str;

    /// Convert to calendar year/month/day.
    /// Returns None if the date can't be represented.
    fn to_ymd(&self, date: NaiveDate) -> Option<CalendarDate>;

    /// Convert from calendar year/month/day.
    /// Returns None for invalid or unrepresentable dates.
    fn from_ymd(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate>;

    /// Number of months in the given year.
    fn months_in_year(&self, year: i32) -> u32;

    /// Number of days in the given month.
    fn days_in_month(&self, year: i32, month: u32) -> Option<u32>;

    /// The month containing the date.
    fn month_interval(&self, date: NaiveDate) -> Option<DateRange> {
        let ymd = self.to_ymd(date)?;
        let start = self.from_ymd(ymd.year, ymd.month, 1)?;
        let len = self.days_in_month(ymd.year, ymd.month)?;
        let end = start.checked_add_days(Days::new(len as u64))?;
        Some(DateRange::new(start, end))
    }

    /// The year containing the date.
    fn year_interval(&self, date: NaiveDate) -> Option<DateRange> {
        let ymd = self.to_ymd(date)?;
        let start = self.from_ymd(ymd.year, 1, 1)?;
        let last_month = self.months_in_year(ymd.year);
        let last_start = self.from_ymd(ymd.year, last_month, 1)?;
        let len = self.days_in_month(ymd.year, last_month)?;
        let end = last_start.checked_add_days(Days::new(len as u64))?;
        Some(DateRange::new(start, end))
    }

    /// First day of each month of the year containing the date.
    fn month_starts(&self, date: NaiveDate) -> Option<Vec<NaiveDate>> {
        let ymd = self.to_ymd(date)?;
        (1..=self.months_in_year(ymd.year))
            .map(|month| self.from_ymd(ymd.year, month, 1))
            .collect()
    }

    /// Add n months. The day is clamped to the length of the
    /// target month.
    fn add_months(&self, date: NaiveDate, n: i32) -> Option<NaiveDate> {
        let ymd = self.to_ymd(date)?;
        let mut year = ymd.year;
        let mut month = ymd.month;

        if n >= 0 {
            for _ in 0..n {
                if month >= self.months_in_year(year) {
                    year = year.checked_add(1)?;
                    month = 1;
                } else {
                    month += 1;
                }
            }
        } else {
            for _ in 0..n.unsigned_abs() {
                if month <= 1 {
                    year = year.checked_sub(1)?;
                    month = self.months_in_year(year);
                } else {
                    month -= 1;
                }
            }
        }

        let day = ymd.day.min(self.days_in_month(year, month)?);
        self.from_ymd(year, month, day)
    }

    /// Add n years. Month and day are clamped to the target year.
    fn add_years(&self, date: NaiveDate, n: i32) -> Option<NaiveDate> {
        let ymd = self.to_ymd(date)?;
        let year = ymd.year.checked_add(n)?;
        let month = ymd.month.min(self.months_in_year(year));
        let day = ymd.day.min(self.days_in_month(year, month)?);
        self.from_ymd(year, month, day)
    }
}

/// Handle for a calendar system.
///
/// Cheap to clone. Equality and hashing use the identifier
/// of the system.
#[derive(Clone)]
pub struct Calendar {
    system: Arc<dyn CalendarSystem>,
}

impl Calendar {
    /// Gregorian calendar.
    pub fn gregorian() -> Self {
        Self::custom(Gregorian)
    }

    /// Tabular islamic calendar with the civil epoch.
    pub fn islamic_civil() -> Self {
        Self::custom(IslamicTabular::new(HijriEpoch::Civil))
    }

    /// Tabular islamic calendar with the astronomical epoch.
    pub fn islamic_tbla() -> Self {
        Self::custom(IslamicTabular::new(HijriEpoch::Astronomical))
    }

    /// Use your own calendar system.
    pub fn custom(system: impl CalendarSystem + 'static) -> Self {
        Self {
            system: Arc::new(system),
        }
    }

    /// Resolve one of the builtin calendar systems.
    ///
    /// Knows `gregorian` (alias `gregory`, `iso8601`),
    /// `islamic-civil` (alias `islamicc`) and `islamic-tbla`.
    pub fn from_identifier(id: &str) -> Result<Self, CalendarError> {
        match id.trim().to_ascii_lowercase().as_str() {
            "gregorian" | "gregory" | "iso8601" => Ok(Self::gregorian()),
            "islamic-civil" | "islamicc" => Ok(Self::islamic_civil()),
            "islamic-tbla" => Ok(Self::islamic_tbla()),
            _ => Err(CalendarError::UnknownCalendar(id.to_string())),
        }
    }

    /// Identifier of the calendar system.
    pub fn identifier(&self) -> &str {
        self.system.identifier()
    }

    /// Month interval or an error.
    pub(crate) fn resolve_month(&self, date: NaiveDate) -> Result<DateRange, CalendarError> {
        self.month_interval(date)
            .ok_or_else(|| CalendarError::unresolved(self.identifier(), date))
    }

    /// Year interval or an error.
    pub(crate) fn resolve_year(&self, date: NaiveDate) -> Result<DateRange, CalendarError> {
        self.year_interval(date)
            .ok_or_else(|| CalendarError::unresolved(self.identifier(), date))
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::gregorian()
    }
}

impl Deref for Calendar {
    type Target = dyn CalendarSystem;

    fn deref(&self) -> &Self::Target {
        self.system.as_ref()
    }
}

impl Debug for Calendar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Calendar").field(&self.identifier()).finish()
    }
}

impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}

impl Eq for Calendar {}

impl Hash for Calendar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier().hash(state);
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use crate::system::Calendar;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialized as the identifier. Custom systems can be written
    /// but not read back.
    impl Serialize for Calendar {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.identifier())
        }
    }

    impl<'de> Deserialize<'de> for Calendar {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let id = String::deserialize(deserializer)?;
            Calendar::from_identifier(&id).map_err(D::Error::custom)
        }
    }
}
