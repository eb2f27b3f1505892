use crate::system::{CalendarDate, CalendarSystem};
use chrono::{Datelike, NaiveDate};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Start of the islamic calendar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HijriEpoch {
    /// Friday, 16 July 622 (julian).
    #[default]
    Civil,
    /// Thursday, 15 July 622 (julian).
    Astronomical,
}

impl HijriEpoch {
    /// Epoch as day number since 0001-01-01 (gregorian), which
    /// is day 1.
    fn fixed(self) -> i64 {
        match self {
            HijriEpoch::Civil => 227015,
            HijriEpoch::Astronomical => 227014,
        }
    }
}

/// Tabular islamic calendar.
///
/// 12 months alternating between 30 and 29 days, the last month
/// gets an extra day in 11 of 30 years. This is the arithmetic
/// variant, it doesn't try to follow moon sightings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IslamicTabular {
    epoch: HijriEpoch,
}

impl IslamicTabular {
    pub const fn new(epoch: HijriEpoch) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> HijriEpoch {
        self.epoch
    }

    /// Leap years are 2, 5, 7, 10, 13, 16, 18, 21, 24, 26 and 29
    /// of each 30-year cycle.
    pub fn is_leap_year(year: i32) -> bool {
        (14 + 11 * year as i64).rem_euclid(30) < 11
    }

    fn fixed_from_hijri(&self, year: i64, month: i64, day: i64) -> i64 {
        day + 29 * (month - 1)
            + (6 * month - 1).div_euclid(11)
            + (year - 1) * 354
            + (3 + 11 * year).div_euclid(30)
            + self.epoch.fixed()
            - 1
    }
}

impl CalendarSystem for IslamicTabular {
    fn identifier(&self) -> &str {
        match self.epoch {
            HijriEpoch::Civil => "islamic-civil",
            HijriEpoch::Astronomical => "islamic-tbla",
        }
    }

    fn to_ymd(&self, date: NaiveDate) -> Option<CalendarDate> {
        let fixed = date.num_days_from_ce() as i64;

        let year = (30 * (fixed - self.epoch.fixed()) + 10646).div_euclid(10631);
        let prior_days = fixed - self.fixed_from_hijri(year, 1, 1);
        let month = (11 * prior_days + 330).div_euclid(325);
        let day = fixed - self.fixed_from_hijri(year, month, 1) + 1;

        Some(CalendarDate {
            year: i32::try_from(year).ok()?,
            month: u32::try_from(month).ok()?,
            day: u32::try_from(day).ok()?,
        })
    }

    fn from_ymd(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        let len = self.days_in_month(year, month)?;
        if day == 0 || day > len {
            return None;
        }
        let fixed = self.fixed_from_hijri(year as i64, month as i64, day as i64);
        NaiveDate::from_num_days_from_ce_opt(i32::try_from(fixed).ok()?)
    }

    fn months_in_year(&self, _year: i32) -> u32 {
        12
    }

    fn days_in_month(&self, year: i32, month: u32) -> Option<u32> {
        match month {
            12 if Self::is_leap_year(year) => Some(30),
            1..=12 if month % 2 == 1 => Some(30),
            1..=12 => Some(29),
            _ => None,
        }
    }
}
