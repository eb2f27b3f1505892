//!
//! View modes and period arithmetic.
//!

use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::grid::DateRange;
use chrono::{Days, NaiveDate};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Calendar unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
    Year,
}

/// What is shown as one page of the calendar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ViewMode {
    /// A single day.
    Day,
    /// One week.
    Week,
    /// One month, completed to full weeks.
    Month,
    /// All months of one year.
    #[default]
    Year,
}

/// Direction of a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavDirection {
    /// To the next period.
    Forward,
    /// To the previous period.
    Backward,
}

impl NavDirection {
    /// +1 or -1
    pub fn signum(self) -> i32 {
        match self {
            NavDirection::Forward => 1,
            NavDirection::Backward => -1,
        }
    }
}

impl ViewMode {
    /// All modes.
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Day,
        ViewMode::Week,
        ViewMode::Month,
        ViewMode::Year,
    ];

    /// The unit of one page.
    pub fn period_unit(self) -> PeriodUnit {
        match self {
            ViewMode::Day => PeriodUnit::Day,
            ViewMode::Week => PeriodUnit::Week,
            ViewMode::Month => PeriodUnit::Month,
            ViewMode::Year => PeriodUnit::Year,
        }
    }

    /// Granularity of the generated data. A year is
    /// partitioned into months, everything else is days.
    pub fn step_unit(self) -> PeriodUnit {
        match self {
            ViewMode::Year => PeriodUnit::Month,
            _ => PeriodUnit::Day,
        }
    }

    /// Can the rendered content exceed one viewport.
    pub fn is_scrollable(self) -> bool {
        self == ViewMode::Year
    }

    /// Next mode, wraps around.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Day => ViewMode::Week,
            ViewMode::Week => ViewMode::Month,
            ViewMode::Month => ViewMode::Year,
            ViewMode::Year => ViewMode::Day,
        }
    }

    /// The period containing the date.
    pub fn period(
        self,
        date: NaiveDate,
        config: &CalendarConfig,
    ) -> Result<DateRange, CalendarError> {
        match self {
            ViewMode::Day => Ok(DateRange::day(date)),
            ViewMode::Week => config.week_interval(date),
            ViewMode::Month => config.calendar().resolve_month(date),
            ViewMode::Year => config.calendar().resolve_year(date),
        }
    }

    /// Move the date by n periods. Negative n goes back.
    ///
    /// Months and years keep the day of month where possible and
    /// clamp it to the length of the target month otherwise.
    pub fn step(
        self,
        date: NaiveDate,
        n: i32,
        config: &CalendarConfig,
    ) -> Result<NaiveDate, CalendarError> {
        let calendar = config.calendar();
        let days = |d: u64| {
            if n >= 0 {
                date.checked_add_days(Days::new(d * n.unsigned_abs() as u64))
            } else {
                date.checked_sub_days(Days::new(d * n.unsigned_abs() as u64))
            }
        };

        let r = match self {
            ViewMode::Day => days(1),
            ViewMode::Week => days(7),
            ViewMode::Month => calendar.add_months(date, n),
            ViewMode::Year => calendar.add_years(date, n),
        };
        r.ok_or_else(|| CalendarError::unresolved(calendar.identifier(), date))
    }

    /// Move the date one period in the given direction.
    pub fn navigate(
        self,
        date: NaiveDate,
        direction: NavDirection,
        config: &CalendarConfig,
    ) -> Result<NaiveDate, CalendarError> {
        self.step(date, direction.signum(), config)
    }
}
