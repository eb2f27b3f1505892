use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Invalid calendar configuration.
///
/// This is the only failure the grid computation knows. It is a
/// programming/configuration error, there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The first weekday is not in the range 1 (Sunday) to 7 (Saturday).
    InvalidFirstWeekday(u8),
    /// No calendar system with this identifier.
    UnknownCalendar(String),
    /// The calendar system can't find the month/year/week boundaries
    /// for this date. Usually the date is at the edge of the
    /// representable range.
    UnresolvedPeriod {
        calendar: String,
        date: NaiveDate,
    },
}

impl CalendarError {
    pub(crate) fn unresolved(calendar: &str, date: NaiveDate) -> Self {
        CalendarError::UnresolvedPeriod {
            calendar: calendar.to_string(),
            date,
        }
    }
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarError::InvalidFirstWeekday(n) => {
                write!(f, "invalid configuration: first weekday {} not in 1..=7", n)
            }
            CalendarError::UnknownCalendar(id) => {
                write!(f, "invalid configuration: unknown calendar '{}'", id)
            }
            CalendarError::UnresolvedPeriod { calendar, date } => {
                write!(
                    f,
                    "invalid configuration: calendar '{}' can't resolve the period of {}",
                    calendar, date
                )
            }
        }
    }
}

impl Error for CalendarError {}
