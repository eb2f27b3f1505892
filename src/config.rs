//!
//! Calendar configuration.
//!
//! [CalendarConfig] is an immutable value that is passed to every
//! grid computation. There is no global default region or calendar,
//! everything goes through this.
//!
//! ```
//! use chrono::Weekday;
//! use rat_calendar::config::CalendarConfig;
//!
//! let cfg = CalendarConfig::builder()
//!     .first_weekday(Weekday::Mon)
//!     .calendar_id("gregorian")
//!     .build()
//!     .expect("valid config");
//! assert_eq!(cfg.first_weekday(), Weekday::Mon);
//! ```
//!

use crate::error::CalendarError;
use crate::grid::DateRange;
use crate::system::Calendar;
use chrono::{Days, Locale, NaiveDate, Weekday};

/// Weekday from the 1-based numbering used by most calendar
/// libraries: 1 = Sunday, 2 = Monday ... 7 = Saturday.
pub fn weekday_from_number(n: u8) -> Result<Weekday, CalendarError> {
    match n {
        1 => Ok(Weekday::Sun),
        2 => Ok(Weekday::Mon),
        3 => Ok(Weekday::Tue),
        4 => Ok(Weekday::Wed),
        5 => Ok(Weekday::Thu),
        6 => Ok(Weekday::Fri),
        7 => Ok(Weekday::Sat),
        n => Err(CalendarError::InvalidFirstWeekday(n)),
    }
}

/// 1-based weekday number: 1 = Sunday ... 7 = Saturday.
pub fn weekday_number(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8 + 1
}

fn weekday_bit(weekday: Weekday) -> u8 {
    1 << weekday.num_days_from_monday()
}

/// Calendar configuration.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// First day of each week row.
    first_weekday: Weekday,
    /// Rules for months and years.
    calendar: Calendar,
    /// Locale for labels. Never used for date math.
    locale: Locale,
    /// Bitset of weekend days.
    weekend: u8,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sun,
            calendar: Calendar::gregorian(),
            locale: Locale::default(),
            weekend: weekday_bit(Weekday::Sat) | weekday_bit(Weekday::Sun),
        }
    }
}

impl CalendarConfig {
    /// Gregorian, weeks start on Sunday, default locale.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CalendarConfigBuilder {
        CalendarConfigBuilder::new()
    }

    /// Builder initialized with this configuration.
    pub fn to_builder(&self) -> CalendarConfigBuilder {
        CalendarConfigBuilder {
            config: self.clone(),
            err: None,
        }
    }

    /// First day of the week.
    #[inline]
    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// Last day of the week.
    #[inline]
    pub fn last_weekday(&self) -> Weekday {
        self.first_weekday.pred()
    }

    /// Calendar system.
    #[inline]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Locale for month and weekday names.
    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Is this a weekend day.
    #[inline]
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        self.weekend & weekday_bit(weekday) != 0
    }

    /// The weekdays in display order.
    pub fn weekdays(&self) -> [Weekday; 7] {
        let mut wd = self.first_weekday;
        std::array::from_fn(|_| {
            let v = wd;
            wd = wd.succ();
            v
        })
    }

    /// The week containing the date.
    ///
    /// Fails only if the week or its exclusive end fall outside
    /// the range of NaiveDate.
    pub fn week_interval(&self, date: NaiveDate) -> Result<DateRange, CalendarError> {
        let week = Days::new(7);
        // Near the limits query the neighbouring week and shift it.
        let start = self
            .week_start(date)
            .or_else(|| {
                date.checked_sub_days(week)
                    .and_then(|v| self.week_start(v))
                    .and_then(|v| v.checked_add_days(week))
            })
            .or_else(|| {
                date.checked_add_days(week)
                    .and_then(|v| self.week_start(v))
                    .and_then(|v| v.checked_sub_days(week))
            });
        start
            .and_then(|start| Some(DateRange::new(start, start.checked_add_days(week)?)))
            .ok_or_else(|| CalendarError::unresolved(self.calendar.identifier(), date))
    }

    /// First day of the week. None if the week query could leave
    /// the range of NaiveDate.
    fn week_start(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.checked_sub_days(Days::new(6))?;
        date.checked_add_days(Days::new(6))?;
        Some(date.week(self.first_weekday).first_day())
    }
}

/// Builder for [CalendarConfig].
///
/// Invalid values are remembered and reported by [build](CalendarConfigBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct CalendarConfigBuilder {
    config: CalendarConfig,
    err: Option<CalendarError>,
}

impl CalendarConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// First day of the week.
    #[inline]
    pub fn first_weekday(mut self, weekday: Weekday) -> Self {
        self.config.first_weekday = weekday;
        self
    }

    /// First day of the week as number. 1 = Sunday ... 7 = Saturday.
    pub fn first_weekday_number(mut self, n: u8) -> Self {
        match weekday_from_number(n) {
            Ok(weekday) => self.config.first_weekday = weekday,
            Err(e) => self.fail(e),
        }
        self
    }

    /// Calendar system.
    #[inline]
    pub fn calendar(mut self, calendar: Calendar) -> Self {
        self.config.calendar = calendar;
        self
    }

    /// Calendar system by identifier.
    pub fn calendar_id(mut self, id: &str) -> Self {
        match Calendar::from_identifier(id) {
            Ok(calendar) => self.config.calendar = calendar,
            Err(e) => self.fail(e),
        }
        self
    }

    /// Locale for month and weekday names.
    #[inline]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    /// Weekend days.
    pub fn weekend(mut self, days: &[Weekday]) -> Self {
        self.config.weekend = days.iter().fold(0, |acc, d| acc | weekday_bit(*d));
        self
    }

    fn fail(&mut self, err: CalendarError) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }

    /// Returns the first invalid value that was set.
    pub fn build(self) -> Result<CalendarConfig, CalendarError> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(self.config),
        }
    }
}
