//!
//! Calendar grid computation.
//!
//! [compute_grid] takes a reference date, a [ViewMode] and a
//! [CalendarConfig] and returns the dates to display.
//!
//! * Day: one cell.
//! * Week: the 7 days of the week containing the date.
//! * Month: the month completed to full weeks. The days before
//!   and after the month are flagged as not in the current period.
//! * Year: one month grid for each month of the year.
//!
//! The computation is pure. The same inputs always give the
//! same result, and any date of a period gives the same result
//! as any other date of that period.
//!

use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::mode::ViewMode;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Range of days. Start is inclusive, end is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range for a single day.
    ///
    /// The end of [NaiveDate::MAX] can't be represented and
    /// saturates, which leaves an empty range.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date.succ_opt().unwrap_or(date))
    }

    /// Range for the days first..=last.
    pub fn inclusive(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        Some(Self::new(first, last.checked_add_days(Days::new(1))?))
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Last day in the range. For an empty range this is
    /// the start.
    pub fn last_day(&self) -> NaiveDate {
        if self.is_empty() {
            self.start
        } else {
            self.end.pred_opt().unwrap_or(self.start)
        }
    }

    /// Number of days.
    pub fn len_days(&self) -> u64 {
        self.end.signed_duration_since(self.start).num_days().max(0) as u64
    }

    /// Iterate all days.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |v| *v < end)
    }
}

/// One date of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub date: NaiveDate,
    /// Does the date belong to the displayed period.
    /// Other dates are only there to complete a week.
    pub in_current_period: bool,
}

impl GridCell {
    pub fn new(date: NaiveDate, in_current_period: bool) -> Self {
        Self {
            date,
            in_current_period,
        }
    }
}

/// Grid for a single period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodGrid {
    /// The displayed period.
    pub period: DateRange,
    /// All cells in order.
    pub cells: Vec<GridCell>,
}

impl PeriodGrid {
    /// Range from the first to the last cell.
    pub fn grid_range(&self) -> DateRange {
        match (self.cells.first(), self.cells.last()) {
            (Some(first), Some(last)) => {
                DateRange::inclusive(first.date, last.date).unwrap_or(self.period)
            }
            _ => self.period,
        }
    }

    /// Dates for the weekday header. These are the first
    /// 7 cells, or less for a single day.
    pub fn header_dates(&self) -> Vec<NaiveDate> {
        self.cells.iter().take(7).map(|v| v.date).collect()
    }

    /// Cells as rows of 7 days.
    pub fn weeks(&self) -> std::slice::Chunks<'_, GridCell> {
        self.cells.chunks(7)
    }

    /// Number of rows.
    pub fn week_len(&self) -> usize {
        self.cells.len().div_ceil(7)
    }

    /// Dates in the current period.
    pub fn in_period_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells
            .iter()
            .filter(|v| v.in_current_period)
            .map(|v| v.date)
    }
}

/// Result of [compute_grid].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridResult {
    /// Day, Week and Month.
    Period(PeriodGrid),
    /// Year partitioned into months.
    Year {
        /// The whole year.
        period: DateRange,
        /// Month grids, keyed by the first day of each month.
        months: BTreeMap<NaiveDate, PeriodGrid>,
    },
}

impl GridResult {
    /// The displayed period.
    pub fn period(&self) -> DateRange {
        match self {
            GridResult::Period(grid) => grid.period,
            GridResult::Year { period, .. } => *period,
        }
    }

    /// The single grid for Day/Week/Month.
    pub fn as_period(&self) -> Option<&PeriodGrid> {
        match self {
            GridResult::Period(grid) => Some(grid),
            GridResult::Year { .. } => None,
        }
    }

    /// The month grids for Year.
    pub fn months(&self) -> Option<&BTreeMap<NaiveDate, PeriodGrid>> {
        match self {
            GridResult::Period(_) => None,
            GridResult::Year { months, .. } => Some(months),
        }
    }

    /// All sections in order. One for Day/Week/Month,
    /// one per month for Year.
    pub fn sections(&self) -> impl Iterator<Item = &PeriodGrid> + '_ {
        let (single, months) = match self {
            GridResult::Period(grid) => (Some(grid), None),
            GridResult::Year { months, .. } => (None, Some(months)),
        };
        single
            .into_iter()
            .chain(months.into_iter().flat_map(|v| v.values()))
    }

    /// All cells of all sections.
    ///
    /// For a year the out-of-period days at the borders
    /// of the months appear twice.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.sections().flat_map(|v| v.cells.iter())
    }

    /// Header dates of the first section.
    pub fn header_dates(&self) -> Vec<NaiveDate> {
        self.sections()
            .next()
            .map(|v| v.header_dates())
            .unwrap_or_default()
    }

    /// All dates in the current period, in order.
    pub fn in_period_dates(&self) -> Vec<NaiveDate> {
        self.cells()
            .filter(|v| v.in_current_period)
            .map(|v| v.date)
            .collect()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.sections().map(|v| v.cells.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the dates to display.
///
/// The reference date can be any date of the wanted period.
///
/// Fails if the calendar system can't resolve the month or year
/// of the date, or the week at the borders of the date range.
pub fn compute_grid(
    reference: NaiveDate,
    mode: ViewMode,
    config: &CalendarConfig,
) -> Result<GridResult, CalendarError> {
    match mode {
        ViewMode::Day => Ok(GridResult::Period(PeriodGrid {
            period: DateRange::day(reference),
            cells: vec![GridCell::new(reference, true)],
        })),
        ViewMode::Week => {
            let period = config.week_interval(reference)?;
            Ok(GridResult::Period(PeriodGrid {
                period,
                cells: period.days().map(|v| GridCell::new(v, true)).collect(),
            }))
        }
        ViewMode::Month => Ok(GridResult::Period(month_grid(reference, config)?)),
        ViewMode::Year => {
            let calendar = config.calendar();
            let period = calendar.resolve_year(reference)?;
            let starts = calendar
                .month_starts(reference)
                .ok_or_else(|| CalendarError::unresolved(calendar.identifier(), reference))?;

            let mut months = BTreeMap::new();
            for start in starts {
                months.insert(start, month_grid(start, config)?);
            }
            Ok(GridResult::Year { period, months })
        }
    }
}

/// Month completed to full weeks.
fn month_grid(date: NaiveDate, config: &CalendarConfig) -> Result<PeriodGrid, CalendarError> {
    let period = config.calendar().resolve_month(date)?;
    let first_week = config.week_interval(period.start)?;
    let last_week = config.week_interval(period.last_day())?;

    let cells = DateRange::new(first_week.start, last_week.end)
        .days()
        .map(|v| GridCell::new(v, period.contains(v)))
        .collect();

    Ok(PeriodGrid { period, cells })
}

/// Computes grids for one configuration.
#[derive(Debug, Clone, Default)]
pub struct CalendarGridBuilder {
    config: CalendarConfig,
}

impl CalendarGridBuilder {
    pub fn new(config: CalendarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// See [compute_grid].
    pub fn compute(
        &self,
        reference: NaiveDate,
        mode: ViewMode,
    ) -> Result<GridResult, CalendarError> {
        compute_grid(reference, mode, &self.config)
    }
}
