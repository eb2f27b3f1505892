use crate::_private::NonExhaustive;
use crate::cache::GridCache;
use crate::calendar::event::CalOutcome;
use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::grid::{DateRange, GridResult};
use crate::mode::{NavDirection, ViewMode};
use chrono::{Days, Local, NaiveDate};
use log::warn;
use rat_event::{ct_event, ConsumedEvent, HandleEvent, MouseOnly, Regular};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use std::sync::Arc;

/// Minimum horizontal drag that counts as a swipe.
/// One day cell.
const SWIPE_WIDTH: u16 = 3;

/// Layout of one rendered period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SectionArea {
    pub(crate) period: DateRange,
    /// Row relative to the content.
    pub(crate) top: usize,
    pub(crate) height: usize,
}

/// State & event-handling.
#[derive(Debug)]
pub struct CalendarViewState {
    /// Total area.
    /// __readonly__. renewed for each render.
    pub area: Rect,
    /// Area inside the border.
    /// __readonly__. renewed for each render.
    pub inner: Rect,
    /// Visible day cells.
    /// __readonly__. renewed for each render.
    pub area_cells: Vec<(NaiveDate, Rect)>,
    /// Rendered periods.
    pub(crate) sections: Vec<SectionArea>,
    /// Rows of the rendered content.
    pub(crate) content_height: usize,

    /// Reference date.
    date: NaiveDate,
    mode: ViewMode,
    config: CalendarConfig,
    selected: Option<NaiveDate>,
    /// Scroll offset in rows. Year only.
    offset: usize,
    /// Scroll to the date with the next layout.
    scroll_to_date: bool,
    cache: GridCache,

    /// Focus
    /// __read+write__
    pub focus: FocusFlag,
    /// Start of a mouse drag.
    /// __read+write__
    pub drag_start: Option<(u16, u16)>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for CalendarViewState {
    fn default() -> Self {
        Self {
            area: Default::default(),
            inner: Default::default(),
            area_cells: Default::default(),
            sections: Default::default(),
            content_height: 0,
            date: Local::now().date_naive(),
            mode: Default::default(),
            config: Default::default(),
            selected: None,
            offset: 0,
            scroll_to_date: true,
            cache: Default::default(),
            focus: Default::default(),
            drag_start: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl Clone for CalendarViewState {
    fn clone(&self) -> Self {
        Self {
            area: self.area,
            inner: self.inner,
            area_cells: self.area_cells.clone(),
            sections: self.sections.clone(),
            content_height: self.content_height,
            date: self.date,
            mode: self.mode,
            config: self.config.clone(),
            selected: self.selected,
            offset: self.offset,
            scroll_to_date: self.scroll_to_date,
            cache: self.cache.clone(),
            focus: FocusFlag::named(&self.focus.name()),
            drag_start: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl HasFocus for CalendarViewState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

impl CalendarViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self {
            focus: FocusFlag::named(name),
            ..Default::default()
        }
    }

    /// Reference date. Any date of the displayed period.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Set the reference date.
    pub fn set_date(&mut self, date: NaiveDate) -> bool {
        let old = self.date;
        self.date = date;
        self.scroll_to_date = true;
        old != self.date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch the view mode. Keeps the date.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        let old = self.mode;
        self.mode = mode;
        if old != mode {
            self.offset = 0;
            self.scroll_to_date = true;
        }
        old != mode
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: CalendarConfig) {
        self.config = config;
        self.scroll_to_date = true;
    }

    /// Grid cache. Can be cleared to free memory.
    pub fn cache(&self) -> &GridCache {
        &self.cache
    }

    /// Replace the grid cache.
    pub fn set_cache(&mut self, cache: GridCache) {
        self.cache = cache;
    }

    /// The grid for the current date, view mode and configuration.
    pub fn grid(&self) -> Result<Arc<GridResult>, CalendarError> {
        self.cache.get_or_compute(self.date, self.mode, &self.config)
    }

    /// The displayed period.
    pub fn period(&self) -> Result<DateRange, CalendarError> {
        self.mode.period(self.date, &self.config)
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Select a date. Doesn't change the displayed period.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        let old = self.selected;
        self.selected = Some(date);
        old != self.selected
    }

    pub fn clear_selection(&mut self) -> bool {
        let old = self.selected;
        self.selected = None;
        old != self.selected
    }
}

impl CalendarViewState {
    /// Move one period in the given direction. The selection
    /// moves along, or is cleared if it can't be moved.
    ///
    /// A date that can't be moved is logged and leaves
    /// everything as it is.
    pub fn navigate(&mut self, direction: NavDirection) -> CalOutcome {
        match self.mode.navigate(self.date, direction, &self.config) {
            Ok(date) => {
                self.date = date;
                self.selected = self
                    .selected
                    .and_then(|v| self.mode.navigate(v, direction, &self.config).ok());
                self.offset = 0;
                self.scroll_to_date = true;
                CalOutcome::Moved(direction, self.mode)
            }
            Err(e) => {
                warn!("calendar navigation: {}", e);
                CalOutcome::Unchanged
            }
        }
    }

    /// Next period.
    pub fn advance(&mut self) -> CalOutcome {
        self.navigate(NavDirection::Forward)
    }

    /// Previous period.
    pub fn retreat(&mut self) -> CalOutcome {
        self.navigate(NavDirection::Backward)
    }

    /// Show and select today.
    pub fn move_to_today(&mut self) -> CalOutcome {
        self.move_to(Local::now().date_naive())
    }

    /// Show and select the given date.
    pub fn move_to(&mut self, date: NaiveDate) -> CalOutcome {
        let r = self.set_date(date) | self.select(date);
        if r {
            CalOutcome::Selected
        } else {
            CalOutcome::Unchanged
        }
    }

    /// Move the selection back n days.
    pub fn prev_day(&mut self, n: usize) -> CalOutcome {
        let base = self.selected.unwrap_or(self.date);
        match base.checked_sub_days(Days::new(n as u64)) {
            Some(date) => self.move_selection(date),
            None => CalOutcome::Unchanged,
        }
    }

    /// Move the selection forward n days.
    pub fn next_day(&mut self, n: usize) -> CalOutcome {
        let base = self.selected.unwrap_or(self.date);
        match base.checked_add_days(Days::new(n as u64)) {
            Some(date) => self.move_selection(date),
            None => CalOutcome::Unchanged,
        }
    }

    /// Select the date and follow with the displayed period
    /// if necessary.
    fn move_selection(&mut self, date: NaiveDate) -> CalOutcome {
        let visible = match self.period() {
            Ok(period) => period.contains(date),
            Err(_) => false,
        };
        if !visible {
            if let Err(e) = self.mode.period(date, &self.config) {
                warn!("calendar selection: {}", e);
                return CalOutcome::Unchanged;
            }
            self.date = date;
            self.offset = 0;
        }
        self.selected = Some(date);
        self.scroll_to_date = true;
        CalOutcome::Selected
    }
}

impl CalendarViewState {
    /// Scroll offset in rows.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Largest useful offset for the last layout.
    pub fn max_offset(&self) -> usize {
        self.content_height
            .saturating_sub(self.inner.height as usize)
    }

    pub fn set_offset(&mut self, offset: usize) -> bool {
        let old = self.offset;
        self.offset = offset.min(self.max_offset());
        old != self.offset
    }

    pub fn scroll_up(&mut self, n: usize) -> bool {
        self.set_offset(self.offset.saturating_sub(n))
    }

    pub fn scroll_down(&mut self, n: usize) -> bool {
        self.set_offset(self.offset.saturating_add(n))
    }

    /// Scroll the period containing the date into view.
    pub fn ensure_visible(&mut self, date: NaiveDate) -> bool {
        let Some(section) = self.sections.iter().find(|v| v.period.contains(date)) else {
            return false;
        };
        let page = self.inner.height as usize;
        let offset = if section.top < self.offset {
            section.top
        } else if section.top + section.height > self.offset + page {
            (section.top + section.height).saturating_sub(page).min(section.top)
        } else {
            self.offset
        };
        self.set_offset(offset)
    }

    /// Date of the cell at the given position.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<NaiveDate> {
        self.area_cells
            .iter()
            .find(|(_, area)| area.contains((x, y).into()))
            .map(|(date, _)| *date)
    }

    /// Called by the widget after computing the layout.
    pub(crate) fn set_layout(&mut self, content_height: usize, sections: Vec<SectionArea>) {
        self.content_height = content_height;
        self.sections = sections;
        self.offset = self.offset.min(self.max_offset());

        if self.scroll_to_date {
            self.scroll_to_date = false;
            let target = self
                .selected
                .filter(|d| self.sections.iter().any(|v| v.period.contains(*d)))
                .unwrap_or(self.date);
            self.ensure_visible(target);
        }
    }
}

impl HandleEvent<crossterm::event::Event, Regular, CalOutcome> for CalendarViewState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> CalOutcome {
        let r = if self.is_focused() {
            match event {
                ct_event!(keycode press CONTROL-Home) => self.move_to_today(),
                ct_event!(keycode press PageUp) => self.retreat(),
                ct_event!(keycode press PageDown) => self.advance(),
                ct_event!(keycode press Up) => self.prev_day(7),
                ct_event!(keycode press Down) => self.next_day(7),
                ct_event!(keycode press Left) => self.prev_day(1),
                ct_event!(keycode press Right) => self.next_day(1),
                _ => CalOutcome::Continue,
            }
        } else {
            CalOutcome::Continue
        };

        if r.is_consumed() {
            r
        } else {
            self.handle(event, MouseOnly)
        }
    }
}

impl HandleEvent<crossterm::event::Event, MouseOnly, CalOutcome> for CalendarViewState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: MouseOnly) -> CalOutcome {
        match event {
            ct_event!(mouse down Left for x, y) if self.area.contains((*x, *y).into()) => {
                self.drag_start = Some((*x, *y));
                if let Some(date) = self.cell_at(*x, *y) {
                    if self.select(date) {
                        CalOutcome::Selected
                    } else {
                        CalOutcome::Unchanged
                    }
                } else {
                    CalOutcome::Unchanged
                }
            }
            ct_event!(mouse up Left for x, _y) => {
                let Some((start_x, _)) = self.drag_start.take() else {
                    return CalOutcome::Continue;
                };
                if *x >= start_x.saturating_add(SWIPE_WIDTH) {
                    self.navigate(NavDirection::Backward)
                } else if x.saturating_add(SWIPE_WIDTH) <= start_x {
                    self.navigate(NavDirection::Forward)
                } else {
                    CalOutcome::Unchanged
                }
            }
            ct_event!(scroll up for x, y) if self.area.contains((*x, *y).into()) => {
                if self.mode.is_scrollable() {
                    self.scroll_up(1).into()
                } else {
                    self.retreat()
                }
            }
            ct_event!(scroll down for x, y) if self.area.contains((*x, *y).into()) => {
                if self.mode.is_scrollable() {
                    self.scroll_down(1).into()
                } else {
                    self.advance()
                }
            }
            _ => CalOutcome::Continue,
        }
    }
}
