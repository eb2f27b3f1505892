use crate::calendar::state::SectionArea;
use crate::calendar::style::{CalendarBackground, CalendarOptions, CalendarStyle};
use crate::calendar::CalendarViewState;
use crate::config::CalendarConfig;
use crate::grid::{GridCell, GridResult, PeriodGrid};
use crate::mode::ViewMode;
use crate::util::{line_area, revert_style};
use chrono::{Datelike, Local, NaiveDate};
use log::warn;
use rat_focus::HasFocus;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::cmp::max;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// Width of one day cell, including the gap.
const CELL_WIDTH: u16 = 3;
/// Width of one week row.
const SECTION_WIDTH: u16 = 7 * CELL_WIDTH;
/// Horizontal gap between the months of a year.
const SECTION_GAP: u16 = 2;

/// Renders the grid of a [CalendarViewState].
///
/// The grid comes from the state, the widget only decides
/// how it looks.
#[derive(Clone, Default)]
pub struct CalendarView<'a> {
    style: Style,
    title_style: Option<Style>,
    weekday_style: Option<Style>,
    day_style: Option<Style>,
    day_out_style: Option<Style>,
    weekend_style: Option<Style>,
    today_style: Option<Style>,
    select_style: Option<Style>,
    focus_style: Option<Style>,
    divider_style: Option<Style>,
    /// Styling for a single date.
    day_styles: Option<&'a HashMap<NaiveDate, Style>>,

    options: CalendarOptions,
    /// Overrides the current date.
    today: Option<NaiveDate>,

    /// Renders a date of the current period.
    date_fn: Option<&'a dyn Fn(NaiveDate) -> Span<'a>>,
    /// Renders a date outside the current period.
    date_out_fn: Option<&'a dyn Fn(NaiveDate) -> Span<'a>>,
    /// Renders the weekday header. Gets the dates of the first row.
    header_fn: Option<&'a dyn Fn(&[NaiveDate]) -> Line<'a>>,

    block: Option<Block<'a>>,
}

impl Debug for CalendarView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarView")
            .field("style", &self.style)
            .field("title_style", &self.title_style)
            .field("weekday_style", &self.weekday_style)
            .field("day_style", &self.day_style)
            .field("day_out_style", &self.day_out_style)
            .field("weekend_style", &self.weekend_style)
            .field("today_style", &self.today_style)
            .field("select_style", &self.select_style)
            .field("focus_style", &self.focus_style)
            .field("divider_style", &self.divider_style)
            .field("day_styles", &self.day_styles)
            .field("options", &self.options)
            .field("today", &self.today)
            .field("date_fn", &self.date_fn.map(|_| "... dyn Fn ..."))
            .field("date_out_fn", &self.date_out_fn.map(|_| "... dyn Fn ..."))
            .field("header_fn", &self.header_fn.map(|_| "... dyn Fn ..."))
            .field("block", &self.block)
            .finish()
    }
}

impl<'a> CalendarView<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the composite style.
    #[inline]
    pub fn styles(mut self, s: CalendarStyle) -> Self {
        self.style = s.style;
        if s.title.is_some() {
            self.title_style = s.title;
        }
        if s.weekday.is_some() {
            self.weekday_style = s.weekday;
        }
        if s.day.is_some() {
            self.day_style = s.day;
        }
        if s.day_out.is_some() {
            self.day_out_style = s.day_out;
        }
        if s.weekend.is_some() {
            self.weekend_style = s.weekend;
        }
        if s.today.is_some() {
            self.today_style = s.today;
        }
        if s.select.is_some() {
            self.select_style = s.select;
        }
        if s.focus.is_some() {
            self.focus_style = s.focus;
        }
        if s.divider.is_some() {
            self.divider_style = s.divider;
        }
        if s.block.is_some() {
            self.block = s.block;
        }
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Base style.
    #[inline]
    pub fn style(mut self, s: impl Into<Style>) -> Self {
        self.style = s.into();
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    #[inline]
    pub fn title_style(mut self, s: impl Into<Style>) -> Self {
        self.title_style = Some(s.into());
        self
    }

    #[inline]
    pub fn weekday_style(mut self, s: impl Into<Style>) -> Self {
        self.weekday_style = Some(s.into());
        self
    }

    /// Days of the current period.
    #[inline]
    pub fn day_style(mut self, s: impl Into<Style>) -> Self {
        self.day_style = Some(s.into());
        self
    }

    /// Days that only complete a week.
    #[inline]
    pub fn day_out_style(mut self, s: impl Into<Style>) -> Self {
        self.day_out_style = Some(s.into());
        self
    }

    /// Patched onto the configured weekend days.
    #[inline]
    pub fn weekend_style(mut self, s: impl Into<Style>) -> Self {
        self.weekend_style = Some(s.into());
        self
    }

    /// Patched onto today.
    #[inline]
    pub fn today_style(mut self, s: impl Into<Style>) -> Self {
        self.today_style = Some(s.into());
        self
    }

    #[inline]
    pub fn select_style(mut self, s: impl Into<Style>) -> Self {
        self.select_style = Some(s.into());
        self
    }

    #[inline]
    pub fn focus_style(mut self, s: impl Into<Style>) -> Self {
        self.focus_style = Some(s.into());
        self
    }

    #[inline]
    pub fn divider_style(mut self, s: impl Into<Style>) -> Self {
        self.divider_style = Some(s.into());
        self
    }

    /// Sets all the day-styles.
    #[inline]
    pub fn day_styles(mut self, styles: &'a HashMap<NaiveDate, Style>) -> Self {
        self.day_styles = Some(styles);
        self
    }

    /// All display switches.
    #[inline]
    pub fn options(mut self, options: CalendarOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn show_header(mut self, show: bool) -> Self {
        self.options.show_header = show;
        self
    }

    #[inline]
    pub fn show_date_out(mut self, show: bool) -> Self {
        self.options.show_date_out = show;
        self
    }

    #[inline]
    pub fn show_divider(mut self, show: bool) -> Self {
        self.options.show_divider = show;
        self
    }

    #[inline]
    pub fn highlight_today(mut self, highlight: bool) -> Self {
        self.options.highlight_today = highlight;
        self
    }

    #[inline]
    pub fn background(mut self, background: CalendarBackground) -> Self {
        self.options.background = background;
        self
    }

    /// Use this date as today instead of the local clock.
    #[inline]
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Render the dates of the current period.
    #[inline]
    pub fn date_fn(mut self, f: &'a dyn Fn(NaiveDate) -> Span<'a>) -> Self {
        self.date_fn = Some(f);
        self
    }

    /// Render the dates outside the current period.
    #[inline]
    pub fn date_out_fn(mut self, f: &'a dyn Fn(NaiveDate) -> Span<'a>) -> Self {
        self.date_out_fn = Some(f);
        self
    }

    /// Render the weekday header.
    #[inline]
    pub fn header_fn(mut self, f: &'a dyn Fn(&[NaiveDate]) -> Line<'a>) -> Self {
        self.header_fn = Some(f);
        self
    }

    /// Block
    #[inline]
    pub fn block(mut self, b: Block<'a>) -> Self {
        self.block = Some(b);
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Inherent width of one period.
    #[inline]
    pub fn width(&self) -> u16 {
        SECTION_WIDTH
    }

    /// Height of one rendered period.
    fn section_height(&self, grid: &PeriodGrid) -> usize {
        let title = if self.options.show_header { 1 } else { 0 };
        let divider = if self.options.show_divider { 1 } else { 0 };
        title + divider + 1 + grid.week_len()
    }
}

impl StatefulWidget for CalendarView<'_> {
    type State = CalendarViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

/// Resolved styles for one render.
struct Styles {
    title: Style,
    weekday: Style,
    day: Style,
    day_out: Style,
    weekend: Option<Style>,
    today: Style,
    select: Style,
    divider: Style,
}

fn render_ref(
    widget: &CalendarView<'_>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut CalendarViewState,
) {
    state.area = area;
    state.area_cells.clear();

    let block = if let Some(block) = widget.block.clone() {
        block
    } else {
        Block::new().style(widget.style)
    };
    state.inner = block.inner(area);
    block.render(area, buf);

    if let CalendarBackground::Visible(color) = widget.options.background {
        buf.set_style(state.inner, Style::new().bg(color));
    }

    let grid = match state.grid() {
        Ok(grid) => grid,
        Err(e) => {
            warn!("calendar render: {}", e);
            state.set_layout(0, Vec::new());
            return;
        }
    };

    let focus_style = widget.focus_style.unwrap_or(revert_style(widget.style));
    let select_style = if state.is_focused() {
        focus_style
    } else if let Some(select_style) = widget.select_style {
        select_style
    } else {
        revert_style(widget.style)
    };
    let day = widget.day_style.unwrap_or(widget.style);
    let styles = Styles {
        title: widget.title_style.unwrap_or(widget.style),
        weekday: widget.weekday_style.unwrap_or(widget.style),
        day,
        day_out: widget
            .day_out_style
            .unwrap_or(day.add_modifier(Modifier::DIM)),
        weekend: widget.weekend_style,
        today: widget
            .today_style
            .unwrap_or(Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
        select: select_style,
        divider: widget.divider_style.unwrap_or(widget.style),
    };

    let today = widget.today.unwrap_or_else(|| Local::now().date_naive());
    let config = state.config().clone();
    let mode = state.view_mode();
    let inner = state.inner;

    match grid.as_ref() {
        GridResult::Period(period) => {
            let height = widget.section_height(period);
            state.set_layout(
                height,
                vec![SectionArea {
                    period: period.period,
                    top: 0,
                    height,
                }],
            );
            let y = inner.y as i32 - state.offset() as i32;
            let title = section_title(mode, period, &config);
            render_section(
                widget,
                &styles,
                &config,
                period,
                &title,
                (inner.x, y),
                today,
                buf,
                state,
            );
        }
        GridResult::Year { months, .. } => {
            let cols = max(
                1,
                inner.width.saturating_add(SECTION_GAP) / (SECTION_WIDTH + SECTION_GAP),
            ) as usize;
            let sections = months.values().collect::<Vec<_>>();

            let mut layout = Vec::new();
            let mut top = 0;
            for row in sections.chunks(cols) {
                let height = row
                    .iter()
                    .map(|v| widget.section_height(v))
                    .max()
                    .unwrap_or_default();
                for grid in row {
                    layout.push(SectionArea {
                        period: grid.period,
                        top,
                        height,
                    });
                }
                top += height + 1;
            }
            state.set_layout(top.saturating_sub(1), layout.clone());

            for (i, (grid, section)) in sections.iter().zip(layout.iter()).enumerate() {
                let x = inner.x + (i % cols) as u16 * (SECTION_WIDTH + SECTION_GAP);
                let y = inner.y as i32 + section.top as i32 - state.offset() as i32;
                if y >= inner.bottom() as i32 || y + (section.height as i32) < inner.y as i32 {
                    continue;
                }
                let title = section_title(ViewMode::Month, grid, &config);
                render_section(
                    widget,
                    &styles,
                    &config,
                    grid,
                    &title,
                    (x, y),
                    today,
                    buf,
                    state,
                );
            }
        }
    }
}

/// Title for one period.
fn section_title(mode: ViewMode, grid: &PeriodGrid, config: &CalendarConfig) -> String {
    let start = grid.period.start;
    let gregorian = config.calendar().identifier() == "gregorian";
    match mode {
        ViewMode::Day => start
            .format_localized("%A %e %B %Y", config.locale())
            .to_string(),
        ViewMode::Week => format!(
            "{} - {}",
            start.format_localized("%e %b", config.locale()),
            grid.period.last_day().format_localized("%e %b %Y", config.locale())
        ),
        ViewMode::Month | ViewMode::Year => {
            if gregorian {
                start.format_localized("%B %Y", config.locale()).to_string()
            } else if let Some(ymd) = config.calendar().to_ymd(start) {
                format!("{:04}-{:02}", ymd.year, ymd.month)
            } else {
                start.format("%Y-%m").to_string()
            }
        }
    }
}

/// Label of the day in the configured calendar.
fn day_label(config: &CalendarConfig, date: NaiveDate) -> String {
    let day = config
        .calendar()
        .to_ymd(date)
        .map(|v| v.day)
        .unwrap_or(date.day());
    format!("{:>2}", day)
}

#[allow(clippy::too_many_arguments)]
fn render_section(
    widget: &CalendarView<'_>,
    styles: &Styles,
    config: &CalendarConfig,
    grid: &PeriodGrid,
    title: &str,
    (x, mut y): (u16, i32),
    today: NaiveDate,
    buf: &mut Buffer,
    state: &mut CalendarViewState,
) {
    let clip = state.inner;

    if widget.options.show_header {
        if let Some(area) = line_area(x, y, SECTION_WIDTH, clip) {
            Line::from(title.to_string())
                .style(styles.title)
                .centered()
                .render(area, buf);
        }
        y += 1;
    }
    if widget.options.show_divider {
        if let Some(area) = line_area(x, y, SECTION_WIDTH, clip) {
            Span::from("─".repeat(SECTION_WIDTH as usize))
                .style(styles.divider)
                .render(area, buf);
        }
        y += 1;
    }

    // week days
    if let Some(area) = line_area(x, y, SECTION_WIDTH, clip) {
        let header = grid.header_dates();
        if let Some(header_fn) = widget.header_fn {
            header_fn(header.as_slice()).render(area, buf);
        } else {
            for (i, date) in header.iter().enumerate() {
                let name = date.format_localized("%a", config.locale()).to_string();
                let name = name.chars().take(2).collect::<String>();
                let style = match styles.weekend {
                    Some(weekend) if config.is_weekend(date.weekday()) => {
                        styles.weekday.patch(weekend)
                    }
                    _ => styles.weekday,
                };
                let cell = Rect::new(x + i as u16 * CELL_WIDTH, area.y, 2, 1).intersection(clip);
                Span::from(format!("{:>2}", name))
                    .style(style)
                    .render(cell, buf);
            }
        }
    }
    y += 1;

    for week in grid.weeks() {
        if let Some(row) = line_area(x, y, SECTION_WIDTH, clip) {
            for (i, cell) in week.iter().enumerate() {
                let area = Rect::new(x + i as u16 * CELL_WIDTH, row.y, 2, 1).intersection(clip);
                if area.is_empty() {
                    continue;
                }
                render_cell(widget, styles, config, cell, area, today, buf, state);
            }
        }
        y += 1;
    }
}

#[allow(clippy::too_many_arguments)]
fn render_cell(
    widget: &CalendarView<'_>,
    styles: &Styles,
    config: &CalendarConfig,
    cell: &GridCell,
    area: Rect,
    today: NaiveDate,
    buf: &mut Buffer,
    state: &mut CalendarViewState,
) {
    if !cell.in_current_period && !widget.options.show_date_out {
        return;
    }

    let style = calc_day_style(widget, styles, config, cell, today, state.selected());
    let span = match (cell.in_current_period, widget.date_fn, widget.date_out_fn) {
        (true, Some(date_fn), _) => date_fn(cell.date),
        (false, _, Some(date_out_fn)) => date_out_fn(cell.date),
        _ => Span::from(day_label(config, cell.date)),
    };
    let span_style = style.patch(span.style);
    span.style(span_style).render(area, buf);

    if cell.in_current_period {
        state.area_cells.push((cell.date, area));
    }
}

fn calc_day_style(
    widget: &CalendarView<'_>,
    styles: &Styles,
    config: &CalendarConfig,
    cell: &GridCell,
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> Style {
    let mut style = if cell.in_current_period {
        styles.day
    } else {
        styles.day_out
    };
    if let Some(weekend) = styles.weekend {
        if config.is_weekend(cell.date.weekday()) {
            style = style.patch(weekend);
        }
    }
    if let Some(day_styles) = widget.day_styles {
        if let Some(day_style) = day_styles.get(&cell.date) {
            style = style.patch(*day_style);
        }
    }
    if widget.options.highlight_today && cell.date == today {
        style = style.patch(styles.today);
    }
    if cell.in_current_period && selected == Some(cell.date) {
        style = style.patch(styles.select);
    }
    style
}
