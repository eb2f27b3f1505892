use crate::_private::NonExhaustive;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Composite style for the calendar.
#[derive(Debug, Clone)]
pub struct CalendarStyle {
    pub style: Style,
    /// Month/period title.
    pub title: Option<Style>,
    /// Weekday header.
    pub weekday: Option<Style>,
    /// Days in the current period.
    pub day: Option<Style>,
    /// Days that only complete a week.
    pub day_out: Option<Style>,
    /// Patched onto weekend days.
    pub weekend: Option<Style>,
    /// Patched onto today.
    pub today: Option<Style>,
    pub select: Option<Style>,
    pub focus: Option<Style>,
    /// Line below the title.
    pub divider: Option<Style>,
    pub block: Option<Block<'static>>,
    pub non_exhaustive: NonExhaustive,
}

impl Default for CalendarStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            title: None,
            weekday: None,
            day: None,
            day_out: None,
            weekend: None,
            today: None,
            select: None,
            focus: None,
            divider: None,
            block: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

/// Background behind the grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalendarBackground {
    /// Keep whatever the base style says.
    #[default]
    Hidden,
    /// Fill the inner area with this color.
    Visible(Color),
}

/// Display switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalendarOptions {
    /// Show the title of each period/month.
    pub show_header: bool,
    /// Show the days before and after the month.
    pub show_date_out: bool,
    /// Show a line below the title.
    pub show_divider: bool,
    /// Highlight the current day.
    pub highlight_today: bool,
    pub background: CalendarBackground,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            show_header: true,
            show_date_out: true,
            show_divider: true,
            highlight_today: true,
            background: CalendarBackground::Hidden,
        }
    }
}
