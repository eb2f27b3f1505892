//!
//! Calendar view for ratatui.
//!
//! [CalendarView] renders the grid of a [CalendarViewState] for
//! any [ViewMode](crate::mode::ViewMode). Year views are laid out
//! as columns of months and can be scrolled.
//!
//! The state handles the navigation.
//! * PageUp/PageDown: previous/next period.
//! * Arrow keys: move the selection by a day or a week.
//! * Ctrl+Home: go to today.
//! * Mouse click selects a date, a horizontal drag swipes to the
//!   next/previous period. The wheel scrolls a year, or navigates
//!   for all other modes.
//!

pub(crate) mod event;
mod state;
mod style;
mod view;

pub use state::CalendarViewState;
pub use style::{CalendarBackground, CalendarOptions, CalendarStyle};
pub use view::CalendarView;
