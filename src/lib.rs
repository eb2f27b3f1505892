#![doc = include_str!("../readme.md")]
//
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]

pub mod event {
    //!
    //! Event-handler traits and outcomes.
    //!
    //! See [rat-event](https://docs.rs/rat-event/latest/rat_event/)
    //!
    pub use rat_event::*;

    pub use crate::calendar::event::CalOutcome;
}

/// Module for focus-handling functionality.
/// See [rat-focus](https://docs.rs/rat-focus)
pub mod focus {
    pub use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
}

pub mod cache;
pub mod calendar;
pub mod config;
pub mod error;
pub mod grid;
pub mod mode;
pub mod system;
mod util;

pub use cache::GridCache;
pub use config::{CalendarConfig, CalendarConfigBuilder};
pub use error::CalendarError;
pub use grid::{
    compute_grid, CalendarGridBuilder, DateRange, GridCell, GridResult, PeriodGrid,
};
pub use mode::{NavDirection, PeriodUnit, ViewMode};
pub use system::{Calendar, CalendarDate, CalendarSystem};

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
