//!
//! Small helpers.
//!
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use std::mem;

/// Returns a new style with fg and bg swapped.
///
/// This is not the same as setting Style::reversed().
/// The latter sends special controls to the terminal,
/// the former just swaps.
pub(crate) fn revert_style(mut style: Style) -> Style {
    if style.fg.is_some() || style.bg.is_some() {
        mem::swap(&mut style.fg, &mut style.bg);
        style
    } else {
        style.black().on_white()
    }
}

/// Area of a single line at a possibly scrolled-out row.
/// Returns None if nothing of the line is visible.
pub(crate) fn line_area(x: u16, y: i32, width: u16, clip: Rect) -> Option<Rect> {
    if y < clip.y as i32 || y >= clip.bottom() as i32 {
        return None;
    }
    let area = Rect::new(x, y as u16, width, 1).intersection(clip);
    if area.is_empty() {
        None
    } else {
        Some(area)
    }
}
