pub mod alert;
pub mod delete_confirmation;
pub mod event_form;
pub mod help;
pub mod login;
pub mod search_panel;

use ratatui::{layout::Rect, Frame};

/// Centered dialog area, clamped to the terminal size.
pub fn centered_rect(f: &Frame, width: u16, height: u16) -> Rect {
    let area = f.size();
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
