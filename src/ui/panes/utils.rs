//! Helpers shared by the panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focused/unfocused border color
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// A cell value as `065 'A'`, or `010 '\x0a'` for non-printable bytes
pub(crate) fn format_byte(value: u8) -> String {
    if value.is_ascii_graphic() || value == b' ' {
        format!("{:03} '{}'", value, value as char)
    } else {
        format!("{:03} '\\x{:02x}'", value, value)
    }
}

/// Clamp `offset` so that `row` is inside a window of `visible` rows
pub(crate) fn scroll_to_row(offset: &mut usize, row: usize, visible: usize) {
    if row < *offset {
        *offset = row;
    } else if row >= *offset + visible {
        *offset = row + 1 - visible;
    }
}
