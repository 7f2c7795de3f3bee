//! Terminal output pane rendering

use super::utils::pane_block;
use crate::snapshot::MockTerminal;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the bytes written so far.
///
/// `scroll_offset` is `None` while the pane follows the newest output; the
/// user scrolling the pane pins it to a row.
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    terminal: &MockTerminal,
    is_focused: bool,
    scroll_offset: &mut Option<usize>,
) {
    let title = format!(" Output ({} bytes) ", terminal.bytes().len());
    let block = pane_block(&title, is_focused);

    let lines = terminal.get_output();

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    let max_scroll = lines.len().saturating_sub(visible_height);

    let offset = match scroll_offset {
        Some(offset) => {
            *offset = (*offset).min(max_scroll);
            *offset
        }
        None => max_scroll,
    };

    let visible_items: Vec<ListItem> = lines
        .iter()
        .skip(offset)
        .take(visible_height)
        .map(|line| ListItem::new(line.as_str()).style(Style::default().fg(DEFAULT_THEME.fg)))
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
