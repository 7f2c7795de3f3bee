//! Tape pane rendering
//!
//! Cells are laid out in rows of as many cells as the pane width allows,
//! each row labelled with the index of its first cell. The cell under the
//! cursor is shown in reverse color and the cell the register is redirected
//! onto (if any) in the register color. The pane scrolls itself to keep the
//! cursor row visible.

use super::utils::{format_byte, pane_block, scroll_to_row};
use crate::memory::register::{Register, RegisterMode};
use crate::memory::tape::Tape;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Width of the `0000 │ ` row label
const LABEL_WIDTH: usize = 7;
/// Width of one rendered cell, including its separator
const CELL_WIDTH: usize = 4;

/// Scroll state for the tape pane
#[derive(Debug, Default)]
pub struct TapeScrollState {
    pub offset: usize,
    /// Cursor position at the last render (for smart auto-scroll)
    pub prev_cursor: Option<usize>,
}

/// Number of cells that fit on one row of `content_width` columns
pub(crate) fn cells_per_row(content_width: usize) -> usize {
    (content_width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH).clamp(1, 32)
}

/// Render the tape pane
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    tape: &Tape,
    register: &Register,
    is_focused: bool,
    scroll_state: &mut TapeScrollState,
) {
    let title = format!(" Tape ({} cells, cursor {}) ", tape.len(), tape.cursor());
    let block = pane_block(&title, is_focused);

    if tape.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let content_width = area.width.saturating_sub(2) as usize;
    let visible_height = area.height.saturating_sub(3).max(1) as usize; // borders + value line
    let per_row = cells_per_row(content_width);
    let total_rows = tape.len().div_ceil(per_row);

    // Follow the cursor only when it moved, so manual scrolling sticks
    if scroll_state.prev_cursor != Some(tape.cursor()) {
        scroll_to_row(&mut scroll_state.offset, tape.cursor() / per_row, visible_height);
        scroll_state.prev_cursor = Some(tape.cursor());
    }
    scroll_state.offset = scroll_state
        .offset
        .min(total_rows.saturating_sub(visible_height));

    let target = match register.mode() {
        RegisterMode::Indirect(index) => Some(index % tape.len()),
        RegisterMode::Accumulator => None,
    };

    let mut items = Vec::with_capacity(visible_height + 1);

    // Value line for the current cell
    let current = tape.cells()[tape.cursor()];
    items.push(ListItem::new(Line::from(vec![
        Span::styled("cell ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("[{}] ", tape.cursor()),
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
        Span::styled(format_byte(current), Style::default().fg(DEFAULT_THEME.number)),
    ])));

    for row in (scroll_state.offset..total_rows).take(visible_height) {
        let start = row * per_row;
        let end = (start + per_row).min(tape.len());

        let mut spans = vec![Span::styled(
            format!("{:04} │ ", start),
            Style::default().fg(DEFAULT_THEME.comment),
        )];

        for (index, value) in tape.cells()[start..end].iter().enumerate() {
            let index = start + index;
            let style = if index == tape.cursor() {
                Style::default()
                    .bg(DEFAULT_THEME.secondary)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if Some(index) == target {
                Style::default()
                    .fg(DEFAULT_THEME.register)
                    .add_modifier(Modifier::BOLD)
            } else if *value == 0 {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.number)
            };
            spans.push(Span::styled(format!("{:03}", value), style));
            spans.push(Span::raw(" "));
        }

        items.push(ListItem::new(Line::from(spans)));
    }

    frame.render_widget(List::new(items).block(block), area);
}
