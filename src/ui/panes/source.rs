//! Source code pane rendering with command highlighting
//!
//! This module renders the source code pane, which displays the program
//! being executed with every character colored by what it does in the active
//! dialect.
//!
//! # Features
//!
//! - Coloring by command group: loops, I/O, register, tape, literals
//! - Characters the dialect ignores are dimmed like comments
//! - The next instruction is shown in reverse video on a highlighted line
//! - The line of a fatal error is painted red
//! - Line numbering and a scroll state that keeps the current line in place

use super::utils::pane_block;
use crate::dialect::{Command, CommandTable};
use crate::loader::SourceLocation;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Style of one source character under `table`
fn symbol_style(table: &CommandTable, symbol: char) -> Style {
    let Some(command) = table.resolve(symbol) else {
        return Style::default().fg(DEFAULT_THEME.comment);
    };

    match command {
        Command::OpenLoop | Command::CloseLoop | Command::Jump | Command::Halt => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        Command::Input | Command::Output => Style::default().fg(DEFAULT_THEME.secondary),
        Command::Advance | Command::Retreat | Command::InsertCell | Command::RemoveCell => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        Command::Redirect | Command::ClearRedirect => Style::default().fg(DEFAULT_THEME.register),
        Command::Literal(_) => Style::default().fg(DEFAULT_THEME.number),
        Command::Comment | Command::Reserved(_) => Style::default()
            .fg(DEFAULT_THEME.comment)
            .add_modifier(Modifier::ITALIC),
        c if c.uses_register() => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Color every character of `line`; `current_column` marks the next instruction
fn highlight_source_line<'a>(
    line: &'a str,
    table: &CommandTable,
    current_column: Option<usize>,
) -> Vec<Span<'a>> {
    line.chars()
        .enumerate()
        .map(|(idx, symbol)| {
            let mut style = symbol_style(table, symbol);
            if current_column == Some(idx + 1) {
                style = style
                    .add_modifier(Modifier::REVERSED)
                    .add_modifier(Modifier::BOLD);
            }
            Span::styled(symbol.to_string(), style)
        })
        .collect()
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

impl Default for SourceScrollState {
    fn default() -> Self {
        SourceScrollState {
            offset: 0,
            target_line_row: None, // Centered on first render
        }
    }
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub table: &'a CommandTable,
    /// Position of the next instruction (None once the program has ended)
    pub current: Option<SourceLocation>,
    /// Position of the instruction that raised a fatal error
    pub error: Option<SourceLocation>,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = pane_block(" Source Code ", is_focused);

    let lines: Vec<&str> = data.source_code.lines().collect();
    let total_lines = lines.len();
    let focus = data.error.or(data.current);
    let current_line = focus.map_or(0, |loc| loc.line);

    // Calculate visible range
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Get the target row, centering it the first time and clamping to stay within visible area
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Calculate scroll offset to keep current line at target visual row
    if current_line > 0 && current_line <= total_lines {
        let target_line_idx = current_line - 1; // Convert to 0-based
        scroll_state.offset = target_line_idx.saturating_sub(target_row);

        // Clamp scroll offset to valid range
        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;
            let is_error = is_current && data.error.is_some();
            let line_num_str = format!("{:4} ", line_num);

            let column = focus.filter(|_| is_current).map(|loc| loc.column);
            let mut spans = highlight_source_line(line, data.table, column);

            let num_style = if is_error {
                // ERROR LINE: Red background with white text
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut spans {
                    span.style = span.style.patch(error_style);
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                for span in &mut spans {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectLevel;

    #[test]
    fn test_highlight_marks_current_column() {
        let table = CommandTable::for_level(DialectLevel::Base);
        let spans = highlight_source_line("+a[", &table, Some(3));

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].style.fg, Some(DEFAULT_THEME.comment));
        assert!(spans[2].style.add_modifier.contains(Modifier::REVERSED));
        assert!(!spans[0].style.add_modifier.contains(Modifier::REVERSED));
    }
}
