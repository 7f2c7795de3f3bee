//! Machine state pane: instruction pointer, register and loop stack
//!
//! # Layout
//!
//! - Instruction pointer, program length and executed cycles
//! - Register value and whether it is redirected onto the tape
//! - Open loops, innermost first, with the source position of their `[`

use super::utils::{format_byte, pane_block};
use crate::loader::Program;
use crate::memory::register::RegisterMode;
use crate::memory::Machine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Data needed to render the machine state pane
pub struct LoopsRenderData<'a> {
    pub machine: &'a Machine,
    pub program: &'a Program,
    pub ip: usize,
    pub cycles: u64,
    pub halted: bool,
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{:<10}", text), Style::default().fg(DEFAULT_THEME.comment))
}

/// Render the machine state pane
pub fn render_loops_pane(
    frame: &mut Frame,
    area: Rect,
    data: LoopsRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Machine ", is_focused);
    let mut items: Vec<ListItem> = Vec::new();

    let ip_text = if data.halted {
        "halted".to_string()
    } else if data.ip >= data.program.len() {
        format!("end ({})", data.program.len())
    } else {
        format!("{} / {}", data.ip, data.program.len())
    };
    items.push(ListItem::new(Line::from(vec![
        label("ip"),
        Span::styled(ip_text, Style::default().fg(DEFAULT_THEME.secondary)),
    ])));
    items.push(ListItem::new(Line::from(vec![
        label("cycles"),
        Span::styled(
            data.cycles.to_string(),
            Style::default().fg(DEFAULT_THEME.number),
        ),
    ])));

    let register_value = match data.machine.register_value() {
        Ok(value) => format_byte(value),
        Err(_) => "(no cell)".to_string(),
    };
    let mode = match data.machine.register.mode() {
        RegisterMode::Accumulator => "local".to_string(),
        RegisterMode::Indirect(index) => format!("→ cell {}", index),
    };
    items.push(ListItem::new(Line::from(vec![
        label("register"),
        Span::styled(
            register_value,
            Style::default()
                .fg(DEFAULT_THEME.register)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", mode), Style::default().fg(DEFAULT_THEME.comment)),
    ])));

    items.push(ListItem::new(""));
    items.push(ListItem::new(Span::styled(
        format!("Loops (depth {})", data.machine.loops.depth()),
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
    )));

    if data.machine.loops.is_empty() {
        items.push(ListItem::new(Span::styled(
            "  (none)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    }

    for (depth, &open_ip) in data.machine.loops.entries().iter().enumerate().rev() {
        let position = match data.program.get(open_ip) {
            Some(instruction) => format!(
                "line {}, col {}",
                instruction.location.line, instruction.location.column
            ),
            None => "?".to_string(),
        };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                format!("  #{:<3}", depth),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(
                format!("ip {:<6}", open_ip),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
            Span::styled(position, Style::default().fg(DEFAULT_THEME.type_name)),
        ])));
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = (*scroll_offset).min(items.len().saturating_sub(visible_height));

    let visible: Vec<ListItem> = items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible).block(block), area);
}
