//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility for maintainability.
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with per-command coloring and the current instruction
//! - [`tape`]: Tape cells with the cursor and the register's target highlighted
//! - [`loops`]: Instruction pointer, cycle count, register and loop stack
//! - [`terminal`]: Bytes written by output commands
//! - [`status`]: Status bar with keybindings and execution state
//! - `utils`: Shared block, scrolling and byte formatting helpers
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*_pane()` function and, where
//! the pane scrolls, its scroll state type.

mod utils;

pub mod loops;
pub mod source;
pub mod status;
pub mod tape;
pub mod terminal;

// Re-export render functions for convenience
pub use loops::{render_loops_pane, LoopsRenderData};
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tape::{render_tape_pane, TapeScrollState};
pub use terminal::render_terminal_pane;
