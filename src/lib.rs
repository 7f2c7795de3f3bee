//! # Introduction
//!
//! Tapestep interprets a family of four nested tape languages. Each level is
//! a strict superset of the one below it: level 0 is the classic eight
//! command byte-tape language, and levels 1 to 3 add a scratch register,
//! bitwise and arithmetic operations, halting, jumps, tape insertion and
//! removal, an initializer payload, hex literals and register redirection.
//!
//! Execution can be recorded as a snapshot after every step, and the
//! history is navigated forward and backward through a terminal UI built
//! with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Loader → Program → Interpreter → Device / Snapshots → TUI
//! ```
//!
//! 1. [`dialect`]: the command set of each level, merged into one flat table.
//! 2. [`loader`]: payload split, bracket validation and symbol filtering.
//! 3. [`interpreter`]: the step engine and the per-command operations.
//! 4. [`memory`]: the owned [`memory::Machine`] state (tape, loop stack and
//!    register).
//! 5. [`device`]: line-in / byte-out devices the program talks to.
//! 6. [`snapshot`]: snapshot history with a memory limit and a
//!    [`snapshot::MockTerminal`] that records output.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Quick start
//!
//! ```
//! use tapestep::device::BufferDevice;
//! use tapestep::dialect::DialectLevel;
//! use tapestep::interpreter::engine::execute;
//!
//! let mut device = BufferDevice::new();
//! let outcome = execute("++.", DialectLevel::Base, &mut device).unwrap();
//! assert_eq!(device.output(), &[2]);
//! assert_eq!(outcome.cycles, 3);
//! ```

pub mod device;
pub mod dialect;
pub mod interpreter;
pub mod loader;
pub mod memory;
pub mod snapshot;
pub mod ui;
