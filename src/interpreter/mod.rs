//! Interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the fetch/decode/execute loop, configuration and history
//! - [`ops`]: one function per command, dispatched by an exhaustive match
//! - `loops` / `jumps`: commands that move the instruction pointer
//! - [`errors`]: syntax and runtime error types
//! - [`constants`]: configuration defaults
//!
//! # Execution Model
//!
//! Each step fetches the symbol under the instruction pointer, resolves it in
//! the level's command table and applies the command to the machine. The
//! pointer then advances by one and the cycle counter by one. A halt command
//! only sets a flag; the run loop sees it and returns to the caller.
//!
//! When history is enabled a snapshot is taken after every step to support
//! stepping backward and forward through the run.

pub mod constants;
pub mod engine;
pub mod errors;
pub(crate) mod jumps;
pub(crate) mod loops;
pub mod ops;
