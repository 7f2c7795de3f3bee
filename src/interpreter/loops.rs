//! Bracketed loop execution (`[` and `]`).
//!
//! Loop matching needs no precomputed jump table. `[` pushes its own
//! instruction pointer unconditionally, so a loop body always runs at least
//! once. `]` looks at the current cell:
//!
//! ```text
//! cell != 0  →  ip := top of stack   (engine advance lands just past `[`)
//! cell == 0  →  pop                  (engine advance leaves the loop)
//! ```
//!
//! Each step is O(1); the stack holds one entry per open loop.

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::ops::{Flow, StepContext};
use crate::memory::Machine;
use tracing::trace;

/// `[`: remember where the loop body starts
pub(crate) fn open_loop(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    machine.loops.push(ctx.ip());
    trace!(ip = ctx.ip(), depth = machine.loops.depth(), "opening loop");
    Ok(Flow::Next)
}

/// `]`: repeat the innermost loop or leave it
pub(crate) fn close_loop(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    let cell = machine
        .tape
        .read()
        .map_err(|e| ctx.tape_fault(e, "test the loop condition"))?;

    if cell != 0 {
        let start = machine
            .loops
            .peek()
            .ok_or(RuntimeError::LoopStackUnderflow {
                location: ctx.location,
            })?;
        trace!(ip = ctx.ip(), start, "closing loop, looping");
        Ok(Flow::Goto(start))
    } else {
        machine
            .loops
            .pop()
            .ok_or(RuntimeError::LoopStackUnderflow {
                location: ctx.location,
            })?;
        trace!(ip = ctx.ip(), "closing loop, end loop");
        Ok(Flow::Next)
    }
}
