//! Commands that rewrite the current cell from its own value

use super::{Flow, StepContext};
use crate::interpreter::errors::RuntimeError;
use crate::memory::Machine;

/// Replace the current cell with `f(cell)`
fn rewrite_cell(
    machine: &mut Machine,
    ctx: &StepContext,
    operation: &str,
    f: impl FnOnce(u8) -> u8,
) -> Result<Flow, RuntimeError> {
    let value = machine
        .tape
        .read()
        .map_err(|e| ctx.tape_fault(e, operation))?;
    machine
        .tape
        .write(f(value))
        .map_err(|e| ctx.tape_fault(e, operation))?;
    Ok(Flow::Next)
}

pub(crate) fn increment(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    machine
        .tape
        .increment()
        .map_err(|e| ctx.tape_fault(e, "increment the current cell"))?;
    Ok(Flow::Next)
}

pub(crate) fn decrement(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    machine
        .tape
        .decrement()
        .map_err(|e| ctx.tape_fault(e, "decrement the current cell"))?;
    Ok(Flow::Next)
}

/// Logical shift right; the high bit is filled with zero
pub(crate) fn shift_right(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    rewrite_cell(machine, ctx, "shift the current cell", |v| v >> 1)
}

/// Shift left, dropping the bit shifted out of the byte
pub(crate) fn shift_left(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    rewrite_cell(machine, ctx, "shift the current cell", |v| v << 1)
}

pub(crate) fn not(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    rewrite_cell(machine, ctx, "invert the current cell", |v| !v)
}

/// Overwrite the current cell with `nibble * 16`
pub(crate) fn literal(
    nibble: u8,
    machine: &mut Machine,
    ctx: &StepContext,
) -> Result<Flow, RuntimeError> {
    machine
        .tape
        .write((nibble & 0x0f) << 4)
        .map_err(|e| ctx.tape_fault(e, "write a literal"))?;
    Ok(Flow::Next)
}
