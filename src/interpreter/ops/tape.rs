//! Cursor movement and tape growth

use super::{Flow, StepContext};
use crate::interpreter::errors::RuntimeError;
use crate::memory::Machine;

pub(crate) fn advance(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    machine
        .tape
        .advance()
        .map_err(|e| ctx.tape_fault(e, "move the cursor right"))?;
    Ok(Flow::Next)
}

pub(crate) fn retreat(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    machine
        .tape
        .retreat()
        .map_err(|e| ctx.tape_fault(e, "move the cursor left"))?;
    Ok(Flow::Next)
}

/// Insert a zero cell at the cursor
pub(crate) fn insert(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    machine
        .insert_cell()
        .map_err(|e| ctx.tape_fault(e, "insert a cell"))?;
    Ok(Flow::Next)
}

/// Remove the cell at the cursor
pub(crate) fn remove(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    machine
        .remove_cell()
        .map_err(|e| ctx.tape_fault(e, "remove a cell"))?;
    Ok(Flow::Next)
}
