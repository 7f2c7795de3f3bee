//! Register transfer and redirection

use super::{Flow, StepContext};
use crate::interpreter::errors::RuntimeError;
use crate::memory::tape::TapeError;
use crate::memory::Machine;
use tracing::trace;

/// Copy the current cell into the register
pub(crate) fn store(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    let operation = "store the current cell";
    let value = machine
        .tape
        .read()
        .map_err(|e| ctx.tape_fault(e, operation))?;
    machine
        .set_register_value(value)
        .map_err(|e| ctx.tape_fault(e, operation))?;
    Ok(Flow::Next)
}

/// Copy the register into the current cell
pub(crate) fn load(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    let operation = "load the register";
    let value = machine
        .register_value()
        .map_err(|e| ctx.tape_fault(e, operation))?;
    machine
        .tape
        .write(value)
        .map_err(|e| ctx.tape_fault(e, operation))?;
    Ok(Flow::Next)
}

/// Alias the register onto the cell under the cursor
pub(crate) fn redirect(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    if machine.tape.is_empty() {
        return Err(ctx.tape_fault(
            TapeError::Empty,
            "redirect the register",
        ));
    }
    let index = machine.tape.cursor();
    machine.register.redirect(index);
    trace!(index, "register redirected onto tape");
    Ok(Flow::Next)
}

pub(crate) fn clear_redirect(machine: &mut Machine) -> Result<Flow, RuntimeError> {
    machine.register.clear_redirect();
    Ok(Flow::Next)
}
