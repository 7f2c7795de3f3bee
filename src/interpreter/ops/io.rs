//! Byte device commands

use super::{Flow, StepContext};
use crate::device::IoDevice;
use crate::interpreter::errors::RuntimeError;
use crate::memory::tape::TapeError;
use crate::memory::Machine;

/// Write the current cell to the device
pub(crate) fn output(
    machine: &mut Machine,
    device: &mut dyn IoDevice,
    ctx: &StepContext,
) -> Result<Flow, RuntimeError> {
    let value = machine
        .tape
        .read()
        .map_err(|e| ctx.tape_fault(e, "output the current cell"))?;
    device.write_byte(value).map_err(|e| RuntimeError::Io {
        message: e.to_string(),
        location: ctx.location,
    })?;
    Ok(Flow::Next)
}

/// Read one line and store its first byte in the current cell.
///
/// An empty line stores the newline that ended it; end of input stores 0.
pub(crate) fn input(
    machine: &mut Machine,
    device: &mut dyn IoDevice,
    ctx: &StepContext,
) -> Result<Flow, RuntimeError> {
    if machine.tape.is_empty() {
        return Err(ctx.tape_fault(
            TapeError::Empty,
            "read input into the current cell",
        ));
    }

    let line = device.read_line().map_err(|e| RuntimeError::Io {
        message: e.to_string(),
        location: ctx.location,
    })?;
    let value = match line {
        Some(line) => line.bytes().next().unwrap_or(b'\n'),
        None => 0,
    };

    machine
        .tape
        .write(value)
        .map_err(|e| ctx.tape_fault(e, "read input into the current cell"))?;
    Ok(Flow::Next)
}
