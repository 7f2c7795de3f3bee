//! Commands combining the current cell with the register
//!
//! Every operation computes `cell OP register`, reduces the result modulo
//! 256 to a non-negative byte, and stores it in the current cell. "The
//! register" is resolved through [`Machine::register_value`], so an active
//! redirection is honoured.

use super::{Flow, StepContext};
use crate::dialect::Command;
use crate::interpreter::errors::RuntimeError;
use crate::memory::Machine;

/// Both operands of a binary command
fn operands(
    machine: &Machine,
    ctx: &StepContext,
    operation: &str,
) -> Result<(u8, u8), RuntimeError> {
    let cell = machine
        .tape
        .read()
        .map_err(|e| ctx.tape_fault(e, operation))?;
    let register = machine
        .register_value()
        .map_err(|e| ctx.tape_fault(e, operation))?;
    Ok((cell, register))
}

fn store_cell(
    machine: &mut Machine,
    ctx: &StepContext,
    operation: &str,
    value: i32,
) -> Result<Flow, RuntimeError> {
    machine
        .tape
        .write(value.rem_euclid(256) as u8)
        .map_err(|e| ctx.tape_fault(e, operation))?;
    Ok(Flow::Next)
}

/// `^`, `&` and `|`
pub(crate) fn bitwise(
    command: Command,
    machine: &mut Machine,
    ctx: &StepContext,
) -> Result<Flow, RuntimeError> {
    let operation = "combine the current cell with the register";
    let (cell, register) = operands(machine, ctx, operation)?;
    let result = match command {
        Command::Xor => cell ^ register,
        Command::And => cell & register,
        Command::Or => cell | register,
        other => unreachable!("{:?} is not a bitwise command", other),
    };
    store_cell(machine, ctx, operation, i32::from(result))
}

/// `*`, `/`, `=`, `_` and `%`
pub(crate) fn arithmetic(
    command: Command,
    machine: &mut Machine,
    ctx: &StepContext,
) -> Result<Flow, RuntimeError> {
    let operation = "apply register arithmetic";
    let (cell, register) = operands(machine, ctx, operation)?;
    let (a, b) = (i32::from(cell), i32::from(register));

    let result = match command {
        Command::Multiply => a * b,
        Command::Add => a + b,
        Command::Subtract => a - b,
        Command::Divide | Command::Modulo => {
            if b == 0 {
                let name = if command == Command::Divide {
                    "Division"
                } else {
                    "Modulo"
                };
                return Err(RuntimeError::DivisionByZero {
                    operation: name.to_string(),
                    location: ctx.location,
                });
            }
            // Rust's `/` truncates toward zero
            if command == Command::Divide {
                a / b
            } else {
                a % b
            }
        }
        other => unreachable!("{:?} is not an arithmetic command", other),
    };
    store_cell(machine, ctx, operation, result)
}
