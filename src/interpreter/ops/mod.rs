//! Command execution
//!
//! [`execute`] is the single dispatch point of the engine: an exhaustive
//! `match` over [`Command`] that hands the [`Machine`] (and the device, for
//! I/O) to the function implementing each command. Commands are grouped by
//! what they touch:
//! - [`unary`]: the current cell alone
//! - [`binary`]: the current cell combined with the register
//! - [`register`]: register transfer and redirection
//! - [`tape`]: cursor movement and tape growth
//! - [`io`]: the byte device
//!
//! Loop and jump commands live in `interpreter::loops` and
//! `interpreter::jumps` because they move the instruction pointer.

pub mod binary;
pub mod io;
pub mod register;
pub mod tape;
pub mod unary;

use crate::device::IoDevice;
use crate::dialect::Command;
use crate::interpreter::errors::{InstructionLocation, RuntimeError};
use crate::interpreter::{jumps, loops};
use crate::memory::tape::TapeError;
use crate::memory::Machine;

/// What the engine does with the instruction pointer after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Fall through to the next instruction
    Next,
    /// Set the pointer to this position; the normal advance follows
    Goto(usize),
    /// Stop issuing steps
    Halt,
}

/// Read-only facts about the step being executed
#[derive(Debug, Clone, Copy)]
pub(crate) struct StepContext {
    pub location: InstructionLocation,
    pub program_len: usize,
}

impl StepContext {
    pub fn ip(&self) -> usize {
        self.location.ip
    }

    /// Lift a tape failure into a located runtime error
    pub fn tape_fault(&self, error: TapeError, operation: &str) -> RuntimeError {
        match error {
            TapeError::Empty => RuntimeError::EmptyTape {
                operation: operation.to_string(),
                location: self.location,
            },
        }
    }
}

/// Apply `command` to the machine
pub(crate) fn execute(
    command: Command,
    machine: &mut Machine,
    device: &mut dyn IoDevice,
    ctx: &StepContext,
) -> Result<Flow, RuntimeError> {
    match command {
        Command::Increment => unary::increment(machine, ctx),
        Command::Decrement => unary::decrement(machine, ctx),
        Command::Advance => tape::advance(machine, ctx),
        Command::Retreat => tape::retreat(machine, ctx),
        Command::Output => io::output(machine, device, ctx),
        Command::Input => io::input(machine, device, ctx),
        Command::OpenLoop => loops::open_loop(machine, ctx),
        Command::CloseLoop => loops::close_loop(machine, ctx),

        Command::Halt => Ok(Flow::Halt),
        Command::Store => register::store(machine, ctx),
        Command::Load => register::load(machine, ctx),
        Command::ShiftRight => unary::shift_right(machine, ctx),
        Command::ShiftLeft => unary::shift_left(machine, ctx),
        Command::Not => unary::not(machine, ctx),
        Command::Xor | Command::And | Command::Or => binary::bitwise(command, machine, ctx),

        Command::Jump => jumps::jump(machine, ctx),
        Command::InsertCell => tape::insert(machine, ctx),
        Command::RemoveCell => tape::remove(machine, ctx),
        Command::Multiply
        | Command::Divide
        | Command::Add
        | Command::Subtract
        | Command::Modulo => binary::arithmetic(command, machine, ctx),

        Command::Redirect => register::redirect(machine, ctx),
        Command::ClearRedirect => register::clear_redirect(machine),
        Command::Literal(nibble) => unary::literal(nibble, machine, ctx),
        Command::Comment | Command::Reserved(_) => Ok(Flow::Next),
    }
}
