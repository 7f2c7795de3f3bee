//! Memory model for the interpreter
//!
//! This module provides the core memory abstractions:
//! - [`tape`]: the byte tape with its wraparound cursor
//! - [`loop_stack`]: saved instruction positions for bracketed loops
//! - [`register`]: the scratch register and its redirection mode
//!
//! [`Machine`] bundles the three into the single owned state that every
//! command receives by exclusive reference.
//!
//! # Register Resolution
//!
//! Commands never touch the register's storage directly. They go through
//! [`Machine::register_value`] and [`Machine::set_register_value`], which
//! consult the [`RegisterMode`](register::RegisterMode):
//!
//! ```text
//! Accumulator     →  register.accumulator
//! Indirect(index) →  tape[index mod tape.len()]
//! ```

pub mod loop_stack;
pub mod register;
pub mod tape;

use loop_stack::LoopStack;
use register::{Register, RegisterMode};
use tape::{Tape, TapeError};

/// All mutable machine state owned by one interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub tape: Tape,
    pub loops: LoopStack,
    pub register: Register,
}

impl Machine {
    pub fn new(tape_length: usize) -> Self {
        Machine {
            tape: Tape::new(tape_length),
            loops: LoopStack::new(),
            register: Register::new(),
        }
    }

    /// Zero the tape, empty the loop stack and clear the register
    pub fn reset(&mut self) {
        self.tape.reset();
        self.loops.clear();
        self.register.reset();
    }

    /// Read "the register", following redirection onto the tape
    pub fn register_value(&self) -> Result<u8, TapeError> {
        match self.register.mode() {
            RegisterMode::Accumulator => Ok(self.register.accumulator()),
            RegisterMode::Indirect(index) => self.tape.get(index),
        }
    }

    /// Write "the register", following redirection onto the tape
    pub fn set_register_value(&mut self, value: u8) -> Result<(), TapeError> {
        match self.register.mode() {
            RegisterMode::Accumulator => {
                self.register.set_accumulator(value);
                Ok(())
            }
            RegisterMode::Indirect(index) => self.tape.set(index, value),
        }
    }

    /// Insert a zero cell at the cursor, keeping a redirected register on
    /// the cell it aliases
    pub fn insert_cell(&mut self) -> Result<(), TapeError> {
        let len = self.tape.len();
        self.tape.insert()?;
        if let RegisterMode::Indirect(index) = self.register.mode() {
            let index = index % len;
            if index >= self.tape.cursor() {
                self.register.redirect(index + 1);
            }
        }
        Ok(())
    }

    /// Remove the cell at the cursor, keeping a redirected register on the
    /// cell it aliases
    pub fn remove_cell(&mut self) -> Result<u8, TapeError> {
        let len = self.tape.len();
        let at = self.tape.cursor();
        let removed = self.tape.remove()?;
        if let RegisterMode::Indirect(index) = self.register.mode() {
            let index = index % len;
            if index > at {
                self.register.redirect(index - 1);
            }
        }
        Ok(removed)
    }
}
