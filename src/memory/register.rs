//! Scratch register
//!
//! The register is a single byte of auxiliary storage. From the third
//! extended dialect on it can be redirected onto a tape cell: while the
//! redirection is active every register read and write goes through that
//! cell instead of the local accumulator.
//!
//! The alias names a cell, not a position: when a cell is inserted or
//! removed at or before it, [`Machine`](super::Machine) moves the index so
//! the register keeps pointing at the same value. If the aliased cell itself
//! is removed, the alias falls onto the cell that takes its place.

/// Which storage currently backs the register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterMode {
    /// The register's own byte
    #[default]
    Accumulator,
    /// An alias onto the tape cell at this index
    Indirect(usize),
}

/// Scratch register with optional tape redirection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Register {
    accumulator: u8,
    mode: RegisterMode,
}

impl Register {
    pub fn new() -> Self {
        Register::default()
    }

    pub fn mode(&self) -> RegisterMode {
        self.mode
    }

    /// The local accumulator, regardless of redirection
    pub fn accumulator(&self) -> u8 {
        self.accumulator
    }

    pub(crate) fn set_accumulator(&mut self, value: u8) {
        self.accumulator = value;
    }

    /// Alias the register onto the tape cell at `index`
    pub fn redirect(&mut self, index: usize) {
        self.mode = RegisterMode::Indirect(index);
    }

    /// Return to the plain accumulator; the accumulator keeps its old value
    pub fn clear_redirect(&mut self) {
        self.mode = RegisterMode::Accumulator;
    }

    pub fn reset(&mut self) {
        *self = Register::default();
    }
}
