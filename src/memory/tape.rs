//! Memory tape
//!
//! This module provides the addressable byte memory of the interpreter:
//! - [`Tape`]: a row of 8-bit cells with a wraparound cursor
//! - [`TapeError`]: failures of tape operations
//!
//! # Wraparound
//!
//! Cell arithmetic wraps modulo 256 and the cursor wraps modulo the *current*
//! tape length. Because the extended dialects can insert and remove cells,
//! the modulus is always recomputed from `cells.len()`, never cached.
//!
//! # Error Handling
//!
//! Methods return `Result<_, TapeError>`; the engine lifts these into
//! `RuntimeError` together with the location of the offending instruction.

use std::fmt;

/// Failure of a tape operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapeError {
    /// The operation needs at least one cell but the tape has none
    Empty,
}

impl fmt::Display for TapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TapeError::Empty => write!(f, "tape has no cells"),
        }
    }
}

impl std::error::Error for TapeError {}

/// The interpreter's byte memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    cursor: usize,
    /// Length the tape returns to on reset
    capacity: usize,
}

impl Tape {
    /// Create a zeroed tape of `capacity` cells with the cursor on cell 0
    pub fn new(capacity: usize) -> Self {
        Tape {
            cells: vec![0; capacity],
            cursor: 0,
            capacity,
        }
    }

    /// Zero every cell, restore the construction length and home the cursor
    pub fn reset(&mut self) {
        self.cells.clear();
        self.cells.resize(self.capacity, 0);
        self.cursor = 0;
    }

    /// Copy `bytes` into the tape starting at cell 0.
    ///
    /// Returns the number of bytes that did not fit.
    pub fn seed(&mut self, bytes: &[u8]) -> usize {
        let fit = bytes.len().min(self.cells.len());
        self.cells[..fit].copy_from_slice(&bytes[..fit]);
        bytes.len() - fit
    }

    fn ensure_cells(&self) -> Result<(), TapeError> {
        if self.cells.is_empty() {
            Err(TapeError::Empty)
        } else {
            Ok(())
        }
    }

    /// Value of the cell under the cursor
    pub fn read(&self) -> Result<u8, TapeError> {
        self.cells.get(self.cursor).copied().ok_or(TapeError::Empty)
    }

    /// Overwrite the cell under the cursor
    pub fn write(&mut self, value: u8) -> Result<(), TapeError> {
        let cell = self.cells.get_mut(self.cursor).ok_or(TapeError::Empty)?;
        *cell = value;
        Ok(())
    }

    /// Add one to the current cell, wrapping 255 to 0
    pub fn increment(&mut self) -> Result<u8, TapeError> {
        let value = self.read()?.wrapping_add(1);
        self.write(value)?;
        Ok(value)
    }

    /// Subtract one from the current cell, wrapping 0 to 255
    pub fn decrement(&mut self) -> Result<u8, TapeError> {
        let value = self.read()?.wrapping_sub(1);
        self.write(value)?;
        Ok(value)
    }

    /// Move the cursor one cell right, wrapping at the end of the tape
    pub fn advance(&mut self) -> Result<usize, TapeError> {
        self.ensure_cells()?;
        self.cursor = (self.cursor + 1) % self.cells.len();
        Ok(self.cursor)
    }

    /// Move the cursor one cell left, wrapping at the start of the tape
    pub fn retreat(&mut self) -> Result<usize, TapeError> {
        self.ensure_cells()?;
        let len = self.cells.len();
        self.cursor = (self.cursor + len - 1) % len;
        Ok(self.cursor)
    }

    /// Insert a zero cell at the cursor, shifting later cells up one slot.
    ///
    /// The cursor stays on the new cell.
    pub fn insert(&mut self) -> Result<(), TapeError> {
        self.ensure_cells()?;
        self.cells.insert(self.cursor, 0);
        Ok(())
    }

    /// Remove the cell at the cursor, shifting later cells down one slot.
    ///
    /// Returns the removed value. The cursor is re-wrapped against the new
    /// length, so removing the last cell moves it back to cell 0.
    pub fn remove(&mut self) -> Result<u8, TapeError> {
        self.ensure_cells()?;
        let removed = self.cells.remove(self.cursor);
        if self.cells.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor %= self.cells.len();
        }
        Ok(removed)
    }

    /// Value of an arbitrary cell; `index` wraps modulo the current length
    pub fn get(&self, index: usize) -> Result<u8, TapeError> {
        self.ensure_cells()?;
        Ok(self.cells[index % self.cells.len()])
    }

    /// Overwrite an arbitrary cell; `index` wraps modulo the current length
    pub fn set(&mut self, index: usize, value: u8) -> Result<(), TapeError> {
        self.ensure_cells()?;
        let len = self.cells.len();
        self.cells[index % len] = value;
        Ok(())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells (for UI display)
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}
