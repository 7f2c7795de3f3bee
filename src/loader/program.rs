//! Loaded program representation

use crate::dialect::DialectLevel;

/// Position of a character in the source text (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// One kept symbol of the instruction stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub symbol: char,
    pub location: SourceLocation,
}

/// A normalized, immutable instruction sequence plus its initializer payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub(crate) level: DialectLevel,
    pub(crate) instructions: Vec<Instruction>,
    pub(crate) payload: Vec<u8>,
}

impl Program {
    pub fn level(&self) -> DialectLevel {
        self.level
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, ip: usize) -> Option<&Instruction> {
        self.instructions.get(ip)
    }

    /// Bytes seeded into the tape before the first step
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The kept symbols as a string (useful for display and tests)
    pub fn symbols(&self) -> String {
        self.instructions.iter().map(|i| i.symbol).collect()
    }
}
