//! Error types for the interpreter
//!
//! This module defines the two error families of a run:
//! - [`SyntaxError`]: unbalanced loop brackets, found by the loader before
//!   any instruction executes
//! - [`RuntimeError`]: fatal conditions met while executing a step
//!
//! [`Error`] wraps both for the one-call entry points. All runtime errors are
//! fatal: the step that raised them is not counted and execution stops.

use crate::loader::SourceLocation;
use std::fmt;

/// Where in the loaded program a runtime error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionLocation {
    /// Instruction pointer of the offending step
    pub ip: usize,
    /// Symbol at that position
    pub symbol: char,
    /// Position of the symbol in the source text
    pub source: SourceLocation,
}

impl fmt::Display for InstructionLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "instruction {} '{}' (line {}, column {})",
            self.ip, self.symbol, self.source.line, self.source.column
        )
    }
}

/// Bracket-balance failures detected at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A `]` appeared with no open loop before it
    UnexpectedClose { location: SourceLocation },

    /// The program ended with loops still open
    UnclosedOpen {
        count: usize,
        /// Position of the outermost `[` left open
        location: SourceLocation,
    },
}

impl SyntaxError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SyntaxError::UnexpectedClose { location } => *location,
            SyntaxError::UnclosedOpen { location, .. } => *location,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::UnexpectedClose { location } => {
                write!(
                    f,
                    "Unmatched ']' at line {}, column {}",
                    location.line, location.column
                )
            }
            SyntaxError::UnclosedOpen { count, location } => {
                write!(
                    f,
                    "{} unclosed '[' (first at line {}, column {})",
                    count, location.line, location.column
                )
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Fatal errors raised while executing a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Close-loop with nothing on the loop stack
    LoopStackUnderflow { location: InstructionLocation },

    /// Tape access while the tape has no cells
    EmptyTape {
        operation: String,
        location: InstructionLocation,
    },

    /// Division or modulo by a zero register
    DivisionByZero {
        operation: String,
        location: InstructionLocation,
    },

    /// The I/O device failed
    Io {
        message: String,
        location: InstructionLocation,
    },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History/snapshot navigation failed
    HistoryOperationFailed { message: String },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&InstructionLocation> {
        match self {
            RuntimeError::LoopStackUnderflow { location } => Some(location),
            RuntimeError::EmptyTape { location, .. } => Some(location),
            RuntimeError::DivisionByZero { location, .. } => Some(location),
            RuntimeError::Io { location, .. } => Some(location),
            RuntimeError::SnapshotLimitExceeded { .. } => None,
            RuntimeError::HistoryOperationFailed { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::LoopStackUnderflow { location } => {
                write!(f, "Loop stack underflow at {}", location)
            }
            RuntimeError::EmptyTape {
                operation,
                location,
            } => {
                write!(f, "Cannot {} on an empty tape at {}", operation, location)
            }
            RuntimeError::DivisionByZero {
                operation,
                location,
            } => {
                write!(f, "{} by zero register at {}", operation, location)
            }
            RuntimeError::Io { message, location } => {
                write!(f, "I/O failure at {}: {}", location, message)
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            RuntimeError::HistoryOperationFailed { message } => {
                write!(f, "History operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Any failure of a load-and-run call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Syntax(SyntaxError),
    Runtime(RuntimeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(e) => write!(f, "Syntax error: {}", e),
            Error::Runtime(e) => write!(f, "Runtime error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax(e) => Some(e),
            Error::Runtime(e) => Some(e),
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Syntax(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Error::Runtime(e)
    }
}
