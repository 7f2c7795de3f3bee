//! Dialect levels and their command tables
//!
//! The instruction set grows in four strictly additive levels:
//! - [`base`]: the eight classic tape commands
//! - [`bitwise`]: halt, register store/load, shifts and bitwise logic
//! - [`arithmetic`]: jumps, tape growth, register arithmetic, initializer payloads
//! - [`indirect`]: register redirection, nibble literals, comments, reserved no-ops
//!
//! Each level contributes one table fragment. [`CommandTable::for_level`]
//! merges the fragments of every level up to the selected one into a single
//! flat symbol → [`Command`] map, so dispatch never depends on which level
//! introduced a binding.

pub mod arithmetic;
pub mod base;
pub mod bitwise;
pub mod indirect;

use crate::interpreter::constants::{BASE_TAPE_LENGTH, EXTENDED_TAPE_LENGTH};
use rustc_hash::FxHashMap;
use std::fmt;

/// Placeholder commands of the third extended dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reserved {
    Lock,
    Unlock,
    MoveCursor,
}

/// One decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Level 0
    Increment,
    Decrement,
    Advance,
    Retreat,
    Output,
    Input,
    OpenLoop,
    CloseLoop,

    // Level 1
    Halt,
    Store,
    Load,
    ShiftRight,
    ShiftLeft,
    Not,
    Xor,
    And,
    Or,

    // Level 2
    Jump,
    InsertCell,
    RemoveCell,
    Multiply,
    Divide,
    Add,
    Subtract,
    Modulo,

    // Level 3
    Redirect,
    ClearRedirect,
    /// Overwrite the current cell with `nibble * 16`
    Literal(u8),
    Comment,
    Reserved(Reserved),
}

impl Command {
    /// Whether the command reads or writes the scratch register
    pub fn uses_register(&self) -> bool {
        matches!(
            self,
            Command::Store
                | Command::Load
                | Command::Xor
                | Command::And
                | Command::Or
                | Command::Jump
                | Command::Multiply
                | Command::Divide
                | Command::Add
                | Command::Subtract
                | Command::Modulo
        )
    }
}

/// Instruction-set level selected at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DialectLevel {
    Base,
    Extended1,
    Extended2,
    Extended3,
}

impl DialectLevel {
    pub const ALL: [DialectLevel; 4] = [
        DialectLevel::Base,
        DialectLevel::Extended1,
        DialectLevel::Extended2,
        DialectLevel::Extended3,
    ];

    /// Level from its numeric selector (0..=3)
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        match self {
            DialectLevel::Base => 0,
            DialectLevel::Extended1 => 1,
            DialectLevel::Extended2 => 2,
            DialectLevel::Extended3 => 3,
        }
    }

    /// Whether source text may carry a trailing initializer payload
    pub fn supports_payload(self) -> bool {
        self >= DialectLevel::Extended2
    }

    /// Tape length used when the caller does not choose one
    pub fn default_tape_length(self) -> usize {
        match self {
            DialectLevel::Base => BASE_TAPE_LENGTH,
            _ => EXTENDED_TAPE_LENGTH,
        }
    }

    /// The bindings this level adds on top of the previous one
    pub fn fragment(self) -> &'static [(char, Command)] {
        match self {
            DialectLevel::Base => base::BINDINGS,
            DialectLevel::Extended1 => bitwise::BINDINGS,
            DialectLevel::Extended2 => arithmetic::BINDINGS,
            DialectLevel::Extended3 => indirect::BINDINGS,
        }
    }
}

impl fmt::Display for DialectLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectLevel::Base => write!(f, "base"),
            DialectLevel::Extended1 => write!(f, "extended I"),
            DialectLevel::Extended2 => write!(f, "extended II"),
            DialectLevel::Extended3 => write!(f, "extended III"),
        }
    }
}

/// Flat symbol → command map for one dialect level
#[derive(Debug, Clone)]
pub struct CommandTable {
    level: DialectLevel,
    bindings: FxHashMap<char, Command>,
}

impl CommandTable {
    /// Merge the fragments of `level` and every level below it
    pub fn for_level(level: DialectLevel) -> Self {
        let mut bindings = FxHashMap::default();
        for fragment_level in DialectLevel::ALL.iter().filter(|l| **l <= level) {
            for (symbol, command) in fragment_level.fragment() {
                let previous = bindings.insert(*symbol, *command);
                debug_assert!(
                    previous.is_none(),
                    "dialect level {} rebinds '{}'",
                    fragment_level,
                    symbol
                );
            }
        }
        CommandTable { level, bindings }
    }

    pub fn level(&self) -> DialectLevel {
        self.level
    }

    /// Command bound to `symbol`, if any
    pub fn resolve(&self, symbol: char) -> Option<Command> {
        self.bindings.get(&symbol).copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.bindings.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bound symbols, in no particular order
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.bindings.keys().copied()
    }
}
