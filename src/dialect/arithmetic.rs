//! Level 2: instruction-pointer jumps, tape growth and register arithmetic.
//!
//! This level also lets source text carry an initializer payload after the
//! last delimiter (see [`crate::loader`]). The arithmetic commands compute
//! `cell OP register` modulo 256 and store the result in the cell; division
//! and modulo by a zero register are fatal.

use super::Command;

pub const BINDINGS: &[(char, Command)] = &[
    ('?', Command::Jump),
    (')', Command::InsertCell),
    ('(', Command::RemoveCell),
    ('*', Command::Multiply),
    ('/', Command::Divide),
    ('=', Command::Add),
    ('_', Command::Subtract),
    ('%', Command::Modulo),
];
