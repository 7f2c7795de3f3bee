//! Level 1: halt, register transfer, shifts and bitwise logic.
//!
//! The binary operations combine the current cell with the register and
//! write the result back into the cell.

use super::Command;

pub const BINDINGS: &[(char, Command)] = &[
    ('@', Command::Halt),
    ('$', Command::Store),
    ('!', Command::Load),
    ('}', Command::ShiftRight),
    ('{', Command::ShiftLeft),
    ('~', Command::Not),
    ('^', Command::Xor),
    ('&', Command::And),
    ('|', Command::Or),
];
