//! Level 0: the eight classic tape commands.

use super::Command;

pub const BINDINGS: &[(char, Command)] = &[
    ('+', Command::Increment),
    ('-', Command::Decrement),
    ('>', Command::Advance),
    ('<', Command::Retreat),
    ('.', Command::Output),
    (',', Command::Input),
    ('[', Command::OpenLoop),
    (']', Command::CloseLoop),
];
