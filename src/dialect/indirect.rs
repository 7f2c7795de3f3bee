//! Level 3: register redirection, nibble literals, comments and reserved
//! placeholders.
//!
//! `X`, `x` and `M` are kept in the instruction stream but never change
//! machine state.

use super::{Command, Reserved};

pub const BINDINGS: &[(char, Command)] = &[
    (':', Command::Redirect),
    (';', Command::ClearRedirect),
    ('0', Command::Literal(0x0)),
    ('1', Command::Literal(0x1)),
    ('2', Command::Literal(0x2)),
    ('3', Command::Literal(0x3)),
    ('4', Command::Literal(0x4)),
    ('5', Command::Literal(0x5)),
    ('6', Command::Literal(0x6)),
    ('7', Command::Literal(0x7)),
    ('8', Command::Literal(0x8)),
    ('9', Command::Literal(0x9)),
    ('A', Command::Literal(0xA)),
    ('B', Command::Literal(0xB)),
    ('C', Command::Literal(0xC)),
    ('D', Command::Literal(0xD)),
    ('E', Command::Literal(0xE)),
    ('F', Command::Literal(0xF)),
    ('#', Command::Comment),
    ('X', Command::Reserved(Reserved::Lock)),
    ('x', Command::Reserved(Reserved::Unlock)),
    ('M', Command::Reserved(Reserved::MoveCursor)),
];
