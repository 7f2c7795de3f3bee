//! Program loader
//!
//! This module turns raw source text into a [`Program`]:
//!
//! ```text
//! source ─▶ split payload ─▶ validate brackets ─▶ filter to bound symbols ─▶ Program
//!            (levels 2/3)     (optional)
//! ```
//!
//! - [`program`]: the loaded instruction sequence and its payload
//! - [`validate`]: the single-pass bracket-balance check
//!
//! Characters that are not bound in the level's command table are dropped
//! here, so every instruction the engine sees is a real command and every
//! cycle corresponds to one.

pub mod program;
pub mod validate;

pub use program::{Instruction, Program, SourceLocation};

use crate::dialect::{CommandTable, DialectLevel};
use crate::interpreter::constants::DEFAULT_PAYLOAD_DELIMITER;
use crate::interpreter::errors::SyntaxError;
use tracing::debug;

/// Options controlling how source text is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Run the bracket-balance check before accepting the program
    pub validate: bool,
    /// Separator between code and initializer payload (levels 2/3 only)
    pub delimiter: char,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            validate: true,
            delimiter: DEFAULT_PAYLOAD_DELIMITER,
        }
    }
}

/// Split `source` on the last `delimiter` into code and payload bytes
pub fn split_payload(source: &str, delimiter: char) -> (&str, &[u8]) {
    match source.rfind(delimiter) {
        Some(at) => (
            &source[..at],
            source[at + delimiter.len_utf8()..].as_bytes(),
        ),
        None => (source, &[]),
    }
}

/// Load `source` for `level`
pub fn load(
    source: &str,
    level: DialectLevel,
    options: LoadOptions,
) -> Result<Program, SyntaxError> {
    let (code, payload) = if level.supports_payload() {
        split_payload(source, options.delimiter)
    } else {
        (source, &[][..])
    };

    if options.validate {
        validate::check_brackets(code)?;
    }

    let table = CommandTable::for_level(level);
    let instructions: Vec<Instruction> = located_chars(code)
        .filter(|(symbol, _)| table.contains(*symbol))
        .map(|(symbol, location)| Instruction { symbol, location })
        .collect();

    debug!(
        level = %level,
        instructions = instructions.len(),
        payload = payload.len(),
        "loaded program"
    );

    Ok(Program {
        level,
        instructions,
        payload: payload.to_vec(),
    })
}

/// Every character of `text` with its 1-based line and column
pub(crate) fn located_chars(text: &str) -> impl Iterator<Item = (char, SourceLocation)> + '_ {
    let mut line = 1;
    let mut column = 0;
    text.chars().map(move |c| {
        column += 1;
        let location = SourceLocation::new(line, column);
        if c == '\n' {
            line += 1;
            column = 0;
        }
        (c, location)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_unbound_symbols() {
        let program = load("+ a+\n. // [-]", DialectLevel::Base, LoadOptions::default()).unwrap();
        assert_eq!(program.symbols(), "++.[-]");
        assert!(program.payload().is_empty());
    }

    #[test]
    fn test_instruction_locations() {
        let program = load("x+\n  -", DialectLevel::Base, LoadOptions::default()).unwrap();
        let locations: Vec<_> = program.instructions().iter().map(|i| i.location).collect();
        assert_eq!(
            locations,
            vec![SourceLocation::new(1, 2), SourceLocation::new(2, 3)]
        );
    }

    #[test]
    fn test_payload_split_on_last_delimiter() {
        let program = load("+@-@AB", DialectLevel::Extended2, LoadOptions::default()).unwrap();
        assert_eq!(program.symbols(), "+@-");
        assert_eq!(program.payload(), b"AB");
    }

    #[test]
    fn test_no_payload_below_level_two() {
        let program = load("+@AB", DialectLevel::Extended1, LoadOptions::default()).unwrap();
        assert_eq!(program.symbols(), "+@");
        assert!(program.payload().is_empty());
    }

    #[test]
    fn test_brackets_in_payload_are_not_validated() {
        let program = load("+@[[", DialectLevel::Extended2, LoadOptions::default()).unwrap();
        assert_eq!(program.payload(), b"[[");
    }

    #[test]
    fn test_custom_delimiter() {
        let options = LoadOptions {
            delimiter: '|',
            ..LoadOptions::default()
        };
        let program = load("+|xyz", DialectLevel::Extended3, options).unwrap();
        assert_eq!(program.symbols(), "+");
        assert_eq!(program.payload(), b"xyz");
    }

    #[test]
    fn test_validation_can_be_skipped() {
        let options = LoadOptions {
            validate: false,
            ..LoadOptions::default()
        };
        assert!(load("]", DialectLevel::Base, options).is_ok());
        assert!(load("]", DialectLevel::Base, LoadOptions::default()).is_err());
    }

    #[test]
    fn test_level_three_keeps_reserved_symbols() {
        let program = load("#XxM a", DialectLevel::Extended3, LoadOptions::default()).unwrap();
        assert_eq!(program.symbols(), "#XxM");
    }
}
