//! Bracket-balance validation
//!
//! A single scan counts `[` up and `]` down. The count may never go negative
//! and must end at zero. Non-bracket characters are ignored, including ones
//! the dialect does not bind.

use super::located_chars;
use crate::interpreter::errors::SyntaxError;

/// Check that every `]` closes an earlier `[` and every `[` is closed
pub fn check_brackets(code: &str) -> Result<(), SyntaxError> {
    // Open positions double as the running count
    let mut open = Vec::new();

    for (symbol, location) in located_chars(code) {
        match symbol {
            '[' => open.push(location),
            ']' => {
                if open.pop().is_none() {
                    return Err(SyntaxError::UnexpectedClose { location });
                }
            }
            _ => {}
        }
    }

    match open.first() {
        Some(first) => Err(SyntaxError::UnclosedOpen {
            count: open.len(),
            location: *first,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SourceLocation;

    #[test]
    fn test_balanced_programs() {
        for code in ["", "+", "[]", "[[]][]", "+[>[-]<-]", "a[b]c"] {
            assert!(check_brackets(code).is_ok(), "{:?} should balance", code);
        }
    }

    #[test]
    fn test_lone_brackets() {
        assert_eq!(
            check_brackets("["),
            Err(SyntaxError::UnclosedOpen {
                count: 1,
                location: SourceLocation::new(1, 1),
            })
        );
        assert_eq!(
            check_brackets("]"),
            Err(SyntaxError::UnexpectedClose {
                location: SourceLocation::new(1, 1),
            })
        );
    }

    #[test]
    fn test_close_before_open_fails_even_when_counts_match() {
        assert_eq!(
            check_brackets("+\n][").unwrap_err(),
            SyntaxError::UnexpectedClose {
                location: SourceLocation::new(2, 1),
            }
        );
    }

    #[test]
    fn test_reports_outermost_unclosed_open() {
        match check_brackets("+[[[]") {
            Err(SyntaxError::UnclosedOpen { count, location }) => {
                assert_eq!(count, 2);
                assert_eq!(location, SourceLocation::new(1, 2));
            }
            other => panic!("Expected unclosed open, got {:?}", other),
        }
    }
}
