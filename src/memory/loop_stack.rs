//! Control-flow stack for bracketed loops
//!
//! Every open-loop instruction pushes its own instruction pointer; the
//! matching close-loop either jumps back to that saved position or pops it.
//! The depth of the stack is the current loop nesting.

/// LIFO of saved instruction positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopStack {
    entries: Vec<usize>,
}

impl LoopStack {
    pub fn new() -> Self {
        LoopStack {
            entries: Vec::new(),
        }
    }

    /// Record the position of an open-loop instruction
    pub fn push(&mut self, ip: usize) {
        self.entries.push(ip);
    }

    /// Position of the innermost open loop
    pub fn peek(&self) -> Option<usize> {
        self.entries.last().copied()
    }

    /// Leave the innermost loop
    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current loop nesting
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Saved positions, outermost first (for UI display)
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }
}
