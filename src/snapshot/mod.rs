// Snapshot management for reverse execution

use crate::memory::Machine;

/// Mock terminal mirroring the bytes a program has written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockTerminal {
    bytes: Vec<u8>,
}

impl MockTerminal {
    pub fn new() -> Self {
        MockTerminal { bytes: Vec::new() }
    }

    /// Record one output byte
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get all output as display lines.
    ///
    /// Control bytes other than newline and tab are shown as `\xNN` escapes.
    pub fn get_output(&self) -> Vec<String> {
        let mut lines = vec![String::new()];
        for &byte in &self.bytes {
            match byte {
                b'\n' => lines.push(String::new()),
                b'\t' | b' '..=b'~' => {
                    if let Some(line) = lines.last_mut() {
                        line.push(byte as char);
                    }
                }
                _ => {
                    if let Some(line) = lines.last_mut() {
                        line.push_str(&format!("\\x{:02x}", byte));
                    }
                }
            }
        }
        // Remove trailing empty string if output ended with newline
        if lines.last().is_some_and(|s| s.is_empty()) {
            lines.pop();
        }
        lines
    }
}

/// Snapshot of execution state after one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub machine: Machine,
    pub terminal: MockTerminal,
    /// Instruction pointer of the next step
    pub ip: usize,
    pub cycles: u64,
    pub halted: bool,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        let tape_size = self.machine.tape.len();
        let loop_size = self.machine.loops.depth() * std::mem::size_of::<usize>();
        let terminal_size = self.terminal.bytes().len();

        std::mem::size_of::<Snapshot>() + tape_size + loop_size + terminal_size
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_memory = 0;
    }

    /// Drop every snapshot from `len` on, keeping the first `len`
    pub fn truncate(&mut self, len: usize) {
        if len >= self.snapshots.len() {
            return;
        }
        self.snapshots.truncate(len);
        self.current_memory = self.snapshots.iter().map(Snapshot::estimated_size).sum();
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// All snapshots in execution order
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(cycles: u64) -> Snapshot {
        Snapshot {
            machine: Machine::new(8),
            terminal: MockTerminal::new(),
            ip: 0,
            cycles,
            halted: false,
        }
    }

    #[test]
    fn test_terminal_lines() {
        let mut terminal = MockTerminal::new();
        for &b in b"hi\nthere\x01\n" {
            terminal.push(b);
        }
        assert_eq!(terminal.get_output(), vec!["hi", "there\\x01"]);
    }

    #[test]
    fn test_manager_enforces_limit() {
        let size = snapshot(0).estimated_size();
        let mut manager = SnapshotManager::new(size * 2);

        assert!(manager.push(snapshot(0)).is_ok());
        assert!(manager.push(snapshot(1)).is_ok());
        assert!(manager.push(snapshot(2)).is_err());
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.get(1).map(|s| s.cycles), Some(1));

        manager.truncate(1);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.memory_usage(), size);
        assert!(manager.push(snapshot(2)).is_ok());

        manager.clear();
        assert!(manager.is_empty());
        assert_eq!(manager.memory_usage(), 0);
    }
}
