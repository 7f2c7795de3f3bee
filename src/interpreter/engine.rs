// Execution engine for the tape interpreter

use crate::device::IoDevice;
use crate::dialect::{Command, CommandTable, DialectLevel};
use crate::interpreter::constants::DEFAULT_PAYLOAD_DELIMITER;
use crate::interpreter::errors::{Error, InstructionLocation, RuntimeError, SyntaxError};
use crate::interpreter::ops::{self, Flow, StepContext};
use crate::loader::{self, LoadOptions, Program, SourceLocation};
use crate::memory::{loop_stack::LoopStack, register::Register, tape::Tape, Machine};
use crate::snapshot::{MockTerminal, Snapshot, SnapshotManager};
use tracing::{debug, info, trace, warn};

/// Interpreter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub level: DialectLevel,
    /// Number of cells the tape starts with
    pub tape_length: usize,
    /// Check bracket balance when loading
    pub validate: bool,
    /// Separator before the initializer payload (levels 2/3)
    pub delimiter: char,
}

impl Config {
    /// Defaults for `level`, including its historical tape length
    pub fn for_level(level: DialectLevel) -> Self {
        Config {
            level,
            tape_length: level.default_tape_length(),
            validate: true,
            delimiter: DEFAULT_PAYLOAD_DELIMITER,
        }
    }

    pub fn with_tape_length(mut self, tape_length: usize) -> Self {
        self.tape_length = tape_length;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            validate: self.validate,
            delimiter: self.delimiter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::for_level(DialectLevel::Base)
    }
}

/// How a completed run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Steps executed
    pub cycles: u64,
    /// True when a halt command stopped the run before the end of the program
    pub halted: bool,
}

/// The main interpreter that executes a loaded program
pub struct Interpreter {
    config: Config,

    /// Flat command table for the configured level
    table: CommandTable,

    program: Program,

    /// Tape, loop stack and register
    machine: Machine,

    ip: usize,
    cycles: u64,
    halted: bool,

    /// Mirror of program output, kept while history is recorded
    terminal: MockTerminal,

    /// Snapshot history for reverse execution (None = not recording)
    history: Option<SnapshotManager>,

    /// Index of the snapshot currently restored
    history_position: usize,
}

impl Interpreter {
    /// Create an interpreter with an empty program
    pub fn new(config: Config) -> Self {
        Interpreter {
            config,
            table: CommandTable::for_level(config.level),
            program: Program {
                level: config.level,
                instructions: Vec::new(),
                payload: Vec::new(),
            },
            machine: Machine::new(config.tape_length),
            ip: 0,
            cycles: 0,
            halted: false,
            terminal: MockTerminal::new(),
            history: None,
            history_position: 0,
        }
    }

    /// Start recording a snapshot after every step, up to `memory_limit` bytes
    ///
    /// The current state becomes the first snapshot.
    pub fn enable_history(&mut self, memory_limit: usize) -> Result<(), RuntimeError> {
        self.history = Some(SnapshotManager::new(memory_limit));
        self.terminal.clear();
        self.take_snapshot()
    }

    /// Load source text with the configured level and options, then reset
    pub fn load(&mut self, source: &str) -> Result<(), SyntaxError> {
        let program = loader::load(source, self.config.level, self.config.load_options())?;
        self.load_program(program);
        Ok(())
    }

    /// Install an already loaded program, then reset.
    ///
    /// Symbols the configured level does not bind execute as no-ops.
    pub fn load_program(&mut self, program: Program) {
        self.program = program;
        self.reset();
    }

    /// Return to the state before the first step of the loaded program
    pub fn reset(&mut self) {
        info!("resetting interpreter");

        self.machine.reset();
        let dropped = self.machine.tape.seed(&self.program.payload);
        if dropped > 0 {
            warn!(
                dropped,
                tape_length = self.machine.tape.len(),
                "initializer payload longer than the tape, extra bytes discarded"
            );
        }

        self.ip = 0;
        self.cycles = 0;
        self.halted = false;
        self.terminal.clear();
        self.history_position = 0;

        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
        if let Err(e) = self.take_snapshot() {
            // Only reachable with a limit smaller than one snapshot
            warn!(error = %e, "could not record the initial snapshot");
        }
    }

    /// Whether no further step will execute
    pub fn is_finished(&self) -> bool {
        self.halted || self.ip >= self.program.len()
    }

    /// Execute one instruction.
    ///
    /// Returns `Ok(false)` without doing anything once the program has
    /// finished or halted. Stepping from a restored snapshot discards the
    /// recorded steps after it, so history stays a single timeline.
    pub fn step(&mut self, device: &mut dyn IoDevice) -> Result<bool, RuntimeError> {
        if self.is_finished() {
            return Ok(false);
        }

        if let Some(history) = self.history.as_mut() {
            let keep = self.history_position + 1;
            if keep < history.len() {
                debug!(
                    position = self.history_position,
                    discarded = history.len() - keep,
                    "branching from a restored snapshot"
                );
                history.truncate(keep);
            }
        }

        let instruction = self.program.instructions[self.ip];
        let ctx = StepContext {
            location: InstructionLocation {
                ip: self.ip,
                symbol: instruction.symbol,
                source: instruction.location,
            },
            program_len: self.program.len(),
        };

        trace!(
            ip = self.ip,
            symbol = %instruction.symbol,
            cursor = self.machine.tape.cursor(),
            "executing instruction"
        );

        let flow = match self.table.resolve(instruction.symbol) {
            Some(command) => {
                let flow = ops::execute(command, &mut self.machine, device, &ctx)?;
                if self.history.is_some() && command == Command::Output {
                    if let Ok(byte) = self.machine.tape.read() {
                        self.terminal.push(byte);
                    }
                }
                flow
            }
            None => Flow::Next,
        };

        match flow {
            Flow::Next => {}
            Flow::Goto(target) => self.ip = target,
            Flow::Halt => {
                debug!(ip = self.ip, "halt");
                self.halted = true;
            }
        }

        self.ip += 1;
        self.cycles += 1;
        self.take_snapshot()?;
        Ok(true)
    }

    /// Run until the end of the program or a halt
    pub fn run(&mut self, device: &mut dyn IoDevice) -> Result<Outcome, RuntimeError> {
        while self.step(device)? {}

        info!(cycles = self.cycles, halted = self.halted, "completed");
        Ok(Outcome {
            cycles: self.cycles,
            halted: self.halted,
        })
    }

    // ========== Snapshot history ==========

    /// Take a snapshot of the current execution state
    fn take_snapshot(&mut self) -> Result<(), RuntimeError> {
        let Some(history) = self.history.as_mut() else {
            return Ok(());
        };

        let snapshot = Snapshot {
            machine: self.machine.clone(),
            terminal: self.terminal.clone(),
            ip: self.ip,
            cycles: self.cycles,
            halted: self.halted,
        };

        history
            .push(snapshot)
            .map_err(|_| RuntimeError::SnapshotLimitExceeded {
                current: history.memory_usage(),
                limit: history.memory_limit(),
            })?;

        self.history_position = history.len() - 1;
        Ok(())
    }

    /// Restore execution state from a snapshot
    fn restore_snapshot(&mut self, snapshot: &Snapshot) {
        self.machine = snapshot.machine.clone();
        self.terminal = snapshot.terminal.clone();
        self.ip = snapshot.ip;
        self.cycles = snapshot.cycles;
        self.halted = snapshot.halted;
    }

    fn restore_position(&mut self, position: usize) -> Result<(), RuntimeError> {
        let snapshot = self
            .history
            .as_ref()
            .and_then(|h| h.get(position))
            .cloned()
            .ok_or_else(|| RuntimeError::HistoryOperationFailed {
                message: "Snapshot not found in history".to_string(),
            })?;
        self.restore_snapshot(&snapshot);
        self.history_position = position;
        Ok(())
    }

    /// Step backward in execution (restore previous snapshot)
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "Already at the beginning of execution".to_string(),
            });
        }
        self.restore_position(self.history_position - 1)
    }

    /// Step forward in execution (restore next snapshot)
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position + 1 >= self.total_snapshots() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No more snapshots available (execution finished)".to_string(),
            });
        }
        self.restore_position(self.history_position + 1)
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        if self.total_snapshots() == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            });
        }
        self.restore_position(0)
    }

    /// Jump to the last recorded snapshot
    pub fn fast_forward_to_end(&mut self) -> Result<(), RuntimeError> {
        match self.total_snapshots() {
            0 => Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            }),
            n => self.restore_position(n - 1),
        }
    }

    // ========== Getter methods for UI ==========

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn level(&self) -> DialectLevel {
        self.config.level
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn tape(&self) -> &Tape {
        &self.machine.tape
    }

    pub fn loop_stack(&self) -> &LoopStack {
        &self.machine.loops
    }

    pub fn register(&self) -> &Register {
        &self.machine.register
    }

    /// Instruction pointer of the next step
    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Source position of the next instruction, if any
    pub fn current_location(&self) -> Option<SourceLocation> {
        self.program.get(self.ip).map(|i| i.location)
    }

    /// Output recorded while history is enabled
    pub fn terminal(&self) -> &MockTerminal {
        &self.terminal
    }

    /// All recorded snapshots (empty when history is disabled)
    pub fn snapshots(&self) -> &[Snapshot] {
        match &self.history {
            Some(history) => history.snapshots(),
            None => &[],
        }
    }

    /// Get the current history position
    pub fn history_position(&self) -> usize {
        self.history_position
    }

    /// Get the total number of snapshots
    pub fn total_snapshots(&self) -> usize {
        self.history.as_ref().map_or(0, |h| h.len())
    }
}

/// Load `source` at `level` with default settings and run it on `device`
pub fn execute(
    source: &str,
    level: DialectLevel,
    device: &mut dyn IoDevice,
) -> Result<Outcome, Error> {
    execute_with(source, Config::for_level(level), device)
}

/// Load and run `source` with an explicit configuration
pub fn execute_with(
    source: &str,
    config: Config,
    device: &mut dyn IoDevice,
) -> Result<Outcome, Error> {
    let mut interpreter = Interpreter::new(config);
    interpreter.load(source)?;
    Ok(interpreter.run(device)?)
}
