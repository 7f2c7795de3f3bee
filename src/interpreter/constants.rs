// Constants for the interpreter

/// Tape length of the base dialect when none is configured
pub const BASE_TAPE_LENGTH: usize = 2000;

/// Tape length of the extended dialects when none is configured
pub const EXTENDED_TAPE_LENGTH: usize = 32;

/// Separator between program text and the initializer payload
pub const DEFAULT_PAYLOAD_DELIMITER: char = '@';

/// Snapshot history limit used by the TUI binary (1 GB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 1024 * 1024 * 1024;
