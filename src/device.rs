//! Byte-out / line-in devices
//!
//! The interpreter never touches stdin or stdout directly; it talks to an
//! [`IoDevice`]:
//! - [`StdioDevice`]: the process's standard streams
//! - [`BufferDevice`]: scripted input lines and captured output, used by
//!   tests
//! - [`CaptureDevice`]: standard input with captured output, used while the
//!   TUI records a run

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Device the `Input` and `Output` commands talk to
pub trait IoDevice {
    /// Block until one line is available.
    ///
    /// Returns the line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Emit one byte
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;
}

impl<D: IoDevice + ?Sized> IoDevice for &mut D {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }
}

/// Standard input and output
#[derive(Debug, Default)]
pub struct StdioDevice;

impl StdioDevice {
    pub fn new() -> Self {
        StdioDevice
    }
}

impl IoDevice for StdioDevice {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        // Bytes written so far must be visible before blocking on input
        io::stdout().flush()?;
        read_trimmed_line(&mut io::stdin().lock())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(&[byte])?;
        if byte == b'\n' {
            out.flush()?;
        }
        Ok(())
    }
}

/// Read one line from `reader`, stripping `\n` or `\r\n`
pub fn read_trimmed_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// In-memory device with queued input lines and captured output
#[derive(Debug, Clone, Default)]
pub struct BufferDevice {
    input: VecDeque<String>,
    output: Vec<u8>,
}

impl BufferDevice {
    pub fn new() -> Self {
        BufferDevice::default()
    }

    /// Device that answers `Input` with `lines`, in order
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BufferDevice {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Everything written so far
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output decoded lossily as UTF-8
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl IoDevice for BufferDevice {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }
}

/// Reads standard input but keeps output in memory
#[derive(Debug, Default)]
pub struct CaptureDevice {
    output: Vec<u8>,
}

impl CaptureDevice {
    pub fn new() -> Self {
        CaptureDevice::default()
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }
}

impl IoDevice for CaptureDevice {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        read_trimmed_line(&mut io::stdin().lock())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_trimmed_line() {
        let mut input = io::Cursor::new("abc\r\nde\n\nlast");
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some("abc"));
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some("de"));
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some(""));
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_trimmed_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_buffer_device_round() {
        let mut device = BufferDevice::with_input(["x", "y"]);
        assert_eq!(device.read_line().unwrap().as_deref(), Some("x"));
        device.write_byte(b'h').unwrap();
        device.write_byte(b'i').unwrap();
        assert_eq!(device.output_string(), "hi");
        assert_eq!(device.read_line().unwrap().as_deref(), Some("y"));
        assert_eq!(device.read_line().unwrap(), None);
    }
}
