//! Output sinks.
//!
//! A sink receives finished lines. Standard output is the only sink a
//! logger uses by default; [`MemorySink`] keeps lines in memory for tests
//! and for callers that forward output elsewhere, and [`WriterSink`] wraps
//! any `io::Write` (stderr, a file, a socket).
//!
//! Each write must be atomic with respect to other calls: two threads
//! emitting concurrently may interleave whole lines, never characters within
//! a line.

use std::io::Write;

use parking_lot::Mutex;

use crate::error::LogResult;

pub trait Sink: Send + Sync {
    /// Write one line and report failures. The sink appends the newline.
    fn try_write_line(&self, line: &str) -> LogResult<()>;

    /// Write one line, swallowing failures. This is what loggers call.
    fn write_line(&self, line: &str) {
        // a closed pipe must not take the caller down
        let _ = self.try_write_line(line);
    }
}

/// Writes to the process's standard output.
///
/// The stdout lock is held for the whole line, which is what makes the line
/// atomic.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn try_write_line(&self, line: &str) -> LogResult<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", line)?;
        handle.flush()?;
        Ok(())
    }
}

/// Writes to any writer, one locked write per line.
#[derive(Debug, Default)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn try_write_line(&self, line: &str) -> LogResult<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Remove and return every line written so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl Sink for MemorySink {
    fn try_write_line(&self, line: &str) -> LogResult<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
