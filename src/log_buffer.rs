//! A bounded in-memory log sink
//!
//! While a backend owns the screen, diagnostics cannot go to stdout/stderr.
//! A `LogBuffer` is handed to the logger as its output and to the backend
//! that displays it, so both sides share the same last few lines.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// Lines kept by default
pub const DEFAULT_CAPACITY: usize = 10;

struct Lines {
    lines: VecDeque<String>,
    /// Bytes written since the last newline
    partial: String,
    capacity: usize,
}

impl Lines {
    fn push(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }
}

/// Shared handle to the most recent log lines
#[derive(Clone)]
pub struct LogBuffer {
    inner: Arc<Mutex<Lines>>,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Lines {
                lines: VecDeque::with_capacity(capacity),
                partial: String::new(),
                capacity,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Lines> {
        // a panic elsewhere must not take the log down with it
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a complete line
    pub fn push(&self, line: impl Into<String>) {
        self.lock().push(line.into());
    }

    /// Snapshot of the stored lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lock().lines.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().lines.is_empty()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.lock();
        inner.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = inner.partial.find('\n') {
            let line: String = inner.partial.drain(..=pos).collect();
            inner.push(line.trim_end_matches(['\r', '\n']).to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
