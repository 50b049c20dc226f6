//! Local terminal backend
//!
//! Puts the controlling terminal in raw mode and speaks ANSI to it. Output is
//! queued and written in one go before each wait, so a frame reaches the
//! screen as a single write. The last few log lines are printed under the
//! drawing area whenever the screen is reset.

use std::collections::VecDeque;
use std::io::{self, Read, Stdin, Stdout, Write};

use bytes::BytesMut;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, warn};

use super::Backend;
use crate::error::{Error, Result};
use crate::input::{Event, InputParser};
use crate::log_buffer::LogBuffer;
use crate::renderer::ansi;

/// Restores cooked mode when dropped
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to restore terminal mode: {}", e);
        }
    }
}

/// Double-line frame for the bordered variant
const FRAME_TOP_LEFT: char = '╔';
const FRAME_TOP_RIGHT: char = '╗';
const FRAME_BOTTOM_LEFT: char = '╚';
const FRAME_BOTTOM_RIGHT: char = '╝';
const FRAME_HORIZONTAL: char = '═';
const FRAME_VERTICAL: char = '║';

/// ANSI terminal on local stdin/stdout
pub struct Emulator<R = Stdin, W = Stdout> {
    reader: R,
    writer: W,
    out: BytesMut,
    parser: InputParser,
    pending: VecDeque<Event>,
    cols: usize,
    rows: usize,
    /// Draw a frame around the drawing area and shift everything inside it
    border: bool,
    log: LogBuffer,
    _guard: Option<RawModeGuard>,
}

impl Emulator {
    /// Take over the local terminal
    pub fn open(cols: usize, rows: usize, log: LogBuffer) -> Result<Self> {
        let guard = RawModeGuard::new()?;
        let mut emulator = Self::from_io(io::stdin(), io::stdout(), cols, rows, log);
        emulator._guard = Some(guard);
        debug!("emulator opened at {}x{}", cols, rows);
        Ok(emulator)
    }
}

impl<R: Read, W: Write> Emulator<R, W> {
    /// Wrap an arbitrary byte source and sink; the terminal mode is left alone
    pub fn from_io(reader: R, writer: W, cols: usize, rows: usize, log: LogBuffer) -> Self {
        Self {
            reader,
            writer,
            out: BytesMut::with_capacity(4096),
            parser: InputParser::new(),
            pending: VecDeque::new(),
            cols,
            rows,
            border: false,
            log,
            _guard: None,
        }
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn offset(&self) -> usize {
        usize::from(self.border)
    }

    fn draw_frame(&mut self) -> Result<()> {
        let horizontal: String = std::iter::repeat(FRAME_HORIZONTAL).take(self.cols).collect();

        self.write(&ansi::cursor_to(0, 0))?;
        self.write(&format!("{}{}{}", FRAME_TOP_LEFT, horizontal, FRAME_TOP_RIGHT))?;
        for row in 1..=self.rows {
            self.write(&ansi::cursor_to(row, 0))?;
            self.write(&FRAME_VERTICAL.to_string())?;
            self.write(&ansi::cursor_to(row, self.cols + 1))?;
            self.write(&FRAME_VERTICAL.to_string())?;
        }
        self.write(&ansi::cursor_to(self.rows + 1, 0))?;
        self.write(&format!("{}{}{}", FRAME_BOTTOM_LEFT, horizontal, FRAME_BOTTOM_RIGHT))
    }

    fn draw_log(&mut self) -> Result<()> {
        let row = self.rows + 2 * self.offset();
        self.write(&ansi::cursor_to(row, 0))?;
        for line in self.log.lines() {
            self.write(&line)?;
            self.write("\r\n")?;
        }
        Ok(())
    }

    /// Read one chunk and queue what it decodes to
    fn read_events(&mut self) -> Result<()> {
        let mut buf = [0u8; 256];
        let n = loop {
            match self.reader.read(&mut buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        if n == 0 {
            return Err(Error::Disconnected);
        }

        self.pending.extend(self.parser.parse(&buf[..n]));
        // a read ending on ESC is the Escape key itself
        if buf[n - 1] == 0x1b {
            self.pending.extend(self.parser.finish());
        }
        Ok(())
    }
}

impl<R: Read, W: Write> Backend for Emulator<R, W> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.out.extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn wait_event(&mut self) -> Result<Event> {
        self.flush()?;
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }
            self.read_events()?;
        }
    }

    fn set_cursor_pos(&mut self, row: usize, col: usize) -> Result<()> {
        let offset = self.offset();
        self.write(&ansi::cursor_to(row + offset, col + offset))
    }

    fn reset_screen(&mut self) -> Result<()> {
        self.write(ansi::RESET)?;
        self.clear_screen()?;
        if self.border {
            self.draw_frame()?;
        }
        self.draw_log()?;
        self.set_cursor_pos(0, 0)?;
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        if self.out.is_empty() {
            return Ok(());
        }
        let chunk = self.out.split();
        self.writer.write_all(&chunk)?;
        self.writer.flush()?;
        Ok(())
    }
}
