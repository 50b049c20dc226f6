//! Minicurses Backends
//!
//! A backend is the device side of the render loop: it accepts text and
//! control writes, and blocks until the user produces an event.
//!
//! - `Emulator`: the local terminal in raw mode
//! - `Minitel`: a videotex terminal on a serial line
//! - `ScriptedBackend`: in-memory, replays a fixed list of events

pub mod emulator;
pub mod minitel;
pub mod scripted;

pub use emulator::Emulator;
pub use minitel::Minitel;
pub use scripted::ScriptedBackend;

use crate::core::Style;
use crate::error::Result;
use crate::input::Event;
use crate::renderer::ansi;

/// The device a `RootWindow` draws on and reads from
pub trait Backend {
    /// Queue text (characters or escape sequences) for the device
    fn write(&mut self, text: &str) -> Result<()>;

    /// Block until the next event.
    ///
    /// Implementations flush pending output first so the user sees the
    /// frame they are answering.
    fn wait_event(&mut self) -> Result<Event>;

    /// Move the cursor to a zero-based (row, col)
    fn set_cursor_pos(&mut self, row: usize, col: usize) -> Result<()> {
        self.write(&ansi::cursor_to(row, col))
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.write(ansi::CLEAR_SCREEN)
    }

    fn cursor_home(&mut self) -> Result<()> {
        self.write(ansi::CURSOR_HOME)
    }

    /// Blank the display and home the cursor
    fn reset_screen(&mut self) -> Result<()> {
        self.clear_screen()?;
        self.cursor_home()
    }

    /// Escape sequence for one style bit
    fn style_escape(&self, style: Style) -> &'static str {
        ansi::style_escape(style)
    }

    /// Push queued output to the device
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
