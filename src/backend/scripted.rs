//! In-memory backend
//!
//! Events come from a prepared list (built in code or parsed from a JSON
//! script); everything written is captured as a string. Drives the render
//! loop without a terminal.

use std::collections::VecDeque;

use super::Backend;
use crate::error::{Error, Result};
use crate::input::Event;
use crate::renderer::ansi;

#[derive(Debug, Default)]
pub struct ScriptedBackend {
    events: VecDeque<Event>,
    output: String,
    /// Last cursor position requested
    cursor: Option<(usize, usize)>,
    resets: usize,
}

impl ScriptedBackend {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Parse a JSON array of events, e.g. `[{"type":"char","char":"a"},{"type":"enter"}]`
    pub fn from_json(script: &str) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(script)?;
        Ok(Self::new(events))
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// Everything written so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Return and clear the captured output
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn cursor(&self) -> Option<(usize, usize)> {
        self.cursor
    }

    /// How many times the screen was reset
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Backend for ScriptedBackend {
    fn write(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn wait_event(&mut self) -> Result<Event> {
        self.events.pop_front().ok_or(Error::ScriptExhausted)
    }

    fn set_cursor_pos(&mut self, row: usize, col: usize) -> Result<()> {
        self.cursor = Some((row, col));
        self.write(&ansi::cursor_to(row, col))
    }

    fn reset_screen(&mut self) -> Result<()> {
        self.resets += 1;
        self.clear_screen()?;
        self.cursor_home()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_in_order_then_exhausted() {
        let mut backend = ScriptedBackend::new([Event::char('a'), Event::Enter]);
        assert_eq!(backend.wait_event().unwrap(), Event::char('a'));
        assert_eq!(backend.wait_event().unwrap(), Event::Enter);
        assert!(matches!(backend.wait_event(), Err(Error::ScriptExhausted)));
    }

    #[test]
    fn test_from_json() {
        let backend = ScriptedBackend::from_json(r#"[{"type":"down"},{"type":"escape"}]"#).unwrap();
        assert_eq!(backend.remaining(), 2);
        assert!(matches!(ScriptedBackend::from_json("{"), Err(Error::Script(_))));
    }

    #[test]
    fn test_captures_writes() {
        let mut backend = ScriptedBackend::default();
        backend.reset_screen().unwrap();
        backend.set_cursor_pos(2, 3).unwrap();
        backend.write("x").unwrap();
        assert_eq!(backend.output(), "\x1b[2J\x1b[H\x1b[3;4Hx");
        assert_eq!(backend.cursor(), Some((2, 3)));
        assert_eq!(backend.resets(), 1);
        assert_eq!(backend.take_output(), "\x1b[2J\x1b[H\x1b[3;4Hx");
        assert_eq!(backend.output(), "");
    }
}
