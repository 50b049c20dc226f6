//! Minicurses Input
//!
//! The canonical event model and the parser that turns raw terminal bytes
//! into events. Handles:
//! - Printable characters
//! - Control keys (CR/LF, Tab, Backspace/DEL)
//! - Arrow keys and other escape sequences (CSI and SS3)
//!
//! Anything the widget tree has no use for decodes to `Event::Unknown`.

use serde::{Deserialize, Serialize};

/// An event flowing through the widget tree.
///
/// Keystrokes come from a backend; `Focus` and `Defocus` are synthesised by
/// windows to move the focus chain up and down the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A printable character
    Char { char: char },
    Enter,
    Escape,
    Tab,
    Up,
    Down,
    Backspace,
    /// A keystroke with no meaning to the tree
    Unknown,
    /// Focus handed to the receiver
    Focus,
    /// Focus taken away from the receiver
    Defocus,
}

impl Event {
    pub fn char(c: char) -> Self {
        Event::Char { char: c }
    }
}

/// Input parser state machine
pub struct InputParser {
    /// Buffer for incomplete escape sequences
    buffer: Vec<u8>,
}

impl InputParser {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(32),
        }
    }

    /// Parse input bytes into events.
    ///
    /// Incomplete sequences stay buffered for the next call.
    pub fn parse(&mut self, data: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();
        self.buffer.extend_from_slice(data);

        while !self.buffer.is_empty() {
            match self.try_parse_one() {
                ParseResult::Event(event) => events.push(event),
                ParseResult::Incomplete => break,
                ParseResult::Invalid(skip) => {
                    self.buffer.drain(0..skip);
                }
            }
        }

        events
    }

    /// Flush whatever is still buffered once the device has gone quiet.
    ///
    /// A lone ESC becomes `Event::Escape`; any other leftover is `Event::Unknown`.
    pub fn finish(&mut self) -> Option<Event> {
        if self.buffer.is_empty() {
            return None;
        }
        let event = if self.buffer == [0x1b] {
            Event::Escape
        } else {
            Event::Unknown
        };
        self.buffer.clear();
        Some(event)
    }

    fn try_parse_one(&mut self) -> ParseResult {
        if self.buffer.is_empty() {
            return ParseResult::Incomplete;
        }

        let first = self.buffer[0];

        if first == 0x1b {
            return self.parse_escape();
        }

        // Control characters (< 32) and DEL (0x7f)
        if first < 32 || first == 0x7f {
            let event = match first {
                0x0d | 0x0a => Event::Enter,
                0x09 => Event::Tab,
                0x7f | 0x08 => Event::Backspace,
                _ => Event::Unknown,
            };
            self.buffer.remove(0);
            // CRLF is a single Enter
            if first == 0x0d && self.buffer.first() == Some(&0x0a) {
                self.buffer.remove(0);
            }
            return ParseResult::Event(event);
        }

        match self.decode_utf8() {
            Utf8::Char(ch, len) => {
                self.buffer.drain(0..len);
                ParseResult::Event(Event::Char { char: ch })
            }
            Utf8::Incomplete => ParseResult::Incomplete,
            Utf8::Invalid => ParseResult::Invalid(1),
        }
    }

    fn parse_escape(&mut self) -> ParseResult {
        // A lone ESC waits here until more bytes or finish()
        if self.buffer.len() < 2 {
            return ParseResult::Incomplete;
        }

        match self.buffer[1] {
            // CSI sequence: ESC [
            b'[' => self.parse_csi(),
            // SS3 sequence: ESC O
            b'O' => self.parse_ss3(),
            // Alt+key
            c if (32..127).contains(&c) => {
                self.buffer.drain(0..2);
                ParseResult::Event(Event::Unknown)
            }
            // ESC ESC: the first one stands alone
            0x1b => {
                self.buffer.remove(0);
                ParseResult::Event(Event::Escape)
            }
            _ => ParseResult::Invalid(1),
        }
    }

    /// Parse CSI (Control Sequence Introducer) sequence: ESC [
    fn parse_csi(&mut self) -> ParseResult {
        if self.buffer.len() < 3 {
            return ParseResult::Incomplete;
        }

        let end = self.buffer[2..]
            .iter()
            .position(|&b| b.is_ascii_alphabetic() || b == b'~');

        match end {
            None => ParseResult::Incomplete,
            Some(pos) => {
                let end_idx = 2 + pos;
                let event = match self.buffer[end_idx] {
                    b'A' => Event::Up,
                    b'B' => Event::Down,
                    // Shift+Tab on xterm-likes
                    b'Z' => Event::Tab,
                    _ => Event::Unknown,
                };
                self.buffer.drain(0..=end_idx);
                ParseResult::Event(event)
            }
        }
    }

    /// Parse SS3 sequence: ESC O
    fn parse_ss3(&mut self) -> ParseResult {
        if self.buffer.len() < 3 {
            return ParseResult::Incomplete;
        }

        let event = match self.buffer[2] {
            b'A' => Event::Up,
            b'B' => Event::Down,
            // Keypad Enter in application mode
            b'M' => Event::Enter,
            _ => Event::Unknown,
        };

        self.buffer.drain(0..3);
        ParseResult::Event(event)
    }

    fn decode_utf8(&self) -> Utf8 {
        let first = self.buffer[0];

        if first < 128 {
            return Utf8::Char(first as char, 1);
        }

        let len = if first & 0xE0 == 0xC0 {
            2
        } else if first & 0xF0 == 0xE0 {
            3
        } else if first & 0xF8 == 0xF0 {
            4
        } else {
            return Utf8::Invalid;
        };

        if self.buffer.len() < len {
            return Utf8::Incomplete;
        }

        match std::str::from_utf8(&self.buffer[0..len])
            .ok()
            .and_then(|s| s.chars().next())
        {
            Some(c) => Utf8::Char(c, len),
            None => Utf8::Invalid,
        }
    }
}

impl Default for InputParser {
    fn default() -> Self {
        Self::new()
    }
}

enum ParseResult {
    Event(Event),
    Incomplete,
    Invalid(usize),
}

enum Utf8 {
    Char(char, usize),
    Incomplete,
    Invalid,
}
