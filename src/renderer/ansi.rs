//! VT100 / ANSI escape sequences
//!
//! Both the local emulator and the Minitel (in 80-column mode) speak this
//! subset, so one table serves every backend.

use crate::core::Style;

/// Control Sequence Introducer
pub const CSI: &str = "\x1b[";

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const BLINKING: &str = "\x1b[5m";
pub const INVERTED: &str = "\x1b[7m";

pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const CURSOR_HOME: &str = "\x1b[H";

/// Escape sequence for a single style bit.
///
/// Anything that is not exactly one known bit maps to `RESET`.
pub fn style_escape(style: Style) -> &'static str {
    if style == Style::BOLD {
        BOLD
    } else if style == Style::UNDERLINE {
        UNDERLINE
    } else if style == Style::BLINKING {
        BLINKING
    } else if style == Style::INVERTED {
        INVERTED
    } else {
        RESET
    }
}

/// Cursor move to a zero-based (row, col); the terminal counts from 1
pub fn cursor_to(row: usize, col: usize) -> String {
    format!("{}{};{}H", CSI, row + 1, col + 1)
}
