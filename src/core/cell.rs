//! Minicurses Cell - The fundamental display unit
//!
//! Each cell is one character position with a style bitmask.
//! A cell carrying only `Style::DEFAULT` is plain and costs no escape codes.

use bitflags::bitflags;

bitflags! {
    /// Text style flags, one escape sequence per set bit.
    ///
    /// `DEFAULT` is its own bit so that "no styling" and "reset" are the same value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Style: u8 {
        const DEFAULT = 1 << 0;
        const BOLD = 1 << 1;
        const UNDERLINE = 1 << 2;
        const BLINKING = 1 << 3;
        const INVERTED = 1 << 4;
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::DEFAULT
    }
}

impl Style {
    /// True when the style needs no escape codes at all
    pub fn is_default(&self) -> bool {
        *self == Style::DEFAULT
    }
}

/// A single character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The character to display
    pub ch: char,
    /// Style bits
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Cell {
    /// An unstyled space
    pub const BLANK: Cell = Cell {
        ch: ' ',
        style: Style::DEFAULT,
    };

    /// Create a plain cell
    pub fn plain(ch: char) -> Self {
        Self {
            ch,
            style: Style::DEFAULT,
        }
    }

    /// Create a styled cell
    pub fn styled(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    pub fn is_plain(&self) -> bool {
        self.style.is_default()
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self {
        Cell::plain(ch)
    }
}
