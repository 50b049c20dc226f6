//! Static one-line text

use super::Placement;
use crate::core::{Matrix, Style};

/// A single line of text with a fixed style
#[derive(Debug, Clone)]
pub struct Label {
    pub placement: Placement,
    text: String,
    style: Style,
}

impl Label {
    pub fn new(row: usize, col: usize, text: impl Into<String>) -> Self {
        Self::styled(row, col, text, Style::DEFAULT)
    }

    pub fn styled(row: usize, col: usize, text: impl Into<String>, style: Style) -> Self {
        Self {
            placement: Placement::at(row, col),
            text: text.into(),
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Width in characters
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    pub fn matrix(&self) -> Matrix {
        Matrix::from_line(&self.text, self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    #[test]
    fn test_default_label_is_plain() {
        let m = Label::new(0, 0, "abc").matrix();
        assert_eq!(m.rows, 1);
        assert_eq!(m.cols, 3);
        assert_eq!(m.get(0, 1), Some(&Cell::plain('b')));
    }

    #[test]
    fn test_styled_label_tags_every_cell() {
        let style = Style::BOLD | Style::INVERTED;
        let m = Label::styled(0, 0, "ok", style).matrix();
        assert_eq!(m.get(0, 0), Some(&Cell::styled('o', style)));
        assert_eq!(m.get(0, 1), Some(&Cell::styled('k', style)));
    }

    #[test]
    fn test_width_counts_chars() {
        assert_eq!(Label::new(0, 0, "héllo").width(), 5);
    }
}
