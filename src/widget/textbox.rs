//! Editable one-line text field

use super::Placement;
use crate::core::{Matrix, Style};
use crate::input::Event;

const MASK: char = '*';

/// A text field fed by keystrokes
#[derive(Debug, Clone)]
pub struct Textbox {
    pub placement: Placement,
    text: String,
    style: Style,
    secret: bool,
    max_width: Option<usize>,
}

impl Textbox {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            placement: Placement::at(row, col),
            text: String::new(),
            style: Style::DEFAULT,
            secret: false,
            max_width: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Render every character as `*`
    pub fn secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    /// Only show the trailing `width` characters
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Char { char } => self.text.push(char),
            Event::Backspace => {
                self.text.pop();
            }
            _ => {}
        }
        None
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn matrix(&self) -> Matrix {
        let shown: String = if self.secret {
            std::iter::repeat(MASK).take(self.len()).collect()
        } else {
            self.text.clone()
        };
        let skip = match self.max_width {
            Some(max) => self.len().saturating_sub(max),
            None => 0,
        };
        let tail: String = shown.chars().skip(skip).collect();
        Matrix::from_line(&tail, self.style)
    }

    /// The cursor sits just after the last visible character
    pub fn cursor_pos(&self) -> (usize, usize) {
        let offset = match self.max_width {
            Some(max) => self.len().min(max),
            None => self.len(),
        };
        (self.placement.row, self.placement.col + offset)
    }
}
