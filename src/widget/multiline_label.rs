//! Wrapped, scrollable text block
//!
//! Text is cut into `width`-character chunks (no word breaking) and a
//! `height`-line window of those chunks is shown. Gravity decides which end
//! the window is anchored to.

use log::debug;
use std::ops::Range;

use super::{Label, Placement};
use crate::core::{Cell, Matrix};

/// Which end of the text the visible lines hang from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gravity {
    /// Show from the top, scroll moves down
    #[default]
    Up,
    /// Show the tail, scroll moves up
    Down,
}

/// A fixed-size block of wrapped text
#[derive(Debug, Clone)]
pub struct MultilineLabel {
    pub(crate) label: Label,
    width: usize,
    height: usize,
    gravity: Gravity,
    scroll: usize,
}

impl MultilineLabel {
    pub fn new(row: usize, col: usize, width: usize, height: usize) -> Self {
        Self {
            label: Label::new(row, col, ""),
            width,
            height,
            gravity: Gravity::Up,
            scroll: 0,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.label.set_text(text);
        self
    }

    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn placement(&self) -> &Placement {
        &self.label.placement
    }

    pub fn text(&self) -> &str {
        self.label.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.label.set_text(text);
    }

    /// Append a line to the text
    pub fn push_line(&mut self, line: &str) {
        let mut text = self.label.text().to_string();
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(line);
        self.label.set_text(text);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Move the scroll offset by `n` lines, clamped to the text
    pub fn scroll_lines(&mut self, n: isize) {
        let max = self.max_scroll(self.lines().len()) as isize;
        self.scroll = (self.scroll as isize + n).clamp(0, max) as usize;
        debug!("scroll offset set to {}", self.scroll);
    }

    /// The text cut into display lines.
    ///
    /// An empty source line produces no display line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.width == 0 {
            return lines;
        }
        for source in self.label.text().lines() {
            let chars: Vec<char> = source.chars().collect();
            lines.extend(chars.chunks(self.width).map(|c| c.iter().collect::<String>()));
        }
        lines
    }

    fn max_scroll(&self, line_count: usize) -> usize {
        line_count.saturating_sub(self.height)
    }

    /// Index range of the display lines currently shown
    pub fn visible_range(&self, line_count: usize) -> Range<usize> {
        let scroll = self.scroll.min(self.max_scroll(line_count));
        match self.gravity {
            Gravity::Up => scroll..(scroll + self.height).min(line_count),
            // scroll == 0 is "the last `height` lines", not an empty window
            Gravity::Down if scroll == 0 => line_count.saturating_sub(self.height)..line_count,
            Gravity::Down => (line_count - self.height - scroll)..(line_count - scroll),
        }
    }

    pub fn matrix(&self) -> Matrix {
        let lines = self.lines();
        let mut matrix = Matrix::new(self.width, self.height);
        let range = self.visible_range(lines.len());
        for (row, line) in lines[range].iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                matrix.set(row, col, Cell::styled(ch, self.label.style()));
            }
        }
        matrix
    }
}
