//! Minicurses Matrix - the grid every widget renders into
//!
//! A rectangular, row-major array of cells. The shape is fixed at creation;
//! writes outside it are dropped, never wrapped or grown.

use super::cell::{Cell, Style};

/// Glyphs for drawing a window border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub corner: char,
    pub horizontal: char,
    pub vertical: char,
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self {
            corner: '+',
            horizontal: '-',
            vertical: '|',
        }
    }
}

/// A fixed-shape grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    /// Width in columns
    pub cols: usize,
    /// Height in rows
    pub rows: usize,
    /// The cell buffer (row-major order)
    cells: Vec<Cell>,
}

impl Matrix {
    /// Create a blank matrix with given dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols * rows],
        }
    }

    /// Build a matrix from rows of cells, padding short rows with blanks.
    ///
    /// The width is the longest row.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut matrix = Self::new(cols, rows.len());
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                matrix.set(r, c, cell);
            }
        }
        matrix
    }

    /// A single-row matrix holding `text`, every cell with `style`
    pub fn from_line(text: &str, style: Style) -> Self {
        let cells: Vec<Cell> = text.chars().map(|ch| Cell::styled(ch, style)).collect();
        let mut matrix = Self::new(cells.len(), 1);
        matrix.cells = cells;
        matrix
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Set a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    /// Write a string along a row, clipped at the right edge
    pub fn write_str(&mut self, row: usize, col: usize, s: &str, style: Style) {
        for (i, ch) in s.chars().enumerate() {
            let c = col + i;
            if c >= self.cols {
                break;
            }
            self.set(row, c, Cell::styled(ch, style));
        }
    }

    /// Draw a border on the outermost rows and columns
    pub fn draw_border(&mut self, glyphs: &BorderGlyphs) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }
        let last_row = self.rows - 1;
        let last_col = self.cols - 1;

        for c in 0..self.cols {
            self.set(0, c, Cell::plain(glyphs.horizontal));
            self.set(last_row, c, Cell::plain(glyphs.horizontal));
        }
        for r in 0..self.rows {
            self.set(r, 0, Cell::plain(glyphs.vertical));
            self.set(r, last_col, Cell::plain(glyphs.vertical));
        }

        self.set(0, 0, Cell::plain(glyphs.corner));
        self.set(0, last_col, Cell::plain(glyphs.corner));
        self.set(last_row, 0, Cell::plain(glyphs.corner));
        self.set(last_row, last_col, Cell::plain(glyphs.corner));
    }

    /// Copy `src` onto this matrix with its top-left at (row, col).
    ///
    /// Source cells that land outside this matrix are dropped.
    pub fn merge(&mut self, src: &Matrix, row: usize, col: usize) {
        let h = src.rows.min(self.rows.saturating_sub(row));
        let w = src.cols.min(self.cols.saturating_sub(col));
        for r in 0..h {
            for c in 0..w {
                if let Some(cell) = src.get(r, c) {
                    self.set(row + r, col + c, *cell);
                }
            }
        }
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics, and a zero-width matrix has no visible rows anyway
        self.cells.chunks(self.cols.max(1)).take(if self.cols == 0 { 0 } else { self.rows })
    }

    /// The characters of one row, styles dropped
    pub fn row_text(&self, row: usize) -> String {
        (0..self.cols)
            .filter_map(|c| self.get(row, c))
            .map(|cell| cell.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_new() {
        let matrix = Matrix::new(80, 24);
        assert_eq!(matrix.cols, 80);
        assert_eq!(matrix.rows, 24);
        assert_eq!(matrix.get(23, 79), Some(&Cell::BLANK));
        assert_eq!(matrix.get(24, 0), None);
    }

    #[test]
    fn test_matrix_write_str_clips() {
        let mut matrix = Matrix::new(6, 2);
        matrix.write_str(1, 3, "Hello", Style::DEFAULT);
        assert_eq!(matrix.row_text(1), "   Hel");
        assert_eq!(matrix.row_text(0), "      ");
    }

    #[test]
    fn test_from_rows_pads_ragged_input() {
        let matrix = Matrix::from_rows(vec![
            vec![Cell::plain('a')],
            vec![Cell::plain('b'), Cell::plain('c'), Cell::plain('d')],
        ]);
        assert_eq!(matrix.cols, 3);
        assert_eq!(matrix.rows, 2);
        assert_eq!(matrix.row_text(0), "a  ");
    }

    #[test]
    fn test_merge_clips_to_parent() {
        let mut parent = Matrix::new(4, 3);
        let child = Matrix::from_line("abcdef", Style::DEFAULT);
        parent.merge(&child, 1, 2);
        assert_eq!(parent.row_text(1), "  ab");
        assert_eq!(parent.cols, 4);
        assert_eq!(parent.rows, 3);
    }

    #[test]
    fn test_merge_outside_leaves_parent_unchanged() {
        let mut parent = Matrix::new(10, 5);
        parent.draw_border(&BorderGlyphs::default());
        let before = parent.clone();

        let child = Matrix::from_line("overflow", Style::BOLD);
        parent.merge(&child, 5, 0);
        assert_eq!(parent, before);

        parent.merge(&child, 0, 10);
        assert_eq!(parent, before);
    }

    #[test]
    fn test_draw_border() {
        let mut matrix = Matrix::new(10, 5);
        matrix.draw_border(&BorderGlyphs::default());
        assert_eq!(matrix.row_text(0), "+--------+");
        assert_eq!(matrix.row_text(2), "|        |");
        assert_eq!(matrix.row_text(4), "+--------+");
    }

    #[test]
    fn test_rows_iter_shape() {
        let matrix = Matrix::new(3, 2);
        let rows: Vec<_> = matrix.rows().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 3));
        assert_eq!(Matrix::new(0, 4).rows().count(), 0);
    }
}
