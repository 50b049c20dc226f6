//! Static character art (logos, templates) loaded from a text file

use std::fs;
use std::path::Path;

use super::Placement;
use crate::core::{Cell, Matrix};
use crate::error::{Error, Result};

/// An immutable block of characters.
///
/// Every row is padded to the longest one; the size comes from the content.
#[derive(Debug, Clone)]
pub struct AsciiArt {
    pub placement: Placement,
    matrix: Matrix,
}

impl AsciiArt {
    /// Load art from a file, one matrix row per line
    pub fn from_file(row: usize, col: usize, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Art {
            path: path.to_path_buf(),
            source,
        })?;
        if text.is_empty() {
            return Err(Error::EmptyArt {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::from_text(row, col, &text))
    }

    pub fn from_text(row: usize, col: usize, text: &str) -> Self {
        let rows = text
            .lines()
            .map(|line| line.chars().map(Cell::plain).collect())
            .collect();
        Self {
            placement: Placement::at(row, col),
            matrix: Matrix::from_rows(rows),
        }
    }

    pub fn width(&self) -> usize {
        self.matrix.cols
    }

    pub fn height(&self) -> usize {
        self.matrix.rows
    }

    pub fn matrix(&self) -> Matrix {
        self.matrix.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rows_padded_to_longest() {
        let art = AsciiArt::from_text(0, 0, " /\\\n/__\\\n||");
        assert_eq!(art.width(), 4);
        assert_eq!(art.height(), 3);
        let m = art.matrix();
        assert_eq!(m.row_text(0), " /\\ ");
        assert_eq!(m.row_text(2), "||  ");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ab\r\nc\n").unwrap();
        let art = AsciiArt::from_file(1, 1, file.path()).unwrap();
        assert_eq!(art.width(), 2);
        assert_eq!(art.height(), 2);
        assert_eq!(art.matrix().row_text(1), "c ");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = AsciiArt::from_file(0, 0, "/nonexistent/logo.txt").unwrap_err();
        assert!(matches!(err, Error::Art { .. }));
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = AsciiArt::from_file(0, 0, file.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyArt { .. }));
    }
}
