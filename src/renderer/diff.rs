//! Minimal-redraw renderer
//!
//! Keeps the last frame sent to the device and, for each new frame, writes
//! only the cells that differ. Two rules keep the byte count down:
//! - the cursor is repositioned only at the start of a run of changed cells
//!   (the terminal advances it by itself inside a run)
//! - style escapes are written only when the style actually changes, and a
//!   single reset closes a styled run followed by a plain cell

use crate::backend::Backend;
use crate::core::{Cell, Matrix, Style};
use crate::error::Result;

/// What a render pass wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub changed_cells: usize,
    pub cursor_moves: usize,
    /// Style switches between cells. The reset that opens every changed
    /// frame is not counted.
    pub style_changes: usize,
}

/// Frame differ
pub struct DiffRenderer {
    previous: Matrix,
}

impl DiffRenderer {
    /// Start from a blank screen of the given size
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            previous: Matrix::new(cols, rows),
        }
    }

    /// The last frame written
    pub fn previous(&self) -> &Matrix {
        &self.previous
    }

    /// Forget the last frame; the device is assumed blank
    pub fn reset(&mut self) {
        self.previous = Matrix::new(self.previous.cols, self.previous.rows);
    }

    fn changed(&self, frame: &Matrix, row: usize, col: usize) -> bool {
        self.previous.get(row, col) != frame.get(row, col)
    }

    /// Write the difference between `frame` and the previous frame
    pub fn render<B: Backend + ?Sized>(&mut self, frame: Matrix, backend: &mut B) -> Result<RenderStats> {
        let reset = backend.style_escape(Style::DEFAULT);
        let mut stats = RenderStats::default();
        let mut mode = Style::DEFAULT;
        let mut started = false;

        for row in 0..frame.rows {
            let mut run = false;
            for col in 0..frame.cols {
                if !self.changed(&frame, row, col) {
                    run = false;
                    continue;
                }
                let cell = frame.get(row, col).copied().unwrap_or(Cell::BLANK);

                if !started {
                    // The device style is unknown between frames
                    backend.write(reset)?;
                    started = true;
                }

                if !run {
                    backend.set_cursor_pos(row, col)?;
                    stats.cursor_moves += 1;
                }

                if !cell.is_plain() && cell.style != mode {
                    backend.write(reset)?;
                    for flag in cell.style.iter().filter(|f| *f != Style::DEFAULT) {
                        let escape = backend.style_escape(flag);
                        backend.write(escape)?;
                    }
                    mode = cell.style;
                    stats.style_changes += 1;
                } else if cell.is_plain() && !mode.is_default() {
                    backend.write(reset)?;
                    mode = Style::DEFAULT;
                    stats.style_changes += 1;
                }

                let mut buf = [0u8; 4];
                backend.write(printable(cell.ch).encode_utf8(&mut buf))?;
                stats.changed_cells += 1;
                run = true;
            }
        }

        self.previous = frame;
        Ok(stats)
    }
}

/// Control characters would corrupt the device state
fn printable(ch: char) -> char {
    if ch < ' ' || ch == '\x7f' {
        ' '
    } else {
        ch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ScriptedBackend;

    fn line(text: &str, style: Style) -> Matrix {
        let mut m = Matrix::new(10, 2);
        m.write_str(0, 0, text, style);
        m
    }

    #[test]
    fn test_second_identical_render_writes_nothing() {
        let mut renderer = DiffRenderer::new(10, 2);
        let mut backend = ScriptedBackend::default();

        let stats = renderer.render(line("hello", Style::BOLD), &mut backend).unwrap();
        assert_eq!(stats.changed_cells, 5);
        backend.take_output();

        let stats = renderer.render(line("hello", Style::BOLD), &mut backend).unwrap();
        assert_eq!(stats, RenderStats::default());
        assert_eq!(backend.output(), "");
    }

    #[test]
    fn test_contiguous_run_moves_cursor_once() {
        let mut renderer = DiffRenderer::new(10, 2);
        let mut backend = ScriptedBackend::default();

        let stats = renderer.render(line("abc", Style::DEFAULT), &mut backend).unwrap();
        assert_eq!(backend.take_output(), "\x1b[0m\x1b[1;1Habc");
        // the opening reset is not a style change
        assert_eq!(stats.style_changes, 0);
    }

    #[test]
    fn test_gap_in_changes_moves_cursor_again() {
        let mut renderer = DiffRenderer::new(10, 2);
        let mut backend = ScriptedBackend::default();
        renderer.render(line("abcde", Style::DEFAULT), &mut backend).unwrap();
        backend.take_output();

        let stats = renderer.render(line("xbcdy", Style::DEFAULT), &mut backend).unwrap();
        assert_eq!(stats.changed_cells, 2);
        assert_eq!(stats.cursor_moves, 2);
        assert_eq!(backend.take_output(), "\x1b[0m\x1b[1;1Hx\x1b[1;5Hy");
    }

    #[test]
    fn test_style_escapes_only_on_change() {
        let mut m = Matrix::new(6, 1);
        m.write_str(0, 0, "ab", Style::BOLD | Style::UNDERLINE);
        m.write_str(0, 2, "cd", Style::DEFAULT);
        m.write_str(0, 4, "e", Style::INVERTED);

        let mut renderer = DiffRenderer::new(6, 1);
        let mut backend = ScriptedBackend::default();
        let stats = renderer.render(m, &mut backend).unwrap();

        assert_eq!(
            backend.output(),
            "\x1b[0m\x1b[1;1H\x1b[0m\x1b[1m\x1b[4mab\x1b[0mcd\x1b[0m\x1b[7me"
        );
        assert_eq!(stats.style_changes, 3);
        assert_eq!(stats.cursor_moves, 1);
    }

    #[test]
    fn test_style_only_change_is_a_change() {
        let mut renderer = DiffRenderer::new(10, 2);
        let mut backend = ScriptedBackend::default();
        renderer.render(line("a", Style::DEFAULT), &mut backend).unwrap();
        let stats = renderer.render(line("a", Style::BLINKING), &mut backend).unwrap();
        assert_eq!(stats.changed_cells, 1);
    }

    #[test]
    fn test_blank_frame_on_blank_screen_writes_nothing() {
        let mut renderer = DiffRenderer::new(4, 4);
        let mut backend = ScriptedBackend::default();
        let stats = renderer.render(Matrix::new(4, 4), &mut backend).unwrap();
        assert_eq!(stats.changed_cells, 0);
        assert_eq!(backend.output(), "");
    }

    #[test]
    fn test_reset_forgets_previous_frame() {
        let mut renderer = DiffRenderer::new(10, 2);
        let mut backend = ScriptedBackend::default();
        renderer.render(line("abc", Style::DEFAULT), &mut backend).unwrap();
        renderer.reset();
        let stats = renderer.render(line("abc", Style::DEFAULT), &mut backend).unwrap();
        assert_eq!(stats.changed_cells, 3);
    }

    #[test]
    fn test_control_chars_sanitized() {
        let mut renderer = DiffRenderer::new(2, 1);
        let mut backend = ScriptedBackend::default();
        renderer
            .render(Matrix::from_line("\x07z", Style::DEFAULT), &mut backend)
            .unwrap();
        assert!(backend.output().ends_with(" z"));
    }
}
