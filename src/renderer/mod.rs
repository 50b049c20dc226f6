//! Minicurses Renderer Module
//!
//! Turns matrices into terminal output.
//! - `ansi`: VT100/ANSI escape sequences shared by both backends
//! - `diff`: minimal-redraw renderer comparing successive frames

pub mod ansi;
pub mod diff;

pub use diff::{DiffRenderer, RenderStats};
