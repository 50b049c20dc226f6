//! Minicurses Core Module
//!
//! Core data structures for the widget engine:
//! - Cell: Individual character cell
//! - Matrix: 2D grid produced by every widget
//! - Window: Container and focus router

pub mod cell;
pub mod matrix;
pub mod window;

pub use cell::{Cell, Style};
pub use matrix::{BorderGlyphs, Matrix};
pub use window::Window;
