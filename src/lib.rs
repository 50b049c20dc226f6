//! Minicurses
//!
//! Retained-mode widget windows for character-grid terminals.
//!
//! # Overview
//!
//! Minicurses provides:
//! - A widget tree (labels, buttons, text boxes, ASCII art, nested windows)
//!   that renders to a character matrix
//! - Keyboard focus that moves down into and back out of nested windows
//! - A diff renderer that only rewrites the cells that changed
//! - Backends for the local terminal, a Minitel on a serial line, and
//!   scripted headless runs
//!
//! # Example
//!
//! ```no_run
//! use minicurses::backend::ScriptedBackend;
//! use minicurses::input::Event;
//! use minicurses::widget::{Button, Label, Textbox};
//! use minicurses::RootWindow;
//!
//! let backend = ScriptedBackend::new("bob".chars().map(Event::char).chain([Event::Down, Event::Enter]));
//! let mut root = RootWindow::new(backend);
//! root.add_passive(Label::new(1, 2, "Name:"));
//! root.add(Textbox::new(1, 8).max_width(20));
//! let quit = root.quit_handle();
//! root.add(Button::new(3, 8, "[ OK ]").on_click(move || quit.quit(Some("ok".into()))));
//!
//! let result = root.run().unwrap();
//! assert_eq!(result.as_deref(), Some("ok"));
//! ```

pub mod backend;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod log_buffer;
pub mod renderer;
pub mod root;
pub mod widget;

// Re-export commonly used types
pub use backend::{Backend, Emulator, Minitel, ScriptedBackend};
pub use config::{BackendKind, Config};
pub use core::{Cell, Matrix, Style, Window};
pub use error::{Error, Result};
pub use input::{Event, InputParser};
pub use log_buffer::LogBuffer;
pub use renderer::{DiffRenderer, RenderStats};
pub use root::{QuitHandle, RootWindow};
pub use widget::{AsciiArt, Button, Gravity, Label, MultilineLabel, Textbox, Widget};
