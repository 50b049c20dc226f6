//! Minicurses Widgets
//!
//! Every node of the tree is a [`Widget`]: a closed set of variants sharing one
//! capability (render to a matrix, handle an event, report a cursor position,
//! carry a selection flag). Leaves live in this module; the composite
//! [`Window`] lives in `core::window`.

pub mod ascii_art;
pub mod button;
pub mod label;
pub mod multiline_label;
pub mod textbox;

pub use ascii_art::AsciiArt;
pub use button::Button;
pub use label::Label;
pub use multiline_label::{Gravity, MultilineLabel};
pub use textbox::Textbox;

use crate::core::{Matrix, Window};
use crate::input::Event;

/// Position relative to the parent's origin, plus the selection flag.
///
/// This is the only state every variant shares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub selected: bool,
}

impl Placement {
    pub fn at(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            selected: false,
        }
    }

    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// A node of the widget tree
pub enum Widget {
    Label(Label),
    MultilineLabel(MultilineLabel),
    Button(Button),
    AsciiArt(AsciiArt),
    Textbox(Textbox),
    Window(Window),
}

impl Widget {
    /// Offer an event; the reply (if any) goes back to the parent
    pub fn handle_event(&mut self, event: Event) -> Option<Event> {
        match self {
            Widget::Label(_) | Widget::MultilineLabel(_) | Widget::AsciiArt(_) => None,
            Widget::Button(w) => w.handle_event(event),
            Widget::Textbox(w) => w.handle_event(event),
            Widget::Window(w) => w.handle_event(event),
        }
    }

    /// Render the widget at its declared size
    pub fn matrix(&self) -> Matrix {
        match self {
            Widget::Label(w) => w.matrix(),
            Widget::MultilineLabel(w) => w.matrix(),
            Widget::Button(w) => w.matrix(),
            Widget::AsciiArt(w) => w.matrix(),
            Widget::Textbox(w) => w.matrix(),
            Widget::Window(w) => w.matrix(),
        }
    }

    /// Cursor position in the parent's coordinate frame
    pub fn cursor_pos(&self, recursive: bool) -> (usize, usize) {
        match self {
            Widget::Textbox(w) => w.cursor_pos(),
            Widget::Window(w) => w.cursor_pos(recursive),
            other => other.placement().origin(),
        }
    }

    pub fn placement(&self) -> &Placement {
        match self {
            Widget::Label(w) => &w.placement,
            Widget::MultilineLabel(w) => &w.label.placement,
            Widget::Button(w) => &w.label.placement,
            Widget::AsciiArt(w) => &w.placement,
            Widget::Textbox(w) => &w.placement,
            Widget::Window(w) => &w.placement,
        }
    }

    pub fn placement_mut(&mut self) -> &mut Placement {
        match self {
            Widget::Label(w) => &mut w.placement,
            Widget::MultilineLabel(w) => &mut w.label.placement,
            Widget::Button(w) => &mut w.label.placement,
            Widget::AsciiArt(w) => &mut w.placement,
            Widget::Textbox(w) => &mut w.placement,
            Widget::Window(w) => &mut w.placement,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.placement_mut().selected = selected;
    }

    pub fn is_selected(&self) -> bool {
        self.placement().selected
    }

    pub fn as_textbox(&self) -> Option<&Textbox> {
        match self {
            Widget::Textbox(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_textbox_mut(&mut self) -> Option<&mut Textbox> {
        match self {
            Widget::Textbox(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_window(&self) -> Option<&Window> {
        match self {
            Widget::Window(w) => Some(w),
            _ => None,
        }
    }
}

impl From<Label> for Widget {
    fn from(w: Label) -> Self {
        Widget::Label(w)
    }
}

impl From<MultilineLabel> for Widget {
    fn from(w: MultilineLabel) -> Self {
        Widget::MultilineLabel(w)
    }
}

impl From<Button> for Widget {
    fn from(w: Button) -> Self {
        Widget::Button(w)
    }
}

impl From<AsciiArt> for Widget {
    fn from(w: AsciiArt) -> Self {
        Widget::AsciiArt(w)
    }
}

impl From<Textbox> for Widget {
    fn from(w: Textbox) -> Self {
        Widget::Textbox(w)
    }
}

impl From<Window> for Widget {
    fn from(w: Window) -> Self {
        Widget::Window(w)
    }
}
