//! A label that reacts to being focused

use super::{Label, Placement};
use crate::core::Matrix;
use crate::input::Event;

type ClickHandler = Box<dyn FnMut()>;

/// A clickable label.
///
/// A window "clicks" its active child by sending it `Event::Focus` on Enter.
pub struct Button {
    pub(crate) label: Label,
    on_click: Option<ClickHandler>,
}

impl Button {
    pub fn new(row: usize, col: usize, text: impl Into<String>) -> Self {
        Self::from_label(Label::new(row, col, text))
    }

    pub fn from_label(label: Label) -> Self {
        Self {
            label,
            on_click: None,
        }
    }

    /// Set the click callback
    pub fn on_click(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn placement(&self) -> &Placement {
        &self.label.placement
    }

    pub fn text(&self) -> &str {
        self.label.text()
    }

    /// Run the click callback, if any
    pub fn click(&mut self) {
        if let Some(handler) = self.on_click.as_mut() {
            handler();
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Event> {
        if event == Event::Focus {
            self.click();
        }
        None
    }

    pub fn matrix(&self) -> Matrix {
        self.label.matrix()
    }
}
