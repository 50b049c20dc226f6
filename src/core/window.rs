//! Minicurses Window
//!
//! A window is a bordered container. It draws its children and routes
//! keystrokes and focus signals between them.
//!
//! ## Focus
//!
//! A window is either SELECTED (it owns the keyboard at its level: arrows and
//! Tab move between children, Enter activates the active child, Escape hands
//! focus back up) or UNSELECTED (it relays everything to its active child).
//! Focus moves with two synthetic events: a child that receives `Focus`
//! becomes selected and answers `Defocus`, which deselects the parent that
//! relayed it. Escape deselects a window and answers `Focus`, which
//! reselects the parent.

use log::{debug, warn};

use super::matrix::{BorderGlyphs, Matrix};
use crate::input::Event;
use crate::widget::{Placement, Widget};

/// Upper bound on re-offering a child's reply to the same window.
/// Real chains are at most Focus -> Defocus.
const MAX_RELAY_DEPTH: usize = 4;

/// Outcome of one dispatch step
enum Step {
    /// Reply to the parent
    Done(Option<Event>),
    /// A child replied; offer the reply to this window again
    Relay(Option<Event>),
}

/// A container widget
pub struct Window {
    pub placement: Placement,
    /// Size, including border
    pub width: usize,
    pub height: usize,
    /// Draw the border glyphs on the outer edge
    pub border: bool,
    pub glyphs: BorderGlyphs,
    /// Focus-eligible children
    children: Vec<Widget>,
    /// Drawn on top of `children`, never focused
    passive_children: Vec<Widget>,
    active: usize,
}

impl Window {
    /// Create a bordered window
    pub fn new(row: usize, col: usize, width: usize, height: usize) -> Self {
        Self {
            placement: Placement::at(row, col),
            width,
            height,
            border: true,
            glyphs: BorderGlyphs::default(),
            children: Vec::new(),
            passive_children: Vec::new(),
            active: 0,
        }
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn with_glyphs(mut self, corner: char, vertical: char, horizontal: char) -> Self {
        self.glyphs = BorderGlyphs {
            corner,
            horizontal,
            vertical,
        };
        self
    }

    /// Add a focus-eligible child, returning its index
    pub fn add(&mut self, child: impl Into<Widget>) -> usize {
        self.children.push(child.into());
        self.children.len() - 1
    }

    /// Add a decoration drawn over the interactive children
    pub fn add_passive(&mut self, child: impl Into<Widget>) {
        self.passive_children.push(child.into());
    }

    pub fn children(&self) -> &[Widget] {
        &self.children
    }

    pub fn passive_children(&self) -> &[Widget] {
        &self.passive_children
    }

    pub fn child(&self, index: usize) -> Option<&Widget> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Widget> {
        self.children.get_mut(index)
    }

    /// Index of the active child
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_child(&self) -> Option<&Widget> {
        self.children.get(self.active)
    }

    fn active_child_mut(&mut self) -> Option<&mut Widget> {
        self.children.get_mut(self.active)
    }

    /// Make child `index` (modulo the child count) the active one
    pub fn select_child(&mut self, index: usize) {
        if !self.children.is_empty() {
            self.active = index % self.children.len();
            debug!("active child is now {}", self.active);
        }
    }

    fn select_previous(&mut self) {
        let n = self.children.len();
        if n > 0 {
            self.select_child(self.active + n - 1);
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.placement.selected = selected;
    }

    pub fn is_selected(&self) -> bool {
        self.placement.selected
    }

    /// Dispatch an event through this window.
    ///
    /// Whatever the active child answers is fed back into this window until
    /// something is returned to the parent or the event is consumed.
    pub fn handle_event(&mut self, event: Event) -> Option<Event> {
        let mut pending = Some(event);
        for _ in 0..MAX_RELAY_DEPTH {
            let event = pending?;
            match self.step(event) {
                Step::Done(reply) => return reply,
                Step::Relay(reply) => pending = reply,
            }
        }
        if let Some(event) = pending {
            warn!("dropping {:?} after {} relays", event, MAX_RELAY_DEPTH);
        }
        None
    }

    fn step(&mut self, event: Event) -> Step {
        if self.placement.selected {
            match event {
                Event::Enter => {
                    // the reply only updates this window; Enter stops here
                    let reply = self
                        .active_child_mut()
                        .and_then(|child| child.handle_event(Event::Focus));
                    if let Some(reply) = reply {
                        self.handle_event(reply);
                    }
                    return Step::Done(None);
                }
                Event::Escape => {
                    self.placement.selected = false;
                    return Step::Done(Some(Event::Focus));
                }
                Event::Down | Event::Tab => {
                    self.select_child(self.active + 1);
                    return Step::Done(None);
                }
                Event::Up => {
                    self.select_previous();
                    return Step::Done(None);
                }
                _ => {}
            }
        }

        match event {
            Event::Focus => {
                self.placement.selected = true;
                Step::Done(Some(Event::Defocus))
            }
            Event::Defocus => {
                self.placement.selected = false;
                Step::Done(Some(Event::Defocus))
            }
            other => match self.active_child_mut() {
                Some(child) => Step::Relay(child.handle_event(other)),
                None => Step::Done(None),
            },
        }
    }

    /// Render the border and all children, clipped to the window
    pub fn matrix(&self) -> Matrix {
        let mut matrix = Matrix::new(self.width, self.height);

        if self.border {
            matrix.draw_border(&self.glyphs);
        }

        for child in self.children.iter().chain(self.passive_children.iter()) {
            let at = child.placement();
            matrix.merge(&child.matrix(), at.row, at.col);
        }

        matrix
    }

    /// Cursor position in the parent's frame.
    ///
    /// A selected window stops the descent one level down: its active child
    /// reports its own position without recursing further.
    pub fn cursor_pos(&self, recursive: bool) -> (usize, usize) {
        let (row, col) = self.placement.origin();
        match self.active_child() {
            Some(child) if recursive => {
                let (r, c) = child.cursor_pos(!self.placement.selected);
                (r + row, c + col)
            }
            _ => (row, col),
        }
    }
}
