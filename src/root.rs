//! The root of a widget tree
//!
//! A `RootWindow` is a full-screen window that owns the backend and runs the
//! render/input loop: draw the tree, diff it against the last frame, place
//! the cursor, block for one event, dispatch it, repeat.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::backend::Backend;
use crate::core::{Matrix, Window};
use crate::error::Result;
use crate::input::Event;
use crate::renderer::{DiffRenderer, RenderStats};
use crate::widget::Widget;

/// Standard terminal size
pub const DEFAULT_COLS: usize = 80;
pub const DEFAULT_ROWS: usize = 24;

#[derive(Debug)]
struct QuitState {
    running: bool,
    ret_val: Option<String>,
}

/// Cloneable request to stop a running `RootWindow`.
///
/// Callbacks inside the tree (a Button's click handler, typically) hold one
/// of these; the loop checks it before every iteration.
#[derive(Debug, Clone)]
pub struct QuitHandle {
    state: Rc<RefCell<QuitState>>,
}

impl QuitHandle {
    fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(QuitState {
                running: true,
                ret_val: None,
            })),
        }
    }

    /// Stop the loop after the current event, returning `ret_val` from `run()`
    pub fn quit(&self, ret_val: Option<String>) {
        let mut state = self.state.borrow_mut();
        state.running = false;
        state.ret_val = ret_val;
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    fn take_ret_val(&self) -> Option<String> {
        self.state.borrow_mut().ret_val.take()
    }
}

/// The top-level window bound to a backend
pub struct RootWindow<B: Backend> {
    window: Window,
    backend: B,
    renderer: DiffRenderer,
    quit: QuitHandle,
}

impl<B: Backend> RootWindow<B> {
    /// A borderless 80x24 root, selected
    pub fn new(backend: B) -> Self {
        Self::with_size(backend, DEFAULT_COLS, DEFAULT_ROWS)
    }

    pub fn with_size(backend: B, cols: usize, rows: usize) -> Self {
        let mut window = Window::new(0, 0, cols, rows).with_border(false);
        window.set_selected(true);
        Self {
            window,
            backend,
            renderer: DiffRenderer::new(cols, rows),
            quit: QuitHandle::new(),
        }
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.window.border = border;
        self
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Add a focus-eligible child to the root
    pub fn add(&mut self, child: impl Into<Widget>) -> usize {
        self.window.add(child)
    }

    pub fn add_passive(&mut self, child: impl Into<Widget>) {
        self.window.add_passive(child);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The frame currently on screen
    pub fn screen(&self) -> &Matrix {
        self.renderer.previous()
    }

    pub fn quit_handle(&self) -> QuitHandle {
        self.quit.clone()
    }

    pub fn quit(&mut self, ret_val: Option<String>) {
        self.quit.quit(ret_val);
    }

    pub fn is_running(&self) -> bool {
        self.quit.is_running()
    }

    /// Run until something quits, returning the quit value.
    ///
    /// A quit requested before the call returns immediately.
    pub fn run(&mut self) -> Result<Option<String>> {
        self.backend.reset_screen()?;
        self.renderer.reset();

        while self.quit.is_running() {
            self.run_loop()?;
        }

        info!("run loop finished");
        self.backend.flush()?;
        Ok(self.quit.take_ret_val())
    }

    /// One iteration: render, place the cursor, wait, dispatch
    pub fn run_loop(&mut self) -> Result<()> {
        self.render()?;

        let (row, col) = self.cursor_pos();
        self.backend.set_cursor_pos(row, col)?;

        let event = self.backend.wait_event()?;
        debug!("event {:?}", event);
        self.handle_event(event);
        Ok(())
    }

    /// Draw the tree, writing only what changed since the last frame
    pub fn render(&mut self) -> Result<RenderStats> {
        let frame = self.window.matrix();
        let stats = self.renderer.render(frame, &mut self.backend)?;
        if stats.changed_cells > 0 {
            debug!(
                "rendered {} cells, {} cursor moves, {} style changes",
                stats.changed_cells, stats.cursor_moves, stats.style_changes
            );
        }
        Ok(stats)
    }

    /// Absolute cursor position resolved down the focus chain
    pub fn cursor_pos(&self) -> (usize, usize) {
        self.window.cursor_pos(true)
    }

    /// Dispatch into the tree. Escape on a selected root ends the loop.
    pub fn handle_event(&mut self, event: Event) -> Option<Event> {
        if event == Event::Escape && self.window.is_selected() {
            self.quit(None);
            return None;
        }
        self.window.handle_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ScriptedBackend;
    use crate::core::Style;
    use crate::widget::{Button, Label, Textbox};

    #[test]
    fn test_escape_on_selected_root_quits() {
        let mut root = RootWindow::new(ScriptedBackend::new([Event::Escape]));
        assert_eq!(root.run().unwrap(), None);
        assert!(!root.is_running());
        assert_eq!(root.backend().resets(), 1);
    }

    #[test]
    fn test_button_quits_with_value() {
        let mut root = RootWindow::new(ScriptedBackend::new([Event::Down, Event::Enter]));
        root.add(Textbox::new(1, 1));
        let quit = root.quit_handle();
        root.add(Button::new(3, 1, "OK").on_click(move || quit.quit(Some("ok".into()))));

        assert_eq!(root.run().unwrap(), Some("ok".to_string()));
        assert_eq!(root.backend().remaining(), 0);
    }

    #[test]
    fn test_typing_reaches_textbox_and_screen() {
        let events = "hi".chars().map(Event::char).chain([Event::Escape]);
        let mut root = RootWindow::with_size(ScriptedBackend::new(events), 20, 4);
        root.add(Textbox::new(1, 2));
        root.run().unwrap();

        // the last frame was drawn after 'i', before escape quit
        assert_eq!(root.screen().row_text(1), "  hi                ");
        let tb = root.window().child(0).and_then(Widget::as_textbox).unwrap();
        assert_eq!(tb.text(), "hi");
    }

    #[test]
    fn test_cursor_follows_textbox() {
        let mut root = RootWindow::with_size(ScriptedBackend::new([Event::char('a')]), 20, 4);
        root.add(Textbox::new(2, 3));
        assert!(root.run().is_err());
        // one character typed before the script ran dry
        assert_eq!(root.backend().cursor(), Some((2, 4)));
    }

    #[test]
    fn test_render_twice_changes_nothing() {
        let mut root = RootWindow::with_size(ScriptedBackend::default(), 20, 5).with_border(true);
        root.add_passive(Label::styled(1, 1, "title", Style::BOLD));

        let first = root.render().unwrap();
        assert!(first.changed_cells > 0);
        let second = root.render().unwrap();
        assert_eq!(second.changed_cells, 0);
    }

    #[test]
    fn test_quit_before_run_returns_value() {
        let mut root = RootWindow::new(ScriptedBackend::new([Event::Escape]));
        root.quit(Some("bye".into()));
        assert!(!root.is_running());
        assert_eq!(root.run().unwrap(), Some("bye".to_string()));
        // the loop never waited for input
        assert_eq!(root.backend().remaining(), 1);
    }

    #[test]
    fn test_escape_inside_focused_window_returns_to_root() {
        let mut inner = Window::new(2, 2, 10, 4);
        inner.add(Textbox::new(1, 1));
        let events = [Event::Enter, Event::char('x'), Event::Escape, Event::Escape];
        let mut root = RootWindow::new(ScriptedBackend::new(events));
        root.add(inner);

        assert_eq!(root.run().unwrap(), None);
        assert_eq!(root.backend().remaining(), 0);
        let inner = root.window().child(0).and_then(Widget::as_window).unwrap();
        assert!(!inner.is_selected());
        assert_eq!(inner.child(0).and_then(Widget::as_textbox).unwrap().text(), "x");
    }
}
