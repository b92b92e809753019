//! Rendering interface consumed by the widget core
//!
//! The core decides what is visible; a [`Renderer`] only draws it. Renderers
//! receive a [`RenderView`] of shared references after every state change
//! that can affect the display, and must produce the same output for the
//! same view.

mod text;

pub use text::TextRenderer;

use crate::config::Settings;
use crate::data::{Mode, Optgroup, SelectOption};

/// Everything a renderer may look at
#[derive(Debug, Clone)]
pub struct RenderView<'a> {
    /// Selection mode
    pub mode: Mode,
    /// Whether the dropdown is open
    pub content_open: bool,
    /// Whether the widget is enabled
    pub is_enabled: bool,
    /// Current search query
    pub search_value: &'a str,
    /// Groups left after the search filter
    pub filtered: Vec<Optgroup>,
    /// Selected real options
    pub selected: Vec<&'a SelectOption>,
    /// Widget settings (placeholder and search texts)
    pub settings: &'a Settings,
}

impl RenderView<'_> {
    /// Whether the filtered view has no options left
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filtered.iter().all(|group| group.options.is_empty())
    }
}

/// Draws the widget
pub trait Renderer {
    /// Redraw from the given view
    fn render(&mut self, view: &RenderView<'_>);
}

/// Renderer that draws nothing, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &RenderView<'_>) {}
}

impl<R: Renderer> Renderer for std::rc::Rc<std::cell::RefCell<R>> {
    fn render(&mut self, view: &RenderView<'_>) {
        self.borrow_mut().render(view);
    }
}
