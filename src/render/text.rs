//! Plain-text renderer used by the command line front end

use super::{RenderView, Renderer};
use crate::data::SelectOption;
use colored::Colorize;
use std::fmt::Write;

/// Renders the widget as lines of text
///
/// The last frame is kept for printing. Colors are opt-in so the output can
/// be compared in tests and piped into files.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    color: bool,
    output: String,
    frames: usize,
}

impl TextRenderer {
    /// Renderer without ANSI colors
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Renderer with ANSI colors
    #[must_use]
    pub fn colored() -> Self {
        Self {
            color: true,
            ..Self::default()
        }
    }

    /// Text of the last frame
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Number of frames drawn so far
    #[must_use]
    pub const fn frames(&self) -> usize {
        self.frames
    }

    fn paint_selected(&self, text: &str) -> String {
        if self.color { text.green().bold().to_string() } else { text.to_string() }
    }

    fn paint_dim(&self, text: &str) -> String {
        if self.color { text.dimmed().to_string() } else { text.to_string() }
    }

    fn header(&self, view: &RenderView<'_>) -> String {
        let mut header = if view.selected.is_empty() {
            self.paint_dim(&format!("[{}]", view.settings.placeholder))
        } else if view.mode.is_multiple() {
            view.selected
                .iter()
                .map(|option| self.paint_selected(&format!("[{} x]", label(option))))
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            self.paint_selected(&format!("[{}]", label(view.selected[0])))
        };

        header.push_str(if view.content_open { " ^" } else { " v" });
        if !view.is_enabled {
            header.push_str(&self.paint_dim(" (disabled)"));
        }
        header
    }
}

fn label(option: &SelectOption) -> &str {
    option.html.as_deref().unwrap_or(&option.text)
}

impl Renderer for TextRenderer {
    fn render(&mut self, view: &RenderView<'_>) {
        let mut out = self.header(view);
        out.push('\n');

        if view.content_open {
            if view.settings.show_search {
                let search = if view.search_value.is_empty() {
                    self.paint_dim(&view.settings.search_placeholder)
                } else {
                    view.search_value.to_string()
                };
                let _ = writeln!(out, "  search: {search}");
            }

            if view.is_empty() {
                let _ = writeln!(out, "  {}", self.paint_dim(&view.settings.search_text));
            }

            for group in &view.filtered {
                if !group.is_implicit() {
                    let _ = writeln!(out, "  {}", group.label);
                }
                let indent = if group.is_implicit() { "  " } else { "    " };
                for option in group.options.iter().filter(|o| !o.placeholder) {
                    let line = if option.disabled {
                        self.paint_dim(&format!("(-) {}", label(option)))
                    } else if option.selected {
                        self.paint_selected(&format!("(x) {}", label(option)))
                    } else {
                        format!("( ) {}", label(option))
                    };
                    let _ = writeln!(out, "{indent}{line}");
                }
            }
        }

        self.output = out;
        self.frames += 1;
    }
}
