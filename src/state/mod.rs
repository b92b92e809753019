//! Open/closed interaction state machine
//!
//! Two states, `Closed` and `Open`, with every transition triggered from
//! outside: an API call, a click, or a completed selection. The machine
//! writes the model's `content_open` flag; nothing else may.

use crate::data::Data;
use tracing::debug;

/// Visibility of the dropdown content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentState {
    /// Content hidden
    #[default]
    Closed,
    /// Content visible
    Open,
}

impl ContentState {
    /// State matching an open flag
    #[must_use]
    pub const fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }
}

/// Where keyboard focus sits inside the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Focus is elsewhere
    #[default]
    None,
    /// The search input has focus
    SearchInput,
}

/// Outcome of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Went from `Closed` to `Open`
    Opened,
    /// Went from `Open` to `Closed`
    Closed,
    /// Request was a no-op
    Unchanged,
}

impl Transition {
    /// Whether the state changed
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// A click somewhere in the page
///
/// `path` lists the ids of the target and its ancestors, innermost first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickEvent {
    /// Ids from the click target up to the root
    pub path: Vec<String>,
}

impl ClickEvent {
    /// Click on an element with the given ancestor path
    #[must_use]
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the click landed inside the subtree rooted at `id`
    #[must_use]
    pub fn is_within(&self, id: &str) -> bool {
        self.path.iter().any(|node| node == id)
    }
}

/// Open/close transitions plus the focus they move
#[derive(Debug, Clone, Default)]
pub struct InteractionMachine {
    show_search: bool,
    focus: Focus,
}

impl InteractionMachine {
    /// Machine for a widget with or without a search input
    #[must_use]
    pub const fn new(show_search: bool) -> Self {
        Self {
            show_search,
            focus: Focus::None,
        }
    }

    /// Current content state
    #[must_use]
    pub const fn state(data: &Data) -> ContentState {
        ContentState::from_open(data.content_open())
    }

    /// Current focus target
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Request `Closed -> Open`
    ///
    /// Focus moves to the search input even when already open.
    pub fn open(&mut self, data: &mut Data) -> Transition {
        if self.show_search {
            self.focus = Focus::SearchInput;
        }
        if data.content_open() {
            return Transition::Unchanged;
        }
        data.set_content_open(true);
        debug!("content opened");
        Transition::Opened
    }

    /// Request `Open -> Closed`, clearing the search query
    pub fn close(&mut self, data: &mut Data) -> Transition {
        if !data.content_open() {
            return Transition::Unchanged;
        }
        data.set_content_open(false);
        self.focus = Focus::None;
        data.search("");
        debug!("content closed");
        Transition::Closed
    }
}
