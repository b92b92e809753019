//! Canonical data model of the widget
//!
//! [`Data`] owns the option groups, the current search query and the open
//! flag. The filtered view is never stored as data of its own: it is an
//! index derived from the groups and the query, rebuilt whenever either of
//! them is replaced.

pub mod error;
pub mod tree;
mod types;

pub use error::ShapeError;
pub use tree::{DataNode, OptgroupData, OptionData, validate};
pub use types::{MatchBy, Mode, Optgroup, SelectOption, options, options_mut};

use crate::search::FilterIndex;

/// Widget-owned model of options, search and visibility
#[derive(Debug, Clone, Default)]
pub struct Data {
    optgroups: Vec<Optgroup>,
    search_value: String,
    content_open: bool,
    filtered: FilterIndex,
}

impl Data {
    /// Build a model around freshly imported groups
    #[must_use]
    pub fn new(optgroups: Vec<Optgroup>) -> Self {
        let filtered = FilterIndex::identity(&optgroups);
        Self {
            optgroups,
            search_value: String::new(),
            content_open: false,
            filtered,
        }
    }

    /// All option groups in native order
    #[must_use]
    pub fn optgroups(&self) -> &[Optgroup] {
        &self.optgroups
    }

    pub(crate) fn optgroups_mut(&mut self) -> &mut [Optgroup] {
        &mut self.optgroups
    }

    /// Swap in a new set of groups, keeping the active query applied
    pub fn replace_optgroups(&mut self, optgroups: Vec<Optgroup>) {
        self.optgroups = optgroups;
        self.filtered = FilterIndex::build(&self.optgroups, &self.search_value);
    }

    /// Current search query, empty when not filtering
    #[must_use]
    pub fn search_value(&self) -> &str {
        &self.search_value
    }

    /// Update the query and rebuild the filtered view
    ///
    /// Returns `false` without doing any work when the query is unchanged.
    pub fn search(&mut self, query: &str) -> bool {
        if self.search_value == query {
            return false;
        }
        self.search_value = query.to_string();
        self.filtered = FilterIndex::build(&self.optgroups, query);
        true
    }

    /// Whether the dropdown content is visible
    #[must_use]
    pub const fn content_open(&self) -> bool {
        self.content_open
    }

    pub(crate) const fn set_content_open(&mut self, open: bool) {
        self.content_open = open;
    }

    /// Groups left after applying the current query
    #[must_use]
    pub fn filtered(&self) -> Vec<Optgroup> {
        self.filtered.materialize(&self.optgroups)
    }

    /// Number of options visible under the current query
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Look up an option by value or text
    #[must_use]
    pub fn find(&self, key: &str, by: MatchBy) -> Option<&SelectOption> {
        options(&self.optgroups).find(|option| option.key(by) == key)
    }

    /// The placeholder option, if the control has one
    #[must_use]
    pub fn placeholder(&self) -> Option<&SelectOption> {
        options(&self.optgroups).find(|option| option.placeholder)
    }
}
