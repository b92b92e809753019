//! Canonical option and optgroup value types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single selectable entry of the widget
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectOption {
    /// Unique value within the owning control
    pub value: String,
    /// Display label, also the search key
    pub text: String,
    /// Rich label override
    pub html: Option<String>,
    /// Whether the option is currently selected
    pub selected: bool,
    /// Disabled options can never become selected
    pub disabled: bool,
    /// Marks the single-select "no selection" sentinel
    pub placeholder: bool,
    /// Extra class passed through to the renderer
    pub class: Option<String>,
    /// Arbitrary pass-through attributes (`data-*` on the native option)
    pub data: BTreeMap<String, String>,
}

impl SelectOption {
    /// Create an unselected option
    #[must_use]
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set disabled state
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set selected state
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Mark as the placeholder sentinel
    #[must_use]
    pub const fn placeholder(mut self, placeholder: bool) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Whether this option can be turned on by a selection operation
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        !self.disabled && !self.placeholder
    }

    /// The field addressed by `by`
    #[must_use]
    pub fn key(&self, by: MatchBy) -> &str {
        match by {
            MatchBy::Value => &self.value,
            MatchBy::Text => &self.text,
        }
    }
}

/// Which option field a lookup compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchBy {
    /// Compare against `value`
    #[default]
    Value,
    /// Compare against `text`
    Text,
}

impl MatchBy {
    /// Lowercase name used in messages and on the command line
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for MatchBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered group of options
///
/// Top-level options of a control live in implicit groups whose label is
/// empty. Each contiguous run of ungrouped options forms one implicit group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Optgroup {
    /// Group label, empty for implicit groups
    pub label: String,
    /// Native `<optgroup disabled>`
    pub disabled: bool,
    /// Options in native order
    pub options: Vec<SelectOption>,
}

impl Optgroup {
    /// Create a labelled group
    #[must_use]
    pub fn new(label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            options,
        }
    }

    /// Create the implicit group used for ungrouped options
    #[must_use]
    pub fn implicit(options: Vec<SelectOption>) -> Self {
        Self::new(String::new(), options)
    }

    /// Whether this group stands for ungrouped options
    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        self.label.is_empty()
    }
}

/// Selection mode, fixed when the widget is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// At most one real option selected
    #[default]
    Single,
    /// Any number of enabled options selected
    Multiple,
}

impl Mode {
    /// Mode matching a native `multiple` attribute
    #[must_use]
    pub const fn from_multiple(multiple: bool) -> Self {
        if multiple { Self::Multiple } else { Self::Single }
    }

    /// Check for multi mode
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple)
    }
}

/// Iterate every option of every group in model order
pub fn options(groups: &[Optgroup]) -> impl Iterator<Item = &SelectOption> {
    groups.iter().flat_map(|group| group.options.iter())
}

/// Mutable counterpart of [`options`]
pub fn options_mut(groups: &mut [Optgroup]) -> impl Iterator<Item = &mut SelectOption> {
    groups.iter_mut().flat_map(|group| group.options.iter_mut())
}
