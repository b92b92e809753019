//! Shape errors for option trees
//!
//! Raised when an option tree passed to construction or `set_data` does not
//! have the shape of a select control. A failed validation never touches the
//! model, so the widget keeps its prior valid state.

use thiserror::Error;

/// Malformed option tree
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A node has neither `value` nor `text`
    #[error("Node at {path} has neither a value nor a text")]
    MissingValueAndText {
        /// Position of the offending node, e.g. `[2].options[0]`
        path: String,
    },

    /// `options` exists but is not a sequence
    #[error("Optgroup at {path} has an `options` field that is not a list")]
    OptionsNotSequence {
        /// Position of the offending group
        path: String,
    },

    /// An optgroup nested inside another optgroup
    #[error("Optgroup at {path} is nested inside another optgroup")]
    NestedOptgroup {
        /// Position of the nested group
        path: String,
    },

    /// More than one node marked as placeholder
    #[error("Only one placeholder option is allowed, found another at {path}")]
    DuplicatePlaceholder {
        /// Position of the second placeholder
        path: String,
    },

    /// A node or field has the wrong JSON type
    #[error("Invalid node at {path}: {reason}")]
    InvalidNode {
        /// Position of the offending node
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// Input was not parseable JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
