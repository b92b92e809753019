//! Slimselect - A searchable select widget core
//!
//! This library keeps a widget-owned model of a native `<select>` control in
//! sync with the control itself, filters options by a search query and
//! drives an open/closed dropdown. Drawing is left to a [`render::Renderer`].

use thiserror::Error;

pub mod bridge;
pub mod cli;
pub mod config;
pub mod data;
pub mod dom;
pub mod render;
pub mod search;
pub mod select;
pub mod selection;
pub mod state;

#[cfg(test)]
pub mod testing;

pub use crate::config::Settings;
pub use crate::data::{DataNode, MatchBy, Mode, Optgroup, SelectOption};
pub use crate::select::SlimSelect;
pub use crate::selection::SetValue;

/// Error enum, contains all failure states of the library
#[derive(Debug, Error)]
pub enum SlimSelectError {
    /// The target element is missing or not a select
    #[error("Construction error: {0}")]
    Construction(String),
    /// Malformed option data
    #[error("Data error: {0}")]
    Shape(#[from] data::ShapeError),
    /// Selection request that matched nothing
    #[error("Selection error: {0}")]
    Selection(#[from] selection::SelectionError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert() {
        let err: SlimSelectError = selection::SelectionError::ValueNotFound {
            value: "9".to_string(),
            by: MatchBy::Value,
        }
        .into();
        assert!(err.to_string().starts_with("Selection error"));

        let err: SlimSelectError = std::io::Error::other("gone").into();
        assert!(matches!(err, SlimSelectError::Io(_)));
    }
}
