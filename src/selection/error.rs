//! Selection error types

use crate::data::MatchBy;
use thiserror::Error;

/// Errors raised by single-mode selection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// No option matched the requested key
    #[error("No option with {by} '{value}'")]
    ValueNotFound {
        /// Requested key
        value: String,
        /// Field it was compared against
        by: MatchBy,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_not_found_message() {
        let error = SelectionError::ValueNotFound {
            value: "purple".to_string(),
            by: MatchBy::Text,
        };
        assert_eq!(error.to_string(), "No option with text 'purple'");
    }
}
