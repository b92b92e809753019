//! Unit tests for shape error types

#[cfg(test)]
mod tests {
    use crate::data::error::ShapeError;

    #[test]
    fn test_missing_value_and_text_message() {
        let error = ShapeError::MissingValueAndText {
            path: "[1]".to_string(),
        };
        assert_eq!(error.to_string(), "Node at [1] has neither a value nor a text");
    }

    #[test]
    fn test_nested_optgroup_message() {
        let error = ShapeError::NestedOptgroup {
            path: "[0].options[2]".to_string(),
        };
        assert!(error.to_string().contains("[0].options[2]"));
        assert!(error.to_string().contains("nested"));
    }

    #[test]
    fn test_json_error_from_serde() {
        let json_error = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let error: ShapeError = json_error.into();
        assert!(error.to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_error_debug() {
        let error = ShapeError::OptionsNotSequence {
            path: "[3]".to_string(),
        };
        let debug = format!("{error:?}");
        assert!(debug.contains("OptionsNotSequence"));
    }
}
