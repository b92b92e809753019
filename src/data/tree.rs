//! Plain-data option trees accepted by `set_data`
//!
//! A tree is a list of [`DataNode`]s: options, or optgroups holding options.
//! Trees come from Rust callers directly or from JSON. Either way they pass
//! through [`validate`] before the widget touches the native control.

use super::error::ShapeError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Option description as supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionData {
    /// Option value, defaults to `text` when missing
    pub value: Option<String>,
    /// Display text, defaults to `value` when missing
    pub text: Option<String>,
    /// Rich label override
    pub html: Option<String>,
    /// Initially selected
    pub selected: bool,
    /// Disabled
    pub disabled: bool,
    /// Placeholder sentinel
    pub placeholder: bool,
    /// Extra class
    pub class: Option<String>,
    /// Pass-through attributes
    pub data: BTreeMap<String, String>,
}

impl OptionData {
    /// Option with both value and text
    #[must_use]
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Option with only a text; the value falls back to it
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
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

    /// Mark as placeholder
    #[must_use]
    pub const fn placeholder(mut self, placeholder: bool) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Value after applying the text fallback
    #[must_use]
    pub fn resolved_value(&self) -> String {
        self.value
            .clone()
            .or_else(|| self.text.clone())
            .unwrap_or_default()
    }

    /// Text after applying the value fallback
    #[must_use]
    pub fn resolved_text(&self) -> String {
        self.text
            .clone()
            .or_else(|| self.value.clone())
            .unwrap_or_default()
    }
}

/// Optgroup description as supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptgroupData {
    /// Group label
    pub label: String,
    /// Disabled group
    pub disabled: bool,
    /// Children; only options are valid here
    pub options: Vec<DataNode>,
}

/// One entry of an option tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataNode {
    /// A selectable option
    Option(OptionData),
    /// A labelled group of options
    Optgroup(OptgroupData),
}

impl DataNode {
    /// Shorthand for an option node
    #[must_use]
    pub fn option(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Option(OptionData::new(value, text))
    }

    /// Shorthand for an optgroup node
    #[must_use]
    pub fn group(label: impl Into<String>, options: Vec<Self>) -> Self {
        Self::Optgroup(OptgroupData {
            label: label.into(),
            disabled: false,
            options,
        })
    }

    /// Parse a tree from a JSON document
    ///
    /// # Errors
    ///
    /// Returns `ShapeError` if the document is not valid JSON or does not
    /// describe an option tree.
    pub fn list_from_json_str(json: &str) -> Result<Vec<Self>, ShapeError> {
        let value: Value = serde_json::from_str(json)?;
        Self::list_from_json_value(&value)
    }

    /// Parse a tree from an already decoded JSON value
    ///
    /// Only the JSON shape is checked here; run [`validate`] for the
    /// structural rules.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError` if the root is not an array or a node is malformed.
    pub fn list_from_json_value(value: &Value) -> Result<Vec<Self>, ShapeError> {
        let Value::Array(items) = value else {
            return Err(ShapeError::InvalidNode {
                path: "root".to_string(),
                reason: "expected a list of nodes".to_string(),
            });
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| node_from_json(item, &format!("[{i}]")))
            .collect()
    }
}

fn node_from_json(value: &Value, path: &str) -> Result<DataNode, ShapeError> {
    let Value::Object(map) = value else {
        return Err(ShapeError::InvalidNode {
            path: path.to_string(),
            reason: "expected an object".to_string(),
        });
    };

    if map.contains_key("label") || map.contains_key("options") {
        let options = match map.get("options") {
            None => Vec::new(),
            Some(Value::Array(children)) => children
                .iter()
                .enumerate()
                .map(|(i, child)| node_from_json(child, &format!("{path}.options[{i}]")))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ShapeError::OptionsNotSequence {
                    path: path.to_string(),
                });
            }
        };
        return Ok(DataNode::Optgroup(OptgroupData {
            label: string_field(map, "label", path)?.unwrap_or_default(),
            disabled: bool_field(map, "disabled", path)?,
            options,
        }));
    }

    let data = match map.get("data") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(attrs)) => attrs
            .iter()
            .map(|(key, value)| Ok((key.clone(), scalar_to_string(value, path, key)?)))
            .collect::<Result<BTreeMap<_, _>, ShapeError>>()?,
        Some(_) => {
            return Err(ShapeError::InvalidNode {
                path: path.to_string(),
                reason: "`data` must be an object".to_string(),
            });
        }
    };

    Ok(DataNode::Option(OptionData {
        value: string_field(map, "value", path)?,
        text: string_field(map, "text", path)?,
        html: string_field(map, "innerHTML", path)?.or(string_field(map, "html", path)?),
        selected: bool_field(map, "selected", path)?,
        disabled: bool_field(map, "disabled", path)?,
        placeholder: bool_field(map, "placeholder", path)?,
        class: string_field(map, "class", path)?,
        data,
    }))
}

fn string_field(map: &Map<String, Value>, key: &str, path: &str) -> Result<Option<String>, ShapeError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value, path, key).map(Some),
    }
}

// Numbers are accepted where strings are expected, like form values.
fn scalar_to_string(value: &Value, path: &str, key: &str) -> Result<String, ShapeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ShapeError::InvalidNode {
            path: path.to_string(),
            reason: format!("`{key}` must be a string"),
        }),
    }
}

fn bool_field(map: &Map<String, Value>, key: &str, path: &str) -> Result<bool, ShapeError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ShapeError::InvalidNode {
            path: path.to_string(),
            reason: format!("`{key}` must be a boolean"),
        }),
    }
}

/// Check the structural rules of an option tree
///
/// # Errors
///
/// Returns `ShapeError` when an option has neither value nor text, when an
/// optgroup contains another optgroup, or when more than one option is a
/// placeholder.
pub fn validate(nodes: &[DataNode]) -> Result<(), ShapeError> {
    let mut placeholder_seen = false;
    for (i, node) in nodes.iter().enumerate() {
        let path = format!("[{i}]");
        match node {
            DataNode::Option(option) => check_option(option, &path, &mut placeholder_seen)?,
            DataNode::Optgroup(group) => {
                for (j, child) in group.options.iter().enumerate() {
                    let child_path = format!("{path}.options[{j}]");
                    match child {
                        DataNode::Option(option) => {
                            check_option(option, &child_path, &mut placeholder_seen)?;
                        }
                        DataNode::Optgroup(_) => {
                            return Err(ShapeError::NestedOptgroup { path: child_path });
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn check_option(option: &OptionData, path: &str, placeholder_seen: &mut bool) -> Result<(), ShapeError> {
    if option.value.is_none() && option.text.is_none() {
        return Err(ShapeError::MissingValueAndText {
            path: path.to_string(),
        });
    }
    if option.placeholder {
        if *placeholder_seen {
            return Err(ShapeError::DuplicatePlaceholder {
                path: path.to_string(),
            });
        }
        *placeholder_seen = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_list() {
        let nodes = DataNode::list_from_json_str(
            r#"[{"value": "1", "text": "Red"}, {"text": "Blue", "selected": true}]"#,
        )
        .unwrap();
        assert_eq!(nodes.len(), 2);
        let DataNode::Option(blue) = &nodes[1] else {
            panic!("expected option");
        };
        assert!(blue.selected);
        assert_eq!(blue.resolved_value(), "Blue");
        assert!(validate(&nodes).is_ok());
    }

    #[test]
    fn test_parse_groups_and_data() {
        let nodes = DataNode::list_from_json_str(
            r#"[{"label": "Warm", "options": [{"value": 1, "text": "Red", "data": {"hex": "f00"}}]}]"#,
        )
        .unwrap();
        let DataNode::Optgroup(group) = &nodes[0] else {
            panic!("expected optgroup");
        };
        assert_eq!(group.label, "Warm");
        let DataNode::Option(red) = &group.options[0] else {
            panic!("expected option");
        };
        assert_eq!(red.value.as_deref(), Some("1"));
        assert_eq!(red.data.get("hex").map(String::as_str), Some("f00"));
    }

    #[test]
    fn test_options_not_sequence() {
        let err = DataNode::list_from_json_str(r#"[{"label": "G", "options": "nope"}]"#).unwrap_err();
        assert!(matches!(err, ShapeError::OptionsNotSequence { .. }));
    }

    #[test]
    fn test_root_must_be_list() {
        let err = DataNode::list_from_json_str(r#"{"value": "1"}"#).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidNode { .. }));
    }

    #[test]
    fn test_wrong_bool_type() {
        let err = DataNode::list_from_json_str(r#"[{"value": "1", "selected": "yes"}]"#).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidNode { .. }));
    }

    #[test]
    fn test_missing_value_and_text() {
        let nodes = vec![DataNode::Option(OptionData::default())];
        let err = validate(&nodes).unwrap_err();
        assert!(matches!(err, ShapeError::MissingValueAndText { ref path } if path == "[0]"));
    }

    #[test]
    fn test_nested_optgroup_rejected() {
        let nodes = vec![DataNode::group(
            "outer",
            vec![DataNode::group("inner", vec![DataNode::option("1", "One")])],
        )];
        let err = validate(&nodes).unwrap_err();
        assert!(matches!(err, ShapeError::NestedOptgroup { ref path } if path == "[0].options[0]"));
    }

    #[test]
    fn test_duplicate_placeholder_rejected() {
        let nodes = vec![
            DataNode::Option(OptionData::text("Pick").placeholder(true)),
            DataNode::Option(OptionData::text("Pick again").placeholder(true)),
        ];
        assert!(matches!(
            validate(&nodes),
            Err(ShapeError::DuplicatePlaceholder { .. })
        ));
    }

    #[test]
    fn test_resolved_text_falls_back_to_value() {
        let option = OptionData {
            value: Some("42".to_string()),
            ..OptionData::default()
        };
        assert_eq!(option.resolved_text(), "42");
    }
}
