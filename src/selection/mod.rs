//! Selection rules for single and multi mode
//!
//! Single mode keeps at most one real option selected and fails loudly when
//! asked for a value that does not exist. Multi mode never fails:
//! [`add_to_selected`] refuses unknown or disabled values and is idempotent on
//! duplicates, [`set_selected`] replaces the whole set and silently skips what
//! it cannot select. Disabled options are never turned on in either mode.
//!
//! Every operation decides what to change before it writes anything, so a
//! failed call leaves the groups exactly as they were.

pub mod error;

pub use error::SelectionError;

use crate::data::{MatchBy, Mode, Optgroup, SelectOption, options, options_mut};
use tracing::trace;

/// Value argument of the widget's `set` operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetValue {
    /// One key; in multi mode it is added to the selection
    One(String),
    /// A list of keys; in multi mode it replaces the selection
    Many(Vec<String>),
}

impl From<&str> for SetValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for SetValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for SetValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for SetValue {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SetValue {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(ToString::to_string).collect())
    }
}

/// Selected real options in model order
#[must_use]
pub fn selected(groups: &[Optgroup]) -> Vec<&SelectOption> {
    options(groups)
        .filter(|option| option.selected && !option.placeholder)
        .collect()
}

/// Values of the selected real options
#[must_use]
pub fn selected_values(groups: &[Optgroup]) -> Vec<String> {
    selected(groups).into_iter().map(|o| o.value.clone()).collect()
}

/// Select exactly one option in single mode
///
/// Requesting the placeholder clears the real selection. A disabled match is
/// ignored. Returns whether anything changed.
///
/// # Errors
///
/// Returns `SelectionError::ValueNotFound` when no option matches `key`.
pub fn set_single(groups: &mut [Optgroup], key: &str, by: MatchBy) -> Result<bool, SelectionError> {
    let Some(target) = options(groups).position(|option| option.key(by) == key) else {
        return Err(SelectionError::ValueNotFound {
            value: key.to_string(),
            by,
        });
    };

    let matched = options(groups).nth(target).cloned().unwrap_or_default();
    if matched.disabled && !matched.placeholder {
        trace!(value = %matched.value, "ignoring disabled option");
        return Ok(false);
    }

    let mut changed = false;
    for (i, option) in options_mut(groups).enumerate() {
        let want = i == target;
        if option.selected != want {
            option.selected = want;
            changed = true;
        }
    }
    Ok(changed)
}

/// Add one option to a multi selection
///
/// Unknown, disabled and placeholder keys are ignored, as are options that
/// are already selected. Returns whether anything changed.
pub fn add_to_selected(groups: &mut [Optgroup], key: &str, by: MatchBy) -> bool {
    let Some(option) = options_mut(groups).find(|option| option.key(by) == key) else {
        trace!(key, "add_to_selected: no such option");
        return false;
    };
    if !option.is_selectable() || option.selected {
        return false;
    }
    option.selected = true;
    true
}

/// Replace a multi selection wholesale
///
/// Keys that are unknown or point at disabled options are skipped. Returns
/// whether anything changed.
pub fn set_selected(groups: &mut [Optgroup], keys: &[String], by: MatchBy) -> bool {
    let mut changed = false;
    for option in options_mut(groups) {
        let want = option.is_selectable() && keys.iter().any(|key| option.key(by) == key);
        if option.selected != want {
            option.selected = want;
            changed = true;
        }
    }
    changed
}

/// Deselect one option of a multi selection
///
/// Returns whether anything changed.
pub fn remove_from_selected(groups: &mut [Optgroup], key: &str, by: MatchBy) -> bool {
    let mut changed = false;
    for option in options_mut(groups).filter(|option| option.key(by) == key) {
        if option.selected {
            option.selected = false;
            changed = true;
        }
    }
    changed
}

/// Bring freshly imported groups in line with the mode
///
/// Only the first placeholder keeps its flag. In single mode only the last
/// selected option survives, matching how a native single select resolves
/// several `selected` attributes. In multi mode placeholders and disabled
/// options are never selected. Returns whether anything changed.
pub fn enforce_mode(groups: &mut [Optgroup], mode: Mode) -> bool {
    let mut changed = false;
    let mut seen_placeholder = false;
    for option in options_mut(groups).filter(|option| option.placeholder) {
        if seen_placeholder {
            trace!(value = %option.value, "dropping extra placeholder");
            option.placeholder = false;
            changed = true;
        }
        seen_placeholder = true;
    }

    match mode {
        Mode::Single => {
            let last = options(groups)
                .enumerate()
                .filter(|(_, option)| option.selected)
                .map(|(i, _)| i)
                .last();
            for (i, option) in options_mut(groups).enumerate() {
                let want = Some(i) == last;
                if option.selected != want {
                    option.selected = want;
                    changed = true;
                }
            }
        }
        Mode::Multiple => {
            for option in options_mut(groups).filter(|option| option.selected) {
                if option.placeholder || option.disabled {
                    trace!(value = %option.value, "deselecting unselectable option");
                    option.selected = false;
                    changed = true;
                }
            }
        }
    }
    changed
}
