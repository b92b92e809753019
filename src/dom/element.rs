//! In-memory `<select>` element
//!
//! Behaves like the browser element where it matters to the widget: a single
//! select holds at most one selected option, `value` reads the first selected
//! option, every child-list change and every `selected`/`disabled` change is
//! reported to the observer while it is connected.

use super::observer::{MutationObserver, MutationRecord};
use std::collections::BTreeMap;

/// `<option>` element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionElement {
    /// `value` attribute
    pub value: String,
    /// Text content
    pub text: String,
    /// Markup override for the label
    pub inner_html: Option<String>,
    /// `selected` state
    pub selected: bool,
    /// `disabled` attribute
    pub disabled: bool,
    /// `class` attribute
    pub class: Option<String>,
    /// `data-placeholder` marker, kept out of `dataset`
    pub placeholder: bool,
    /// `data-*` attributes, keyed without the prefix
    pub dataset: BTreeMap<String, String>,
}

impl OptionElement {
    /// Option with value and text
    #[must_use]
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set `selected`
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set `disabled`
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Mark as the placeholder option
    #[must_use]
    pub const fn placeholder(mut self, placeholder: bool) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Add a `data-*` attribute
    #[must_use]
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }
}

/// `<optgroup>` element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptgroupElement {
    /// `label` attribute
    pub label: String,
    /// `disabled` attribute
    pub disabled: bool,
    /// Child options
    pub options: Vec<OptionElement>,
}

impl OptgroupElement {
    /// Group with the given label and options
    #[must_use]
    pub fn new(label: impl Into<String>, options: Vec<OptionElement>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            options,
        }
    }
}

/// Direct child of a select element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementNode {
    /// `<option>`
    Option(OptionElement),
    /// `<optgroup>`
    Optgroup(OptgroupElement),
}

/// In-memory `<select>` element
#[derive(Debug, Clone, Default)]
pub struct SelectElement {
    multiple: bool,
    disabled: bool,
    hidden: bool,
    children: Vec<ElementNode>,
    observer: MutationObserver,
    change_events: usize,
}

impl SelectElement {
    /// Empty select; `multiple` mirrors the HTML attribute
    #[must_use]
    pub fn new(multiple: bool) -> Self {
        Self {
            multiple,
            ..Self::default()
        }
    }

    /// Select with initial children
    #[must_use]
    pub fn with_children(multiple: bool, children: Vec<ElementNode>) -> Self {
        let mut select = Self::new(multiple);
        select.children = children;
        select.resolve_single_selection();
        select
    }

    /// `multiple` attribute
    #[must_use]
    pub const fn multiple(&self) -> bool {
        self.multiple
    }

    /// `disabled` attribute
    #[must_use]
    pub const fn disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the element is hidden (`display: none`)
    #[must_use]
    pub const fn hidden(&self) -> bool {
        self.hidden
    }

    /// Direct children in document order
    #[must_use]
    pub fn children(&self) -> &[ElementNode] {
        &self.children
    }

    /// Every option, including those inside optgroups
    pub fn options(&self) -> impl Iterator<Item = &OptionElement> {
        self.children.iter().flat_map(|node| match node {
            ElementNode::Option(option) => std::slice::from_ref(option).iter(),
            ElementNode::Optgroup(group) => group.options.iter(),
        })
    }

    fn options_mut(&mut self) -> impl Iterator<Item = &mut OptionElement> {
        self.children.iter_mut().flat_map(|node| match node {
            ElementNode::Option(option) => std::slice::from_mut(option).iter_mut(),
            ElementNode::Optgroup(group) => group.options.iter_mut(),
        })
    }

    /// Value of the first selected option, empty when nothing is selected
    #[must_use]
    pub fn value(&self) -> String {
        self.options()
            .find(|option| option.selected)
            .map(|option| option.value.clone())
            .unwrap_or_default()
    }

    /// Values of all selected options
    #[must_use]
    pub fn selected_values(&self) -> Vec<String> {
        self.options()
            .filter(|option| option.selected)
            .map(|option| option.value.clone())
            .collect()
    }

    /// Append a child
    pub fn append(&mut self, node: ElementNode) {
        self.children.push(node);
        self.resolve_single_selection();
        self.observer.notify(MutationRecord::ChildList);
    }

    /// Replace every child at once
    pub fn replace_children(&mut self, children: Vec<ElementNode>) {
        self.children = children;
        self.resolve_single_selection();
        self.observer.notify(MutationRecord::ChildList);
    }

    /// Remove the options carrying `value`, returns whether any was removed
    pub fn remove_option(&mut self, value: &str) -> bool {
        let before = self.options().count();
        self.children.retain(|node| !matches!(node, ElementNode::Option(o) if o.value == value));
        for node in &mut self.children {
            if let ElementNode::Optgroup(group) = node {
                group.options.retain(|o| o.value != value);
            }
        }
        let removed = self.options().count() != before;
        if removed {
            self.observer.notify(MutationRecord::ChildList);
        }
        removed
    }

    /// Set `selected` on the options carrying `value`
    ///
    /// In a single select, selecting an option deselects every other one.
    pub fn set_option_selected(&mut self, value: &str, selected: bool) {
        let multiple = self.multiple;
        let mut changes = Vec::new();
        for option in self.options_mut() {
            let want = if option.value == value {
                selected
            } else if selected && !multiple {
                false
            } else {
                option.selected
            };
            if option.selected != want {
                option.selected = want;
                changes.push(option.value.clone());
            }
        }
        for changed in changes {
            self.observer.notify(MutationRecord::option_attribute("selected", changed));
        }
    }

    /// Select exactly the options whose values are listed
    pub fn set_selected_values(&mut self, values: &[String]) {
        let before = self.selected_values();
        for option in self.options_mut() {
            option.selected = values.contains(&option.value);
        }
        self.resolve_single_selection();
        let after = self.selected_values();
        let changes: Vec<String> = self
            .options()
            .filter(|o| before.contains(&o.value) != after.contains(&o.value))
            .map(|o| o.value.clone())
            .collect();
        for changed in changes {
            self.observer.notify(MutationRecord::option_attribute("selected", changed));
        }
    }

    /// Set the select's own `disabled` attribute
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled != disabled {
            self.disabled = disabled;
            self.observer.notify(MutationRecord::attribute("disabled"));
        }
    }

    /// Set `disabled` on the options carrying `value`
    pub fn set_option_disabled(&mut self, value: &str, disabled: bool) {
        let mut changed = false;
        for option in self.options_mut().filter(|o| o.value == value) {
            if option.disabled != disabled {
                option.disabled = disabled;
                changed = true;
            }
        }
        if changed {
            self.observer
                .notify(MutationRecord::option_attribute("disabled", value));
        }
    }

    /// Toggle `display: none`
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.observer.notify(MutationRecord::attribute("style"));
    }

    /// Fire a `change` event
    pub const fn dispatch_change(&mut self) {
        self.change_events += 1;
    }

    /// Number of `change` events fired so far
    #[must_use]
    pub const fn change_events(&self) -> usize {
        self.change_events
    }

    /// The element's mutation observer
    #[must_use]
    pub const fn observer(&self) -> &MutationObserver {
        &self.observer
    }

    /// Mutable access to the mutation observer
    pub const fn observer_mut(&mut self) -> &mut MutationObserver {
        &mut self.observer
    }

    // A single select keeps the last selected option, like a browser does.
    fn resolve_single_selection(&mut self) {
        if self.multiple {
            return;
        }
        let last = self
            .options()
            .enumerate()
            .filter(|(_, option)| option.selected)
            .map(|(i, _)| i)
            .last();
        for (i, option) in self.options_mut().enumerate() {
            option.selected = Some(i) == last;
        }
    }
}
