//! Synchronization between the canonical model and the native control
//!
//! The native control is a peer of the widget: both can be changed by code
//! the other does not control. The bridge reads the control into fresh
//! optgroups, writes the model's selection and disabled state back, and wraps
//! every one of its own writes in a guard window during which the control's
//! mutation observer is disconnected. Whatever the observer records is
//! therefore an external change by construction.
//!
//! # Architecture
//!
//! ```text
//!   set()/enable()/set_data()            outside scripts
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐  guarded write  ┌──────────────────┐
//!   │     Bridge      │ ──────────────▶ │  NativeControl   │
//!   │                 │ ◀────────────── │  (+ observer)    │
//!   └─────────────────┘  import/records └──────────────────┘
//! ```

use crate::data::{DataNode, Mode, Optgroup, SelectOption};
use crate::dom::{ElementNode, MutationRecord, OptgroupElement, OptionElement, SelectElement};
use crate::selection;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

/// Operations the bridge needs from a native select control
///
/// [`SelectElement`] is the in-memory implementation; a browser binding
/// would implement the same trait on top of the real element.
pub trait NativeControl {
    /// `multiple` attribute
    fn is_multiple(&self) -> bool;

    /// `disabled` attribute
    fn is_disabled(&self) -> bool;

    /// Snapshot of the control's children
    fn nodes(&self) -> Vec<ElementNode>;

    /// Replace every child
    fn replace_nodes(&mut self, nodes: Vec<ElementNode>);

    /// Select exactly the options with these values
    fn set_selected_values(&mut self, values: &[String]);

    /// Current `value` property
    fn value(&self) -> String;

    /// Set the `disabled` attribute
    fn set_disabled(&mut self, disabled: bool);

    /// Show or hide the control
    fn set_hidden(&mut self, hidden: bool);

    /// Fire a `change` event
    fn dispatch_change(&mut self);

    /// Resume mutation observation
    fn observe(&mut self);

    /// Suspend mutation observation
    fn disconnect(&mut self);

    /// Drain recorded mutations
    fn take_records(&mut self) -> Vec<MutationRecord>;
}

impl NativeControl for SelectElement {
    fn is_multiple(&self) -> bool {
        self.multiple()
    }

    fn is_disabled(&self) -> bool {
        self.disabled()
    }

    fn nodes(&self) -> Vec<ElementNode> {
        self.children().to_vec()
    }

    fn replace_nodes(&mut self, nodes: Vec<ElementNode>) {
        self.replace_children(nodes);
    }

    fn set_selected_values(&mut self, values: &[String]) {
        Self::set_selected_values(self, values);
    }

    fn value(&self) -> String {
        Self::value(self)
    }

    fn set_disabled(&mut self, disabled: bool) {
        Self::set_disabled(self, disabled);
    }

    fn set_hidden(&mut self, hidden: bool) {
        Self::set_hidden(self, hidden);
    }

    fn dispatch_change(&mut self) {
        Self::dispatch_change(self);
    }

    fn observe(&mut self) {
        self.observer_mut().observe();
    }

    fn disconnect(&mut self) {
        self.observer_mut().disconnect();
    }

    fn take_records(&mut self) -> Vec<MutationRecord> {
        self.observer_mut().take_records()
    }
}

/// Model/control synchronizer owned by one widget
#[derive(Debug)]
pub struct Bridge<C: NativeControl> {
    control: Rc<RefCell<C>>,
    mode: Mode,
    detached: bool,
}

impl<C: NativeControl> Bridge<C> {
    /// Attach to a control and start observing it
    ///
    /// The mode is read from the control's `multiple` attribute once, here.
    pub fn attach(control: Rc<RefCell<C>>) -> Self {
        let mode = Mode::from_multiple(control.borrow().is_multiple());
        control.borrow_mut().observe();
        Self {
            control,
            mode,
            detached: false,
        }
    }

    /// Shared handle to the control
    #[must_use]
    pub const fn control(&self) -> &Rc<RefCell<C>> {
        &self.control
    }

    /// Selection mode fixed at attach time
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether [`Bridge::detach`] has run
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.detached
    }

    /// Run a write with observation suspended
    ///
    /// Observation resumes right after `write` returns unless the bridge has
    /// been detached.
    pub fn guarded<R>(&self, write: impl FnOnce(&mut C) -> R) -> R {
        let mut control = self.control.borrow_mut();
        control.disconnect();
        trace!("guard window opened");
        let result = write(&mut *control);
        if !self.detached {
            control.observe();
        }
        trace!("guard window closed");
        result
    }

    /// Read the control into fresh optgroups
    ///
    /// When the control holds a selection the mode forbids, the corrected
    /// selection is written back so model and control agree.
    #[must_use]
    pub fn import_from_control(&self) -> Vec<Optgroup> {
        let mut groups = elements_to_groups(&self.control.borrow().nodes());
        if selection::enforce_mode(&mut groups, self.mode) {
            debug!("imported selection corrected for {:?} mode", self.mode);
            self.export_selection_to_control(&groups);
        }
        debug!(
            groups = groups.len(),
            options = crate::data::options(&groups).count(),
            "imported model from native control"
        );
        groups
    }

    /// Write the model's selection onto the control
    pub fn export_selection_to_control(&self, groups: &[Optgroup]) {
        let values: Vec<String> = crate::data::options(groups)
            .filter(|option| option.selected)
            .map(|option| option.value.clone())
            .collect();
        debug!(?values, "exporting selection");
        self.guarded(|control| control.set_selected_values(&values));
    }

    /// Write the widget's enabled state onto the control
    pub fn export_disabled(&self, disabled: bool) {
        self.guarded(|control| control.set_disabled(disabled));
    }

    /// Rebuild the control's children from a validated tree
    pub fn rebuild_control(&self, nodes: &[DataNode]) {
        let elements = tree_to_elements(nodes);
        debug!(nodes = elements.len(), "rebuilding native control");
        self.guarded(|control| control.replace_nodes(elements));
    }

    /// Show or hide the control
    pub fn set_control_hidden(&self, hidden: bool) {
        self.guarded(|control| control.set_hidden(hidden));
    }

    /// Fire a `change` event on the control
    pub fn dispatch_change(&self) {
        self.guarded(|control| control.dispatch_change());
    }

    /// Drain mutations made by anyone but the bridge
    pub fn take_external_mutations(&self) -> Vec<MutationRecord> {
        if self.detached {
            return Vec::new();
        }
        self.control.borrow_mut().take_records()
    }

    /// Stop observing for good and drop anything still queued
    pub fn detach(&mut self) {
        self.detached = true;
        let mut control = self.control.borrow_mut();
        control.disconnect();
        let dropped = control.take_records().len();
        debug!(dropped, "bridge detached");
    }
}

/// Convert native children into optgroups
///
/// Each run of top-level options becomes one implicit group, so the native
/// order survives a round trip.
#[must_use]
pub fn elements_to_groups(nodes: &[ElementNode]) -> Vec<Optgroup> {
    let mut groups: Vec<Optgroup> = Vec::new();
    let mut run: Vec<SelectOption> = Vec::new();

    for node in nodes {
        match node {
            ElementNode::Option(option) => run.push(option_from_element(option, false)),
            ElementNode::Optgroup(group) => {
                if !run.is_empty() {
                    groups.push(Optgroup::implicit(std::mem::take(&mut run)));
                }
                groups.push(Optgroup {
                    label: group.label.clone(),
                    disabled: group.disabled,
                    options: group
                        .options
                        .iter()
                        .map(|option| option_from_element(option, group.disabled))
                        .collect(),
                });
            }
        }
    }
    if !run.is_empty() {
        groups.push(Optgroup::implicit(run));
    }
    groups
}

fn option_from_element(element: &OptionElement, group_disabled: bool) -> SelectOption {
    SelectOption {
        value: element.value.clone(),
        text: element.text.clone(),
        html: element.inner_html.clone(),
        selected: element.selected,
        disabled: element.disabled || group_disabled,
        placeholder: element.placeholder,
        class: element.class.clone(),
        data: element.dataset.clone(),
    }
}

/// Convert a validated tree into native children
#[must_use]
pub fn tree_to_elements(nodes: &[DataNode]) -> Vec<ElementNode> {
    nodes
        .iter()
        .map(|node| match node {
            DataNode::Option(option) => ElementNode::Option(option_to_element(option)),
            DataNode::Optgroup(group) => ElementNode::Optgroup(OptgroupElement {
                label: group.label.clone(),
                disabled: group.disabled,
                options: group
                    .options
                    .iter()
                    .filter_map(|child| match child {
                        DataNode::Option(option) => Some(option_to_element(option)),
                        DataNode::Optgroup(_) => None,
                    })
                    .collect(),
            }),
        })
        .collect()
}

fn option_to_element(option: &crate::data::OptionData) -> OptionElement {
    OptionElement {
        value: option.resolved_value(),
        text: option.resolved_text(),
        inner_html: option.html.clone(),
        selected: option.selected,
        disabled: option.disabled,
        class: option.class.clone(),
        placeholder: option.placeholder,
        dataset: option.data.clone(),
    }
}
