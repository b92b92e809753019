//! The widget: public API sequencing model, bridge and state machine
//!
//! ```
//! use slimselect::config::Settings;
//! use slimselect::data::{DataNode, MatchBy};
//! use slimselect::dom::{SelectElement, share};
//! use slimselect::render::NullRenderer;
//! use slimselect::select::SlimSelect;
//!
//! let control = share(SelectElement::new(false));
//! let mut select = SlimSelect::new(control.clone(), Settings::default(), Box::new(NullRenderer));
//! select.set_data(&[DataNode::option("1", "Red"), DataNode::option("2", "Blue")])?;
//! select.set("2", MatchBy::Value, true)?;
//!
//! assert_eq!(select.selected_values(), vec!["2"]);
//! assert_eq!(control.borrow().value(), "2");
//! # Ok::<(), slimselect::SlimSelectError>(())
//! ```

use crate::SlimSelectError;
use crate::bridge::{Bridge, NativeControl};
use crate::config::Settings;
use crate::data::{self, Data, DataNode, MatchBy, Mode, Optgroup, SelectOption};
use crate::dom::{Document, Element, SelectElement};
use crate::render::{RenderView, Renderer};
use crate::selection::{self, SelectionError, SetValue};
use crate::state::{ClickEvent, ContentState, Focus, InteractionMachine};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Called with the prospective selection; returning `false` vetoes it
pub type BeforeChangeCallback = Box<dyn FnMut(&[SelectOption]) -> bool>;

/// Called with the selection after every committed change
pub type ChangeCallback = Box<dyn FnMut(&[SelectOption])>;

/// Searchable dropdown bound to a native select control
pub struct SlimSelect<C: NativeControl = SelectElement> {
    id: String,
    settings: Settings,
    bridge: Bridge<C>,
    data: Data,
    machine: InteractionMachine,
    renderer: Box<dyn Renderer>,
    before_on_change: Option<BeforeChangeCallback>,
    on_change: Option<ChangeCallback>,
}

impl SlimSelect<SelectElement> {
    /// Build a widget for the select matching `selector` in `doc`
    ///
    /// # Errors
    ///
    /// Returns `SlimSelectError::Construction` if nothing matches the
    /// selector or the element is not a select.
    pub fn from_document(
        doc: &Document,
        selector: &str,
        settings: Settings,
        renderer: Box<dyn Renderer>,
    ) -> Result<Self, SlimSelectError> {
        match doc.query_selector(selector) {
            Some(Element::Select(control)) => Ok(Self::new(Rc::clone(control), settings, renderer)),
            Some(other) => Err(SlimSelectError::Construction(format!(
                "element '{selector}' is a {}, not a SELECT",
                other.tag_name()
            ))),
            None => Err(SlimSelectError::Construction(format!(
                "could not find select element '{selector}'"
            ))),
        }
    }
}

impl<C: NativeControl> SlimSelect<C> {
    /// Attach a widget to a native control
    ///
    /// Imports the control's options, hides the control and renders once.
    pub fn new(control: Rc<RefCell<C>>, mut settings: Settings, renderer: Box<dyn Renderer>) -> Self {
        let id = format!("ss-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed));
        let bridge = Bridge::attach(control);
        let data = Data::new(bridge.import_from_control());

        let natively_disabled = bridge.control().borrow().is_disabled();
        settings.is_enabled = settings.is_enabled && !natively_disabled;
        if !settings.is_enabled && !natively_disabled {
            bridge.export_disabled(true);
        }
        bridge.set_control_hidden(true);

        info!(
            %id,
            mode = ?bridge.mode(),
            options = data::options(data.optgroups()).count(),
            "select attached"
        );

        let mut select = Self {
            id,
            machine: InteractionMachine::new(settings.show_search),
            settings,
            bridge,
            data,
            renderer,
            before_on_change: None,
            on_change: None,
        };
        select.render();
        select
    }

    /// Register a callback that can veto selection changes
    #[must_use]
    pub fn with_before_on_change(mut self, callback: impl FnMut(&[SelectOption]) -> bool + 'static) -> Self {
        self.before_on_change = Some(Box::new(callback));
        self
    }

    /// Register a callback run after every committed selection change
    #[must_use]
    pub fn with_on_change(mut self, callback: impl FnMut(&[SelectOption]) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Id of the widget's root, used to scope outside clicks
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current settings
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The canonical model
    #[must_use]
    pub const fn data(&self) -> &Data {
        &self.data
    }

    /// Shared handle to the native control
    #[must_use]
    pub const fn control(&self) -> &Rc<RefCell<C>> {
        self.bridge.control()
    }

    /// Selection mode
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.bridge.mode()
    }

    /// Open/closed state
    #[must_use]
    pub const fn content_state(&self) -> ContentState {
        InteractionMachine::state(&self.data)
    }

    /// Whether the dropdown is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.data.content_open()
    }

    /// Whether the widget accepts interaction
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.settings.is_enabled
    }

    /// Where focus sits inside the widget
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.machine.focus()
    }

    /// Selected real options
    #[must_use]
    pub fn selected(&self) -> Vec<&SelectOption> {
        selection::selected(self.data.optgroups())
    }

    /// Values of the selected real options
    #[must_use]
    pub fn selected_values(&self) -> Vec<String> {
        selection::selected_values(self.data.optgroups())
    }

    /// The native control's `value`, as a form submission would read it
    #[must_use]
    pub fn native_value(&self) -> String {
        self.control().borrow().value()
    }

    /// Groups visible under the current search
    #[must_use]
    pub fn filtered(&self) -> Vec<Optgroup> {
        self.data.filtered()
    }

    /// Set the selection
    ///
    /// In single mode the value must match an option (a list uses its first
    /// entry). In multi mode a single value is added to the selection and a
    /// list replaces it; neither can fail. Closes the dropdown afterwards
    /// when `close_after` is set.
    ///
    /// # Errors
    ///
    /// Returns `SlimSelectError::Selection` in single mode when no option
    /// matches. Nothing is modified in that case.
    pub fn set(&mut self, value: impl Into<SetValue>, by: MatchBy, close_after: bool) -> Result<(), SlimSelectError> {
        let value = value.into();
        let mut next = self.data.optgroups().to_vec();

        let changed = match (self.mode(), value) {
            (Mode::Single, SetValue::One(key)) => selection::set_single(&mut next, &key, by)?,
            (Mode::Single, SetValue::Many(keys)) => {
                let key = keys.into_iter().next().ok_or(SelectionError::ValueNotFound {
                    value: String::new(),
                    by,
                })?;
                selection::set_single(&mut next, &key, by)?
            }
            (Mode::Multiple, SetValue::One(key)) => selection::add_to_selected(&mut next, &key, by),
            (Mode::Multiple, SetValue::Many(keys)) => selection::set_selected(&mut next, &keys, by),
        };

        if changed && !self.commit_selection(next) {
            return Ok(());
        }
        self.render();
        if close_after {
            self.close();
        }
        Ok(())
    }

    /// Pick one option the way a click in the list does
    ///
    /// Single mode closes afterwards when `close_on_select` is set; multi
    /// mode stays open.
    ///
    /// # Errors
    ///
    /// Same as [`SlimSelect::set`].
    pub fn select_option(&mut self, value: &str) -> Result<(), SlimSelectError> {
        let close_after = self.settings.close_on_select && !self.mode().is_multiple();
        self.set(value, MatchBy::Value, close_after)
    }

    /// Remove one option from a multi selection
    ///
    /// A no-op in single mode and for values that are not selected.
    pub fn remove(&mut self, value: &str, by: MatchBy) {
        if !self.mode().is_multiple() {
            warn!(value, "remove ignored in single mode");
            return;
        }
        let mut next = self.data.optgroups().to_vec();
        if selection::remove_from_selected(&mut next, value, by) && self.commit_selection(next) {
            self.render();
        }
    }

    /// Replace every option
    ///
    /// The native control is rebuilt from `nodes` and the model re-imported
    /// from it.
    ///
    /// # Errors
    ///
    /// Returns `SlimSelectError::Shape` if the tree is malformed; the model
    /// and the control are left untouched.
    pub fn set_data(&mut self, nodes: &[DataNode]) -> Result<(), SlimSelectError> {
        data::validate(nodes)?;
        self.bridge.rebuild_control(nodes);
        self.data.replace_optgroups(self.bridge.import_from_control());
        debug!(id = %self.id, "data replaced");
        self.render();
        Ok(())
    }

    /// Replace every option from a JSON tree
    ///
    /// # Errors
    ///
    /// Returns `SlimSelectError::Shape` if the JSON is invalid or malformed.
    pub fn set_data_json(&mut self, json: &str) -> Result<(), SlimSelectError> {
        let nodes = DataNode::list_from_json_str(json)?;
        self.set_data(&nodes)
    }

    /// Open the dropdown
    ///
    /// Ignored while the widget is disabled.
    pub fn open(&mut self) {
        if !self.settings.is_enabled {
            debug!(id = %self.id, "open ignored while disabled");
            return;
        }
        if self.machine.open(&mut self.data).is_change() {
            self.render();
        }
    }

    /// Close the dropdown and clear the search
    pub fn close(&mut self) {
        if self.machine.close(&mut self.data).is_change() {
            self.render();
        }
    }

    /// Enable the widget and the native control
    pub fn enable(&mut self) {
        self.settings.is_enabled = true;
        self.bridge.export_disabled(false);
        self.render();
    }

    /// Disable the widget and the native control
    ///
    /// An open dropdown is closed first.
    pub fn disable(&mut self) {
        self.close();
        self.settings.is_enabled = false;
        self.bridge.export_disabled(true);
        self.render();
    }

    /// Filter the options by `query`
    ///
    /// A no-op when the query equals the current one.
    pub fn search(&mut self, query: &str) {
        if self.data.search(query) {
            debug!(query, matches = self.data.filtered_len(), "search updated");
            self.render();
        }
    }

    /// Redraw from the current state
    pub fn render(&mut self) {
        let view = RenderView {
            mode: self.bridge.mode(),
            content_open: self.data.content_open(),
            is_enabled: self.settings.is_enabled,
            search_value: self.data.search_value(),
            filtered: self.data.filtered(),
            selected: selection::selected(self.data.optgroups()),
            settings: &self.settings,
        };
        self.renderer.render(&view);
    }

    /// Feed a page click to the widget; clicks outside it close the dropdown
    pub fn handle_click(&mut self, click: &ClickEvent) {
        if !click.is_within(&self.id) {
            self.close();
        }
    }

    /// Resynchronize after changes made to the native control by other code
    ///
    /// Returns whether any external change was found.
    pub fn process_mutations(&mut self) -> bool {
        let records = self.bridge.take_external_mutations();
        if records.is_empty() {
            return false;
        }
        debug!(id = %self.id, records = records.len(), "external mutation detected");

        self.data.replace_optgroups(self.bridge.import_from_control());
        let natively_disabled = self.control().borrow().is_disabled();
        if natively_disabled == self.settings.is_enabled {
            self.settings.is_enabled = !natively_disabled;
            if natively_disabled {
                self.machine.close(&mut self.data);
            }
        }
        self.render();
        true
    }

    /// Tear the widget down and give the page back its native control
    pub fn destroy(mut self) {
        self.bridge.detach();
        self.bridge.set_control_hidden(false);
        info!(id = %self.id, "select destroyed");
    }

    // Applies `next` unless vetoed, then writes it to the control and
    // notifies listeners. Returns whether it was applied.
    fn commit_selection(&mut self, next: Vec<Optgroup>) -> bool {
        let prospective: Vec<SelectOption> = selection::selected(&next).into_iter().cloned().collect();
        let allowed = self.before_on_change.as_mut().is_none_or(|before| before(&prospective));
        if !allowed {
            debug!(id = %self.id, "selection change vetoed");
            return false;
        }

        self.data.replace_optgroups(next);
        self.bridge.export_selection_to_control(self.data.optgroups());
        self.bridge.dispatch_change();
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&prospective);
        }
        true
    }
}

impl<C: NativeControl> std::fmt::Debug for SlimSelect<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlimSelect")
            .field("id", &self.id)
            .field("mode", &self.mode())
            .field("settings", &self.settings)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementNode, OptionElement, share};
    use crate::render::TextRenderer;
    use crate::testing::{colors_select, multi_select};
    use std::cell::Cell;

    #[test]
    fn test_set_single_scenario() {
        let (control, mut select) = colors_select();
        select.open();
        select.set("2", MatchBy::Value, true).unwrap();

        assert_eq!(select.selected_values(), vec!["2"]);
        assert_eq!(select.content_state(), ContentState::Closed);
        assert_eq!(select.native_value(), "2");
        assert_eq!(control.borrow().change_events(), 1);
    }

    #[test]
    fn test_set_unknown_value_fails_without_mutation() {
        let (control, mut select) = colors_select();
        select.set("1", MatchBy::Value, true).unwrap();
        let err = select.set("9", MatchBy::Value, true).unwrap_err();

        assert!(matches!(
            err,
            SlimSelectError::Selection(SelectionError::ValueNotFound { .. })
        ));
        assert_eq!(select.selected_values(), vec!["1"]);
        assert_eq!(control.borrow().value(), "1");
    }

    #[test]
    fn test_set_by_text_and_keep_open() {
        let (_control, mut select) = colors_select();
        select.open();
        select.set("Blue", MatchBy::Text, false).unwrap();
        assert!(select.is_open());
        assert_eq!(select.selected_values(), vec!["2"]);
    }

    #[test]
    fn test_multi_set_selected_drops_disabled() {
        let (control, mut select) = multi_select();
        select.set(["a", "b", "c"], MatchBy::Value, false).unwrap();
        assert_eq!(select.selected_values(), vec!["a", "c"]);
        assert_eq!(control.borrow().selected_values(), vec!["a", "c"]);
    }

    #[test]
    fn test_multi_add_and_remove() {
        let (_control, mut select) = multi_select();
        select.set("a", MatchBy::Value, false).unwrap();
        select.set("a", MatchBy::Value, false).unwrap();
        select.set("zzz", MatchBy::Value, false).unwrap();
        select.set("c", MatchBy::Value, false).unwrap();
        assert_eq!(select.selected_values(), vec!["a", "c"]);

        select.remove("a", MatchBy::Value);
        assert_eq!(select.selected_values(), vec!["c"]);
    }

    #[test]
    fn test_before_on_change_can_veto() {
        let (control, select) = colors_select();
        let mut select = select.with_before_on_change(|next| next.iter().all(|o| o.value != "2"));
        select.set("1", MatchBy::Value, false).unwrap();
        select.set("2", MatchBy::Value, false).unwrap();

        assert_eq!(select.selected_values(), vec!["1"]);
        assert_eq!(control.borrow().value(), "1");
    }

    #[test]
    fn test_on_change_runs_after_commit() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let (_control, select) = colors_select();
        let mut select = select.with_on_change(move |selected| {
            assert_eq!(selected.len(), 1);
            seen.set(seen.get() + 1);
        });

        select.set("1", MatchBy::Value, true).unwrap();
        select.set("1", MatchBy::Value, true).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_search_and_close_reset() {
        let (_control, mut select) = colors_select();
        select.open();
        select.search("abc");
        assert_eq!(select.data().search_value(), "abc");
        assert!(select.filtered().is_empty());

        select.close();
        assert_eq!(select.data().search_value(), "");
        assert_eq!(select.filtered(), select.data().optgroups());
    }

    #[test]
    fn test_search_noop_does_not_render() {
        let renderer = Rc::new(RefCell::new(TextRenderer::plain()));
        let control = share(SelectElement::with_children(
            false,
            vec![ElementNode::Option(OptionElement::new("1", "Red"))],
        ));
        let mut select = SlimSelect::new(control, Settings::default(), Box::new(Rc::clone(&renderer)));
        let frames = renderer.borrow().frames();

        select.search("re");
        select.search("re");
        assert_eq!(renderer.borrow().frames(), frames + 1);
    }

    #[test]
    fn test_disable_blocks_open() {
        let (control, mut select) = colors_select();
        select.open();
        select.disable();
        assert!(!select.is_open());
        assert!(control.borrow().disabled());

        select.open();
        assert!(!select.is_open());

        select.enable();
        select.open();
        assert!(select.is_open());
        assert!(!control.borrow().disabled());
        assert!(!select.process_mutations());
    }

    #[test]
    fn test_click_outside_closes() {
        let (_control, mut select) = colors_select();
        select.open();
        let inside = ClickEvent::new([format!("{}-search", select.id()), select.id().to_string()]);
        select.handle_click(&inside);
        assert!(select.is_open());

        select.handle_click(&ClickEvent::new(["page", "body"]));
        assert!(!select.is_open());
    }

    #[test]
    fn test_external_mutation_reimports() {
        let (control, mut select) = colors_select();
        control
            .borrow_mut()
            .append(ElementNode::Option(OptionElement::new("3", "Green")));
        control.borrow_mut().set_option_selected("3", true);

        assert!(select.process_mutations());
        assert_eq!(select.selected_values(), vec!["3"]);
        assert!(select.data().find("Green", MatchBy::Text).is_some());
        assert!(!select.process_mutations());
    }

    #[test]
    fn test_set_data_drops_disabled_selection_in_multi_mode() {
        let control = share(SelectElement::new(true));
        let mut select = SlimSelect::new(Rc::clone(&control), Settings::default(), Box::new(crate::render::NullRenderer));
        select
            .set_data(&[
                DataNode::Option(crate::data::OptionData::new("a", "Alpha").disabled(true).selected(true)),
                DataNode::Option(crate::data::OptionData::new("b", "Beta").selected(true)),
            ])
            .unwrap();

        assert_eq!(select.selected_values(), vec!["b"]);
        assert_eq!(control.borrow().selected_values(), vec!["b"]);
        assert!(!select.process_mutations());
    }

    #[test]
    fn test_external_option_disable_deselects_in_multi_mode() {
        let (control, mut select) = multi_select();
        select.set(["a", "c"], MatchBy::Value, false).unwrap();
        control.borrow_mut().set_option_disabled("a", true);

        assert!(select.process_mutations());
        assert_eq!(select.selected_values(), vec!["c"]);
        assert_eq!(control.borrow().selected_values(), vec!["c"]);
        assert!(!select.process_mutations());
    }

    #[test]
    fn test_external_disable_is_mirrored() {
        let (control, mut select) = colors_select();
        select.open();
        control.borrow_mut().set_disabled(true);
        assert!(select.process_mutations());
        assert!(!select.is_enabled());
        assert!(!select.is_open());
    }

    #[test]
    fn test_starting_disabled_writes_native_attribute() {
        let control = share(SelectElement::new(false));
        let select = SlimSelect::new(
            Rc::clone(&control),
            Settings::default().disabled(),
            Box::new(crate::render::NullRenderer),
        );
        assert!(!select.is_enabled());
        assert!(control.borrow().disabled());
        assert!(control.borrow().hidden());
    }

    #[test]
    fn test_destroy_reveals_control_and_stops_observing() {
        let (control, select) = colors_select();
        assert!(control.borrow().hidden());
        select.destroy();
        assert!(!control.borrow().hidden());

        control.borrow_mut().set_option_selected("1", true);
        assert_eq!(control.borrow().observer().pending(), 0);
    }

    #[test]
    fn test_from_document_errors() {
        let mut doc = Document::new();
        doc.insert_element("title", "h1");
        doc.insert_select("colors", SelectElement::new(true));

        let err = SlimSelect::from_document(&doc, "#missing", Settings::default(), Box::new(crate::render::NullRenderer))
            .unwrap_err();
        assert!(matches!(err, SlimSelectError::Construction(_)));

        let err = SlimSelect::from_document(&doc, "#title", Settings::default(), Box::new(crate::render::NullRenderer))
            .unwrap_err();
        assert!(err.to_string().contains("H1"));

        let select =
            SlimSelect::from_document(&doc, "#colors", Settings::default(), Box::new(crate::render::NullRenderer))
                .unwrap();
        assert_eq!(select.mode(), Mode::Multiple);
    }

    #[test]
    fn test_set_data_shape_error_keeps_model() {
        let (control, mut select) = colors_select();
        let before = select.data().optgroups().to_vec();
        let err = select
            .set_data_json(r#"[{"label": "G", "options": [{"label": "inner", "options": []}]}]"#)
            .unwrap_err();

        assert!(matches!(err, SlimSelectError::Shape(_)));
        assert_eq!(select.data().optgroups(), before.as_slice());
        assert_eq!(control.borrow().options().count(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let (_a, first) = colors_select();
        let (_b, second) = colors_select();
        assert_ne!(first.id(), second.id());
        assert!(first.id().starts_with("ss-"));
    }
}
