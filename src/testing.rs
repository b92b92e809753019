//! Testing utilities for slimselect
//!
//! Fixtures that attach a widget to a small in-memory select control. The
//! control handle is returned alongside so tests can play "outside script"
//! against the same element.
//!
//! Only available when compiled with `cfg(test)`.

use crate::config::Settings;
use crate::dom::{ElementNode, OptionElement, SelectElement, SharedSelect, share};
use crate::render::NullRenderer;
use crate::select::SlimSelect;
use std::rc::Rc;

/// Attach a headless widget to `control`
pub fn attach(control: SelectElement, settings: Settings) -> (SharedSelect, SlimSelect) {
    let control = share(control);
    let select = SlimSelect::new(Rc::clone(&control), settings, Box::new(NullRenderer));
    (control, select)
}

/// Single select with options `1: Red` and `2: Blue`, nothing selected
pub fn colors_select() -> (SharedSelect, SlimSelect) {
    attach(
        SelectElement::with_children(
            false,
            vec![
                ElementNode::Option(OptionElement::new("1", "Red")),
                ElementNode::Option(OptionElement::new("2", "Blue")),
            ],
        ),
        Settings::default(),
    )
}

/// Multi select with options `a`, `b` (disabled) and `c`, nothing selected
pub fn multi_select() -> (SharedSelect, SlimSelect) {
    attach(
        SelectElement::with_children(
            true,
            vec![
                ElementNode::Option(OptionElement::new("a", "Alpha")),
                ElementNode::Option(OptionElement::new("b", "Beta").disabled(true)),
                ElementNode::Option(OptionElement::new("c", "Gamma")),
            ],
        ),
        Settings::default(),
    )
}
