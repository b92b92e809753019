//! Minimal document model hosting native select controls
//!
//! The widget never owns its native control: the element lives in a
//! [`Document`] and is shared as a [`SharedSelect`], so scripts holding the
//! same handle can mutate it behind the widget's back.

mod element;
mod observer;

pub use element::{ElementNode, OptgroupElement, OptionElement, SelectElement};
pub use observer::{MutationObserver, MutationRecord, OBSERVED_ATTRIBUTES};

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Select element shared between the widget and outside code
pub type SharedSelect = Rc<RefCell<SelectElement>>;

/// Wrap an element for sharing
#[must_use]
pub fn share(select: SelectElement) -> SharedSelect {
    Rc::new(RefCell::new(select))
}

/// Element stored in a document
#[derive(Debug, Clone)]
pub enum Element {
    /// A `<select>`
    Select(SharedSelect),
    /// Any other element, known only by tag name
    Other {
        /// Upper-case tag name
        tag: String,
    },
}

impl Element {
    /// Upper-case tag name, as `Element.tagName` reports it
    #[must_use]
    pub fn tag_name(&self) -> &str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Other { tag } => tag,
        }
    }
}

/// Elements addressable by id
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<String, Element>,
}

impl Document {
    /// Empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a select under `id` and return the shared handle
    pub fn insert_select(&mut self, id: impl Into<String>, select: SelectElement) -> SharedSelect {
        let shared = share(select);
        self.elements
            .insert(id.into(), Element::Select(Rc::clone(&shared)));
        shared
    }

    /// Insert a non-select element under `id`
    pub fn insert_element(&mut self, id: impl Into<String>, tag: impl Into<String>) {
        self.elements.insert(
            id.into(),
            Element::Other {
                tag: tag.into().to_uppercase(),
            },
        );
    }

    /// Resolve `#id` or a bare id
    #[must_use]
    pub fn query_selector(&self, selector: &str) -> Option<&Element> {
        let id = selector.strip_prefix('#').unwrap_or(selector);
        self.elements.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_selector() {
        let mut doc = Document::new();
        doc.insert_select("colors", SelectElement::new(false));
        doc.insert_element("title", "h1");

        assert_eq!(doc.query_selector("#colors").map(Element::tag_name), Some("SELECT"));
        assert_eq!(doc.query_selector("title").map(Element::tag_name), Some("H1"));
        assert!(doc.query_selector("#missing").is_none());
    }

    #[test]
    fn test_shared_handle_sees_outside_writes() {
        let mut doc = Document::new();
        let handle = doc.insert_select("s", SelectElement::new(false));
        handle.borrow_mut().set_disabled(true);

        let Some(Element::Select(same)) = doc.query_selector("s") else {
            panic!("expected select");
        };
        assert!(same.borrow().disabled());
    }
}
