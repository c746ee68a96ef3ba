//! DOM collaborator
//!
//! Every page controller talks to the document through this trait, by
//! element id. The browser implementation lives in `tramite-wasm`;
//! [`memory::MemoryDom`] records everything for tests.
//!
//! Mutations on an element that does not exist are silently ignored,
//! like a missing optional node in the page.

pub mod memory;

pub use memory::MemoryDom;

/// A form control carrying a `name` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedControl {
    pub id: String,
    pub name: String,
    /// `required` attribute present
    pub required: bool,
    /// Id of the enclosing `.form-group`, when there is one
    pub group_id: Option<String>,
}

/// Element lookup and mutation by id
pub trait Dom {
    fn add_class(&self, id: &str, class: &str);

    fn remove_class(&self, id: &str, class: &str);

    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Add `class` when `on`, remove it otherwise
    fn toggle_class(&self, id: &str, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str);

    fn set_text(&self, id: &str, text: &str);

    fn inner_html(&self, id: &str) -> Option<String>;

    fn set_inner_html(&self, id: &str, html: &str);

    fn set_disabled(&self, id: &str, disabled: bool);

    /// Current value of a form control
    fn value(&self, id: &str) -> Option<String>;

    /// Restore every control of the form to its default value
    fn reset_form(&self, form_id: &str);

    fn focus(&self, id: &str);

    /// Smoothly scroll the element to the vertical centre of the viewport
    fn scroll_into_view(&self, id: &str);

    fn set_style(&self, id: &str, property: &str, value: &str);

    /// Lock or unlock page scrolling (`overflow: hidden` on the body)
    fn set_scroll_locked(&self, locked: bool);

    /// Ids of all elements carrying `class`, in document order
    fn elements_with_class(&self, class: &str) -> Vec<String>;

    /// Named `input`, `textarea` and `select` controls of a form, in document order
    fn named_controls(&self, form_id: &str) -> Vec<NamedControl>;
}
