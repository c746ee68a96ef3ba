//! In-memory DOM for tests
//!
//! Keeps a flat table of elements keyed by id, in insertion (document)
//! order, and records focus, scroll-into-view and scroll-lock calls.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use super::{Dom, NamedControl};

#[derive(Debug, Clone, Default)]
struct Element {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    content: String,
    disabled: bool,
    value: Option<String>,
    default_value: Option<String>,
    form: Option<String>,
    name: Option<String>,
    required: bool,
}

/// In-memory [`Dom`] implementation
#[derive(Debug, Default)]
pub struct MemoryDom {
    order: RefCell<Vec<String>>,
    elements: RefCell<BTreeMap<String, Element>>,
    focused: RefCell<Option<String>>,
    scrolled_into_view: RefCell<Vec<String>>,
    scroll_locked: Cell<bool>,
}

impl MemoryDom {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain element
    pub fn insert(&self, id: &str) -> &Self {
        let mut elements = self.elements.borrow_mut();
        if !elements.contains_key(id) {
            elements.insert(id.to_string(), Element::default());
            self.order.borrow_mut().push(id.to_string());
        }
        self
    }

    /// Add a plain element with inner html
    pub fn insert_with_html(&self, id: &str, html: &str) -> &Self {
        self.insert(id);
        self.with_element(id, |el| el.content = html.to_string());
        self
    }

    /// Add an element carrying a class
    pub fn insert_with_class(&self, id: &str, class: &str) -> &Self {
        self.insert(id);
        self.add_class(id, class);
        self
    }

    /// Add a form control belonging to `form_id`, with a default value
    pub fn insert_control(&self, form_id: &str, id: &str, default_value: &str) -> &Self {
        self.insert(id);
        self.with_element(id, |el| {
            el.value = Some(default_value.to_string());
            el.default_value = Some(default_value.to_string());
            el.form = Some(form_id.to_string());
        });
        self
    }

    /// Add a control with a `name` attribute, discoverable by [`Dom::named_controls`]
    pub fn insert_named_control(
        &self,
        form_id: &str,
        id: &str,
        name: &str,
        default_value: &str,
        required: bool,
    ) -> &Self {
        self.insert_control(form_id, id, default_value);
        self.with_element(id, |el| {
            el.name = Some(name.to_string());
            el.required = required;
        });
        self
    }

    /// Simulate the user typing: replace the control's value
    pub fn type_value(&self, id: &str, value: &str) {
        self.with_element(id, |el| el.value = Some(value.to_string()));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    pub fn text(&self, id: &str) -> String {
        self.read(id, |el| el.content.clone()).unwrap_or_default()
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.read(id, |el| el.attributes.get(name).cloned()).flatten()
    }

    pub fn style(&self, id: &str, property: &str) -> Option<String> {
        self.read(id, |el| el.style.get(property).cloned()).flatten()
    }

    pub fn classes(&self, id: &str) -> Vec<String> {
        self.read(id, |el| el.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.read(id, |el| el.disabled).unwrap_or(false)
    }

    pub fn focused(&self) -> Option<String> {
        self.focused.borrow().clone()
    }

    pub fn scrolled_into_view(&self) -> Vec<String> {
        self.scrolled_into_view.borrow().clone()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }

    fn read<T>(&self, id: &str, f: impl FnOnce(&Element) -> T) -> Option<T> {
        self.elements.borrow().get(id).map(f)
    }

    fn with_element(&self, id: &str, f: impl FnOnce(&mut Element)) {
        if let Some(el) = self.elements.borrow_mut().get_mut(id) {
            f(el);
        }
    }
}

impl Dom for MemoryDom {
    fn add_class(&self, id: &str, class: &str) {
        self.with_element(id, |el| {
            el.classes.insert(class.to_string());
        });
    }

    fn remove_class(&self, id: &str, class: &str) {
        self.with_element(id, |el| {
            el.classes.remove(class);
        });
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.read(id, |el| el.classes.contains(class)).unwrap_or(false)
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) {
        self.with_element(id, |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn set_text(&self, id: &str, text: &str) {
        self.with_element(id, |el| el.content = text.to_string());
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.read(id, |el| el.content.clone())
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        self.with_element(id, |el| el.content = html.to_string());
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        self.with_element(id, |el| el.disabled = disabled);
    }

    fn value(&self, id: &str) -> Option<String> {
        self.read(id, |el| el.value.clone()).flatten()
    }

    fn reset_form(&self, form_id: &str) {
        for el in self.elements.borrow_mut().values_mut() {
            if el.form.as_deref() == Some(form_id) {
                el.value = el.default_value.clone();
            }
        }
    }

    fn focus(&self, id: &str) {
        if self.contains(id) {
            *self.focused.borrow_mut() = Some(id.to_string());
        }
    }

    fn scroll_into_view(&self, id: &str) {
        if self.contains(id) {
            self.scrolled_into_view.borrow_mut().push(id.to_string());
        }
    }

    fn set_style(&self, id: &str, property: &str, value: &str) {
        self.with_element(id, |el| {
            el.style.insert(property.to_string(), value.to_string());
        });
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
    }

    fn elements_with_class(&self, class: &str) -> Vec<String> {
        let elements = self.elements.borrow();
        self.order
            .borrow()
            .iter()
            .filter(|id| {
                elements
                    .get(id.as_str())
                    .map_or(false, |el| el.classes.contains(class))
            })
            .cloned()
            .collect()
    }

    fn named_controls(&self, form_id: &str) -> Vec<NamedControl> {
        let elements = self.elements.borrow();
        self.order
            .borrow()
            .iter()
            .filter_map(|id| {
                let el = elements.get(id.as_str())?;
                if el.form.as_deref() != Some(form_id) {
                    return None;
                }
                let name = el.name.clone().filter(|name| !name.is_empty())?;
                Some(NamedControl {
                    id: id.clone(),
                    name,
                    required: el.required,
                    group_id: None,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classes_toggle() {
        let dom = MemoryDom::new();
        dom.insert("group");
        dom.toggle_class("group", "error", true);
        assert!(dom.has_class("group", "error"));
        dom.toggle_class("group", "error", false);
        assert!(!dom.has_class("group", "error"));
    }

    #[test]
    fn test_missing_element_is_ignored() {
        let dom = MemoryDom::new();
        dom.add_class("ghost", "visible");
        dom.focus("ghost");
        assert!(!dom.has_class("ghost", "visible"));
        assert_eq!(dom.focused(), None);
    }

    #[test]
    fn test_reset_form_only_touches_its_controls() {
        let dom = MemoryDom::new();
        dom.insert_control("quoteForm", "name", "")
            .insert_control("quoteForm", "source", "landing")
            .insert_control("newsletter", "nl-email", "");
        dom.type_value("name", "Al");
        dom.type_value("source", "altro");
        dom.type_value("nl-email", "x@y.it");

        dom.reset_form("quoteForm");

        assert_eq!(dom.value("name").as_deref(), Some(""));
        assert_eq!(dom.value("source").as_deref(), Some("landing"));
        assert_eq!(dom.value("nl-email").as_deref(), Some("x@y.it"));
    }

    #[test]
    fn test_named_controls_skip_unnamed_and_foreign() {
        let dom = MemoryDom::new();
        dom.insert_named_control("quoteForm", "privacy", "privacy", "", true)
            .insert_control("quoteForm", "anonymous", "")
            .insert_named_control("newsletter", "nl-email", "email", "", true)
            .insert_named_control("quoteForm", "subject", "_subject", "Preventivo", false);

        assert_eq!(
            dom.named_controls("quoteForm"),
            vec![
                NamedControl {
                    id: "privacy".to_string(),
                    name: "privacy".to_string(),
                    required: true,
                    group_id: None,
                },
                NamedControl {
                    id: "subject".to_string(),
                    name: "_subject".to_string(),
                    required: false,
                    group_id: None,
                },
            ]
        );
    }

    #[test]
    fn test_elements_with_class_in_document_order() {
        let dom = MemoryDom::new();
        dom.insert_with_class("hero", "animate-on-scroll")
            .insert("plain")
            .insert_with_class("services", "animate-on-scroll");
        assert_eq!(
            dom.elements_with_class("animate-on-scroll"),
            vec!["hero".to_string(), "services".to_string()]
        );
    }
}
