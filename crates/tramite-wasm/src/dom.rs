//! `Dom` backed by the live document

use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use tramite_site::{Dom, NamedControl};

use crate::js::report;

pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            trace!(id, "element not found");
        }
        element
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    /// `base`, or `base-N` for the first N not already taken in the document
    fn free_id(&self, base: &str) -> String {
        if self.document.get_element_by_id(base).is_none() {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}-{n}"))
            .find(|id| self.document.get_element_by_id(id).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    /// Give `element` an id if it has none; returns the id
    fn ensure_id(&self, element: &Element, base: &str) -> String {
        if element.id().is_empty() {
            element.set_id(&self.free_id(base));
        }
        element.id()
    }
}

impl Dom for BrowserDom {
    fn add_class(&self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            report(el.class_list().add_1(class), "classList.add");
        }
    }

    fn remove_class(&self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            report(el.class_list().remove_1(class), "classList.remove");
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map_or(false, |el| el.class_list().contains(class))
    }

    fn toggle_class(&self, id: &str, class: &str, on: bool) {
        if let Some(el) = self.element(id) {
            report(el.class_list().toggle_with_force(class, on), "classList.toggle");
        }
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) {
        if let Some(el) = self.element(id) {
            report(el.set_attribute(name, value), "setAttribute");
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.inner_html())
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        if let Some(el) = self.element(id) {
            el.set_inner_html(html);
        }
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        if let Some(el) = self.element(id) {
            report(el.toggle_attribute_with_force("disabled", disabled), "toggleAttribute");
        }
    }

    fn value(&self, id: &str) -> Option<String> {
        let el = self.element(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            Some(area.value())
        } else {
            el.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
        }
    }

    fn reset_form(&self, form_id: &str) {
        if let Some(form) = self
            .element(form_id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn focus(&self, id: &str) {
        if let Some(el) = self.html_element(id) {
            report(el.focus(), "focus");
        }
    }

    fn scroll_into_view(&self, id: &str) {
        if let Some(el) = self.element(id) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Center);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn set_style(&self, id: &str, property: &str, value: &str) {
        if let Some(el) = self.html_element(id) {
            report(el.style().set_property(property, value), "style.setProperty");
        }
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = self.document.body() {
            let overflow = if locked { "hidden" } else { "" };
            report(body.style().set_property("overflow", overflow), "body overflow");
        }
    }

    fn elements_with_class(&self, class: &str) -> Vec<String> {
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|index| collection.item(index))
            .enumerate()
            // observers and class lookups need an id
            .map(|(n, el)| self.ensure_id(&el, &format!("{class}-{n}")))
            .collect()
    }

    fn named_controls(&self, form_id: &str) -> Vec<NamedControl> {
        let Some(form) = self
            .element(form_id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            return Vec::new();
        };

        let elements = form.elements();
        (0..elements.length())
            .filter_map(|index| elements.item(index))
            .filter(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
            .filter_map(|el| {
                let name = el.get_attribute("name").filter(|name| !name.is_empty())?;
                let id = self.ensure_id(&el, &format!("{form_id}-{name}"));
                let group_id = el
                    .closest(".form-group")
                    .ok()
                    .flatten()
                    .map(|group| self.ensure_id(&group, &format!("{id}-group")));
                Some(NamedControl {
                    required: el.has_attribute("required"),
                    id,
                    name,
                    group_id,
                })
            })
            .collect()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(html: &str) -> (BrowserDom, Element) {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("browser document");
        let container = document.create_element("div").expect("div");
        container.set_inner_html(html);
        document
            .body()
            .expect("body")
            .append_child(&container)
            .expect("append");
        (BrowserDom::new(document), container)
    }

    #[wasm_bindgen_test]
    fn test_generated_ids_avoid_existing_ones() {
        let (dom, container) = mount(
            r#"<p id="reveal-0"></p>
               <section class="reveal"></section>
               <section class="reveal"></section>"#,
        );

        let ids = dom.elements_with_class("reveal");

        assert_eq!(ids, vec!["reveal-0-1".to_string(), "reveal-1".to_string()]);
        assert!(dom.has_class(&ids[0], "reveal"));
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_named_controls_follow_markup() {
        let (dom, container) = mount(
            r#"<form id="discovery-form">
                 <div class="form-group"><input name="privacy" type="checkbox" required></div>
                 <input type="hidden" name="_subject" value="Nuova richiesta">
                 <input placeholder="no name">
                 <button name="send">Invia</button>
               </form>"#,
        );

        let controls = dom.named_controls("discovery-form");

        assert_eq!(
            controls,
            vec![
                NamedControl {
                    id: "discovery-form-privacy".to_string(),
                    name: "privacy".to_string(),
                    required: true,
                    group_id: Some("discovery-form-privacy-group".to_string()),
                },
                NamedControl {
                    id: "discovery-form-_subject".to_string(),
                    name: "_subject".to_string(),
                    required: false,
                    group_id: None,
                },
            ]
        );
        assert_eq!(dom.value("discovery-form-_subject").as_deref(), Some("Nuova richiesta"));
        container.remove();
    }
}
