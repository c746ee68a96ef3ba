//! Fill in what the markup leaves implicit before the site is built
//!
//! The page addresses elements by id, but the navbar and the submit button
//! are usually anonymous. They are adopted here under the ids the
//! configuration expects. Form controls and their `.form-group` wrappers
//! get ids when the form discovers them.

use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlFormElement};

use tramite_site::SiteConfig;

pub fn adopt_ids(document: &Document, config: &mut SiteConfig) -> Result<(), JsValue> {
    let form = document.get_element_by_id(&config.form.form_id);

    if config.form.action.is_empty() {
        if let Some(form) = form.as_ref().and_then(|el| el.dyn_ref::<HtmlFormElement>()) {
            config.form.action = form.action();
            debug!(action = %config.form.action, "form action taken from markup");
        }
    }

    if document.get_element_by_id(&config.nav.navbar_id).is_none() {
        adopt(document.query_selector("nav")?, &config.nav.navbar_id);
    }

    if let Some(form) = &form {
        if document
            .get_element_by_id(&config.form.submit_button_id)
            .is_none()
        {
            adopt(
                form.query_selector("button[type=\"submit\"]")?,
                &config.form.submit_button_id,
            );
        }
    }

    Ok(())
}

fn adopt(element: Option<Element>, id: &str) {
    if let Some(element) = element {
        if element.id().is_empty() {
            element.set_id(id);
        }
    }
}
