//! Tramite WASM
//!
//! Binds the `tramite-site` page behaviour to the real browser: the
//! document, `localStorage`, `fetch`, timers and `IntersectionObserver`.
//! Load the module and call `mountSite()` once the DOM is ready.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;
use wasm_bindgen::prelude::*;

use tramite_site::{Browser, ObserverOptions, Site, SiteConfig, SystemClock};

mod dom;
mod events;
mod handle;
mod js;
mod logging;
mod network;
mod observer;
mod prepare;
mod scheduler;
mod store;

use dom::BrowserDom;
use handle::SiteHandle;
use network::FetchNetwork;
use observer::IntersectionVisibility;
use scheduler::TimeoutScheduler;
use store::LocalStore;

thread_local! {
    static MOUNTED: RefCell<Option<Rc<RefCell<Site>>>> = RefCell::new(None);
}

/// Set panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init();
}

/// Build the site against the current document and attach every listener.
///
/// `config` is an optional object with the same shape as `tramite.toml`;
/// missing keys take their defaults. Mounting twice replaces the first site.
#[wasm_bindgen(js_name = mountSite)]
pub fn mount_site(config: JsValue) -> Result<(), JsValue> {
    let mut config: SiteConfig = if config.is_undefined() || config.is_null() {
        SiteConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    prepare::adopt_ids(&document, &mut config)?;

    let handle = SiteHandle::default();
    let browser = Browser {
        dom: Rc::new(BrowserDom::new(document.clone())),
        store: Rc::new(LocalStore::from_window(&window)),
        scheduler: Rc::new(TimeoutScheduler::new(window.clone(), handle.clone())),
        observer: Rc::new(IntersectionVisibility::new(
            document.clone(),
            &ObserverOptions::from(&config.animation),
            handle.clone(),
        )?),
        clock: Rc::new(SystemClock),
    };

    let site = Rc::new(RefCell::new(Site::new(config.clone(), browser).map_err(js::to_js)?));
    handle.bind(&site);

    let fields: Vec<events::FieldBinding> = site
        .borrow()
        .form()
        .fields()
        .iter()
        .map(|field| (field.name().to_string(), field.id().to_string()))
        .collect();

    let network = Rc::new(FetchNetwork::new(window.clone()));
    events::attach(&window, &document, &config, &fields, &handle, network)?;

    site.borrow_mut().mount();
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(site));

    info!(
        form = %config.form.form_id,
        action = %config.form.action,
        fields = fields.len(),
        "site mounted"
    );
    Ok(())
}

/// Validate one value with the form's rules.
///
/// Returns the error message, or `undefined` when the value is acceptable.
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(name: &str, value: &str, required: bool) -> Option<String> {
    tramite_validation::validate_field(name, value, required)
        .err()
        .map(|err| err.message().to_string())
}

#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email(email: &str) -> bool {
    tramite_validation::is_valid_email(email)
}

#[wasm_bindgen(js_name = isValidPhone)]
pub fn is_valid_phone(phone: &str) -> bool {
    tramite_validation::is_valid_phone(phone)
}
