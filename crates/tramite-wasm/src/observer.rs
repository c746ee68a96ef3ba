//! `VisibilityObserver` backed by `IntersectionObserver`

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use tramite_site::{ObserverOptions, VisibilityObserver};

use crate::handle::SiteHandle;

pub struct IntersectionVisibility {
    document: Document,
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl IntersectionVisibility {
    pub fn new(
        document: Document,
        options: &ObserverOptions,
        site: SiteHandle,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let id = entry.target().id();
                        site.with(|site| site.on_intersect(&id));
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin);
        init.set_threshold(&JsValue::from_f64(options.threshold));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            document,
            observer,
            _callback: callback,
        })
    }
}

impl VisibilityObserver for IntersectionVisibility {
    fn observe(&self, id: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            self.observer.observe(&el);
        }
    }

    fn unobserve(&self, id: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            self.observer.unobserve(&el);
        }
    }
}
