//! DOM event listeners that feed the mounted site

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent,
    ScrollBehavior, ScrollToOptions, Window,
};

use tramite_site::smooth_scroll::is_scrollable_anchor;
use tramite_site::{Network, ScrollMetrics, SiteConfig, SiteEvent};

use crate::handle::SiteHandle;
use crate::js::report;
use crate::network::FetchNetwork;

/// Register `handler` for `kind` on `target` for the lifetime of the page
pub(crate) fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    report(
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()),
        kind,
    );
    closure.forget();
}

fn listen_passive(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    report(
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        ),
        kind,
    );
    closure.forget();
}

fn dispatch_on(target: &EventTarget, kind: &str, site: &SiteHandle, event: SiteEvent) {
    let site = site.clone();
    listen(target, kind, move |_| {
        site.with(|site| site.handle(event.clone()));
    });
}

/// Form field as wired to input and blur listeners: name and element id
pub type FieldBinding = (String, String);

/// Wire every page listener to `site`
pub fn attach(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
    fields: &[FieldBinding],
    site: &SiteHandle,
    network: Rc<FetchNetwork>,
) -> Result<(), JsValue> {
    attach_nav(document, config, site)?;
    attach_anchors(window, document, config, site)?;
    attach_form(document, config, fields, site, network);
    attach_scroll(window, document, site);

    for (id, event) in [
        (&config.consent.accept_id, SiteEvent::ConsentAccept),
        (&config.consent.reject_id, SiteEvent::ConsentReject),
    ] {
        if let Some(button) = document.get_element_by_id(id) {
            dispatch_on(&button, "click", site, event);
        }
    }

    Ok(())
}

fn attach_nav(document: &Document, config: &SiteConfig, site: &SiteHandle) -> Result<(), JsValue> {
    let nav = &config.nav;

    if let Some(hamburger) = document.get_element_by_id(&nav.hamburger_id) {
        dispatch_on(&hamburger, "click", site, SiteEvent::HamburgerClick);
    }
    if let Some(overlay) = document.get_element_by_id(&nav.overlay_id) {
        dispatch_on(&overlay, "click", site, SiteEvent::OverlayClick);
    }

    let links = document.query_selector_all(&format!("#{} a", nav.menu_id))?;
    for index in 0..links.length() {
        if let Some(link) = links.item(index) {
            dispatch_on(&link, "click", site, SiteEvent::NavLinkClick);
        }
    }

    let keys = site.clone();
    listen(document, "keydown", move |event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            let key = event.key();
            keys.with(|site| site.handle(SiteEvent::KeyDown(key)));
        }
    });

    Ok(())
}

fn attach_anchors(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
    site: &SiteHandle,
) -> Result<(), JsValue> {
    let anchors = document.query_selector_all("a[href^=\"#\"]")?;
    for index in 0..anchors.length() {
        let Some(anchor) = anchors.item(index).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };

        let window = window.clone();
        let document = document.clone();
        let navbar_id = config.nav.navbar_id.clone();
        let site = site.clone();
        let anchor_el = anchor.clone();

        listen(&anchor, "click", move |event| {
            let href = anchor_el.get_attribute("href").unwrap_or_default();
            if !is_scrollable_anchor(&href) {
                return;
            }
            let Some(target) = document.query_selector(&href).ok().flatten() else {
                return;
            };
            event.prevent_default();

            let nav_height = document
                .get_element_by_id(&navbar_id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .map_or(0.0, |el| f64::from(el.offset_height()));
            let page_offset = window.page_y_offset().unwrap_or(0.0);
            let top = target.get_bounding_client_rect().top();

            let Some((destination, animation)) = site.with(|site| {
                let destination = site.anchor_target(top, page_offset, nav_height);
                (destination, site.smooth_scroll(page_offset, destination))
            }) else {
                return;
            };

            if supports_native_smooth_scroll(&document) {
                let options = ScrollToOptions::new();
                options.set_top(destination);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            } else {
                animate(window.clone(), animation);
            }
        });
    }
    Ok(())
}

fn supports_native_smooth_scroll(document: &Document) -> bool {
    document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map_or(false, |el| {
            js_sys::Reflect::has(&el.style(), &JsValue::from_str("scrollBehavior")).unwrap_or(false)
        })
}

type FrameSlot = RefCell<Option<Closure<dyn FnMut(f64)>>>;

/// Drive `animation` with `requestAnimationFrame`.
///
/// The frame closure keeps itself alive through its slot until the last
/// frame empties it. The returned handle dies once the closure is freed.
fn animate(
    window: Window,
    animation: tramite_site::smooth_scroll::SmoothScroll,
) -> Weak<FrameSlot> {
    let frame: Rc<FrameSlot> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let started = Cell::new(None::<f64>);
    let win = window.clone();

    *frame.borrow_mut() = Some(Closure::new(move |now: f64| {
        let start = started.get().unwrap_or(now);
        started.set(Some(start));
        let elapsed = now - start;

        win.scroll_to_with_x_and_y(0.0, animation.position_at(elapsed));
        if animation.wants_next_frame(elapsed) {
            if let Some(callback) = next.borrow().as_ref() {
                report(
                    win.request_animation_frame(callback.as_ref().unchecked_ref()),
                    "requestAnimationFrame",
                );
            }
        } else {
            // freed by wasm-bindgen once this call returns
            drop(next.borrow_mut().take());
        }
    }));

    if let Some(callback) = frame.borrow().as_ref() {
        report(
            window.request_animation_frame(callback.as_ref().unchecked_ref()),
            "requestAnimationFrame",
        );
    }
    Rc::downgrade(&frame)
}

fn attach_form(
    document: &Document,
    config: &SiteConfig,
    fields: &[FieldBinding],
    site: &SiteHandle,
    network: Rc<FetchNetwork>,
) {
    for (name, id) in fields {
        let Some(control) = document.get_element_by_id(id) else {
            continue;
        };
        dispatch_on(&control, "input", site, SiteEvent::FieldInput(name.clone()));
        dispatch_on(&control, "blur", site, SiteEvent::FieldBlur(name.clone()));
    }

    let Some(form_el) = document.get_element_by_id(&config.form.form_id) else {
        return;
    };
    let site = site.clone();
    listen(&form_el, "submit", move |event| {
        event.prevent_default();

        let Some(request) = site.with(|site| site.begin_submit()).flatten() else {
            return;
        };
        let site = site.clone();
        let network = network.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = network.send(&request).await;
            site.with(|site| site.complete_submit(outcome));
        });
    });
}

fn attach_scroll(window: &Window, document: &Document, site: &SiteHandle) {
    let site = site.clone();
    let win = window.clone();
    let document = document.clone();

    listen_passive(window, "scroll", move |_| {
        let Some(root) = document.document_element() else {
            return;
        };
        let metrics = ScrollMetrics {
            page_offset: win.page_y_offset().unwrap_or(0.0),
            scroll_top: f64::from(root.scroll_top()),
            scroll_height: f64::from(root.scroll_height()),
            client_height: f64::from(root.client_height()),
        };
        site.with(|site| site.handle(SiteEvent::Scroll(metrics)));
    });
}
