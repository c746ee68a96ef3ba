// File: tramite-site/src/site.rs
// Purpose: The whole page: controllers built once at load, events routed to them

use std::rc::Rc;

use chrono::Datelike;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::SiteConfig;
use crate::consent::CookieConsent;
use crate::dom::Dom;
use crate::error::Result;
use crate::fade_in::FadeIn;
use crate::form::{FormController, SubmissionState};
use crate::nav::NavMenu;
use crate::network::{Network, NetworkResponse, SubmissionRequest};
use crate::observer::VisibilityObserver;
use crate::scheduler::{Scheduler, Timer};
use crate::scroll::{ScrollEffects, ScrollMetrics};
use crate::smooth_scroll::{anchor_scroll_top, SmoothScroll};
use crate::storage::KeyValueStore;

/// Collaborators the page is built on
#[derive(Clone)]
pub struct Browser {
    pub dom: Rc<dyn Dom>,
    pub store: Rc<dyn KeyValueStore>,
    pub scheduler: Rc<dyn Scheduler>,
    pub observer: Rc<dyn VisibilityObserver>,
    pub clock: Rc<dyn Clock>,
}

/// Synchronous page events
#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent {
    HamburgerClick,
    OverlayClick,
    NavLinkClick,
    KeyDown(String),
    Scroll(ScrollMetrics),
    FieldInput(String),
    FieldBlur(String),
    ConsentAccept,
    ConsentReject,
    Intersect(String),
    Timer(Timer),
}

/// Everything the page does, behind one object
pub struct Site {
    config: SiteConfig,
    browser: Browser,
    nav: NavMenu,
    scroll: ScrollEffects,
    fade_in: FadeIn,
    form: FormController,
    consent: CookieConsent,
}

impl Site {
    /// Build the controllers; fails on an unusable configuration
    pub fn new(config: SiteConfig, browser: Browser) -> Result<Self> {
        config.validate()?;

        let dom = browser.dom.clone();
        Ok(Self {
            nav: NavMenu::new(config.nav.clone(), dom.clone()),
            scroll: ScrollEffects::new(config.nav.clone(), config.scroll.clone(), dom.clone()),
            fade_in: FadeIn::new(dom.clone(), browser.observer.clone()),
            form: FormController::new(config.form.clone(), dom.clone(), browser.scheduler.clone()),
            consent: CookieConsent::new(
                config.consent.clone(),
                dom,
                browser.store.clone(),
                browser.scheduler.clone(),
                browser.clock.clone(),
            ),
            config,
            browser,
        })
    }

    /// Page-load work: start observers, consent check, footer year
    pub fn mount(&mut self) {
        self.fade_in.attach(&self.config.animation.class);
        self.consent.check();

        let year = self.browser.clock.now().year();
        self.browser
            .dom
            .set_text(&self.config.footer.year_id, &year.to_string());
        debug!(year, "site mounted");
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn nav(&self) -> &NavMenu {
        &self.nav
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn consent(&self) -> &CookieConsent {
        &self.consent
    }

    pub fn fade_in(&self) -> &FadeIn {
        &self.fade_in
    }

    pub fn handle(&mut self, event: SiteEvent) {
        match event {
            SiteEvent::HamburgerClick | SiteEvent::OverlayClick => self.nav.toggle(),
            SiteEvent::NavLinkClick => self.nav.on_link_click(),
            SiteEvent::KeyDown(key) => self.nav.on_key(&key),
            SiteEvent::Scroll(metrics) => self.on_scroll(&metrics),
            SiteEvent::FieldInput(name) => {
                if let Err(err) = self.form.on_input(&name) {
                    warn!(error = %err, "input event ignored");
                }
            }
            SiteEvent::FieldBlur(name) => {
                if let Err(err) = self.form.on_blur(&name) {
                    warn!(error = %err, "blur event ignored");
                }
            }
            SiteEvent::ConsentAccept => self.consent.accept(),
            SiteEvent::ConsentReject => self.consent.reject(),
            SiteEvent::Intersect(id) => self.on_intersect(&id),
            SiteEvent::Timer(timer) => self.on_timer(timer),
        }
    }

    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) {
        self.scroll.on_scroll(metrics);
        self.consent.on_scroll();
    }

    pub fn on_intersect(&mut self, id: &str) {
        self.fade_in.on_intersect(id);
    }

    pub fn on_timer(&mut self, timer: Timer) {
        match timer {
            Timer::RevertSubmit { attempt } => self.form.on_revert(attempt),
            Timer::ConsentFallback => self.consent.on_fallback(),
        }
    }

    /// Vertical position an anchor click should scroll to
    pub fn anchor_target(&self, target_top: f64, page_offset: f64, nav_height: f64) -> f64 {
        anchor_scroll_top(
            target_top,
            page_offset,
            nav_height,
            self.config.nav.anchor_offset_px,
        )
    }

    /// Fallback animation from `start` to `target`
    pub fn smooth_scroll(&self, start: f64, target: f64) -> SmoothScroll {
        SmoothScroll::new(start, target, self.config.scroll.smooth_scroll_duration())
    }

    /// See [`FormController::begin_submit`]
    pub fn begin_submit(&mut self) -> Option<SubmissionRequest> {
        self.form.begin_submit()
    }

    /// See [`FormController::complete_submit`]
    pub fn complete_submit(&mut self, outcome: Result<NetworkResponse>) {
        self.form.complete_submit(outcome);
    }

    pub async fn submit(&mut self, network: &dyn Network) -> SubmissionState {
        self.form.submit(network).await
    }
}
