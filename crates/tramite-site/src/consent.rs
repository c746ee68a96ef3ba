// File: tramite-site/src/consent.rs
// Purpose: Cookie consent banner and the persisted consent record

use std::rc::Rc;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::ConsentConfig;
use crate::dom::Dom;
use crate::error::Result;
use crate::scheduler::{Scheduler, Timer};
use crate::storage::KeyValueStore;

/// Value stored under the consent key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub consent: bool,
    /// ISO-8601, UTC, millisecond precision
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentState {
    /// Store not read yet
    #[default]
    Unchecked,
    /// A choice was stored on an earlier visit; never prompt
    Suppressed,
    /// Waiting for the first scroll or the fallback timer
    Armed,
    Shown,
    /// Visitor chose during this visit
    Decided,
}

pub struct CookieConsent {
    config: ConsentConfig,
    state: ConsentState,
    dom: Rc<dyn Dom>,
    store: Rc<dyn KeyValueStore>,
    scheduler: Rc<dyn Scheduler>,
    clock: Rc<dyn Clock>,
}

impl CookieConsent {
    pub fn new(
        config: ConsentConfig,
        dom: Rc<dyn Dom>,
        store: Rc<dyn KeyValueStore>,
        scheduler: Rc<dyn Scheduler>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            state: ConsentState::Unchecked,
            dom,
            store,
            scheduler,
            clock,
        }
    }

    pub fn state(&self) -> ConsentState {
        self.state
    }

    /// Read the store once at page load and arm the prompt if no choice exists
    pub fn check(&mut self) {
        if self.state != ConsentState::Unchecked {
            return;
        }

        match self.store.get(&self.config.storage_key) {
            // an empty value counts as no choice
            Ok(Some(value)) if !value.is_empty() => {
                debug!("consent already recorded, banner suppressed");
                self.state = ConsentState::Suppressed;
            }
            Ok(_) => self.arm(),
            Err(err) => {
                warn!(error = %err, "could not read consent, prompting again");
                self.arm();
            }
        }
    }

    fn arm(&mut self) {
        self.state = ConsentState::Armed;
        self.scheduler
            .schedule(Timer::ConsentFallback, self.config.fallback_delay());
    }

    fn show(&mut self) {
        if self.state == ConsentState::Armed {
            self.state = ConsentState::Shown;
            self.dom.add_class(&self.config.banner_id, "visible");
        }
    }

    /// Window scroll; only the first one after arming matters
    pub fn on_scroll(&mut self) {
        self.show();
    }

    /// Fallback timer fired
    pub fn on_fallback(&mut self) {
        self.show();
    }

    pub fn accept(&mut self) {
        self.decide(true);
    }

    pub fn reject(&mut self) {
        self.decide(false);
    }

    fn decide(&mut self, consent: bool) {
        let record = ConsentRecord {
            consent,
            timestamp: self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        if let Err(err) = self.persist(&record) {
            warn!(error = %err, "could not store consent choice");
        } else {
            info!(consent, "consent choice stored");
        }

        self.state = ConsentState::Decided;
        self.dom.remove_class(&self.config.banner_id, "visible");
    }

    fn persist(&self, record: &ConsentRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.store.set(&self.config.storage_key, &json)
    }

    /// The stored record, if any
    pub fn stored_record(&self) -> Result<Option<ConsentRecord>> {
        match self.store.get(&self.config.storage_key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::dom::MemoryDom;
    use crate::error::SiteError;
    use crate::scheduler::ManualScheduler;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct Fixture {
        consent: CookieConsent,
        dom: Rc<MemoryDom>,
        store: Rc<MemoryStore>,
        scheduler: Rc<ManualScheduler>,
    }

    fn fixture(store: MemoryStore) -> Fixture {
        let dom = Rc::new(MemoryDom::new());
        dom.insert("cookieBanner");
        let store = Rc::new(store);
        let scheduler = Rc::new(ManualScheduler::new());
        let clock = Rc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap(),
        ));
        let consent = CookieConsent::new(
            ConsentConfig::default(),
            dom.clone(),
            store.clone(),
            scheduler.clone(),
            clock,
        );
        Fixture {
            consent,
            dom,
            store,
            scheduler,
        }
    }

    #[test]
    fn test_stored_choice_suppresses_banner() {
        let mut f = fixture(MemoryStore::with_entry(
            "cookieConsent",
            r#"{"consent":false,"timestamp":"2026-01-01T00:00:00.000Z"}"#,
        ));
        f.consent.check();
        assert_eq!(f.consent.state(), ConsentState::Suppressed);
        assert!(f.scheduler.pending().is_empty());

        f.consent.on_scroll();
        assert!(!f.dom.has_class("cookieBanner", "visible"));
    }

    #[test]
    fn test_empty_stored_value_still_prompts() {
        let mut f = fixture(MemoryStore::with_entry("cookieConsent", ""));
        f.consent.check();
        assert_eq!(f.consent.state(), ConsentState::Armed);
        assert_eq!(f.scheduler.pending(), vec![Timer::ConsentFallback]);

        f.consent.on_scroll();
        assert!(f.dom.has_class("cookieBanner", "visible"));
    }

    #[test]
    fn test_check_runs_once() {
        let mut f = fixture(MemoryStore::new());
        f.consent.check();
        f.consent.check();
        assert_eq!(f.scheduler.pending(), vec![Timer::ConsentFallback]);
    }

    #[test]
    fn test_unreadable_store_still_prompts() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let mut f = fixture(store);
        f.consent.check();
        assert_eq!(f.consent.state(), ConsentState::Armed);
    }

    #[test]
    fn test_accept_writes_record_and_hides() {
        let mut f = fixture(MemoryStore::new());
        f.consent.check();
        f.consent.on_scroll();
        assert!(f.dom.has_class("cookieBanner", "visible"));

        f.consent.accept();

        assert!(!f.dom.has_class("cookieBanner", "visible"));
        assert_eq!(
            f.consent.stored_record().unwrap(),
            Some(ConsentRecord {
                consent: true,
                timestamp: "2026-10-16T09:30:00.000Z".to_string(),
            })
        );
    }

    #[test]
    fn test_reject_is_stored_too() {
        let mut f = fixture(MemoryStore::new());
        f.consent.check();
        f.consent.reject();
        let raw = f.store.get("cookieConsent").unwrap().unwrap();
        assert_eq!(raw, r#"{"consent":false,"timestamp":"2026-10-16T09:30:00.000Z"}"#);
    }

    #[test]
    fn test_failed_write_still_hides_banner() {
        let mut f = fixture(MemoryStore::new());
        f.consent.check();
        f.consent.on_fallback();
        f.store.set_unavailable(true);

        f.consent.reject();

        assert_eq!(f.consent.state(), ConsentState::Decided);
        assert!(!f.dom.has_class("cookieBanner", "visible"));
    }

    #[test]
    fn test_fallback_after_decision_is_inert() {
        let mut f = fixture(MemoryStore::new());
        f.consent.check();
        f.consent.accept();
        for timer in f.scheduler.advance(Duration::from_millis(3000)) {
            assert_eq!(timer, Timer::ConsentFallback);
            f.consent.on_fallback();
        }
        assert!(!f.dom.has_class("cookieBanner", "visible"));
    }

    #[test]
    fn test_corrupt_record_reported() {
        let f = fixture(MemoryStore::with_entry("cookieConsent", "yes"));
        assert!(matches!(f.consent.stored_record(), Err(SiteError::ConsentRecord(_))));
    }
}
