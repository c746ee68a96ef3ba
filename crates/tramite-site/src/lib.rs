// File: tramite-site/src/lib.rs
// Purpose: Main entry point for the Tramite page behaviour library

//! # tramite-site
//!
//! Behaviour of the Tramite marketing site, independent of the browser:
//! quote form validation and submission, mobile navigation, smooth
//! scrolling, scroll effects, fade-in animations and the cookie banner.
//!
//! Every browser capability is a collaborator trait ([`Dom`],
//! [`KeyValueStore`], [`Network`], [`Scheduler`], [`VisibilityObserver`],
//! [`Clock`]) injected into a single [`Site`] at page load. The
//! `tramite-wasm` crate implements them on top of `web-sys`; the in-memory
//! implementations here drive the tests.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let mut site = Site::new(config, browser)?;
//! site.mount();
//!
//! site.handle(SiteEvent::HamburgerClick);
//! if let Some(request) = site.begin_submit() {
//!     let outcome = network.send(&request).await;
//!     site.complete_submit(outcome);
//! }
//! ```

pub mod clock;
pub mod config;
pub mod consent;
pub mod dom;
pub mod error;
pub mod fade_in;
pub mod form;
pub mod nav;
pub mod network;
pub mod observer;
pub mod scheduler;
pub mod scroll;
pub mod site;
pub mod smooth_scroll;
pub mod storage;

// Re-export main types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{FieldConfig, SiteConfig};
pub use consent::{ConsentRecord, ConsentState, CookieConsent};
pub use dom::{Dom, MemoryDom, NamedControl};
pub use error::{Result, SiteError};
pub use form::{Field, FormController, SubmissionState, Validity};
pub use network::{FormPayload, MockNetwork, Network, NetworkResponse, SubmissionRequest};
pub use observer::{ObserverOptions, RecordingObserver, VisibilityObserver};
pub use scheduler::{ManualScheduler, Scheduler, Timer};
pub use scroll::ScrollMetrics;
pub use site::{Browser, Site, SiteEvent};
pub use storage::{KeyValueStore, MemoryStore};
