// File: tramite-site/src/observer.rs
// Purpose: Viewport visibility collaborator (IntersectionObserver in the browser)

use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::config::AnimationConfig;

/// Trigger margin and threshold the observer is created with
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: String,
    pub threshold: f64,
}

impl From<&AnimationConfig> for ObserverOptions {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            root_margin: config.root_margin.clone(),
            threshold: config.threshold,
        }
    }
}

/// Watches elements and reports when they enter the viewport.
///
/// The host calls [`crate::Site::on_intersect`] for each observed element
/// that starts intersecting.
pub trait VisibilityObserver {
    fn observe(&self, id: &str);

    fn unobserve(&self, id: &str);
}

/// Observer that only tracks which ids are watched
#[derive(Debug, Default)]
pub struct RecordingObserver {
    observed: RefCell<BTreeSet<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observing(&self, id: &str) -> bool {
        self.observed.borrow().contains(id)
    }

    pub fn observed(&self) -> Vec<String> {
        self.observed.borrow().iter().cloned().collect()
    }
}

impl VisibilityObserver for RecordingObserver {
    fn observe(&self, id: &str) {
        self.observed.borrow_mut().insert(id.to_string());
    }

    fn unobserve(&self, id: &str) {
        self.observed.borrow_mut().remove(id);
    }
}
