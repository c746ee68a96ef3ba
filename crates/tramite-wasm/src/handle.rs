//! Shared access to the mounted `Site` from browser callbacks

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

use tramite_site::Site;

/// Late-bound weak reference to the site.
///
/// Collaborators that call back into the site (timers, the intersection
/// observer) are built before the site exists, so they receive this
/// handle and it is bound once the site is constructed.
#[derive(Clone, Default)]
pub struct SiteHandle(Rc<RefCell<Weak<RefCell<Site>>>>);

impl SiteHandle {
    pub fn bind(&self, site: &Rc<RefCell<Site>>) {
        *self.0.borrow_mut() = Rc::downgrade(site);
    }

    /// Run `f` against the site.
    ///
    /// Returns `None` if the site is gone or already borrowed: a DOM call
    /// made by a handler (e.g. `focus()`) can dispatch another event
    /// synchronously, and that nested event is dropped.
    pub fn with<R>(&self, f: impl FnOnce(&mut Site) -> R) -> Option<R> {
        let site = self.0.borrow().upgrade()?;
        let result = match site.try_borrow_mut() {
            Ok(mut site) => Some(f(&mut site)),
            Err(_) => {
                debug!("site busy, nested event dropped");
                None
            }
        };
        result
    }
}
