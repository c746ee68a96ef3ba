// File: tramite-site/src/nav.rs
// Purpose: Mobile navigation menu (hamburger, overlay, Escape to close)

use std::rc::Rc;

use tracing::debug;

use crate::config::NavConfig;
use crate::dom::Dom;

/// Mobile menu. The open flag is the source of truth; classes and
/// ARIA attributes are painted from it.
pub struct NavMenu {
    config: NavConfig,
    open: bool,
    dom: Rc<dyn Dom>,
}

impl NavMenu {
    pub fn new(config: NavConfig, dom: Rc<dyn Dom>) -> Self {
        Self {
            config,
            open: false,
            dom,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger or overlay click
    pub fn toggle(&mut self) {
        self.open = !self.open;
        debug!(open = self.open, "nav menu toggled");
        self.render();
    }

    /// A link inside the menu was followed
    pub fn on_link_click(&mut self) {
        if self.open {
            self.toggle();
        }
    }

    /// Document keydown; Escape closes an open menu and returns focus to the hamburger
    pub fn on_key(&mut self, key: &str) {
        if key == "Escape" && self.open {
            self.toggle();
            self.dom.focus(&self.config.hamburger_id);
        }
    }

    fn render(&self) {
        let dom = self.dom.as_ref();
        let open = self.open;

        dom.toggle_class(&self.config.hamburger_id, "active", open);
        dom.toggle_class(&self.config.menu_id, "active", open);
        dom.toggle_class(&self.config.overlay_id, "active", open);
        dom.set_attribute(&self.config.hamburger_id, "aria-expanded", bool_attr(open));
        dom.set_attribute(
            &self.config.hamburger_id,
            "aria-label",
            if open { "Chiudi menu" } else { "Apri menu" },
        );
        dom.set_attribute(&self.config.overlay_id, "aria-hidden", bool_attr(!open));
        dom.set_scroll_locked(open);
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
