// File: tramite-site/src/scroll.rs
// Purpose: Navbar "scrolled" state and the reading progress bar

use std::rc::Rc;

use crate::config::{NavConfig, ScrollConfig};
use crate::dom::Dom;

/// Document scroll measurements taken in a scroll handler
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    /// `window.pageYOffset`
    pub page_offset: f64,
    /// `documentElement.scrollTop`
    pub scroll_top: f64,
    /// `documentElement.scrollHeight`
    pub scroll_height: f64,
    /// `documentElement.clientHeight`
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Progress through the scrollable height in percent, if the page scrolls at all
    pub fn progress_percent(&self) -> Option<f64> {
        let scrollable = self.scroll_height - self.client_height;
        (scrollable > 0.0).then(|| self.scroll_top / scrollable * 100.0)
    }
}

pub struct ScrollEffects {
    nav: NavConfig,
    scroll: ScrollConfig,
    dom: Rc<dyn Dom>,
}

impl ScrollEffects {
    pub fn new(nav: NavConfig, scroll: ScrollConfig, dom: Rc<dyn Dom>) -> Self {
        Self { nav, scroll, dom }
    }

    pub fn on_scroll(&self, metrics: &ScrollMetrics) {
        self.dom.toggle_class(
            &self.nav.navbar_id,
            "scrolled",
            metrics.page_offset > self.nav.scrolled_after_px,
        );

        if let Some(progress) = metrics.progress_percent() {
            let bar = &self.scroll.progress_id;
            self.dom.set_style(bar, "width", &format!("{progress}%"));
            self.dom.toggle_class(
                bar,
                "visible",
                metrics.scroll_top > self.scroll.progress_visible_after_px,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use pretty_assertions::assert_eq;

    fn setup() -> (ScrollEffects, Rc<MemoryDom>) {
        let dom = Rc::new(MemoryDom::new());
        dom.insert("mainNav").insert("scrollProgress");
        let effects = ScrollEffects::new(NavConfig::default(), ScrollConfig::default(), dom.clone());
        (effects, dom)
    }

    fn at(offset: f64) -> ScrollMetrics {
        ScrollMetrics {
            page_offset: offset,
            scroll_top: offset,
            scroll_height: 3000.0,
            client_height: 1000.0,
        }
    }

    #[test]
    fn test_navbar_scrolled_past_threshold() {
        let (effects, dom) = setup();
        effects.on_scroll(&at(50.0));
        assert!(!dom.has_class("mainNav", "scrolled"));
        effects.on_scroll(&at(51.0));
        assert!(dom.has_class("mainNav", "scrolled"));
        effects.on_scroll(&at(0.0));
        assert!(!dom.has_class("mainNav", "scrolled"));
    }

    #[test]
    fn test_progress_width_and_visibility() {
        let (effects, dom) = setup();
        effects.on_scroll(&at(500.0));
        assert_eq!(dom.style("scrollProgress", "width").as_deref(), Some("25%"));
        assert!(dom.has_class("scrollProgress", "visible"));

        effects.on_scroll(&at(10.0));
        assert_eq!(dom.style("scrollProgress", "width").as_deref(), Some("0.5%"));
        assert!(!dom.has_class("scrollProgress", "visible"));
    }

    #[test]
    fn test_short_page_leaves_progress_alone() {
        let (effects, dom) = setup();
        effects.on_scroll(&ScrollMetrics {
            page_offset: 0.0,
            scroll_top: 0.0,
            scroll_height: 800.0,
            client_height: 800.0,
        });
        assert_eq!(dom.style("scrollProgress", "width"), None);
    }
}
