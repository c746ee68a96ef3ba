// File: tramite-site/src/fade_in.rs
// Purpose: Fade sections in the first time they scroll into view

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::dom::Dom;
use crate::observer::VisibilityObserver;

pub struct FadeIn {
    pending: BTreeSet<String>,
    dom: Rc<dyn Dom>,
    observer: Rc<dyn VisibilityObserver>,
}

impl FadeIn {
    pub fn new(dom: Rc<dyn Dom>, observer: Rc<dyn VisibilityObserver>) -> Self {
        Self {
            pending: BTreeSet::new(),
            dom,
            observer,
        }
    }

    /// Start observing every element carrying `class`
    pub fn attach(&mut self, class: &str) {
        for id in self.dom.elements_with_class(class) {
            self.observer.observe(&id);
            self.pending.insert(id);
        }
    }

    /// Element `id` entered the viewport: reveal it once and stop watching
    pub fn on_intersect(&mut self, id: &str) {
        if self.pending.remove(id) {
            self.dom.add_class(id, "visible");
            self.observer.unobserve(id);
        }
    }

    /// Elements still waiting to be revealed
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::observer::RecordingObserver;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reveal_once() {
        let dom = Rc::new(MemoryDom::new());
        dom.insert_with_class("hero", "animate-on-scroll")
            .insert_with_class("pricing", "animate-on-scroll")
            .insert("footer");
        let observer = Rc::new(RecordingObserver::new());
        let mut fade = FadeIn::new(dom.clone(), observer.clone());

        fade.attach("animate-on-scroll");
        assert_eq!(observer.observed(), vec!["hero".to_string(), "pricing".to_string()]);

        fade.on_intersect("hero");
        assert!(dom.has_class("hero", "visible"));
        assert!(!observer.is_observing("hero"));
        assert_eq!(fade.pending(), 1);

        dom.remove_class("hero", "visible");
        fade.on_intersect("hero");
        assert!(!dom.has_class("hero", "visible"));

        fade.on_intersect("footer");
        assert!(!dom.has_class("footer", "visible"));
    }
}
