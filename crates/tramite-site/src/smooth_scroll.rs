// File: tramite-site/src/smooth_scroll.rs
// Purpose: Anchor scroll targets and the ease-in-out fallback animation

use std::time::Duration;

/// Where an in-page anchor jump should land.
///
/// `target_top` is the target's viewport-relative top, `page_offset` the
/// current vertical scroll. The navbar height and an extra gap are
/// subtracted so the target is not hidden under the fixed navbar.
pub fn anchor_scroll_top(target_top: f64, page_offset: f64, nav_height: f64, gap: f64) -> f64 {
    target_top + page_offset - nav_height - gap
}

/// Whether a link's `href` is an in-page anchor worth intercepting
pub fn is_scrollable_anchor(href: &str) -> bool {
    href.starts_with('#') && href != "#"
}

/// Quadratic ease-in-out: time `t`, start `b`, change `c`, duration `d`
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    t -= 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

/// Frame-by-frame scroll animation for browsers without native smooth scrolling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    start: f64,
    distance: f64,
    duration_ms: f64,
}

impl SmoothScroll {
    pub fn new(start: f64, target: f64, duration: Duration) -> Self {
        Self {
            start,
            distance: target - start,
            duration_ms: duration.as_secs_f64() * 1000.0,
        }
    }

    /// Scroll position `elapsed_ms` after the first frame
    pub fn position_at(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return self.start + self.distance;
        }
        ease_in_out_quad(elapsed_ms, self.start, self.distance, self.duration_ms)
    }

    /// Another frame should be requested after drawing this one
    pub fn wants_next_frame(&self, elapsed_ms: f64) -> bool {
        elapsed_ms < self.duration_ms
    }
}
