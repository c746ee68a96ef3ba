//! `Scheduler` backed by `setTimeout`

use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use tramite_site::{Scheduler, Timer};

use crate::handle::SiteHandle;
use crate::js::report;

pub struct TimeoutScheduler {
    window: Window,
    site: SiteHandle,
}

impl TimeoutScheduler {
    pub fn new(window: Window, site: SiteHandle) -> Self {
        Self { window, site }
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, timer: Timer, delay: Duration) {
        let site = self.site.clone();
        let callback = Closure::once_into_js(move || {
            site.with(|site| site.on_timer(timer));
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        report(
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    millis,
                ),
            "setTimeout",
        );
    }
}
