//! requestAnimationFrame-backed scheduler

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::FrameScheduler;

/// Schedules one long-lived closure on every request
pub struct WebScheduler {
    callback: Closure<dyn FnMut(f64)>,
}

impl WebScheduler {
    pub fn new(callback: Closure<dyn FnMut(f64)>) -> Self {
        Self { callback }
    }
}

impl FrameScheduler for WebScheduler {
    type Handle = i32;

    fn request(&mut self) -> i32 {
        let Some(window) = web_sys::window() else {
            log::warn!("No window, frame not scheduled");
            return 0;
        };
        match window.request_animation_frame(self.callback.as_ref().unchecked_ref()) {
            Ok(id) => id,
            Err(e) => {
                // The loop stalls; nothing else to do in a browser without rAF
                log::warn!("requestAnimationFrame failed: {:?}", e);
                0
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }
}
