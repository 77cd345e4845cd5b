//! Platform abstraction layer
//!
//! Handles browser/native differences for frame scheduling. The animation
//! never calls `requestAnimationFrame` directly: it asks a `FrameLoop`, which
//! guarantees at most one pending request and synchronous cancellation.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebScheduler;

/// Source of "call me on the next display refresh" requests
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Ask for one callback on the next frame
    fn request(&mut self) -> Self::Handle;

    /// Withdraw a request that has not fired yet
    fn cancel(&mut self, handle: Self::Handle);
}

/// Tracks the single outstanding frame request
#[derive(Debug)]
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Request a frame unless one is already pending
    pub fn ensure_scheduled(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request());
        }
    }

    /// Call at the top of every frame callback
    pub fn frame_delivered(&mut self) {
        self.pending = None;
    }

    /// Drop the pending request so no further frame runs
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Scheduler driven by hand (headless runs and tests)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u32,
    /// Requests not yet delivered or cancelled
    pub outstanding: Vec<u32>,
    pub requested: u32,
    pub cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the oldest outstanding request, returning whether there was one
    pub fn deliver(&mut self) -> bool {
        if self.outstanding.is_empty() {
            return false;
        }
        self.outstanding.remove(0);
        true
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request(&mut self) -> u32 {
        self.next_id += 1;
        self.requested += 1;
        self.outstanding.push(self.next_id);
        self.next_id
    }

    fn cancel(&mut self, handle: u32) {
        self.cancelled += 1;
        self.outstanding.retain(|&id| id != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pending_request() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.ensure_scheduled();
        frames.ensure_scheduled();
        assert!(frames.is_pending());
        assert_eq!(frames.scheduler().requested, 1);
        assert_eq!(frames.scheduler().outstanding.len(), 1);
    }

    #[test]
    fn test_delivery_allows_next_request() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.ensure_scheduled();
        assert!(frames.scheduler_mut().deliver());
        frames.frame_delivered();
        assert!(!frames.is_pending());

        frames.ensure_scheduled();
        assert_eq!(frames.scheduler().requested, 2);
    }

    #[test]
    fn test_cancel_withdraws_request() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.ensure_scheduled();
        frames.cancel();
        assert!(!frames.is_pending());
        assert!(frames.scheduler().outstanding.is_empty());
        assert_eq!(frames.scheduler().cancelled, 1);

        // Nothing left to cancel
        frames.cancel();
        assert_eq!(frames.scheduler().cancelled, 1);
        assert!(!frames.scheduler_mut().deliver());
    }
}
