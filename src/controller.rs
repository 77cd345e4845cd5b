//! Animation controller
//!
//! Couples the animation state machine with a frame scheduler. Lifecycle
//! events come from the UI between frames; `on_frame` runs once per
//! delivered frame callback.

use crate::platform::{FrameLoop, FrameScheduler};
use crate::settings::AnimationConfig;
use crate::sim::{AnimationState, Frame, FrameOutcome, TickInput, background_frame, tick};

pub struct AnimationController<S: FrameScheduler> {
    state: AnimationState,
    config: AnimationConfig,
    frames: FrameLoop<S>,
}

impl<S: FrameScheduler> AnimationController<S> {
    pub fn new(config: AnimationConfig, scheduler: S) -> Self {
        Self {
            state: AnimationState::new(),
            config,
            frames: FrameLoop::new(scheduler),
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn frames(&self) -> &FrameLoop<S> {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameLoop<S> {
        &mut self.frames
    }

    /// IDLE -> RUNNING and kick off the frame loop
    pub fn start(&mut self) -> bool {
        if !self.state.start(&self.config) {
            return false;
        }
        log::info!("Animation started with {} points", self.state.points.len());
        self.frames.ensure_scheduled();
        true
    }

    /// RUNNING -> PAUSED; the loop keeps ticking
    pub fn stop(&mut self) -> bool {
        let applied = self.state.stop();
        if applied {
            log::info!("Animation paused at base angle {:.3}", self.state.base_angle);
        }
        applied
    }

    /// PAUSED -> RUNNING
    pub fn resume(&mut self) -> bool {
        let applied = self.state.resume();
        if applied {
            log::info!("Animation resumed");
            // A host that dropped the loop while paused still gets frames again
            self.frames.ensure_scheduled();
        }
        applied
    }

    /// Back to IDLE. Returns the background-only frame that clears the scene.
    pub fn end(&mut self) -> Option<Frame> {
        if !self.state.end() {
            return None;
        }
        self.frames.cancel();
        log::info!("Animation ended");
        Some(background_frame())
    }

    /// Handle one delivered frame callback
    pub fn on_frame(&mut self, input: &TickInput) -> FrameOutcome {
        self.frames.frame_delivered();
        let outcome = tick(&mut self.state, input, &self.config);
        if outcome.schedule_next {
            self.frames.ensure_scheduled();
        }
        outcome
    }
}
