//! Animation state and lifecycle transitions
//!
//! One record holds everything the per-frame tick needs. Transitions are
//! guarded by the current phase: an event that does not apply is ignored
//! and reported as `false`, never an error.

use std::f64::consts::TAU;

use super::point::Point;
use crate::i18n::TextKey;
use crate::settings::AnimationConfig;

/// Coarse lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Nothing scheduled, scene shows the background only
    #[default]
    Idle,
    /// Frames advance the animation
    Running,
    /// Frames keep coming but nothing moves or redraws
    Paused,
}

/// Visual behavior inside a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    /// Dots oscillate, no lines
    #[default]
    Phase1,
    /// Dots oscillate while their axes are revealed one at a time
    Phase2,
}

/// Complete animation state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationState {
    pub app_phase: AppPhase,
    pub animation_phase: AnimationPhase,
    /// Accumulated oscillation phase (radians), unbounded over a session
    pub base_angle: f64,
    /// Points in creation order, empty while idle
    pub points: Vec<Point>,
    /// Number of leading points whose axis is drawn (phase 2 only)
    pub visible_line_count: usize,
    /// Frames spent in phase 1
    pub frame_counter: u32,
    /// `base_angle` when the last line was revealed
    pub base_angle_at_last_line_add: f64,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.app_phase == AppPhase::Idle
    }

    pub fn is_running(&self) -> bool {
        self.app_phase == AppPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.app_phase == AppPhase::Paused
    }

    /// IDLE -> RUNNING: fresh counters and a new set of points
    pub fn start(&mut self, config: &AnimationConfig) -> bool {
        if !self.is_idle() {
            log::debug!("Ignoring start while {:?}", self.app_phase);
            return false;
        }
        *self = Self {
            app_phase: AppPhase::Running,
            points: Point::evenly_spaced(config.point_count),
            ..Self::default()
        };
        true
    }

    /// RUNNING -> PAUSED
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            log::debug!("Ignoring stop while {:?}", self.app_phase);
            return false;
        }
        self.app_phase = AppPhase::Paused;
        true
    }

    /// PAUSED -> RUNNING, nothing is reset
    pub fn resume(&mut self) -> bool {
        if !self.is_paused() {
            log::debug!("Ignoring continue while {:?}", self.app_phase);
            return false;
        }
        self.app_phase = AppPhase::Running;
        true
    }

    /// RUNNING/PAUSED -> IDLE, discarding points and counters
    pub fn end(&mut self) -> bool {
        if self.is_idle() {
            log::debug!("Ignoring end while idle");
            return false;
        }
        *self = Self::default();
        true
    }

    /// `base_angle` folded into one period, for drawing in `f32`
    pub fn draw_phase(&self) -> f32 {
        self.base_angle.rem_euclid(TAU) as f32
    }

    /// Points whose axis is currently drawn
    pub fn visible_points(&self) -> &[Point] {
        let count = self.visible_line_count.min(self.points.len());
        &self.points[..count]
    }

    /// Status line for the current state
    pub fn description(&self) -> TextKey {
        match (self.app_phase, self.animation_phase) {
            (AppPhase::Idle, _) => TextKey::ClickToStart,
            (AppPhase::Paused, _) => TextKey::AnimationPaused,
            (AppPhase::Running, AnimationPhase::Phase1) => TextKey::Phase1Description,
            (AppPhase::Running, AnimationPhase::Phase2) => TextKey::Phase2Description,
        }
    }
}
