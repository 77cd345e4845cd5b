//! Circular Illusion - independently oscillating points perceived as a rotation
//!
//! Core modules:
//! - `sim`: Deterministic animation state machine (points, phases, per-frame tick)
//! - `controller`: Binds the state machine to a frame scheduler
//! - `renderer`: Scene drawing and the WebGPU pipeline
//! - `platform`: Frame scheduling abstraction (requestAnimationFrame on web)
//! - `explain`: On-demand AI explanation of the illusion
//! - `reading`: Curated further-reading panel
//! - `i18n`: Localized UI strings

pub mod controller;
pub mod explain;
pub mod i18n;
pub mod platform;
pub mod reading;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use controller::AnimationController;
pub use i18n::{Language, TextKey};
pub use settings::{AnimationConfig, Settings};

use glam::Vec2;

/// Scene configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Number of oscillating points
    pub const POINT_COUNT: usize = 8;
    /// Frames spent in phase 1 before the axes start appearing
    pub const PHASE1_FRAMES: u32 = 400;
    /// Accumulated oscillation phase between two line reveals (two full periods)
    pub const LINE_REVEAL_PHASE: f32 = 4.0 * PI;

    /// Radius of the red disk and oscillation amplitude
    pub const SCENE_RADIUS: f32 = 220.0;
    pub const POINT_RADIUS: f32 = 12.0;
    pub const LINE_WIDTH: f32 = 2.0;

    /// Raw slider value is divided by this to get radians per frame
    pub const SPEED_SCALE: f32 = 1000.0;
    /// Slider bounds and default
    pub const SPEED_MIN: f32 = 0.0;
    pub const SPEED_MAX: f32 = 100.0;
    pub const SPEED_DEFAULT: f32 = 20.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
