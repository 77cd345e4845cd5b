//! Deterministic animation module
//!
//! The whole illusion state machine lives here. This module must stay pure:
//! - Time advances only through `tick`
//! - No rendering, DOM or platform dependencies
//! - Output is a list of draw commands, never pixels

pub mod point;
pub mod state;
pub mod tick;

pub use point::{Point, SceneGeometry};
pub use state::{AnimationPhase, AnimationState, AppPhase};
pub use tick::{DrawCommand, Frame, FrameOutcome, TickInput, background_frame, tick};
