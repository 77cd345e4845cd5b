//! Per-frame animation step
//!
//! `tick` advances the state by exactly one display frame and returns the
//! draw commands for that frame. It never touches a drawing surface, so a
//! whole session can be replayed deterministically from a list of inputs.

use super::point::Point;
use super::state::{AnimationPhase, AnimationState, AppPhase};
use crate::i18n::TextKey;
use crate::settings::AnimationConfig;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Phase increment for this frame (radians), already scaled from the slider
    pub speed: f32,
}

impl TickInput {
    pub fn with_speed(speed: f32) -> Self {
        Self { speed }
    }
}

/// One drawing operation, executed in order by the scene renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Wipe the previous frame
    Clear,
    /// Fill the scene disk
    Background,
    /// Axis the point oscillates along
    DiameterLine(Point),
    /// Point at its position for `phase`
    Point { point: Point, phase: f32 },
}

/// Everything drawn in one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DiameterLine(_)))
            .count()
    }

    pub fn point_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Point { .. }))
            .count()
    }
}

/// The frame shown while idle: an empty disk
pub fn background_frame() -> Frame {
    Frame {
        commands: vec![DrawCommand::Clear, DrawCommand::Background],
    }
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutcome {
    /// Commands to draw, `None` when the surface must be left untouched
    pub frame: Option<Frame>,
    /// Whether another frame callback should be requested
    pub schedule_next: bool,
    /// Status line for this frame, translated by the host every time
    pub description: Option<TextKey>,
    /// Phase 1 ended on this frame
    pub phase_changed: bool,
    /// A new axis became visible on this frame
    pub line_revealed: bool,
}

/// Advance the animation by one frame
pub fn tick(state: &mut AnimationState, input: &TickInput, config: &AnimationConfig) -> FrameOutcome {
    match state.app_phase {
        // Frozen, but keep the loop alive so continue is instantaneous
        AppPhase::Paused => {
            return FrameOutcome {
                schedule_next: true,
                ..Default::default()
            };
        }
        AppPhase::Idle => return FrameOutcome::default(),
        AppPhase::Running => {}
    }

    let speed = if input.speed.is_finite() {
        input.speed.max(0.0)
    } else {
        0.0
    };
    state.base_angle += f64::from(speed);

    let description = state.description();
    let mut frame = background_frame();
    let mut phase_changed = false;
    let mut line_revealed = false;

    match state.animation_phase {
        AnimationPhase::Phase1 => {
            for &point in &state.points {
                frame.push(DrawCommand::Point {
                    point,
                    phase: state.draw_phase(),
                });
            }

            state.frame_counter += 1;
            if state.frame_counter > config.phase1_frames {
                state.animation_phase = AnimationPhase::Phase2;
                state.frame_counter = 0;
                state.visible_line_count = 1.min(state.points.len());
                state.base_angle_at_last_line_add = state.base_angle;
                phase_changed = true;
                log::info!("Phase 2 started at base angle {:.3}", state.base_angle);
            }
        }

        AnimationPhase::Phase2 => {
            // Lines first so every point is drawn on top of every line
            for &point in state.visible_points() {
                frame.push(DrawCommand::DiameterLine(point));
            }
            for &point in state.visible_points() {
                frame.push(DrawCommand::Point {
                    point,
                    phase: state.draw_phase(),
                });
            }

            let travelled = state.base_angle - state.base_angle_at_last_line_add;
            if travelled >= f64::from(config.line_reveal_phase)
                && state.visible_line_count < state.points.len()
            {
                state.visible_line_count += 1;
                state.base_angle_at_last_line_add = state.base_angle;
                line_revealed = true;
                log::debug!(
                    "Revealed line {}/{}",
                    state.visible_line_count,
                    state.points.len()
                );
            }
        }
    }

    FrameOutcome {
        frame: Some(frame),
        schedule_next: true,
        description: Some(description),
        phase_changed,
        line_revealed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running_state(config: &AnimationConfig) -> AnimationState {
        let mut state = AnimationState::new();
        assert!(state.start(config));
        state
    }

    /// Run phase 1 to completion without advancing the phase
    fn enter_phase2(state: &mut AnimationState, config: &AnimationConfig) {
        let still = TickInput::with_speed(0.0);
        while state.animation_phase == AnimationPhase::Phase1 {
            tick(state, &still, config);
        }
    }

    #[test]
    fn test_phase_flips_at_frame_401() {
        let config = AnimationConfig::default();
        let mut state = running_state(&config);
        let input = TickInput::with_speed(0.0);

        for frame in 1..=400 {
            let outcome = tick(&mut state, &input, &config);
            assert!(!outcome.phase_changed, "flipped early at frame {}", frame);
            assert_eq!(state.animation_phase, AnimationPhase::Phase1);
        }

        let outcome = tick(&mut state, &input, &config);
        assert!(outcome.phase_changed);
        assert_eq!(state.animation_phase, AnimationPhase::Phase2);
        assert_eq!(state.frame_counter, 0);
        assert_eq!(state.visible_line_count, 1);
        assert_eq!(state.base_angle_at_last_line_add, state.base_angle);
        // The flip frame itself is still drawn as phase 1
        assert_eq!(outcome.description, Some(TextKey::Phase1Description));

        // Exactly once per session
        for _ in 0..1000 {
            let outcome = tick(&mut state, &input, &config);
            assert!(!outcome.phase_changed);
            assert_eq!(outcome.description, Some(TextKey::Phase2Description));
        }
    }

    #[test]
    fn test_phase1_draws_all_points_without_lines() {
        let config = AnimationConfig::default();
        let mut state = running_state(&config);

        let outcome = tick(&mut state, &TickInput::with_speed(0.5), &config);
        let frame = outcome.frame.unwrap();
        assert_eq!(frame.commands[0], DrawCommand::Clear);
        assert_eq!(frame.commands[1], DrawCommand::Background);
        assert_eq!(frame.point_count(), config.point_count);
        assert_eq!(frame.line_count(), 0);
        assert!(outcome.schedule_next);
        assert!((state.base_angle - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_phase2_lines_beneath_points() {
        let config = AnimationConfig::default();
        let mut state = running_state(&config);
        enter_phase2(&mut state, &config);
        state.visible_line_count = 3;

        let frame = tick(&mut state, &TickInput::with_speed(0.01), &config)
            .frame
            .unwrap();
        let body = &frame.commands[2..];
        assert_eq!(body.len(), 6);
        for (i, command) in body[..3].iter().enumerate() {
            assert_eq!(*command, DrawCommand::DiameterLine(state.points[i]));
        }
        for (i, command) in body[3..].iter().enumerate() {
            match command {
                DrawCommand::Point { point, phase } => {
                    assert_eq!(*point, state.points[i]);
                    assert_eq!(*phase, state.draw_phase());
                }
                other => panic!("expected point, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_line_reveal_every_two_periods() {
        let config = AnimationConfig::default();
        let mut state = running_state(&config);
        enter_phase2(&mut state, &config);
        let start = state.base_angle;

        let input = TickInput::with_speed(1.0);
        let mut reveal_angles = Vec::new();
        while state.visible_line_count < config.point_count {
            if tick(&mut state, &input, &config).line_revealed {
                reveal_angles.push(state.base_angle - start);
            }
        }

        // First reveal on the first whole step past 4*PI
        assert_eq!(reveal_angles.len(), config.point_count - 1);
        assert!((reveal_angles[0] - 13.0).abs() < 1e-4);
        for pair in reveal_angles.windows(2) {
            assert!(pair[1] - pair[0] >= f64::from(config.line_reveal_phase));
        }

        // Capped at N
        for _ in 0..100 {
            assert!(!tick(&mut state, &input, &config).line_revealed);
        }
        assert_eq!(state.visible_line_count, config.point_count);
    }

    #[test]
    fn test_reveal_pacing_ignores_step_size() {
        let config = AnimationConfig::default();
        let distance = 50.0;

        let reveals_for = |step: f32| {
            let mut state = running_state(&config);
            enter_phase2(&mut state, &config);
            let frames = (distance / step).round() as usize;
            let input = TickInput::with_speed(step);
            (0..frames)
                .filter(|_| tick(&mut state, &input, &config).line_revealed)
                .count()
        };

        let expected = (distance / config.line_reveal_phase).floor() as usize;
        assert_eq!(reveals_for(0.1), expected);
        assert_eq!(reveals_for(1.0), expected);
    }

    #[test]
    fn test_long_session_accumulates_exactly() {
        let config = AnimationConfig::default();
        let mut state = running_state(&config);
        let step = 0.02f32;
        let frames = 200_000;

        let input = TickInput::with_speed(step);
        let mut last_phase = 0.0;
        for _ in 0..frames {
            if let Some(frame) = tick(&mut state, &input, &config).frame {
                if let Some(DrawCommand::Point { phase, .. }) = frame.commands.last() {
                    last_phase = *phase;
                }
            }
        }

        let expected = frames as f64 * f64::from(step);
        assert!((state.base_angle - expected).abs() < 1e-6);
        assert!((0.0..std::f32::consts::TAU).contains(&last_phase));
        assert!((f64::from(last_phase) - expected.rem_euclid(std::f64::consts::TAU)).abs() < 1e-5);
        assert_eq!(state.visible_line_count, config.point_count);
    }

    #[test]
    fn test_zero_speed_never_reveals() {
        let config = AnimationConfig::default();
        let mut state = running_state(&config);
        enter_phase2(&mut state, &config);

        for _ in 0..5000 {
            tick(&mut state, &TickInput::with_speed(0.0), &config);
        }
        assert_eq!(state.visible_line_count, 1);
    }

    #[test]
    fn test_paused_frame_draws_nothing_but_reschedules() {
        let config = AnimationConfig::default();
        let mut state = running_state(&config);
        tick(&mut state, &TickInput::with_speed(0.3), &config);
        state.stop();
        let before = state.clone();

        let outcome = tick(&mut state, &TickInput::with_speed(0.3), &config);
        assert!(outcome.frame.is_none());
        assert!(outcome.schedule_next);
        assert_eq!(state, before);
    }

    #[test]
    fn test_idle_frame_stops_loop() {
        let config = AnimationConfig::default();
        let mut state = AnimationState::new();

        let outcome = tick(&mut state, &TickInput::with_speed(0.3), &config);
        assert_eq!(outcome, FrameOutcome::default());
        assert!(!outcome.schedule_next);
        assert_eq!(state, AnimationState::new());
    }

    #[test]
    fn test_invalid_speed_treated_as_zero() {
        let config = AnimationConfig::default();
        let mut state = running_state(&config);

        tick(&mut state, &TickInput::with_speed(-1.0), &config);
        tick(&mut state, &TickInput::with_speed(f32::NAN), &config);
        assert_eq!(state.base_angle, 0.0);
        assert_eq!(state.frame_counter, 2);
    }

    proptest! {
        #[test]
        fn prop_visible_lines_monotonic_and_bounded(
            speeds in proptest::collection::vec(0.0f32..3.0, 1..400),
        ) {
            let config = AnimationConfig {
                phase1_frames: 5,
                ..Default::default()
            };
            let mut state = running_state(&config);
            let mut last = state.visible_line_count;

            for speed in speeds {
                tick(&mut state, &TickInput::with_speed(speed), &config);
                prop_assert!(state.visible_line_count >= last);
                prop_assert!(state.visible_line_count <= config.point_count);
                last = state.visible_line_count;
            }
        }
    }
}
