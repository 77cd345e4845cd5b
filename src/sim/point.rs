//! Oscillating point geometry
//!
//! A point never moves off its own diameter of the scene disk: its signed
//! distance from the center is `R * cos(phase + offset)`, measured along the
//! direction `offset`. Evenly spacing the offsets over a half-turn is what
//! makes the whole set read as a rolling circle.

use glam::Vec2;
use std::f32::consts::PI;

use crate::consts::SCENE_RADIUS;
use crate::polar_to_cartesian;

/// Where the scene disk sits on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneGeometry {
    /// Disk center in surface coordinates
    pub center: Vec2,
    /// Disk radius, also the oscillation amplitude
    pub radius: f32,
}

impl Default for SceneGeometry {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            radius: SCENE_RADIUS,
        }
    }
}

impl SceneGeometry {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// One oscillating point, identified only by its axis angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Axis angle in radians (stored verbatim)
    offset: f32,
}

impl Point {
    pub fn new(offset: f32) -> Self {
        Self { offset }
    }

    /// Axis angle in radians
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// `count` points with offsets `i / count * PI`, in creation order
    pub fn evenly_spaced(count: usize) -> Vec<Point> {
        (0..count)
            .map(|i| Point::new(i as f32 / count as f32 * PI))
            .collect()
    }

    /// Signed distance from the center along the axis
    #[inline]
    pub fn radial_distance(&self, phase: f32, radius: f32) -> f32 {
        radius * (phase + self.offset).cos()
    }

    /// Position for the global oscillation phase (radians, unbounded)
    pub fn position(&self, phase: f32, geometry: &SceneGeometry) -> Vec2 {
        let distance = self.radial_distance(phase, geometry.radius);
        geometry.center + polar_to_cartesian(distance, self.offset)
    }

    /// Ends of the diameter this point travels on: (antipode, boundary point at `offset`)
    pub fn axis_endpoints(&self, geometry: &SceneGeometry) -> (Vec2, Vec2) {
        let end = polar_to_cartesian(geometry.radius, self.offset);
        (geometry.center - end, geometry.center + end)
    }
}
