//! Quadratic Bezier routes
//!
//! Every route runs from the kickoff spot to the goal mouth. The control
//! point bends it left, right or up, so the three routes share endpoints but
//! arc differently.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::SettingsError;
use crate::wrap_index;

/// A quadratic Bezier curve in 3D
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl QuadraticBezier {
    pub const fn new(start: Vec3, control: Vec3, end: Vec3) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Point at `t` (second-degree Bernstein blend).
    ///
    /// `t` is expected in [0, 1]; values outside extrapolate the parabola.
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// First derivative at `t`
    #[inline]
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        2.0 * (1.0 - t) * (self.control - self.start) + 2.0 * t * (self.end - self.control)
    }

    /// Sample `num_points` evenly spaced points (for route previews)
    pub fn sample(&self, num_points: usize) -> Vec<Vec3> {
        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                self.point_at(t)
            })
            .collect()
    }
}

/// Ordered, non-empty set of routes plus the selected one
#[derive(Debug, Clone, Serialize)]
pub struct CurveSet {
    curves: Vec<QuadraticBezier>,
    selected: usize,
}

impl CurveSet {
    pub fn new(curves: Vec<QuadraticBezier>) -> Result<Self, SettingsError> {
        if curves.is_empty() {
            return Err(SettingsError::NoCurves);
        }
        Ok(Self {
            curves,
            selected: 0,
        })
    }

    /// Right wing, lofted center and left wing routes from kickoff to goal
    pub fn soccer_routes() -> Self {
        let bend = |control: Vec3| QuadraticBezier::new(KICKOFF, control, GOAL_MOUTH);
        Self {
            curves: vec![
                bend(Vec3::new(ROUTE_BEND, 0.0, ROUTE_BEND)),
                bend(Vec3::new(0.0, ROUTE_BEND, ROUTE_BEND)),
                bend(Vec3::new(-ROUTE_BEND, 0.0, ROUTE_BEND)),
            ],
            selected: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// True only for a set with no routes (never produced by `new`)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn curves(&self) -> &[QuadraticBezier] {
        &self.curves
    }

    /// Curve at `index` (wrapped into range)
    pub fn curve(&self, index: usize) -> &QuadraticBezier {
        &self.curves[index % self.curves.len()]
    }

    pub fn active(&self) -> &QuadraticBezier {
        &self.curves[self.selected]
    }

    /// Point on route `index` at progress `t`
    pub fn evaluate(&self, index: usize, t: f32) -> Vec3 {
        self.curve(index).point_at(t)
    }

    /// Advance the selected route by `delta`, wrapping around the set
    pub fn select(&mut self, delta: i32) -> usize {
        self.selected = wrap_index(self.selected, delta, self.curves.len());
        self.selected
    }
}

impl Default for CurveSet {
    fn default() -> Self {
        Self::soccer_routes()
    }
}
