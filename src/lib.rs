//! Curve Kick - a ball riding Bezier routes to goal, collecting cards
//!
//! Core modules:
//! - `sim`: Deterministic lap simulation (curves, clock, collector, scoring)
//! - `goal`: Static goal frame layout handed to the renderer
//! - `input`: Keyboard command mapping
//! - `scene`: Renderer/report collaborator traits and frame presentation
//! - `settings`: Tunable configuration

pub mod goal;
pub mod input;
pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Lap period in milliseconds at speed 1.0
    pub const LAP_PERIOD_MS: f64 = 8000.0;
    /// Distance below which the ball captures a card
    pub const CAPTURE_RADIUS: f32 = 5.0;
    /// Progress at which a lap counts as completed
    pub const COMPLETION_THRESHOLD: f32 = 0.99;

    /// Cards spawned on every route per lap
    pub const CARDS_PER_ROUTE: usize = 4;
    /// Cards never spawn right at kickoff or inside the goal mouth
    pub const SPAWN_T_MIN: f32 = 0.2;
    pub const SPAWN_T_MAX: f32 = 0.98;

    /// Speed multiplier bounds and key steps
    pub const MIN_SPEED: f32 = 0.1;
    pub const MAX_SPEED: f32 = 10.0;
    pub const SPEED_UP_STEP: f32 = 1.1;
    pub const SLOW_DOWN_STEP: f32 = 0.9;

    /// Ball spin about +Y (radians per millisecond)
    pub const BALL_SPIN_RATE: f64 = 0.001;
    pub const BALL_RADIUS: f32 = 3.0;
    pub const BALL_TEXTURE: &str = "textures/soccer_ball.jpg";

    /// Routes start at the kickoff spot and end in the goal mouth
    pub const KICKOFF: Vec3 = Vec3::new(0.0, 0.0, 1000.0);
    pub const GOAL_MOUTH: Vec3 = Vec3::ZERO;
    /// Lateral/vertical bend of the three routes
    pub const ROUTE_BEND: f32 = 150.0;

    /// Follow camera: fixed height, fixed x, trailing distance behind the ball
    pub const CAMERA_HEIGHT: f32 = 30.0;
    pub const CAMERA_X: f32 = 0.0;
    pub const CAMERA_TRAIL: f32 = 150.0;
}

/// Wrap `current + delta` into `[0, len)`
#[inline]
pub fn wrap_index(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (current as i64 + delta as i64).rem_euclid(len) as usize
}

/// Speed multiplier clamped to [MIN_SPEED, MAX_SPEED]; non-finite means 1.0
#[inline]
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(consts::MIN_SPEED, consts::MAX_SPEED)
    } else {
        1.0
    }
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}
