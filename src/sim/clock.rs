//! Wall-clock lap progress
//!
//! Progress is recomputed from absolute time every frame, so a dropped or
//! late frame only costs smoothness. The only state is the lap origin,
//! which moves on an explicit restart or a speed change.

use serde::{Deserialize, Serialize};

use crate::clamp_speed;

/// Largest f32 below 1.0
const PROGRESS_MAX: f32 = 1.0 - f32::EPSILON / 2.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapClock {
    /// Milliseconds per lap at speed 1.0 (always positive)
    period_ms: f64,
    /// Speed multiplier applied to the period
    speed: f32,
    /// Timestamp at which the current lap started (progress 0)
    origin_ms: f64,
}

impl LapClock {
    /// Create a clock; non-positive periods fall back to 1 ms
    pub fn new(period_ms: f64, speed: f32) -> Self {
        let period_ms = if period_ms > 0.0 && period_ms.is_finite() {
            period_ms
        } else {
            log::warn!("Lap period {} ms is not positive, using 1 ms", period_ms);
            1.0
        };
        Self {
            period_ms,
            speed: clamp_speed(speed),
            origin_ms: 0.0,
        }
    }

    #[inline]
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Unwrapped lap count since the origin
    #[inline]
    fn laps(&self, now_ms: f64) -> f64 {
        (now_ms - self.origin_ms) * self.speed as f64 / self.period_ms
    }

    /// Normalized progress in [0, 1)
    pub fn progress(&self, now_ms: f64) -> f32 {
        let t = self.laps(now_ms).rem_euclid(1.0) as f32;
        // f64 -> f32 can round 0.99999999 up to 1.0
        t.min(PROGRESS_MAX)
    }

    /// Start a new lap at `now_ms`
    pub fn restart(&mut self, now_ms: f64) {
        self.origin_ms = now_ms;
    }

    /// Change the speed multiplier without jumping the ball
    pub fn set_speed(&mut self, now_ms: f64, speed: f32) {
        let speed = clamp_speed(speed);
        let phase = self.laps(now_ms).rem_euclid(1.0);
        self.speed = speed;
        // Rebase so progress(now_ms) is unchanged under the new speed
        self.origin_ms = now_ms - phase * self.period_ms / speed as f64;
    }

    /// Multiply the current speed by `factor`
    pub fn scale_speed(&mut self, now_ms: f64, factor: f32) {
        self.set_speed(now_ms, self.speed * factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_SPEED, MIN_SPEED};
    use proptest::prelude::*;

    #[test]
    fn test_progress_wraps_each_period() {
        let clock = LapClock::new(8000.0, 1.0);
        assert_eq!(clock.progress(0.0), 0.0);
        assert!((clock.progress(2000.0) - 0.25).abs() < 1e-6);
        assert!((clock.progress(8000.0)).abs() < 1e-6);
        assert!((clock.progress(12000.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut clock = LapClock::new(5000.0, 1.0);
        clock.restart(123_456.0);
        assert_eq!(clock.progress(123_456.0), 0.0);
        assert!((clock.progress(124_706.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_speed_change_is_continuous() {
        let mut clock = LapClock::new(4000.0, 1.0);
        let before = clock.progress(1000.0);
        clock.set_speed(1000.0, 2.0);
        assert!((clock.progress(1000.0) - before).abs() < 1e-6);
        // Twice as fast afterwards: 500 ms now covers a quarter lap
        assert!((clock.progress(1500.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_speed_clamped() {
        let mut clock = LapClock::new(10_000.0, 1.0);
        clock.set_speed(0.0, 0.0);
        assert_eq!(clock.speed(), MIN_SPEED);
        clock.scale_speed(0.0, 1e9);
        assert_eq!(clock.speed(), MAX_SPEED);
    }

    #[test]
    fn test_bad_period_replaced() {
        let clock = LapClock::new(-5.0, 1.0);
        assert!(clock.period_ms() > 0.0);
    }

    proptest! {
        #[test]
        fn prop_progress_in_unit_range(now in -1e12f64..1e12, period in 1.0f64..1e5, speed in 0.1f32..10.0) {
            let clock = LapClock::new(period, speed);
            let t = clock.progress(now);
            prop_assert!((0.0..1.0).contains(&t));
        }
    }
}
