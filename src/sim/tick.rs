//! Per-frame simulation tick
//!
//! Order within a frame: clock sample, route evaluation, card capture,
//! lap completion. Nothing carries over between frames except the previous
//! progress sample used for edge detection.

use super::camera::{CameraPose, MoverPose};
use super::score::LapReport;
use super::state::{LapPhase, SessionState, SimEvent};
use crate::consts::BALL_SPIN_RATE;
use crate::wrap_angle;

/// Everything the host needs to present one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    /// Lap progress after this frame
    pub t: f32,
    pub mover: MoverPose,
    /// Follow pose, or None while the orbit controller owns the camera
    pub camera: Option<CameraPose>,
    /// Events in the order they happened
    pub events: Vec<SimEvent>,
}

/// Advance the session to wall-clock time `now_ms`
pub fn tick(state: &mut SessionState, now_ms: f64) -> FrameOutcome {
    let mut events = Vec::new();

    // First frame starts the lap at kickoff
    if state.last_t.is_none() {
        state.clock.restart(now_ms);
    }

    let t = state.clock.progress(now_ms);
    let route = state.curves.selected();
    let point = state.curves.evaluate(route, t);

    // Cards on the active route within reach
    let captured = state
        .collector
        .collect(point, route, &mut state.markers, &mut state.counts);
    for marker in captured {
        log::debug!(
            "Captured {} card {} on route {} at t={:.3}",
            marker.kind.as_str(),
            marker.id,
            route,
            t
        );
        events.push(SimEvent::CardCaptured(marker));
    }

    let t = if lap_finished(state, t) {
        complete_lap(state, now_ms, &mut events);
        state.clock.progress(now_ms)
    } else {
        t
    };
    state.last_t = Some(t);

    let mover = MoverPose {
        position: state.curves.evaluate(route, t),
        // f64 -> f32 can round just under 2π up to 2π
        spin: (wrap_angle(now_ms * BALL_SPIN_RATE) as f32).rem_euclid(std::f32::consts::TAU),
    };

    let camera = if state.free_camera {
        None
    } else {
        state.camera = CameraPose::follow(mover.position);
        Some(state.camera)
    };

    FrameOutcome {
        t,
        mover,
        camera,
        events,
    }
}

/// Edge trigger: the threshold was crossed since the previous frame, or the
/// clock wrapped past the end of the lap between two frames
fn lap_finished(state: &SessionState, t: f32) -> bool {
    if state.phase != LapPhase::Running {
        return false;
    }
    let threshold = state.settings.completion_threshold;
    match state.last_t {
        Some(prev) => prev < threshold && (t >= threshold || t < prev),
        None => false,
    }
}

/// Score the lap, reset counters and cards, restart at kickoff
fn complete_lap(state: &mut SessionState, now_ms: f64, events: &mut Vec<SimEvent>) {
    state.phase = LapPhase::Completing;

    let report = LapReport::new(state.curves.selected(), state.counts);
    state.laps += 1;
    log::info!("Lap {}: {}", state.laps, report);
    events.push(SimEvent::LapCompleted(report));

    state.counts.reset();
    let (removed, spawned) = state.respawn_markers();
    events.extend(removed.into_iter().map(SimEvent::CardRemoved));
    events.extend(spawned.into_iter().map(SimEvent::CardSpawned));

    state.clock.restart(now_ms);
    state.phase = LapPhase::Running;
}
