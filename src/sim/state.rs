//! Session state and core simulation types
//!
//! Every mutable field of a run lives here: selected route, live cards,
//! counters, lap phase and the seeded RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraPose;
use super::clock::LapClock;
use super::collector::ProximityCollector;
use super::curve::CurveSet;
use super::marker::{Marker, MarkerId, SpawnPlan, spawn_markers};
use super::score::{CardCounts, LapReport};
use crate::settings::Settings;

/// Lap state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LapPhase {
    /// Ball travelling along the route
    Running,
    /// Completion side effects in progress (scoring, respawn, restart)
    Completing,
}

/// Something the host should react to
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// Card placed along a route
    CardSpawned(Marker),
    /// Card removed without being captured (lap reset)
    CardRemoved(MarkerId),
    /// Ball reached a card
    CardCaptured(Marker),
    /// Lap finished; report goes to the player
    LapCompleted(LapReport),
    /// Selected route changed
    RouteChanged(usize),
    /// Manual orbit camera toggled
    FreeCameraChanged(bool),
    /// Wireframe rendering toggled
    WireframeChanged(bool),
    /// Speed multiplier changed
    SpeedChanged(f32),
}

/// Complete session state (deterministic given seed and timestamps)
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub curves: CurveSet,
    pub clock: LapClock,
    pub collector: ProximityCollector,
    /// Live cards (ascending id; capture and respawn keep the order)
    pub markers: Vec<Marker>,
    /// Cards collected this lap
    pub counts: CardCounts,
    pub phase: LapPhase,
    /// Progress sampled on the previous frame (None before the first frame)
    pub last_t: Option<f32>,
    /// Completed laps
    pub laps: u32,
    /// Last follow pose pushed to the camera
    pub camera: CameraPose,
    /// Orbit controller owns the camera
    pub free_camera: bool,
    pub wireframe: bool,
    rng: Pcg32,
    next_id: MarkerId,
}

impl SessionState {
    /// Create a new session; invalid settings fall back to defaults
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_curves(settings, CurveSet::soccer_routes(), seed)
    }

    pub fn with_curves(settings: Settings, curves: CurveSet, seed: u64) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Settings::default()
            }
        };
        let mut state = Self {
            seed,
            clock: LapClock::new(settings.lap_period_ms, settings.clamped_speed()),
            collector: ProximityCollector::new(settings.capture_radius),
            settings,
            curves,
            markers: Vec::new(),
            counts: CardCounts::default(),
            phase: LapPhase::Running,
            last_t: None,
            laps: 0,
            camera: CameraPose::default(),
            free_camera: false,
            wireframe: false,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.respawn_markers();
        state
    }

    fn spawn_plan(&self) -> SpawnPlan {
        SpawnPlan {
            per_route: self.settings.cards_per_route,
            t_min: self.settings.spawn_t_min,
            t_max: self.settings.spawn_t_max,
        }
    }

    /// Replace every card with a fresh random layout.
    ///
    /// Returns the removed ids and the new cards.
    pub fn respawn_markers(&mut self) -> (Vec<MarkerId>, Vec<Marker>) {
        let removed: Vec<MarkerId> = self.markers.drain(..).map(|m| m.id).collect();
        let plan = self.spawn_plan();
        let spawned = spawn_markers(&self.curves, plan, &mut self.rng, &mut self.next_id);
        self.markers = spawned.clone();
        (removed, spawned)
    }

    /// Live cards on the selected route
    pub fn active_markers(&self) -> impl Iterator<Item = &Marker> {
        let route = self.curves.selected();
        self.markers.iter().filter(move |m| m.route == route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_spawns_cards() {
        let state = SessionState::new(Settings::default(), 12345);
        assert_eq!(state.markers.len(), 3 * state.settings.cards_per_route);
        assert_eq!(state.phase, LapPhase::Running);
        assert_eq!(state.counts, CardCounts::default());
        assert_eq!(state.active_markers().count(), state.settings.cards_per_route);
    }

    #[test]
    fn test_invalid_settings_fall_back() {
        let settings = Settings {
            capture_radius: -1.0,
            ..Default::default()
        };
        let state = SessionState::new(settings, 1);
        assert_eq!(state.settings, Settings::default());
    }

    #[test]
    fn test_respawn_replaces_all_cards() {
        let mut state = SessionState::new(Settings::default(), 99);
        let old_ids: Vec<_> = state.markers.iter().map(|m| m.id).collect();
        let (removed, spawned) = state.respawn_markers();
        assert_eq!(removed, old_ids);
        assert_eq!(spawned.len(), old_ids.len());
        assert!(spawned.iter().all(|m| !old_ids.contains(&m.id)));
        assert_eq!(state.markers, spawned);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = SessionState::new(Settings::default(), 2024);
        let b = SessionState::new(Settings::default(), 2024);
        assert_eq!(a.markers, b.markers);
    }
}
