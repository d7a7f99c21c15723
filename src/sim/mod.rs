//! Deterministic simulation module
//!
//! All lap logic lives here. This module must be pure and deterministic:
//! - Position is a function of absolute time and the selected route
//! - Seeded RNG only
//! - Stable iteration order (by card ID)
//! - No rendering or platform dependencies

pub mod camera;
pub mod clock;
pub mod collector;
pub mod curve;
pub mod marker;
pub mod score;
pub mod state;
pub mod tick;

pub use camera::{CameraPose, MoverPose};
pub use clock::LapClock;
pub use collector::{ProximityCollector, remove_marker};
pub use curve::{CurveSet, QuadraticBezier};
pub use marker::{CARD_SIZE, CardKind, CardLook, Marker, MarkerId, SpawnPlan, spawn_markers};
pub use score::{CardCounts, LapReport, fair_play_score};
pub use state::{LapPhase, SessionState, SimEvent};
pub use tick::{FrameOutcome, tick};
