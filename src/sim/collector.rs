//! Proximity capture of cards by the ball
//!
//! A linear scan is plenty for a dozen cards. Only cards on the active route
//! are tested; the others stay put until the player switches to their route.

use glam::Vec3;

use super::marker::{Marker, MarkerId};
use super::score::CardCounts;

#[derive(Debug, Clone, Copy)]
pub struct ProximityCollector {
    capture_radius: f32,
}

impl ProximityCollector {
    /// Non-positive radii are replaced by a tiny positive one
    pub fn new(capture_radius: f32) -> Self {
        let capture_radius = if capture_radius > 0.0 && capture_radius.is_finite() {
            capture_radius
        } else {
            log::warn!("Capture radius {} is not positive, using 1e-3", capture_radius);
            1e-3
        };
        Self { capture_radius }
    }

    #[inline]
    pub fn capture_radius(&self) -> f32 {
        self.capture_radius
    }

    #[inline]
    pub fn in_range(&self, marker: &Marker, position: Vec3) -> bool {
        marker.distance_to(position) < self.capture_radius
    }

    /// Capture every card of `active_route` within range of `position`.
    ///
    /// Captured cards leave `markers` before this returns and are counted
    /// exactly once. Returned in their original order.
    pub fn collect(
        &self,
        position: Vec3,
        active_route: usize,
        markers: &mut Vec<Marker>,
        counts: &mut CardCounts,
    ) -> Vec<Marker> {
        let mut captured = Vec::new();
        let mut kept = Vec::with_capacity(markers.len());
        for marker in markers.drain(..) {
            if marker.route == active_route && self.in_range(&marker, position) {
                counts.record(marker.kind);
                captured.push(marker);
            } else {
                kept.push(marker);
            }
        }
        *markers = kept;
        captured
    }
}

/// Remove a card by id; removing an absent card is a no-op
pub fn remove_marker(markers: &mut Vec<Marker>, id: MarkerId) -> Option<Marker> {
    let index = markers.iter().position(|m| m.id == id)?;
    Some(markers.remove(index))
}
