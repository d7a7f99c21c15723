//! Collectible cards placed along the routes

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::curve::CurveSet;

/// Stable card identifier (monotonic per session)
pub type MarkerId = u32;

/// Card colour; red is the severe infraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Yellow,
    Red,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Yellow => "yellow",
            CardKind::Red => "red",
        }
    }

    /// Texture the renderer should try first
    pub fn texture_name(&self) -> &'static str {
        match self {
            CardKind::Yellow => "textures/yellow_card.jpg",
            CardKind::Red => "textures/red_card.jpg",
        }
    }

    /// Flat colour used when the texture is unavailable
    pub fn fallback_rgb(&self) -> [f32; 3] {
        match self {
            CardKind::Yellow => [1.0, 0.85, 0.1],
            CardKind::Red => [0.85, 0.1, 0.1],
        }
    }

    /// Everything a renderer needs to draw this kind of card
    pub fn look(&self) -> CardLook {
        CardLook {
            texture: self.texture_name(),
            fallback_rgb: self.fallback_rgb(),
            size: CARD_SIZE,
        }
    }

    /// Unweighted coin flip
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            CardKind::Yellow
        } else {
            CardKind::Red
        }
    }
}

/// A live card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub kind: CardKind,
    /// Route the card belongs to
    pub route: usize,
    /// Progress along the route where it was placed
    pub t_spawn: f32,
    /// World position (fixed at spawn)
    pub position: Vec3,
}

impl Marker {
    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

/// Card dimensions (width, height, depth) for the renderer
pub const CARD_SIZE: Vec3 = Vec3::new(4.0, 6.0, 0.1);

/// Texture, placeholder colour and box size of a card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardLook {
    pub texture: &'static str,
    /// Used when the texture fails to load
    pub fallback_rgb: [f32; 3],
    pub size: Vec3,
}

/// Where and how many cards to drop on each route
#[derive(Debug, Clone, Copy)]
pub struct SpawnPlan {
    pub per_route: usize,
    pub t_min: f32,
    pub t_max: f32,
}

/// Place `per_route` cards on every route at random progress values.
///
/// `next_id` is advanced for each card; routes are filled in order so a
/// fixed seed always yields the same layout.
pub fn spawn_markers<R: Rng + ?Sized>(
    curves: &CurveSet,
    plan: SpawnPlan,
    rng: &mut R,
    next_id: &mut MarkerId,
) -> Vec<Marker> {
    let mut markers = Vec::with_capacity(curves.len() * plan.per_route);
    for route in 0..curves.len() {
        for _ in 0..plan.per_route {
            let t_spawn = rng.random_range(plan.t_min..plan.t_max);
            let kind = CardKind::random(rng);
            let id = *next_id;
            *next_id += 1;
            markers.push(Marker {
                id,
                kind,
                route,
                t_spawn,
                position: curves.evaluate(route, t_spawn),
            });
        }
    }
    markers
}
