//! Card counters and the fair-play score

use std::fmt;

use serde::{Deserialize, Serialize};

use super::marker::CardKind;

/// Cards collected during the current lap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCounts {
    pub yellow: u32,
    pub red: u32,
}

impl CardCounts {
    pub fn record(&mut self, kind: CardKind) {
        match kind {
            CardKind::Yellow => self.yellow = self.yellow.saturating_add(1),
            CardKind::Red => self.red = self.red.saturating_add(1),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total(&self) -> u32 {
        self.yellow.saturating_add(self.red)
    }
}

/// Fair-play score: 100 halves for every ten yellow-equivalents.
///
/// A red card weighs as much as ten yellows.
pub fn fair_play_score(counts: CardCounts) -> f64 {
    let penalty = counts.yellow as f64 + 10.0 * counts.red as f64;
    100.0 * (-penalty / 10.0).exp2()
}

/// Result of a completed lap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapReport {
    /// Route the lap finished on
    pub route: usize,
    pub counts: CardCounts,
    pub score: f64,
}

impl LapReport {
    pub fn new(route: usize, counts: CardCounts) -> Self {
        Self {
            route,
            counts,
            score: fair_play_score(counts),
        }
    }
}

impl fmt::Display for LapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Curve completed. Fair Play score: {:.2}. Yellow cards collected: {}, Red cards collected: {}",
            self.score, self.counts.yellow, self.counts.red
        )
    }
}
