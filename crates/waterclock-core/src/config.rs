//! Engine tunables.

use serde::{Deserialize, Serialize};

/// Timing and probability knobs for the automaton.
///
/// The defaults are the values the clock is tuned for; the configuration
/// file may override individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frames a drain stays open before the slot reseals, before the
    /// per-digit extension is applied.
    pub opening_period: u32,
    /// Phase count of the lateral migration schedule.
    pub move_period: usize,
    /// Phase count of the clustering swap schedule.
    pub cluster_period: usize,
    /// How many times each phase appears in one refill of a pick queue.
    pub pick_multiplicity: usize,
    /// Length of one injection window in frames.
    pub drop_interval: u64,
    /// Droplets injected at the start of each window.
    pub drop_size: u64,
    /// Probability that a heavy droplet is kept from rising past a lighter one.
    pub rare_rise_veto: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opening_period: 30,
            move_period: 4,
            cluster_period: 120,
            pick_multiplicity: 5,
            drop_interval: 28,
            drop_size: 2,
            rare_rise_veto: 0.9,
        }
    }
}
