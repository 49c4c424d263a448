//! Data-driven game balance
//!
//! Every number that shapes how a run feels lives here so it can be
//! overridden from JSON. Missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::sim::LaneKind;

/// Base sampling weights for each lane kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneWeights {
    pub grass: u32,
    pub road: u32,
    pub water: u32,
    pub rail: u32,
}

impl Default for LaneWeights {
    fn default() -> Self {
        Self {
            grass: 25,
            road: 45,
            water: 20,
            rail: 10,
        }
    }
}

impl LaneWeights {
    /// Weights in sampling order
    pub fn as_table(&self) -> [(LaneKind, u32); 4] {
        [
            (LaneKind::Grass, self.grass),
            (LaneKind::Road, self.road),
            (LaneKind::Water, self.water),
            (LaneKind::Rail, self.rail),
        ]
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub lane_height: f32,

    // === Player ===
    /// Distance covered by one hop
    pub grid_size: f32,
    /// Side of the player's square collision box
    pub player_size: f32,
    /// Per-axis distance covered each tick while hopping
    pub hop_step: f32,
    /// Peak of the hop arc
    pub hop_peak: f32,
    /// Scrolling keeps the player at this fraction of the viewport height
    pub scroll_anchor: f32,

    // === Speed & difficulty ===
    pub base_speed: f32,
    pub road_speed_range: (f32, f32),
    pub water_speed_range: (f32, f32),
    /// Difficulty gained per 100 points
    pub difficulty_per_hundred: f32,
    pub max_difficulty: f32,

    // === Generation ===
    pub lane_weights: LaneWeights,
    /// Chance that a lane carries a coin
    pub coin_chance: f64,

    // === Trains ===
    /// Per-tick chance an idle rail lane starts its warning
    pub train_chance: f64,
    pub train_warning_ticks: u32,

    // === Timing ===
    pub ticks_per_second: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: 400.0,
            viewport_height: 600.0,
            lane_height: 50.0,

            grid_size: 50.0,
            player_size: 40.0,
            hop_step: 8.0,
            hop_peak: 20.0,
            scroll_anchor: 0.65,

            base_speed: 2.0,
            road_speed_range: (1.0, 2.5),
            water_speed_range: (0.8, 1.5),
            difficulty_per_hundred: 0.5,
            max_difficulty: 3.0,

            lane_weights: LaneWeights::default(),
            coin_chance: 0.15,

            train_chance: 0.005,
            train_warning_ticks: 60,

            ticks_per_second: 30,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Unusable values fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Replace values the simulation cannot run with by their defaults.
    ///
    /// Geometry and step sizes must be positive and finite, otherwise world
    /// generation never reaches the top of the screen or a hop never lands.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        for (name, value, fallback) in [
            ("viewport_width", &mut self.viewport_width, defaults.viewport_width),
            ("viewport_height", &mut self.viewport_height, defaults.viewport_height),
            ("lane_height", &mut self.lane_height, defaults.lane_height),
            ("grid_size", &mut self.grid_size, defaults.grid_size),
            ("player_size", &mut self.player_size, defaults.player_size),
            ("hop_step", &mut self.hop_step, defaults.hop_step),
            ("base_speed", &mut self.base_speed, defaults.base_speed),
        ] {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("Tuning {name}={value} is unusable, using {fallback}");
                *value = fallback;
            }
        }

        if !(self.hop_peak.is_finite() && self.hop_peak >= 0.0) {
            log::warn!("Tuning hop_peak={} is unusable, using {}", self.hop_peak, defaults.hop_peak);
            self.hop_peak = defaults.hop_peak;
        }
        if !(0.0..=1.0).contains(&self.scroll_anchor) {
            log::warn!("Tuning scroll_anchor={} out of range, using {}", self.scroll_anchor, defaults.scroll_anchor);
            self.scroll_anchor = defaults.scroll_anchor;
        }

        // Moving lanes must never stand still
        for (name, range, fallback) in [
            ("road_speed_range", &mut self.road_speed_range, defaults.road_speed_range),
            ("water_speed_range", &mut self.water_speed_range, defaults.water_speed_range),
        ] {
            let (lo, hi) = *range;
            if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && hi >= lo) {
                log::warn!("Tuning {name}=({lo}, {hi}) is unusable, using {fallback:?}");
                *range = fallback;
            }
        }

        if self.ticks_per_second == 0 {
            log::warn!("Tuning ticks_per_second=0, using {}", defaults.ticks_per_second);
            self.ticks_per_second = defaults.ticks_per_second;
        }

        self
    }

    /// Screen y the scroller pins the player to
    pub fn scroll_target_y(&self) -> f32 {
        self.viewport_height * self.scroll_anchor
    }

    /// Player spawn point: horizontally centered, in the middle of the second lane from the bottom
    pub fn spawn_point(&self) -> (f32, f32) {
        let x = (self.viewport_width / 2.0).floor();
        let y = self.viewport_height - self.lane_height * 2.0 + (self.lane_height / 2.0).floor();
        (x, y)
    }

    /// Simulated seconds covered by a number of ticks
    pub fn ticks_to_seconds(&self, ticks: u64) -> f32 {
        ticks as f32 / self.ticks_per_second.max(1) as f32
    }

    /// Difficulty multiplier for a score: a continuous ramp capped at `max_difficulty`
    pub fn difficulty_for_score(&self, score: u32) -> f32 {
        let ramp = 1.0 + (score as f32 / 100.0) * self.difficulty_per_hundred;
        ramp.clamp(1.0, self.max_difficulty.max(1.0))
    }
}
