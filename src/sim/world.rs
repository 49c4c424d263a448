//! World management: bootstrapping, frontier extension, retirement, scrolling
//!
//! Lanes are stored in generation order. Screen y grows toward the bottom of
//! the viewport, so new lanes are created at ever smaller y and scrolling
//! pushes everything back down.

use super::state::{GameState, Lane, LaneKind};
use crate::consts::COIN_RETIRE_MARGIN;

impl GameState {
    /// Fill the viewport for a fresh run. The two bottom lanes are always
    /// grass so the player starts somewhere safe.
    pub fn generate_initial_lanes(&mut self) {
        let height = self.tuning.viewport_height;
        let lane_height = self.tuning.lane_height;

        for i in 0..2 {
            let y = height - lane_height * (i + 1) as f32;
            self.create_lane(y, Some(LaneKind::Grass), true);
        }

        let mut y = height - lane_height * 3.0;
        while y > -lane_height {
            self.create_lane(y, None, false);
            y -= lane_height;
        }
    }

    /// Screen y of the topmost lane
    pub fn frontier_y(&self) -> Option<f32> {
        self.lanes.iter().map(|l| l.y).reduce(f32::min)
    }

    /// Generate lanes above the frontier until it sits one lane above the viewport
    pub fn extend_frontier(&mut self) {
        let Some(mut top) = self.frontier_y() else {
            return;
        };
        let lane_height = self.tuning.lane_height;
        while top > -lane_height {
            top -= lane_height;
            self.create_lane(top, None, false);
        }
    }

    /// Drop lanes and coins that have scrolled past the bottom, and coins
    /// already picked up. Safe to call repeatedly.
    pub fn retire_offscreen(&mut self) {
        let lane_limit = self.tuning.viewport_height + self.tuning.lane_height;
        self.lanes.retain(|lane| lane.y < lane_limit);
        self.retire_coins();
    }

    /// Coin half of `retire_offscreen`
    pub fn retire_coins(&mut self) {
        let coin_limit = self.tuning.viewport_height + COIN_RETIRE_MARGIN;
        self.coins.retain(|coin| coin.y < coin_limit && !coin.collected);
    }

    /// Keep the player pinned at the scroll anchor once they climb past it.
    ///
    /// Returns the distance scrolled (0 when nothing moved).
    pub fn scroll(&mut self) -> f32 {
        let target = self.tuning.scroll_target_y();
        if self.player.hopping || self.player.pos.y >= target {
            return 0.0;
        }
        let amount = target - self.player.pos.y;
        self.scroll_by(amount);
        amount
    }

    /// Translate the whole world (lanes, coins, player) down by `amount`
    pub fn scroll_by(&mut self, amount: f32) {
        for lane in &mut self.lanes {
            lane.y += amount;
        }
        for coin in &mut self.coins {
            coin.y += amount;
            coin.origin_lane_y += amount;
        }
        self.player.pos.y += amount;
        self.player.target.y += amount;
        self.scroll_offset += amount;
    }

    /// The lane covering screen y, if any
    pub fn lane_at(&self, y: f32) -> Option<&Lane> {
        self.lane_index_at(y).map(|i| &self.lanes[i])
    }

    /// Index of the lane covering screen y
    pub fn lane_index_at(&self, y: f32) -> Option<usize> {
        let lane_height = self.tuning.lane_height;
        self.lanes.iter().position(|l| l.y <= y && y <= l.y + lane_height)
    }
}
