//! Player movement: grid hops, the hop arc, and riding logs

use glam::Vec2;

use super::geometry::Aabb;
use super::state::{DeathCause, GameState, LaneKind, Player};

/// Height of the hop arc at normalized progress `p`.
///
/// A parabola that is 0 at both ends and `peak` halfway through.
#[inline]
pub fn hop_arc_height(progress: f32, peak: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    peak * (1.0 - (2.0 * p - 1.0).powi(2))
}

/// Move `current` toward `target` by at most `step`, snapping once within reach
#[inline]
fn approach(current: f32, target: f32, step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() > step {
        current + step.copysign(delta)
    } else {
        target
    }
}

impl Player {
    /// Square collision box around the player's position
    pub fn bounds(&self, size: f32) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(size))
    }

    /// Start a hop toward `target`
    pub fn begin_hop(&mut self, target: Vec2) {
        self.target = target;
        self.hopping = true;
    }

    /// Advance an in-progress hop by one tick.
    ///
    /// Each axis closes in on the target independently. The arc height is
    /// derived from how much of one grid step is left.
    pub fn step_hop(&mut self, step: f32, grid_size: f32, peak: f32) {
        if !self.hopping {
            self.hop_height = 0.0;
            return;
        }

        self.pos.x = approach(self.pos.x, self.target.x, step);
        self.pos.y = approach(self.pos.y, self.target.y, step);

        if grid_size > 0.0 {
            let remaining = self.pos.distance(self.target);
            self.hop_height = hop_arc_height(1.0 - remaining / grid_size, peak);
        }

        if self.pos == self.target {
            self.hopping = false;
            self.hop_height = 0.0;
        }
    }
}

impl GameState {
    /// Advance the player's hop animation
    pub fn step_player_hop(&mut self) {
        let tuning = &self.tuning;
        self.player
            .step_hop(tuning.hop_step, tuning.grid_size, tuning.hop_peak);
    }

    /// Find the log under the player and drift with it.
    ///
    /// The ridden log is recomputed from scratch every tick. Drift only
    /// applies on the ground; a log carrying the player off either screen
    /// edge ends the run.
    pub fn update_log_ride(&mut self) {
        self.player.riding = None;

        let Some(lane) = self.lane_at(self.player.pos.y) else {
            return;
        };
        if lane.kind != LaneKind::Water {
            return;
        }

        let lane_height = self.tuning.lane_height;
        let player_box = self.player.bounds(self.tuning.player_size);
        let ridden = lane
            .obstacles
            .iter()
            .filter(|o| o.kind.is_log())
            .find(|o| Aabb::for_obstacle(o, lane.y, lane_height).overlaps(&player_box))
            .map(|o| o.id);
        let drift = lane.velocity();

        let Some(log_id) = ridden else {
            return;
        };
        self.player.riding = Some(log_id);

        if self.player.hopping {
            return;
        }
        self.player.pos.x += drift;
        self.player.target.x = self.player.pos.x;

        if self.player.pos.x < 0.0 || self.player.pos.x > self.tuning.viewport_width {
            self.game_over(DeathCause::SweptAway);
        }
    }
}
