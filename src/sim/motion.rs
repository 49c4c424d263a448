//! Obstacle motion and rail crossings
//!
//! Cars and logs loop around the screen forever. Rail lanes run a small
//! signal state machine: idle, then a warning countdown, then one train that
//! crosses and is removed.

use rand::Rng;

use super::state::{GameEvent, GameState, Lane, LaneKind, Obstacle, ObstacleKind, RailSignal};
use crate::consts::*;
use crate::tuning::Tuning;

/// Move every wrapping obstacle on a road or water lane by one tick
pub fn advance_wrapping(lane: &mut Lane, viewport_width: f32) {
    let velocity = lane.velocity();
    let direction = lane.direction;
    for obstacle in &mut lane.obstacles {
        obstacle.x += velocity;
        if direction > 0.0 && obstacle.x > viewport_width + obstacle.width {
            obstacle.x = -obstacle.width;
        } else if direction < 0.0 && obstacle.x < -obstacle.width {
            obstacle.x = viewport_width + obstacle.width;
        }
    }
}

/// Where a train enters for a lane direction
pub fn train_entry_x(direction: f32, viewport_width: f32) -> f32 {
    if direction > 0.0 {
        -TRAIN_ENTRY_OFFSET
    } else {
        viewport_width + TRAIN_ENTRY_OFFSET
    }
}

/// Whether a train has fully left the screen on its way out
pub fn train_has_left(x: f32, direction: f32, viewport_width: f32) -> bool {
    if direction > 0.0 {
        x > viewport_width + TRAIN_EXIT_MARGIN_FORWARD
    } else {
        x < -TRAIN_EXIT_MARGIN_BACKWARD
    }
}

/// What happened on a rail lane this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailChange {
    None,
    WarningStarted,
    TrainSpawned,
    TrainDeparted,
}

/// Advance one rail lane's signal by a tick.
///
/// The warning starts on the idle roll and counts down from the next call,
/// so the train appears `train_warning_ticks` calls after the warning began
/// (one call later than counting the starting tick). It is placed at the
/// entry point and first moves on the following call.
///
/// `train_id` is only consumed when a train actually spawns.
pub fn advance_rail<R: Rng + ?Sized>(
    lane: &mut Lane,
    rng: &mut R,
    tuning: &Tuning,
    train_id: impl FnOnce() -> u32,
) -> RailChange {
    match lane.rail {
        RailSignal::Idle => {
            if rng.random::<f64>() < tuning.train_chance {
                lane.rail = RailSignal::Warning {
                    ticks_left: tuning.train_warning_ticks as i32,
                };
                RailChange::WarningStarted
            } else {
                RailChange::None
            }
        }
        RailSignal::Warning { ticks_left } => {
            let ticks_left = ticks_left - 1;
            if ticks_left > 0 {
                lane.rail = RailSignal::Warning { ticks_left };
                return RailChange::None;
            }
            lane.obstacles.push(Obstacle {
                id: train_id(),
                kind: ObstacleKind::Train,
                x: train_entry_x(lane.direction, tuning.viewport_width),
                width: TRAIN_WIDTH,
                height: TRAIN_HEIGHT,
            });
            lane.rail = RailSignal::TrainActive;
            RailChange::TrainSpawned
        }
        RailSignal::TrainActive => {
            let velocity = lane.velocity();
            let direction = lane.direction;
            let width = tuning.viewport_width;
            for train in lane.obstacles.iter_mut().filter(|o| o.kind == ObstacleKind::Train) {
                train.x += velocity;
            }
            lane.obstacles
                .retain(|o| o.kind != ObstacleKind::Train || !train_has_left(o.x, direction, width));
            if !lane.obstacles.iter().any(|o| o.kind == ObstacleKind::Train) {
                lane.rail = RailSignal::Idle;
                RailChange::TrainDeparted
            } else {
                RailChange::None
            }
        }
    }
}

impl GameState {
    /// Advance every lane's obstacles by one tick
    pub fn advance_lanes(&mut self) {
        let width = self.tuning.viewport_width;
        for lane in &mut self.lanes {
            if lane.kind.scrolls_obstacles() {
                advance_wrapping(lane, width);
                continue;
            }
            if lane.kind != LaneKind::Rail {
                continue;
            }

            let ids = &mut self.ids;
            match advance_rail(lane, &mut self.rng, &self.tuning, || ids.next_id()) {
                RailChange::WarningStarted => {
                    self.events.push(GameEvent::TrainWarning { lane_y: lane.y });
                }
                RailChange::TrainSpawned => {
                    log::debug!("Train spawned on rail lane at y={}", lane.y);
                    self.events.push(GameEvent::TrainSpawned { lane_y: lane.y });
                }
                RailChange::TrainDeparted | RailChange::None => {}
            }
        }
    }
}
