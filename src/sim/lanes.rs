//! Lane factory
//!
//! Builds a single lane: its kind, speed and direction, the obstacles it
//! starts with, and possibly a coin. All randomness comes from the session
//! RNG so generation is reproducible from the seed.

use rand::Rng;

use super::state::{CarVariant, Coin, EntityIds, GameState, Lane, LaneKind, Obstacle, ObstacleKind, RailSignal};
use crate::consts::*;
use crate::tuning::{LaneWeights, Tuning};

/// Kind shared by the two most recently generated lanes, if they match
pub fn repeated_kind(lanes: &[Lane]) -> Option<LaneKind> {
    match lanes {
        [.., a, b] if a.kind == b.kind => Some(b.kind),
        _ => None,
    }
}

/// Weighted lane kind pick. A kind that just appeared twice in a row has its
/// weight halved so long runs of one terrain become rarer.
pub fn choose_lane_kind<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &LaneWeights,
    repeated: Option<LaneKind>,
) -> LaneKind {
    let table = weights.as_table().map(|(kind, weight)| {
        if Some(kind) == repeated {
            (kind, weight / 2)
        } else {
            (kind, weight)
        }
    });

    let total: u32 = table.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return LaneKind::Grass;
    }

    let roll = rng.random_range(1..=total);
    let mut cumulative = 0;
    for (kind, weight) in table {
        cumulative += weight;
        if roll <= cumulative {
            return kind;
        }
    }
    LaneKind::Grass
}

/// Speed for a new lane, scaled by the current difficulty
pub fn lane_speed<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, kind: LaneKind, difficulty: f32) -> f32 {
    let base = tuning.base_speed * difficulty;
    match kind {
        LaneKind::Grass => 0.0,
        LaneKind::Road => base * sample_range(rng, tuning.road_speed_range),
        LaneKind::Water => base * sample_range(rng, tuning.water_speed_range),
        LaneKind::Rail => base * RAIL_SPEED_FACTOR,
    }
}

fn sample_range<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

/// Evenly spaced cars with jitter. One width per lane, random paint per car.
pub fn seed_cars<R: Rng + ?Sized>(rng: &mut R, viewport_width: f32, ids: &mut EntityIds) -> Vec<Obstacle> {
    let count = rng.random_range(CARS_PER_LANE.0..=CARS_PER_LANE.1);
    let width = CAR_WIDTHS[rng.random_range(0..CAR_WIDTHS.len())];
    let spacing = viewport_width as i32 / count as i32;

    (0..count as i32)
        .map(|i| {
            let x = i * spacing + rng.random_range(-CAR_JITTER..=CAR_JITTER);
            let variant = CarVariant::ALL[rng.random_range(0..CarVariant::ALL.len())];
            Obstacle {
                id: ids.next_id(),
                kind: ObstacleKind::Car { variant },
                x: x as f32,
                width,
                height: CAR_HEIGHT,
            }
        })
        .collect()
}

/// Logs spread a little wider than cars so gaps are jumpable but not trivial
pub fn seed_logs<R: Rng + ?Sized>(rng: &mut R, viewport_width: f32, ids: &mut EntityIds) -> Vec<Obstacle> {
    let count = rng.random_range(LOGS_PER_LANE.0..=LOGS_PER_LANE.1);
    let width = LOG_WIDTHS[rng.random_range(0..LOG_WIDTHS.len())];
    let spacing = viewport_width as i32 / count as i32 + LOG_EXTRA_SPACING;

    (0..count as i32)
        .map(|i| {
            let x = i * spacing + rng.random_range(-LOG_JITTER..=LOG_JITTER);
            Obstacle {
                id: ids.next_id(),
                kind: ObstacleKind::Log,
                x: x as f32,
                width,
                height: LOG_HEIGHT,
            }
        })
        .collect()
}

/// Trees placed by rejection sampling: each tree gets a fixed number of
/// attempts and is dropped when none of them lands in a free spot. On the
/// starting lanes the player's spawn column is kept clear.
pub fn seed_trees<R: Rng + ?Sized>(
    rng: &mut R,
    viewport_width: f32,
    spawn_x: f32,
    is_initial: bool,
    ids: &mut EntityIds,
) -> Vec<Obstacle> {
    let count = rng.random_range(TREES_PER_LANE.0..=TREES_PER_LANE.1);
    let max_x = (viewport_width as i32 - TREE_EDGE_MARGIN).max(TREE_EDGE_MARGIN);
    let mut trees: Vec<Obstacle> = Vec::with_capacity(count as usize);

    for _ in 0..count {
        for _ in 0..TREE_PLACEMENT_ATTEMPTS {
            let x = rng.random_range(TREE_EDGE_MARGIN..=max_x) as f32;
            let crowded = trees.iter().any(|t| (t.x - x).abs() < TREE_MIN_SPACING);
            let blocks_spawn = is_initial && (x - spawn_x).abs() < TREE_SPAWN_CLEARANCE;
            if !crowded && !blocks_spawn {
                trees.push(Obstacle {
                    id: ids.next_id(),
                    kind: ObstacleKind::Tree,
                    x,
                    width: TREE_WIDTH,
                    height: TREE_HEIGHT,
                });
                break;
            }
        }
    }

    trees
}

/// Roll for a coin on a freshly built lane.
///
/// Water lanes never get one, and grass lanes skip it when the spot is too
/// close to a tree.
pub fn seed_coin<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    lane: &Lane,
    ids: &mut EntityIds,
) -> Option<Coin> {
    if rng.random::<f64>() >= tuning.coin_chance {
        return None;
    }
    if lane.kind == LaneKind::Water {
        return None;
    }

    let max_x = (tuning.viewport_width as i32 - COIN_EDGE_MARGIN).max(COIN_EDGE_MARGIN);
    let x = rng.random_range(COIN_EDGE_MARGIN..=max_x) as f32;

    if lane.kind == LaneKind::Grass
        && lane
            .obstacles
            .iter()
            .any(|o| o.kind.is_tree() && (o.x - x).abs() < COIN_TREE_CLEARANCE)
    {
        return None;
    }

    Some(Coin {
        id: ids.next_id(),
        x,
        y: lane.y + (tuning.lane_height / 2.0).floor(),
        origin_lane_y: lane.y,
        collected: false,
    })
}

impl GameState {
    /// Build a lane with its top edge at `y` and append it to the world.
    ///
    /// `forced` skips the weighted kind pick. Initial lanes keep the spawn
    /// point clear of trees and never carry coins.
    pub fn create_lane(&mut self, y: f32, forced: Option<LaneKind>, is_initial: bool) {
        let kind = match forced {
            Some(kind) => kind,
            None => choose_lane_kind(&mut self.rng, &self.tuning.lane_weights, repeated_kind(&self.lanes)),
        };

        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let speed = lane_speed(&mut self.rng, &self.tuning, kind, self.difficulty);

        let width = self.tuning.viewport_width;
        let obstacles = match kind {
            LaneKind::Road => seed_cars(&mut self.rng, width, &mut self.ids),
            LaneKind::Water => seed_logs(&mut self.rng, width, &mut self.ids),
            LaneKind::Grass => {
                let (spawn_x, _) = self.tuning.spawn_point();
                seed_trees(&mut self.rng, width, spawn_x, is_initial, &mut self.ids)
            }
            // Trains are spawned by the rail signal
            LaneKind::Rail => Vec::new(),
        };

        let lane = Lane {
            kind,
            y,
            direction,
            speed,
            obstacles,
            rail: RailSignal::Idle,
        };

        if !is_initial {
            if let Some(coin) = seed_coin(&mut self.rng, &self.tuning, &lane, &mut self.ids) {
                self.coins.push(coin);
            }
        }

        log::debug!(
            "Lane {:?} at y={} speed={:.2} dir={} obstacles={}",
            lane.kind,
            lane.y,
            lane.speed,
            lane.direction,
            lane.obstacles.len()
        );
        self.lanes.push(lane);
    }
}
