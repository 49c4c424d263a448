//! Per-frame snapshot for renderers
//!
//! `RenderFrame` is everything a renderer needs to draw one frame, computed
//! from the game state without touching it. Draw order is back to front:
//! lanes by ascending y, then coins, then the player.

use glam::Vec2;
use serde::Serialize;

use crate::sim::geometry::Aabb;
use crate::sim::state::{CarVariant, GamePhase, GameState, Lane, LaneKind, ObstacleKind};

/// Amplitude of the coin bob, in pixels
const COIN_BOB_AMPLITUDE: f32 = 4.0;
/// How strongly a coin's x offsets its bob phase
const COIN_BOB_SPREAD: f32 = 0.05;
/// Warning lights toggle every this many ticks
const WARNING_FLASH_TICKS: i32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleSprite {
    pub kind: ObstacleKind,
    /// Horizontal center
    pub x: f32,
    /// Top edge, centered inside the lane
    pub top: f32,
    pub width: f32,
    pub height: f32,
    /// Paint job, cars only
    pub variant: Option<CarVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneSprite {
    pub kind: LaneKind,
    pub y: f32,
    pub direction: f32,
    /// Ripple phase for water, signed by flow direction (0 elsewhere)
    pub visual_phase: f32,
    /// Crossing lights: `None` when dark, `Some(lit)` while flashing
    pub warning_light: Option<bool>,
    pub obstacles: Vec<ObstacleSprite>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinSprite {
    pub x: f32,
    pub y: f32,
    /// Vertical draw offset; collisions ignore it
    pub bob: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSprite {
    pub pos: Vec2,
    pub facing: f32,
    pub hop_height: f32,
    /// Shadow shrinks as the player rises
    pub shadow_scale: f32,
    pub riding: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub coins: u32,
    pub phase: GamePhase,
    /// This run set the session best
    pub new_best: bool,
}

/// Snapshot of one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub lanes: Vec<LaneSprite>,
    pub coins: Vec<CoinSprite>,
    pub player: PlayerSprite,
    pub hud: Hud,
}

impl RenderFrame {
    pub fn capture(state: &GameState) -> Self {
        let mut lanes: Vec<LaneSprite> = state
            .lanes
            .iter()
            .map(|lane| lane_sprite(lane, state))
            .collect();
        lanes.sort_by(|a, b| a.y.total_cmp(&b.y));

        let coins = state
            .coins
            .iter()
            .filter(|c| !c.collected)
            .map(|c| CoinSprite {
                x: c.x,
                y: c.y,
                bob: (state.coin_phase + c.x * COIN_BOB_SPREAD).sin() * COIN_BOB_AMPLITUDE,
            })
            .collect();

        let player = &state.player;
        // Half size at the top of the arc
        let shadow_span = (state.tuning.hop_peak * 2.0).max(f32::EPSILON);
        let player = PlayerSprite {
            pos: player.pos,
            facing: player.facing,
            hop_height: player.hop_height,
            shadow_scale: 1.0 - player.hop_height / shadow_span,
            riding: player.riding.is_some(),
        };

        let hud = Hud {
            score: state.score,
            high_score: state.high_score,
            coins: state.coin_count,
            phase: state.phase,
            new_best: state.beat_best,
        };

        Self {
            lanes,
            coins,
            player,
            hud,
        }
    }
}

fn lane_sprite(lane: &Lane, state: &GameState) -> LaneSprite {
    let visual_phase = match lane.kind {
        LaneKind::Water => state.water_phase * lane.direction,
        _ => 0.0,
    };
    let warning_light = lane
        .train_warning_active()
        .then(|| (lane.train_warning_timer() / WARNING_FLASH_TICKS) % 2 == 0);

    let obstacles = lane
        .obstacles
        .iter()
        .map(|o| {
            let bounds = Aabb::for_obstacle(o, lane.y, state.tuning.lane_height);
            ObstacleSprite {
                kind: o.kind,
                x: o.x,
                top: bounds.min.y,
                width: o.width,
                height: o.height,
                variant: match o.kind {
                    ObstacleKind::Car { variant } => Some(variant),
                    _ => None,
                },
            }
        })
        .collect();

    LaneSprite {
        kind: lane.kind,
        y: lane.y,
        direction: lane.direction,
        visual_phase,
        warning_light,
        obstacles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Obstacle, RailSignal};

    fn lane(kind: LaneKind, y: f32) -> Lane {
        Lane {
            kind,
            y,
            direction: -1.0,
            speed: if kind == LaneKind::Grass { 0.0 } else { 2.0 },
            obstacles: Vec::new(),
            rail: RailSignal::Idle,
        }
    }

    #[test]
    fn test_lanes_sorted_back_to_front() {
        let mut state = GameState::new(5);
        state.lanes = vec![lane(LaneKind::Grass, 500.0), lane(LaneKind::Road, 100.0), lane(LaneKind::Water, 300.0)];
        let frame = RenderFrame::capture(&state);
        let ys: Vec<f32> = frame.lanes.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![100.0, 300.0, 500.0]);
    }

    #[test]
    fn test_obstacle_sprite_geometry() {
        let mut state = GameState::new(5);
        let mut road = lane(LaneKind::Road, 200.0);
        road.obstacles.push(Obstacle {
            id: 9,
            kind: ObstacleKind::Car {
                variant: CarVariant::Purple,
            },
            x: 120.0,
            width: 80.0,
            height: 35.0,
        });
        state.lanes = vec![road];
        let frame = RenderFrame::capture(&state);
        let car = &frame.lanes[0].obstacles[0];
        assert_eq!(car.top, 207.0);
        assert_eq!(car.variant, Some(CarVariant::Purple));
    }

    #[test]
    fn test_warning_light_flashes() {
        let mut state = GameState::new(5);
        let mut rail = lane(LaneKind::Rail, 0.0);
        rail.rail = RailSignal::Warning { ticks_left: 59 };
        state.lanes = vec![rail.clone()];
        // 59 / 4 = 14 -> even -> lit
        assert_eq!(RenderFrame::capture(&state).lanes[0].warning_light, Some(true));

        rail.rail = RailSignal::Warning { ticks_left: 55 };
        state.lanes = vec![rail.clone()];
        assert_eq!(RenderFrame::capture(&state).lanes[0].warning_light, Some(false));

        rail.rail = RailSignal::TrainActive;
        state.lanes = vec![rail];
        assert_eq!(RenderFrame::capture(&state).lanes[0].warning_light, None);
    }

    #[test]
    fn test_collected_coins_hidden() {
        let mut state = GameState::new(5);
        state.coins = vec![
            Coin {
                id: 1,
                x: 0.0,
                y: 100.0,
                origin_lane_y: 75.0,
                collected: false,
            },
            Coin {
                id: 2,
                x: 50.0,
                y: 100.0,
                origin_lane_y: 75.0,
                collected: true,
            },
        ];
        state.coin_phase = std::f32::consts::FRAC_PI_2;
        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.coins.len(), 1);
        assert!((frame.coins[0].bob - 4.0).abs() < 1e-5);
        // Bob is draw-only
        assert_eq!(frame.coins[0].y, 100.0);
    }

    #[test]
    fn test_player_shadow_and_hud() {
        let mut state = GameState::new(5);
        state.player.hop_height = 20.0;
        state.score = 3;
        state.high_score = 3;
        state.beat_best = true;
        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.player.shadow_scale, 0.5);
        assert!(!frame.player.riding);
        assert!(frame.hud.new_best);
        assert_eq!(frame.hud.phase, GamePhase::Playing);

        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"hud\""));
    }

    #[test]
    fn test_tying_an_earlier_best_is_not_a_new_best() {
        let mut state = GameState::new(5);
        state.high_score = 5;
        state.score = 4;
        state.sync_high_score();
        state.score = 5;
        state.sync_high_score();
        assert!(!RenderFrame::capture(&state).hud.new_best);

        state.score = 6;
        state.sync_high_score();
        assert!(RenderFrame::capture(&state).hud.new_best);
    }
}
