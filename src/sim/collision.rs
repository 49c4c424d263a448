//! Collision resolution, coin pickup and the movement gate
//!
//! Lethal checks are skipped while the player is in the air: a hop that has
//! started always gets to land.

use glam::Vec2;

use super::geometry::Aabb;
use super::state::{DeathCause, GameEvent, GameState, LaneKind};
use crate::consts::COIN_SIZE;

/// Outcome of the per-tick hazard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Safe,
    Lethal(DeathCause),
}

impl GameState {
    /// Inspect the lane under a grounded player for anything that kills them
    pub fn detect_hazard(&self) -> Hazard {
        if self.player.hopping {
            return Hazard::Safe;
        }
        let Some(lane) = self.lane_at(self.player.pos.y) else {
            return Hazard::Safe;
        };

        match lane.kind {
            LaneKind::Water if self.player.riding.is_none() => Hazard::Lethal(DeathCause::Drowned),
            LaneKind::Road | LaneKind::Rail => {
                let player_box = self.player.bounds(self.tuning.player_size);
                lane.obstacles
                    .iter()
                    .filter(|o| o.kind.is_lethal())
                    .find(|o| {
                        Aabb::for_obstacle(o, lane.y, self.tuning.lane_height).overlaps(&player_box)
                    })
                    .map_or(Hazard::Safe, |o| Hazard::Lethal(DeathCause::Hit(o.kind)))
            }
            _ => Hazard::Safe,
        }
    }

    /// Run the hazard check and end the run on a lethal result
    pub fn check_collisions(&mut self) {
        if let Hazard::Lethal(cause) = self.detect_hazard() {
            self.game_over(cause);
        }
    }

    /// Pick up every coin the player overlaps. Returns how many were collected.
    pub fn collect_coins(&mut self) -> u32 {
        let player_box = self.player.bounds(self.tuning.player_size);
        // Whole-pixel half extent
        let coin_size = Vec2::splat((COIN_SIZE / 2.0).floor() * 2.0);
        let mut picked = 0;
        for coin in self.coins.iter_mut().filter(|c| !c.collected) {
            let coin_box = Aabb::from_center(Vec2::new(coin.x, coin.y), coin_size);
            if player_box.overlaps(&coin_box) {
                coin.collected = true;
                picked += 1;
            }
        }
        for _ in 0..picked {
            self.coin_count += 1;
            self.events.push(GameEvent::CoinCollected {
                total: self.coin_count,
            });
        }
        picked
    }

    /// Whether the player may hop to (x, y). Only trees block movement.
    pub fn can_move_to(&self, x: f32, y: f32) -> bool {
        let Some(lane) = self.lane_at(y) else {
            return true;
        };
        if lane.kind != LaneKind::Grass {
            return true;
        }
        !lane
            .obstacles
            .iter()
            .filter(|o| o.kind.is_tree())
            .any(|tree| {
                let (left, right) = tree.span();
                left < x && x < right
            })
    }

    /// Recompute the speed multiplier for lanes generated from now on
    pub fn update_difficulty(&mut self) {
        self.difficulty = self.tuning.difficulty_for_score(self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CarVariant, Coin, GamePhase, Lane, Obstacle, ObstacleKind, Player, RailSignal};

    fn lane_with(kind: LaneKind, obstacles: Vec<Obstacle>) -> Lane {
        Lane {
            kind,
            y: 300.0,
            direction: 1.0,
            speed: if kind == LaneKind::Grass { 0.0 } else { 2.0 },
            obstacles,
            rail: RailSignal::Idle,
        }
    }

    fn obstacle(kind: ObstacleKind, x: f32, width: f32, height: f32) -> Obstacle {
        Obstacle {
            id: 77,
            kind,
            x,
            width,
            height,
        }
    }

    fn state_on(lane: Lane) -> GameState {
        let mut state = GameState::new(3);
        state.lanes = vec![lane];
        state.coins.clear();
        state.player = Player::new(200.0, 325.0);
        state
    }

    #[test]
    fn test_water_without_log_drowns() {
        let mut state = state_on(lane_with(LaneKind::Water, vec![]));
        state.check_collisions();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state
            .events
            .contains(&GameEvent::GameOver { cause: DeathCause::Drowned }));
    }

    #[test]
    fn test_riding_player_survives_water() {
        let mut state = state_on(lane_with(LaneKind::Water, vec![]));
        state.player.riding = Some(5);
        state.check_collisions();
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_car_hit_is_lethal() {
        let car = ObstacleKind::Car {
            variant: CarVariant::Blue,
        };
        let mut state = state_on(lane_with(LaneKind::Road, vec![obstacle(car, 240.0, 60.0, 35.0)]));
        assert_eq!(state.detect_hazard(), Hazard::Lethal(DeathCause::Hit(car)));
        state.check_collisions();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_car_just_out_of_reach_is_safe() {
        let car = ObstacleKind::Car {
            variant: CarVariant::Red,
        };
        // Car spans 250..310, player spans 180..220
        let state = state_on(lane_with(LaneKind::Road, vec![obstacle(car, 280.0, 60.0, 35.0)]));
        assert_eq!(state.detect_hazard(), Hazard::Safe);
    }

    #[test]
    fn test_train_hit_is_lethal() {
        let state = state_on(lane_with(
            LaneKind::Rail,
            vec![obstacle(ObstacleKind::Train, 100.0, 350.0, 45.0)],
        ));
        assert_eq!(
            state.detect_hazard(),
            Hazard::Lethal(DeathCause::Hit(ObstacleKind::Train))
        );
    }

    #[test]
    fn test_no_collisions_mid_hop() {
        let mut state = state_on(lane_with(LaneKind::Water, vec![]));
        state.player.hopping = true;
        state.check_collisions();
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_trees_block_but_never_kill() {
        let tree = obstacle(ObstacleKind::Tree, 200.0, 40.0, 45.0);
        let state = state_on(lane_with(LaneKind::Grass, vec![tree]));
        assert_eq!(state.detect_hazard(), Hazard::Safe);
        assert!(!state.can_move_to(200.0, 325.0));
        assert!(!state.can_move_to(219.0, 325.0));
        // Span edges are open
        assert!(state.can_move_to(220.0, 325.0));
        assert!(state.can_move_to(180.0, 325.0));
        // No lane at all never blocks
        assert!(state.can_move_to(200.0, -400.0));
    }

    #[test]
    fn test_only_grass_gates_movement() {
        let state = state_on(lane_with(
            LaneKind::Road,
            vec![obstacle(ObstacleKind::Tree, 200.0, 40.0, 45.0)],
        ));
        assert!(state.can_move_to(200.0, 325.0));
    }

    #[test]
    fn test_coin_collected_exactly_once() {
        let mut state = state_on(lane_with(LaneKind::Grass, vec![]));
        state.coins.push(Coin {
            id: 1,
            x: 215.0,
            y: 330.0,
            origin_lane_y: 300.0,
            collected: false,
        });
        state.coins.push(Coin {
            id: 2,
            x: 300.0,
            y: 330.0,
            origin_lane_y: 300.0,
            collected: false,
        });

        assert_eq!(state.collect_coins(), 1);
        assert_eq!(state.coin_count, 1);
        assert!(state.coins[0].collected);
        assert!(!state.coins[1].collected);

        assert_eq!(state.collect_coins(), 0);
        assert_eq!(state.coin_count, 1);
    }

    #[test]
    fn test_coin_box_uses_whole_pixels() {
        let mut state = state_on(lane_with(LaneKind::Grass, vec![]));
        // Player spans 180..220; a 12px half extent just touches at 220
        state.coins.push(Coin {
            id: 3,
            x: 232.0,
            y: 325.0,
            origin_lane_y: 300.0,
            collected: false,
        });
        assert_eq!(state.collect_coins(), 0);
        state.coins[0].x = 231.0;
        assert_eq!(state.collect_coins(), 1);
    }

    #[test]
    fn test_difficulty_follows_score() {
        let mut state = GameState::new(4);
        state.score = 60;
        state.update_difficulty();
        assert!((state.difficulty - 1.3).abs() < 1e-6);
        state.score = 900;
        state.update_difficulty();
        assert_eq!(state.difficulty, 3.0);
    }
}
