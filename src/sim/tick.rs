//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Start a new run (only honored after a game over)
    Restart,
}

impl Intent {
    /// Grid offset for movement intents
    pub fn grid_offset(&self) -> Option<Vec2> {
        match self {
            Intent::MoveUp => Some(Vec2::new(0.0, -1.0)),
            Intent::MoveDown => Some(Vec2::new(0.0, 1.0)),
            Intent::MoveLeft => Some(Vec2::new(-1.0, 0.0)),
            Intent::MoveRight => Some(Vec2::new(1.0, 0.0)),
            Intent::Restart => None,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Intent latched since the previous tick
    pub intent: Option<Intent>,
}

impl TickInput {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
        }
    }
}

/// Result of handing an intent to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Dropped without any state change
    Ignored,
    /// A hop started
    Hopped { scored: bool },
    /// A new run began
    Restarted,
}

impl GameState {
    /// Cell a movement intent would hop to, clamped to the viewport.
    ///
    /// `None` when the intent is not a move, the clamped cell is the current
    /// one, or a tree blocks it.
    pub fn hop_target(&self, intent: Intent) -> Option<Vec2> {
        let offset = intent.grid_offset()?;
        let tuning = &self.tuning;
        let half = tuning.player_size / 2.0;
        let requested = self.player.pos + offset * tuning.grid_size;
        let target = Vec2::new(
            requested.x.clamp(half, (tuning.viewport_width - half).max(half)),
            requested.y.clamp(half, (tuning.viewport_height - half).max(half)),
        );

        if target == self.player.pos || !self.can_move_to(target.x, target.y) {
            return None;
        }
        Some(target)
    }

    /// Apply a player intent.
    ///
    /// Movement is ignored mid-hop, after a game over, when the clamped target
    /// is the current cell, or when a tree stands in the way. An accepted
    /// upward hop scores immediately if it reaches a new furthest point.
    pub fn apply_intent(&mut self, intent: Intent) -> IntentOutcome {
        if self.phase == GamePhase::GameOver {
            if intent == Intent::Restart {
                self.reset();
                return IntentOutcome::Restarted;
            }
            return IntentOutcome::Ignored;
        }

        if intent.grid_offset().is_none() || self.player.hopping {
            return IntentOutcome::Ignored;
        }

        match intent {
            Intent::MoveLeft => self.player.facing = -1.0,
            Intent::MoveRight => self.player.facing = 1.0,
            _ => {}
        }

        let Some(target) = self.hop_target(intent) else {
            return IntentOutcome::Ignored;
        };

        let mut scored = false;
        if intent == Intent::MoveUp {
            let world_y = target.y - self.scroll_offset;
            if world_y < self.furthest_progress_y {
                self.furthest_progress_y = world_y;
                self.score += 1;
                self.events.push(GameEvent::Scored { score: self.score });
                self.sync_high_score();
                scored = true;
            }
        }

        self.player.begin_hop(target);
        IntentOutcome::Hopped { scored }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if let Some(intent) = input.intent {
        state.apply_intent(intent);
    }

    // Frozen after a game over; the last frame keeps rendering
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Animation phases for the renderer
    state.water_phase += crate::consts::WATER_PHASE_STEP;
    state.coin_phase += crate::consts::COIN_PHASE_STEP;

    state.step_player_hop();
    state.advance_lanes();

    state.update_log_ride();
    if !state.is_playing() {
        return;
    }

    state.check_collisions();
    if !state.is_playing() {
        return;
    }

    state.collect_coins();
    state.scroll();
    state.extend_frontier();
    state.retire_offscreen();
    state.update_difficulty();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{DeathCause, Lane, LaneKind, Obstacle, ObstacleKind, RailSignal};
    use crate::tuning::Tuning;

    /// A calm world: grass only, with the starting lanes cleared of trees
    fn calm_state(seed: u64) -> GameState {
        let tuning = Tuning {
            lane_weights: crate::tuning::LaneWeights {
                grass: 1,
                road: 0,
                water: 0,
                rail: 0,
            },
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(seed, tuning);
        for lane in &mut state.lanes {
            lane.obstacles.clear();
        }
        state
    }

    fn run_until_landed(state: &mut GameState) {
        for _ in 0..20 {
            if !state.player.hopping {
                break;
            }
            tick(state, &TickInput::default());
        }
    }

    #[test]
    fn test_up_scores_on_acceptance() {
        let mut state = calm_state(1);
        let start = state.furthest_progress_y;

        tick(&mut state, &TickInput::new(Intent::MoveUp));
        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 1);
        assert!(state.player.hopping);
        assert_eq!(state.furthest_progress_y, start - 50.0);
        assert!(state.events.contains(&GameEvent::Scored { score: 1 }));

        run_until_landed(&mut state);
        assert_eq!(state.player.pos.y, 475.0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_input_dropped_mid_hop() {
        let mut state = calm_state(2);
        tick(&mut state, &TickInput::new(Intent::MoveUp));
        let target = state.player.target;
        tick(&mut state, &TickInput::new(Intent::MoveLeft));
        assert_eq!(state.player.target, target);
        assert_eq!(state.player.facing, 1.0);
    }

    #[test]
    fn test_back_and_forth_does_not_farm_points() {
        let mut state = calm_state(3);
        for intent in [Intent::MoveUp, Intent::MoveDown, Intent::MoveUp, Intent::MoveUp] {
            tick(&mut state, &TickInput::new(intent));
            run_until_landed(&mut state);
        }
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_scrolling_preserves_world_progress() {
        let mut state = calm_state(4);
        for _ in 0..10 {
            tick(&mut state, &TickInput::new(Intent::MoveUp));
            run_until_landed(&mut state);
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 10);
        assert_eq!(state.player.pos.y, 390.0);
        assert_eq!(state.furthest_progress_y, 525.0 - 500.0);
        assert_eq!(state.player.pos.y - state.scroll_offset, state.furthest_progress_y);
    }

    #[test]
    fn test_edges_clamp_movement() {
        let mut state = calm_state(5);
        for _ in 0..10 {
            tick(&mut state, &TickInput::new(Intent::MoveLeft));
            run_until_landed(&mut state);
        }
        assert_eq!(state.player.pos.x, 20.0);
        assert_eq!(state.player.facing, -1.0);
        let outcome = state.apply_intent(Intent::MoveLeft);
        assert_eq!(outcome, IntentOutcome::Ignored);
    }

    #[test]
    fn test_tree_blocks_hop_and_score() {
        let mut state = calm_state(6);
        let lane_idx = state.lane_index_at(475.0).expect("lane above spawn");
        let tree_id = state.ids.next_id();
        state.lanes[lane_idx].obstacles.push(Obstacle {
            id: tree_id,
            kind: ObstacleKind::Tree,
            x: 200.0,
            width: 40.0,
            height: 45.0,
        });

        assert_eq!(state.apply_intent(Intent::MoveUp), IntentOutcome::Ignored);
        assert_eq!(state.score, 0);
        assert!(!state.player.hopping);
    }

    #[test]
    fn test_standing_on_open_water_ends_run() {
        let mut state = calm_state(7);
        let idx = state.lane_index_at(475.0).expect("lane above spawn");
        state.lanes[idx] = Lane {
            kind: LaneKind::Water,
            y: state.lanes[idx].y,
            direction: 1.0,
            speed: 2.0,
            obstacles: Vec::new(),
            rail: RailSignal::Idle,
        };

        tick(&mut state, &TickInput::new(Intent::MoveUp));
        let mut ticks = 1;
        while state.player.hopping {
            assert_eq!(state.phase, GamePhase::Playing);
            tick(&mut state, &TickInput::default());
            ticks += 1;
        }
        // The landing tick ends the hop, and collisions run in that same tick
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(ticks, 7);
        assert!(state
            .events
            .contains(&GameEvent::GameOver { cause: DeathCause::Drowned }));
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut state = calm_state(8);
        state.score = 4;
        state.game_over(DeathCause::Drowned);
        let ticks = state.time_ticks;

        tick(&mut state, &TickInput::new(Intent::MoveUp));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &TickInput::new(Intent::Restart));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 4);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = calm_state(9);
        assert_eq!(state.apply_intent(Intent::Restart), IntentOutcome::Ignored);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput::new(Intent::MoveUp),
            TickInput::default(),
            TickInput::new(Intent::MoveLeft),
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lanes, state2.lanes);
        assert_eq!(state1.coins, state2.coins);
        assert_eq!(state1.player, state2.player);
    }
}
