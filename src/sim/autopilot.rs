//! Demo mode: a simple autopilot that plays the game
//!
//! Looks a few ticks ahead along each lane's motion and prefers forward
//! progress, then waiting, then sidesteps, then retreat.

use glam::Vec2;

use super::geometry::Aabb;
use super::state::{GameState, Lane, LaneKind};
use super::tick::Intent;

/// Extra ticks of look-ahead beyond the hop itself
const SAFETY_TICKS: u32 = 6;
/// Keep this far from the screen edges while riding a log
const EDGE_MARGIN: f32 = 40.0;

/// Pick the next intent for the demo player
pub fn choose_intent(state: &GameState) -> Option<Intent> {
    if !state.is_playing() {
        return Some(Intent::Restart);
    }
    if state.player.hopping {
        return None;
    }

    let hop_ticks = hop_duration(state);
    let lands_safely = |intent: Intent| {
        state
            .hop_target(intent)
            .is_some_and(|target| is_safe_at(state, target, hop_ticks))
    };

    if lands_safely(Intent::MoveUp) {
        return Some(Intent::MoveUp);
    }

    // Sidestep toward the middle first
    let sides = if state.player.pos.x < state.tuning.viewport_width / 2.0 {
        [Intent::MoveRight, Intent::MoveLeft]
    } else {
        [Intent::MoveLeft, Intent::MoveRight]
    };

    // A tree ahead never moves, so walk around it
    if state.hop_target(Intent::MoveUp).is_none() {
        if let Some(side) = sides.into_iter().find(|&intent| lands_safely(intent)) {
            return Some(side);
        }
    }
    if is_safe_at(state, state.player.pos, 0) {
        return None;
    }
    sides
        .into_iter()
        .chain(std::iter::once(Intent::MoveDown))
        .find(|&intent| lands_safely(intent))
}

/// Ticks a single hop takes to land
fn hop_duration(state: &GameState) -> u32 {
    let step = state.tuning.hop_step.max(f32::EPSILON);
    (state.tuning.grid_size / step).ceil() as u32
}

/// Whether standing at `pos` from `arrive` ticks from now stays safe for a while
fn is_safe_at(state: &GameState, pos: Vec2, arrive: u32) -> bool {
    let Some(lane) = state.lane_at(pos.y) else {
        return true;
    };
    let tuning = &state.tuning;
    let player_box = Aabb::from_center(pos, Vec2::splat(tuning.player_size));

    match lane.kind {
        LaneKind::Grass => true,
        LaneKind::Water => log_holds(lane, pos, arrive, state),
        LaneKind::Road => (arrive..=arrive + SAFETY_TICKS)
            .all(|t| !lethal_overlap(lane, &player_box, t, tuning.lane_height)),
        LaneKind::Rail => {
            !lane.train_warning_active()
                && !lane.train_present()
                && !lethal_overlap(lane, &player_box, arrive, tuning.lane_height)
        }
    }
}

/// Whether any car or train would overlap `player_box` `ticks` from now
fn lethal_overlap(lane: &Lane, player_box: &Aabb, ticks: u32, lane_height: f32) -> bool {
    let shift = Vec2::new(lane.velocity() * ticks as f32, 0.0);
    lane.obstacles
        .iter()
        .filter(|o| o.kind.is_lethal())
        .any(|o| {
            Aabb::for_obstacle(o, lane.y, lane_height)
                .translated(shift)
                .overlaps(player_box)
        })
}

/// Whether a log will be under `pos` on arrival and keep the rider on screen
fn log_holds(lane: &Lane, pos: Vec2, arrive: u32, state: &GameState) -> bool {
    let tuning = &state.tuning;
    let drift = lane.velocity();
    let landing_x = pos.x + drift * SAFETY_TICKS as f32;
    if landing_x < EDGE_MARGIN || landing_x > tuning.viewport_width - EDGE_MARGIN {
        return false;
    }

    // Demand the landing point sits well inside the log, not on its tip
    let inset = tuning.player_size / 2.0;
    lane.obstacles.iter().filter(|o| o.kind.is_log()).any(|log| {
        let (left, right) = log.span();
        let shift = drift * arrive as f32;
        left + shift + inset <= pos.x && pos.x <= right + shift - inset
    })
}
