//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (stored in the state)
//! - Stable iteration order (lanes in generation order, obstacles by insertion)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod lanes;
pub mod motion;
pub mod player;
pub mod state;
pub mod tick;
pub mod world;

pub use autopilot::choose_intent;
pub use collision::Hazard;
pub use geometry::Aabb;
pub use motion::RailChange;
pub use state::{
    CarVariant, Coin, DeathCause, GameEvent, GamePhase, GameState, Lane, LaneKind, Obstacle,
    ObstacleKind, Player, RailSignal,
};
pub use tick::{Intent, IntentOutcome, TickInput, tick};
