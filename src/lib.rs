//! Lane Hopper - A lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lane generation, motion, collisions, game state)
//! - `frame`: Per-frame snapshot handed to a renderer
//! - `input`: Key names to movement intents
//! - `tuning`: Data-driven game balance
//! - `settings`: Runner preferences loaded from JSON
//! - `highscores`: Session leaderboard

pub mod frame;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use frame::RenderFrame;
pub use highscores::HighScores;
pub use input::{Intent, intent_for_key};
pub use settings::Settings;
pub use tuning::Tuning;

/// Fixed geometry of lane contents
pub mod consts {
    /// Car footprint
    pub const CAR_WIDTHS: [f32; 3] = [60.0, 80.0, 100.0];
    pub const CAR_HEIGHT: f32 = 35.0;
    pub const CARS_PER_LANE: (u32, u32) = (2, 4);
    pub const CAR_JITTER: i32 = 20;

    /// Log footprint
    pub const LOG_WIDTHS: [f32; 3] = [80.0, 100.0, 120.0];
    pub const LOG_HEIGHT: f32 = 40.0;
    pub const LOGS_PER_LANE: (u32, u32) = (2, 3);
    pub const LOG_JITTER: i32 = 30;
    /// Extra gap added between logs on top of the even spacing
    pub const LOG_EXTRA_SPACING: i32 = 50;

    /// Trees block movement but never kill
    pub const TREE_WIDTH: f32 = 40.0;
    pub const TREE_HEIGHT: f32 = 45.0;
    pub const TREES_PER_LANE: (u32, u32) = (0, 3);
    pub const TREE_EDGE_MARGIN: i32 = 20;
    pub const TREE_MIN_SPACING: f32 = 60.0;
    pub const TREE_SPAWN_CLEARANCE: f32 = 50.0;
    pub const TREE_PLACEMENT_ATTEMPTS: u32 = 10;

    /// Trains enter off-screen and leave past a direction-dependent threshold
    pub const TRAIN_WIDTH: f32 = 350.0;
    pub const TRAIN_HEIGHT: f32 = 45.0;
    pub const TRAIN_ENTRY_OFFSET: f32 = 400.0;
    pub const TRAIN_EXIT_MARGIN_FORWARD: f32 = 100.0;
    pub const TRAIN_EXIT_MARGIN_BACKWARD: f32 = 500.0;
    /// Rail speed as a multiple of the difficulty-scaled base speed
    pub const RAIL_SPEED_FACTOR: f32 = 8.0;

    /// Coins
    pub const COIN_SIZE: f32 = 25.0;
    pub const COIN_EDGE_MARGIN: i32 = 50;
    pub const COIN_TREE_CLEARANCE: f32 = 50.0;
    /// Coins are retired this far below the viewport
    pub const COIN_RETIRE_MARGIN: f32 = 50.0;

    /// Animation phase increments per tick
    pub const WATER_PHASE_STEP: f32 = 0.1;
    pub const COIN_PHASE_STEP: f32 = 0.15;
}
