//! Game state and core simulation types
//!
//! Everything a session owns lives here: lanes, coins, the player and the
//! scoring fields. The RNG is part of the state so a run replays exactly from
//! its seed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart
    GameOver,
}

/// Terrain of a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneKind {
    Grass,
    Road,
    Water,
    Rail,
}

impl LaneKind {
    /// Whether obstacles on this lane wrap around the screen edges
    pub fn scrolls_obstacles(&self) -> bool {
        matches!(self, LaneKind::Road | LaneKind::Water)
    }
}

/// Paint jobs for cars (render payload only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarVariant {
    Red,
    Blue,
    Purple,
    Truck,
}

impl CarVariant {
    pub const ALL: [CarVariant; 4] = [
        CarVariant::Red,
        CarVariant::Blue,
        CarVariant::Purple,
        CarVariant::Truck,
    ];
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car { variant: CarVariant },
    Log,
    Train,
    Tree,
}

impl ObstacleKind {
    /// Touching this obstacle ends the run
    pub fn is_lethal(&self) -> bool {
        matches!(self, ObstacleKind::Car { .. } | ObstacleKind::Train)
    }

    pub fn is_log(&self) -> bool {
        matches!(self, ObstacleKind::Log)
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, ObstacleKind::Tree)
    }
}

/// A lane-bound entity. `x` is the horizontal center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Horizontal span (left, right)
    pub fn span(&self) -> (f32, f32) {
        (self.x - self.width / 2.0, self.x + self.width / 2.0)
    }
}

/// Rail crossing signal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RailSignal {
    /// No train, no warning
    #[default]
    Idle,
    /// Lights flashing, train spawns when the countdown runs out
    Warning { ticks_left: i32 },
    /// A train is crossing
    TrainActive,
}

/// One horizontal strip of the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub kind: LaneKind,
    /// Screen y of the lane's top edge
    pub y: f32,
    /// -1.0 (leftward) or 1.0 (rightward)
    pub direction: f32,
    /// Pixels per tick, 0 on grass
    pub speed: f32,
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub rail: RailSignal,
}

impl Lane {
    /// Signed horizontal displacement per tick
    pub fn velocity(&self) -> f32 {
        self.speed * self.direction
    }

    pub fn train_warning_active(&self) -> bool {
        matches!(self.rail, RailSignal::Warning { .. })
    }

    pub fn train_warning_timer(&self) -> i32 {
        match self.rail {
            RailSignal::Warning { ticks_left } => ticks_left,
            _ => 0,
        }
    }

    pub fn train_present(&self) -> bool {
        self.rail == RailSignal::TrainActive
    }
}

/// A collectible coin. Moves with the lanes but is not owned by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Top of the lane the coin spawned on, scrolled alongside it
    pub origin_lane_y: f32,
    pub collected: bool,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Current screen position (center)
    pub pos: Vec2,
    /// Hop destination
    pub target: Vec2,
    pub hopping: bool,
    /// Current height of the hop arc (0 on the ground)
    pub hop_height: f32,
    /// -1.0 facing left, 1.0 facing right
    pub facing: f32,
    /// Id of the log being ridden, recomputed every tick
    pub riding: Option<u32>,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            target: pos,
            hopping: false,
            hop_height: 0.0,
            facing: 1.0,
            riding: None,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Struck by a car or train
    Hit(ObstacleKind),
    /// Stood on water with no log underneath
    Drowned,
    /// Carried off-screen by a log
    SweptAway,
}

/// Gameplay events emitted during a tick (for audio/HUD consumers)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Scored { score: u32 },
    NewBest { score: u32 },
    CoinCollected { total: u32 },
    TrainWarning { lane_y: f32 },
    TrainSpawned { lane_y: f32 },
    GameOver { cause: DeathCause },
}

/// Monotonic id source for obstacles and coins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the session was created with
    pub seed: u64,
    /// Session RNG, continues across restarts
    pub rng: Pcg32,
    /// Balance parameters
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Forward progress this run
    pub score: u32,
    /// Best score of the session, survives resets
    pub high_score: u32,
    /// This run has scored past the previous session best
    #[serde(default)]
    pub beat_best: bool,
    /// Coins picked up this run
    pub coin_count: u32,
    /// Speed multiplier for newly generated lanes, in [1, max_difficulty]
    pub difficulty: f32,
    /// Total distance the world has scrolled this run
    pub scroll_offset: f32,
    /// Lowest world-space y the player has reached
    pub furthest_progress_y: f32,
    /// Simulation tick counter for this run
    pub time_ticks: u64,
    /// Animation phases consumed by the renderer
    pub water_phase: f32,
    pub coin_phase: f32,
    pub player: Player,
    /// Active lanes, in generation order
    pub lanes: Vec<Lane>,
    pub coins: Vec<Coin>,
    /// Events emitted by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    pub(crate) ids: EntityIds,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session with the given balance parameters.
    /// Values the simulation cannot run with are replaced by defaults.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, tuning.sanitized());
        state.generate_initial_lanes();
        state
    }

    /// A session with no lanes yet (world generation not run)
    pub(crate) fn empty(seed: u64, tuning: Tuning) -> Self {
        let (x, y) = tuning.spawn_point();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            high_score: 0,
            beat_best: false,
            coin_count: 0,
            difficulty: 1.0,
            scroll_offset: 0.0,
            furthest_progress_y: y,
            time_ticks: 0,
            water_phase: 0.0,
            coin_phase: 0.0,
            player: Player::new(x, y),
            lanes: Vec::new(),
            coins: Vec::new(),
            events: Vec::new(),
            ids: EntityIds::default(),
        }
    }

    /// Start a new run. Keeps the high score and the RNG stream.
    pub fn reset(&mut self) {
        let (x, y) = self.tuning.spawn_point();
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.beat_best = false;
        self.coin_count = 0;
        self.difficulty = 1.0;
        self.scroll_offset = 0.0;
        self.furthest_progress_y = y;
        self.time_ticks = 0;
        self.water_phase = 0.0;
        self.coin_phase = 0.0;
        self.player = Player::new(x, y);
        self.lanes.clear();
        self.coins.clear();
        self.ids = EntityIds::default();
        self.generate_initial_lanes();
        log::info!("New run started (best so far: {})", self.high_score);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Raise the high score to the current score if it was beaten
    pub(crate) fn sync_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.beat_best = true;
            self.events.push(GameEvent::NewBest { score: self.score });
        }
    }

    /// End the run
    pub fn game_over(&mut self, cause: DeathCause) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.sync_high_score();
        self.events.push(GameEvent::GameOver { cause });
        log::info!(
            "Game over ({:?}): score {} best {} coins {} after {} ticks",
            cause,
            self.score,
            self.high_score,
            self.coin_count,
            self.time_ticks
        );
    }
}
