//! Lane Hopper headless runner
//!
//! Plays autopilot runs against the simulation and prints a JSON summary.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use lane_hopper::sim::{GameEvent, GameState, TickInput, choose_intent, tick};
use lane_hopper::{HighScores, RenderFrame, Settings};

const USAGE: &str = "\
Usage: lane-hopper [options]

Options:
  --seed N         Session seed (random when omitted)
  --runs N         Number of runs to play
  --ticks N        Tick cap per run
  --settings PATH  Load settings from a JSON file
  --scores PATH    Keep the leaderboard in a JSON file across invocations
  --frame          Include the final render frame in the summary
  --help           Show this help message";

#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    runs: Option<u32>,
    ticks: Option<u64>,
    settings: Option<PathBuf>,
    scores: Option<PathBuf>,
    frame: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| iter.next().with_context(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--seed" => {
                let v = value("--seed")?;
                args.seed = Some(v.parse().with_context(|| format!("invalid seed '{v}'"))?);
            }
            "--runs" => {
                let v = value("--runs")?;
                args.runs = Some(v.parse().with_context(|| format!("invalid run count '{v}'"))?);
            }
            "--ticks" => {
                let v = value("--ticks")?;
                args.ticks = Some(v.parse().with_context(|| format!("invalid tick cap '{v}'"))?);
            }
            "--settings" => args.settings = Some(PathBuf::from(value("--settings")?)),
            "--scores" => args.scores = Some(PathBuf::from(value("--scores")?)),
            "--frame" => args.frame = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(None);
            }
            other => bail!("unknown argument '{other}'\n\n{USAGE}"),
        }
    }
    Ok(Some(args))
}

#[derive(Debug, Serialize)]
struct RunSummary {
    score: u32,
    coins: u32,
    ticks: u64,
    /// Simulated play time
    seconds: f32,
    /// `None` when the tick cap ended the run
    death: Option<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    runs: Vec<RunSummary>,
    high_score: u32,
    leaderboard: HighScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame: Option<RenderFrame>,
}

/// Play until the run ends or hits the tick cap
fn play_run(state: &mut GameState, max_ticks: u64) -> RunSummary {
    let mut death = None;
    while state.is_playing() && state.time_ticks < max_ticks {
        let input = TickInput {
            intent: choose_intent(state),
        };
        tick(state, &input);
        death = state.events.iter().find_map(|e| match e {
            GameEvent::GameOver { cause } => Some(format!("{cause:?}")),
            _ => None,
        });
    }
    RunSummary {
        score: state.score,
        coins: state.coin_count,
        ticks: state.time_ticks,
        seconds: state.tuning.ticks_to_seconds(state.time_ticks),
        death,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(runs) = args.runs {
        settings.runs = runs;
    }
    if let Some(ticks) = args.ticks {
        settings.max_ticks = ticks;
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Lane Hopper starting (seed {seed}, {} runs)", settings.runs);

    let mut state = GameState::with_tuning(seed, settings.tuning.clone());
    let mut leaderboard = match &args.scores {
        Some(path) => HighScores::load(path),
        None => HighScores::new(),
    };
    let mut runs = Vec::new();

    for run in 0..settings.runs {
        if run > 0 {
            state.reset();
        }
        let summary = play_run(&mut state, settings.max_ticks);
        if let Some(rank) = leaderboard.add_score(summary.score, summary.coins, summary.ticks) {
            log::info!("Run {} placed #{rank} with {}", run + 1, summary.score);
        }
        runs.push(summary);
    }

    if let Some(best) = leaderboard.top_score() {
        log::info!("Leaderboard best: {best}");
    }
    if let Some(path) = &args.scores {
        leaderboard
            .save(path)
            .with_context(|| format!("failed to write scores to {}", path.display()))?;
    }

    let summary = Summary {
        seed,
        runs,
        high_score: state.high_score,
        leaderboard,
        frame: args.frame.then(|| RenderFrame::capture(&state)),
    };
    let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
    println!("{json}");
    Ok(())
}
