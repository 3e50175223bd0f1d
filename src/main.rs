//! Keys Rush entry point
//!
//! Runs the game loop headless: fixed 60 Hz clock, autoplay input, simulated
//! music and a logging render sink. Prints a JSON round summary at the end.
//!
//! Usage: `keys-rush [settings.json] [easy|medium|hard]`

use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use keys_rush::audio::{SilentSound, SimulatedMusic};
use keys_rush::consts::FRAME_DT;
use keys_rush::platform::{Autoplay, FixedClock};
use keys_rush::renderer::{FrameOptions, LogSink};
use keys_rush::sim::{Difficulty, GamePhase, GameState};
use keys_rush::{ConfigError, Game, Settings, assets};

/// Ten minutes of simulated play
const FRAME_LIMIT: u64 = 60 * 60 * 10;
/// Silence after the last beat before the simulated track ends
const TRACK_TAIL: f32 = 2.0;

#[derive(Debug, Serialize)]
struct Summary {
    difficulty: Difficulty,
    outcome: GamePhase,
    score: u32,
    stars: u32,
    frames: u64,
    seconds: f32,
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Keys Rush (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let settings = Settings::load(&settings_path)
        .with_context(|| format!("loading {}", settings_path.display()))?;

    let difficulty = match args.next() {
        Some(name) => Difficulty::from_str(&name).ok_or(ConfigError::UnknownDifficulty(name))?,
        None => settings.autoplay_difficulty,
    };

    let bindings = settings.key_bindings()?;
    let loaded = assets::load(&settings.assets).context("checking assets")?;

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Game initialized with seed: {}", seed);

    let track_length = loaded
        .charts
        .get(difficulty)
        .last_time()
        .map_or(0.0, |t| t + TRACK_TAIL);
    let music = SimulatedMusic::new(track_length);
    let sound = SilentSound {
        mixer: settings.mixer(),
        played: 0,
    };

    let state = GameState::new(seed, loaded.charts.clone(), settings.show_start_screen);
    let mut game = Game::new(state, bindings.clone(), music, sound, LogSink::default())
        .with_music_paths(settings.assets.music.clone())
        .with_frame_options(FrameOptions::from(&loaded));

    let mut clock = FixedClock::new(FRAME_DT);
    let mut bot = Autoplay::new(bindings, difficulty, FRAME_LIMIT);
    game.run(&mut clock, &mut bot);

    let state = game.state();
    let summary = Summary {
        difficulty: state.round.difficulty,
        outcome: state.phase,
        score: state.round.score,
        stars: state.round.stars_earned,
        frames: game.frames(),
        seconds: game.frames() as f32 * FRAME_DT,
        seed,
    };
    log::info!(
        "Round ended ({}) with {} cues played",
        state.phase.as_str(),
        game.sound().played
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
