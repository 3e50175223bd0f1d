//! Game state and round bookkeeping
//!
//! `GameState` owns exactly one `RoundState` at a time; starting a round
//! replaces it wholesale.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::beats::BeatSchedule;
use super::clock::{MusicSample, MusicStatus, SongClock};
use super::difficulty::Difficulty;
use super::spawn::SpawnPolicy;
use super::speed::fall_speed;
use super::tile::{Column, Tile};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Optional splash, waiting for confirm
    ShowingStart,
    /// Difficulty selection
    ShowingMenu,
    /// Active round
    Playing,
    /// Round lost
    GameOver,
    /// Charted track cleared
    Win,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::ShowingStart => "start",
            GamePhase::ShowingMenu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game over",
            GamePhase::Win => "win",
        }
    }
}

/// Beat schedules for every difficulty, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct ChartSet {
    schedules: [BeatSchedule; 3],
}

impl ChartSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, difficulty: Difficulty, schedule: BeatSchedule) -> Self {
        self.schedules[difficulty.index()] = schedule;
        self
    }

    pub fn get(&self, difficulty: Difficulty) -> &BeatSchedule {
        &self.schedules[difficulty.index()]
    }
}

/// Everything that belongs to a single round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub difficulty: Difficulty,
    pub policy: SpawnPolicy,
    pub score: u32,
    pub stars_earned: u32,
    /// Seconds accumulated toward the next interval spawn
    pub spawn_timer: f32,
    /// Cursor into `schedule`; only moves forward
    pub beat_index: usize,
    pub schedule: BeatSchedule,
    /// Tiles in spawn order
    pub tiles: Vec<Tile>,
    pub song_clock: SongClock,
    /// Remaining column flash time (seconds)
    pub flash_timers: [f32; NUM_COLUMNS],
    /// Remaining reward banner time (seconds)
    pub reward_timer: f32,
    next_tile_id: u32,
}

impl RoundState {
    pub fn new(difficulty: Difficulty, schedule: BeatSchedule) -> Self {
        Self {
            difficulty,
            policy: SpawnPolicy::for_round(difficulty, &schedule),
            score: 0,
            stars_earned: 0,
            spawn_timer: 0.0,
            beat_index: 0,
            schedule,
            tiles: Vec::new(),
            song_clock: SongClock::new(),
            flash_timers: [0.0; NUM_COLUMNS],
            reward_timer: 0.0,
            next_tile_id: 1,
        }
    }

    /// Fall speed for the current score
    pub fn fall_speed(&self) -> f32 {
        fall_speed(self.score, self.difficulty)
    }

    /// Append a fresh tile above the field, returning its id
    pub fn spawn_tile(&mut self, column: Column) -> u32 {
        let id = self.next_tile_id;
        self.next_tile_id += 1;
        self.tiles.push(Tile::new(id, column));
        id
    }

    /// Apply scoring for a hit. Returns true when a new star was earned.
    pub fn register_hit(&mut self) -> bool {
        self.score += HIT_SCORE;
        let stars = self.score / STAR_SCORE;
        if stars > self.stars_earned {
            self.stars_earned = stars;
            self.reward_timer = REWARD_BANNER_SECS;
            return true;
        }
        false
    }

    pub fn flash(&mut self, column: Column) {
        self.flash_timers[column.index()] = FLASH_DURATION;
    }

    /// Count down visual timers
    pub fn decay_timers(&mut self, dt: f32) {
        for timer in &mut self.flash_timers {
            *timer = (*timer - dt).max(0.0);
        }
        self.reward_timer = (self.reward_timer - dt).max(0.0);
    }

    pub fn active_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.active)
    }

    /// The charted track has been played through and every tile resolved
    pub fn is_chart_complete(&self, music: MusicSample) -> bool {
        self.policy == SpawnPolicy::BeatSync
            && self.schedule.is_exhausted(self.beat_index)
            && music.status == MusicStatus::Stopped
            && self.tiles.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub round: RoundState,
    /// Simulation tick counter
    pub time_ticks: u64,
    charts: ChartSet,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, charts: ChartSet, show_start_screen: bool) -> Self {
        let difficulty = Difficulty::default();
        Self {
            seed,
            phase: if show_start_screen {
                GamePhase::ShowingStart
            } else {
                GamePhase::ShowingMenu
            },
            round: RoundState::new(difficulty, charts.get(difficulty).clone()),
            time_ticks: 0,
            charts,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    /// Replace the live round with a fresh one
    pub fn reset_round(&mut self, difficulty: Difficulty) {
        self.round = RoundState::new(difficulty, self.charts.get(difficulty).clone());
        log::info!(
            "Round reset: {} ({:?}, {} beats)",
            difficulty,
            self.round.policy,
            self.round.schedule.len()
        );
    }

    /// Split borrow of the round and the RNG
    pub fn round_and_rng(&mut self) -> (&mut RoundState, &mut Pcg32) {
        (&mut self.round, &mut self.rng)
    }
}
