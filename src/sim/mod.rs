//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `dt` and the per-tick music sample
//! - Seeded RNG only
//! - Stable iteration order (tiles kept in spawn order)
//! - No rendering, audio device or platform dependencies

pub mod beats;
pub mod clock;
pub mod difficulty;
pub mod judge;
pub mod motion;
pub mod spawn;
pub mod speed;
pub mod state;
pub mod tick;
pub mod tile;

pub use beats::{Beat, BeatSchedule};
pub use clock::{MusicSample, MusicStatus, SongClock};
pub use difficulty::{Difficulty, DifficultySettings};
pub use judge::{Judgement, on_key_press};
pub use spawn::{SpawnPolicy, fall_duration};
pub use speed::fall_speed;
pub use state::{ChartSet, GamePhase, GameState, RoundState};
pub use tick::{Command, KeyPress, TickInput, Transition, tick};
pub use tile::{Column, Tile};
