//! Keys Rush - A falling-tiles rhythm game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, judgement, motion, game phases)
//! - `renderer`: Presentation adapter (frame snapshots for a render sink)
//! - `platform`: Clock, key events, key bindings, autoplay
//! - `audio`: Music and sound-cue service interfaces
//! - `assets`: Per-asset load policy
//! - `settings`: JSON configuration

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AssetError, ConfigError};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frame timestep used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Column layout
    pub const NUM_COLUMNS: usize = 6;
    pub const COLUMN_WIDTH: f32 = FIELD_WIDTH / NUM_COLUMNS as f32;

    /// Tile defaults
    pub const TILE_HEIGHT: f32 = 100.0;
    /// Tiles spawn fully above the field so they slide into view
    pub const SPAWN_Y: f32 = -TILE_HEIGHT;

    /// Target band (full width, half a tile tall)
    pub const BAND_Y: f32 = FIELD_HEIGHT - TILE_HEIGHT * 1.5;
    pub const BAND_HEIGHT: f32 = TILE_HEIGHT / 2.0;

    /// Distance a tile centre travels from spawn to the band centre
    pub const TRAVEL_DISTANCE: f32 =
        (BAND_Y + BAND_HEIGHT / 2.0) - (SPAWN_Y + TILE_HEIGHT / 2.0);

    /// Maximum fall speed (px/s) regardless of score
    pub const SPEED_CAP: f32 = 700.0;

    /// Points per hit
    pub const HIT_SCORE: u32 = 10;
    /// Points per reward star
    pub const STAR_SCORE: u32 = 100;

    /// Column flash after a hit (seconds)
    pub const FLASH_DURATION: f32 = 0.2;
    /// Reward banner display time after a new star (seconds)
    pub const REWARD_BANNER_SECS: f32 = 5.0;

    /// How long the music clock may stay flat before elapsed-time pacing takes over
    pub const STALL_TOLERANCE: f32 = 0.25;
}
