//! Audio service interfaces
//!
//! The game core never touches an audio device. It reads a `MusicSample` once
//! per tick and emits `SoundCue`s; a host backend implements `MusicService`
//! and `SoundService`. Headless implementations live here too.

use std::path::{Path, PathBuf};

use crate::sim::tile::Column;

pub use crate::sim::clock::{MusicSample, MusicStatus};

/// Note frequencies for each column (C major from C4)
const COLUMN_FREQS: [f32; crate::consts::NUM_COLUMNS] =
    [261.63, 293.66, 329.63, 349.23, 392.00, 440.00];

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Column struck
    Note(Column),
    /// Round lost
    Fail,
    /// Chart cleared
    Clear,
}

impl SoundCue {
    /// Base pitch for synthesized backends (Hz)
    pub fn frequency(&self) -> f32 {
        match self {
            SoundCue::Note(column) => COLUMN_FREQS[column.index()],
            SoundCue::Fail => 110.0,
            SoundCue::Clear => 523.25,
        }
    }
}

/// Music playback
pub trait MusicService {
    /// Load a track. Returns false if it cannot be opened.
    fn open(&mut self, path: &Path) -> bool;
    fn play(&mut self);
    fn stop(&mut self);
    fn status(&self) -> MusicStatus;
    fn elapsed_offset_seconds(&self) -> f32;

    /// Per-frame pump for backends that need one
    fn update(&mut self, _dt: f32) {}

    /// Read status and offset together for the current tick
    fn sample(&self) -> MusicSample {
        MusicSample {
            status: self.status(),
            offset: self.elapsed_offset_seconds(),
        }
    }
}

/// Fire-and-forget sound cues
pub trait SoundService {
    fn play_one_shot(&mut self, cue: SoundCue);
}

/// Volume mixer shared by backends
#[derive(Debug, Clone, Copy)]
pub struct Mixer {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Mixer {
    /// Effective cue volume
    pub fn sfx(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume
    pub fn music(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

/// Music stand-in driven by the frame clock.
///
/// "Plays" a track of fixed length: the offset advances by `advance(dt)` while
/// playing and the status flips to `Stopped` at the end. Paths listed in
/// `unavailable` fail to open.
#[derive(Debug, Clone)]
pub struct SimulatedMusic {
    track_length: f32,
    offset: f32,
    status: MusicStatus,
    loaded: Option<PathBuf>,
    unavailable: Vec<PathBuf>,
}

impl SimulatedMusic {
    pub fn new(track_length: f32) -> Self {
        Self {
            track_length,
            offset: 0.0,
            status: MusicStatus::Stopped,
            loaded: None,
            unavailable: Vec::new(),
        }
    }

    /// Make `open` fail for this path
    pub fn with_unavailable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unavailable.push(path.into());
        self
    }

    pub fn set_track_length(&mut self, track_length: f32) {
        self.track_length = track_length;
    }

    /// Advance playback by one frame
    pub fn advance(&mut self, dt: f32) {
        if self.status != MusicStatus::Playing {
            return;
        }
        self.offset += dt;
        if self.offset >= self.track_length {
            self.offset = self.track_length;
            self.status = MusicStatus::Stopped;
            log::info!("Track finished at {:.2}s", self.offset);
        }
    }
}

impl MusicService for SimulatedMusic {
    fn open(&mut self, path: &Path) -> bool {
        self.status = MusicStatus::Stopped;
        self.offset = 0.0;
        if self.unavailable.iter().any(|p| p == path) {
            self.loaded = None;
            return false;
        }
        self.loaded = Some(path.to_path_buf());
        true
    }

    fn play(&mut self) {
        if self.loaded.is_some() {
            self.status = MusicStatus::Playing;
        }
    }

    fn stop(&mut self) {
        self.status = MusicStatus::Stopped;
    }

    fn status(&self) -> MusicStatus {
        self.status
    }

    fn elapsed_offset_seconds(&self) -> f32 {
        self.offset
    }

    fn update(&mut self, dt: f32) {
        self.advance(dt);
    }
}

/// Sound service that only logs
#[derive(Debug, Clone, Default)]
pub struct SilentSound {
    pub mixer: Mixer,
    pub played: u32,
}

impl SoundService for SilentSound {
    fn play_one_shot(&mut self, cue: SoundCue) {
        self.played += 1;
        log::debug!(
            "Cue {:?} ({:.1} Hz, vol {:.2})",
            cue,
            cue.frequency(),
            self.mixer.sfx()
        );
    }
}
