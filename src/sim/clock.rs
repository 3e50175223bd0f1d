//! Song position tracking with elapsed-time fallback
//!
//! The music service reports its playback offset once per tick. While that
//! offset advances, the song position follows it. If it stays flat for
//! `STALL_TOLERANCE` (device dropped, track never opened, track ended), the
//! position keeps advancing with tick time so beat-synced spawning continues.
//! The position never moves backwards.

use serde::{Deserialize, Serialize};

use crate::consts::STALL_TOLERANCE;

/// Playback status reported by the music service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MusicStatus {
    #[default]
    Stopped,
    Playing,
}

/// One reading of the music service, taken at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MusicSample {
    pub status: MusicStatus,
    /// Elapsed playback offset in seconds
    pub offset: f32,
}

impl MusicSample {
    pub fn playing(offset: f32) -> Self {
        Self {
            status: MusicStatus::Playing,
            offset,
        }
    }

    pub fn stopped() -> Self {
        Self::default()
    }
}

/// Monotone song position
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongClock {
    position: f32,
    last_reported: f32,
    stalled_for: f32,
    fallback: bool,
}

impl SongClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current song position in seconds
    pub fn position(&self) -> f32 {
        self.position
    }

    /// True while pacing from tick time instead of the music offset
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn update(&mut self, dt: f32, sample: MusicSample) {
        let advanced = sample.status == MusicStatus::Playing && sample.offset > self.last_reported;

        if advanced {
            self.last_reported = sample.offset;
            self.stalled_for = 0.0;
            self.position = self.position.max(sample.offset);
            if self.fallback {
                log::info!("Music clock resumed at {:.2}s", sample.offset);
                self.fallback = false;
            }
            return;
        }

        self.stalled_for += dt;
        if self.stalled_for >= STALL_TOLERANCE {
            if !self.fallback {
                log::warn!(
                    "Music clock stalled at {:.2}s; pacing beats from elapsed time",
                    self.position
                );
                self.fallback = true;
            }
            self.position += dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_follows_music_offset() {
        let mut clock = SongClock::new();
        clock.update(DT, MusicSample::playing(0.5));
        assert_eq!(clock.position(), 0.5);
        clock.update(DT, MusicSample::playing(0.52));
        assert_eq!(clock.position(), 0.52);
        assert!(!clock.is_fallback());
    }

    #[test]
    fn test_brief_flat_reading_holds_position() {
        let mut clock = SongClock::new();
        clock.update(DT, MusicSample::playing(1.0));
        clock.update(DT, MusicSample::playing(1.0));
        assert_eq!(clock.position(), 1.0);
        assert!(!clock.is_fallback());
    }

    #[test]
    fn test_stall_falls_back_to_elapsed_time() {
        let mut clock = SongClock::new();
        clock.update(DT, MusicSample::playing(2.0));
        for _ in 0..60 {
            clock.update(DT, MusicSample::stopped());
        }
        assert!(clock.is_fallback());
        assert!(clock.position() > 2.5);
        assert!(clock.position() < 3.0);
    }

    #[test]
    fn test_never_moves_backwards() {
        let mut clock = SongClock::new();
        for _ in 0..120 {
            clock.update(DT, MusicSample::stopped());
        }
        let ahead = clock.position();
        assert!(ahead > 1.0);

        // Music restarts behind the fallback position
        clock.update(DT, MusicSample::playing(0.1));
        assert_eq!(clock.position(), ahead);
        assert!(!clock.is_fallback());
    }
}
