//! Autoplay bot for headless runs and demos
//!
//! Presses keys the way a perfect player would: confirm on the splash, the
//! chosen difficulty in the menu, and a column key once the oldest tile in
//! that column has its centre on the band centre.

use super::input::{Key, KeyBindings};
use super::{EventSource, PlatformEvent};
use crate::consts::{BAND_HEIGHT, BAND_Y};
use crate::sim::{Column, Difficulty, GamePhase, GameState, KeyPress};

#[derive(Debug, Clone)]
pub struct Autoplay {
    bindings: KeyBindings,
    difficulty: Difficulty,
    /// Stop after this many simulated frames
    frame_limit: u64,
    frames: u64,
}

impl Autoplay {
    pub fn new(bindings: KeyBindings, difficulty: Difficulty, frame_limit: u64) -> Self {
        Self {
            bindings,
            difficulty,
            frame_limit,
            frames: 0,
        }
    }

    /// Keys to press for the current state
    pub fn keys(&self, state: &GameState) -> Vec<Key> {
        match state.phase {
            GamePhase::ShowingStart => self.bindings.key_for(KeyPress::Confirm).into_iter().collect(),
            GamePhase::ShowingMenu => vec![self.bindings.select_key(self.difficulty)],
            GamePhase::Playing => Column::all()
                .filter(|&column| ready_to_strike(state, column))
                .map(|column| self.bindings.column_key(column))
                .collect(),
            GamePhase::GameOver | GamePhase::Win => Vec::new(),
        }
    }
}

fn ready_to_strike(state: &GameState, column: Column) -> bool {
    let band_center = BAND_Y + BAND_HEIGHT / 2.0;
    state
        .round
        .active_tiles()
        .find(|t| t.column() == column)
        .is_some_and(|t| t.overlaps_band() && t.center() >= band_center)
}

impl EventSource for Autoplay {
    fn poll(&mut self, state: &GameState) -> Vec<PlatformEvent> {
        self.frames += 1;
        let finished = matches!(state.phase, GamePhase::GameOver | GamePhase::Win);
        if finished || self.frames > self.frame_limit {
            return vec![PlatformEvent::Close];
        }
        self.keys(state).into_iter().map(PlatformEvent::KeyDown).collect()
    }
}
