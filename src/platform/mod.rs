//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (frame deltas)
//! - Input events
//! - Key bindings

pub mod autoplay;
pub mod input;

pub use autoplay::Autoplay;
pub use input::{Key, KeyBindingConfig, KeyBindings};

use std::collections::VecDeque;

use crate::sim::GameState;

/// Host event delivered to the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Window closed; the loop exits without another tick
    Close,
    KeyDown(Key),
}

/// Source of frame deltas
pub trait Clock {
    /// Seconds since the previous call
    fn delta(&mut self) -> f32;
}

/// Source of pending input events, polled once per frame
pub trait EventSource {
    fn poll(&mut self, state: &GameState) -> Vec<PlatformEvent>;
}

/// Constant timestep clock
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl Clock for FixedClock {
    fn delta(&mut self) -> f32 {
        self.dt
    }
}

/// Pre-recorded events, one batch per frame; closes when exhausted
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<Vec<PlatformEvent>>,
}

impl ScriptedEvents {
    pub fn new(frames: impl IntoIterator<Item = Vec<PlatformEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self, _state: &GameState) -> Vec<PlatformEvent> {
        self.frames.pop_front().unwrap_or_else(|| vec![PlatformEvent::Close])
    }
}
