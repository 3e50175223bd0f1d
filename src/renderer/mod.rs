//! Presentation adapter
//!
//! `build_frame` turns a state snapshot into an ordered list of primitives.
//! A `RenderSink` owns the actual drawing; none lives in this crate.

pub mod frame;
pub mod shapes;

pub use frame::{FrameOptions, build_frame};
pub use shapes::{Align, Color, DrawCmd, Frame, Sprite};

/// Consumer of finished frames
pub trait RenderSink {
    fn submit(&mut self, frame: &Frame);
}

/// Discards frames
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn submit(&mut self, _frame: &Frame) {}
}

/// Headless sink that traces frame sizes
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    pub frames: u64,
    pub last_len: usize,
}

impl RenderSink for LogSink {
    fn submit(&mut self, frame: &Frame) {
        self.frames += 1;
        if frame.len() != self.last_len {
            log::trace!("Frame {}: {} draw commands", self.frames, frame.len());
        }
        self.last_len = frame.len();
    }
}
