//! Frame loop
//!
//! One frame: poll events, tick the simulation for the elapsed time, run the
//! commands it returns against the owned services, then submit a snapshot.

use crate::assets::TrackPaths;
use crate::audio::{MusicService, SoundService};
use crate::platform::{Clock, EventSource, KeyBindings, PlatformEvent};
use crate::renderer::{FrameOptions, RenderSink, build_frame};
use crate::sim::{Command, Difficulty, GameState, KeyPress, TickInput, tick};

/// Game instance holding state and every service it talks to
pub struct Game<M, S, R> {
    state: GameState,
    bindings: KeyBindings,
    music: M,
    sound: S,
    sink: R,
    music_paths: TrackPaths,
    options: FrameOptions,
    frames: u64,
}

impl<M: MusicService, S: SoundService, R: RenderSink> Game<M, S, R> {
    pub fn new(state: GameState, bindings: KeyBindings, music: M, sound: S, sink: R) -> Self {
        Self {
            state,
            bindings,
            music,
            sound,
            sink,
            music_paths: TrackPaths::default(),
            options: FrameOptions::default(),
            frames: 0,
        }
    }

    /// Tracks opened when a round starts
    pub fn with_music_paths(mut self, paths: TrackPaths) -> Self {
        self.music_paths = paths;
        self
    }

    pub fn with_frame_options(mut self, options: FrameOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn music(&self) -> &M {
        &self.music
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame. Returns false on close, in which case nothing was mutated.
    pub fn frame(&mut self, events: &[PlatformEvent], dt: f32) -> bool {
        if events.contains(&PlatformEvent::Close) {
            log::info!("Close requested after {} frames", self.frames);
            return false;
        }

        let presses: Vec<KeyPress> = events
            .iter()
            .filter_map(|event| match event {
                PlatformEvent::KeyDown(key) => Some(self.bindings.resolve(*key)),
                PlatformEvent::Close => None,
            })
            .collect();

        self.music.update(dt);
        let input = TickInput {
            presses,
            music: self.music.sample(),
        };

        for command in tick(&mut self.state, &input, dt) {
            self.execute(command);
        }

        let frame = build_frame(&self.state, &self.bindings, self.options);
        self.sink.submit(&frame);
        self.frames += 1;
        true
    }

    /// Drive frames until the event source closes
    pub fn run(&mut self, clock: &mut impl Clock, events: &mut impl EventSource) {
        loop {
            let pending = events.poll(&self.state);
            let dt = clock.delta();
            if !self.frame(&pending, dt) {
                break;
            }
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::StartMusic(difficulty) => self.start_music(difficulty),
            Command::StopMusic => self.music.stop(),
            Command::PlayCue(cue) => self.sound.play_one_shot(cue),
            Command::ResetRound(_) | Command::Flash(_) => {
                log::debug!("Internal command {:?} reached the host", command);
            }
        }
    }

    fn start_music(&mut self, difficulty: Difficulty) {
        let Some(path) = self.music_paths.get(difficulty) else {
            log::info!("No track for {}; pacing from elapsed time", difficulty);
            return;
        };
        if self.music.open(path) {
            self.music.play();
            log::info!("Playing {}", path.display());
        } else {
            log::warn!("Could not open {}; pacing from elapsed time", path.display());
        }
    }
}
