//! Full rounds driven through `Game` with recording services

use std::path::{Path, PathBuf};

use keys_rush::Game;
use keys_rush::assets::TrackPaths;
use keys_rush::audio::{MusicService, MusicStatus, SimulatedMusic, SoundCue, SoundService};
use keys_rush::consts::*;
use keys_rush::platform::{Autoplay, FixedClock, Key, KeyBindings, PlatformEvent, ScriptedEvents};
use keys_rush::renderer::{Frame, FrameOptions, RenderSink};
use keys_rush::sim::{BeatSchedule, ChartSet, Column, Difficulty, GamePhase, GameState};

#[derive(Default)]
struct RecordingSound {
    cues: Vec<SoundCue>,
}

impl SoundService for RecordingSound {
    fn play_one_shot(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

#[derive(Default)]
struct RecordingSink {
    frames: usize,
    last: Frame,
}

impl RenderSink for RecordingSink {
    fn submit(&mut self, frame: &Frame) {
        self.frames += 1;
        self.last = frame.clone();
    }
}

/// Music that plays until told to stop and records the calls it gets
#[derive(Default)]
struct RecordingMusic {
    opened: Vec<PathBuf>,
    stops: u32,
    status: MusicStatus,
    offset: f32,
}

impl MusicService for RecordingMusic {
    fn open(&mut self, path: &Path) -> bool {
        self.opened.push(path.to_path_buf());
        self.offset = 0.0;
        true
    }

    fn play(&mut self) {
        self.status = MusicStatus::Playing;
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.status = MusicStatus::Stopped;
    }

    fn status(&self) -> MusicStatus {
        self.status
    }

    fn elapsed_offset_seconds(&self) -> f32 {
        self.offset
    }

    fn update(&mut self, dt: f32) {
        if self.status == MusicStatus::Playing {
            self.offset += dt;
        }
    }
}

type TestGame<M> = Game<M, RecordingSound, RecordingSink>;

fn new_game<M: MusicService>(music: M, charts: ChartSet, show_start: bool) -> TestGame<M> {
    Game::new(
        GameState::new(11, charts, show_start),
        KeyBindings::default(),
        music,
        RecordingSound::default(),
        RecordingSink::default(),
    )
    .with_music_paths(TrackPaths {
        easy: Some(PathBuf::from("easy.ogg")),
        medium: Some(PathBuf::from("medium.ogg")),
        hard: Some(PathBuf::from("hard.ogg")),
    })
    .with_frame_options(FrameOptions {
        text_enabled: true,
        ..Default::default()
    })
}

fn press<M: MusicService>(game: &mut TestGame<M>, key: Key) {
    assert!(game.frame(&[PlatformEvent::KeyDown(key)], FRAME_DT));
}

fn idle<M: MusicService>(game: &mut TestGame<M>) {
    assert!(game.frame(&[], FRAME_DT));
}

/// Idle until the oldest tile is centred on the band, returning its column
fn wait_for_strikable<M: MusicService>(game: &mut TestGame<M>) -> Column {
    let band_center = BAND_Y + BAND_HEIGHT / 2.0;
    for _ in 0..2000 {
        if let Some(tile) = game.state().round.active_tiles().next() {
            if tile.overlaps_band() && tile.center() >= band_center {
                return tile.column();
            }
        }
        idle(game);
    }
    panic!("no tile reached the band");
}

#[test]
fn splash_menu_and_first_hit() {
    let mut game = new_game(RecordingMusic::default(), ChartSet::new(), true);
    assert_eq!(game.state().phase, GamePhase::ShowingStart);

    // Difficulty keys do nothing on the splash
    press(&mut game, Key::Digit(1));
    assert_eq!(game.state().phase, GamePhase::ShowingStart);

    press(&mut game, Key::Enter);
    assert_eq!(game.state().phase, GamePhase::ShowingMenu);
    assert!(game.sink().last.has_text("Level 1"));

    press(&mut game, Key::Digit(1));
    assert_eq!(game.state().phase, GamePhase::Playing);
    assert_eq!(game.state().round.difficulty, Difficulty::Easy);
    assert_eq!(game.music().opened, vec![PathBuf::from("easy.ogg")]);

    let column = wait_for_strikable(&mut game);
    let key = game.bindings().column_key(column);
    press(&mut game, key);

    let round = &game.state().round;
    assert_eq!(game.state().phase, GamePhase::Playing);
    assert_eq!(round.score, HIT_SCORE);
    assert!(round.flash_timers[column.index()] > 0.0);
    assert_eq!(game.sound().cues, vec![SoundCue::Note(column)]);
    assert!(game.sink().last.has_text("Score: 10"));
}

#[test]
fn miss_ends_round_and_restart_resets() {
    let mut game = new_game(RecordingMusic::default(), ChartSet::new(), false);
    press(&mut game, Key::Digit(2));
    for _ in 0..10 {
        idle(&mut game);
    }

    // Nothing is near the band yet
    press(&mut game, Key::Char('a'));
    assert_eq!(game.state().phase, GamePhase::GameOver);
    assert_eq!(game.music().stops, 1);
    assert_eq!(game.music().status(), MusicStatus::Stopped);
    assert_eq!(game.sound().cues, vec![SoundCue::Fail]);
    assert!(game.sink().last.has_text("GAME OVER"));

    // Column keys are dead after the round ends
    press(&mut game, Key::Char('s'));
    assert_eq!(game.state().round.score, 0);
    assert_eq!(game.sound().cues.len(), 1);

    press(&mut game, Key::Char('r'));
    assert_eq!(game.state().phase, GamePhase::ShowingMenu);

    press(&mut game, Key::Digit(3));
    let round = &game.state().round;
    assert_eq!(game.state().phase, GamePhase::Playing);
    assert_eq!(round.difficulty, Difficulty::Hard);
    assert_eq!(round.score, 0);
    assert_eq!(round.stars_earned, 0);
    assert_eq!(round.beat_index, 0);
    assert!(round.tiles.is_empty());
    assert!(round.spawn_timer <= FRAME_DT + 1e-6);
}

#[test]
fn unstruck_tile_ends_round() {
    let mut game = new_game(RecordingMusic::default(), ChartSet::new(), false);
    press(&mut game, Key::Digit(3));
    for _ in 0..2000 {
        if game.state().phase != GamePhase::Playing {
            break;
        }
        idle(&mut game);
    }
    assert_eq!(game.state().phase, GamePhase::GameOver);
    assert_eq!(game.sound().cues, vec![SoundCue::Fail]);
}

#[test]
fn autoplay_clears_chart() {
    let chart = BeatSchedule::parse("# three notes\n1000 0\n1500 3\n2000 5\n");
    let charts = ChartSet::new().with(Difficulty::Hard, chart);
    let mut game = new_game(SimulatedMusic::new(4.0), charts, false);

    let mut clock = FixedClock::new(FRAME_DT);
    let mut bot = Autoplay::new(KeyBindings::default(), Difficulty::Hard, 60 * 30);
    game.run(&mut clock, &mut bot);

    let state = game.state();
    assert_eq!(state.phase, GamePhase::Win);
    assert_eq!(state.round.score, 3 * HIT_SCORE);
    assert!(state.round.tiles.is_empty());
    let columns: Vec<usize> = game
        .sound()
        .cues
        .iter()
        .filter_map(|cue| match cue {
            SoundCue::Note(c) => Some(c.index()),
            _ => None,
        })
        .collect();
    assert_eq!(columns, vec![0, 3, 5]);
    assert_eq!(game.sound().cues.last(), Some(&SoundCue::Clear));
    assert!(game.sink().last.has_text("TRACK CLEARED"));
}

#[test]
fn close_stops_without_ticking() {
    let mut game = new_game(RecordingMusic::default(), ChartSet::new(), false);
    let mut clock = FixedClock::new(FRAME_DT);
    let mut events = ScriptedEvents::new(vec![
        vec![PlatformEvent::KeyDown(Key::Digit(1))],
        vec![],
        vec![PlatformEvent::KeyDown(Key::Char('a')), PlatformEvent::Close],
    ]);
    game.run(&mut clock, &mut events);

    assert_eq!(game.frames(), 2);
    assert_eq!(game.sink().frames, 2);
    assert_eq!(game.state().time_ticks, 2);
    // The press in the closing batch was never judged
    assert_eq!(game.state().phase, GamePhase::Playing);
}
