//! Per-frame simulation step and phase transitions
//!
//! Each phase has one handler that decides the next phase and the side
//! effects to run. Round resets and column flashes are applied here; music
//! and sound commands are returned to the caller.

use super::clock::MusicSample;
use super::difficulty::Difficulty;
use super::judge::{self, Judgement};
use super::motion;
use super::spawn;
use super::state::{GamePhase, GameState, RoundState};
use super::tile::Column;
use crate::audio::SoundCue;

/// A key press after binding resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Column(Column),
    Select(Difficulty),
    Confirm,
    Restart,
    Unmapped,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses in arrival order
    pub presses: Vec<KeyPress>,
    /// Music service reading taken this frame
    pub music: MusicSample,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ResetRound(Difficulty),
    StartMusic(Difficulty),
    StopMusic,
    PlayCue(SoundCue),
    Flash(Column),
}

impl Command {
    /// Handled by the host rather than the simulation
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Command::StartMusic(_) | Command::StopMusic | Command::PlayCue(_)
        )
    }
}

/// Next phase plus the commands to run on the way there
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: GamePhase,
    pub commands: Vec<Command>,
}

impl Transition {
    pub fn stay(phase: GamePhase) -> Self {
        Self {
            next: phase,
            commands: Vec::new(),
        }
    }

    fn to(next: GamePhase, commands: Vec<Command>) -> Self {
        Self { next, commands }
    }

    fn game_over() -> Self {
        Self::to(
            GamePhase::GameOver,
            vec![Command::StopMusic, Command::PlayCue(SoundCue::Fail)],
        )
    }

    fn win() -> Self {
        Self::to(
            GamePhase::Win,
            vec![Command::StopMusic, Command::PlayCue(SoundCue::Clear)],
        )
    }
}

/// Advance the game by one frame. Returns the commands the host must run.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<Command> {
    state.time_ticks += 1;
    let mut external = Vec::new();

    for &press in &input.presses {
        let transition = match state.phase {
            GamePhase::ShowingStart => on_start(press),
            GamePhase::ShowingMenu => on_menu(press),
            GamePhase::Playing => on_playing_press(&mut state.round, press),
            GamePhase::GameOver | GamePhase::Win => on_finished(state.phase, press),
        };
        apply(state, transition, &mut external);
    }

    if state.phase == GamePhase::Playing {
        let transition = update_playing(state, input.music, dt);
        apply(state, transition, &mut external);
    }

    external
}

fn on_start(press: KeyPress) -> Transition {
    match press {
        KeyPress::Confirm => Transition::to(GamePhase::ShowingMenu, Vec::new()),
        _ => Transition::stay(GamePhase::ShowingStart),
    }
}

fn on_menu(press: KeyPress) -> Transition {
    match press {
        KeyPress::Select(difficulty) => Transition::to(
            GamePhase::Playing,
            vec![
                Command::ResetRound(difficulty),
                Command::StartMusic(difficulty),
            ],
        ),
        _ => Transition::stay(GamePhase::ShowingMenu),
    }
}

fn on_playing_press(round: &mut RoundState, press: KeyPress) -> Transition {
    let column = match press {
        KeyPress::Column(column) => Some(column),
        _ => None,
    };
    match judge::on_key_press(round, column) {
        Judgement::Hit { column, .. } => Transition::to(
            GamePhase::Playing,
            vec![
                Command::Flash(column),
                Command::PlayCue(SoundCue::Note(column)),
            ],
        ),
        Judgement::Miss { .. } => Transition::game_over(),
        Judgement::Ignored => Transition::stay(GamePhase::Playing),
    }
}

fn on_finished(phase: GamePhase, press: KeyPress) -> Transition {
    match press {
        KeyPress::Restart => Transition::to(GamePhase::ShowingMenu, Vec::new()),
        _ => Transition::stay(phase),
    }
}

fn update_playing(state: &mut GameState, music: MusicSample, dt: f32) -> Transition {
    let (round, rng) = state.round_and_rng();

    round.song_clock.update(dt, music);
    round.decay_timers(dt);

    // Speed follows the score every tick
    let speed = round.fall_speed();
    spawn::run(round, rng, speed, dt);
    let overflow = motion::advance(&mut round.tiles, speed, dt);
    motion::sweep(&mut round.tiles);

    if let Some(id) = overflow {
        log::info!("Tile {} passed the band unstruck", id);
        return Transition::game_over();
    }
    if round.is_chart_complete(music) {
        return Transition::win();
    }
    Transition::stay(GamePhase::Playing)
}

fn apply(state: &mut GameState, transition: Transition, external: &mut Vec<Command>) {
    if transition.next != state.phase {
        log::info!(
            "Phase {} -> {} (score {})",
            state.phase.as_str(),
            transition.next.as_str(),
            state.round.score
        );
        state.phase = transition.next;
    }
    for command in transition.commands {
        match command {
            Command::ResetRound(difficulty) => state.reset_round(difficulty),
            Command::Flash(column) => state.round.flash(column),
            _ => external.push(command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::beats::BeatSchedule;
    use crate::sim::state::ChartSet;

    fn col(i: usize) -> Column {
        Column::new(i).unwrap()
    }

    fn press(p: KeyPress) -> TickInput {
        TickInput {
            presses: vec![p],
            music: MusicSample::playing(0.0),
        }
    }

    fn playing_state(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(42, ChartSet::new(), false);
        let cmds = tick(&mut state, &press(KeyPress::Select(difficulty)), 0.0);
        assert_eq!(cmds, vec![Command::StartMusic(difficulty)]);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn put_in_band(state: &mut GameState, column: Column) {
        state.round.spawn_tile(column);
        let tile = state.round.tiles.last_mut().unwrap();
        tile.y = BAND_Y + BAND_HEIGHT / 2.0 - TILE_HEIGHT / 2.0;
    }

    #[test]
    fn test_start_to_menu_requires_confirm() {
        let mut state = GameState::new(1, ChartSet::new(), true);
        tick(&mut state, &press(KeyPress::Select(Difficulty::Easy)), SIM_DT);
        assert_eq!(state.phase, GamePhase::ShowingStart);
        tick(&mut state, &press(KeyPress::Confirm), SIM_DT);
        assert_eq!(state.phase, GamePhase::ShowingMenu);
    }

    #[test]
    fn test_menu_ignores_other_keys() {
        let mut state = GameState::new(1, ChartSet::new(), false);
        for p in [KeyPress::Confirm, KeyPress::Restart, KeyPress::Column(col(0)), KeyPress::Unmapped] {
            assert!(tick(&mut state, &press(p), SIM_DT).is_empty());
            assert_eq!(state.phase, GamePhase::ShowingMenu);
        }
    }

    #[test]
    fn test_hit_flashes_and_cues() {
        let mut state = playing_state(Difficulty::Medium);
        put_in_band(&mut state, col(3));
        let cmds = tick(&mut state, &press(KeyPress::Column(col(3))), 0.0);
        assert_eq!(cmds, vec![Command::PlayCue(SoundCue::Note(col(3)))]);
        assert_eq!(state.round.flash_timers[3], FLASH_DURATION);
        assert_eq!(state.round.score, HIT_SCORE);
        // Struck tile swept in the same tick
        assert!(state.round.tiles.is_empty());
    }

    #[test]
    fn test_miss_ends_round_once() {
        let mut state = playing_state(Difficulty::Medium);
        put_in_band(&mut state, col(1));
        let input = TickInput {
            presses: vec![KeyPress::Column(col(0)), KeyPress::Column(col(1))],
            music: MusicSample::playing(0.1),
        };
        let cmds = tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            cmds,
            vec![Command::StopMusic, Command::PlayCue(SoundCue::Fail)]
        );
        // The second press arrived after game over and scored nothing
        assert_eq!(state.round.score, 0);

        // Holding game over emits nothing further
        let cmds = tick(&mut state, &press(KeyPress::Column(col(1))), SIM_DT);
        assert!(cmds.is_empty());
        assert_eq!(state.round.score, 0);
    }

    #[test]
    fn test_unmapped_key_while_playing_is_harmless() {
        let mut state = playing_state(Difficulty::Medium);
        tick(&mut state, &press(KeyPress::Unmapped), 0.0);
        tick(&mut state, &press(KeyPress::Confirm), 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_overflow_ends_round() {
        let mut state = playing_state(Difficulty::Easy);
        state.round.spawn_tile(col(2));
        state.round.tiles[0].y = FIELD_HEIGHT - 1.0;

        let cmds = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(cmds.contains(&Command::StopMusic));
        assert!(state.round.tiles.is_empty());

        // Stale press on the same column does not score
        tick(&mut state, &press(KeyPress::Column(col(2))), SIM_DT);
        assert_eq!(state.round.score, 0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = playing_state(Difficulty::Hard);
        for i in 0..12 {
            put_in_band(&mut state, col(i % NUM_COLUMNS));
            tick(&mut state, &press(KeyPress::Column(col(i % NUM_COLUMNS))), 0.0);
        }
        state.round.spawn_tile(col(0));
        state.round.spawn_timer = 0.5;
        assert_eq!(state.round.stars_earned, 1);

        tick(&mut state, &press(KeyPress::Column(col(5))), 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        tick(&mut state, &press(KeyPress::Restart), 0.0);
        assert_eq!(state.phase, GamePhase::ShowingMenu);
        tick(&mut state, &press(KeyPress::Select(Difficulty::Easy)), 0.0);
        assert_eq!(state.phase, GamePhase::Playing);

        let round = &state.round;
        assert_eq!(round.score, 0);
        assert_eq!(round.stars_earned, 0);
        assert!(round.tiles.is_empty());
        assert_eq!(round.spawn_timer, 0.0);
        assert_eq!(round.beat_index, 0);
        assert_eq!(round.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_ten_hits_across_columns() {
        let mut state = playing_state(Difficulty::Easy);
        for i in 0..10 {
            put_in_band(&mut state, col(i % NUM_COLUMNS));
            tick(&mut state, &press(KeyPress::Column(col(i % NUM_COLUMNS))), 0.0);
        }
        assert_eq!(state.round.score, 100);
        assert_eq!(state.round.stars_earned, 1);
        assert!(state.round.tiles.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_interval_spawning_while_playing() {
        let mut state = playing_state(Difficulty::Easy);
        let input = TickInput::default();
        // 1.5s at 60 Hz plus a margin
        for _ in 0..95 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.round.tiles.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_win_after_chart_cleared() {
        let charts = ChartSet::new().with(Difficulty::Medium, BeatSchedule::from_times(&[0.0]));
        let mut state = GameState::new(5, charts, false);
        tick(&mut state, &press(KeyPress::Select(Difficulty::Medium)), 0.0);

        // The single beat is due immediately
        tick(&mut state, &TickInput { presses: vec![], music: MusicSample::playing(0.01) }, 0.0);
        assert_eq!(state.round.tiles.len(), 1);
        assert_eq!(state.round.beat_index, 1);

        // Move it into the band and strike it after the music ends
        state.round.tiles[0].y = BAND_Y;
        let column = state.round.tiles[0].column();
        let cmds = tick(
            &mut state,
            &TickInput {
                presses: vec![KeyPress::Column(column)],
                music: MusicSample::stopped(),
            },
            0.0,
        );
        assert_eq!(state.phase, GamePhase::Win);
        assert!(cmds.contains(&Command::PlayCue(SoundCue::Clear)));

        tick(&mut state, &press(KeyPress::Restart), 0.0);
        assert_eq!(state.phase, GamePhase::ShowingMenu);
    }

    #[test]
    fn test_no_win_while_tiles_remain() {
        let charts = ChartSet::new().with(Difficulty::Medium, BeatSchedule::from_times(&[0.0]));
        let mut state = GameState::new(5, charts, false);
        tick(&mut state, &press(KeyPress::Select(Difficulty::Medium)), 0.0);
        tick(&mut state, &TickInput { presses: vec![], music: MusicSample::stopped() }, SIM_DT);
        assert_eq!(state.round.tiles.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_state(Difficulty::Hard);
        let mut b = playing_state(Difficulty::Hard);
        let input = TickInput::default();
        for _ in 0..200 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        let cols = |s: &GameState| s.round.tiles.iter().map(|t| t.column()).collect::<Vec<_>>();
        assert_eq!(cols(&a), cols(&b));
        assert_eq!(a.phase, b.phase);
    }

    const SIM_DT: f32 = FRAME_DT;
}
