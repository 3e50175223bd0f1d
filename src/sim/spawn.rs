//! Tile spawning
//!
//! Two policies, fixed for the whole round:
//! - `Interval`: one tile every `spawn_interval` seconds (free-run)
//! - `BeatSync`: one tile per schedule beat, timed so it reaches the band on the beat

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::beats::BeatSchedule;
use super::difficulty::Difficulty;
use super::state::RoundState;
use super::tile::Column;
use crate::consts::{NUM_COLUMNS, TRAVEL_DISTANCE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    Interval { interval: f32 },
    BeatSync,
}

impl SpawnPolicy {
    /// Beat-synced when the difficulty has a chart, free-run otherwise
    pub fn for_round(difficulty: Difficulty, schedule: &BeatSchedule) -> Self {
        if schedule.is_empty() {
            SpawnPolicy::Interval {
                interval: difficulty.settings().spawn_interval,
            }
        } else {
            SpawnPolicy::BeatSync
        }
    }
}

/// Seconds for a tile to travel from spawn to the band centre
pub fn fall_duration(speed: f32) -> f32 {
    TRAVEL_DISTANCE / speed
}

/// Uniformly random column
pub fn random_column<R: Rng + ?Sized>(rng: &mut R) -> Column {
    Column::wrapping(rng.random_range(0..NUM_COLUMNS))
}

/// Run the round's spawn policy for one tick. Returns the number of tiles spawned.
pub fn run<R: Rng + ?Sized>(round: &mut RoundState, rng: &mut R, speed: f32, dt: f32) -> usize {
    match round.policy {
        SpawnPolicy::Interval { interval } => spawn_on_interval(round, rng, interval, dt),
        SpawnPolicy::BeatSync => spawn_due_beats(round, rng, speed),
    }
}

fn spawn_on_interval<R: Rng + ?Sized>(
    round: &mut RoundState,
    rng: &mut R,
    interval: f32,
    dt: f32,
) -> usize {
    round.spawn_timer += dt;
    if round.spawn_timer < interval {
        return 0;
    }
    // Full reset: overshoot is discarded
    round.spawn_timer = 0.0;
    let column = random_column(rng);
    let id = round.spawn_tile(column);
    log::debug!("Spawned tile {} in column {}", id, column.index());
    1
}

fn spawn_due_beats<R: Rng + ?Sized>(round: &mut RoundState, rng: &mut R, speed: f32) -> usize {
    let now = round.song_clock.position();
    let due = round
        .schedule
        .due_count(round.beat_index, now, fall_duration(speed));

    for _ in 0..due {
        let charted = round.schedule.get(round.beat_index).and_then(|b| b.column);
        let column = charted.unwrap_or_else(|| random_column(rng));
        let id = round.spawn_tile(column);
        log::debug!(
            "Spawned tile {} in column {} for beat {} at {:.2}s",
            id,
            column.index(),
            round.beat_index,
            now
        );
        round.beat_index += 1;
    }
    due
}
