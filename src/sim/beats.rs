//! Beat schedules
//!
//! A schedule is a list of spawn times parsed from a text file, one record per
//! line:
//! - `<seconds>`: a beat, column chosen at random when it spawns
//! - `<milliseconds> <column>`: a charted beat whose column is authoritative
//!
//! Lines starting with `#` are comments. Malformed records are skipped.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::tile::Column;

/// A single scheduled spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    /// Time (seconds into the track) at which the tile should reach the band
    pub time: f32,
    /// Charted column, if the record carried one
    pub column: Option<Column>,
}

impl Beat {
    pub fn at(time: f32) -> Self {
        Self { time, column: None }
    }
}

/// Ordered, immutable list of beats for one track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatSchedule {
    beats: Vec<Beat>,
}

impl BeatSchedule {
    pub fn new(mut beats: Vec<Beat>) -> Self {
        // Stable sort keeps authoring order for equal timestamps
        if beats.windows(2).any(|w| w[1].time < w[0].time) {
            log::warn!("Beat schedule out of order; sorting {} beats", beats.len());
            beats.sort_by(|a, b| a.time.total_cmp(&b.time));
        }
        Self { beats }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from bare timestamps (seconds)
    pub fn from_times(times: &[f32]) -> Self {
        Self::new(times.iter().map(|&t| Beat::at(t)).collect())
    }

    /// Load from a file. Missing or unreadable files give an empty schedule.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let schedule = Self::parse(&text);
                log::info!("Loaded {} beats from {}", schedule.len(), path.display());
                schedule
            }
            Err(e) => {
                log::warn!(
                    "Beat schedule {} unavailable ({}); using interval spawning",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    /// Parse schedule text, skipping malformed records
    pub fn parse(text: &str) -> Self {
        let mut beats = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_record(line) {
                Some(beat) => beats.push(beat),
                None => log::warn!("Skipping malformed beat record {}: {:?}", line_no + 1, line),
            }
        }
        Self::new(beats)
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Beat> {
        self.beats.get(index)
    }

    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }

    /// Time of the final beat
    pub fn last_time(&self) -> Option<f32> {
        self.beats.last().map(|b| b.time)
    }

    /// True once the cursor has consumed every beat
    pub fn is_exhausted(&self, cursor: usize) -> bool {
        cursor >= self.beats.len()
    }

    /// Count beats from `cursor` onward that are due at `current_time`.
    ///
    /// A beat at `T` is due once `current_time >= T - fall_duration`, so the
    /// tile spawned for it reaches the band centre at `T`.
    pub fn due_count(&self, cursor: usize, current_time: f32, fall_duration: f32) -> usize {
        self.beats
            .get(cursor..)
            .unwrap_or(&[])
            .iter()
            .take_while(|beat| current_time >= beat.time - fall_duration)
            .count()
    }
}

fn parse_record(line: &str) -> Option<Beat> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [secs] => {
            let time = secs.parse::<f32>().ok()?;
            valid_time(time).then(|| Beat::at(time))
        }
        [millis, column] => {
            let time = millis.parse::<f32>().ok()? / 1000.0;
            let column = Column::new(column.parse::<usize>().ok()?)?;
            valid_time(time).then_some(Beat {
                time,
                column: Some(column),
            })
        }
        _ => None,
    }
}

fn valid_time(time: f32) -> bool {
    time.is_finite() && time >= 0.0
}
