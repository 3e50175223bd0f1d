//! Difficulty levels and their base tuning

use serde::{Deserialize, Serialize};

/// Selectable difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Base tuning for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Fall speed at score 0 (px/s)
    pub tile_speed: f32,
    /// Seconds between spawns in free-run mode
    pub spawn_interval: f32,
}

impl Difficulty {
    /// All levels in menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                tile_speed: 150.0,
                spawn_interval: 1.5,
            },
            Difficulty::Medium => DifficultySettings {
                tile_speed: 250.0,
                spawn_interval: 1.2,
            },
            Difficulty::Hard => DifficultySettings {
                tile_speed: 400.0,
                spawn_interval: 0.9,
            },
        }
    }

    /// Position in `ALL`
    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Level 1",
            Difficulty::Medium => "Level 2",
            Difficulty::Hard => "Level 3",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "medium" | "med" | "2" => Some(Difficulty::Medium),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
