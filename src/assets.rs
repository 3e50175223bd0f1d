//! Asset availability and load policy
//!
//! Every asset kind has a fixed policy. A configured `Required` asset that is
//! missing aborts startup; a missing `Optional` asset degrades the game:
//! - font: no text is drawn
//! - music: silent round, beat pacing from elapsed time
//! - beat schedule: interval spawning
//!
//! Unconfigured (None) paths are never an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AssetError;
use crate::sim::{BeatSchedule, ChartSet, Difficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Font,
    MenuBackground,
    StarIcon,
    Music,
    BeatSchedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPolicy {
    Required,
    Optional,
}

impl AssetKind {
    pub fn policy(self) -> AssetPolicy {
        match self {
            AssetKind::MenuBackground | AssetKind::StarIcon => AssetPolicy::Required,
            AssetKind::Font | AssetKind::Music | AssetKind::BeatSchedule => AssetPolicy::Optional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Font => "font",
            AssetKind::MenuBackground => "menu background",
            AssetKind::StarIcon => "star icon",
            AssetKind::Music => "music",
            AssetKind::BeatSchedule => "beat schedule",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-difficulty file paths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackPaths {
    pub easy: Option<PathBuf>,
    pub medium: Option<PathBuf>,
    pub hard: Option<PathBuf>,
}

impl TrackPaths {
    pub fn get(&self, difficulty: Difficulty) -> Option<&Path> {
        match difficulty {
            Difficulty::Easy => self.easy.as_deref(),
            Difficulty::Medium => self.medium.as_deref(),
            Difficulty::Hard => self.hard.as_deref(),
        }
    }
}

/// Asset locations from settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub font: Option<PathBuf>,
    pub menu_background: Option<PathBuf>,
    pub star_icon: Option<PathBuf>,
    pub music: TrackPaths,
    pub beats: TrackPaths,
}

/// What survived startup checks
#[derive(Debug, Clone, Default)]
pub struct LoadedAssets {
    pub text_enabled: bool,
    pub menu_background: bool,
    pub star_icon: bool,
    pub charts: ChartSet,
}

/// Check one asset against its policy. Ok(true) = present, Ok(false) = degraded.
pub fn check(kind: AssetKind, path: Option<&Path>) -> Result<bool, AssetError> {
    let Some(path) = path else {
        return Ok(false);
    };
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(true),
        Ok(_) => missing(kind, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => missing(kind, path),
        Err(source) => match kind.policy() {
            AssetPolicy::Required => Err(AssetError::Io {
                kind,
                path: path.to_path_buf(),
                source,
            }),
            AssetPolicy::Optional => {
                log::warn!("Optional {} asset {} unreadable: {}", kind, path.display(), source);
                Ok(false)
            }
        },
    }
}

fn missing(kind: AssetKind, path: &Path) -> Result<bool, AssetError> {
    match kind.policy() {
        AssetPolicy::Required => Err(AssetError::Missing {
            kind,
            path: path.to_path_buf(),
        }),
        AssetPolicy::Optional => {
            log::warn!("Optional {} asset {} missing; continuing without it", kind, path.display());
            Ok(false)
        }
    }
}

/// Verify every configured asset and load the beat charts.
///
/// Fails before any frame is produced if a required asset is missing.
pub fn load(paths: &AssetPaths) -> Result<LoadedAssets, AssetError> {
    let text_enabled = check(AssetKind::Font, paths.font.as_deref())?;
    let menu_background = check(AssetKind::MenuBackground, paths.menu_background.as_deref())?;
    let star_icon = check(AssetKind::StarIcon, paths.star_icon.as_deref())?;

    let mut charts = ChartSet::new();
    for difficulty in Difficulty::ALL {
        check(AssetKind::Music, paths.music.get(difficulty))?;
        if let Some(path) = paths.beats.get(difficulty) {
            charts = charts.with(difficulty, BeatSchedule::load(path));
        }
    }

    if !text_enabled {
        log::warn!("No font available; text will not be drawn");
    }

    Ok(LoadedAssets {
        text_enabled,
        menu_background,
        star_icon,
        charts,
    })
}
