//! Error types for startup-time loading
//!
//! Nothing inside a running round returns an error: degraded resources are
//! handled by fallbacks and invalid gameplay states are unrepresentable.

use std::path::PathBuf;

use crate::assets::AssetKind;

/// Asset could not be made available
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("required {kind} asset not found: {}", path.display())]
    Missing { kind: AssetKind, path: PathBuf },
    #[error("failed to read {kind} asset {}: {source}", path.display())]
    Io {
        kind: AssetKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings file could not be loaded or is inconsistent
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
    #[error("key {0:?} is bound to more than one action")]
    DuplicateKey(String),
    #[error("expected {expected} column keys, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
}
