//! Key identifiers and bindings

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::NUM_COLUMNS;
use crate::error::ConfigError;
use crate::sim::{Column, Difficulty, KeyPress};

/// A physical key as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Letter key, stored lowercase
    Char(char),
    Digit(u8),
    Enter,
    Escape,
    Space,
}

impl Key {
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        match lower.as_str() {
            "enter" | "return" => return Some(Key::Enter),
            "escape" | "esc" => return Some(Key::Escape),
            "space" => return Some(Key::Space),
            _ => {}
        }
        let mut chars = lower.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => Some(Key::Char(c)),
            (Some(c), None) if c.is_ascii_digit() => Some(Key::Digit(c as u8 - b'0')),
            _ => None,
        }
    }

    /// Short label drawn on tiles and prompts
    pub fn label(&self) -> String {
        match self {
            Key::Char(c) => c.to_ascii_uppercase().to_string(),
            Key::Digit(d) => d.to_string(),
            Key::Enter => "ENTER".to_string(),
            Key::Escape => "ESC".to_string(),
            Key::Space => "SPACE".to_string(),
        }
    }
}

/// Key names as stored in settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindingConfig {
    /// One key per column, left to right
    pub columns: Vec<String>,
    pub easy: String,
    pub medium: String,
    pub hard: String,
    pub confirm: String,
    pub restart: String,
}

impl Default for KeyBindingConfig {
    fn default() -> Self {
        Self {
            columns: ["a", "s", "d", "f", "j", "k"].map(String::from).to_vec(),
            easy: "1".to_string(),
            medium: "2".to_string(),
            hard: "3".to_string(),
            confirm: "enter".to_string(),
            restart: "r".to_string(),
        }
    }
}

/// Resolved key map. Every key maps to at most one action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    actions: HashMap<Key, KeyPress>,
    column_keys: Vec<Key>,
    select_keys: [Key; 3],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_config(&KeyBindingConfig::default())
            .unwrap_or_else(|e| unreachable!("default key bindings are valid: {e}"))
    }
}

impl KeyBindings {
    pub fn from_config(config: &KeyBindingConfig) -> Result<Self, ConfigError> {
        if config.columns.len() != NUM_COLUMNS {
            return Err(ConfigError::ColumnCount {
                expected: NUM_COLUMNS,
                found: config.columns.len(),
            });
        }

        let mut bindings = Self {
            actions: HashMap::new(),
            column_keys: Vec::with_capacity(NUM_COLUMNS),
            select_keys: [Key::Digit(1), Key::Digit(2), Key::Digit(3)],
        };

        for (column, name) in Column::all().zip(&config.columns) {
            let key = bindings.bind(name, KeyPress::Column(column))?;
            bindings.column_keys.push(key);
        }
        for (difficulty, name) in Difficulty::ALL
            .into_iter()
            .zip([&config.easy, &config.medium, &config.hard])
        {
            let key = bindings.bind(name, KeyPress::Select(difficulty))?;
            bindings.select_keys[difficulty.index()] = key;
        }
        bindings.bind(&config.confirm, KeyPress::Confirm)?;
        bindings.bind(&config.restart, KeyPress::Restart)?;

        Ok(bindings)
    }

    fn bind(&mut self, name: &str, action: KeyPress) -> Result<Key, ConfigError> {
        let key = Key::from_name(name).ok_or_else(|| ConfigError::UnknownKey(name.to_string()))?;
        if self.actions.insert(key, action).is_some() {
            return Err(ConfigError::DuplicateKey(name.to_string()));
        }
        Ok(key)
    }

    /// Map a key to its action; unbound keys resolve to `Unmapped`
    pub fn resolve(&self, key: Key) -> KeyPress {
        self.actions.get(&key).copied().unwrap_or(KeyPress::Unmapped)
    }

    pub fn column_key(&self, column: Column) -> Key {
        self.column_keys[column.index()]
    }

    pub fn select_key(&self, difficulty: Difficulty) -> Key {
        self.select_keys[difficulty.index()]
    }

    /// Key that resolves to the given action, if any
    pub fn key_for(&self, action: KeyPress) -> Option<Key> {
        self.actions
            .iter()
            .find(|(_, a)| **a == action)
            .map(|(k, _)| *k)
    }
}
