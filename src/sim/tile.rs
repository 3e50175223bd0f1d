//! Tiles, columns and target-band geometry
//!
//! Vertical coordinates grow downward from the top of the play field, and a
//! tile's `y` is its top edge.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A valid column index in `[0, NUM_COLUMNS)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Column(u8);

impl Column {
    pub fn new(index: usize) -> Option<Self> {
        (index < NUM_COLUMNS).then_some(Column(index as u8))
    }

    /// Any index, folded into range
    pub fn wrapping(index: usize) -> Self {
        Column((index % NUM_COLUMNS) as u8)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate all columns left to right
    pub fn all() -> impl Iterator<Item = Column> {
        (0..NUM_COLUMNS as u8).map(Column)
    }

    /// Left edge of the column in field coordinates
    pub fn left(self) -> f32 {
        self.index() as f32 * COLUMN_WIDTH
    }
}

impl TryFrom<u8> for Column {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Column::new(value as usize).ok_or_else(|| format!("column {value} out of range"))
    }
}

impl From<Column> for u8 {
    fn from(column: Column) -> u8 {
        column.0
    }
}

/// The fixed hit band
pub fn band_range() -> (f32, f32) {
    (BAND_Y, BAND_Y + BAND_HEIGHT)
}

/// A falling tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Spawn-order id (monotonic within a round)
    pub id: u32,
    column: Column,
    /// Top edge
    pub y: f32,
    /// Cleared by a hit or an overflow; swept at the end of the tick
    pub active: bool,
}

impl Tile {
    pub fn new(id: u32, column: Column) -> Self {
        Self {
            id,
            column,
            y: SPAWN_Y,
            active: true,
        }
    }

    #[inline]
    pub fn column(&self) -> Column {
        self.column
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + TILE_HEIGHT
    }

    /// Vertical centre
    #[inline]
    pub fn center(&self) -> f32 {
        self.y + TILE_HEIGHT / 2.0
    }

    /// Strict overlap with the target band (touching edges do not count)
    pub fn overlaps_band(&self) -> bool {
        let (top, bottom) = band_range();
        self.y < bottom && self.bottom() > top
    }

    /// Top edge has left the bottom of the field
    pub fn is_past_field(&self) -> bool {
        self.y > FIELD_HEIGHT
    }
}
