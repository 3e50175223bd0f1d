//! Hit/miss judgement for column key presses

use serde::{Deserialize, Serialize};

use super::state::RoundState;
use super::tile::Column;

/// Outcome of a key press during play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Judgement {
    /// A tile in the band was struck
    Hit { column: Column, tile_id: u32 },
    /// Column key pressed with nothing in the band
    Miss { column: Column },
    /// Key not mapped to a column
    Ignored,
}

/// Judge a key press against the current round.
///
/// The oldest active tile in the column that overlaps the band is struck.
/// Scoring is applied here; phase changes are left to the caller.
pub fn on_key_press(round: &mut RoundState, column: Option<Column>) -> Judgement {
    let Some(column) = column else {
        return Judgement::Ignored;
    };

    let target = round
        .tiles
        .iter_mut()
        .find(|t| t.active && t.column() == column && t.overlaps_band());

    let Some(tile) = target else {
        log::debug!("Miss in column {}", column.index());
        return Judgement::Miss { column };
    };

    tile.active = false;
    let tile_id = tile.id;
    if round.register_hit() {
        log::info!("Star earned ({} total)", round.stars_earned);
    }
    log::debug!(
        "Hit tile {} in column {} (score {})",
        tile_id,
        column.index(),
        round.score
    );
    Judgement::Hit { column, tile_id }
}
