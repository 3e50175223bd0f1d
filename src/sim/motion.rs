//! Tile movement and removal

use super::tile::Tile;

/// Move every active tile down by `speed * dt`.
///
/// Tiles that leave the bottom of the field unstruck are deactivated. Returns
/// the id of the oldest such tile, if any.
pub fn advance(tiles: &mut [Tile], speed: f32, dt: f32) -> Option<u32> {
    let mut overflow = None;
    for tile in tiles.iter_mut().filter(|t| t.active) {
        tile.y += speed * dt;
        if tile.is_past_field() {
            tile.active = false;
            overflow.get_or_insert(tile.id);
        }
    }
    overflow
}

/// Drop inactive tiles, preserving the order of the rest. Returns how many were removed.
pub fn sweep(tiles: &mut Vec<Tile>) -> usize {
    let before = tiles.len();
    tiles.retain(|t| t.active);
    before - tiles.len()
}
