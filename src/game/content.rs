//=========================================================================
// Game Content
//=========================================================================
//
// Image URLs, the tile map and the keyboard table.
//
//=========================================================================

use super::GameAction;

//=== Images ==============================================================

pub const WATER_BLOCK: &str = "images/water-block.png";
pub const STONE_BLOCK: &str = "images/stone-block.png";
pub const GRASS_BLOCK: &str = "images/grass-block.png";
pub const ENEMY_BUG: &str = "images/enemy-bug.png";
pub const SELECTOR: &str = "images/Selector.png";

/// Playable characters, in menu order.
pub const CHARACTERS: [&str; 5] = [
    "images/char-boy.png",
    "images/char-cat-girl.png",
    "images/char-horn-girl.png",
    "images/char-pink-girl.png",
    "images/char-princess-girl.png",
];

//=== Tile Map ============================================================

/// Tile image per grid row, top to bottom: water, three stone, two grass.
pub const ROW_TILES: [&str; 6] = [
    WATER_BLOCK,
    STONE_BLOCK,
    STONE_BLOCK,
    STONE_BLOCK,
    GRASS_BLOCK,
    GRASS_BLOCK,
];

/// Distinct tile images, in first-use order.
pub fn tile_images() -> Vec<&'static str> {
    let mut urls: Vec<&'static str> = Vec::new();
    for url in ROW_TILES {
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

//=== Key Table ===========================================================

/// DOM key code → action.
pub const KEY_TABLE: [(u32, GameAction); 5] = [
    (32, GameAction::Select),
    (37, GameAction::Left),
    (38, GameAction::Up),
    (39, GameAction::Right),
    (40, GameAction::Down),
];
