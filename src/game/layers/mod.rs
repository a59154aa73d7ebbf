//=========================================================================
// Game Layers
//
// Registration order is draw order: background, enemies, player, menu.
//
//=========================================================================

pub mod background;
pub mod enemies;
pub mod menu;
pub mod player;

pub use background::BackgroundLayer;
pub use enemies::EnemiesLayer;
pub use menu::MenuLayer;
pub use player::PlayerLayer;
