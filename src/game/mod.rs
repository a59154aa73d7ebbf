//=========================================================================
// Game
//
// The arcade game built on the engine: cross the stone rows without
// touching a bug.
//
// Layers, bottom to top:
//   background ─ enemies ─ player ─ menu
//
// `Frogger` owns the engine, the input router and the game state, and
// moves between the menu and play in response to transitions queued by
// input handlers and the collision callback.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod config;
pub mod content;
pub mod entity;
pub mod frogger;
pub mod layers;

//=== Re-exports ==========================================================
pub use config::GameConfig;
pub use entity::{Entity, EntityKind, SharedEntity};
pub use frogger::{Frogger, GameState, Phase};

use crate::core::input::Action;

//=== Shared Vocabulary ===================================================

/// Everything a key can mean in this game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Left,
    Up,
    Right,
    Down,
    Select,
}

impl Action for GameAction {}

/// How the last run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

/// Requested state change, applied by `Frogger` at the next boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    EnterMenu(Option<Outcome>),
    StartPlaying(usize),
}
