//=========================================================================
// Action Trait
//=========================================================================
//
// Game-defined actions routed by the engine and interpreted by the game.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// Actions are the small closed vocabulary handlers receive (Left, Up,
/// Select...). The router maps keys to them without interpreting them.
///
/// # Example
///
/// ```
/// use frogger_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MenuAction { Previous, Next, Confirm }
///
/// impl Action for MenuAction {}
/// ```
pub trait Action: 'static + Copy + Eq + Hash + Debug {}
