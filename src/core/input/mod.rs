//=========================================================================
// Input
//
// Keyboard input from platform key codes to game actions.
//
// Flow:
//   platform KeyUp(KeyCode) ─> InputRouter ─> Action ─> focused handler
//
// The router belongs to the logic thread; nothing here is shared across
// threads.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod action;
pub mod event;
pub mod router;

//=== Re-exports ==========================================================
pub use action::Action;
pub use event::KeyCode;
pub use router::InputRouter;
