//=========================================================================
// Core
//
// Engine building blocks shared by any game built on the crate.
//
// Contents:
// - `geometry`: drawables, sprites and collision boxes
// - `layer`: the unit the engine schedules each frame
// - `resources`: image handles, loaders and the preload barrier
// - `surface`: the drawing seam and the software canvas
// - `input`: key codes, actions and the single-handler router
// - `transition`: deferred state transitions
// - `platform_bridge`: the platform ↔ logic thread contract
//
// Everything here except `platform_bridge` lives on the logic thread.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod geometry;
pub mod input;
pub mod layer;
pub(crate) mod platform_bridge;
pub mod resources;
pub mod surface;
pub mod transition;

//=== Re-exports ==========================================================
pub use geometry::{are_collided, CollideBox, Collidable, Drawable, Rect, Sprite};
pub use input::{Action, InputRouter, KeyCode};
pub use layer::{Layer, LayerState};
pub use platform_bridge::PlatformError;
pub use resources::{FileImageLoader, ImageHandle, ImageLoader, LoadError, LoadFailure, ResourceTable};
pub use surface::{Canvas, Caption, Color, RenderSurface, TextAlign, TextStyle};
pub use transition::{SharedTransitions, TransitionQueue};
