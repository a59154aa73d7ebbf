//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use frogger_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder, EngineError, EnginePhase, TickStatus};

// Layers and resources
pub use crate::core::layer::{Layer, LayerState};
pub use crate::core::resources::{FileImageLoader, ImageHandle, ImageLoader, ResourceTable};

// Rendering
pub use crate::core::surface::{Canvas, Color, RenderSurface, TextAlign, TextStyle};

// Geometry
pub use crate::core::geometry::{are_collided, Collidable, CollideBox, Drawable, Sprite};

// Input
pub use crate::core::input::{Action, InputRouter, KeyCode};

// Transitions
pub use crate::core::transition::{SharedTransitions, TransitionQueue};

// Runtime
pub use crate::core::PlatformError;
pub use crate::runtime::{Game, Presentation, Runtime, RuntimeBuilder};

// Game
pub use crate::game::{Frogger, GameAction, GameConfig};
