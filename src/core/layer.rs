//=========================================================================
// Layer
//=========================================================================
//
// The engine's unit of composition.
//
// Lifecycle:
// ```text
//   Registered ──start()──> ResourcesPending ──barrier──> Loaded
//                                                           │
//                              {running, paused} × {visible, hidden}
// ```
//
// `on_load` fires once for every layer when the engine-wide barrier
// releases. The `running` / `visible` flags are plain booleans read by
// the engine when it reaches the layer in a frame.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::resources::ResourceTable;
use crate::core::surface::RenderSurface;
use crate::engine::EngineError;

//=== LayerState ==========================================================

/// Name, resource needs and activity flags shared by every layer.
///
/// Both flags start `false`; the layer or its owner flips them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerState {
    pub name: String,
    pub required_images: Vec<String>,
    pub running: bool,
    pub visible: bool,
}

impl LayerState {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_required_images<I, U>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        self.required_images = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }
}

//=== Layer Trait =========================================================

/// Lifecycle hooks driven by the engine.
///
/// # Example
///
/// ```
/// use frogger_engine::prelude::*;
///
/// struct Backdrop {
///     state: LayerState,
/// }
///
/// impl Layer for Backdrop {
///     fn state(&self) -> &LayerState { &self.state }
///     fn state_mut(&mut self) -> &mut LayerState { &mut self.state }
///
///     fn on_load(&mut self, _resources: &ResourceTable) -> Result<(), EngineError> {
///         self.state.show();
///         Ok(())
///     }
///
///     fn update(&mut self, _now: f64) {}
///
///     fn draw(&self, surface: &mut dyn RenderSurface) {
///         let (w, h) = (surface.width() as f32, surface.height() as f32);
///         surface.fill_rect(0.0, 0.0, w, h, Color::BLACK);
///     }
/// }
/// ```
pub trait Layer {
    fn state(&self) -> &LayerState;

    fn state_mut(&mut self) -> &mut LayerState;

    /// Runs once, after every image required by any registered layer
    /// has loaded.
    fn on_load(&mut self, resources: &ResourceTable) -> Result<(), EngineError>;

    /// Called each frame while `running`. `now` is in milliseconds.
    fn update(&mut self, now: f64);

    /// Called each frame while `visible`.
    fn draw(&self, surface: &mut dyn RenderSurface);

    fn name(&self) -> &str {
        &self.state().name
    }

    fn is_running(&self) -> bool {
        self.state().running
    }

    fn is_visible(&self) -> bool {
        self.state().visible
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
