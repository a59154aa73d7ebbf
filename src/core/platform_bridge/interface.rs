//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Types carried between the platform and logic threads.
//
//   platform ──PlatformEvent──> logic
//   platform <──PresentedFrame── logic
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;

//=== PlatformEvent =======================================================

/// Events sent from the platform thread to the logic thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PlatformEvent {
    /// A key was released.
    KeyUp(KeyCode),

    /// The window wants a new frame. Milliseconds since the runtime started.
    Frame(f64),

    /// Window close requested.
    WindowClosed,
}

//=== PresentedFrame ======================================================

/// A finished frame sent from the logic thread to the window.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PresentedFrame {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Tightly packed RGBA8 rows, `width * height * 4` bytes.
    pub(crate) pixels: Vec<u8>,
    /// Text to show alongside the frame, if any.
    pub(crate) caption: Option<String>,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(String),

    #[error("Event loop error: {0}")]
    EventLoopExecution(String),

    /// The window's pixel surface could not be created or drawn.
    #[error("Presentation failed: {0}")]
    Presentation(String),

    #[error("Logic thread failed: {0}")]
    LogicThread(String),
}
