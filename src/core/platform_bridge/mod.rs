//=========================================================================
// Platform Bridge
//=========================================================================
//
// The contract between the platform thread (winit) and the logic thread.
//
// Components:
// - `interface`: events, finished frames and errors carried across the channels
// - `event_collector`: logic-side draining of those events per tick
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformEvent, PresentedFrame};
pub use interface::PlatformError;
