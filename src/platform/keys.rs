//=========================================================================
// Key Mapping
//=========================================================================
//
// Converts Winit keyboard events to engine key codes.
//
// Only releases are forwarded, and auto-repeat is ignored. Keys without
// an engine code (letters, F13-F24, media keys, IME) are filtered out here.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;

//=== Key Conversion ======================================================

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,
            ArrowUp => KeyCode::ArrowUp,
            Space => KeyCode::Space,
            F12 => KeyCode::F12,

            //--- Fallback -----------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

//=== Release Filtering ===================================================

/// The engine key released by `event`, if it is a fresh release of a
/// mapped key.
pub(crate) fn released_key(event: &KeyEvent) -> Option<KeyCode> {
    if event.repeat {
        return None;
    }
    released_physical_key(event.physical_key, event.state)
}

fn released_physical_key(physical_key: PhysicalKey, state: ElementState) -> Option<KeyCode> {
    if state != ElementState::Released {
        return None;
    }

    let key = match physical_key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        PhysicalKey::Unidentified(_) => return None,
    };

    (key != KeyCode::Unidentified).then_some(key)
}

//=========================================================================
// Unit Tests
//=========================================================================
