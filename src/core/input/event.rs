//=========================================================================
// Key Codes
//
// The keys the game reacts to, in a platform-independent form.
//
// Two sources feed this type:
// - the platform layer converts Winit physical keys (see platform)
// - hosts with DOM-style integer key codes use `KeyCode::from_code`
//
// Only key releases reach the game, so there is no pressed/held state
// here.
//
//=========================================================================

//=== KeyCode =============================================================

/// Keyboard key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Arrow Keys -------------------------------------------------------
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,

    //--- Special Keys -----------------------------------------------------
    Space,
    F12,

    /// Anything not listed above.
    Unidentified,
}

impl KeyCode {
    /// Converts a DOM `keyCode` value (e.g. 37 for the left arrow).
    pub fn from_code(code: u32) -> Self {
        match code {
            32 => Self::Space,
            37 => Self::ArrowLeft,
            38 => Self::ArrowUp,
            39 => Self::ArrowRight,
            40 => Self::ArrowDown,
            123 => Self::F12,
            _ => Self::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
