//=========================================================================
// Input Router
//=========================================================================
//
// Maps key releases to actions and forwards them to exactly one handler.
//
// Architecture:
//   KeyCode ──HashMap──> Action ──> handler slot (Box<dyn FnMut(A)>)
//
// The slot always holds something: `unsubscribe` puts the no-op back, so
// dispatch never has to ask whether anyone is listening. Unmapped keys
// are dropped before the handler is reached.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::trace;

//=== Internal Dependencies ===============================================

use super::action::Action;
use super::event::KeyCode;

//=== InputRouter =========================================================

type Handler<A> = Box<dyn FnMut(A)>;

/// Single-subscriber key-to-action dispatcher.
pub struct InputRouter<A: Action> {
    bindings: HashMap<KeyCode, A>,
    handler: Handler<A>,
}

impl<A: Action> InputRouter<A> {
    /// Creates a router with no bindings and the no-op handler.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            handler: Box::new(|_| {}),
        }
    }

    /// Builds a router from a DOM key-code table, e.g. `[(37, Left)]`.
    pub fn from_codes(table: &[(u32, A)]) -> Self {
        let mut router = Self::new();
        for &(code, action) in table {
            router.bind_key(KeyCode::from_code(code), action);
        }
        router
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action, replacing any previous binding.
    pub fn bind_key(&mut self, key: KeyCode, action: A) {
        self.bindings.insert(key, action);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    pub fn binding(&self, key: KeyCode) -> Option<A> {
        self.bindings.get(&key).copied()
    }

    //--- Handler Slot -----------------------------------------------------

    /// Installs `handler` as the only receiver, dropping the previous one.
    pub fn subscribe(&mut self, handler: impl FnMut(A) + 'static) {
        self.handler = Box::new(handler);
    }

    /// Restores the no-op handler.
    pub fn unsubscribe(&mut self) {
        self.handler = Box::new(|_| {});
    }

    //--- Dispatch ---------------------------------------------------------

    /// Delivers the action bound to `key`, if any.
    ///
    /// Returns the action that was delivered.
    pub fn dispatch(&mut self, key: KeyCode) -> Option<A> {
        let Some(action) = self.binding(key) else {
            trace!("Ignoring unmapped key {:?}", key);
            return None;
        };

        trace!("Dispatching {:?} for {:?}", action, key);
        (self.handler)(action);
        Some(action)
    }

    /// Same as [`dispatch`](Self::dispatch) for a raw DOM key code.
    pub fn dispatch_code(&mut self, code: u32) -> Option<A> {
        self.dispatch(KeyCode::from_code(code))
    }
}

impl<A: Action> Default for InputRouter<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
