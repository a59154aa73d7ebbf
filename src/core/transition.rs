//=========================================================================
// Transition Queue
//=========================================================================
//
// State transitions requested from inside callbacks.
//
// Input handlers and layer callbacks run while the state machine's
// pieces are borrowed, so they only record what should happen. The owner
// drains the queue at the end of the event or tick that produced it, and
// every transition completes before the next event or frame is handled.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== TransitionQueue =====================================================

/// FIFO of pending transitions.
#[derive(Debug)]
pub struct TransitionQueue<T> {
    queue: Vec<T>,
}

/// Handle given to callbacks so they can enqueue without owning the queue.
pub type SharedTransitions<T> = Rc<RefCell<TransitionQueue<T>>>;

impl<T> TransitionQueue<T> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn shared() -> SharedTransitions<T> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Queues a transition for the next boundary.
    pub fn push(&mut self, transition: T) {
        self.queue.push(transition);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all transitions in arrival order, leaving the queue empty.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.queue)
    }
}

impl<T> Default for TransitionQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
