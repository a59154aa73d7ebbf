//=========================================================================
// Event Collector
//=========================================================================
//
// Logic-side draining of platform events with bounded polling.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → (keys, latest frame) → TickControl
//
// Key releases are kept in arrival order. Frame requests are coalesced:
// only the newest timestamp of a batch is kept.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::KeyCode;

//=== TickControl =========================================================

/// Logic loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events with bounded polling.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    keys: Vec<KeyCode>,
    frame: Option<f64>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            keys: Vec::with_capacity(8),
            frame: None,
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_EVENTS_PER_FRAME: usize = 100;
        const IDLE_SLEEP_MS: u64 = 2;

        self.keys.clear();
        self.frame = None;
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "runtime", "Event queue backlog: drained {} events this tick", drained);
        }

        if drained == 0 {
            thread::sleep(Duration::from_millis(IDLE_SLEEP_MS));
        }

        TickControl::Continue
    }

    /// Key releases collected this tick, oldest first.
    pub(crate) fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Newest frame timestamp collected this tick.
    pub(crate) fn frame(&self) -> Option<f64> {
        self.frame
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::KeyUp(key) => {
                self.keys.push(key);
                TickControl::Continue
            }
            PlatformEvent::Frame(now) => {
                if let Some(skipped) = self.frame.replace(now) {
                    trace!(target: "runtime", "Coalescing frame at {:.1}ms", skipped);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
