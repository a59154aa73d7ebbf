//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the logic thread via bounded
// crossbeam channels, and shows the frames the logic thread renders.
//
// Architecture:
// ```text
//  Main Thread:                      Logic Thread:
//  ┌───────────────────────────┐    ┌────────────────────┐
//  │  Winit Event Loop         │    │  EventCollector    │
//  │   ├─ KeyboardInput        │    │   ↓                │
//  │   │   └─ release → KeyUp  │    │  Game::key_up      │
//  │   ├─ RedrawRequested      │    │  Game::frame(now)  │
//  │   │   ├─ show last frame  │    │   └─ Engine::tick  │
//  │   │   └─ Frame(now ms)    │    │  Game::presentation│
//  │   └─ CloseRequested       │    │                    │
//  │       └─ WindowClosed     │    └────────────────────┘
//  │   ↓                ↑      │          ↑       │
//  │  Channel ──────────┼──────┼──────────┘       │ PresentedFrame
//  │                    └──────┼──────────────────┘
//  └───────────────────────────┘    PlatformEvent
// ```
//
// Presentation: the window owns a `pixels` surface sized to the game
// field and scaled to the window. Each redraw copies in the newest frame
// (if one arrived) and renders. The frame's caption goes to the window
// title.
//
// Frame pacing: redraws are requested at the configured frame rate from
// `about_to_wait`. A frame that does not fit in the channel is dropped;
// the next one carries a newer timestamp anyway. A key release that does
// not fit is dropped with a warning.
//
// If the logic thread is gone (game faulted or panicked) the loop exits
// on the next send.
//
//=========================================================================

//=== Submodules ==========================================================

mod keys;

//=== External Crates =====================================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::*;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::KeyCode;
use crate::core::platform_bridge::{PlatformError, PlatformEvent, PresentedFrame};

//=== WindowConfig ========================================================

/// Window and pacing settings handed over by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) fps: f64,
}

//=== Platform ============================================================

/// Window owner, event forwarder and frame presenter. Lives on the main
/// thread.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    event_sender: Sender<PlatformEvent>,
    frames: Receiver<PresentedFrame>,
    caption: Option<String>,
    failure: Option<PlatformError>,
    started: Instant,
    frame_interval: Duration,
    next_frame: Instant,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        event_sender: Sender<PlatformEvent>,
        frames: Receiver<PresentedFrame>,
        config: WindowConfig,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        let now = Instant::now();
        Self {
            window: None,
            pixels: None,
            frame_interval: Duration::from_secs_f64(1.0 / config.fps),
            config,
            event_sender,
            frames,
            caption: None,
            failure: None,
            started: now,
            next_frame: now,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running, or if the window cannot show frames.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.failure.take() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    //--- Presentation -----------------------------------------------------

    fn create_pixels(&self, window: &Arc<Window>) -> Result<Pixels<'static>, PlatformError> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(window));
        Pixels::new(self.config.width, self.config.height, surface)
            .map_err(|e| PlatformError::Presentation(e.to_string()))
    }

    /// Newest frame sent since the last redraw.
    fn take_latest_frame(&self) -> Option<PresentedFrame> {
        self.frames.try_iter().last()
    }

    /// Copies `frame` into the pixel surface and updates the title.
    fn show(&mut self, frame: PresentedFrame) {
        if frame.caption != self.caption {
            if let Some(window) = &self.window {
                window.set_title(&window_title(&self.config.title, frame.caption.as_deref()));
            }
            self.caption = frame.caption;
        }

        let Some(pixels) = &mut self.pixels else {
            return;
        };
        let target = pixels.frame_mut();
        if target.len() != frame.pixels.len() {
            warn!(
                target: "platform",
                "Dropping {}x{} frame, window shows {}x{}",
                frame.width, frame.height, self.config.width, self.config.height
            );
            return;
        }
        target.copy_from_slice(&frame.pixels);
    }

    fn render(&self) {
        if let Some(pixels) = &self.pixels {
            if let Err(e) = pixels.render() {
                warn!(target: "platform", "Frame presentation failed: {}", e);
            }
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, failure: PlatformError) {
        error!(target: "platform", "{}", failure);
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        self.failure = Some(failure);
        event_loop.exit();
    }

    //--- Forwarding -------------------------------------------------------

    /// Sends a key release. Returns `false` once the logic thread is gone.
    fn forward_key(&self, key: KeyCode) -> bool {
        trace!(target: "platform::input", "Key released: {:?}", key);
        match self.event_sender.try_send(PlatformEvent::KeyUp(key)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Logic thread busy, dropping release of {:?}", key);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Sends a frame request stamped with the time since startup.
    fn forward_frame(&self) -> bool {
        let now = self.started.elapsed().as_secs_f64() * 1000.0;
        match self.event_sender.try_send(PlatformEvent::Frame(now)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!(target: "platform", "Logic thread behind, skipping frame at {:.1}ms", now);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    fn shut_down(&self, event_loop: &ActiveEventLoop) {
        warn!(target: "platform", "Logic thread disconnected, closing window");
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

/// Window title showing `caption` after the base title.
fn window_title(base: &str, caption: Option<&str>) -> String {
    match caption {
        Some(caption) => format!("{} - {}", base, caption),
        None => base.to_string(),
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, PlatformError::Presentation(format!("window creation failed: {}", e)));
                return;
            }
        };
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        match self.create_pixels(&window) {
            Ok(pixels) => self.pixels = Some(pixels),
            Err(failure) => {
                self.fail(event_loop, failure);
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(key) = keys::released_key(key_event) {
                    if !self.forward_key(key) {
                        self.shut_down(event_loop);
                    }
                }
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(pixels) = &mut self.pixels {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        warn!(target: "platform", "Surface resize failed: {}", e);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(frame) = self.take_latest_frame() {
                    self.show(frame);
                }
                self.render();

                if !self.forward_frame() {
                    self.shut_down(event_loop);
                    return;
                }
                self.next_frame = Instant::now() + self.frame_interval;
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if Instant::now() < self.next_frame {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
