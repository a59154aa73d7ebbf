//=========================================================================
// Runtime
//
// Runs a game in a window: the platform loop on the calling thread, the
// game on a dedicated logic thread.
//
// Architecture:
// ```text
//     RuntimeBuilder  ──build()──>  Runtime  ──run(factory)──>  [blocks]
//         │                            │
//         ├─ with_title()              ├─ spawns logic thread
//         ├─ with_window_size()        │    └─ factory() → Game, then
//         ├─ with_fps()                │       key_up / frame per tick
//         └─ with_channel_capacity()   └─ runs platform until close
// ```
//
// The game is built on the logic thread by the factory, so it never has
// to be `Send`. Only the factory crosses threads.
//
// After each frame the logic thread copies the game's pixels into a
// one-slot channel back to the platform, which shows them on its next
// redraw. A frame produced while the slot is still full is not copied.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use image::RgbaImage;
use log::{error, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;
use crate::core::platform_bridge::{EventCollector, PlatformError, PlatformEvent, PresentedFrame, TickControl};
use crate::engine::EngineError;
use crate::platform::{Platform, WindowConfig};

//=== Game ================================================================

/// What the logic thread drives.
pub trait Game {
    /// A key was released.
    fn key_up(&mut self, key: KeyCode);

    /// Runs one frame at `now` milliseconds. An error ends the logic
    /// thread.
    fn frame(&mut self, now: f64) -> Result<(), EngineError>;

    /// What the window should show after the latest frame. Games that do
    /// not render to memory keep the default and show nothing.
    fn presentation(&self) -> Option<Presentation<'_>> {
        None
    }

    /// The window closed or the logic thread is about to end.
    fn shutdown(&mut self) {}
}

/// A game's finished frame, borrowed for presentation.
#[derive(Debug, Clone, Copy)]
pub struct Presentation<'a> {
    pub image: &'a RgbaImage,
    /// Status text shown in the window title.
    pub caption: Option<&'a str>,
}

//=== RuntimeBuilder ======================================================

/// Builder for a [`Runtime`].
///
/// # Default Values
///
/// - **Title**: "Frogger"
/// - **Window size**: 505x606
/// - **FPS**: 60.0
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use frogger_engine::prelude::*;
///
/// RuntimeBuilder::new()
///     .with_title("Frogger")
///     .with_fps(30.0)
///     .build()
///     .run(|| {
///         let mut game = Frogger::new(Canvas::new(505, 606), FileImageLoader::new("assets"), GameConfig::default())?;
///         game.start()?;
///         Ok(game)
///     })
///     .expect("runtime failed");
/// ```
pub struct RuntimeBuilder {
    title: String,
    width: u32,
    height: u32,
    fps: f64,
    channel_capacity: usize,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            title: "Frogger".to_string(),
            width: 505,
            height: 606,
            fps: 60.0,
            channel_capacity: 128,
        }
    }

    /// # Panics
    ///
    /// Panics if `title` is empty.
    pub fn with_title(mut self, title: &str) -> Self {
        assert!(!title.is_empty(), "Window title must not be empty");
        self.title = title.to_string();
        self
    }

    /// Logical window size in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    /// Target frames per second.
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0`.
    pub fn with_fps(mut self, fps: f64) -> Self {
        assert!(fps > 0.0, "FPS must be positive, got {}", fps);
        self.fps = fps;
        self
    }

    /// Sets the channel capacity for platform → logic communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn build(self) -> Runtime {
        info!(
            "Building runtime ({}x{} @ {} fps, channel: {})",
            self.width, self.height, self.fps, self.channel_capacity
        );

        Runtime {
            window: WindowConfig {
                title: self.title,
                width: self.width,
                height: self.height,
                fps: self.fps,
            },
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Runtime =============================================================

pub struct Runtime {
    window: WindowConfig,
    channel_capacity: usize,
}

impl Runtime {
    /// Starts the logic thread and runs the platform loop until the
    /// window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → logic event channel and the
    ///    one-slot logic → platform frame channel
    /// 2. Spawns the logic thread, which builds the game with `factory`
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On close: `WindowClosed` is sent, the logic thread shuts the game
    ///    down and is joined
    ///
    /// # Errors
    ///
    /// Platform failures, and a game that failed to build or faulted while
    /// running, are reported as [`PlatformError`].
    pub fn run<G, F>(self, factory: F) -> Result<(), PlatformError>
    where
        G: Game + 'static,
        F: FnOnce() -> Result<G, EngineError> + Send + 'static,
    {
        //--- 1. Create communication channels ----------------------------
        let (tx, rx) = bounded(self.channel_capacity);
        let (frame_tx, frame_rx) = bounded(1);

        //--- 2. Spawn the logic thread ------------------------------------
        let logic = thread::Builder::new()
            .name("logic".to_string())
            .spawn(move || run_logic(rx, frame_tx, factory))
            .map_err(|e| PlatformError::LogicThread(e.to_string()))?;
        info!(target: "runtime", "Logic thread spawned");

        //--- 3. Launch the platform ---------------------------------------
        let platform_result = Platform::new(tx, frame_rx, self.window).run();
        if let Err(e) = &platform_result {
            error!(target: "runtime", "Platform error: {}", e);
        }
        info!(target: "runtime", "Platform event loop exited");

        //--- 4. Wait for the logic thread ---------------------------------
        let logic_result = match logic.join() {
            Ok(Ok(())) => {
                info!(target: "runtime", "Logic thread terminated cleanly");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(target: "runtime", "Game failed: {}", e);
                Err(PlatformError::LogicThread(e.to_string()))
            }
            Err(_) => {
                error!(target: "runtime", "Logic thread panicked");
                Err(PlatformError::LogicThread("logic thread panicked".to_string()))
            }
        };

        info!(target: "runtime", "Runtime shutdown complete");
        platform_result.and(logic_result)
    }
}

//=== Logic Thread ========================================================

fn run_logic<G, F>(
    receiver: Receiver<PlatformEvent>,
    frames: Sender<PresentedFrame>,
    factory: F,
) -> Result<(), EngineError>
where
    G: Game,
    F: FnOnce() -> Result<G, EngineError>,
{
    let game = factory()?;
    drive(EventCollector::new(receiver), game, &frames)
}

/// Feeds collected events to the game until the platform goes away.
fn drive<G: Game>(
    mut collector: EventCollector,
    mut game: G,
    frames: &Sender<PresentedFrame>,
) -> Result<(), EngineError> {
    loop {
        if collector.collect_frame() == TickControl::Exit {
            info!(target: "runtime", "Logic thread exiting");
            break;
        }

        for &key in collector.keys() {
            game.key_up(key);
        }

        if let Some(now) = collector.frame() {
            if let Err(e) = game.frame(now) {
                game.shutdown();
                return Err(e);
            }
            present(&game, frames);
        }
    }

    game.shutdown();
    Ok(())
}

/// Copies the game's latest pixels into the frame slot if it is free.
fn present<G: Game>(game: &G, frames: &Sender<PresentedFrame>) {
    if frames.is_full() {
        trace!(target: "runtime", "Window has not taken the last frame yet");
        return;
    }
    let Some(presentation) = game.presentation() else {
        return;
    };

    let frame = PresentedFrame {
        width: presentation.image.width(),
        height: presentation.image.height(),
        pixels: presentation.image.as_raw().clone(),
        caption: presentation.caption.map(str::to_string),
    };
    match frames.try_send(frame) {
        Ok(()) | Err(TrySendError::Full(_)) => {}
        Err(TrySendError::Disconnected(_)) => {
            trace!(target: "runtime", "Window gone, frame discarded");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::{LoadError, LoadFailure};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Seen {
        Key(KeyCode),
        Frame(f64),
        Shutdown,
    }

    struct Recorder {
        seen: Rc<RefCell<Vec<Seen>>>,
        fail_frames: bool,
    }

    impl Game for Recorder {
        fn key_up(&mut self, key: KeyCode) {
            self.seen.borrow_mut().push(Seen::Key(key));
        }

        fn frame(&mut self, now: f64) -> Result<(), EngineError> {
            self.seen.borrow_mut().push(Seen::Frame(now));
            if self.fail_frames {
                return Err(EngineError::ResourcesFailed(vec![LoadFailure {
                    url: "x.png".to_string(),
                    error: LoadError::Unavailable { url: "x.png".to_string(), reason: "test".to_string() },
                }]));
            }
            Ok(())
        }

        fn shutdown(&mut self) {
            self.seen.borrow_mut().push(Seen::Shutdown);
        }
    }

    fn recorder(fail_frames: bool) -> (Recorder, Rc<RefCell<Vec<Seen>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        (Recorder { seen: Rc::clone(&seen), fail_frames }, seen)
    }

    //=====================================================================
    // RuntimeBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = RuntimeBuilder::new();
        assert_eq!(builder.title, "Frogger");
        assert_eq!((builder.width, builder.height), (505, 606));
        assert_eq!(builder.fps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_setters_carry_into_runtime() {
        let runtime = RuntimeBuilder::new()
            .with_title("Bugs")
            .with_window_size(800, 600)
            .with_fps(30.0)
            .with_channel_capacity(16)
            .build();
        assert_eq!(runtime.window.title, "Bugs");
        assert_eq!((runtime.window.width, runtime.window.height), (800, 600));
        assert_eq!(runtime.window.fps, 30.0);
        assert_eq!(runtime.channel_capacity, 16);
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn builder_with_fps_panics_on_zero() {
        RuntimeBuilder::new().with_fps(0.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        RuntimeBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero() {
        RuntimeBuilder::new().with_window_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "Window title must not be empty")]
    fn builder_with_title_panics_on_empty() {
        RuntimeBuilder::new().with_title("");
    }

    //=====================================================================
    // Logic Loop Tests
    //=====================================================================

    #[test]
    fn window_closed_ends_loop_before_the_batch_runs() {
        let (tx, rx) = bounded(16);
        let (frames, _shown) = bounded(1);
        let (game, seen) = recorder(false);

        tx.send(PlatformEvent::KeyUp(KeyCode::ArrowUp)).unwrap();
        tx.send(PlatformEvent::Frame(16.0)).unwrap();
        tx.send(PlatformEvent::Frame(33.0)).unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        drive(EventCollector::new(rx), game, &frames).unwrap();

        // WindowClosed arrives in the same batch, so nothing ran.
        assert_eq!(*seen.borrow(), vec![Seen::Shutdown]);
    }

    #[test]
    fn drive_runs_batches_before_disconnect() {
        let (tx, rx) = bounded(16);
        let (frames, _shown) = bounded(1);
        let (game, seen) = recorder(false);
        let collector = EventCollector::new(rx);

        tx.send(PlatformEvent::KeyUp(KeyCode::Space)).unwrap();
        tx.send(PlatformEvent::Frame(16.0)).unwrap();
        let sender = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(50));
            drop(tx);
        });

        drive(collector, game, &frames).unwrap();
        sender.join().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![Seen::Key(KeyCode::Space), Seen::Frame(16.0), Seen::Shutdown]
        );
    }

    #[test]
    fn frame_error_stops_the_loop() {
        let (tx, rx) = bounded(16);
        let (frames, _shown) = bounded(1);
        let (game, seen) = recorder(true);

        tx.send(PlatformEvent::Frame(1.0)).unwrap();

        let result = drive(EventCollector::new(rx), game, &frames);

        assert!(matches!(result, Err(EngineError::ResourcesFailed(_))));
        assert_eq!(*seen.borrow(), vec![Seen::Frame(1.0), Seen::Shutdown]);
        drop(tx);
    }

    #[test]
    fn factory_error_is_returned() {
        let (_tx, rx) = bounded(1);
        let (frames, _shown) = bounded(1);
        let result = run_logic::<Recorder, _>(rx, frames, || Err(EngineError::NotStarted));
        assert!(matches!(result, Err(EngineError::NotStarted)));
    }

    //=====================================================================
    // Presentation Tests
    //=====================================================================

    struct Painter {
        image: RgbaImage,
        caption: Option<String>,
        frames: u32,
    }

    impl Game for Painter {
        fn key_up(&mut self, _key: KeyCode) {}

        fn frame(&mut self, _now: f64) -> Result<(), EngineError> {
            self.frames += 1;
            self.image.put_pixel(0, 0, image::Rgba([self.frames as u8, 0, 0, 255]));
            Ok(())
        }

        fn presentation(&self) -> Option<Presentation<'_>> {
            Some(Presentation {
                image: &self.image,
                caption: self.caption.as_deref(),
            })
        }
    }

    fn painter(caption: Option<&str>) -> Painter {
        Painter {
            image: RgbaImage::new(2, 1),
            caption: caption.map(str::to_string),
            frames: 0,
        }
    }

    #[test]
    fn frame_pixels_are_sent_to_the_window() {
        let (frames, shown) = bounded(1);
        let mut game = painter(Some("You Win !"));

        game.frame(0.0).unwrap();
        present(&game, &frames);

        let frame = shown.try_recv().unwrap();
        assert_eq!((frame.width, frame.height), (2, 1));
        assert_eq!(frame.pixels, vec![1, 0, 0, 255, 0, 0, 0, 0]);
        assert_eq!(frame.caption.as_deref(), Some("You Win !"));
    }

    #[test]
    fn full_slot_keeps_the_untaken_frame() {
        let (frames, shown) = bounded(1);
        let mut game = painter(None);

        game.frame(0.0).unwrap();
        present(&game, &frames);
        game.frame(16.0).unwrap();
        present(&game, &frames);

        assert_eq!(shown.try_recv().unwrap().pixels[0], 1);
        assert!(shown.try_recv().is_err());
    }

    #[test]
    fn games_without_pixels_send_nothing() {
        let (frames, shown) = bounded(1);
        let (game, _) = recorder(false);

        present(&game, &frames);

        assert!(shown.try_recv().is_err());
    }

    #[test]
    fn drive_presents_after_each_frame() {
        let (tx, rx) = bounded(16);
        let (frames, shown) = bounded(1);

        tx.send(PlatformEvent::Frame(16.0)).unwrap();
        let sender = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(50));
            drop(tx);
        });
        drive(EventCollector::new(rx), painter(None), &frames).unwrap();
        sender.join().unwrap();

        assert!(shown.try_recv().is_ok());
    }
}
