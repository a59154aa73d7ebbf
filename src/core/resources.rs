//=========================================================================
// Resources
//=========================================================================
//
// Image handles, the loader seam, and the preload barrier.
//
// Architecture:
// ```text
//   Engine::start()
//       │
//       ├─ PreloadBarrier::launch(urls, loader)
//       │     ├─ worker thread per URL ── loader.load(url) ──┐
//       │     ├─ worker thread per URL ── loader.load(url) ──┤
//       │     └─ ...                                         │
//       │                                                    ▼
//       │                                  crossbeam channel (LoadOutcome)
//       │                                                    │
//       └─ Engine::tick() ── barrier.poll() ◄────────────────┘
//                                │
//                         outstanding == 0 ?
//                                └─ finish() → ResourceTable | failures
// ```
//
// Every load settles exactly once, success or failure. A worker that
// dies without reporting is settled as a failure once the channel
// disconnects, so the barrier cannot hang on it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, TryRecvError};
use image::{Rgba, RgbaImage};
use log::{debug, error, trace};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::engine::EngineError;

//=== ImageHandle =========================================================

/// Opaque, cheaply clonable handle to a decoded RGBA image.
#[derive(Clone)]
pub struct ImageHandle {
    url: Arc<str>,
    pixels: Arc<RgbaImage>,
}

impl ImageHandle {
    pub fn new(url: &str, pixels: RgbaImage) -> Self {
        Self {
            url: Arc::from(url),
            pixels: Arc::new(pixels),
        }
    }

    /// Single-color image, handy for tests and placeholder content.
    pub fn solid(url: &str, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::new(url, RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("url", &self.url)
            .field("size", &(self.width(), self.height()))
            .finish()
    }
}

//=== LoadError ===========================================================

/// Why a single image could not be produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load image '{url}': {source}")]
    Image {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("image '{url}' unavailable: {reason}")]
    Unavailable { url: String, reason: String },
}

/// A load that settled unsuccessfully.
#[derive(Debug)]
pub struct LoadFailure {
    pub url: String,
    pub error: LoadError,
}

//=== ImageLoader =========================================================

/// Turns a URL into a decoded image.
///
/// Calls happen on worker threads, one per URL, so implementations may
/// block. Each call must return exactly once.
pub trait ImageLoader: Send + Sync + 'static {
    fn load(&self, url: &str) -> Result<ImageHandle, LoadError>;
}

/// Loads image files relative to an asset root directory.
#[derive(Debug, Clone)]
pub struct FileImageLoader {
    root: PathBuf,
}

impl FileImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, url: &str) -> Result<ImageHandle, LoadError> {
        let path = self.root.join(url);
        let decoded = image::open(&path).map_err(|source| LoadError::Image {
            url: url.to_string(),
            source,
        })?;
        let pixels = decoded.to_rgba8();
        debug!("Decoded {} ({}x{})", path.display(), pixels.width(), pixels.height());
        Ok(ImageHandle::new(url, pixels))
    }
}

//=== ResourceTable =======================================================

/// URL → image mapping, filled once by the preload barrier and read-only
/// afterwards.
#[derive(Debug, Default)]
pub struct ResourceTable {
    images: HashMap<String, ImageHandle>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a loaded image.
    pub fn get(&self, url: &str) -> Result<&ImageHandle, EngineError> {
        self.images
            .get(url)
            .ok_or_else(|| EngineError::MissingResource(url.to_string()))
    }

    pub fn contains(&self, url: &str) -> bool {
        self.images.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub(crate) fn insert(&mut self, image: ImageHandle) {
        self.images.insert(image.url().to_string(), image);
    }
}

//=== PreloadBarrier ======================================================

struct LoadOutcome {
    url: String,
    result: Result<ImageHandle, LoadError>,
}

/// Countdown over outstanding image loads.
pub(crate) struct PreloadBarrier {
    pending: HashSet<String>,
    receiver: Receiver<LoadOutcome>,
    table: ResourceTable,
    failures: Vec<LoadFailure>,
}

impl PreloadBarrier {
    //--- Construction -----------------------------------------------------

    /// Starts one independent load per URL.
    ///
    /// With no URLs the barrier is settled immediately.
    pub(crate) fn launch(urls: &[String], loader: Arc<dyn ImageLoader>) -> Self {
        let (sender, receiver) = unbounded();

        for url in urls {
            let worker_sender = sender.clone();
            let worker_loader = Arc::clone(&loader);
            let worker_url = url.clone();

            let spawned = thread::Builder::new()
                .name(format!("preload {}", url))
                .spawn(move || {
                    let result = worker_loader.load(&worker_url);
                    // Receiver gone means the engine was dropped mid-load.
                    let _ = worker_sender.send(LoadOutcome { url: worker_url, result });
                });

            if let Err(e) = spawned {
                error!("Could not spawn loader thread for '{}': {}", url, e);
                let _ = sender.send(LoadOutcome {
                    url: url.clone(),
                    result: Err(LoadError::Unavailable {
                        url: url.clone(),
                        reason: format!("loader thread spawn failed: {}", e),
                    }),
                });
            }
        }

        debug!("Preload started for {} image(s)", urls.len());

        Self {
            pending: urls.iter().cloned().collect(),
            receiver,
            table: ResourceTable::new(),
            failures: Vec::new(),
        }
    }

    //--- Settlement -------------------------------------------------------

    pub(crate) fn outstanding(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    /// Settles every outcome that has already arrived, without blocking.
    pub(crate) fn poll(&mut self) -> usize {
        while !self.is_settled() {
            match self.receiver.try_recv() {
                Ok(outcome) => self.settle(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.abandon_pending(),
            }
        }
        self.outstanding()
    }

    /// Blocks until every load has settled.
    pub(crate) fn wait(&mut self) {
        while !self.is_settled() {
            match self.receiver.recv() {
                Ok(outcome) => self.settle(outcome),
                Err(_) => self.abandon_pending(),
            }
        }
    }

    /// Consumes a settled barrier.
    pub(crate) fn finish(self) -> Result<ResourceTable, Vec<LoadFailure>> {
        debug_assert!(self.is_settled(), "finish() called on an unsettled barrier");
        if self.failures.is_empty() {
            Ok(self.table)
        } else {
            Err(self.failures)
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn settle(&mut self, outcome: LoadOutcome) {
        if !self.pending.remove(&outcome.url) {
            trace!("Ignoring duplicate outcome for '{}'", outcome.url);
            return;
        }

        match outcome.result {
            Ok(image) => {
                trace!("Loaded '{}' ({} left)", outcome.url, self.pending.len());
                self.table.insert(image);
            }
            Err(error) => {
                error!("{}", error);
                self.failures.push(LoadFailure { url: outcome.url, error });
            }
        }
    }

    fn abandon_pending(&mut self) {
        for url in self.pending.drain() {
            error!("Loader for '{}' terminated without reporting", url);
            self.failures.push(LoadFailure {
                error: LoadError::Unavailable {
                    url: url.clone(),
                    reason: "loader terminated without reporting".to_string(),
                },
                url,
            });
        }
    }
}

//=========================================================================
// Test Loaders
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================
