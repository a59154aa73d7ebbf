//=========================================================================
// Engine
//
// Layer registry, resource preloading and the per-frame scheduler.
//
// Architecture:
// ```text
//   EngineBuilder ──build()──> Engine ──start()──> Loading ──barrier──> Running
//       │                        │                    │                    │
//       ├─ with_loader()         └─ add_layer()       └─ tick() polls      └─ tick() runs a frame
//       └─ with_asset_root()                                                  updates, then draws
// ```
//
// The engine never schedules itself. Callers drive it with `tick(now)`,
// `now` being a monotonic timestamp in milliseconds.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use log::{debug, error, info, trace};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::layer::Layer;
use crate::core::resources::{FileImageLoader, ImageLoader, LoadFailure, PreloadBarrier, ResourceTable};
use crate::core::surface::RenderSurface;

//=== EngineError =========================================================

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine already started")]
    AlreadyStarted,

    #[error("engine has not been started")]
    NotStarted,

    #[error("layer name must not be empty")]
    InvalidLayer,

    #[error("a layer named '{0}' is already registered")]
    DuplicateLayer(String),

    #[error("image '{0}' is not in the resource table")]
    MissingResource(String),

    #[error("{} image(s) failed to load", .0.len())]
    ResourcesFailed(Vec<LoadFailure>),
}

//=== Phase & TickStatus ==================================================

/// Coarse engine lifecycle, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Registering,
    Loading,
    Running,
    Faulted,
    Stopped,
}

/// What a call to [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// `start()` has not been called.
    Idle,
    /// Still waiting for images.
    Loading { pending: usize },
    /// A frame ran. `index` counts from zero.
    Frame { index: u64 },
    /// Preloading failed; no frame will ever run.
    Faulted,
    Stopped,
}

enum Lifecycle {
    Registering,
    Loading(PreloadBarrier),
    Running,
    Faulted,
    Stopped,
}

//=== EngineBuilder =======================================================

/// Builder for an [`Engine`].
///
/// # Default Values
///
/// - **Loader**: [`FileImageLoader`] rooted at `assets`
///
/// # Examples
///
/// ```no_run
/// use frogger_engine::prelude::*;
///
/// let engine = EngineBuilder::new(Canvas::new(505, 606))
///     .with_asset_root("resources")
///     .build();
/// assert_eq!(engine.layer_count(), 0);
/// ```
pub struct EngineBuilder<S: RenderSurface> {
    surface: S,
    loader: Option<Arc<dyn ImageLoader>>,
    asset_root: PathBuf,
}

impl<S: RenderSurface> EngineBuilder<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            loader: None,
            asset_root: PathBuf::from("assets"),
        }
    }

    /// Replaces the file loader with a custom one.
    pub fn with_loader(mut self, loader: impl ImageLoader) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Root directory for the default file loader.
    ///
    /// # Panics
    ///
    /// Panics if `root` is empty.
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        assert!(!root.as_os_str().is_empty(), "Asset root must not be empty");
        self.asset_root = root;
        self
    }

    pub fn build(self) -> Engine<S> {
        let loader = match self.loader {
            Some(loader) => loader,
            None => {
                info!("Using image files under {}", self.asset_root.display());
                Arc::new(FileImageLoader::new(self.asset_root))
            }
        };
        Engine::with_shared_loader(self.surface, loader)
    }
}

//=== Engine ==============================================================

/// Layered 2D engine.
///
/// Layers are shared (`Rc<RefCell<_>>`) so the game can keep typed handles
/// to the same layers it registers. Everything runs on the thread that owns
/// the engine; only image decoding happens elsewhere.
pub struct Engine<S: RenderSurface> {
    surface: S,
    loader: Arc<dyn ImageLoader>,
    layers: Vec<Rc<RefCell<dyn Layer>>>,
    required_images: Vec<String>,
    resources: ResourceTable,
    lifecycle: Lifecycle,
    frame_count: u64,
}

impl<S: RenderSurface> Engine<S> {
    //--- Construction -----------------------------------------------------

    pub fn new(surface: S, loader: impl ImageLoader) -> Self {
        Self::with_shared_loader(surface, Arc::new(loader))
    }

    fn with_shared_loader(surface: S, loader: Arc<dyn ImageLoader>) -> Self {
        Self {
            surface,
            loader,
            layers: Vec::new(),
            required_images: Vec::new(),
            resources: ResourceTable::new(),
            lifecycle: Lifecycle::Registering,
            frame_count: 0,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Appends a layer. Registration order is update and draw order.
    ///
    /// The layer's required images join the engine-wide set; a URL listed
    /// by several layers is loaded once.
    pub fn add_layer<L: Layer + 'static>(&mut self, layer: Rc<RefCell<L>>) -> Result<(), EngineError> {
        if !matches!(self.lifecycle, Lifecycle::Registering) {
            return Err(EngineError::AlreadyStarted);
        }

        {
            let candidate = layer.borrow();
            let name = candidate.name();
            if name.is_empty() {
                return Err(EngineError::InvalidLayer);
            }
            if self.layers.iter().any(|existing| existing.borrow().name() == name) {
                return Err(EngineError::DuplicateLayer(name.to_string()));
            }

            for url in &candidate.state().required_images {
                if !self.required_images.contains(url) {
                    self.required_images.push(url.clone());
                }
            }
            debug!(
                "Registered layer '{}' ({} image(s) required, {} total)",
                name,
                candidate.state().required_images.len(),
                self.required_images.len()
            );
        }

        self.layers.push(layer);
        Ok(())
    }

    //--- Startup ----------------------------------------------------------

    /// Begins loading every required image.
    ///
    /// With nothing to load the barrier releases right here: every
    /// `on_load` has run by the time this returns.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if !matches!(self.lifecycle, Lifecycle::Registering) {
            return Err(EngineError::AlreadyStarted);
        }

        info!(
            "Starting engine: {} layer(s), {} image(s)",
            self.layers.len(),
            self.required_images.len()
        );

        let barrier = PreloadBarrier::launch(&self.required_images, Arc::clone(&self.loader));
        let settled = barrier.is_settled();
        self.lifecycle = Lifecycle::Loading(barrier);

        if settled {
            self.release_barrier()?;
        }
        Ok(())
    }

    /// Settles whatever loads have finished, without blocking.
    ///
    /// Returns the number of loads still outstanding. Releases the barrier
    /// when that number reaches zero.
    pub fn poll_resources(&mut self) -> Result<usize, EngineError> {
        let pending = match &mut self.lifecycle {
            Lifecycle::Loading(barrier) => barrier.poll(),
            _ => return Ok(0),
        };

        if pending == 0 {
            self.release_barrier()?;
        }
        Ok(pending)
    }

    /// Blocks until every load has settled, then releases the barrier.
    pub fn await_resources(&mut self) -> Result<(), EngineError> {
        match &mut self.lifecycle {
            Lifecycle::Registering => return Err(EngineError::NotStarted),
            Lifecycle::Loading(barrier) => barrier.wait(),
            _ => return Ok(()),
        }
        self.release_barrier()
    }

    fn release_barrier(&mut self) -> Result<(), EngineError> {
        if !matches!(self.lifecycle, Lifecycle::Loading(_)) {
            return Ok(());
        }
        // Faulted until every on_load has succeeded.
        let Lifecycle::Loading(barrier) = std::mem::replace(&mut self.lifecycle, Lifecycle::Faulted) else {
            return Ok(());
        };

        let table = match barrier.finish() {
            Ok(table) => table,
            Err(failures) => {
                error!("{} image(s) failed to load; engine will not run", failures.len());
                return Err(EngineError::ResourcesFailed(failures));
            }
        };

        info!("All {} image(s) loaded", table.len());

        for layer in &self.layers {
            let mut layer = layer.borrow_mut();
            trace!("on_load '{}'", layer.name());
            if let Err(e) = layer.on_load(&table) {
                error!("Layer '{}' failed to load: {}", layer.name(), e);
                return Err(e);
            }
        }

        self.resources = table;
        self.lifecycle = Lifecycle::Running;
        Ok(())
    }

    //--- Frame Scheduling -------------------------------------------------

    /// Advances the engine to `now` (milliseconds).
    ///
    /// While loading this only polls. Once running, a frame updates every
    /// running layer, begins a new surface frame, then draws every visible
    /// layer, each pass in registration order. `running` and `visible` are
    /// sampled once at the start of the frame. The frame on which the
    /// barrier releases runs right after the `on_load` calls.
    pub fn tick(&mut self, now: f64) -> Result<TickStatus, EngineError> {
        match self.lifecycle {
            Lifecycle::Registering => return Ok(TickStatus::Idle),
            Lifecycle::Faulted => return Ok(TickStatus::Faulted),
            Lifecycle::Stopped => return Ok(TickStatus::Stopped),
            Lifecycle::Loading(_) => {
                let pending = self.poll_resources()?;
                if pending > 0 {
                    return Ok(TickStatus::Loading { pending });
                }
            }
            Lifecycle::Running => {}
        }

        Ok(self.run_frame(now))
    }

    fn run_frame(&mut self, now: f64) -> TickStatus {
        // Flags are read once; toggles made during this frame apply to the next.
        let flags: Vec<(bool, bool)> = self
            .layers
            .iter()
            .map(|layer| {
                let layer = layer.borrow();
                (layer.is_running(), layer.is_visible())
            })
            .collect();

        for (layer, &(running, _)) in self.layers.iter().zip(&flags) {
            if running {
                layer.borrow_mut().update(now);
            }
        }

        self.surface.begin_frame();

        for (layer, &(_, visible)) in self.layers.iter().zip(&flags) {
            if visible {
                layer.borrow().draw(&mut self.surface);
            }
        }

        let index = self.frame_count;
        self.frame_count += 1;
        trace!("Frame {} at {:.1}ms", index, now);
        TickStatus::Frame { index }
    }

    /// Stops scheduling; later ticks report [`TickStatus::Stopped`].
    pub fn stop(&mut self) {
        if !matches!(self.lifecycle, Lifecycle::Stopped) {
            info!("Engine stopped after {} frame(s)", self.frame_count);
        }
        self.lifecycle = Lifecycle::Stopped;
    }

    //--- Accessors --------------------------------------------------------

    pub fn phase(&self) -> EnginePhase {
        match self.lifecycle {
            Lifecycle::Registering => EnginePhase::Registering,
            Lifecycle::Loading(_) => EnginePhase::Loading,
            Lifecycle::Running => EnginePhase::Running,
            Lifecycle::Faulted => EnginePhase::Faulted,
            Lifecycle::Stopped => EnginePhase::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Union of all layers' images, in first-seen order.
    pub fn required_images(&self) -> &[String] {
        &self.required_images
    }

    /// Loaded images. Empty until the barrier releases.
    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layer::LayerState;
    use crate::core::resources::testing::{FailingLoader, GatedLoader, StaticLoader};
    use crate::core::surface::testing::{DrawCall, RecordingSurface};
    use crossbeam_channel::bounded;
    use std::time::Duration;

    type Log = Rc<RefCell<Vec<String>>>;

    //--- Test Layer -------------------------------------------------------

    struct TestLayer {
        state: LayerState,
        log: Log,
        run_on_load: bool,
        show_on_load: bool,
        fail_on_load: bool,
        hide_on_update: bool,
        reveal_on_update: Option<Rc<RefCell<TestLayer>>>,
    }

    impl TestLayer {
        fn new(name: &str, images: &[&str], log: &Log) -> Self {
            Self {
                state: LayerState::new(name).with_required_images(images.iter().copied()),
                log: Rc::clone(log),
                run_on_load: true,
                show_on_load: true,
                fail_on_load: false,
                hide_on_update: false,
                reveal_on_update: None,
            }
        }

        fn shared(self) -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(self))
        }
    }

    impl Layer for TestLayer {
        fn state(&self) -> &LayerState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut LayerState {
            &mut self.state
        }

        fn on_load(&mut self, resources: &ResourceTable) -> Result<(), EngineError> {
            for url in &self.state.required_images {
                resources.get(url)?;
            }
            if self.fail_on_load {
                return Err(EngineError::MissingResource("missing.png".to_string()));
            }
            self.log.borrow_mut().push(format!("{}:load", self.state.name));
            self.state.running = self.run_on_load;
            self.state.visible = self.show_on_load;
            Ok(())
        }

        fn update(&mut self, now: f64) {
            self.log.borrow_mut().push(format!("{}:update@{}", self.state.name, now));
            if self.hide_on_update {
                self.state.hide();
            }
            if let Some(other) = &self.reveal_on_update {
                other.borrow_mut().state.show();
            }
        }

        fn draw(&self, surface: &mut dyn RenderSurface) {
            self.log.borrow_mut().push(format!("{}:draw", self.state.name));
            surface.fill_rect(0.0, 0.0, 1.0, 1.0, crate::core::surface::Color::BLACK);
        }
    }

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn engine() -> Engine<RecordingSurface> {
        Engine::new(RecordingSurface::new(505, 606), StaticLoader::default())
    }

    //--- Registration -----------------------------------------------------

    #[test]
    fn required_images_are_deduplicated_in_order() {
        let log = log();
        let mut engine = engine();
        engine.add_layer(TestLayer::new("a", &["x.png", "y.png"], &log).shared()).unwrap();
        engine.add_layer(TestLayer::new("b", &["y.png", "z.png"], &log).shared()).unwrap();

        assert_eq!(engine.layer_count(), 2);
        assert_eq!(engine.required_images(), &["x.png", "y.png", "z.png"]);
    }

    #[test]
    fn empty_and_duplicate_names_are_rejected() {
        let log = log();
        let mut engine = engine();
        engine.add_layer(TestLayer::new("menu", &[], &log).shared()).unwrap();

        assert!(matches!(
            engine.add_layer(TestLayer::new("", &[], &log).shared()),
            Err(EngineError::InvalidLayer)
        ));
        match engine.add_layer(TestLayer::new("menu", &[], &log).shared()) {
            Err(EngineError::DuplicateLayer(name)) => assert_eq!(name, "menu"),
            other => panic!("Expected DuplicateLayer, got {:?}", other),
        }
        assert_eq!(engine.layer_count(), 1);
    }

    #[test]
    fn registration_after_start_is_rejected() {
        let log = log();
        let mut engine = engine();
        engine.start().unwrap();

        assert!(matches!(
            engine.add_layer(TestLayer::new("late", &[], &log).shared()),
            Err(EngineError::AlreadyStarted)
        ));
        assert!(matches!(engine.start(), Err(EngineError::AlreadyStarted)));
    }

    //--- Preloading -------------------------------------------------------

    #[test]
    fn tick_before_start_is_idle() {
        let mut engine = engine();
        assert_eq!(engine.tick(0.0).unwrap(), TickStatus::Idle);
        assert!(matches!(engine.await_resources(), Err(EngineError::NotStarted)));
    }

    #[test]
    fn zero_images_release_inside_start() {
        let log = log();
        let mut engine = engine();
        engine.add_layer(TestLayer::new("a", &[], &log).shared()).unwrap();
        engine.add_layer(TestLayer::new("b", &[], &log).shared()).unwrap();

        engine.start().unwrap();

        assert!(engine.is_running());
        assert_eq!(*log.borrow(), vec!["a:load", "b:load"]);
    }

    #[test]
    fn no_layer_loads_until_every_image_settles() {
        let log = log();
        let (gate_tx, gate_rx) = bounded(4);
        let mut engine = Engine::new(RecordingSurface::new(505, 606), GatedLoader { gate: gate_rx });
        engine.add_layer(TestLayer::new("a", &["1.png", "2.png"], &log).shared()).unwrap();
        engine.add_layer(TestLayer::new("b", &["2.png", "3.png"], &log).shared()).unwrap();
        engine.start().unwrap();

        assert_eq!(engine.tick(0.0).unwrap(), TickStatus::Loading { pending: 3 });

        gate_tx.send(()).unwrap();
        gate_tx.send(()).unwrap();
        let mut pending = 3;
        for _ in 0..500 {
            pending = engine.poll_resources().unwrap();
            if pending == 1 {
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(pending, 1);
        assert_eq!(engine.phase(), EnginePhase::Loading);
        assert!(log.borrow().is_empty(), "on_load ran before the barrier released");

        gate_tx.send(()).unwrap();
        engine.await_resources().unwrap();

        assert!(engine.is_running());
        assert_eq!(engine.resources().len(), 3);
        assert_eq!(*log.borrow(), vec!["a:load", "b:load"]);
    }

    #[test]
    fn scenario_single_layer_two_images() {
        let log = log();
        let (gate_tx, gate_rx) = bounded(2);
        let mut engine = Engine::new(RecordingSurface::new(505, 606), GatedLoader { gate: gate_rx });
        engine.add_layer(TestLayer::new("L", &["a.png", "b.png"], &log).shared()).unwrap();
        engine.start().unwrap();

        assert!(matches!(engine.tick(0.0).unwrap(), TickStatus::Loading { .. }));
        assert!(log.borrow().is_empty());
        assert!(engine.surface().calls.is_empty());

        gate_tx.send(()).unwrap();
        gate_tx.send(()).unwrap();
        engine.await_resources().unwrap();

        assert_eq!(engine.tick(16.0).unwrap(), TickStatus::Frame { index: 0 });
        assert_eq!(*log.borrow(), vec!["L:load", "L:update@16", "L:draw"]);
    }

    #[test]
    fn release_observed_by_tick_runs_the_same_frame() {
        let log = log();
        let mut engine = engine();
        engine.add_layer(TestLayer::new("L", &["a.png"], &log).shared()).unwrap();
        engine.start().unwrap();

        let mut status = TickStatus::Idle;
        for _ in 0..500 {
            status = engine.tick(5.0).unwrap();
            if matches!(status, TickStatus::Frame { .. }) {
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }

        assert_eq!(status, TickStatus::Frame { index: 0 });
        assert_eq!(*log.borrow(), vec!["L:load", "L:update@5", "L:draw"]);
    }

    #[test]
    fn load_failure_faults_once() {
        let log = log();
        let mut engine = Engine::new(RecordingSurface::new(505, 606), FailingLoader::new(&["bad.png"]));
        engine.add_layer(TestLayer::new("L", &["good.png", "bad.png"], &log).shared()).unwrap();
        engine.start().unwrap();

        match engine.await_resources() {
            Err(EngineError::ResourcesFailed(failures)) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].url, "bad.png");
            }
            other => panic!("Expected ResourcesFailed, got {:?}", other),
        }

        assert_eq!(engine.phase(), EnginePhase::Faulted);
        assert_eq!(engine.tick(1.0).unwrap(), TickStatus::Faulted);
        assert!(engine.await_resources().is_ok());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn on_load_error_faults_the_engine() {
        let log = log();
        let mut engine = engine();
        let mut layer = TestLayer::new("L", &[], &log);
        layer.fail_on_load = true;
        engine.add_layer(layer.shared()).unwrap();

        assert!(matches!(engine.start(), Err(EngineError::MissingResource(_))));
        assert_eq!(engine.tick(0.0).unwrap(), TickStatus::Faulted);
    }

    //--- Frames -----------------------------------------------------------

    #[test]
    fn updates_precede_draws_in_registration_order() {
        let log = log();
        let mut engine = engine();
        engine.add_layer(TestLayer::new("a", &[], &log).shared()).unwrap();
        engine.add_layer(TestLayer::new("b", &[], &log).shared()).unwrap();
        engine.add_layer(TestLayer::new("c", &[], &log).shared()).unwrap();
        engine.start().unwrap();
        log.borrow_mut().clear();

        engine.tick(10.0).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["a:update@10", "b:update@10", "c:update@10", "a:draw", "b:draw", "c:draw"]
        );
        assert_eq!(engine.surface().calls.first(), Some(&DrawCall::BeginFrame));
    }

    #[test]
    fn flags_gate_update_and_draw_independently() {
        let log = log();
        let mut engine = engine();
        let mut paused = TestLayer::new("paused", &[], &log);
        paused.run_on_load = false;
        let mut hidden = TestLayer::new("hidden", &[], &log);
        hidden.show_on_load = false;
        engine.add_layer(paused.shared()).unwrap();
        engine.add_layer(hidden.shared()).unwrap();
        engine.start().unwrap();
        log.borrow_mut().clear();

        engine.tick(1.0).unwrap();

        assert_eq!(*log.borrow(), vec!["hidden:update@1", "paused:draw"]);
    }

    #[test]
    fn flag_changes_apply_on_next_reach() {
        let log = log();
        let mut engine = engine();
        let layer = TestLayer::new("L", &[], &log).shared();
        engine.add_layer(Rc::clone(&layer)).unwrap();
        engine.start().unwrap();
        log.borrow_mut().clear();

        layer.borrow_mut().state_mut().hide();
        engine.tick(1.0).unwrap();
        layer.borrow_mut().state_mut().show();
        layer.borrow_mut().state_mut().pause();
        engine.tick(2.0).unwrap();

        assert_eq!(*log.borrow(), vec!["L:update@1", "L:draw"]);
        assert_eq!(engine.frame_count(), 2);
    }

    #[test]
    fn layer_hidden_during_update_still_draws_this_frame() {
        let log = log();
        let mut engine = engine();
        let mut vanishing = TestLayer::new("V", &[], &log);
        vanishing.hide_on_update = true;
        engine.add_layer(vanishing.shared()).unwrap();
        engine.start().unwrap();
        log.borrow_mut().clear();

        engine.tick(1.0).unwrap();
        engine.tick(2.0).unwrap();

        assert_eq!(*log.borrow(), vec!["V:update@1", "V:draw", "V:update@2"]);
    }

    #[test]
    fn layer_shown_by_another_waits_for_next_frame() {
        let log = log();
        let mut engine = engine();
        let mut late = TestLayer::new("late", &[], &log);
        late.show_on_load = false;
        late.run_on_load = false;
        let late = late.shared();
        let mut trigger = TestLayer::new("trigger", &[], &log);
        trigger.show_on_load = false;
        trigger.reveal_on_update = Some(Rc::clone(&late));
        engine.add_layer(trigger.shared()).unwrap();
        engine.add_layer(Rc::clone(&late)).unwrap();
        engine.start().unwrap();
        log.borrow_mut().clear();

        engine.tick(1.0).unwrap();
        assert_eq!(*log.borrow(), vec!["trigger:update@1"]);

        engine.tick(2.0).unwrap();
        assert_eq!(*log.borrow(), vec!["trigger:update@1", "trigger:update@2", "late:draw"]);
    }

    #[test]
    fn stop_ends_scheduling() {
        let log = log();
        let mut engine = engine();
        engine.add_layer(TestLayer::new("L", &[], &log).shared()).unwrap();
        engine.start().unwrap();

        engine.stop();

        assert_eq!(engine.tick(1.0).unwrap(), TickStatus::Stopped);
        assert_eq!(engine.phase(), EnginePhase::Stopped);
        assert_eq!(engine.frame_count(), 0);
    }

    //--- Builder ----------------------------------------------------------

    #[test]
    fn builder_uses_custom_loader() {
        let log = log();
        let mut engine = EngineBuilder::new(RecordingSurface::new(10, 10))
            .with_loader(StaticLoader::default())
            .build();
        engine.add_layer(TestLayer::new("L", &["a.png"], &log).shared()).unwrap();
        engine.start().unwrap();
        engine.await_resources().unwrap();
        assert!(engine.resources().contains("a.png"));
    }

    #[test]
    #[should_panic(expected = "Asset root must not be empty")]
    fn builder_rejects_empty_asset_root() {
        EngineBuilder::new(RecordingSurface::new(10, 10)).with_asset_root("");
    }

    #[test]
    fn builder_default_loader_faults_on_missing_files() {
        let log = log();
        let mut engine = EngineBuilder::new(RecordingSurface::new(10, 10))
            .with_asset_root(std::env::temp_dir().join("frogger_engine_missing_assets"))
            .build();
        engine.add_layer(TestLayer::new("L", &["images/none.png"], &log).shared()).unwrap();
        engine.start().unwrap();
        assert!(matches!(engine.await_resources(), Err(EngineError::ResourcesFailed(_))));
    }
}
