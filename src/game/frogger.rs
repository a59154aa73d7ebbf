//=========================================================================
// Frogger
//=========================================================================
//
// Menu ↔ play state machine on top of the engine.
//
// States:
// ```text
//   MainMenu(None) ──select──> Playing ──collision──> MainMenu(Lose)
//        ▲                        │
//        └────── MainMenu(Win) <──┘ reached the water
// ```
//
// Handlers and the collision callback never touch the state machine
// directly. They push a `Transition`, and `Frogger` applies the queue at
// the end of the key event or tick that produced it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::content::KEY_TABLE;
use super::layers::{BackgroundLayer, EnemiesLayer, MenuLayer, PlayerLayer};
use super::{Entity, GameAction, GameConfig, Outcome, SharedEntity, Transition};
use crate::core::input::{InputRouter, KeyCode};
use crate::core::layer::Layer;
use crate::core::resources::ImageLoader;
use crate::core::surface::RenderSurface;
use crate::core::transition::{SharedTransitions, TransitionQueue};
use crate::engine::{Engine, EngineError, TickStatus};
use crate::runtime::{Game, Presentation};

//=== GameState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    MainMenu,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    pub selected_character: usize,
    pub last_result: Option<Outcome>,
}

//=== Frogger =============================================================

pub struct Frogger<S: RenderSurface> {
    engine: Engine<S>,
    router: InputRouter<GameAction>,
    state: GameState,
    player: SharedEntity,
    enemies: Rc<RefCell<EnemiesLayer>>,
    player_layer: Rc<RefCell<PlayerLayer>>,
    menu: Rc<RefCell<MenuLayer>>,
    transitions: SharedTransitions<Transition>,
}

impl<S: RenderSurface> Frogger<S> {
    //--- Construction -----------------------------------------------------

    /// Builds the engine and registers the four layers. Call
    /// [`start`](Self::start) to begin loading.
    pub fn new(surface: S, loader: impl ImageLoader, config: GameConfig) -> Result<Self, EngineError> {
        let mut engine = Engine::new(surface, loader);
        let transitions = TransitionQueue::shared();
        let player = Rc::new(RefCell::new(Entity::player(&config)));

        let background = Rc::new(RefCell::new(BackgroundLayer::new(&config)));
        let enemies = Rc::new(RefCell::new(EnemiesLayer::new(&config, Rc::clone(&player))));
        let player_layer = Rc::new(RefCell::new(PlayerLayer::new(
            &config,
            Rc::clone(&player),
            Rc::clone(&transitions),
        )));
        let menu = Rc::new(RefCell::new(MenuLayer::new(&config, Rc::clone(&transitions))));

        let sink = Rc::clone(&transitions);
        enemies.borrow_mut().set_on_collision(move || {
            sink.borrow_mut().push(Transition::EnterMenu(Some(Outcome::Lose)));
        });

        engine.add_layer(background)?;
        engine.add_layer(Rc::clone(&enemies))?;
        engine.add_layer(Rc::clone(&player_layer))?;
        engine.add_layer(Rc::clone(&menu))?;

        let selected_character = menu.borrow().choice();
        let mut frogger = Self {
            engine,
            router: InputRouter::from_codes(&KEY_TABLE),
            state: GameState {
                phase: Phase::MainMenu,
                selected_character,
                last_result: None,
            },
            player,
            enemies,
            player_layer,
            menu,
            transitions,
        };
        frogger.enter_menu(None);
        Ok(frogger)
    }

    /// Starts image loading. With nothing to load the game is ready when
    /// this returns.
    pub fn start(&mut self) -> Result<(), EngineError> {
        info!("Starting game");
        self.engine.start()
    }

    //--- Events -----------------------------------------------------------

    /// Routes a released key to whoever has focus.
    ///
    /// Keys are dropped until the images have loaded.
    pub fn handle_key(&mut self, key: KeyCode) {
        if !self.engine.is_running() {
            trace!("Dropping {:?} before the game is ready", key);
            return;
        }
        self.router.dispatch(key);
        self.apply_transitions();
    }

    /// Same as [`handle_key`](Self::handle_key) for a DOM key code.
    pub fn handle_code(&mut self, code: u32) {
        self.handle_key(KeyCode::from_code(code));
    }

    /// Advances the engine one tick and applies what the frame requested.
    pub fn tick(&mut self, now: f64) -> Result<TickStatus, EngineError> {
        let status = self.engine.tick(now)?;
        self.apply_transitions();
        Ok(status)
    }

    //--- Transitions ------------------------------------------------------

    fn apply_transitions(&mut self) {
        loop {
            let pending = self.transitions.borrow_mut().take();
            if pending.is_empty() {
                break;
            }
            for transition in pending {
                self.apply(transition);
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        match (self.state.phase, transition) {
            (Phase::Playing, Transition::EnterMenu(outcome)) => self.enter_menu(outcome),
            (Phase::MainMenu, Transition::StartPlaying(index)) => self.start_playing(index),
            (phase, transition) => trace!("Ignoring {:?} in {:?}", transition, phase),
        }
    }

    fn enter_menu(&mut self, outcome: Option<Outcome>) {
        debug!("Entering menu (result: {:?})", outcome);

        self.enemies.borrow_mut().state_mut().pause();
        {
            let mut menu = self.menu.borrow_mut();
            menu.set_result(outcome);
            menu.state_mut().show();
        }

        let menu = Rc::clone(&self.menu);
        self.router.subscribe(move |action| menu.borrow_mut().handle(action));

        self.state.phase = Phase::MainMenu;
        self.state.last_result = outcome;
    }

    fn start_playing(&mut self, index: usize) {
        debug!("Starting play as character {}", index);

        self.menu.borrow_mut().state_mut().hide();
        self.player_layer.borrow_mut().prepare(index);

        let player_layer = Rc::clone(&self.player_layer);
        self.router.subscribe(move |action| player_layer.borrow_mut().handle(action));

        {
            let mut enemies = self.enemies.borrow_mut();
            enemies.reset_clock();
            enemies.state_mut().resume();
        }

        self.state.phase = Phase::Playing;
        self.state.selected_character = index;
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<S> {
        &mut self.engine
    }

    pub fn player(&self) -> Ref<'_, Entity> {
        self.player.borrow()
    }

    pub fn enemies(&self) -> Ref<'_, EnemiesLayer> {
        self.enemies.borrow()
    }

    pub fn menu(&self) -> Ref<'_, MenuLayer> {
        self.menu.borrow()
    }
}

//=== Game Integration ====================================================

impl<S: RenderSurface> Game for Frogger<S> {
    fn key_up(&mut self, key: KeyCode) {
        self.handle_key(key);
    }

    fn frame(&mut self, now: f64) -> Result<(), EngineError> {
        self.tick(now).map(|_| ())
    }

    fn shutdown(&mut self) {
        self.engine.stop();
    }

    fn presentation(&self) -> Option<Presentation<'_>> {
        let image = self.engine.surface().framebuffer()?;
        let caption = match self.state.phase {
            Phase::MainMenu => self.menu.borrow().caption_text(),
            Phase::Playing => None,
        };
        Some(Presentation { image, caption })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
