//=========================================================================
// Player Layer
//=========================================================================
//
// The player's character and its reaction to movement actions.
//
// The player entity itself is shared with the enemies layer, which only
// reads it. Reaching the water row queues a win.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error};

//=== Internal Dependencies ===============================================

use crate::core::layer::{Layer, LayerState};
use crate::core::resources::{ImageHandle, ResourceTable};
use crate::core::surface::RenderSurface;
use crate::core::transition::SharedTransitions;
use crate::engine::EngineError;
use crate::game::content::CHARACTERS;
use crate::game::{GameAction, GameConfig, Outcome, SharedEntity, Transition};

//=== PlayerLayer =========================================================

pub struct PlayerLayer {
    state: LayerState,
    config: GameConfig,
    player: SharedEntity,
    characters: Vec<ImageHandle>,
    transitions: SharedTransitions<Transition>,
}

impl PlayerLayer {
    pub const NAME: &'static str = "player";

    pub fn new(config: &GameConfig, player: SharedEntity, transitions: SharedTransitions<Transition>) -> Self {
        Self {
            state: LayerState::new(Self::NAME).with_required_images(CHARACTERS),
            config: config.clone(),
            player,
            characters: Vec::new(),
            transitions,
        }
    }

    /// Dresses the player as character `index` and puts it on the start
    /// cell.
    pub fn prepare(&mut self, index: usize) {
        let mut player = self.player.borrow_mut();
        match self.characters.get(index) {
            Some(image) => player.sprite.set_image(image.clone()),
            None => error!("No character image at index {}", index),
        }
        player.reset(&self.config);
    }

    /// Moves the player. Reaching the top row ends the run with a win.
    pub fn handle(&mut self, action: GameAction) {
        let reached_goal = {
            let mut player = self.player.borrow_mut();
            player.apply(action, &self.config) && player.row(&self.config) == 0
        };

        if reached_goal {
            debug!("Player reached the water");
            self.transitions.borrow_mut().push(Transition::EnterMenu(Some(Outcome::Win)));
        }
    }
}

impl Layer for PlayerLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn on_load(&mut self, resources: &ResourceTable) -> Result<(), EngineError> {
        self.characters = CHARACTERS
            .iter()
            .map(|url| resources.get(url).cloned())
            .collect::<Result<Vec<_>, EngineError>>()?;

        if let Some(first) = self.characters.first() {
            self.player.borrow_mut().sprite.set_image(first.clone());
        }

        self.state.show();
        Ok(())
    }

    fn update(&mut self, _now: f64) {}

    fn draw(&self, surface: &mut dyn RenderSurface) {
        self.player.borrow().draw(surface);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
