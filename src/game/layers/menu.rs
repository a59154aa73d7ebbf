//=========================================================================
// Menu Layer
//=========================================================================
//
// Character selection screen drawn over the field.
//
// Draw order: dimming overlay, result caption (if any), selector under
// the current choice, then the five characters in a row.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::layer::{Layer, LayerState};
use crate::core::resources::{ImageHandle, ResourceTable};
use crate::core::surface::{Color, RenderSurface, TextAlign, TextStyle};
use crate::core::transition::SharedTransitions;
use crate::engine::EngineError;
use crate::game::content::{CHARACTERS, SELECTOR};
use crate::game::{GameAction, GameConfig, Outcome, Transition};

//=== Constants ===========================================================

const CAPTION_FONT: &str = "48px serif";
const CAPTION_Y: f32 = 50.0;

fn overlay() -> Color {
    Color::rgba(0, 0, 0, 0.85)
}

//=== MenuLayer ===========================================================

pub struct MenuLayer {
    state: LayerState,
    config: GameConfig,
    choice: usize,
    result: Option<Outcome>,
    selector: Option<ImageHandle>,
    characters: Vec<ImageHandle>,
    transitions: SharedTransitions<Transition>,
}

impl MenuLayer {
    pub const NAME: &'static str = "menu";

    pub fn new(config: &GameConfig, transitions: SharedTransitions<Transition>) -> Self {
        let images = std::iter::once(SELECTOR).chain(CHARACTERS);
        Self {
            state: LayerState::new(Self::NAME).with_required_images(images),
            config: config.clone(),
            choice: config.initial_character.min(CHARACTERS.len() - 1),
            result: None,
            selector: None,
            characters: Vec::new(),
            transitions,
        }
    }

    pub fn choice(&self) -> usize {
        self.choice
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn set_result(&mut self, result: Option<Outcome>) {
        self.result = result;
    }

    /// Moves the selector or confirms the current choice.
    pub fn handle(&mut self, action: GameAction) {
        let last = CHARACTERS.len() - 1;
        match action {
            GameAction::Left => self.choice = self.choice.saturating_sub(1),
            GameAction::Right => self.choice = (self.choice + 1).min(last),
            GameAction::Select => {
                debug!("Character {} selected", self.choice);
                self.transitions.borrow_mut().push(Transition::StartPlaying(self.choice));
            }
            GameAction::Up | GameAction::Down => {}
        }
    }

    /// Result text shown above the selector, if any.
    pub fn caption_text(&self) -> Option<&'static str> {
        self.caption().map(|(text, _)| text)
    }

    fn caption(&self) -> Option<(&'static str, Color)> {
        match self.result? {
            Outcome::Win => Some(("You Win !", Color::GREEN)),
            Outcome::Lose => Some(("You Lose !", Color::RED)),
        }
    }
}

impl Layer for MenuLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn on_load(&mut self, resources: &ResourceTable) -> Result<(), EngineError> {
        self.selector = Some(resources.get(SELECTOR)?.clone());
        self.characters = CHARACTERS
            .iter()
            .map(|url| resources.get(url).cloned())
            .collect::<Result<Vec<_>, EngineError>>()?;
        Ok(())
    }

    fn update(&mut self, _now: f64) {}

    fn draw(&self, surface: &mut dyn RenderSurface) {
        let width = surface.width() as f32;
        let height = surface.height() as f32;
        surface.fill_rect(0.0, 0.0, width, height, overlay());

        if let Some((text, color)) = self.caption() {
            let style = TextStyle::new(CAPTION_FONT, color, TextAlign::Center);
            surface.fill_text(text, width / 2.0, CAPTION_Y, &style);
            surface.stroke_text(text, width / 2.0, CAPTION_Y, &style);
        }

        let y = self.config.menu_y;
        if let Some(selector) = &self.selector {
            surface.draw_image(selector, self.choice as f32 * self.config.column_width, y);
        }
        for (index, image) in self.characters.iter().enumerate() {
            surface.draw_image(image, index as f32 * self.config.column_width, y);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
