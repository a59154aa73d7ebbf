//=========================================================================
// Enemies Layer
//=========================================================================
//
// Bugs crossing the stone rows, and the collision check against the
// player.
//
// Each update moves every bug by `speed * dt`, respawning those past the
// right edge, then tests each one against the player. The collision
// callback fires once per overlapping bug per frame; what a collision
// means is up to whoever installed the callback.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};
use rand::rngs::StdRng;

//=== Internal Dependencies ===============================================

use crate::core::geometry::are_collided;
use crate::core::layer::{Layer, LayerState};
use crate::core::resources::ResourceTable;
use crate::core::surface::RenderSurface;
use crate::engine::EngineError;
use crate::game::content::ENEMY_BUG;
use crate::game::{Entity, GameConfig, SharedEntity};

//=== EnemiesLayer ========================================================

pub struct EnemiesLayer {
    state: LayerState,
    config: GameConfig,
    rng: StdRng,
    enemies: Vec<Entity>,
    player: SharedEntity,
    on_collision: Box<dyn FnMut()>,
    last_now: Option<f64>,
}

impl EnemiesLayer {
    pub const NAME: &'static str = "enemies";

    pub fn new(config: &GameConfig, player: SharedEntity) -> Self {
        Self {
            state: LayerState::new(Self::NAME).with_required_images([ENEMY_BUG]),
            config: config.clone(),
            rng: config.rng(),
            enemies: Vec::new(),
            player,
            on_collision: Box::new(|| {}),
            last_now: None,
        }
    }

    /// Installs the collision callback, replacing the previous one.
    pub fn set_on_collision(&mut self, callback: impl FnMut() + 'static) {
        self.on_collision = Box::new(callback);
    }

    /// Forgets the last timestamp; the next update moves nothing.
    pub fn reset_clock(&mut self) {
        self.last_now = None;
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Entity] {
        &mut self.enemies
    }
}

impl Layer for EnemiesLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn on_load(&mut self, resources: &ResourceTable) -> Result<(), EngineError> {
        let image = resources.get(ENEMY_BUG)?;
        self.enemies = (0..self.config.enemy_count)
            .map(|_| Entity::enemy(image.clone(), &self.config, &mut self.rng))
            .collect();
        debug!("Spawned {} enemies", self.enemies.len());

        self.state.show();
        Ok(())
    }

    fn update(&mut self, now: f64) {
        let dt = match self.last_now {
            Some(last) => ((now - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_now = Some(now);

        for enemy in &mut self.enemies {
            enemy.update(dt, &self.config, &mut self.rng);
        }

        let hits = {
            let player = self.player.borrow();
            self.enemies.iter().filter(|enemy| are_collided(*enemy, &*player)).count()
        };
        for _ in 0..hits {
            trace!("Enemy hit the player at {:.1}ms", now);
            (self.on_collision)();
        }
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        for enemy in &self.enemies {
            enemy.draw(surface);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
