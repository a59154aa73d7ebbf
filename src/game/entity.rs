//=========================================================================
// Entities
//=========================================================================
//
// The closed set of things on the field.
//
// Architecture:
//   Entity = Sprite (position, image, hit-box) + EntityKind
//     ├─ Static          background tiles, menu art
//     ├─ Enemy { speed } moves right, respawns past the edge
//     └─ Player          moves one cell per action, clamped to the grid
//
// Behavior is a `match` on the kind; there is no per-kind trait object.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::{GameAction, GameConfig};
use crate::core::geometry::{CollideBox, Collidable, Rect, Sprite};
use crate::core::resources::ImageHandle;
use crate::core::surface::RenderSurface;

//=== Hit-boxes ===========================================================

/// The bug's body inside its 101x171 image.
pub const ENEMY_BOX: CollideBox = CollideBox::new(1.0, 100.0, 99.0, 42.0);

/// The character's feet.
pub const PLAYER_BOX: CollideBox = CollideBox::new(33.0, 120.0, 35.0, 20.0);

//=== Entity ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Static,
    Enemy { speed: f32 },
    Player,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub sprite: Sprite,
    pub kind: EntityKind,
}

/// The player is read by the enemies layer and moved by the player layer.
pub type SharedEntity = Rc<RefCell<Entity>>;

impl Entity {
    //--- Construction -----------------------------------------------------

    pub fn scenery(image: ImageHandle, x: f32, y: f32) -> Self {
        Self {
            sprite: Sprite::new(image, x, y),
            kind: EntityKind::Static,
        }
    }

    /// A bug at a random row and speed, entering from the left.
    pub fn enemy(image: ImageHandle, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut enemy = Self {
            sprite: Sprite::new(image, 0.0, 0.0).with_collide_box(ENEMY_BOX),
            kind: EntityKind::Enemy { speed: config.min_speed },
        };
        enemy.respawn(config, rng);
        enemy
    }

    /// The player at the start cell. The image comes with the character
    /// choice.
    pub fn player(config: &GameConfig) -> Self {
        let mut sprite = Sprite::default().with_collide_box(PLAYER_BOX);
        let (x, y) = config.start_position();
        sprite.set_position(x, y);
        Self {
            sprite,
            kind: EntityKind::Player,
        }
    }

    //--- Behavior ---------------------------------------------------------

    /// Advances by `dt` seconds.
    pub fn update(&mut self, dt: f32, config: &GameConfig, rng: &mut impl Rng) {
        match self.kind {
            EntityKind::Enemy { speed } => {
                self.sprite.move_by(speed * dt, 0.0);
                if self.sprite.x() > config.grid_width() {
                    self.respawn(config, rng);
                }
            }
            EntityKind::Static | EntityKind::Player => {}
        }
    }

    /// Re-rolls an enemy's row and speed and puts it left of the field.
    pub fn respawn(&mut self, config: &GameConfig, rng: &mut impl Rng) {
        if let EntityKind::Enemy { speed } = &mut self.kind {
            let row = rng.gen_range(config.enemy_rows.clone());
            *speed = rng.gen_range(config.min_speed..config.max_speed);
            self.sprite.set_position(config.respawn_x(), config.row_y(row));
            trace!("Enemy respawned on row {} at {:.0}px/s", row, speed);
        }
    }

    /// Applies a movement action. Returns whether the entity moved.
    ///
    /// Only the player reacts; a move that would leave the grid is
    /// ignored.
    pub fn apply(&mut self, action: GameAction, config: &GameConfig) -> bool {
        if self.kind != EntityKind::Player {
            return false;
        }

        let (x, y) = (self.sprite.x(), self.sprite.y());
        let (dx, dy) = match action {
            GameAction::Left if x > 0.0 => (-config.column_width, 0.0),
            GameAction::Right if x < config.max_player_x() => (config.column_width, 0.0),
            GameAction::Up if y > config.top_y() => (0.0, -config.row_height),
            GameAction::Down if y < config.bottom_y() => (0.0, config.row_height),
            _ => return false,
        };

        self.sprite.move_by(dx, dy);
        true
    }

    /// Puts the player back on the start cell.
    pub fn reset(&mut self, config: &GameConfig) {
        let (x, y) = config.start_position();
        self.sprite.set_position(x, y);
    }

    //--- Queries ----------------------------------------------------------

    pub fn speed(&self) -> Option<f32> {
        match self.kind {
            EntityKind::Enemy { speed } => Some(speed),
            _ => None,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        self.sprite.body.position()
    }

    /// Grid row of the sprite's cell.
    pub fn row(&self, config: &GameConfig) -> i32 {
        ((self.sprite.y() + config.sprite_lift) / config.row_height).round() as i32
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        self.sprite.draw(surface);
    }
}

impl Collidable for Entity {
    fn collide_box(&self) -> Option<Rect> {
        self.sprite.collide_box()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
