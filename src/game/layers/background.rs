//=========================================================================
// Background Layer
//=========================================================================

use log::debug;

use crate::core::layer::{Layer, LayerState};
use crate::core::resources::ResourceTable;
use crate::core::surface::RenderSurface;
use crate::engine::EngineError;
use crate::game::content::{self, ROW_TILES};
use crate::game::{Entity, GameConfig};

/// Static tile grid. Visible once loaded, never updated.
pub struct BackgroundLayer {
    state: LayerState,
    config: GameConfig,
    tiles: Vec<Entity>,
}

impl BackgroundLayer {
    pub const NAME: &'static str = "background";

    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: LayerState::new(Self::NAME).with_required_images(content::tile_images()),
            config: config.clone(),
            tiles: Vec::new(),
        }
    }

    pub fn tiles(&self) -> &[Entity] {
        &self.tiles
    }
}

impl Layer for BackgroundLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn on_load(&mut self, resources: &ResourceTable) -> Result<(), EngineError> {
        self.tiles.clear();
        for (row, url) in ROW_TILES.iter().enumerate().take(self.config.rows as usize) {
            let image = resources.get(url)?;
            for column in 0..self.config.columns {
                let x = self.config.column_x(column);
                let y = row as f32 * self.config.row_height;
                self.tiles.push(Entity::scenery(image.clone(), x, y));
            }
        }
        debug!("Background laid out with {} tiles", self.tiles.len());

        self.state.show();
        Ok(())
    }

    fn update(&mut self, _now: f64) {}

    fn draw(&self, surface: &mut dyn RenderSurface) {
        for tile in &self.tiles {
            tile.draw(surface);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::ImageHandle;
    use crate::core::surface::testing::RecordingSurface;
    use crate::game::content::{GRASS_BLOCK, STONE_BLOCK, WATER_BLOCK};

    fn loaded() -> BackgroundLayer {
        let mut resources = ResourceTable::new();
        for url in content::tile_images() {
            resources.insert(ImageHandle::solid(url, 1, 1, [0, 0, 0, 255]));
        }
        let mut layer = BackgroundLayer::new(&GameConfig::default());
        layer.on_load(&resources).unwrap();
        layer
    }

    #[test]
    fn grid_is_water_stone_grass() {
        let layer = loaded();
        let mut surface = RecordingSurface::new(505, 606);
        layer.draw(&mut surface);

        let images = surface.images();
        assert_eq!(images.len(), 30);
        assert_eq!(images[0], (WATER_BLOCK.to_string(), 0.0, 0.0));
        assert_eq!(images[4], (WATER_BLOCK.to_string(), 404.0, 0.0));
        assert_eq!(images[5], (STONE_BLOCK.to_string(), 0.0, 83.0));
        assert_eq!(images[19], (STONE_BLOCK.to_string(), 404.0, 249.0));
        assert_eq!(images[20], (GRASS_BLOCK.to_string(), 0.0, 332.0));
        assert_eq!(images[29], (GRASS_BLOCK.to_string(), 404.0, 415.0));
    }

    #[test]
    fn visible_but_not_running_after_load() {
        let layer = loaded();
        assert!(layer.is_visible());
        assert!(!layer.is_running());
    }

    #[test]
    fn missing_tile_image_fails_load() {
        let mut layer = BackgroundLayer::new(&GameConfig::default());
        assert!(matches!(
            layer.on_load(&ResourceTable::new()),
            Err(EngineError::MissingResource(_))
        ));
    }
}
