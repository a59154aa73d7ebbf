//=========================================================================
// Game Configuration
//=========================================================================
//
// Field geometry and tuning for the arcade game.
//
// `Default` holds the canonical values: a 505x606 field laid out as a
// 5x6 grid of 101x83 cells, three bugs running 120 to 380 px/s on the
// three stone rows.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::SeedableRng;

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub field_width: u32,
    pub field_height: u32,
    pub column_width: f32,
    pub row_height: f32,
    pub columns: u32,
    pub rows: u32,

    /// Sprites sit this many pixels above their row's top edge.
    pub sprite_lift: f32,

    pub enemy_count: usize,
    pub enemy_rows: RangeInclusive<u32>,
    pub min_speed: f32,
    pub max_speed: f32,

    pub start_column: u32,
    pub start_row: u32,

    pub menu_y: f32,
    pub initial_character: usize,

    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 505,
            field_height: 606,
            column_width: 101.0,
            row_height: 83.0,
            columns: 5,
            rows: 6,
            sprite_lift: 30.0,
            enemy_count: 3,
            enemy_rows: 1..=3,
            min_speed: 120.0,
            max_speed: 380.0,
            start_column: 2,
            start_row: 5,
            menu_y: 200.0,
            initial_character: 2,
            seed: None,
        }
    }
}

impl GameConfig {
    //--- Builder-style Setters --------------------------------------------

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Panics
    ///
    /// Panics if `count == 0`.
    pub fn with_enemy_count(mut self, count: usize) -> Self {
        assert!(count > 0, "Enemy count must be positive");
        self.enemy_count = count;
        self
    }

    /// # Panics
    ///
    /// Panics unless `0 < min < max`.
    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        assert!(min > 0.0 && min < max, "Speed range must satisfy 0 < min < max, got {}..{}", min, max);
        self.min_speed = min;
        self.max_speed = max;
        self
    }

    /// Grid size in cells. The start cell moves to the bottom row,
    /// clamped to the last column.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_grid(mut self, columns: u32, rows: u32) -> Self {
        assert!(columns > 0 && rows > 0, "Grid must have at least one cell, got {}x{}", columns, rows);
        self.columns = columns;
        self.rows = rows;
        self.start_column = self.start_column.min(columns - 1);
        self.start_row = rows - 1;
        self
    }

    //--- Derived Geometry -------------------------------------------------

    /// Right edge of the grid; enemies past it respawn.
    pub fn grid_width(&self) -> f32 {
        self.column_width * self.columns as f32
    }

    /// Enemies re-enter one column left of the field.
    pub fn respawn_x(&self) -> f32 {
        -self.column_width
    }

    /// Sprite y for a grid row.
    pub fn row_y(&self, row: u32) -> f32 {
        row as f32 * self.row_height - self.sprite_lift
    }

    pub fn column_x(&self, column: u32) -> f32 {
        column as f32 * self.column_width
    }

    pub fn start_position(&self) -> (f32, f32) {
        (self.column_x(self.start_column), self.row_y(self.start_row))
    }

    /// Largest x the player may occupy.
    pub fn max_player_x(&self) -> f32 {
        self.column_x(self.columns.saturating_sub(1))
    }

    /// Sprite y of the top (goal) row.
    pub fn top_y(&self) -> f32 {
        self.row_y(0)
    }

    /// Sprite y of the bottom row.
    pub fn bottom_y(&self) -> f32 {
        self.row_y(self.rows.saturating_sub(1))
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn canonical_geometry() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width(), 505.0);
        assert_eq!(config.respawn_x(), -101.0);
        assert_eq!(config.start_position(), (202.0, 385.0));
        assert_eq!(config.max_player_x(), 404.0);
        assert_eq!(config.top_y(), -30.0);
        assert_eq!(config.bottom_y(), 385.0);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = GameConfig::default().with_seed(7);
        let (mut a, mut b) = (config.rng(), config.rng());
        for _ in 0..8 {
            assert_eq!(a.gen::<u32>(), b.gen::<u32>());
        }
    }

    #[test]
    fn empty_grid_edges_stay_on_first_cell() {
        let config = GameConfig {
            columns: 0,
            rows: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.max_player_x(), 0.0);
        assert_eq!(config.bottom_y(), config.top_y());
    }

    #[test]
    fn with_grid_moves_start_cell_inside() {
        let config = GameConfig::default().with_grid(2, 4);
        assert_eq!(config.max_player_x(), 101.0);
        assert_eq!(config.bottom_y(), 219.0);
        assert_eq!(config.start_position(), (101.0, 219.0));
    }

    #[test]
    #[should_panic(expected = "Grid must have at least one cell")]
    fn zero_grid_rejected() {
        GameConfig::default().with_grid(5, 0);
    }

    #[test]
    #[should_panic(expected = "Enemy count must be positive")]
    fn zero_enemies_rejected() {
        GameConfig::default().with_enemy_count(0);
    }

    #[test]
    #[should_panic(expected = "Speed range must satisfy")]
    fn inverted_speed_range_rejected() {
        GameConfig::default().with_speed_range(300.0, 100.0);
    }
}
