//=========================================================================
// Geometry
//=========================================================================
//
// Positioned entities and axis-aligned collision boxes.
//
// Architecture:
//   Drawable (x, y)
//     └─ Sprite = Drawable + Option<ImageHandle> + Option<CollideBox>
//
//   CollideBox is relative to the owning Drawable. `Rect` is the
//   absolute box used by `are_collided`.
//
// Bounds policy does not live here: `move_by` is a pure translation and
// each entity's own update logic decides where it may go.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::resources::ImageHandle;
use crate::core::surface::RenderSurface;

//=== Drawable ============================================================

/// Minimal positioned, movable entity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Drawable {
    pub x: f32,
    pub y: f32,
}

impl Drawable {
    pub fn new(x: f32, y: f32) -> Self {
        debug_assert!(x.is_finite() && y.is_finite(), "Drawable position must be finite");
        Self { x, y }
    }

    /// Absolute placement (spawn, respawn, reset).
    pub fn set_position(&mut self, x: f32, y: f32) {
        debug_assert!(x.is_finite() && y.is_finite(), "Drawable position must be finite");
        self.x = x;
        self.y = y;
    }

    /// Relative translation, no bounds checking.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
        debug_assert!(self.x.is_finite() && self.y.is_finite(), "Drawable moved to a non-finite position");
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

//=== Rect ================================================================

/// Absolute axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Overlap test with inclusive edges: touching boxes intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }
}

//=== CollideBox ==========================================================

/// Hit-box offset from the owning drawable's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollideBox {
    pub x_offset: f32,
    pub y_offset: f32,
    pub width: f32,
    pub height: f32,
}

impl CollideBox {
    pub const fn new(x_offset: f32, y_offset: f32, width: f32, height: f32) -> Self {
        Self { x_offset, y_offset, width, height }
    }

    /// Resolves this box against a drawable's current position.
    pub fn at(&self, body: &Drawable) -> Rect {
        Rect::new(
            body.x + self.x_offset,
            body.y + self.y_offset,
            self.width,
            self.height,
        )
    }
}

//=== Collidable ==========================================================

/// Anything that may take part in collision tests.
///
/// `None` means the entity never collides.
pub trait Collidable {
    fn collide_box(&self) -> Option<Rect>;
}

/// Returns `true` when both entities have a box and the boxes overlap.
///
/// Boundary contact counts as a collision. The test is symmetric.
pub fn are_collided(a: &impl Collidable, b: &impl Collidable) -> bool {
    match (a.collide_box(), b.collide_box()) {
        (Some(a), Some(b)) => a.intersects(&b),
        _ => false,
    }
}

//=== Sprite ==============================================================

/// A drawable bound to one loaded image.
///
/// The image may be unassigned until resources are loaded, or swapped at
/// runtime (e.g. when a character is chosen).
#[derive(Debug, Clone, Default)]
pub struct Sprite {
    pub body: Drawable,
    pub image: Option<ImageHandle>,
    pub collide: Option<CollideBox>,
}

impl Sprite {
    pub fn new(image: ImageHandle, x: f32, y: f32) -> Self {
        Self {
            body: Drawable::new(x, y),
            image: Some(image),
            collide: None,
        }
    }

    pub fn with_collide_box(mut self, collide: CollideBox) -> Self {
        self.collide = Some(collide);
        self
    }

    pub fn set_image(&mut self, image: ImageHandle) {
        self.image = Some(image);
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.body.set_position(x, y);
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.body.move_by(dx, dy);
    }

    pub fn x(&self) -> f32 {
        self.body.x
    }

    pub fn y(&self) -> f32 {
        self.body.y
    }

    /// Draws the image at the current position. Never mutates the sprite.
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        if let Some(image) = &self.image {
            surface.draw_image(image, self.body.x, self.body.y);
        }
    }
}

impl Collidable for Sprite {
    fn collide_box(&self) -> Option<Rect> {
        self.collide.map(|collide| collide.at(&self.body))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::testing::{DrawCall, RecordingSurface};

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Sprite {
        let mut sprite = Sprite::default().with_collide_box(CollideBox::new(0.0, 0.0, w, h));
        sprite.set_position(x, y);
        sprite
    }

    //--- Drawable ---------------------------------------------------------

    #[test]
    fn move_by_is_pure_translation() {
        let mut body = Drawable::new(10.0, 20.0);
        body.move_by(-30.0, 5.0);
        assert_eq!(body.position(), (-20.0, 25.0));
    }

    #[test]
    fn set_position_is_absolute() {
        let mut body = Drawable::new(10.0, 20.0);
        body.set_position(202.0, 385.0);
        assert_eq!(body.position(), (202.0, 385.0));
    }

    //--- Collision --------------------------------------------------------

    #[test]
    fn overlapping_boxes_collide() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        let b = boxed(5.0, 5.0, 10.0, 10.0);
        assert!(are_collided(&a, &b));
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        assert!(!are_collided(&a, &boxed(10.5, 0.0, 10.0, 10.0)));
        assert!(!are_collided(&a, &boxed(-10.5, 0.0, 10.0, 10.0)));
        assert!(!are_collided(&a, &boxed(0.0, 10.5, 10.0, 10.0)));
        assert!(!are_collided(&a, &boxed(0.0, -10.5, 10.0, 10.0)));
    }

    #[test]
    fn shared_edge_counts_as_collision() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        assert!(are_collided(&a, &boxed(10.0, 0.0, 10.0, 10.0)));
        assert!(are_collided(&a, &boxed(0.0, 10.0, 10.0, 10.0)));
        assert!(are_collided(&a, &boxed(10.0, 10.0, 5.0, 5.0)), "corner contact");
    }

    #[test]
    fn collision_is_symmetric() {
        let samples = [
            boxed(0.0, 0.0, 10.0, 10.0),
            boxed(10.0, 0.0, 3.0, 3.0),
            boxed(-4.0, 9.0, 4.0, 2.0),
            boxed(20.0, 20.0, 1.0, 1.0),
            boxed(2.0, 2.0, 1.0, 1.0),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(are_collided(a, b), are_collided(b, a));
            }
        }
    }

    #[test]
    fn offset_box_follows_position() {
        let mut sprite = Sprite::default().with_collide_box(CollideBox::new(33.0, 120.0, 35.0, 20.0));
        sprite.set_position(202.0, 385.0);
        assert_eq!(sprite.collide_box(), Some(Rect::new(235.0, 505.0, 35.0, 20.0)));
    }

    #[test]
    fn missing_box_never_collides() {
        let plain = Sprite::default();
        let other = boxed(0.0, 0.0, 100.0, 100.0);
        assert!(!are_collided(&plain, &other));
        assert!(!are_collided(&other, &plain));
    }

    //--- Sprite -----------------------------------------------------------

    #[test]
    fn sprite_draws_image_at_position() {
        let image = ImageHandle::solid("images/enemy-bug.png", 4, 4, [255, 0, 0, 255]);
        let sprite = Sprite::new(image, 12.0, 34.0);
        let mut surface = RecordingSurface::new(505, 606);

        sprite.draw(&mut surface);

        assert_eq!(
            surface.calls,
            vec![DrawCall::Image { url: "images/enemy-bug.png".to_string(), x: 12.0, y: 34.0 }]
        );
    }

    #[test]
    fn sprite_without_image_draws_nothing() {
        let sprite = Sprite::default();
        let mut surface = RecordingSurface::new(505, 606);
        sprite.draw(&mut surface);
        assert!(surface.calls.is_empty());
    }
}
