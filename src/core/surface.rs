//=========================================================================
// Render Surface
//=========================================================================
//
// The drawing seam between layers and whatever ends up showing pixels.
//
// Layers draw through `&mut dyn RenderSurface` only. `Canvas` is the
// stock CPU implementation backed by an `image::RgbaImage`:
// - `draw_image` / `fill_rect` blend source-over into the framebuffer
// - text is not rasterized; captions are recorded per frame
// - `framebuffer` hands the finished frame to whoever presents it
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use image::{Rgba, RgbaImage};
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::resources::ImageHandle;

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS-style `rgba()` with a fractional alpha in `0.0..=1.0`.
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b, a }
    }

    fn to_pixel(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

//=== Text ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font, color and alignment of a caption.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: String,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(font: &str, color: Color, align: TextAlign) -> Self {
        Self {
            font: font.to_string(),
            color,
            align,
        }
    }
}

//=== RenderSurface =======================================================

/// 2D drawing context handed to layers every frame.
pub trait RenderSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Called by the engine once per frame before the first layer draws.
    fn begin_frame(&mut self) {}

    fn draw_image(&mut self, image: &ImageHandle, x: f32, y: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);

    fn stroke_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);

    /// The finished pixels of the last frame, for surfaces that render to
    /// memory.
    fn framebuffer(&self) -> Option<&RgbaImage> {
        None
    }
}

//=== Canvas ==============================================================

/// A caption requested during the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
    pub stroked: bool,
}

/// CPU framebuffer surface.
pub struct Canvas {
    frame: RgbaImage,
    captions: Vec<Caption>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: RgbaImage::from_pixel(width, height, Color::BLACK.to_pixel()),
            captions: Vec::new(),
        }
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.frame.width() || y >= self.frame.height() {
            return None;
        }
        let Rgba([r, g, b, a]) = *self.frame.get_pixel(x, y);
        Some(Color { r, g, b, a })
    }

    /// Captions requested since the last `begin_frame`.
    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    /// Writes the current framebuffer as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<(), image::ImageError> {
        debug!("Saving canvas to {}", path.display());
        self.frame.save(path)
    }

    fn blend(&mut self, x: i64, y: i64, src: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.frame.width() as i64 || y >= self.frame.height() as i64 {
            return;
        }

        let src_a = src.0[3] as u32;
        if src_a == 0 {
            return;
        }

        let dst = self.frame.get_pixel_mut(x as u32, y as u32);
        if src_a == 255 {
            *dst = src;
            return;
        }

        let inv = 255 - src_a;
        for channel in 0..3 {
            let s = src.0[channel] as u32;
            let d = dst.0[channel] as u32;
            dst.0[channel] = ((s * src_a + d * inv + 127) / 255) as u8;
        }
        let dst_a = dst.0[3] as u32;
        dst.0[3] = (src_a + (dst_a * inv + 127) / 255).min(255) as u8;
    }
}

impl RenderSurface for Canvas {
    fn width(&self) -> u32 {
        self.frame.width()
    }

    fn height(&self) -> u32 {
        self.frame.height()
    }

    fn begin_frame(&mut self) {
        self.captions.clear();
    }

    fn draw_image(&mut self, image: &ImageHandle, x: f32, y: f32) {
        let origin_x = x.round() as i64;
        let origin_y = y.round() as i64;

        for (px, py, pixel) in image.pixels().enumerate_pixels() {
            self.blend(origin_x + px as i64, origin_y + py as i64, *pixel);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let x0 = (x.round() as i64).max(0);
        let y0 = (y.round() as i64).max(0);
        let x1 = ((x + width).round() as i64).min(self.frame.width() as i64);
        let y1 = ((y + height).round() as i64).min(self.frame.height() as i64);

        let pixel = color.to_pixel();
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, pixel);
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.captions.push(Caption {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
            stroked: false,
        });
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.captions.push(Caption {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
            stroked: true,
        });
    }

    fn framebuffer(&self) -> Option<&RgbaImage> {
        Some(&self.frame)
    }
}

//=========================================================================
// Recording Surface (tests)
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================
