use crate::raster::Raster;
use sdl2::pixels::Color;

/// How sprite pixels combine with what is already in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    /// Every source pixel is written, including transparent ones.
    Normal,
    /// Source pixels with alpha 0 are skipped (sprite cut-outs).
    Mask,
}

/// Software framebuffer the game composes each frame into.
///
/// The buffer deliberately persists between frames: the won/lost screens draw
/// their banner over whatever the last play frame left behind, so there is no
/// implicit clear. `main` uploads `pixels()` into a streaming texture once
/// per frame.
pub struct Screen {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    pixel_mode: PixelMode,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        Screen {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            pixel_mode: PixelMode::Normal,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major. Pitch is `width * 4`.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn set_pixel_mode(&mut self, mode: PixelMode) {
        self.pixel_mode = mode;
    }

    pub fn clear(&mut self, color: Color) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        if self.pixel_mode == PixelMode::Mask && color.a == 0 {
            return;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[index..index + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// Fills an opaque rectangle, ignoring the pixel mode. Used by the text
    /// renderer for glyph blocks.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let px = x + col;
                let py = y + row;
                if px < 0 || py < 0 || px >= self.width as i32 || py >= self.height as i32 {
                    continue;
                }
                let index = (py as usize * self.width as usize + px as usize) * 4;
                self.pixels[index..index + 4]
                    .copy_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        }
    }

    /// Blits a whole raster with its top-left corner at (x, y).
    pub fn draw_sprite(&mut self, x: i32, y: i32, raster: &Raster) {
        self.draw_partial_sprite(x, y, raster, 0, 0, raster.width(), raster.height());
    }

    /// Blits a `width` x `height` window of `raster`, read from
    /// (src_x, src_y), with its top-left corner at (x, y). Source reads
    /// outside the raster come back transparent and are clipped against the
    /// screen edges.
    pub fn draw_partial_sprite(
        &mut self,
        x: i32,
        y: i32,
        raster: &Raster,
        src_x: i32,
        src_y: i32,
        width: u32,
        height: u32,
    ) {
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let color = raster.get_pixel(src_x + col, src_y + row);
                self.put_pixel(x + col, y + row, color);
            }
        }
    }
}
