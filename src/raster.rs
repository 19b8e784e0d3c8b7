use sdl2::image::LoadSurface;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::surface::Surface;

/// An owned CPU-side image: RGBA pixels plus dimensions.
///
/// Rasters back everything the game draws (backgrounds, sprites) and
/// everything it samples (walk masks). Keeping the pixels on the CPU is what
/// makes per-pixel mask lookups possible; the canvas only ever sees the
/// composed frame.
#[derive(Debug)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Loads a PNG from disk and converts it to RGBA.
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let surface = Surface::from_file(path).map_err(|e| format!("{path}: {e}"))?;
        let converted = surface
            .convert_format(PixelFormatEnum::RGBA32)
            .map_err(|e| format!("{path}: {e}"))?;

        let width = converted.width();
        let height = converted.height();
        let pitch = converted.pitch() as usize;
        let row_bytes = width as usize * 4;

        // The surface pitch may include padding; copy row by row.
        let pixels = converted.with_lock(|data| {
            let mut out = Vec::with_capacity(row_bytes * height as usize);
            for row in 0..height as usize {
                let start = row * pitch;
                out.extend_from_slice(&data[start..start + row_bytes]);
            }
            out
        });

        Ok(Raster {
            width,
            height,
            pixels,
        })
    }

    /// Creates a raster from raw RGBA bytes (row-major, 4 bytes per pixel).
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(format!(
                "pixel buffer is {} bytes, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            ));
        }
        Ok(Raster {
            width,
            height,
            pixels,
        })
    }

    /// Creates a raster filled with a single color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Raster {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the color at (x, y). Out-of-bounds reads return fully
    /// transparent black, which every consumer treats as "nothing there"
    /// (the walk mask classifies it as open ground).
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Color::RGBA(0, 0, 0, 0);
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        Color::RGBA(
            self.pixels[index],
            self.pixels[index + 1],
            self.pixels[index + 2],
            self.pixels[index + 3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_rejects_wrong_length() {
        assert!(Raster::from_pixels(2, 2, vec![0; 15]).is_err());
        assert!(Raster::from_pixels(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_get_pixel_addressing() {
        // 2x2 raster: red, green / blue, white
        let pixels = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 255,
        ];
        let raster = Raster::from_pixels(2, 2, pixels).unwrap();

        assert_eq!(raster.get_pixel(0, 0), Color::RGBA(255, 0, 0, 255));
        assert_eq!(raster.get_pixel(1, 0), Color::RGBA(0, 255, 0, 255));
        assert_eq!(raster.get_pixel(0, 1), Color::RGBA(0, 0, 255, 255));
        assert_eq!(raster.get_pixel(1, 1), Color::RGBA(255, 255, 255, 255));
    }

    #[test]
    fn test_get_pixel_out_of_bounds_is_transparent() {
        let raster = Raster::solid(4, 4, Color::RGB(10, 20, 30));

        assert_eq!(raster.get_pixel(-1, 0), Color::RGBA(0, 0, 0, 0));
        assert_eq!(raster.get_pixel(0, -1), Color::RGBA(0, 0, 0, 0));
        assert_eq!(raster.get_pixel(4, 0), Color::RGBA(0, 0, 0, 0));
        assert_eq!(raster.get_pixel(0, 4), Color::RGBA(0, 0, 0, 0));
    }

    #[test]
    fn test_solid_fill() {
        let raster = Raster::solid(3, 2, Color::RGB(7, 8, 9));
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.get_pixel(2, 1), Color::RGBA(7, 8, 9, 255));
    }
}
