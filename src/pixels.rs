use crate::color::Rgba8;

/// A rendered pixel buffer. Produced once per fill operation and immutable
/// for its duration.
pub struct Raster {
    pub width: usize,
    pub height: usize,

    pixels: Vec<Rgba8>,
}

impl Raster {
    pub fn new(pixels: Vec<Rgba8>, width: usize, height: usize) -> Self {
        assert_eq!(pixels.len(), width * height);

        Self {
            width,
            height,
            pixels,
        }
    }

    /// A buffer filled with a single color.
    pub fn solid(color: Rgba8, width: usize, height: usize) -> Self {
        Self::new(vec![color; width * height], width, height)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgba8> {
        if x < self.width && y < self.height {
            self.pixels.get(x + y * self.width).copied()
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, color: Rgba8) {
        if x < self.width && y < self.height {
            self.pixels[x + y * self.width] = color;
        }
    }
}
