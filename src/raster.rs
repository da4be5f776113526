/// An in-memory RGB image: dimensions plus a flat row-major pixel buffer,
/// 3 bytes per pixel. Row 0 comes first, each row left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub height: u32,
    pub width: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    pub fn new(height: u32, width: u32, pixels: Vec<u8>) -> Self {
        Raster {
            height,
            width,
            pixels,
        }
    }

    /// All-black raster of the given dimensions.
    pub fn black(height: u32, width: u32) -> Self {
        Raster {
            height,
            width,
            pixels: vec![0; height as usize * width as usize * 3],
        }
    }

    /// Build a raster from an RGBA buffer of matching dimensions. The alpha
    /// channel is dropped, not premultiplied or validated; the `.bin` format
    /// only carries three channels and this truncation is intended.
    pub fn from_rgba(height: u32, width: u32, rgba: &[u8]) -> Self {
        let mut pixels = Vec::with_capacity(height as usize * width as usize * 3);
        for px in rgba.chunks_exact(4) {
            pixels.extend_from_slice(&px[..3]);
        }
        Raster {
            height,
            width,
            pixels,
        }
    }

    fn offset(&self, row: u32, col: u32) -> usize {
        3 * (row as usize * self.width as usize + col as usize)
    }

    pub fn pixel(&self, row: u32, col: u32) -> [u8; 3] {
        let i = self.offset(row, col);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    pub fn set_pixel(&mut self, row: u32, col: u32, rgb: [u8; 3]) {
        let i = self.offset(row, col);
        self.pixels[i..i + 3].copy_from_slice(&rgb);
    }
}
