//! Row-major RGB565 extraction of a rectangle.

use serde::Serialize;

use crate::geometry::Rect;
use crate::pixel::{encode_rgb565, PixelSource};

/// Encoded pixels of one region, indexed as `row * width + col`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EncodedRegion {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u16>,
}

impl EncodedRegion {
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, col: u32, row: u32) -> Option<u16> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.pixels.get((row * self.width + col) as usize).copied()
    }
}

/// Encode every pixel of `rect`, rows top to bottom, columns left to right.
///
/// `rect` must lie inside `source`. A zero-area rect yields an empty region.
pub fn extract<S: PixelSource + ?Sized>(source: &S, rect: Rect) -> EncodedRegion {
    let mut pixels = Vec::with_capacity(rect.area() as usize);
    for row in 0..rect.h {
        for col in 0..rect.w {
            let [r, g, b] = source.rgb(rect.x + col, rect.y + row);
            pixels.push(encode_rgb565(r, g, b));
        }
    }
    EncodedRegion { width: rect.w, height: rect.h, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x * 8) as u8, (y * 4) as u8, ((x + y) * 8) as u8]))
    }

    #[test]
    fn zero_area_is_empty() {
        let img = gradient(4, 4);
        let region = extract(&img, Rect::new(2, 1, 0, 3));
        assert!(region.is_empty());
        assert_eq!((region.width, region.height), (0, 3));
    }

    #[test]
    fn row_major_order_matches_direct_encoding() {
        let img = gradient(10, 8);
        let rect = Rect::new(3, 2, 5, 4);
        let region = extract(&img, rect);
        assert_eq!(region.pixels.len(), 20);
        for row in 0..rect.h {
            for col in 0..rect.w {
                let [r, g, b] = img.get_pixel(rect.x + col, rect.y + row).0;
                assert_eq!(region.pixels[(row * rect.w + col) as usize], encode_rgb565(r, g, b));
                assert_eq!(region.get(col, row), Some(encode_rgb565(r, g, b)));
            }
        }
        assert_eq!(region.get(5, 0), None);
    }
}
