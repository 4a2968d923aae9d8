// Core pixel and size types shared by the layer, the compositor and the demo host.

use crate::error::{Error, Result};

/// A packed pixel plane. Each entry is 0x00RRGGBB, the same layout minifb presents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,     // columns in device pixels
    pub height: usize,    // rows in device pixels
    pub pixels: Vec<u32>, // length = width * height
}

impl FrameBuffer {
    /// Allocate a plane filled with `fill`, reporting exhaustion instead of aborting.
    pub fn try_new(width: usize, height: usize, fill: u32) -> Result<Self> {
        let pixels = try_alloc(width, height, fill)?;
        Ok(Self { width, height, pixels })
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[self.index(x, y)]
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }
}

/// Logical (layout) size of a renderable region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogicalSize {
    pub width: u32,
    pub height: u32,
}

impl LogicalSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when there is nothing to render.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Fallible `vec![fill; width * height]`.
pub(crate) fn try_alloc<T: Clone>(width: usize, height: usize, fill: T) -> Result<Vec<T>> {
    let len = width
        .checked_mul(height)
        .ok_or_else(|| Error::rendering(format!("buffer {width}x{height} overflows")))?;
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|e| Error::rendering(format!("allocate {width}x{height}: {e}")))?;
    v.resize(len, fill);
    Ok(v)
}

#[inline]
pub(crate) fn unpack_rgb(px: u32) -> [u32; 3] {
    [(px >> 16) & 0xFF, (px >> 8) & 0xFF, px & 0xFF]
}

#[inline]
pub(crate) fn pack_rgb(r: u32, g: u32, b: u32) -> u32 {
    (r.min(255) << 16) | (g.min(255) << 8) | b.min(255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_fills_plane() {
        let fb = FrameBuffer::try_new(3, 2, 0x00_11_22_33).unwrap();
        assert_eq!(fb.pixels.len(), 6);
        assert!(fb.pixels.iter().all(|&p| p == 0x00_11_22_33));
    }

    #[test]
    fn overflowing_dimensions_are_a_rendering_failure() {
        let err = FrameBuffer::try_new(usize::MAX, 2, 0).unwrap_err();
        assert!(matches!(err, Error::RenderingFailure(_)));
    }

    #[test]
    fn pack_and_unpack_agree() {
        let px = pack_rgb(0x12, 0x34, 0x56);
        assert_eq!(px, 0x00_12_34_56);
        assert_eq!(unpack_rgb(px), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(LogicalSize::new(0, 50).is_empty());
        assert!(LogicalSize::new(50, 0).is_empty());
        assert!(!LogicalSize::new(1, 1).is_empty());
    }
}
