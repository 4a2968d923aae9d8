//! Drawing surfaces: an affine scale/offset transform, the `Surface` trait the
//! layer draws through, and `Canvas`, the software surface over a `FrameBuffer`.

use crate::error::Result;
use crate::types::{FrameBuffer, LogicalSize};

/// Axis-aligned affine transform: `p' = (sx * x + tx, sy * y + ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self { sx: 1.0, sy: 1.0, tx: 0.0, ty: 0.0 }
    }

    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self { sx, sy, tx: 0.0, ty: 0.0 }
    }

    /// Concatenate a scale applied before this transform (user space shrinks/grows).
    pub fn then_scale(self, sx: f64, sy: f64) -> Self {
        Self { sx: self.sx * sx, sy: self.sy * sy, ..self }
    }

    /// Concatenate a translation applied before this transform.
    pub fn then_translate(self, dx: f64, dy: f64) -> Self {
        Self { tx: self.tx + self.sx * dx, ty: self.ty + self.sy * dy, ..self }
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.sx * x + self.tx, self.sy * y + self.ty)
    }

    /// `None` when either axis collapses to zero.
    pub fn invert(&self) -> Option<Self> {
        if self.sx == 0.0 || self.sy == 0.0 {
            return None;
        }
        Some(Self {
            sx: 1.0 / self.sx,
            sy: 1.0 / self.sy,
            tx: -self.tx / self.sx,
            ty: -self.ty / self.sy,
        })
    }
}

/// What the layer needs from a drawing target.
pub trait Surface {
    fn transform(&self) -> Transform;

    fn set_transform(&mut self, transform: Transform);

    fn scale(&mut self, sx: f64, sy: f64) {
        let t = self.transform().then_scale(sx, sy);
        self.set_transform(t);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let t = self.transform().then_translate(dx, dy);
        self.set_transform(t);
    }

    /// Fill a user-space rectangle with a solid 0x00RRGGBB color.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: u32);

    /// Blit `src` with its top-left corner at user-space `(x, y)`, one source
    /// pixel per user-space unit.
    fn draw_buffer(&mut self, src: &FrameBuffer, x: f64, y: f64) -> Result<()>;
}

/// Anything the layer can decorate: it draws itself at its current size and
/// reports that size in logical pixels.
pub trait Renderable {
    fn render(&self, surface: &mut dyn Surface) -> Result<()>;

    fn current_size(&self) -> LogicalSize;
}

/// Software surface drawing into a borrowed `FrameBuffer` in device pixels.
pub struct Canvas<'a> {
    target: &'a mut FrameBuffer,
    transform: Transform,
}

impl<'a> Canvas<'a> {
    pub fn new(target: &'a mut FrameBuffer) -> Self {
        Self { target, transform: Transform::identity() }
    }

    pub fn with_transform(target: &'a mut FrameBuffer, transform: Transform) -> Self {
        Self { target, transform }
    }

    /// Device-pixel span covered by a user-space rectangle, clipped to the target.
    /// A pixel is covered when its centre lies inside the mapped rectangle.
    fn device_span(&self, x: f64, y: f64, w: f64, h: f64) -> Option<(usize, usize, usize, usize)> {
        let (ax, ay) = self.transform.apply(x, y);
        let (bx, by) = self.transform.apply(x + w, y + h);
        let (x0, x1) = (ax.min(bx), ax.max(bx));
        let (y0, y1) = (ay.min(by), ay.max(by));

        let clip = |lo: f64, hi: f64, limit: usize| -> Option<(usize, usize)> {
            let start = (lo - 0.5).ceil().max(0.0);
            let end = (hi - 0.5).ceil().min(limit as f64);
            if start >= end {
                return None;
            }
            Some((start as usize, end as usize))
        };
        let (px0, px1) = clip(x0, x1, self.target.width)?;
        let (py0, py1) = clip(y0, y1, self.target.height)?;
        Some((px0, px1, py0, py1))
    }
}

impl Surface for Canvas<'_> {
    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: u32) {
        let Some((x0, x1, y0, y1)) = self.device_span(x, y, w, h) else {
            return;
        };
        let width = self.target.width;
        for py in y0..y1 {
            let row = py * width;
            self.target.pixels[row + x0..row + x1].fill(color);
        }
    }

    fn draw_buffer(&mut self, src: &FrameBuffer, x: f64, y: f64) -> Result<()> {
        let Some(inverse) = self.transform.invert() else {
            return Ok(()); // degenerate transform paints nothing
        };
        let Some((x0, x1, y0, y1)) =
            self.device_span(x, y, src.width as f64, src.height as f64)
        else {
            return Ok(());
        };

        // Nearest-neighbour: map each device pixel centre back into source space.
        let width = self.target.width;
        for py in y0..y1 {
            for px in x0..x1 {
                let (ux, uy) = inverse.apply(px as f64 + 0.5, py as f64 + 0.5);
                let sx = (ux - x).floor();
                let sy = (uy - y).floor();
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                let (sx, sy) = (sx as usize, sy as usize);
                if sx >= src.width || sy >= src.height {
                    continue;
                }
                self.target.pixels[py * width + px] = src.get(sx, sy);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fb(w: usize, h: usize) -> FrameBuffer {
        FrameBuffer::try_new(w, h, 0).unwrap()
    }

    #[test]
    fn scale_then_invert_round_trips() {
        let t = Transform::identity().then_translate(3.0, 4.0).then_scale(2.0, 2.0);
        let (x, y) = t.apply(5.0, 6.0);
        assert_eq!((x, y), (13.0, 16.0));
        let back = t.invert().unwrap().apply(x, y);
        assert_eq!(back, (5.0, 6.0));
        assert!(Transform::scaling(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn fill_rect_respects_scale() {
        let mut target = fb(4, 4);
        let mut canvas = Canvas::with_transform(&mut target, Transform::scaling(2.0, 2.0));
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, 0xFF);
        drop(canvas);
        // One logical pixel covers a 2x2 device block.
        assert_eq!(target.get(0, 0), 0xFF);
        assert_eq!(target.get(1, 1), 0xFF);
        assert_eq!(target.get(2, 0), 0);
        assert_eq!(target.get(0, 2), 0);
    }

    #[test]
    fn fill_rect_clips_to_target() {
        let mut target = fb(3, 3);
        let mut canvas = Canvas::new(&mut target);
        canvas.fill_rect(-5.0, 1.0, 100.0, 1.0, 7);
        drop(canvas);
        assert_eq!(&target.pixels[3..6], &[7, 7, 7]);
        assert_eq!(target.pixels[0], 0);
    }

    #[test]
    fn draw_buffer_downscales_device_pixels() {
        // 4x4 device buffer drawn at 1/2 scale lands on 2x2 pixels.
        let mut src = fb(4, 4);
        for (i, p) in src.pixels.iter_mut().enumerate() {
            *p = i as u32;
        }
        let mut target = fb(2, 2);
        let mut canvas = Canvas::with_transform(&mut target, Transform::scaling(0.5, 0.5));
        canvas.draw_buffer(&src, 0.0, 0.0).unwrap();
        drop(canvas);
        assert_eq!(target.pixels, vec![src.get(1, 1), src.get(3, 1), src.get(1, 3), src.get(3, 3)]);
    }

    #[test]
    fn draw_buffer_under_identity_copies() {
        let mut src = fb(2, 2);
        src.pixels = vec![1, 2, 3, 4];
        let mut target = fb(3, 3);
        let mut canvas = Canvas::new(&mut target);
        canvas.draw_buffer(&src, 1.0, 1.0).unwrap();
        drop(canvas);
        assert_eq!(target.get(1, 1), 1);
        assert_eq!(target.get(2, 2), 4);
        assert_eq!(target.get(0, 0), 0);
    }

    #[test]
    fn surface_scale_concatenates() {
        let mut target = fb(1, 1);
        let mut canvas = Canvas::with_transform(&mut target, Transform::scaling(2.0, 2.0));
        canvas.scale(0.5, 0.5);
        assert_eq!(canvas.transform(), Transform::identity());
    }
}
