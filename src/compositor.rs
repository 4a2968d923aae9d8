// Blur compositing: render the child at device resolution, box-convolve it,
// and draw the result back at logical resolution.
// The destination's transform is put back exactly as it was found.

use crate::error::{Error, Result};
use crate::kernel::BlurKernel;
use crate::offscreen::BackingStore;
use crate::surface::{Canvas, Renderable, Surface, Transform};
use crate::types::{FrameBuffer, pack_rgb, unpack_rgb};

pub struct BlurCompositor {
    clear_color: u32, // what the rendered plane starts from each paint
}

impl Default for BlurCompositor {
    fn default() -> Self {
        Self::new(0x00_00_00_00)
    }
}

impl BlurCompositor {
    pub fn new(clear_color: u32) -> Self {
        Self { clear_color }
    }

    pub fn composite(
        &self,
        child: &dyn Renderable,
        store: &mut BackingStore,
        kernel: &BlurKernel,
        device_scale: f64,
        destination: &mut dyn Surface,
    ) -> Result<()> {
        /* 1) Child content at full backing-store fidelity. */
        store.rendered.clear(self.clear_color);
        {
            let mut canvas = Canvas::with_transform(
                &mut store.rendered,
                Transform::scaling(device_scale, device_scale),
            );
            child.render(&mut canvas).map_err(as_rendering_failure)?;
        }

        /* 2) Box convolution into the filtered plane. */
        convolve_no_op_edge(&store.rendered, &mut store.filtered, &mut store.row_sums, kernel);

        /* 3) Back to logical coordinates on the destination. */
        let saved = destination.transform();
        destination.scale(1.0 / device_scale, 1.0 / device_scale);
        let drawn = destination.draw_buffer(&store.filtered, 0.0, 0.0);

        /* 4) Restore before anything else can observe the surface. */
        destination.set_transform(saved);
        drawn.map_err(as_rendering_failure)
    }
}

fn as_rendering_failure(e: Error) -> Error {
    match e {
        Error::RenderingFailure(_) => e,
        other => Error::rendering(other),
    }
}

/// Convolve `src` with a uniform `kernel` into `dst`.
///
/// Pixels whose window would reach outside the buffer are copied through
/// unfiltered, which leaves an unblurred band of roughly `size / 2` pixels
/// along every edge. For a kernel of size `k` and origin `o = (k-1)/2`, pixel
/// `(x, y)` is filtered when `o <= x <= width - k + o` (and likewise for `y`).
///
/// Uses two sliding-window passes (rows into `row_sums`, then columns), which
/// gives the same sums as direct 2-D convolution.
pub(crate) fn convolve_no_op_edge(
    src: &FrameBuffer,
    dst: &mut FrameBuffer,
    row_sums: &mut [[u64; 3]],
    kernel: &BlurKernel,
) {
    debug_assert_eq!((src.width, src.height), (dst.width, dst.height));
    debug_assert_eq!(row_sums.len(), src.pixels.len());

    dst.pixels.copy_from_slice(&src.pixels);

    let w = src.width;
    let h = src.height;
    let k = kernel.size() as usize;
    let o = kernel.origin() as usize;
    if w < k || h < k {
        return; // no pixel has a full window
    }
    let weight = kernel.weight();

    /* ---- Pass 1: horizontal window sums, stored at the window's anchor column ---- */
    for y in 0..h {
        let row = y * w;
        let mut sum = [0u64; 3];
        for x in 0..k {
            add(&mut sum, src.pixels[row + x]);
        }
        for start in 0..=(w - k) {
            row_sums[row + start + o] = sum;
            if start + k < w {
                add(&mut sum, src.pixels[row + start + k]);
                sub(&mut sum, src.pixels[row + start]);
            }
        }
    }

    /* ---- Pass 2: vertical sums of the row sums, for anchor columns only ---- */
    for x in o..=(w - k + o) {
        let mut sum = [0u64; 3];
        for y in 0..k {
            let s = row_sums[y * w + x];
            for c in 0..3 {
                sum[c] += s[c];
            }
        }
        for start in 0..=(h - k) {
            let avg = |v: u64| (v as f32 * weight).round() as u32;
            dst.pixels[(start + o) * w + x] = pack_rgb(avg(sum[0]), avg(sum[1]), avg(sum[2]));
            if start + k < h {
                let add_row = row_sums[(start + k) * w + x];
                let sub_row = row_sums[start * w + x];
                for c in 0..3 {
                    sum[c] = sum[c] + add_row[c] - sub_row[c];
                }
            }
        }
    }
}

// Channel sums are u64: a full window of white reaches 255 * k², past u32 for k > 4104.
#[inline]
fn add(sum: &mut [u64; 3], px: u32) {
    for (s, c) in sum.iter_mut().zip(unpack_rgb(px)) {
        *s += u64::from(c);
    }
}

#[inline]
fn sub(sum: &mut [u64; 3], px: u32) {
    for (s, c) in sum.iter_mut().zip(unpack_rgb(px)) {
        *s -= u64::from(c);
    }
}
