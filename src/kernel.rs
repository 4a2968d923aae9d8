//! Box-blur convolution kernel.
//!
//! Every weight is `1 / size²`, so the kernel is normalised and a blurred
//! buffer keeps the brightness of the source. Blur strength grows with
//! `size`; direct convolution cost grows with `size²`.

use crate::error::{Error, Result};
use crate::types::try_alloc;

#[derive(Clone, Debug, PartialEq)]
pub struct BlurKernel {
    size: u32,
    coefficients: Vec<f32>, // size * size, row-major
}

impl BlurKernel {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    /// Offset of the kernel's anchor from its top-left cell.
    pub fn origin(&self) -> u32 {
        (self.size - 1) / 2
    }

    /// The single weight shared by every cell.
    pub fn weight(&self) -> f32 {
        self.coefficients[0]
    }
}

/// Build a `size × size` uniform kernel.
pub fn build_box_kernel(size: i32) -> Result<BlurKernel> {
    if size < 1 {
        return Err(Error::invalid(format!("blur size must be at least 1, got {size}")));
    }
    let side = size as usize;
    let w = 1.0 / (side as f64 * side as f64) as f32;
    let coefficients = try_alloc(side, side, w)
        .map_err(|e| Error::invalid(format!("blur size {size} is too large: {e}")))?;
    Ok(BlurKernel { size: size as u32, coefficients })
}
