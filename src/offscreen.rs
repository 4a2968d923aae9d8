// Device-resolution backing store for decorated paints.
// The store is created lazily and replaced only when the device dimensions change,
// so a host that repaints the same region many times pays for one allocation.

use crate::error::{Error, Result};
use crate::types::{FrameBuffer, LogicalSize, try_alloc};

/// Products this close to an integer are taken as that integer, so float noise such as
/// `100.0 * 1.1 = 110.00000000000001` does not add a pixel.
const SCALE_EPSILON: f64 = 1e-9;

/// The planes one decorated paint works in. All three are sized together.
pub struct BackingStore {
    /// Child content rasterized at device resolution.
    pub rendered: FrameBuffer,
    /// Convolution output; this is what gets drawn back.
    pub filtered: FrameBuffer,
    /// Per-channel horizontal window sums (scratch for the separable pass).
    pub(crate) row_sums: Vec<[u64; 3]>,
}

impl BackingStore {
    fn allocate(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            rendered: FrameBuffer::try_new(width, height, 0)?,
            filtered: FrameBuffer::try_new(width, height, 0)?,
            row_sums: try_alloc(width, height, [0u64; 3])?,
        })
    }

    pub fn width(&self) -> usize {
        self.rendered.width
    }

    pub fn height(&self) -> usize {
        self.rendered.height
    }
}

#[derive(Default)]
pub struct OffscreenBuffer {
    store: Option<BackingStore>,
    allocations: u64,
}

/// `ceil(logical × scale)` for one axis, never 0 for a non-empty axis.
pub fn device_extent(logical: u32, device_scale: f64) -> usize {
    if logical == 0 {
        return 0;
    }
    let exact = logical as f64 * device_scale;
    let nearest = exact.round();
    let extent = if (exact - nearest).abs() <= SCALE_EPSILON { nearest } else { exact.ceil() };
    (extent as usize).max(1)
}

impl OffscreenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the store matches `logical × device_scale`.
    ///
    /// Returns `Ok(None)` for a zero-area request: nothing is allocated and the
    /// caller must skip painting. Reallocates only when the target device
    /// dimensions differ from the current store's.
    pub fn ensure_size(
        &mut self,
        logical: LogicalSize,
        device_scale: f64,
    ) -> Result<Option<&mut BackingStore>> {
        if !(device_scale.is_finite() && device_scale > 0.0) {
            return Err(Error::invalid(format!("device scale must be positive, got {device_scale}")));
        }
        if logical.is_empty() {
            return Ok(None);
        }

        let w = device_extent(logical.width, device_scale);
        let h = device_extent(logical.height, device_scale);

        let stale = match &self.store {
            Some(s) => s.width() != w || s.height() != h,
            None => true,
        };
        if stale {
            let previous = self.device_size();
            // Drop the old planes before asking for new ones.
            self.store = None;
            self.store = Some(BackingStore::allocate(w, h)?);
            self.allocations += 1;
            tracing::debug!(?previous, width = w, height = h, "offscreen buffer reallocated");
        }
        Ok(self.store.as_mut())
    }

    /// Current device dimensions, if a store exists.
    pub fn device_size(&self) -> Option<(usize, usize)> {
        self.store.as_ref().map(|s| (s.width(), s.height()))
    }

    /// Number of backing-store allocations performed so far.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    pub fn store(&self) -> Option<&BackingStore> {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hundred_by_fifty_at_two_is_two_hundred_by_hundred() {
        let mut buf = OffscreenBuffer::new();
        let store = buf.ensure_size(LogicalSize::new(100, 50), 2.0).unwrap().unwrap();
        assert_eq!((store.width(), store.height()), (200, 100));
        assert_eq!(store.row_sums.len(), 200 * 100);
        assert_eq!(buf.device_size(), Some((200, 100)));
    }

    #[test]
    fn repeated_requests_allocate_once() {
        let mut buf = OffscreenBuffer::new();
        for _ in 0..25 {
            buf.ensure_size(LogicalSize::new(64, 48), 1.5).unwrap();
        }
        assert_eq!(buf.allocations(), 1);
    }

    #[test]
    fn resize_replaces_store() {
        let mut buf = OffscreenBuffer::new();
        buf.ensure_size(LogicalSize::new(10, 10), 1.0).unwrap();
        buf.ensure_size(LogicalSize::new(20, 10), 1.0).unwrap();
        buf.ensure_size(LogicalSize::new(20, 10), 1.0).unwrap();
        assert_eq!(buf.allocations(), 2);
        assert_eq!(buf.device_size(), Some((20, 10)));
    }

    #[test]
    fn different_logical_size_same_device_size_keeps_store() {
        // 10 @ 2.0 and 20 @ 1.0 both need 20 device pixels.
        let mut buf = OffscreenBuffer::new();
        buf.ensure_size(LogicalSize::new(10, 10), 2.0).unwrap();
        buf.ensure_size(LogicalSize::new(20, 20), 1.0).unwrap();
        assert_eq!(buf.allocations(), 1);
    }

    #[test]
    fn zero_area_is_a_no_op() {
        let mut buf = OffscreenBuffer::new();
        assert!(buf.ensure_size(LogicalSize::new(0, 50), 2.0).unwrap().is_none());
        assert!(buf.ensure_size(LogicalSize::new(50, 0), 2.0).unwrap().is_none());
        assert_eq!(buf.allocations(), 0);
        assert_eq!(buf.device_size(), None);
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let mut buf = OffscreenBuffer::new();
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = buf.ensure_size(LogicalSize::new(1, 1), scale).err().unwrap();
            assert!(matches!(err, Error::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn fractional_scale_rounds_up() {
        assert_eq!(device_extent(100, 1.1), 110);
        assert_eq!(device_extent(3, 1.5), 5);
        assert_eq!(device_extent(1, 0.25), 1);
        assert_eq!(device_extent(0, 3.0), 0);
    }

    #[test]
    fn tiny_scale_still_gets_one_device_pixel() {
        assert_eq!(device_extent(1, 1e-10), 1);
        let mut buf = OffscreenBuffer::new();
        let store = buf.ensure_size(LogicalSize::new(1, 1), 1e-10).unwrap().unwrap();
        assert_eq!((store.width(), store.height()), (1, 1));
    }

    proptest! {
        #[test]
        fn device_size_is_ceiling_scaled(w in 1u32..500, h in 1u32..500, quarter in 1u32..16) {
            let scale = quarter as f64 * 0.25;
            let mut buf = OffscreenBuffer::new();
            let store = buf.ensure_size(LogicalSize::new(w, h), scale).unwrap().unwrap();
            prop_assert_eq!(store.width(), (w as f64 * scale).ceil() as usize);
            prop_assert_eq!(store.height(), (h as f64 * scale).ceil() as usize);
        }
    }
}
