//! The render decoration layer.
//!
//! Wraps a [`Renderable`] child. While blur is off every paint is handed
//! straight to the child; while it is on the child is rendered offscreen at
//! device resolution, box-blurred, and composited back. State changes take
//! effect at the next paint, and any number of paints may follow a change:
//! each decorated paint reuses the same backing store.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::compositor::BlurCompositor;
use crate::config::LayerConfig;
use crate::diagnostics::{DiagnosticCounter, DiagnosticSink, PaintEvent, TracingSink};
use crate::error::Result;
use crate::kernel::{BlurKernel, build_box_kernel};
use crate::offscreen::OffscreenBuffer;
use crate::surface::{Renderable, Surface};

/// What the layer needs from whoever hosts it.
pub trait Host {
    /// Device pixels per logical pixel.
    fn device_scale(&self) -> f64;

    /// Mark the layer's region stale so the host paints it again.
    fn request_repaint(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerState {
    Direct,
    Decorated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintOutcome {
    /// Child painted unmodified.
    Direct,
    /// Blurred composite drawn; `counter` is the consecutive decorated paint count.
    Decorated { counter: u32 },
    /// Decorated, but the child has no area: nothing allocated or drawn.
    /// Still counted as a decorated paint.
    Skipped { counter: u32 },
}

pub struct RenderDecorationLayer<C, H> {
    child: C,
    host: H,
    blurred: AtomicBool,
    kernel: BlurKernel,
    buffer: OffscreenBuffer,
    compositor: BlurCompositor,
    counter: DiagnosticCounter,
    sink: Box<dyn DiagnosticSink>,
}

impl<C: Renderable, H: Host> RenderDecorationLayer<C, H> {
    /// Fails with `InvalidConfiguration` when `blur_size < 1`.
    pub fn new(blur_size: i32, host: H, child: C) -> Result<Self> {
        let kernel = build_box_kernel(blur_size)?;
        Ok(Self {
            child,
            host,
            blurred: AtomicBool::new(false),
            kernel,
            buffer: OffscreenBuffer::new(),
            compositor: BlurCompositor::default(),
            counter: DiagnosticCounter::new(),
            sink: Box::new(TracingSink),
        })
    }

    pub fn from_config(config: &LayerConfig, host: H, child: C) -> Result<Self> {
        config.validate()?;
        Self::new(config.blur_size, host, child)
    }

    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_compositor(mut self, compositor: BlurCompositor) -> Self {
        self.compositor = compositor;
        self
    }

    pub fn set_blurred(&self, enabled: bool) {
        let previous = self.blurred.swap(enabled, Ordering::AcqRel);
        if previous != enabled {
            if enabled {
                tracing::info!("blur enabled");
            } else {
                tracing::info!("not blurred");
            }
        }
        self.host.request_repaint();
    }

    pub fn is_blurred(&self) -> bool {
        self.blurred.load(Ordering::Acquire)
    }

    pub fn state(&self) -> LayerState {
        if self.is_blurred() { LayerState::Decorated } else { LayerState::Direct }
    }

    /// Where the decorated content lives; add to or rearrange it here.
    pub fn content_area(&mut self) -> &mut C {
        &mut self.child
    }

    pub fn child(&self) -> &C {
        &self.child
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn kernel(&self) -> &BlurKernel {
        &self.kernel
    }

    pub fn buffer(&self) -> &OffscreenBuffer {
        &self.buffer
    }

    /// Consecutive decorated paints since the last direct one.
    pub fn paint_counter(&self) -> u32 {
        self.counter.value()
    }

    /// Paint the decorated region onto `surface`.
    pub fn paint(&mut self, surface: &mut dyn Surface) -> Result<PaintOutcome> {
        match self.state() {
            LayerState::Direct => {
                self.counter.reset();
                self.sink.record(PaintEvent { decorated: false, counter: 0 });
                self.child.render(surface)?;
                Ok(PaintOutcome::Direct)
            }
            LayerState::Decorated => self.paint_decorated(surface),
        }
    }

    fn paint_decorated(&mut self, surface: &mut dyn Surface) -> Result<PaintOutcome> {
        let size = self.child.current_size();
        let scale = self.host.device_scale();
        let Some(store) = self.buffer.ensure_size(size, scale)? else {
            let counter = self.record_decorated();
            return Ok(PaintOutcome::Skipped { counter });
        };

        if let Err(e) = self.compositor.composite(&self.child, store, &self.kernel, scale, surface) {
            tracing::warn!(error = %e, "decorated paint dropped");
            return Err(e);
        }

        let counter = self.record_decorated();
        Ok(PaintOutcome::Decorated { counter })
    }

    fn record_decorated(&self) -> u32 {
        let counter = self.counter.increment();
        self.sink.record(PaintEvent { decorated: true, counter });
        counter
    }
}
