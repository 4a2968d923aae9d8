//! A decorator that blurs whatever it wraps.
//!
//! [`RenderDecorationLayer`] sits between a host's paint loop and a
//! [`Renderable`] child. With blur off it forwards paints untouched. With
//! blur on it renders the child into a device-resolution offscreen buffer,
//! runs a box convolution over it, and composites the result back at logical
//! resolution, leaving the destination surface's transform as it found it.
//!
//! ```no_run
//! use blur_layer::{Canvas, ContentPane, FrameBuffer, Host, LogicalSize, RenderDecorationLayer, Transform};
//!
//! struct Retina;
//! impl Host for Retina {
//!     fn device_scale(&self) -> f64 { 2.0 }
//!     fn request_repaint(&self) {}
//! }
//!
//! let pane = ContentPane::new(LogicalSize::new(320, 240), 0x00_30_30_30);
//! let mut layer = RenderDecorationLayer::new(10, Retina, pane)?;
//! layer.set_blurred(true);
//!
//! let mut screen = FrameBuffer::try_new(640, 480, 0)?;
//! let mut canvas = Canvas::with_transform(&mut screen, Transform::scaling(2.0, 2.0));
//! layer.paint(&mut canvas)?;
//! # Ok::<(), blur_layer::Error>(())
//! ```

pub mod compositor;
pub mod config;
pub mod diagnostics;
pub mod draw;
pub mod error;
pub mod kernel;
pub mod layer;
pub mod offscreen;
pub mod surface;
pub mod types;
pub mod widgets;

pub use compositor::BlurCompositor;
pub use config::LayerConfig;
pub use diagnostics::{DiagnosticCounter, DiagnosticSink, PaintEvent, RecordingSink, TracingSink};
pub use error::{Error, Result};
pub use kernel::{BlurKernel, build_box_kernel};
pub use layer::{Host, LayerState, PaintOutcome, RenderDecorationLayer};
pub use offscreen::{BackingStore, OffscreenBuffer};
pub use surface::{Canvas, Renderable, Surface, Transform};
pub use types::{FrameBuffer, LogicalSize};
pub use widgets::{Button, Checkbox, ContentPane, Label, ToggleModel, Widget};
