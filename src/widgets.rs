//! Minimal software-drawn widgets and the `ContentPane` that holds them.
//!
//! The pane is what a host attaches to the layer: the layer decorates the
//! pane as a whole, and the pane lays out nothing on its own. Children keep
//! the position they were added at.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::draw::{GLYPH_HEIGHT, draw_frame, draw_text_5x7, text_width};
use crate::error::Result;
use crate::surface::{Renderable, Surface};
use crate::types::LogicalSize;

const TEXT: u32 = 0x00_F0_F0_F0;
const FACE: u32 = 0x00_4A_5A_7A;
const EDGE: u32 = 0x00_C8_D0_E0;
const BOX_FILL: u32 = 0x00_20_24_2C;
const TICK: u32 = 0x00_7F_E0_7F;

pub trait Widget: Renderable {
    /// Widgets that react to input or can change how they look.
    fn is_interactive(&self) -> bool {
        false
    }
}

struct Placed {
    x: u32,
    y: u32,
    widget: Box<dyn Widget>,
}

pub struct ContentPane {
    size: LogicalSize,
    background: u32,
    children: Vec<Placed>,
}

impl ContentPane {
    pub fn new(size: LogicalSize, background: u32) -> Self {
        Self { size, background, children: Vec::new() }
    }

    pub fn add(&mut self, x: u32, y: u32, widget: impl Widget + 'static) -> &mut Self {
        self.children.push(Placed { x, y, widget: Box::new(widget) });
        self
    }

    pub fn set_size(&mut self, size: LogicalSize) {
        self.size = size;
    }

    /// How many children count as interactive.
    pub fn interactive_count(&self) -> usize {
        self.children.iter().filter(|c| c.widget.is_interactive()).count()
    }
}

impl Renderable for ContentPane {
    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.fill_rect(0.0, 0.0, self.size.width as f64, self.size.height as f64, self.background);
        for child in &self.children {
            let saved = surface.transform();
            surface.translate(child.x as f64, child.y as f64);
            let drawn = child.widget.render(surface);
            surface.set_transform(saved);
            drawn?;
        }
        Ok(())
    }

    fn current_size(&self) -> LogicalSize {
        self.size
    }
}

pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Renderable for Label {
    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        draw_text_5x7(surface, 0, 0, &self.text, TEXT);
        Ok(())
    }

    fn current_size(&self) -> LogicalSize {
        LogicalSize::new(text_width(&self.text), GLYPH_HEIGHT + 1)
    }
}

impl Widget for Label {}

pub struct Button {
    caption: String,
}

impl Button {
    pub fn new(caption: impl Into<String>) -> Self {
        Self { caption: caption.into() }
    }
}

impl Renderable for Button {
    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        let size = self.current_size();
        let (w, h) = (size.width as f64, size.height as f64);
        surface.fill_rect(0.0, 0.0, w, h, FACE);
        draw_frame(surface, 0.0, 0.0, w, h, EDGE);
        draw_text_5x7(surface, 5, 4, &self.caption, TEXT);
        Ok(())
    }

    fn current_size(&self) -> LogicalSize {
        LogicalSize::new(text_width(&self.caption) + 10, GLYPH_HEIGHT + 9)
    }
}

impl Widget for Button {
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Selection state several checkboxes can share.
#[derive(Clone, Debug, Default)]
pub struct ToggleModel(Arc<AtomicBool>);

impl ToggleModel {
    pub fn new(selected: bool) -> Self {
        Self(Arc::new(AtomicBool::new(selected)))
    }

    pub fn is_selected(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::AcqRel)
    }
}

pub struct Checkbox {
    caption: String,
    model: ToggleModel,
}

impl Checkbox {
    pub fn new(caption: impl Into<String>, model: ToggleModel) -> Self {
        Self { caption: caption.into(), model }
    }
}

impl Renderable for Checkbox {
    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.fill_rect(0.0, 0.0, 9.0, 9.0, BOX_FILL);
        draw_frame(surface, 0.0, 0.0, 9.0, 9.0, EDGE);
        if self.model.is_selected() {
            surface.fill_rect(2.0, 2.0, 5.0, 5.0, TICK);
        }
        draw_text_5x7(surface, 13, 1, &self.caption, TEXT);
        Ok(())
    }

    fn current_size(&self) -> LogicalSize {
        LogicalSize::new(13 + text_width(&self.caption), 9)
    }
}

impl Widget for Checkbox {
    fn is_interactive(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Canvas, Transform};
    use crate::types::FrameBuffer;

    #[test]
    fn pane_counts_interactive_children() {
        let shared = ToggleModel::new(true);
        let mut pane = ContentPane::new(LogicalSize::new(100, 100), 0);
        pane.add(0, 0, Label::new("os"))
            .add(0, 10, Button::new("Show Message 0"))
            .add(0, 30, Checkbox::new("shared 0", shared.clone()))
            .add(0, 40, Checkbox::new("shared 1", shared));
        assert_eq!(pane.children.len(), 4);
        assert_eq!(pane.interactive_count(), 3);
    }

    #[test]
    fn shared_model_toggles_every_checkbox() {
        let shared = ToggleModel::new(false);
        let a = Checkbox::new("a", shared.clone());
        let b = Checkbox::new("b", shared.clone());
        assert!(shared.toggle());
        assert!(a.model.is_selected() && b.model.is_selected());
        assert!(!shared.toggle());
    }

    #[test]
    fn pane_restores_transform_after_children() {
        let mut pane = ContentPane::new(LogicalSize::new(20, 20), 0x00_10_10_10);
        pane.add(5, 5, Button::new("X"));
        let mut fb = FrameBuffer::try_new(40, 40, 0).unwrap();
        let start = Transform::scaling(2.0, 2.0);
        let mut canvas = Canvas::with_transform(&mut fb, start);
        pane.render(&mut canvas).unwrap();
        assert_eq!(canvas.transform(), start);
        drop(canvas);
        // Background at device (0,0); button edge at logical (5,5) -> device (10,10).
        assert_eq!(fb.get(0, 0), 0x00_10_10_10);
        assert_eq!(fb.get(10, 10), EDGE);
    }
}
