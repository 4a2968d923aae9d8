// Demo window: shows the device-resolution screen buffer and reports the keys
// the demo reacts to.

use anyhow::{Context, Result};
use blur_layer::FrameBuffer;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct DemoWindow {
    window: Window,
}

impl DemoWindow {
    /// Visual: a new window sized in device pixels appears with the given title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .context("create demo window")?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    pub fn present(&mut self, screen: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&screen.pixels, screen.width, screen.height)
            .context("present screen buffer")
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// B: open/close the pretend dialog (blur on/off).
    pub fn b_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::B, KeyRepeat::No)
    }

    /// S: replay a repaint storm, one paint per interactive widget.
    pub fn s_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }

    /// C: flip the shared checkbox model.
    pub fn c_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }
}
