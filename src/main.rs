// What you SEE:
// • A window of widgets (labels, buttons, checkboxes) drawn at 2x device scale.
// • B toggles the blur, as if a modal dialog opened over the window.
// • S replays a repaint storm: one extra paint per interactive widget, the way
//   some toolkits over-dispatch. Each blurred paint logs "blurred paint N".
// • C flips the shared checkboxes. ESC quits.
// • `--snapshot out.png` paints one blurred frame headlessly and saves it.

mod window;

use std::cell::Cell;
use std::path::Path;

use anyhow::{Context, Result};
use blur_layer::{
    Button, Canvas, Checkbox, ContentPane, FrameBuffer, Host, Label, LayerConfig, LogicalSize,
    RenderDecorationLayer, ToggleModel, Transform,
};
use image::{ImageBuffer, Rgb};
use tracing_subscriber::EnvFilter;
use window::DemoWindow;

const CONFIG_FILE: &str = "blur-layer.toml";
// No portable way to query the backing scale, so pretend every display is 2x.
const DEVICE_SCALE: f64 = 2.0;
const LOGICAL_WIDTH: u32 = 360;
const LOGICAL_HEIGHT: u32 = 220;

/// Host side of the layer: fixed device scale plus a "needs repaint" flag.
struct DemoHost {
    scale: f64,
    stale: Cell<bool>,
}

impl DemoHost {
    fn take_stale(&self) -> bool {
        self.stale.replace(false)
    }
}

impl Host for DemoHost {
    fn device_scale(&self) -> f64 {
        self.scale
    }

    fn request_repaint(&self) {
        self.stale.set(true);
    }
}

fn build_pane(shared: &ToggleModel) -> ContentPane {
    let mut pane = ContentPane::new(LogicalSize::new(LOGICAL_WIDTH, LOGICAL_HEIGHT), 0x00_2B_30_3A);

    // Labels never cause extra repaints; they're here to show that.
    pane.add(8, 8, Label::new(format!("os: {}", std::env::consts::OS)))
        .add(8, 18, Label::new(format!("arch: {}", std::env::consts::ARCH)))
        .add(8, 28, Label::new(format!("crate: {}", env!("CARGO_PKG_VERSION"))));

    for i in 0..3u32 {
        pane.add(8 + i * 116, 48, Button::new(format!("Show Message {i}")));
    }
    for i in 0..6u32 {
        let (col, row) = (i % 3, i / 3);
        pane.add(8 + col * 116, 76 + row * 16, Checkbox::new(format!("shared {i}"), shared.clone()));
    }
    for i in 0..3u32 {
        pane.add(8 + i * 116, 108, Checkbox::new(format!("Unshared {i}"), ToggleModel::new(true)));
    }

    pane.add(8, 190, Label::new("B: blur   S: storm   C: shared   ESC: quit"));
    pane
}

fn load_config() -> Result<LayerConfig> {
    if Path::new(CONFIG_FILE).exists() {
        LayerConfig::load(CONFIG_FILE).with_context(|| format!("load {CONFIG_FILE}"))
    } else {
        Ok(LayerConfig::default())
    }
}

fn device_screen() -> Result<FrameBuffer> {
    let w = (LOGICAL_WIDTH as f64 * DEVICE_SCALE).ceil() as usize;
    let h = (LOGICAL_HEIGHT as f64 * DEVICE_SCALE).ceil() as usize;
    Ok(FrameBuffer::try_new(w, h, 0)?)
}

fn save_png(screen: &FrameBuffer, path: &str) -> Result<()> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(screen.width as u32, screen.height as u32, |x, y| {
            let px = screen.get(x as usize, y as usize);
            Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
        });
    img.save(path).with_context(|| format!("write snapshot {path}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let shared = ToggleModel::new(true);
    let host = DemoHost { scale: DEVICE_SCALE, stale: Cell::new(true) };
    let mut layer = RenderDecorationLayer::from_config(&config, host, build_pane(&shared))?;
    tracing::info!(blur_size = config.blur_size, scale = DEVICE_SCALE, "layer ready");

    let mut screen = device_screen()?;
    let base = Transform::scaling(DEVICE_SCALE, DEVICE_SCALE);

    let args: Vec<String> = std::env::args().collect();
    if let Some(i) = args.iter().position(|a| a == "--snapshot") {
        let path = args.get(i + 1).map(String::as_str).unwrap_or("blurred.png");
        layer.set_blurred(true);
        layer.paint(&mut Canvas::with_transform(&mut screen, base))?;
        save_png(&screen, path)?;
        tracing::info!(path, "snapshot written");
        return Ok(());
    }

    let mut window = DemoWindow::new("Blur Layer (B: blur, S: storm)", screen.width, screen.height)?;

    /* ------------------------------ Main loop ------------------------------ */
    while window.is_open() && !window.esc_pressed() {
        if window.b_pressed_once() {
            layer.set_blurred(!layer.is_blurred());
        }
        if window.c_pressed_once() {
            shared.toggle();
            layer.host().request_repaint();
        }

        // One paint per stale notification; a storm adds one per interactive widget.
        let mut paints = usize::from(layer.host().take_stale());
        if window.s_pressed_once() {
            paints += layer.child().interactive_count();
        }
        for _ in 0..paints {
            let mut canvas = Canvas::with_transform(&mut screen, base);
            if let Err(e) = layer.paint(&mut canvas) {
                // Dropped frame; the next stale notification tries again.
                tracing::warn!(error = %e, "paint failed");
                break;
            }
        }

        window.present(&screen)?;
    }

    Ok(())
}
