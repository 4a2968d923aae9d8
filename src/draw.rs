// Software drawing helpers that go through any `Surface`, so they land crisp
// at whatever device scale the surface carries.
// 1) Rectangle outlines for widget edges.
// 2) A tiny 5x7 bitmap font for widget captions.

use crate::surface::Surface;

/// Glyph cell advance: 5 pixels of glyph plus 1 pixel of spacing.
pub const GLYPH_ADVANCE: u32 = 6;
pub const GLYPH_HEIGHT: u32 = 7;

#[inline]
fn put_pixel(surface: &mut dyn Surface, x: i32, y: i32, color: u32) {
    surface.fill_rect(x as f64, y as f64, 1.0, 1.0, color);
}

/// One-unit rectangle outline.
pub fn draw_frame(surface: &mut dyn Surface, x: f64, y: f64, w: f64, h: f64, color: u32) {
    surface.fill_rect(x, y, w, 1.0, color);
    surface.fill_rect(x, y + h - 1.0, w, 1.0, color);
    surface.fill_rect(x, y, 1.0, h, color);
    surface.fill_rect(x + w - 1.0, y, 1.0, h, color);
}

/* ---------- 5x7 bitmap font (uppercase, digits, a little punctuation) ---------- */

/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
/// Lowercase input is drawn with the uppercase glyph.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),

        _ => None,
    }
}

/// Draw a single glyph at (x,y) with a 1-unit black shadow for contrast.
fn draw_char_5x7(surface: &mut dyn Surface, x: i32, y: i32, ch: char, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };

    // Shadow pass, offset by (1,1)
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) != 0 {
                put_pixel(surface, x + rx + 1, y + ry as i32 + 1, 0x00000000);
            }
        }
    }
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) != 0 {
                put_pixel(surface, x + rx, y + ry as i32, color);
            }
        }
    }
}

pub fn draw_text_5x7(surface: &mut dyn Surface, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(surface, x, y, ch, color);
        x += GLYPH_ADVANCE as i32;
    }
}

/// Logical width of `text` in the 5x7 font, shadow included.
pub fn text_width(text: &str) -> u32 {
    text.chars().count() as u32 * GLYPH_ADVANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Canvas, Transform};
    use crate::types::FrameBuffer;

    #[test]
    fn every_caption_character_has_a_glyph() {
        for ch in "Show Message 0123456789 shared Unshared blur size=10 (B) toggle / S: storm | ESC. quit-".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
    }

    #[test]
    fn text_scales_with_surface() {
        let mut fb = FrameBuffer::try_new(16, 16, 0x00_20_20_20).unwrap();
        let mut canvas = Canvas::with_transform(&mut fb, Transform::scaling(2.0, 2.0));
        draw_text_5x7(&mut canvas, 0, 0, "I", 0x00_FF_FF_FF);
        drop(canvas);
        // Top bar of 'I' is columns 1..=3 in glyph space, i.e. device x 2..8.
        assert_eq!(fb.get(2, 0), 0x00_FF_FF_FF);
        assert_eq!(fb.get(7, 1), 0x00_FF_FF_FF);
        assert_eq!(fb.get(0, 0), 0x00_20_20_20);
    }

    #[test]
    fn text_width_counts_advance() {
        assert_eq!(text_width("ABC"), 18);
        assert_eq!(text_width(""), 0);
    }
}
