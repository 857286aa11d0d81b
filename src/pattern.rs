use image::{Rgba, RgbaImage, imageops};

use crate::orientation::{Rotation, Transformation};

const BACKGROUND: Rgba<u8> = Rgba([0xff, 0x00, 0x00, 0xff]);
const FOREGROUND: Rgba<u8> = Rgba([0x00, 0x00, 0xff, 0xff]);

// Marker colors stay distinguishable from each other and from the
// checkerboard after any rotation or mirror.
const MARKER_TOP: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const MARKER_RIGHT: Rgba<u8> = Rgba([0xff, 0xff, 0x00, 0xff]);
const MARKER_BOTTOM: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);
const MARKER_LEFT: Rgba<u8> = Rgba([0x00, 0xff, 0xff, 0xff]);

/// Render the base test card: a red/blue checkerboard with a horizontal
/// color gradient, a vertical alpha ramp, and one distinct marker band per
/// edge so the decoded orientation is recognizable at a glance.
///
/// Pure and deterministic for a given (width, height, cell).
pub fn render_test_card(width: u32, height: u32, cell: u32) -> RgbaImage {
    let cell = cell.max(1);
    let mut img = RgbaImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            BACKGROUND
        } else {
            FOREGROUND
        }
    });

    for y in 0..height {
        // Alpha falls off from top to bottom.
        let ramp = 255 - (u64::from(y) * 255 / u64::from(height + 1)) as u8;
        for x in 0..width {
            // Gradient strength grows left to right, capped at 75%.
            let t = (u64::from(x) * 255 * 3 / (u64::from(width) * 4)) as u8;
            let px = img.get_pixel_mut(x, y);
            px.0[0] = lerp(px.0[0], 0xff - t, t);
            px.0[1] = lerp(px.0[1], t, t);
            px.0[2] = lerp(px.0[2], 0xff, t);
            px.0[3] = ramp;
        }
    }

    draw_edge_markers(&mut img);
    img
}

/// Stamp the orientation code in the center of the card. Drawn before the
/// transformation is applied, so a correctly-orienting viewer shows the
/// digit transformed along with the rest of the card.
pub fn stamp_orientation_digit(img: &mut RgbaImage, code: u8) {
    let glyph = digit_glyph(code);
    let (w, h) = img.dimensions();
    let scale = (w.min(h) / 3 / GLYPH_ROWS).max(1);
    let gw = GLYPH_COLS * scale;
    let gh = GLYPH_ROWS * scale;
    let x0 = w.saturating_sub(gw) / 2;
    let y0 = h.saturating_sub(gh) / 2;

    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_COLS {
            if bits & (1 << (GLYPH_COLS - 1 - col)) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let x = x0 + col * scale + dx;
                    let y = y0 + row as u32 * scale + dy;
                    if x < w && y < h {
                        img.put_pixel(x, y, MARKER_BOTTOM);
                    }
                }
            }
        }
    }
}

/// Apply mirroring first, then the quarter-turn, matching the order the
/// orientation table is defined in.
pub fn apply_transformation(img: &RgbaImage, t: Transformation) -> RgbaImage {
    let mut out = img.clone();
    if t.flip_vertical {
        out = imageops::flip_vertical(&out);
    }
    if t.flip_horizontal {
        out = imageops::flip_horizontal(&out);
    }
    match t.rotation {
        Rotation::None => out,
        Rotation::Deg90 => imageops::rotate90(&out),
        Rotation::Deg180 => imageops::rotate180(&out),
        Rotation::Deg270 => imageops::rotate270(&out),
    }
}

fn lerp(a: u8, b: u8, t: u8) -> u8 {
    let t = u16::from(t);
    ((u16::from(a) * (255 - t) + u16::from(b) * t + 127) / 255) as u8
}

fn draw_edge_markers(img: &mut RgbaImage) {
    let (w, h) = img.dimensions();
    let thickness = (w.min(h) / 16).max(2);
    let band_w = w / 3;
    let band_h = h / 3;

    fill_rect(img, w / 3, 0, band_w, thickness, MARKER_TOP);
    fill_rect(img, w / 3, h.saturating_sub(thickness), band_w, thickness, MARKER_BOTTOM);
    fill_rect(img, 0, h / 3, thickness, band_h, MARKER_LEFT);
    fill_rect(img, w.saturating_sub(thickness), h / 3, thickness, band_h, MARKER_RIGHT);
}

fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, rw: u32, rh: u32, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    for y in y0..(y0 + rh).min(h) {
        for x in x0..(x0 + rw).min(w) {
            img.put_pixel(x, y, color);
        }
    }
}

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;

// 5x7 bitmap digits, one bit per column, most significant bit leftmost.
const DIGITS: [[u8; 7]; 9] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
];

fn digit_glyph(code: u8) -> [u8; 7] {
    DIGITS[usize::from(code.min(8))]
}
