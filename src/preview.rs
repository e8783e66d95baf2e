/*!
PNG preview of the four-digit display (feature `screenshot`).

Renders what the display shows for one address: the same 12-bit value and
mode read through all four slots, slot 3 on the left. A cleared bit in the
pattern lights the segment, exactly as the ROM drives the LEDs.
*/

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::display::{
    DisplayEncoder, SEG_A, SEG_B, SEG_C, SEG_D, SEG_DP, SEG_E, SEG_F, SEG_G,
};
use crate::encoder::RomEncoder;
use crate::error::Result;

const CELL_W: u32 = 48;
const CELL_H: u32 = 80;
const MARGIN: u32 = 8;
const STROKE: u32 = 6;

pub const WIDTH: u32 = MARGIN + 4 * (CELL_W + MARGIN);
pub const HEIGHT: u32 = CELL_H + 2 * MARGIN;

const BACKGROUND: Rgb<u8> = Rgb([16, 16, 16]);
const LIT: Rgb<u8> = Rgb([255, 48, 32]);

/// Rectangles `(x, y, w, h)` inside a digit cell, per segment bit.
const SHAPES: [(u8, (u32, u32, u32, u32)); 8] = [
    (SEG_A, (STROKE, 0, CELL_W - 3 * STROKE, STROKE)),
    (SEG_B, (CELL_W - 2 * STROKE, STROKE, STROKE, CELL_H / 2 - STROKE)),
    (SEG_C, (CELL_W - 2 * STROKE, CELL_H / 2, STROKE, CELL_H / 2 - STROKE)),
    (SEG_D, (STROKE, CELL_H - STROKE, CELL_W - 3 * STROKE, STROKE)),
    (SEG_E, (0, CELL_H / 2, STROKE, CELL_H / 2 - STROKE)),
    (SEG_F, (0, STROKE, STROKE, CELL_H / 2 - STROKE)),
    (SEG_G, (STROKE, CELL_H / 2 - STROKE / 2, CELL_W - 3 * STROKE, STROKE)),
    (SEG_DP, (CELL_W - STROKE, CELL_H - STROKE, STROKE, STROKE)),
];

/// The pattern each slot shows for `address`, indexed by slot.
pub fn slot_patterns(address: u16) -> [u8; 4] {
    let base = address & !0x3000;
    std::array::from_fn(|slot| DisplayEncoder.encode(base | ((slot as u16) << 12)))
}

/// Draw four digit patterns, indexed by slot.
pub fn render(patterns: [u8; 4]) -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    for (slot, &pattern) in patterns.iter().enumerate() {
        let left = MARGIN + (3 - slot as u32) * (CELL_W + MARGIN);
        for &(bit, (x, y, w, h)) in &SHAPES {
            if pattern & bit != 0 {
                continue;
            }
            for py in y..y + h {
                for px in x..x + w {
                    img.put_pixel(left + px, MARGIN + py, LIT);
                }
            }
        }
    }
    img
}

pub fn save_preview(address: u16, path: impl AsRef<Path>) -> Result<()> {
    render(slot_patterns(address)).save(path)?;
    Ok(())
}
