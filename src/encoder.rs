//! # Bitmap Encoder
//!
//! Pure conversion from a binary pixel grid to a packed byte sequence.
//! No I/O, no shared state; identical inputs always produce identical
//! output.
//!
//! ## Cell enumeration
//!
//! The grid is partitioned into glyph cells of `glyph_width × glyph_height`
//! pixels, visited row-major (left→right, top→bottom). Trailing pixels that
//! don't fill a complete cell are dropped.
//!
//! Within each cell, pixels are enumerated per the reading mode:
//!
//! ```text
//! TopToBottom (column-major)        LeftToRight (row-major)
//!   0 3 6                            0 1 2
//!   1 4 7                            3 4 5
//!   2 5 8                            6 7 8
//! ```
//!
//! ## Bit packing
//!
//! Enumerated bits fill bytes 8 at a time, in encounter order. Bit
//! numbering decides which end of the byte fills first:
//!
//! ```text
//! Msb: first pixel -> bit 7, filling downward
//!      pixels [1,0,1,0,1,0,1,0] -> 0xAA
//! Lsb: first pixel -> bit 0, filling upward
//!      pixels [1,0,1,0,1,0,1,0] -> 0x55
//! ```
//!
//! Each glyph's encoding starts byte-aligned. When a cell's pixel count
//! isn't a multiple of 8, the unused trailing positions of its last byte
//! stay 0 — even when `invert_bits` is set, since inversion applies to
//! pixel values before packing, never to padding.

use crate::config::{BitNumbering, Config, ReadingMode};
use crate::error::ConvertError;
use crate::grid::PixelGrid;

/// Pack a sequence of bits into bytes in encounter order.
///
/// An empty bit sequence packs to an empty byte sequence. A length that
/// isn't a multiple of 8 zero-pads the trailing positions of the last byte.
///
/// ## Example
///
/// ```
/// use fontpack::config::BitNumbering;
/// use fontpack::encoder::pack_bits;
///
/// let bits = [true, true, true, true, false, false, false, false];
/// assert_eq!(pack_bits(&bits, BitNumbering::Msb), vec![0xF0]);
/// assert_eq!(pack_bits(&bits, BitNumbering::Lsb), vec![0x0F]);
/// ```
pub fn pack_bits(bits: &[bool], numbering: BitNumbering) -> Vec<u8> {
    let mut bytes = vec![0u8; bits.len().div_ceil(8)];

    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            let bit_pos = match numbering {
                BitNumbering::Msb => 7 - (i % 8),
                BitNumbering::Lsb => i % 8,
            };
            bytes[i / 8] |= 1 << bit_pos;
        }
    }

    bytes
}

/// Encode a binary pixel grid into the packed font byte sequence.
///
/// Output length is `bytes_per_glyph * glyph_count`; glyphs are
/// concatenated in cell enumeration order.
///
/// Fails with [`ConvertError::InvalidConfiguration`] when either cell
/// dimension is 0 or the grid is smaller than one cell. Never fails on a
/// valid grid/config pair.
pub fn encode(grid: &PixelGrid, cfg: &Config) -> Result<Vec<u8>, ConvertError> {
    if !cfg.is_valid() {
        return Err(ConvertError::InvalidConfiguration(format!(
            "glyph cell {}x{} is out of range (1-255 per axis)",
            cfg.glyph_width, cfg.glyph_height
        )));
    }

    let cell_w = cfg.glyph_width as u32;
    let cell_h = cfg.glyph_height as u32;
    let glyphs_x = grid.width() / cell_w;
    let glyphs_y = grid.height() / cell_h;

    if glyphs_x == 0 || glyphs_y == 0 {
        return Err(ConvertError::InvalidConfiguration(format!(
            "{}x{} image is smaller than one {}x{} glyph cell",
            grid.width(),
            grid.height(),
            cell_w,
            cell_h
        )));
    }

    let glyph_count = (glyphs_x * glyphs_y) as usize;
    let mut out = Vec::with_capacity(cfg.bytes_per_glyph() * glyph_count);
    let mut cell = Vec::with_capacity(cfg.pixels_per_glyph());

    for cell_y in 0..glyphs_y {
        for cell_x in 0..glyphs_x {
            cell.clear();
            collect_cell_bits(grid, cfg, cell_x * cell_w, cell_y * cell_h, &mut cell);
            out.extend(pack_bits(&cell, cfg.bit_numbering));
        }
    }

    Ok(out)
}

/// Enumerate one cell's pixels in reading-mode order, applying inversion.
fn collect_cell_bits(grid: &PixelGrid, cfg: &Config, ox: u32, oy: u32, bits: &mut Vec<bool>) {
    let w = cfg.glyph_width as u32;
    let h = cfg.glyph_height as u32;

    match cfg.reading_mode {
        ReadingMode::TopToBottom => {
            for x in 0..w {
                for y in 0..h {
                    bits.push(grid.get(ox + x, oy + y) ^ cfg.invert_bits);
                }
            }
        }
        ReadingMode::LeftToRight => {
            for y in 0..h {
                for x in 0..w {
                    bits.push(grid.get(ox + x, oy + y) ^ cfg.invert_bits);
                }
            }
        }
    }
}
