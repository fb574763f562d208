//! # Conversion Configuration
//!
//! This module defines the per-run configuration value object.
//!
//! A [`Config`] is assembled by the front end (CLI flags, a persisted JSON
//! file, a GUI — whatever drives the pipeline) and snapshotted into each
//! conversion task at submission time. Mutating the front end's copy after
//! submission never affects a task already in flight.
//!
//! ## Glyph geometry
//!
//! `glyph_width` and `glyph_height` describe one glyph cell, not the whole
//! image. The source image is segmented into cells of this size, row-major:
//!
//! ```text
//! ┌────┬────┬────┐
//! │ 0  │ 1  │ 2  │   each cell: glyph_width × glyph_height pixels
//! ├────┼────┼────┤
//! │ 3  │ 4  │ 5  │   trailing pixels that don't fill a cell are dropped
//! └────┴────┴────┘
//! ```
//!
//! Valid cell dimensions are 1-255; both stored as `u8` with 0 meaning
//! "unset/invalid".

use serde::{Deserialize, Serialize};

/// Pixel enumeration order within a glyph cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingMode {
    /// Walk columns left→right, each column top→bottom.
    ///
    /// Natural for displays addressed in vertical byte columns
    /// (SSD1306 and friends).
    TopToBottom,
    /// Walk rows top→bottom, each row left→right.
    LeftToRight,
}

/// Which bit of a byte receives the first enumerated pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BitNumbering {
    /// First pixel lands in bit 7, subsequent pixels fill downward.
    Msb,
    /// First pixel lands in bit 0, subsequent pixels fill upward.
    Lsb,
}

/// Conversion configuration, immutable for the duration of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Glyph cell width in pixels (1-255, 0 = invalid)
    pub glyph_width: u8,

    /// Glyph cell height in pixels (1-255, 0 = invalid)
    pub glyph_height: u8,

    /// Pixel enumeration order within a cell
    pub reading_mode: ReadingMode,

    /// Flip every bit's logical value before packing
    pub invert_bits: bool,

    /// Bit position of the first enumerated pixel within each byte
    pub bit_numbering: BitNumbering,

    /// Index into the generator registry selecting the output dialect.
    /// An out-of-range index is tolerated: the registry keeps its
    /// previous selection.
    pub generator_index: usize,
}

impl Config {
    pub fn is_width_valid(&self) -> bool {
        self.glyph_width >= 1
    }

    pub fn is_height_valid(&self) -> bool {
        self.glyph_height >= 1
    }

    /// A config may only be submitted to the encoder when both cell
    /// dimensions are in range.
    pub fn is_valid(&self) -> bool {
        self.is_width_valid() && self.is_height_valid()
    }

    /// Pixels per glyph cell.
    pub fn pixels_per_glyph(&self) -> usize {
        self.glyph_width as usize * self.glyph_height as usize
    }

    /// Packed bytes per glyph cell. Each glyph starts byte-aligned, so a
    /// cell whose pixel count isn't a multiple of 8 pads its last byte.
    pub fn bytes_per_glyph(&self) -> usize {
        self.pixels_per_glyph().div_ceil(8)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            glyph_width: 8,
            glyph_height: 8,
            reading_mode: ReadingMode::TopToBottom,
            invert_bits: false,
            bit_numbering: BitNumbering::Msb,
            generator_index: 0,
        }
    }
}
