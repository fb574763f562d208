//! # Binary Pixel Grid
//!
//! A [`PixelGrid`] is the thresholded, binary view of a decoded raster
//! image: every pixel is either set (glyph ink) or unset (background).
//!
//! ## Thresholding
//!
//! Font strip images are authored as dark glyphs on a light background, so
//! a pixel is considered *set* when its luma falls below [`INK_THRESHOLD`].
//! There is no dithering or anti-aliasing handling; gray pixels snap to
//! whichever side of the threshold they land on.

use image::DynamicImage;

use crate::error::ConvertError;

/// Luma cutoff: pixels darker than this are glyph ink.
pub const INK_THRESHOLD: u8 = 128;

/// Binary pixel grid derived from a source image.
///
/// Dimensions are the image's native pixel dimensions; glyph cell
/// segmentation happens later in the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl PixelGrid {
    /// Threshold a decoded image into a binary grid.
    ///
    /// Fails with [`ConvertError::ImageLoad`] if the image has no pixels —
    /// a zero-sized image can't produce any glyphs and is treated the same
    /// as an unreadable file.
    pub fn from_image(image: &DynamicImage) -> Result<Self, ConvertError> {
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();
        if width == 0 || height == 0 {
            return Err(ConvertError::ImageLoad(
                "image decoded to zero pixels".to_string(),
            ));
        }

        let bits = luma.pixels().map(|p| p.0[0] < INK_THRESHOLD).collect();
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Build a grid directly from row-major bits. `bits.len()` must equal
    /// `width * height`.
    pub fn from_bits(width: u32, height: u32, bits: Vec<bool>) -> Result<Self, ConvertError> {
        if bits.len() != width as usize * height as usize {
            return Err(ConvertError::ImageLoad(format!(
                "bit count {} doesn't match {}x{} grid",
                bits.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// All-unset grid, mainly useful in tests.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y). Panics if out of bounds; callers stay within the
    /// grid by construction.
    pub fn get(&self, x: u32, y: u32) -> bool {
        debug_assert!(x < self.width && y < self.height);
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Set pixel at (x, y), for building test fixtures.
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        debug_assert!(x < self.width && y < self.height);
        self.bits[y as usize * self.width as usize + x as usize] = value;
    }
}
