//! Generic C/C++ dialect.
//!
//! Emits a `static const uint8_t` array suitable for any toolchain with
//! `<stdint.h>`.
//!
//! ## Output shape
//!
//! ```text
//! // Font: 2 glyphs, 8x8 pixel cells
//! // 8 bytes per glyph, 16 bytes total
//! // Reading: top-to-bottom, bit numbering: MSB first, invert: off
//! static const uint8_t font_data[16] = {
//!     0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//!     0x00, 0x00, 0x00, 0x00,
//! };
//! ```

use super::{SourceCodeGenerator, glyph_count, header_comment, hex_body};
use crate::config::Config;
use crate::error::ConvertError;

pub struct CCodeGenerator;

impl SourceCodeGenerator for CCodeGenerator {
    fn name(&self) -> &'static str {
        "C/C++"
    }

    fn render(&self, bytes: &[u8], cfg: &Config, symbol: &str) -> Result<String, ConvertError> {
        let glyphs = glyph_count(bytes, cfg)?;
        Ok(format!(
            "{}static const uint8_t {}[{}] = {{\n{}\n}};\n",
            header_comment(bytes, cfg, glyphs),
            symbol,
            bytes.len(),
            hex_body(bytes),
        ))
    }
}
