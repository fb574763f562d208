//! Arduino dialect.
//!
//! Same byte formatting as the C/C++ generator, but the table is annotated
//! with `PROGMEM` so it lives in flash instead of SRAM, and the required
//! `avr/pgmspace.h` include is emitted. Reads must go through
//! `pgm_read_byte` on AVR targets.

use super::{SourceCodeGenerator, glyph_count, header_comment, hex_body};
use crate::config::Config;
use crate::error::ConvertError;

pub struct ArduinoCodeGenerator;

impl SourceCodeGenerator for ArduinoCodeGenerator {
    fn name(&self) -> &'static str {
        "Arduino"
    }

    fn render(&self, bytes: &[u8], cfg: &Config, symbol: &str) -> Result<String, ConvertError> {
        let glyphs = glyph_count(bytes, cfg)?;
        Ok(format!(
            "#include <avr/pgmspace.h>\n\n{}const uint8_t {}[{}] PROGMEM = {{\n{}\n}};\n",
            header_comment(bytes, cfg, glyphs),
            symbol,
            bytes.len(),
            hex_body(bytes),
        ))
    }
}
