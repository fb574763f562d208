//! # Source Code Generators
//!
//! Renders a packed font byte sequence as compilable source text for an
//! embedded target. Each dialect implements [`SourceCodeGenerator`]; new
//! targets are added by implementing the trait and registering it, never by
//! touching the encoder.
//!
//! ## Dialects
//!
//! | Generator | Output |
//! |-----------|--------|
//! | [`c::CCodeGenerator`] | `static const uint8_t[]` declaration |
//! | [`arduino::ArduinoCodeGenerator`] | `PROGMEM`-annotated flash table |
//!
//! Both emit the byte sequence verbatim as zero-padded two-digit hex
//! literals, 12 per line, preceded by a header comment carrying the glyph
//! geometry and byte count. The formatting is lossless: parsing the hex
//! literals back in order reproduces the exact input bytes.

pub mod arduino;
pub mod c;

use crate::config::{BitNumbering, Config, ReadingMode};
use crate::error::ConvertError;

/// Hex literals emitted per line in the array body.
const BYTES_PER_LINE: usize = 12;

/// A target-dialect-specific renderer for packed font bytes.
///
/// Implementations are pure: same bytes + config + symbol always produce
/// the same text, and byte order is never altered.
pub trait SourceCodeGenerator: Send + Sync {
    /// Human-readable dialect name for registry listings.
    fn name(&self) -> &'static str;

    /// Render the byte sequence as a source declaration named `symbol`.
    fn render(&self, bytes: &[u8], cfg: &Config, symbol: &str) -> Result<String, ConvertError>;
}

impl SourceCodeGenerator for Box<dyn SourceCodeGenerator> {
    fn name(&self) -> &'static str {
        self.as_ref().name()
    }

    fn render(&self, bytes: &[u8], cfg: &Config, symbol: &str) -> Result<String, ConvertError> {
        self.as_ref().render(bytes, cfg, symbol)
    }
}

/// Check that a byte sequence is consistent with the config's glyph
/// geometry, returning the implied glyph count.
///
/// An empty sequence, an invalid config, or a length that isn't a whole
/// number of glyphs all fail with `UnsupportedConfiguration`.
fn glyph_count(bytes: &[u8], cfg: &Config) -> Result<usize, ConvertError> {
    if !cfg.is_valid() {
        return Err(ConvertError::UnsupportedConfiguration(format!(
            "can't render with {}x{} glyph cells",
            cfg.glyph_width, cfg.glyph_height
        )));
    }
    let per_glyph = cfg.bytes_per_glyph();
    if bytes.is_empty() || bytes.len() % per_glyph != 0 {
        return Err(ConvertError::UnsupportedConfiguration(format!(
            "{} bytes is not a whole number of {}-byte glyphs",
            bytes.len(),
            per_glyph
        )));
    }
    Ok(bytes.len() / per_glyph)
}

/// Header comment shared by all dialects (both use `//` comments).
fn header_comment(bytes: &[u8], cfg: &Config, glyphs: usize) -> String {
    let reading = match cfg.reading_mode {
        ReadingMode::TopToBottom => "top-to-bottom",
        ReadingMode::LeftToRight => "left-to-right",
    };
    let numbering = match cfg.bit_numbering {
        BitNumbering::Msb => "MSB",
        BitNumbering::Lsb => "LSB",
    };
    format!(
        "// Font: {glyphs} glyphs, {}x{} pixel cells\n\
         // {} bytes per glyph, {} bytes total\n\
         // Reading: {reading}, bit numbering: {numbering} first, invert: {}\n",
        cfg.glyph_width,
        cfg.glyph_height,
        cfg.bytes_per_glyph(),
        bytes.len(),
        if cfg.invert_bits { "on" } else { "off" },
    )
}

/// Format the array body: indented rows of `0xNN,` literals, byte order
/// preserved exactly.
fn hex_body(bytes: &[u8]) -> String {
    let mut body = String::with_capacity(bytes.len() * 6);
    for (i, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if i > 0 {
            body.push('\n');
        }
        body.push_str("    ");
        let literals: Vec<String> = chunk.iter().map(|b| format!("0x{:02x}", b)).collect();
        body.push_str(&literals.join(", "));
        body.push(',');
    }
    body
}

/// Registry of generator variants, selected by index.
///
/// The front end registers dialects at startup and the pipeline selects by
/// the config's `generator_index`. An out-of-range index is tolerated by
/// keeping the previous selection, matching the behavior a combo-box-backed
/// shell expects.
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn SourceCodeGenerator>>,
    selected: usize,
}

impl GeneratorRegistry {
    /// Registry with the built-in dialects: C/C++ at index 0, Arduino at 1.
    pub fn with_defaults() -> Self {
        Self {
            generators: vec![
                Box::new(c::CCodeGenerator),
                Box::new(arduino::ArduinoCodeGenerator),
            ],
            selected: 0,
        }
    }

    pub fn register(&mut self, generator: Box<dyn SourceCodeGenerator>) {
        self.generators.push(generator);
    }

    /// Select a generator by index. Out-of-range indices leave the current
    /// selection untouched.
    pub fn select(&mut self, index: usize) {
        if index < self.generators.len() {
            self.selected = index;
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &dyn SourceCodeGenerator {
        self.generators[self.selected].as_ref()
    }

    pub fn get(&self, index: usize) -> Option<&dyn SourceCodeGenerator> {
        self.generators.get(index).map(|g| g.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.iter().map(|g| g.name())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
