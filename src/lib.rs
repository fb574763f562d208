//! # Fontpack - Bitmap Font Converter Library
//!
//! Fontpack converts raster images of glyph strips into packed bitmap-font
//! byte arrays and renders them as compilable source text for embedded
//! display drivers. It provides:
//!
//! - **Encoding**: pixel grid → packed bits under a configurable reading
//!   order, bit numbering, and polarity
//! - **Code generation**: C/C++ and Arduino `PROGMEM` array output
//! - **Task orchestration**: cancellable background conversions with
//!   exactly-once result delivery
//!
//! ## Quick Start
//!
//! ```no_run
//! use fontpack::{
//!     codegen::{GeneratorRegistry, SourceCodeGenerator},
//!     config::Config,
//!     encoder,
//!     grid::PixelGrid,
//! };
//!
//! let image = image::open("glyphs.png")?;
//! let grid = PixelGrid::from_image(&image)?;
//!
//! let config = Config::default(); // 8x8 cells, top-to-bottom, MSB
//! let bytes = encoder::encode(&grid, &config)?;
//!
//! let registry = GeneratorRegistry::with_defaults();
//! let source = registry.selected().render(&bytes, &config, "font_data")?;
//! println!("{source}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Per-run conversion configuration |
//! | [`grid`] | Binary pixel grid (thresholded image view) |
//! | [`encoder`] | Bit packing into the font byte sequence |
//! | [`codegen`] | Source-code generator variants and registry |
//! | [`task`] | Cancellable conversion task state machine |
//! | [`runner`] | Worker-pool task runner |
//! | [`error`] | Error types |
//!
//! ## Conversion pipeline
//!
//! ```text
//! image + Config ──► PixelGrid ──► encoder ──► bytes ──► codegen ──► text
//! ```

pub mod codegen;
pub mod config;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod runner;
pub mod task;

// Re-exports for convenience
pub use config::{BitNumbering, Config, ReadingMode};
pub use error::ConvertError;
pub use grid::PixelGrid;
pub use runner::ConversionRunner;
pub use task::{ConversionTask, ImageSource};
