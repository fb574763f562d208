//! # Fontpack CLI
//!
//! Command-line front end for the conversion pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # List available output formats
//! fontpack formats
//!
//! # Convert a 8x8 glyph strip to a C array on stdout
//! fontpack convert glyphs.png --width 8 --height 8
//!
//! # Arduino PROGMEM output, row-major reading, LSB-first bits
//! fontpack convert glyphs.png -w 6 -H 12 --mode left-right --lsb --format arduino
//!
//! # Start from a saved configuration, override the invert flag
//! fontpack convert glyphs.png --config font.json --invert -o font.h
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fontpack::{
    BitNumbering, Config, ConvertError, ConversionRunner, ConversionTask, ImageSource,
    ReadingMode,
    codegen::{GeneratorRegistry, SourceCodeGenerator},
};

/// Fontpack - raster image to bitmap-font source converter
#[derive(Parser, Debug)]
#[command(name = "fontpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an image into a font byte array declaration
    Convert {
        /// Path to the glyph strip image
        image: PathBuf,

        /// Glyph cell width in pixels (1-255)
        #[arg(short = 'w', long)]
        width: Option<u8>,

        /// Glyph cell height in pixels (1-255)
        #[arg(short = 'H', long)]
        height: Option<u8>,

        /// Pixel reading order within a cell: top-bottom or left-right
        #[arg(long)]
        mode: Option<String>,

        /// Place the first pixel of each byte in bit 0 instead of bit 7
        #[arg(long)]
        lsb: bool,

        /// Invert pixel polarity before packing
        #[arg(long)]
        invert: bool,

        /// Output format name (see `fontpack formats`)
        #[arg(long)]
        format: Option<String>,

        /// Symbol name for the generated array (defaults to the file stem)
        #[arg(long)]
        symbol: Option<String>,

        /// Load a saved JSON configuration; explicit flags override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write output to a file instead of stdout
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List registered output formats
    Formats,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Formats => {
            let registry = GeneratorRegistry::with_defaults();
            println!("Available formats:");
            for (i, name) in registry.names().enumerate() {
                println!("  {} - {}", i, name);
            }
            Ok(())
        }

        Commands::Convert {
            image,
            width,
            height,
            mode,
            lsb,
            invert,
            format,
            symbol,
            config,
            output,
        } => {
            let mut cfg = match config {
                Some(path) => load_config(&path)?,
                None => Config::default(),
            };

            if let Some(w) = width {
                cfg.glyph_width = w;
            }
            if let Some(h) = height {
                cfg.glyph_height = h;
            }
            if let Some(mode) = mode.as_deref() {
                cfg.reading_mode = parse_mode(mode)?;
            }
            if lsb {
                cfg.bit_numbering = BitNumbering::Lsb;
            }
            if invert {
                cfg.invert_bits = true;
            }

            if !cfg.is_valid() {
                return Err(ConvertError::InvalidConfiguration(format!(
                    "glyph cell {}x{} is out of range (use --width/--height, 1-255)",
                    cfg.glyph_width, cfg.glyph_height
                )));
            }

            let mut registry = GeneratorRegistry::with_defaults();
            if let Some(name) = format.as_deref() {
                cfg.generator_index = lookup_format(&registry, name)?;
            }
            // Out-of-range indices (e.g. from a stale config file) keep the
            // current selection rather than failing.
            registry.select(cfg.generator_index);

            let symbol = symbol.unwrap_or_else(|| symbol_from_path(&image));

            // Snapshot the config into the task; the runner cancels any
            // prior in-flight conversion (there is none in one-shot CLI
            // use, but the contract is the same a GUI shell relies on).
            let task = ConversionTask::new(
                ImageSource::Path(image),
                cfg,
                boxed_generator(registry.selected().name()),
                symbol,
            );

            let started = Instant::now();
            let mut runner = ConversionRunner::new();
            let submission = runner.submit(task);

            // Nothing cancels this one-shot submission, so delivery is
            // guaranteed.
            let outcome = submission
                .receiver
                .recv()
                .expect("conversion task delivers exactly once");
            let text = outcome?;
            let elapsed = started.elapsed();

            match output {
                Some(path) => {
                    fs::write(&path, &text)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{text}"),
            }
            eprintln!(
                "{}x{} font generated in {}ms",
                cfg.glyph_width,
                cfg.glyph_height,
                elapsed.as_millis()
            );
            Ok(())
        }
    }
}

/// Load a persisted JSON configuration.
fn load_config(path: &Path) -> Result<Config, ConvertError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        ConvertError::InvalidConfiguration(format!("{}: {e}", path.display()))
    })
}

fn parse_mode(mode: &str) -> Result<ReadingMode, ConvertError> {
    match mode {
        "top-bottom" | "top-to-bottom" => Ok(ReadingMode::TopToBottom),
        "left-right" | "left-to-right" => Ok(ReadingMode::LeftToRight),
        other => Err(ConvertError::InvalidConfiguration(format!(
            "unknown reading mode '{other}' (expected top-bottom or left-right)"
        ))),
    }
}

/// Resolve a format name to its registry index, case-insensitively.
fn lookup_format(registry: &GeneratorRegistry, name: &str) -> Result<usize, ConvertError> {
    let wanted = name.to_ascii_lowercase();
    registry
        .names()
        .position(|n| {
            let n = n.to_ascii_lowercase();
            n == wanted || n.split('/').any(|part| part == wanted)
        })
        .ok_or_else(|| {
            ConvertError::UnsupportedConfiguration(format!(
                "unknown format '{name}'; run `fontpack formats` to list them"
            ))
        })
}

/// Rebuild a boxed generator from its registry name.
///
/// Tasks own their generator (they may outlive the caller's registry
/// borrow), so the CLI hands each task a fresh instance.
fn boxed_generator(name: &str) -> Box<dyn fontpack::codegen::SourceCodeGenerator> {
    match name {
        "Arduino" => Box::new(fontpack::codegen::arduino::ArduinoCodeGenerator),
        _ => Box::new(fontpack::codegen::c::CCodeGenerator),
    }
}

/// Derive a C identifier from the image file stem.
fn symbol_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "font_data".to_string());

    let mut symbol: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if symbol.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        symbol.insert(0, '_');
    }
    symbol
}
