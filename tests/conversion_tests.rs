//! # Conversion Pipeline Tests
//!
//! End-to-end tests of the image → encoder → generator pipeline and the
//! runner's supersede-cancels contract. Unit-level packing behavior lives
//! in the module tests; these exercise the crate the way a front end does.

use pretty_assertions::assert_eq;

use fontpack::codegen::{GeneratorRegistry, SourceCodeGenerator};
use fontpack::task::TaskState;
use fontpack::{
    BitNumbering, Config, ConversionRunner, ConversionTask, ImageSource, PixelGrid, ReadingMode,
    encoder,
};
use image::{DynamicImage, GrayImage, Luma};
use std::time::{Duration, Instant};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Build a grayscale image from a pixel function (true = ink/black).
fn make_image(width: u32, height: u32, ink: impl Fn(u32, u32) -> bool) -> DynamicImage {
    let mut img = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.put_pixel(x, y, Luma([if ink(x, y) { 0 } else { 255 }]));
        }
    }
    DynamicImage::ImageLuma8(img)
}

fn config(width: u8, height: u8) -> Config {
    Config {
        glyph_width: width,
        glyph_height: height,
        ..Config::default()
    }
}

/// Parse every `0xNN` literal out of generated source text, in order.
fn parse_hex_bytes(text: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("0x") {
        let literal = &rest[pos + 2..pos + 4];
        bytes.push(u8::from_str_radix(literal, 16).unwrap());
        rest = &rest[pos + 4..];
    }
    bytes
}

/// Re-expand packed bytes into the per-cell bit sequence they encode.
fn unpack(bytes: &[u8], bits_per_glyph: usize, numbering: BitNumbering) -> Vec<bool> {
    let bytes_per_glyph = bits_per_glyph.div_ceil(8);
    let mut bits = Vec::new();
    for glyph in bytes.chunks(bytes_per_glyph) {
        for i in 0..bits_per_glyph {
            let bit_pos = match numbering {
                BitNumbering::Msb => 7 - (i % 8),
                BitNumbering::Lsb => i % 8,
            };
            bits.push((glyph[i / 8] >> bit_pos) & 1 == 1);
        }
    }
    bits
}

fn wait_finished(handle: &fontpack::task::TaskHandle) -> TaskState {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !handle.is_finished() {
        assert!(Instant::now() < deadline, "task never finished");
        std::thread::sleep(Duration::from_millis(1));
    }
    handle.state()
}

// ============================================================================
// ENCODER PROPERTIES
// ============================================================================

#[test]
fn all_zero_image_encodes_to_zero_bytes() {
    let img = make_image(32, 16, |_, _| false);
    let grid = PixelGrid::from_image(&img).unwrap();

    let cfg = config(8, 8);
    let bytes = encoder::encode(&grid, &cfg).unwrap();

    // 4x2 = 8 glyphs, ceil(64/8) = 8 bytes each
    assert_eq!(bytes.len(), 64);
    assert!(bytes.iter().all(|&b| b == 0));
}

#[test]
fn all_zero_image_inverted_fills_valid_bits() {
    let img = make_image(10, 5, |_, _| false);
    let grid = PixelGrid::from_image(&img).unwrap();

    // 5x5 cells: 25 pixels -> 4 bytes, last byte has one valid bit.
    let mut cfg = config(5, 5);
    cfg.invert_bits = true;
    let bytes = encoder::encode(&grid, &cfg).unwrap();

    assert_eq!(bytes.len(), 8); // 2 glyphs * 4 bytes
    for glyph in bytes.chunks(4) {
        assert_eq!(glyph[0..3], [0xFF, 0xFF, 0xFF]);
        assert_eq!(glyph[3], 0x80); // 1 valid bit set, 7 padding bits zero
    }
}

#[test]
fn encoding_is_idempotent() {
    let img = make_image(24, 8, |x, y| (x + y) % 3 == 0);
    let grid = PixelGrid::from_image(&img).unwrap();
    let cfg = config(8, 8);

    assert_eq!(
        encoder::encode(&grid, &cfg).unwrap(),
        encoder::encode(&grid, &cfg).unwrap()
    );
}

#[test]
fn bit_numbering_round_trips_pixel_order() {
    let img = make_image(8, 8, |x, y| (x * y) % 5 < 2);
    let grid = PixelGrid::from_image(&img).unwrap();

    // Reference enumeration: columns left->right, rows top->bottom.
    let mut expected = Vec::new();
    for x in 0..8 {
        for y in 0..8 {
            expected.push(grid.get(x, y));
        }
    }

    for numbering in [BitNumbering::Msb, BitNumbering::Lsb] {
        let mut cfg = config(8, 8);
        cfg.bit_numbering = numbering;
        let bytes = encoder::encode(&grid, &cfg).unwrap();
        assert_eq!(unpack(&bytes, 64, numbering), expected);
    }
}

#[test]
fn invert_flips_every_valid_bit() {
    let img = make_image(16, 8, |x, y| x == y);
    let grid = PixelGrid::from_image(&img).unwrap();

    let plain = encoder::encode(&grid, &config(8, 8)).unwrap();
    let mut cfg = config(8, 8);
    cfg.invert_bits = true;
    let inverted = encoder::encode(&grid, &cfg).unwrap();

    // 8x8 cells have no padding bits, so every bit flips.
    let flipped: Vec<u8> = plain.iter().map(|b| !b).collect();
    assert_eq!(inverted, flipped);
}

#[test]
fn reading_modes_produce_distinct_output() {
    // Single ink pixel at (2, 1) in a non-square 6x3 cell.
    let img = make_image(6, 3, |x, y| x == 2 && y == 1);
    let grid = PixelGrid::from_image(&img).unwrap();

    let mut cfg = config(6, 3);
    cfg.reading_mode = ReadingMode::TopToBottom;
    let ttb = encoder::encode(&grid, &cfg).unwrap();
    cfg.reading_mode = ReadingMode::LeftToRight;
    let ltr = encoder::encode(&grid, &cfg).unwrap();

    assert_ne!(ttb, ltr);
}

#[test]
fn top_left_pixel_msb_yields_0x80() {
    // The locked literal scenario from the design notes.
    let img = make_image(8, 8, |x, y| x == 0 && y == 0);
    let grid = PixelGrid::from_image(&img).unwrap();

    let bytes = encoder::encode(&grid, &config(8, 8)).unwrap();
    assert_eq!(bytes[0], 0x80);
    assert_eq!(&bytes[1..], &[0u8; 7]);
}

#[test]
fn zero_width_fails_with_invalid_configuration() {
    let grid = PixelGrid::blank(8, 8);
    let err = encoder::encode(&grid, &config(0, 8)).unwrap_err();
    assert_eq!(err.code(), "InvalidConfiguration");
}

// ============================================================================
// SOURCE TEXT ROUND-TRIP
// ============================================================================

#[test]
fn generated_source_round_trips_for_every_format() {
    let img = make_image(16, 8, |x, y| (x ^ y) & 1 == 0);
    let grid = PixelGrid::from_image(&img).unwrap();
    let cfg = config(8, 8);
    let bytes = encoder::encode(&grid, &cfg).unwrap();

    let registry = GeneratorRegistry::with_defaults();
    for i in 0..registry.len() {
        let generator = registry.get(i).unwrap();
        let text = generator.render(&bytes, &cfg, "glyphs").unwrap();
        assert_eq!(
            parse_hex_bytes(&text),
            bytes,
            "format '{}' must be lossless",
            generator.name()
        );
    }
}

#[test]
fn header_comment_reports_geometry_and_size() {
    let bytes = vec![0u8; 16];
    let cfg = config(8, 8);
    let registry = GeneratorRegistry::with_defaults();

    for i in 0..registry.len() {
        let text = registry.get(i).unwrap().render(&bytes, &cfg, "g").unwrap();
        assert!(text.contains("2 glyphs, 8x8 pixel cells"));
        assert!(text.contains("16 bytes total"));
    }
}

// ============================================================================
// TASK & RUNNER SCENARIOS
// ============================================================================

fn task_with_symbol(symbol: &str) -> ConversionTask {
    let img = make_image(8, 8, |x, _| x == 0);
    ConversionTask::new(
        ImageSource::Image(img),
        config(8, 8),
        Box::new(fontpack::codegen::c::CCodeGenerator),
        symbol,
    )
}

#[test]
fn full_pipeline_through_runner() {
    let mut runner = ConversionRunner::new();
    let submission = runner.submit(task_with_symbol("column_font"));

    let text = submission.receiver.recv().unwrap().unwrap();
    assert!(text.contains("static const uint8_t column_font[8]"));
    // Left column of ink, top-to-bottom MSB: first byte all ones.
    assert!(text.contains("0xff"));
}

#[test]
fn superseding_submission_cancels_prior_and_delivers_newer() {
    let mut runner = ConversionRunner::new();

    let first = runner.submit(task_with_symbol("first_font"));
    let first_handle = first.handle.clone();
    drop(first); // caller discards the superseded reference

    let second = runner.submit(task_with_symbol("second_font"));

    // The one result the caller receives corresponds to the newer request.
    let text = second.receiver.recv().unwrap().unwrap();
    assert!(text.contains("second_font"));

    assert_eq!(wait_finished(&first_handle), TaskState::Canceled);
    assert_eq!(wait_finished(&second.handle), TaskState::Completed);
}

#[test]
fn task_reports_image_load_error_exactly_once() {
    let mut runner = ConversionRunner::new();
    let task = ConversionTask::new(
        ImageSource::Path("does-not-exist.png".into()),
        config(8, 8),
        Box::new(fontpack::codegen::c::CCodeGenerator),
        "f",
    );
    let submission = runner.submit(task);

    let err = submission.receiver.recv().unwrap().unwrap_err();
    assert_eq!(err.code(), "ImageLoadError");
    assert_eq!(err.summary(), "Couldn't read image from provided file");

    // Exactly one delivery: the channel is now disconnected.
    assert!(submission.receiver.recv().is_err());
}
