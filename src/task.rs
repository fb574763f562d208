//! # Conversion Task
//!
//! A [`ConversionTask`] is one cancellable unit of conversion work: load
//! and threshold the image, encode it, render source text, and deliver the
//! outcome exactly once.
//!
//! ## State machine
//!
//! ```text
//! Pending ──► Running ──► Completed   (outcome delivered, success or error)
//!    │           │
//!    └───────────┴──────► Canceled    (outcome suppressed, never delivered)
//! ```
//!
//! Cancellation is cooperative: flipping the flag never interrupts an
//! encode or render already underway (both are fast), it only prevents the
//! result from being delivered. The task captures its own copy of the
//! [`Config`] at construction, so front-end mutation after submission can't
//! leak into a task in flight.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::SyncSender;

use image::DynamicImage;

use crate::codegen::SourceCodeGenerator;
use crate::config::Config;
use crate::encoder;
use crate::error::ConvertError;
use crate::grid::PixelGrid;

/// The single result a task ever produces: rendered source text, or one of
/// the terminal conversion errors.
pub type ConversionOutcome = Result<String, ConvertError>;

/// Where the task gets its pixels from.
pub enum ImageSource {
    /// Decode from a file via the `image` crate.
    Path(PathBuf),
    /// Already-decoded image (e.g. handed over by a front end).
    Image(DynamicImage),
    /// Pre-thresholded grid, used by tests.
    Grid(PixelGrid),
}

/// Lifecycle state of a conversion task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Canceled,
    Completed,
}

const STATE_PENDING: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_CANCELED: u8 = 2;
const STATE_COMPLETED: u8 = 3;

struct TaskFlags {
    state: AtomicU8,
    canceled: AtomicBool,
}

/// Caller-side view of a submitted task.
///
/// The handle outlives the task itself; it only observes state and can
/// request cancellation.
#[derive(Clone)]
pub struct TaskHandle {
    flags: Arc<TaskFlags>,
}

impl TaskHandle {
    /// Mark the task canceled. A running task finishes its current
    /// encode/render step but discards the outcome instead of delivering.
    pub fn cancel(&self) {
        self.flags.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.flags.canceled.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> TaskState {
        match self.flags.state.load(Ordering::SeqCst) {
            STATE_PENDING => TaskState::Pending,
            STATE_RUNNING => TaskState::Running,
            STATE_CANCELED => TaskState::Canceled,
            _ => TaskState::Completed,
        }
    }

    /// True once the task has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self.state(), TaskState::Canceled | TaskState::Completed)
    }
}

/// One conversion request: image source + config snapshot + selected
/// generator.
pub struct ConversionTask {
    source: ImageSource,
    config: Config,
    generator: Box<dyn SourceCodeGenerator>,
    symbol: String,
    flags: Arc<TaskFlags>,
}

impl ConversionTask {
    /// Build a task. `config` is copied in; later changes to the caller's
    /// value don't reach this task.
    pub fn new(
        source: ImageSource,
        config: Config,
        generator: Box<dyn SourceCodeGenerator>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            source,
            config,
            generator,
            symbol: symbol.into(),
            flags: Arc::new(TaskFlags {
                state: AtomicU8::new(STATE_PENDING),
                canceled: AtomicBool::new(false),
            }),
        }
    }

    pub fn handle(&self) -> TaskHandle {
        TaskHandle {
            flags: self.flags.clone(),
        }
    }

    /// Execute the task and deliver the outcome through `tx`.
    ///
    /// Delivery happens at most once. `tx` should be the sending half of a
    /// zero-capacity [`std::sync::mpsc::sync_channel`], so a successful
    /// send blocks this worker until the caller has taken the result. A
    /// task that was canceled — or whose receiver was dropped because a
    /// newer request superseded it — ends in `Canceled` without delivering.
    pub fn run(self, tx: SyncSender<ConversionOutcome>) {
        if self.flags.canceled.load(Ordering::SeqCst) {
            self.flags.state.store(STATE_CANCELED, Ordering::SeqCst);
            return;
        }
        self.flags.state.store(STATE_RUNNING, Ordering::SeqCst);

        let outcome = self.execute();

        if self.flags.canceled.load(Ordering::SeqCst) {
            self.flags.state.store(STATE_CANCELED, Ordering::SeqCst);
            return;
        }

        match tx.send(outcome) {
            Ok(()) => self.flags.state.store(STATE_COMPLETED, Ordering::SeqCst),
            Err(_) => self.flags.state.store(STATE_CANCELED, Ordering::SeqCst),
        }
    }

    /// The pipeline proper: load → encode → render.
    fn execute(&self) -> ConversionOutcome {
        let grid = match &self.source {
            ImageSource::Path(path) => {
                let img = image::open(path)
                    .map_err(|e| ConvertError::ImageLoad(format!("{}: {e}", path.display())))?;
                PixelGrid::from_image(&img)?
            }
            ImageSource::Image(img) => PixelGrid::from_image(img)?,
            ImageSource::Grid(grid) => grid.clone(),
        };

        let bytes = encoder::encode(&grid, &self.config)?;
        self.generator.render(&bytes, &self.config, &self.symbol)
    }
}
