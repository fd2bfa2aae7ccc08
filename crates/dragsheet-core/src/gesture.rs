#![forbid(unsafe_code)]

//! Pan gesture recognition: transforms raw pointer events into pan samples.
//!
//! [`PanRecognizer`] is a stateful processor that converts a
//! press → move → release pointer sequence into [`GestureSample`] values
//! carrying a phase and the translation since the press position. Samples are
//! returned from [`process`](PanRecognizer::process) and also delivered to
//! every subscribed consumer.
//!
//! # State Machine
//!
//! ```text
//! Idle --Down--> Pressed --Move(>= threshold)--> Panning --Up--> Idle
//!                   |                              |  \--Cancel--> Idle
//!                   \--Up/Cancel--> Idle           \--Move--> Panning
//! ```
//!
//! # Invariants
//!
//! 1. Every pan is well-formed: `Began` → zero or more `Changed` → `Ended`
//!    or `Cancelled`.
//! 2. No sample is produced for a press that never crossed the drag
//!    threshold.
//! 3. `translation` is always measured from the press position, not from
//!    the point where the threshold was crossed.
//! 4. After `reset()`, the recognizer is idle. A pan that had started is
//!    closed with a `Cancelled` sample first, so consumers never see a pan
//!    without a terminal phase.
//!
//! # Failure Modes
//!
//! - A `Move` without a prior `Down` starts tracking at that position
//!   (the press was missed, e.g. delivered before the recognizer existed).
//! - An `Up` or `Cancel` without a prior `Down` is ignored.

use std::fmt;

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for pan recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Minimum manhattan distance (points) before a pan begins (default: 4.0).
    pub drag_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 4.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Events and samples
// ---------------------------------------------------------------------------

/// Raw pointer input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed at a position.
    Down(Point),
    /// Pointer moved while pressed.
    Move(Point),
    /// Pointer released.
    Up(Point),
    /// The system took the pointer away (focus loss, interruption).
    Cancel,
}

/// Phase of a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// First sample after the drag threshold was crossed.
    Began,
    /// Pointer moved during an active pan.
    Changed,
    /// Pointer released.
    Ended,
    /// Pan interrupted by the system.
    Cancelled,
}

impl GesturePhase {
    /// Whether this phase terminates the gesture.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// Translation since the gesture started, in points. Positive `y` is downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    /// Create a translation.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A purely vertical translation.
    #[must_use]
    pub const fn vertical(y: f64) -> Self {
        Self { x: 0.0, y }
    }
}

/// One pan sample as consumed by the sheet controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub phase: GesturePhase,
    pub translation: Translation,
}

impl GestureSample {
    /// Create a sample.
    #[must_use]
    pub const fn new(phase: GesturePhase, translation: Translation) -> Self {
        Self { phase, translation }
    }

    /// Shorthand for a vertical-only sample.
    #[must_use]
    pub const fn vertical(phase: GesturePhase, y: f64) -> Self {
        Self::new(phase, Translation::vertical(y))
    }
}

/// Handle returned by [`PanRecognizer::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Consumer = Box<dyn FnMut(&GestureSample)>;

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// Tracks an ongoing or potential pan.
#[derive(Debug, Clone, Copy)]
struct PanTracker {
    start: Point,
    started: bool,
}

impl PanTracker {
    fn translation_to(&self, pos: Point) -> Translation {
        Translation::new(pos.x - self.start.x, pos.y - self.start.y)
    }
}

// ---------------------------------------------------------------------------
// PanRecognizer
// ---------------------------------------------------------------------------

/// Stateful pan recognizer with sample subscribers.
pub struct PanRecognizer {
    config: GestureConfig,
    pan: Option<PanTracker>,
    last_translation: Translation,
    consumers: Vec<(SubscriptionId, Consumer)>,
    next_id: u64,
}

impl fmt::Debug for PanRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanRecognizer")
            .field("config", &self.config)
            .field("panning", &self.is_panning())
            .field("consumers", &self.consumers.len())
            .finish()
    }
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl PanRecognizer {
    /// Create a new recognizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pan: None,
            last_translation: Translation::default(),
            consumers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a sample consumer. Consumers are called in subscription order.
    pub fn subscribe<F>(&mut self, consumer: F) -> SubscriptionId
    where
        F: FnMut(&GestureSample) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.consumers.push((id, Box::new(consumer)));
        id
    }

    /// Remove a consumer. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.consumers.len();
        self.consumers.retain(|(cid, _)| *cid != id);
        self.consumers.len() != before
    }

    /// Number of registered consumers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.consumers.len()
    }

    /// Process a pointer event, returning the pan sample it produced, if any.
    pub fn process(&mut self, event: &PointerEvent) -> Option<GestureSample> {
        let sample = match *event {
            PointerEvent::Down(pos) => {
                self.pan = Some(PanTracker {
                    start: pos,
                    started: false,
                });
                None
            }
            PointerEvent::Move(pos) => self.on_move(pos),
            PointerEvent::Up(pos) => self.pan.take().and_then(|pan| {
                pan.started
                    .then(|| GestureSample::new(GesturePhase::Ended, pan.translation_to(pos)))
            }),
            PointerEvent::Cancel => self.pan.take().and_then(|pan| {
                pan.started.then(|| {
                    GestureSample::new(GesturePhase::Cancelled, self.last_translation)
                })
            }),
        };

        if let Some(ref sample) = sample {
            self.last_translation = sample.translation;
            for (_, consumer) in &mut self.consumers {
                consumer(sample);
            }
        }
        sample
    }

    /// Whether a pan is currently in progress.
    #[inline]
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan.as_ref().is_some_and(|p| p.started)
    }

    /// Return to idle. Subscribers are kept.
    ///
    /// An in-flight pan is terminated exactly like [`PointerEvent::Cancel`]
    /// and its `Cancelled` sample is returned; a press that never became a
    /// pan is dropped silently.
    pub fn reset(&mut self) -> Option<GestureSample> {
        let sample = self.process(&PointerEvent::Cancel);
        self.last_translation = Translation::default();
        sample
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    fn on_move(&mut self, pos: Point) -> Option<GestureSample> {
        let Some(ref mut pan) = self.pan else {
            // Move without prior press: start tracking here.
            self.pan = Some(PanTracker {
                start: pos,
                started: false,
            });
            return None;
        };

        if pan.started {
            return Some(GestureSample::new(
                GesturePhase::Changed,
                pan.translation_to(pos),
            ));
        }

        if pan.start.manhattan_distance(pos) >= self.config.drag_threshold {
            pan.started = true;
            return Some(GestureSample::new(
                GesturePhase::Began,
                pan.translation_to(pos),
            ));
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
