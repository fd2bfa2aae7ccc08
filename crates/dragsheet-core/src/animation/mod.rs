#![forbid(unsafe_code)]

//! Animation primitives.
//!
//! Everything here is tick-driven: the host advances animations with a frame
//! delta and reads back the current value. There is no internal clock, which
//! keeps animations deterministic under test.

pub mod spring;

use std::time::Duration;

pub use spring::{Spring, SpringTiming};

/// A time-driven animation.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has finished.
    fn is_complete(&self) -> bool;

    /// Current normalized value in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}
