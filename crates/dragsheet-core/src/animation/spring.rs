#![forbid(unsafe_code)]

//! Normalized settle spring.
//!
//! The sheet never animates raw coordinates. A settle run maps the panel
//! origin and dim alpha onto a single progress value that travels from 0.0
//! (where the finger let go) to 1.0 (the target stop), and this spring drives
//! that value:
//!
//! ```text
//!   a = -k · (p - 1) - c · v
//! ```
//!
//! Callers describe the spring the way UI animators do, with a damping ratio,
//! an initial velocity, and a duration ([`SpringTiming`]). Stiffness and
//! damping are derived from those so the oscillation envelope has decayed to
//! about e⁻⁶ of its start when `duration` elapses.
//!
//! # Invariants
//!
//! 1. Progress starts at 0.0; the target is always 1.0.
//! 2. `progress()` is unclamped; a damping ratio below 1.0 overshoots.
//! 3. Once at rest the spring stays at exactly 1.0 until [`Animation::reset`].
//! 4. Advancing by `n` frames of `dt` equals advancing by `n·dt` in one call
//!    whenever `dt` is a multiple of the integration step.

use std::time::Duration;

use super::Animation;

/// Integration step. Larger deltas are split into equal sub-steps no longer
/// than this.
const STEP_SECS: f64 = 0.004;

/// Progress distance from 1.0 below which the spring may come to rest.
const REST_PROGRESS: f64 = 0.001;

/// Velocity (progress units per second) below which the spring may come to
/// rest.
const REST_VELOCITY: f64 = 0.01;

/// Envelope decay, in time constants, reached at the end of a timed spring.
const SETTLE_DECAY: f64 = 6.0;

/// Shortest duration accepted when deriving spring constants.
const MIN_DURATION_SECS: f64 = 0.001;

/// Damping ratios are clamped into this range when deriving the frequency.
const MIN_RATIO: f64 = 0.01;

// ---------------------------------------------------------------------------
// SpringTiming
// ---------------------------------------------------------------------------

/// Spring timing expressed the way UI animators describe it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringTiming {
    /// Damping ratio ζ. 1.0 is critically damped, below 1.0 bounces.
    pub damping_ratio: f64,
    /// Initial velocity along the animated axis, in units of the total
    /// travel distance per second (10.0 = ten distances per second).
    pub initial_velocity: f64,
    /// Time the motion is expected to take to settle.
    pub duration: Duration,
}

impl Default for SpringTiming {
    fn default() -> Self {
        Self {
            damping_ratio: 0.7,
            initial_velocity: 10.0,
            duration: Duration::from_millis(800),
        }
    }
}

impl SpringTiming {
    /// Natural angular frequency ω₀ (rad/s).
    #[must_use]
    pub fn natural_frequency(&self) -> f64 {
        let zeta = self.damping_ratio.clamp(MIN_RATIO, 1.0);
        let secs = self.duration.as_secs_f64().max(MIN_DURATION_SECS);
        SETTLE_DECAY / (zeta * secs)
    }
}

// ---------------------------------------------------------------------------
// Spring
// ---------------------------------------------------------------------------

/// Damped spring pulling a progress value from 0.0 to 1.0.
///
/// ```
/// use std::time::Duration;
/// use dragsheet_core::animation::{Animation, Spring, SpringTiming};
///
/// let mut spring = Spring::from_timing(&SpringTiming::default());
/// while !spring.is_complete() {
///     spring.tick(Duration::from_millis(16));
/// }
/// assert_eq!(spring.progress(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    progress: f64,
    velocity: f64,
    launch_velocity: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring with explicit constants and no initial velocity.
    ///
    /// Non-finite or negative constants are replaced by zero, which leaves a
    /// spring that never moves unless given velocity.
    #[must_use]
    pub fn new(stiffness: f64, damping: f64) -> Self {
        let sanitize = |x: f64| if x.is_finite() { x.max(0.0) } else { 0.0 };
        Self {
            progress: 0.0,
            velocity: 0.0,
            launch_velocity: 0.0,
            stiffness: sanitize(stiffness),
            damping: sanitize(damping),
            at_rest: false,
        }
    }

    /// Spring matching `timing`: stiffness ω₀², damping 2ζω₀.
    #[must_use]
    pub fn from_timing(timing: &SpringTiming) -> Self {
        let omega = timing.natural_frequency();
        let zeta = timing.damping_ratio.max(0.0);
        Self::new(omega * omega, 2.0 * zeta * omega).with_initial_velocity(timing.initial_velocity)
    }

    /// Launch velocity in progress units per second. Restored by `reset`.
    #[must_use]
    pub fn with_initial_velocity(mut self, velocity: f64) -> Self {
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        self.launch_velocity = velocity;
        self.velocity = velocity;
        self
    }

    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// ζ = c / (2√k). Infinite for a spring without stiffness.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * self.stiffness.sqrt())
    }

    /// Jump to 1.0 and stop.
    pub fn snap(&mut self) {
        self.progress = 1.0;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Integrate forward by `dt` (semi-implicit Euler).
    pub fn advance(&mut self, dt: Duration) {
        let secs = dt.as_secs_f64();
        if self.at_rest || secs <= 0.0 {
            return;
        }

        let steps = (secs / STEP_SECS).ceil().max(1.0);
        let h = secs / steps;
        for _ in 0..steps as u64 {
            let accel = -self.stiffness * (self.progress - 1.0) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.progress += self.velocity * h;
        }

        if (self.progress - 1.0).abs() < REST_PROGRESS && self.velocity.abs() < REST_VELOCITY {
            self.snap();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Progress clamped to [0.0, 1.0].
    fn value(&self) -> f32 {
        (self.progress as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.progress = 0.0;
        self.velocity = self.launch_velocity;
        self.at_rest = false;
    }
}
