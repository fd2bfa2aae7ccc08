#![forbid(unsafe_code)]

//! Settle animation: moving the sheet from wherever the finger left it to a
//! stop's rest values.
//!
//! A [`SettleAnimator`] owns at most one run at a time. The controller starts
//! a run on release, stops it when a new drag interrupts, and polls it each
//! frame through [`SettleAnimator::advance`]. Animators backed by a platform
//! scheduler may return `None` from `advance` and report completion through
//! `SheetController::settle_finished` instead.
//!
//! # Invariants
//!
//! 1. Handles are never reused within one animator.
//! 2. A stopped run never produces a `finished` frame.
//! 3. The last frame of a run that finishes carries exactly the target visual.

use std::time::Duration;

use dragsheet_core::animation::{Animation, Spring, SpringTiming};

use crate::stop::Stop;

/// Animated properties of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SheetVisual {
    /// Panel top edge.
    pub origin_y: f64,
    /// Dim backdrop opacity.
    pub dim_alpha: f64,
}

impl SheetVisual {
    #[must_use]
    pub const fn new(origin_y: f64, dim_alpha: f64) -> Self {
        Self {
            origin_y,
            dim_alpha,
        }
    }

    /// Rest values of `stop` in a container of the given height.
    #[must_use]
    pub fn at_stop(stop: Stop, container_height: f64) -> Self {
        Self::new(stop.origin_y(container_height), stop.dim_alpha())
    }

    /// Interpolate toward `to`. `t` may leave [0, 1] (spring overshoot); the
    /// origin follows it, the dim alpha stays between the two endpoints.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let lo = self.dim_alpha.min(to.dim_alpha);
        let hi = self.dim_alpha.max(to.dim_alpha);
        let alpha = self.dim_alpha + (to.dim_alpha - self.dim_alpha) * t;
        Self {
            origin_y: self.origin_y + (to.origin_y - self.origin_y) * t,
            // Both endpoints NaN leaves no range to clamp to.
            dim_alpha: if lo <= hi { alpha.clamp(lo, hi) } else { alpha },
        }
    }
}

/// Identifies one settle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettleHandle(u64);

impl SettleHandle {
    /// Construct a handle from a raw id (for custom animators).
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleFrame {
    pub handle: SettleHandle,
    pub visual: SheetVisual,
    /// The run reached its end; `visual` is the target.
    pub finished: bool,
}

/// The settle-to-position animation primitive.
pub trait SettleAnimator {
    /// Begin animating from `from` to `to`. Replaces any run in flight.
    fn start(&mut self, from: SheetVisual, to: SheetVisual, timing: &SpringTiming) -> SettleHandle;

    /// Halt `handle` mid-flight, returning the visual at the stop point.
    /// Returns `None` if `handle` is not the current run.
    fn stop(&mut self, handle: SettleHandle) -> Option<SheetVisual>;

    /// Advance the current run by `dt`.
    fn advance(&mut self, dt: Duration) -> Option<SettleFrame>;

    /// Whether a run is in flight.
    fn is_running(&self) -> bool;
}

// ---------------------------------------------------------------------------
// SpringSettle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct SpringRun {
    handle: SettleHandle,
    from: SheetVisual,
    to: SheetVisual,
    spring: Spring,
    elapsed: Duration,
    duration: Duration,
}

impl SpringRun {
    fn visual(&self) -> SheetVisual {
        self.from.lerp(&self.to, self.spring.progress())
    }
}

/// Built-in animator driving a normalized [`Spring`] between two visuals.
///
/// A run finishes when the spring comes to rest or the timing's duration
/// elapses, whichever is first; either way the final frame snaps to the
/// target.
#[derive(Debug, Clone, Default)]
pub struct SpringSettle {
    next_id: u64,
    run: Option<SpringRun>,
}

impl SpringSettle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visual of the run in flight.
    #[must_use]
    pub fn current(&self) -> Option<SheetVisual> {
        self.run.as_ref().map(SpringRun::visual)
    }
}

impl SettleAnimator for SpringSettle {
    fn start(&mut self, from: SheetVisual, to: SheetVisual, timing: &SpringTiming) -> SettleHandle {
        let handle = SettleHandle(self.next_id);
        self.next_id += 1;
        self.run = Some(SpringRun {
            handle,
            from,
            to,
            spring: Spring::from_timing(timing),
            elapsed: Duration::ZERO,
            duration: timing.duration,
        });
        handle
    }

    fn stop(&mut self, handle: SettleHandle) -> Option<SheetVisual> {
        if self.run.as_ref().is_some_and(|run| run.handle == handle) {
            self.run.take().map(|run| run.visual())
        } else {
            None
        }
    }

    fn advance(&mut self, dt: Duration) -> Option<SettleFrame> {
        let run = self.run.as_mut()?;
        run.spring.tick(dt);
        run.elapsed = run.elapsed.saturating_add(dt);

        if run.spring.is_complete() || run.elapsed >= run.duration {
            let handle = run.handle;
            let to = run.to;
            self.run = None;
            return Some(SettleFrame {
                handle,
                visual: to,
                finished: true,
            });
        }

        Some(SettleFrame {
            handle: run.handle,
            visual: run.visual(),
            finished: false,
        })
    }

    fn is_running(&self) -> bool {
        self.run.is_some()
    }
}
