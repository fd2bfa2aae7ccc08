#![forbid(unsafe_code)]

//! Drag controller: turns pan samples into panel motion, dimming, and settle
//! animations between the three stops.
//!
//! # State Machine
//!
//! ```text
//!            sample                      release
//!   Idle ───────────────▶ Dragging ───────────────▶ Settling
//!    ▲                      ▲                         │ │
//!    │                      │ sample (cancel path)    │ │
//!    │                      └─────────────────────────┘ │
//!    └──────────────── completed / cancelled ───────────┘
//! ```
//!
//! - A sample while `Idle` starts a drag anchored at the committed stop's
//!   rest origin.
//! - A sample while `Settling` first stops the animation (without
//!   committing), then starts a drag anchored at the live panel origin.
//! - `Ended` / `Cancelled` classify the release and start a settle.
//! - Only a settle that runs to completion commits `current_stop`.
//!
//! # Interrupted drags
//!
//! After a settle is cut short the panel rests somewhere between stops while
//! `current_stop` still names the last committed stop. The next drag anchors
//! at the live origin and treats the stop nearest to it as its base for
//! direction, gating, and dimming. `current_stop` itself is left alone until
//! the following settle completes.
//!
//! The dim of such a drag starts from the alpha the settle left behind and
//! moves linearly toward the next stop's alpha as the panel travels toward
//! that stop's rest origin, so grabbing the sheet never makes the backdrop
//! jump.
//!
//! # Coordinates
//!
//! Offsets are measured in the host's coordinate space. Stop geometry is
//! local to the container, so the container top is added/subtracted at the
//! boundary; with a container at y = 0 the two coincide.

use std::time::Duration;

use dragsheet_core::animation::SpringTiming;
use dragsheet_core::geometry::Rect;
use dragsheet_core::gesture::{GesturePhase, GestureSample};

use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use crate::settle::{SettleAnimator, SettleHandle, SheetVisual, SpringSettle};
use crate::stop::{DragDirection, Stop};
use crate::surface::{DimSurface, PanelSurface};

/// Spans shorter than this (in points) do not drive the dim.
const MIN_TRAVEL_SPAN: f64 = 1e-6;

/// Coarse controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetPhase {
    /// At rest (or stranded after an externally cancelled settle).
    #[default]
    Idle,
    /// A gesture is in progress.
    Dragging,
    /// A settle animation is in flight.
    Settling,
}

/// What a single sample did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedOutcome {
    /// Gestures are not enabled yet; nothing happened.
    Ignored,
    /// The panel followed the finger to `origin_y`.
    Moved { origin_y: f64 },
    /// The sample was rejected for movement; the panel stayed put.
    Gated,
    /// The gesture ended and the sheet is settling toward `target`.
    Released { target: Stop },
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    /// Panel origin the translation is applied to.
    anchor_y: f64,
    /// Stop the drag is measured from.
    base: Stop,
    /// Dim alpha at the anchor when the drag interrupted a settle.
    dim_seed: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveSettle {
    handle: SettleHandle,
    target: Stop,
}

/// The draggable sheet.
///
/// Generic over the host surfaces and the settle animator; the default
/// animator is the built-in [`SpringSettle`].
#[derive(Debug)]
pub struct SheetController<P, D, A = SpringSettle> {
    container: Rect,
    panel: P,
    dim: D,
    animator: A,
    timing: SpringTiming,

    current_stop: Stop,
    last_direction: Option<DragDirection>,
    drag: Option<DragState>,
    active: Option<ActiveSettle>,
    /// The panel is not at `current_stop`'s rest origin because a settle was
    /// cut short.
    interrupted: bool,
    gestures_enabled: bool,
}

impl<P, D> SheetController<P, D, SpringSettle>
where
    P: PanelSurface,
    D: DimSurface,
{
    /// Controller with the built-in spring animator and default timing.
    pub fn with_spring(container: Rect, panel: P, dim: D) -> Result<Self> {
        Self::new(container, panel, dim, SpringSettle::new())
    }
}

impl<P, D, A> SheetController<P, D, A>
where
    P: PanelSurface,
    D: DimSurface,
    A: SettleAnimator,
{
    /// Create a controller resting at [`Stop::Collapsed`].
    ///
    /// Fails if `container` is empty or not finite; hosts should treat that
    /// as a startup fault.
    pub fn new(container: Rect, panel: P, dim: D, animator: A) -> Result<Self> {
        if !container.is_finite() || container.is_empty() {
            return Err(SheetError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }
        Ok(Self {
            container,
            panel,
            dim,
            animator,
            timing: SpringTiming::default(),
            current_stop: Stop::Collapsed,
            last_direction: None,
            drag: None,
            active: None,
            interrupted: false,
            gestures_enabled: false,
        })
    }

    /// Create a controller using the timing from `config`.
    pub fn from_config(
        container: Rect,
        panel: P,
        dim: D,
        animator: A,
        config: &SheetConfig,
    ) -> Result<Self> {
        let timing = config.clone().validated()?.to_spring_timing();
        Ok(Self::new(container, panel, dim, animator)?.with_timing(timing))
    }

    /// Replace the settle timing (builder pattern).
    #[must_use]
    pub fn with_timing(mut self, timing: SpringTiming) -> Self {
        self.timing = timing;
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn container(&self) -> Rect {
        self.container
    }

    /// The last stop a settle committed.
    #[inline]
    #[must_use]
    pub fn current_stop(&self) -> Stop {
        self.current_stop
    }

    /// Direction of the most recent sample; `None` before the first gesture.
    #[inline]
    #[must_use]
    pub fn last_direction(&self) -> Option<DragDirection> {
        self.last_direction
    }

    /// Stop the in-flight settle is heading to.
    #[must_use]
    pub fn settle_target(&self) -> Option<Stop> {
        self.active.map(|a| a.target)
    }

    #[must_use]
    pub fn phase(&self) -> SheetPhase {
        if self.drag.is_some() {
            SheetPhase::Dragging
        } else if self.active.is_some() {
            SheetPhase::Settling
        } else {
            SheetPhase::Idle
        }
    }

    /// Whether samples are being processed.
    #[inline]
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.gestures_enabled
    }

    #[must_use]
    pub fn timing(&self) -> &SpringTiming {
        &self.timing
    }

    #[must_use]
    pub fn panel(&self) -> &P {
        &self.panel
    }

    #[must_use]
    pub fn dim(&self) -> &D {
        &self.dim
    }

    #[must_use]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Frame of the panel when resting at `stop`.
    #[must_use]
    pub fn rest_frame(&self, stop: Stop) -> Rect {
        self.container.with_y(self.rest_origin(stop))
    }

    // -----------------------------------------------------------------------
    // Presentation lifecycle
    // -----------------------------------------------------------------------

    /// Insert the dim backdrop, fully transparent, and place the panel at
    /// its rest frame.
    pub fn presentation_will_begin(&mut self) {
        self.dim.insert_below_panel();
        self.dim.set_frame(self.container);
        self.dim.set_alpha(0.0);
        self.panel.set_frame(self.rest_frame(self.current_stop));
        tracing::debug!(stop = ?self.current_stop, "sheet.presentation.begin");
    }

    /// Enable gesture handling once the presentation transition completed.
    pub fn presentation_did_end(&mut self, completed: bool) {
        self.gestures_enabled = completed;
        tracing::debug!(completed, "sheet.presentation.end");
    }

    /// Re-apply the rest frame on host layout. Skipped while the panel is
    /// away from its rest origin (dragging, settling, or interrupted).
    pub fn layout(&mut self) {
        if self.phase() == SheetPhase::Idle && !self.interrupted {
            self.panel.set_frame(self.rest_frame(self.current_stop));
        }
    }

    // -----------------------------------------------------------------------
    // Gesture input
    // -----------------------------------------------------------------------

    /// Process one pan sample.
    pub fn feed(&mut self, sample: &GestureSample) -> FeedOutcome {
        if !self.gestures_enabled {
            tracing::debug!(phase = ?sample.phase, "sheet.sample.ignored");
            return FeedOutcome::Ignored;
        }

        let drag = match self.drag {
            Some(drag) => drag,
            None => self.begin_drag(),
        };

        let translation = if sample.translation.y.is_finite() {
            sample.translation.y
        } else {
            0.0
        };
        let offset = drag.anchor_y + translation;
        let direction = DragDirection::between(drag.anchor_y, offset);
        self.last_direction = Some(direction);

        match sample.phase {
            GesturePhase::Began | GesturePhase::Changed => self.track(drag, offset, direction),
            GesturePhase::Ended | GesturePhase::Cancelled => self.release(offset, direction),
        }
    }

    fn begin_drag(&mut self) -> DragState {
        if let Some(active) = self.active.take() {
            if let Some(visual) = self.animator.stop(active.handle) {
                self.apply_visual(visual);
            }
            self.interrupted = true;
            tracing::debug!(
                to = ?active.target,
                origin_y = self.panel.origin_y(),
                "sheet.settle.cancelled"
            );
        }

        let drag = if self.interrupted {
            let anchor_y = self.panel.origin_y();
            DragState {
                anchor_y,
                base: Stop::nearest(self.to_local(anchor_y), self.container.height),
                dim_seed: Some(self.dim.alpha()).filter(|a| a.is_finite()),
            }
        } else {
            DragState {
                anchor_y: self.rest_origin(self.current_stop),
                base: self.current_stop,
                dim_seed: None,
            }
        };
        self.drag = Some(drag);
        tracing::debug!(
            stop = ?self.current_stop,
            base = ?drag.base,
            anchor_y = drag.anchor_y,
            "sheet.drag.begin"
        );
        drag
    }

    fn track(&mut self, drag: DragState, offset: f64, direction: DragDirection) -> FeedOutcome {
        let local = self.to_local(offset);
        let beyond_open = direction == DragDirection::Up && drag.base == Stop::Open;
        if local <= 0.0 || beyond_open {
            tracing::trace!(offset, direction = ?direction, "sheet.drag.gated");
            return FeedOutcome::Gated;
        }

        let origin_y = offset.min(self.container.bottom());
        self.panel.set_origin_y(origin_y);

        let next = drag.base.next(direction);
        if drag.base == Stop::Open || next == Stop::Open {
            if let Some(alpha) = self.drag_dim(drag, next, direction, local) {
                self.dim.set_alpha(alpha);
            }
        }

        FeedOutcome::Moved { origin_y }
    }

    /// Dim alpha for a panel at container-local `local` during `drag`.
    fn drag_dim(&self, drag: DragState, next: Stop, direction: DragDirection, local: f64) -> Option<f64> {
        let h = self.container.height;

        if let Some(seed) = drag.dim_seed {
            let anchor = self.to_local(drag.anchor_y);
            let reach = next.origin_y(h) - anchor;
            let t = if reach.abs() > MIN_TRAVEL_SPAN {
                ((local - anchor) / reach).clamp(0.0, 1.0)
            } else {
                1.0
            };
            return Some(seed + (next.dim_alpha() - seed) * t);
        }

        let span = match direction {
            DragDirection::Up => drag.base.origin_y(h),
            DragDirection::Down => next.origin_y(h) - drag.base.origin_y(h),
        };
        (span.abs() > MIN_TRAVEL_SPAN).then(|| {
            let progress = ((span - local) / span).clamp(0.0, 1.0);
            progress * Stop::Open.dim_alpha()
        })
    }

    fn release(&mut self, offset: f64, direction: DragDirection) -> FeedOutcome {
        self.drag = None;
        let target = Stop::release_target(direction, self.to_local(offset), self.container.height);
        tracing::debug!(
            stop = ?self.current_stop,
            to = ?target,
            offset,
            direction = ?direction,
            "sheet.release"
        );
        self.start_settle(target);
        FeedOutcome::Released { target }
    }

    // -----------------------------------------------------------------------
    // Settle
    // -----------------------------------------------------------------------

    fn start_settle(&mut self, target: Stop) {
        let from = SheetVisual::new(self.panel.origin_y(), self.dim.alpha());
        let to = self.rest_visual(target);
        let handle = self.animator.start(from, to, &self.timing);
        self.active = Some(ActiveSettle { handle, target });
    }

    /// Advance the settle animation by one frame.
    ///
    /// Writes the animated values to the surfaces and returns the committed
    /// stop when the settle completes.
    pub fn tick(&mut self, dt: Duration) -> Option<Stop> {
        let active = self.active?;
        let frame = self.animator.advance(dt)?;
        if frame.handle != active.handle {
            return None;
        }
        self.apply_visual(frame.visual);
        if frame.finished {
            self.commit(active);
            return Some(active.target);
        }
        None
    }

    /// Completion report from an animator that finishes asynchronously.
    ///
    /// `completed == false` is a cancellation: nothing is committed and the
    /// panel stays where the animator left it. Reports for any handle other
    /// than the in-flight one are ignored.
    pub fn settle_finished(&mut self, handle: SettleHandle, completed: bool) -> Option<Stop> {
        let Some(active) = self.active.filter(|a| a.handle == handle) else {
            tracing::debug!(handle = handle.raw(), "sheet.settle.stale");
            return None;
        };

        if completed {
            self.apply_visual(self.rest_visual(active.target));
            self.commit(active);
            Some(active.target)
        } else {
            self.active = None;
            self.interrupted = true;
            tracing::debug!(to = ?active.target, "sheet.settle.cancelled");
            None
        }
    }

    fn commit(&mut self, active: ActiveSettle) {
        self.active = None;
        self.interrupted = false;
        let previous = self.current_stop;
        self.current_stop = active.target;
        tracing::debug!(from = ?previous, stop = ?active.target, "sheet.settle.commit");
    }

    // -----------------------------------------------------------------------
    // Geometry helpers
    // -----------------------------------------------------------------------

    fn rest_origin(&self, stop: Stop) -> f64 {
        self.container.top() + stop.origin_y(self.container.height)
    }

    fn rest_visual(&self, stop: Stop) -> SheetVisual {
        SheetVisual::new(self.rest_origin(stop), stop.dim_alpha())
    }

    fn to_local(&self, y: f64) -> f64 {
        y - self.container.top()
    }

    fn apply_visual(&mut self, visual: SheetVisual) {
        self.panel.set_origin_y(visual.origin_y);
        self.dim.set_alpha(visual.dim_alpha);
    }
}
