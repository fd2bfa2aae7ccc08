#![forbid(unsafe_code)]

//! Stop model: the three resting positions of the sheet.
//!
//! Every geometric and visual parameter of a stop is derived from the
//! variant, so a [`Stop`] is a plain `Copy` value with no identity.
//!
//! | Stop      | height | up boundary | down boundary | dim alpha |
//! |-----------|--------|-------------|---------------|-----------|
//! | Collapsed | 0.20   | 0.00        | 0.00          | 0.00      |
//! | Half      | 0.48   | 0.27        | 0.35          | 0.00      |
//! | Open      | 1.00   | 0.65        | 0.80          | 0.45      |
//!
//! # Invariants
//!
//! 1. Stops are totally ordered: `Collapsed < Half < Open`.
//! 2. `origin_y` is non-increasing in the stop order for any non-negative
//!    container height.
//! 3. [`Stop::next`] moves at most one step and clamps at both ends.
//! 4. For every stop, `up_boundary <= down_boundary`: releasing while
//!    dragging down needs more travel to stay high than releasing while
//!    dragging up needs to get there.

/// Instantaneous drag direction. Screen coordinates grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragDirection {
    Up,
    Down,
}

impl DragDirection {
    /// Direction of travel from `anchor` to `offset`. No movement counts as `Up`.
    #[inline]
    #[must_use]
    pub fn between(anchor: f64, offset: f64) -> Self {
        if offset > anchor { Self::Down } else { Self::Up }
    }
}

/// A resting position of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stop {
    #[default]
    Collapsed,
    Half,
    Open,
}

impl Stop {
    /// All stops, lowest first.
    pub const ALL: [Stop; 3] = [Stop::Collapsed, Stop::Half, Stop::Open];

    /// Fraction of the container height the panel covers at rest.
    #[inline]
    #[must_use]
    pub const fn height_multiplier(self) -> f64 {
        match self {
            Self::Collapsed => 0.2,
            Self::Half => 0.48,
            Self::Open => 1.0,
        }
    }

    /// Release threshold (fraction of container height, measured from the
    /// bottom) used when the last drag direction was up.
    #[inline]
    #[must_use]
    pub const fn up_boundary(self) -> f64 {
        match self {
            Self::Collapsed => 0.0,
            Self::Half => 0.27,
            Self::Open => 0.65,
        }
    }

    /// Release threshold used when the last drag direction was down.
    #[inline]
    #[must_use]
    pub const fn down_boundary(self) -> f64 {
        match self {
            Self::Collapsed => 0.0,
            Self::Half => 0.35,
            Self::Open => 0.8,
        }
    }

    /// Boundary for the given direction.
    #[inline]
    #[must_use]
    pub const fn boundary(self, direction: DragDirection) -> f64 {
        match direction {
            DragDirection::Up => self.up_boundary(),
            DragDirection::Down => self.down_boundary(),
        }
    }

    /// Background dim opacity when settled at this stop.
    #[inline]
    #[must_use]
    pub const fn dim_alpha(self) -> f64 {
        match self {
            Self::Collapsed | Self::Half => 0.0,
            Self::Open => 0.45,
        }
    }

    /// The stop one step in `direction`, clamped at the ends.
    #[must_use]
    pub const fn next(self, direction: DragDirection) -> Self {
        match (self, direction) {
            (Self::Collapsed, DragDirection::Up) => Self::Half,
            (Self::Collapsed, DragDirection::Down) => Self::Collapsed,
            (Self::Half, DragDirection::Up) => Self::Open,
            (Self::Half, DragDirection::Down) => Self::Collapsed,
            (Self::Open, DragDirection::Up) => Self::Open,
            (Self::Open, DragDirection::Down) => Self::Half,
        }
    }

    /// Top edge of the panel when resting at this stop.
    #[inline]
    #[must_use]
    pub fn origin_y(self, container_height: f64) -> f64 {
        container_height * (1.0 - self.height_multiplier())
    }

    /// Classify a release.
    ///
    /// `final_offset` is the panel top edge the drag would have produced
    /// (before gating), relative to the container top. The distance from the
    /// container bottom is compared against the Open, then Half boundary for
    /// `direction`; anything below both settles Collapsed.
    #[must_use]
    pub fn release_target(direction: DragDirection, final_offset: f64, container_height: f64) -> Self {
        let distance_from_bottom = container_height - final_offset;
        if distance_from_bottom > container_height * Self::Open.boundary(direction) {
            Self::Open
        } else if distance_from_bottom > container_height * Self::Half.boundary(direction) {
            Self::Half
        } else {
            Self::Collapsed
        }
    }

    /// The stop whose rest origin is closest to `origin_y`.
    ///
    /// Non-finite input yields `Collapsed`.
    #[must_use]
    pub fn nearest(origin_y: f64, container_height: f64) -> Self {
        if !origin_y.is_finite() {
            return Self::Collapsed;
        }
        let mut best = Self::Collapsed;
        let mut best_dist = f64::INFINITY;
        for stop in Self::ALL {
            let dist = (stop.origin_y(container_height) - origin_y).abs();
            if dist < best_dist {
                best = stop;
                best_dist = dist;
            }
        }
        best
    }
}
