#![forbid(unsafe_code)]

//! Host surfaces the controller writes to.
//!
//! The controller never owns a view hierarchy. It moves a panel and fades a
//! dim backdrop through these two traits, so any toolkit (or a plain struct
//! read by a renderer) can host the sheet.

use dragsheet_core::geometry::Rect;

/// The draggable panel.
pub trait PanelSurface {
    /// Current top edge, in container coordinates.
    fn origin_y(&self) -> f64;

    /// Move the top edge, keeping the size.
    fn set_origin_y(&mut self, y: f64);

    /// Replace the whole frame.
    fn set_frame(&mut self, frame: Rect);
}

/// The translucent backdrop behind the panel.
pub trait DimSurface {
    /// Current opacity in [0.0, 1.0].
    fn alpha(&self) -> f64;

    fn set_alpha(&mut self, alpha: f64);

    fn set_frame(&mut self, frame: Rect);

    /// Place the backdrop in the surface stack directly below the panel.
    fn insert_below_panel(&mut self);
}

impl<T: PanelSurface + ?Sized> PanelSurface for &mut T {
    fn origin_y(&self) -> f64 {
        (**self).origin_y()
    }

    fn set_origin_y(&mut self, y: f64) {
        (**self).set_origin_y(y);
    }

    fn set_frame(&mut self, frame: Rect) {
        (**self).set_frame(frame);
    }
}

impl<T: DimSurface + ?Sized> DimSurface for &mut T {
    fn alpha(&self) -> f64 {
        (**self).alpha()
    }

    fn set_alpha(&mut self, alpha: f64) {
        (**self).set_alpha(alpha);
    }

    fn set_frame(&mut self, frame: Rect) {
        (**self).set_frame(frame);
    }

    fn insert_below_panel(&mut self) {
        (**self).insert_below_panel();
    }
}

// ---------------------------------------------------------------------------
// In-memory surfaces
// ---------------------------------------------------------------------------

/// Headless panel: just a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemoryPanel {
    pub frame: Rect,
}

impl MemoryPanel {
    #[must_use]
    pub fn new(frame: Rect) -> Self {
        Self { frame }
    }
}

impl PanelSurface for MemoryPanel {
    fn origin_y(&self) -> f64 {
        self.frame.y
    }

    fn set_origin_y(&mut self, y: f64) {
        self.frame.y = y;
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}

/// Headless dim backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemoryDim {
    pub frame: Rect,
    pub alpha: f64,
    /// Set once the backdrop has been placed below the panel.
    pub inserted: bool,
}

impl DimSurface for MemoryDim {
    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn insert_below_panel(&mut self) {
        self.inserted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_panel_moves_origin_only() {
        let mut panel = MemoryPanel::new(Rect::from_size(390.0, 844.0));
        panel.set_origin_y(120.0);
        assert_eq!(panel.origin_y(), 120.0);
        assert_eq!(panel.frame.width, 390.0);
        assert_eq!(panel.frame.height, 844.0);
    }

    #[test]
    fn memory_dim_clamps_alpha() {
        let mut dim = MemoryDim::default();
        dim.set_alpha(1.7);
        assert_eq!(dim.alpha(), 1.0);
        dim.set_alpha(-0.2);
        assert_eq!(dim.alpha(), 0.0);
    }

    #[test]
    fn mutable_reference_forwards() {
        fn show<D: DimSurface>(mut dim: D) {
            dim.insert_below_panel();
            dim.set_alpha(0.3);
        }

        let mut dim = MemoryDim::default();
        show(&mut dim);
        assert!(dim.inserted);
        assert_eq!(dim.alpha, 0.3);
    }
}
