#![forbid(unsafe_code)]

//! A draggable bottom sheet with three stops.
//!
//! The sheet rests at [`Stop::Collapsed`], [`Stop::Half`], or [`Stop::Open`].
//! A vertical pan moves the panel live; on release the sheet springs to the
//! stop chosen by where and in which direction the finger let go. A dim
//! backdrop behind the panel tracks progress toward `Open`.
//!
//! # Pieces
//!
//! - [`SheetController`]: the drag / release / settle state machine.
//! - [`Stop`]: stop geometry and release classification.
//! - [`PanelSurface`] / [`DimSurface`]: what the controller writes to.
//! - [`SettleAnimator`] / [`SpringSettle`]: the settle animation primitive.
//! - [`SheetConfig`]: timing and gesture thresholds as data.
//! - [`attach`]: subscribe a controller to a
//!   [`PanRecognizer`](dragsheet_core::gesture::PanRecognizer).
//!
//! # Frame loop
//!
//! ```
//! use std::time::Duration;
//!
//! use dragsheet::{FeedOutcome, MemoryDim, MemoryPanel, SheetController, Stop};
//! use dragsheet_core::geometry::Rect;
//! use dragsheet_core::gesture::{GesturePhase, GestureSample};
//!
//! let mut sheet = SheetController::with_spring(
//!     Rect::from_size(400.0, 1000.0),
//!     MemoryPanel::default(),
//!     MemoryDim::default(),
//! )?;
//! sheet.presentation_will_begin();
//! sheet.presentation_did_end(true);
//!
//! sheet.feed(&GestureSample::vertical(GesturePhase::Began, -600.0));
//! let released = sheet.feed(&GestureSample::vertical(GesturePhase::Ended, -600.0));
//! assert_eq!(released, FeedOutcome::Released { target: Stop::Open });
//!
//! while sheet.tick(Duration::from_millis(16)).is_none() {}
//! assert_eq!(sheet.current_stop(), Stop::Open);
//! # Ok::<(), dragsheet::SheetError>(())
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod presentation;
pub mod settle;
pub mod stop;
pub mod surface;

pub use config::{GesturePolicy, SheetConfig, SpringPolicy};
pub use controller::{FeedOutcome, SheetController, SheetPhase};
pub use error::{ConfigError, Result, SheetError};
pub use presentation::attach;
pub use settle::{SettleAnimator, SettleFrame, SettleHandle, SheetVisual, SpringSettle};
pub use stop::{DragDirection, Stop};
pub use surface::{DimSurface, MemoryDim, MemoryPanel, PanelSurface};

pub use dragsheet_core;
