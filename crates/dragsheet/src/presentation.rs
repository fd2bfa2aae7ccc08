#![forbid(unsafe_code)]

//! Wiring a [`PanRecognizer`] to a shared [`SheetController`].
//!
//! Hosts that own the controller behind `Rc<RefCell<_>>` (the usual shape for
//! single-threaded UI loops) subscribe it once after presentation:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use dragsheet::{attach, MemoryDim, MemoryPanel, SheetController};
//! use dragsheet_core::geometry::{Point, Rect};
//! use dragsheet_core::gesture::{PanRecognizer, PointerEvent};
//!
//! let sheet = SheetController::with_spring(
//!     Rect::from_size(390.0, 844.0),
//!     MemoryPanel::default(),
//!     MemoryDim::default(),
//! )?;
//! let sheet = Rc::new(RefCell::new(sheet));
//! sheet.borrow_mut().presentation_will_begin();
//! sheet.borrow_mut().presentation_did_end(true);
//!
//! let mut pan = PanRecognizer::default();
//! attach(&sheet, &mut pan);
//! pan.process(&PointerEvent::Down(Point::new(100.0, 700.0)));
//! pan.process(&PointerEvent::Move(Point::new(100.0, 600.0)));
//! assert!(sheet.borrow().panel().frame.y < 675.2);
//! # Ok::<(), dragsheet::SheetError>(())
//! ```
//!
//! # Failure Modes
//!
//! - The subscription holds only a weak reference; once the controller is
//!   dropped, samples are discarded.
//! - Feeding from inside a controller borrow (re-entrancy) would panic in
//!   `RefCell`; the subscription skips the sample instead.

use std::cell::RefCell;
use std::rc::Rc;

use dragsheet_core::gesture::{PanRecognizer, SubscriptionId};

use crate::controller::SheetController;
use crate::settle::SettleAnimator;
use crate::surface::{DimSurface, PanelSurface};

/// Route every sample from `recognizer` into `sheet`.
pub fn attach<P, D, A>(
    sheet: &Rc<RefCell<SheetController<P, D, A>>>,
    recognizer: &mut PanRecognizer,
) -> SubscriptionId
where
    P: PanelSurface + 'static,
    D: DimSurface + 'static,
    A: SettleAnimator + 'static,
{
    let weak = Rc::downgrade(sheet);
    recognizer.subscribe(move |sample| {
        let Some(sheet) = weak.upgrade() else {
            return;
        };
        match sheet.try_borrow_mut() {
            Ok(mut sheet) => {
                sheet.feed(sample);
            }
            Err(_) => tracing::warn!(phase = ?sample.phase, "sheet.sample.reentrant"),
        }
    })
}
