//! Property-based invariant tests for stops and the sheet controller.
//!
//! 1. Release classification is monotone in how high the panel ends.
//! 2. Dragging down never picks a higher stop than dragging up from the same
//!    place.
//! 3. `Stop::next` moves at most one step.
//! 4. `current_stop` changes only when a settle commits.
//! 5. Once settled, panel and dim sit exactly at the committed stop's rest
//!    values.

use std::time::Duration;

use dragsheet::{DragDirection, MemoryDim, MemoryPanel, SheetController, Stop};
use dragsheet_core::geometry::Rect;
use dragsheet_core::gesture::{GesturePhase, GestureSample};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Sample(GesturePhase, f64),
    Tick(u64),
}

fn direction_strategy() -> impl Strategy<Value = DragDirection> {
    prop_oneof![Just(DragDirection::Up), Just(DragDirection::Down)]
}

fn phase_strategy() -> impl Strategy<Value = GesturePhase> {
    prop_oneof![
        1 => Just(GesturePhase::Began),
        4 => Just(GesturePhase::Changed),
        1 => Just(GesturePhase::Ended),
        1 => Just(GesturePhase::Cancelled),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (phase_strategy(), -1200.0f64..1200.0).prop_map(|(p, y)| Op::Sample(p, y)),
        2 => (1u64..120).prop_map(Op::Tick),
    ]
}

fn presented(height: f64) -> SheetController<MemoryPanel, MemoryDim> {
    let mut sheet = SheetController::with_spring(
        Rect::from_size(390.0, height),
        MemoryPanel::default(),
        MemoryDim::default(),
    )
    .expect("valid container");
    sheet.presentation_will_begin();
    sheet.presentation_did_end(true);
    sheet
}

proptest! {
    #[test]
    fn release_is_monotone_in_height(
        direction in direction_strategy(),
        height in 100.0f64..3000.0,
        a in -0.5f64..1.5,
        b in -0.5f64..1.5,
    ) {
        let (high, low) = if a <= b { (a, b) } else { (b, a) };
        let from_high = Stop::release_target(direction, high * height, height);
        let from_low = Stop::release_target(direction, low * height, height);
        prop_assert!(from_high >= from_low, "{from_high:?} < {from_low:?}");
    }

    #[test]
    fn dragging_down_is_never_more_generous(
        height in 100.0f64..3000.0,
        fraction in -0.5f64..1.5,
    ) {
        let offset = fraction * height;
        let up = Stop::release_target(DragDirection::Up, offset, height);
        let down = Stop::release_target(DragDirection::Down, offset, height);
        prop_assert!(down <= up);
    }

    #[test]
    fn next_moves_at_most_one_step(direction in direction_strategy(), idx in 0usize..3) {
        let stop = Stop::ALL[idx];
        let next = stop.next(direction);
        let step = (next as i32 - stop as i32).abs();
        prop_assert!(step <= 1);
        match direction {
            DragDirection::Up => {
                prop_assert!(next >= stop);
            }
            DragDirection::Down => {
                prop_assert!(next <= stop);
            }
        }
    }

    #[test]
    fn stop_commits_only_on_settle(
        height in 400.0f64..2000.0,
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let mut sheet = presented(height);
        for op in ops {
            let before = sheet.current_stop();
            match op {
                Op::Sample(phase, y) => {
                    sheet.feed(&GestureSample::vertical(phase, y));
                    prop_assert_eq!(sheet.current_stop(), before);
                }
                Op::Tick(ms) => match sheet.tick(Duration::from_millis(ms)) {
                    Some(stop) => {
                        prop_assert_eq!(sheet.current_stop(), stop);
                    }
                    None => {
                        prop_assert_eq!(sheet.current_stop(), before);
                    }
                },
            }
            let alpha = sheet.dim().alpha;
            prop_assert!((0.0..=1.0).contains(&alpha));
        }
    }

    #[test]
    fn settled_sheet_rests_at_stop(
        height in 400.0f64..2000.0,
        moves in prop::collection::vec(-1200.0f64..1200.0, 1..6),
        release in -1200.0f64..1200.0,
    ) {
        let mut sheet = presented(height);
        for y in &moves {
            sheet.feed(&GestureSample::vertical(GesturePhase::Changed, *y));
        }
        sheet.feed(&GestureSample::vertical(GesturePhase::Ended, release));

        let mut committed = None;
        for _ in 0..200 {
            committed = sheet.tick(Duration::from_millis(16));
            if committed.is_some() {
                break;
            }
        }
        let stop = committed.expect("settle completes");
        prop_assert_eq!(sheet.panel().frame, sheet.rest_frame(stop));
        prop_assert_eq!(sheet.dim().alpha, stop.dim_alpha());
    }
}
