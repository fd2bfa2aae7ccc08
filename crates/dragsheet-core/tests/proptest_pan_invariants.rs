//! Property-based invariant tests for the pan recognizer.
//!
//! 1. Every emitted pan is well-formed: Began, Changed*, then Ended/Cancelled.
//! 2. Translation equals pointer position minus press position.
//! 3. No sample is ever emitted while idle after a terminal phase.

use dragsheet_core::geometry::Point;
use dragsheet_core::gesture::{GesturePhase, PanRecognizer, PointerEvent};
use proptest::prelude::*;

fn pointer_strategy() -> impl Strategy<Value = PointerEvent> {
    prop_oneof![
        1 => (-50.0f64..50.0, 0.0f64..1000.0)
            .prop_map(|(x, y)| PointerEvent::Down(Point::new(x, y))),
        4 => (-50.0f64..50.0, -200.0f64..1200.0)
            .prop_map(|(x, y)| PointerEvent::Move(Point::new(x, y))),
        1 => (-50.0f64..50.0, 0.0f64..1000.0)
            .prop_map(|(x, y)| PointerEvent::Up(Point::new(x, y))),
        1 => Just(PointerEvent::Cancel),
    ]
}

proptest! {
    #[test]
    fn pans_are_well_formed(events in prop::collection::vec(pointer_strategy(), 0..64)) {
        let mut pr = PanRecognizer::default();
        let mut in_pan = false;
        for event in &events {
            // A fresh press abandons any pan that was in flight.
            if matches!(event, PointerEvent::Down(_)) {
                in_pan = false;
            }
            if let Some(sample) = pr.process(event) {
                match sample.phase {
                    GesturePhase::Began => {
                        prop_assert!(!in_pan, "Began while already panning");
                        in_pan = true;
                    }
                    GesturePhase::Changed => {
                        prop_assert!(in_pan, "Changed outside a pan");
                    }
                    GesturePhase::Ended | GesturePhase::Cancelled => {
                        prop_assert!(in_pan, "terminal phase outside a pan");
                        in_pan = false;
                    }
                }
            }
            prop_assert_eq!(pr.is_panning(), in_pan);
        }
    }

    #[test]
    fn translation_tracks_press_origin(
        start_y in 0.0f64..1000.0,
        moves in prop::collection::vec(-400.0f64..400.0, 1..16),
    ) {
        let mut pr = PanRecognizer::default();
        pr.process(&PointerEvent::Down(Point::new(0.0, start_y)));
        for dy in moves {
            let pos = Point::new(0.0, start_y + dy);
            if let Some(sample) = pr.process(&PointerEvent::Move(pos)) {
                prop_assert!((sample.translation.y - dy).abs() < 1e-9);
                prop_assert_eq!(sample.translation.x, 0.0);
            }
        }
    }
}
