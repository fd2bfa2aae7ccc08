//! Integration tests for the animation module.

use dragsheet_core::animation::*;
use std::time::Duration;

const MS_16: Duration = Duration::from_millis(16);

#[test]
fn timed_spring_settles_within_budget() {
    let timing = SpringTiming::default();
    let mut spring = Spring::from_timing(&timing);
    let mut elapsed = Duration::ZERO;
    while !spring.is_complete() && elapsed < Duration::from_secs(5) {
        spring.tick(MS_16);
        elapsed += MS_16;
    }
    assert!(spring.is_complete(), "spring never came to rest");
    assert!(
        elapsed < Duration::from_millis(1500),
        "settling took {elapsed:?}"
    );
}

#[test]
fn initial_velocity_produces_overshoot() {
    let mut spring = Spring::from_timing(&SpringTiming::default());
    let mut max_pos = 0.0_f64;
    for _ in 0..120 {
        spring.tick(MS_16);
        max_pos = max_pos.max(spring.progress());
    }
    assert!(max_pos > 1.0, "expected overshoot, max was {max_pos}");
}

#[test]
fn critically_damped_timing_without_velocity_does_not_overshoot() {
    let timing = SpringTiming {
        damping_ratio: 1.0,
        initial_velocity: 0.0,
        duration: Duration::from_millis(400),
    };
    let mut spring = Spring::from_timing(&timing);
    for _ in 0..120 {
        spring.tick(MS_16);
        assert!(
            spring.progress() < 1.01,
            "overshoot: {}",
            spring.progress()
        );
    }
}

#[test]
fn frame_rate_independence() {
    let timing = SpringTiming::default();
    let mut coarse = Spring::from_timing(&timing);
    let mut fine = Spring::from_timing(&timing);

    for _ in 0..30 {
        coarse.tick(Duration::from_millis(16));
    }
    for _ in 0..120 {
        fine.tick(Duration::from_millis(4));
    }
    assert!(
        (coarse.progress() - fine.progress()).abs() < 1e-6,
        "coarse {} vs fine {}",
        coarse.progress(),
        fine.progress()
    );
}
