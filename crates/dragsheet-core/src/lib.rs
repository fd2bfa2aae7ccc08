// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, spring animation, and pan gesture recognition.
//!
//! # Role in dragsheet
//! `dragsheet-core` holds the host-independent primitives the sheet
//! controller is built from. Nothing in here knows about stops, dimming, or
//! presentation lifecycles.
//!
//! # Primary responsibilities
//! - **Rect / Point**: floating-point container and panel geometry.
//! - **Spring**: damped harmonic oscillator driving settle animations.
//! - **PanRecognizer**: turns raw pointer events into vertical pan samples
//!   and fans them out to subscribers.
//!
//! # How it fits in the system
//! The `dragsheet` crate consumes [`gesture::GestureSample`] values and
//! drives [`animation::Spring`] through its settle animator. Hosts feed
//! pointer events into a [`gesture::PanRecognizer`] and forward frame ticks.

pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
