//! Shared utilities for the animation scheduler.
//!
//! Helpers for clocks, frame timing, and easing curves.

pub mod clock;
pub mod easing;
pub mod frame_timing;
