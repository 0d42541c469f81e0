//! Shared utilities.

/// Wall-clock frame timer driving the animation controller.
pub mod frame_timing;
