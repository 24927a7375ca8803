//! Small shared utilities.

/// Smoothed frame-rate tracking.
pub mod frame_timing;
/// Canvas sizing for high-DPI displays.
pub mod viewport;
