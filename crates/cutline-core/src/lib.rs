//! Cutline Core - Foundation types for the timeline compiler
//!
//! This crate provides the fundamental types used throughout Cutline:
//! - Time representation (seconds, FrameRate, TimeRange)
//! - Time/pixel geometry for the editing surface
//! - Easing curves for overlay animation
//! - A typed filter-expression builder with central escaping

pub mod easing;
pub mod error;
pub mod filter;
pub mod time;

pub use easing::Easing;
pub use error::{CutlineError, Result};
pub use filter::{escape_filter_value, fmt_num, Filter, FilterChain, FilterGraph, GraphNode};
pub use time::{format_timecode, pixels_to_time, time_to_pixels, FrameRate, TimeRange};

/// Numeric contracts shared by every engine.
pub mod limits {
    /// Maximum clip/track volume (2.0 = +6 dB).
    pub const MAX_VOLUME: f64 = 2.0;

    /// Pan extremes (-1.0 full left, 1.0 full right).
    pub const MIN_PAN: f64 = -1.0;
    pub const MAX_PAN: f64 = 1.0;

    /// Overlay positions are percentages of the canvas.
    pub const MAX_PERCENT: f64 = 100.0;

    /// Shortest clip the editing surface can produce (seconds).
    pub const MIN_CLIP_DURATION: f64 = 0.1;
}
