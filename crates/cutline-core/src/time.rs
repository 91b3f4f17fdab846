//! Time representation and time/pixel geometry.
//!
//! Timeline positions are fractional seconds (`f64`). Frame rates stay
//! rational so 29.97-style rates round-trip through project files exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Convert a timeline time to a pixel offset at the given zoom.
#[inline]
pub fn time_to_pixels(time: f64, zoom: f64, base_pixels_per_second: f64) -> f64 {
    time * base_pixels_per_second * zoom
}

/// Convert a pixel offset back to timeline time.
///
/// Returns 0 when the scale is degenerate (zero zoom or zero base rate).
#[inline]
pub fn pixels_to_time(pixels: f64, zoom: f64, base_pixels_per_second: f64) -> f64 {
    let scale = base_pixels_per_second * zoom;
    if scale <= 0.0 {
        return 0.0;
    }
    pixels / scale
}

/// Format seconds as `HH:MM:SS:FF` at the given frame rate.
pub fn format_timecode(seconds: f64, rate: FrameRate) -> String {
    let seconds = seconds.max(0.0);
    let fps = rate.to_fps_f64().round().max(1.0) as u64;
    let total_frames = (seconds * rate.to_fps_f64()).floor() as u64;
    let frames = total_frames % fps;
    let total_secs = total_frames / fps;
    format!(
        "{:02}:{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60,
        frames
    )
}

/// Frame rate as a rational number (e.g., 30000/1001 for 29.97 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 30000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Convert to frames per second as f64.
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        self.numerator as f64 / self.denominator as f64
    }

    /// Duration of a single frame in seconds.
    #[inline]
    pub fn frame_duration(self) -> f64 {
        if self.numerator == 0 {
            return 0.0;
        }
        self.denominator as f64 / self.numerator as f64
    }

    /// Round a time to the nearest frame boundary.
    pub fn snap_to_frame(self, seconds: f64) -> f64 {
        let frame = self.frame_duration();
        if frame <= 0.0 {
            return seconds;
        }
        (seconds / frame).round() * frame
    }

    /// Value for the backend's `fps=` filter and `-framerate` flag.
    pub fn to_ffmpeg(self) -> String {
        if self.denominator == 1 {
            self.numerator.to_string()
        } else {
            format!("{}/{}", self.numerator, self.denominator)
        }
    }

    /// Common frame rates
    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}

/// A time range in seconds with inclusive start and exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start time (inclusive)
    pub start: f64,
    /// Duration of the range
    pub duration: f64,
}

impl TimeRange {
    /// Create a new time range from start and duration.
    #[inline]
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// Create a time range from start and end times.
    #[inline]
    pub fn from_start_end(start: f64, end: f64) -> Self {
        Self {
            start,
            duration: end - start,
        }
    }

    /// End time (exclusive).
    #[inline]
    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    /// Check if a time is within this range.
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time < self.end()
    }

    /// Check if two ranges overlap. Touching ranges do not overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end() && self.end() > other.start
    }

    /// Compute the intersection of two ranges, if any.
    pub fn intersection(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self::from_start_end(
            self.start.max(other.start),
            self.end().min(other.end()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_pixel_roundtrip() {
        let px = time_to_pixels(2.5, 2.0, 50.0);
        assert_eq!(px, 250.0);
        assert_eq!(pixels_to_time(px, 2.0, 50.0), 2.5);
    }

    #[test]
    fn test_pixels_to_time_zero_zoom() {
        assert_eq!(pixels_to_time(100.0, 0.0, 50.0), 0.0);
    }

    #[test]
    fn test_frame_rate_29_97() {
        let rate = FrameRate::FPS_29_97;
        assert!((rate.to_fps_f64() - 29.97).abs() < 0.001);
        assert_eq!(rate.to_ffmpeg(), "30000/1001");
        assert_eq!(FrameRate::FPS_25.to_ffmpeg(), "25");
    }

    #[test]
    fn test_snap_to_frame() {
        let rate = FrameRate::FPS_25;
        assert!((rate.snap_to_frame(1.03) - 1.04).abs() < 1e-9);
    }

    #[test]
    fn test_time_range_overlap() {
        let a = TimeRange::new(0.0, 10.0);
        let b = TimeRange::new(5.0, 10.0);
        assert!(a.overlaps(b));

        let intersection = a.intersection(b).unwrap();
        assert_eq!(intersection.start, 5.0);
        assert_eq!(intersection.duration, 5.0);

        let touching = TimeRange::new(10.0, 1.0);
        assert!(!a.overlaps(touching));
    }

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(3661.5, FrameRate::FPS_30), "01:01:01:15");
        assert_eq!(format_timecode(-3.0, FrameRate::FPS_30), "00:00:00:00");
    }
}
