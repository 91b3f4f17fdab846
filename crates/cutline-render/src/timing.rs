//! Project time to rendered-output time.
//!
//! Gaps on the picture track render as black, so gaps alone keep both
//! clocks equal. Each crossfade overlaps two segments by its duration and
//! pulls everything after it earlier.

/// Piecewise-linear map from timeline seconds to output seconds, one
/// anchor per picture segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTimeline {
    /// `(timeline_start, output_start)`, ascending by timeline start.
    anchors: Vec<(f64, f64)>,
}

impl OutputTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next segment. Segments must arrive in timeline order.
    pub fn push(&mut self, timeline_start: f64, output_start: f64) {
        self.anchors.push((timeline_start, output_start));
    }

    /// Output time of a timeline instant. Times before the first segment
    /// are returned unchanged.
    pub fn map(&self, time: f64) -> f64 {
        let after = self.anchors.partition_point(|&(start, _)| start <= time);
        match after.checked_sub(1) {
            Some(i) => {
                let (start, output) = self.anchors[i];
                output + (time - start)
            }
            None => time,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.anchors.iter().all(|&(start, output)| start == output)
    }
}
