//! Peak data for drawing audio waveforms on the timeline.
//!
//! Derived from decoded samples and cached alongside the media; never a
//! source of truth.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveformData {
    /// Absolute peak per bucket, 0.0 to 1.0, all channels folded together.
    pub peaks: Vec<f32>,
    /// Source sample rate.
    pub sample_rate: u32,
    /// Seconds of audio covered.
    pub duration: f64,
    pub channels: u16,
}

impl WaveformData {
    /// Compute peaks from interleaved samples.
    ///
    /// `peaks_per_second` sets the bucket width; each bucket keeps the
    /// largest absolute amplitude of any channel inside it.
    pub fn compute(samples: &[f32], channels: u16, sample_rate: u32, peaks_per_second: u32) -> Self {
        let channels = channels.max(1);
        let frames = samples.len() / channels as usize;
        let duration = if sample_rate == 0 {
            0.0
        } else {
            frames as f64 / sample_rate as f64
        };

        if frames == 0 || sample_rate == 0 || peaks_per_second == 0 {
            return Self {
                peaks: Vec::new(),
                sample_rate,
                duration,
                channels,
            };
        }

        let frames_per_peak = (sample_rate / peaks_per_second).max(1) as usize;
        let chunk = frames_per_peak * channels as usize;
        let peaks = samples
            .chunks(chunk)
            .map(|c| c.iter().fold(0.0f32, |peak, s| peak.max(s.abs())).min(1.0))
            .collect();

        Self {
            peaks,
            sample_rate,
            duration,
            channels,
        }
    }

    /// Peak at `time` seconds, or 0 outside the data.
    pub fn peak_at(&self, time: f64) -> f32 {
        if self.peaks.is_empty() || self.duration <= 0.0 || time < 0.0 || time >= self.duration {
            return 0.0;
        }
        let index = (time / self.duration * self.peaks.len() as f64) as usize;
        self.peaks.get(index).copied().unwrap_or(0.0)
    }

    /// Reduce to at most `buckets` peaks (for zoomed-out display), keeping
    /// the maximum of each merged range.
    pub fn downsample(&self, buckets: usize) -> Vec<f32> {
        if buckets == 0 {
            return Vec::new();
        }
        if self.peaks.len() <= buckets {
            return self.peaks.clone();
        }
        let len = self.peaks.len();
        (0..buckets)
            .map(|i| {
                let start = i * len / buckets;
                let end = ((i + 1) * len / buckets).max(start + 1);
                self.peaks[start..end].iter().fold(0.0f32, |a, &b| a.max(b))
            })
            .collect()
    }
}
