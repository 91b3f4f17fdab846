//! Export presets and backend argument construction.
//!
//! The render itself runs in an external process; this module only turns a
//! [`RenderPlan`] plus an [`ExportFormat`] into its command line.

use cutline_core::{fmt_num, CutlineError, FrameRate, Result, TimeRange};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::plan::RenderPlan;

// ── Format presets ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCodec {
    H264,
    H265,
    ProRes422,
    Vp9,
}

impl VideoCodec {
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Self::H264 => "libx264",
            Self::H265 => "libx265",
            Self::ProRes422 => "prores_ks",
            Self::Vp9 => "libvpx-vp9",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::H264 | Self::H265 => "mp4",
            Self::ProRes422 => "mov",
            Self::Vp9 => "webm",
        }
    }

    fn pixel_format(self) -> &'static str {
        match self {
            Self::ProRes422 => "yuv422p10le",
            _ => "yuv420p",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCodec {
    Aac,
    Pcm,
    Opus,
}

impl AudioCodec {
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Self::Aac => "aac",
            Self::Pcm => "pcm_s16le",
            Self::Opus => "libopus",
        }
    }

    fn is_lossless(self) -> bool {
        matches!(self, Self::Pcm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityPreset {
    Draft,
    Normal,
    High,
}

impl QualityPreset {
    /// x264/x265 speed preset.
    fn encoder_preset(self) -> &'static str {
        match self {
            Self::Draft => "veryfast",
            Self::Normal => "medium",
            Self::High => "slow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFormat {
    pub video_codec: VideoCodec,
    pub audio_codec: AudioCodec,
    pub width: u32,
    pub height: u32,
    pub frame_rate: FrameRate,
    pub quality: QualityPreset,
    /// Constant rate factor (lower is better).
    pub crf: Option<u32>,
    /// Video bitrate in kbps; overrides CRF when set.
    pub video_bitrate: Option<u32>,
    /// Audio bitrate in kbps.
    pub audio_bitrate: u32,
    pub audio_sample_rate: u32,
}

impl ExportFormat {
    pub fn h264_hd() -> Self {
        Self {
            video_codec: VideoCodec::H264,
            audio_codec: AudioCodec::Aac,
            width: 1920,
            height: 1080,
            frame_rate: FrameRate::FPS_30,
            quality: QualityPreset::Normal,
            crf: Some(18),
            video_bitrate: None,
            audio_bitrate: 192,
            audio_sample_rate: 48_000,
        }
    }

    pub fn h265_4k() -> Self {
        Self {
            video_codec: VideoCodec::H265,
            audio_codec: AudioCodec::Aac,
            width: 3840,
            height: 2160,
            frame_rate: FrameRate::FPS_30,
            quality: QualityPreset::High,
            crf: Some(20),
            video_bitrate: None,
            audio_bitrate: 256,
            audio_sample_rate: 48_000,
        }
    }

    /// ProRes 422 for mastering.
    pub fn prores_422() -> Self {
        Self {
            video_codec: VideoCodec::ProRes422,
            audio_codec: AudioCodec::Pcm,
            width: 1920,
            height: 1080,
            frame_rate: FrameRate::FPS_30,
            quality: QualityPreset::High,
            crf: None,
            video_bitrate: None,
            audio_bitrate: 1536,
            audio_sample_rate: 48_000,
        }
    }

    pub fn vp9_web() -> Self {
        Self {
            video_codec: VideoCodec::Vp9,
            audio_codec: AudioCodec::Opus,
            width: 1920,
            height: 1080,
            frame_rate: FrameRate::FPS_30,
            quality: QualityPreset::Normal,
            crf: Some(30),
            video_bitrate: None,
            audio_bitrate: 128,
            audio_sample_rate: 48_000,
        }
    }

    /// Look up a preset by its name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "h264_hd" => Some(Self::h264_hd()),
            "h265_4k" => Some(Self::h265_4k()),
            "prores_422" => Some(Self::prores_422()),
            "vp9_web" => Some(Self::vp9_web()),
            _ => None,
        }
    }

    pub const PRESET_NAMES: [&'static str; 4] = ["h264_hd", "h265_4k", "prores_422", "vp9_web"];
}

// ── Export job ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub output_path: PathBuf,
    pub format: ExportFormat,
    /// Part of the plan to export; `None` exports everything.
    pub range: Option<TimeRange>,
}

impl ExportJob {
    pub fn new(output_path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            output_path: output_path.into(),
            format,
            range: None,
        }
    }

    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Frames the renderer will emit, for mapping frame counters to
    /// project progress.
    pub fn total_frames(&self, plan: &RenderPlan) -> u64 {
        let duration = self
            .range
            .map_or(plan.duration, |r| r.duration.min(plan.duration - r.start).max(0.0));
        (duration * self.format.frame_rate.to_fps_f64()).round() as u64
    }

    /// Full argument list for the backend.
    ///
    /// `resolve_input` maps a clip's media id to a file; an unresolved id
    /// is an error.
    pub fn ffmpeg_args<F>(&self, plan: &RenderPlan, resolve_input: F) -> Result<Vec<String>>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let mut args: Vec<String> = vec!["-y".into()];

        for input in &plan.inputs {
            let path = resolve_input(&input.media_id).ok_or_else(|| {
                CutlineError::NotFound(format!("media '{}' has no source file", input.media_id))
            })?;
            args.push("-i".into());
            args.push(path_arg(&path));
        }

        args.push("-filter_complex".into());
        args.push(plan.filter_complex());
        args.push("-map".into());
        args.push(format!("[{}]", plan.video_output));
        if let Some(audio) = &plan.audio_output {
            args.push("-map".into());
            args.push(format!("[{audio}]"));
        }

        if let Some(range) = self.range {
            args.extend(["-ss".into(), fmt_num(range.start), "-t".into(), fmt_num(range.duration)]);
        }

        let format = &self.format;
        if (format.width, format.height) != (plan.settings.width, plan.settings.height) {
            args.extend(["-s".into(), format!("{}x{}", format.width, format.height)]);
        }
        args.extend(["-r".into(), format.frame_rate.to_ffmpeg()]);

        args.extend(["-c:v".into(), format.video_codec.ffmpeg_encoder().into()]);
        match format.video_codec {
            VideoCodec::H264 | VideoCodec::H265 => {
                args.extend(["-preset".into(), format.quality.encoder_preset().into()]);
            }
            VideoCodec::ProRes422 => args.extend(["-profile:v".into(), "2".into()]),
            VideoCodec::Vp9 => {}
        }
        if let Some(bitrate) = format.video_bitrate {
            args.extend(["-b:v".into(), format!("{bitrate}k")]);
        } else if let Some(crf) = format.crf {
            args.extend(["-crf".into(), crf.to_string()]);
            if format.video_codec == VideoCodec::Vp9 {
                // Constant-quality mode for VP9 needs a zero bitrate.
                args.extend(["-b:v".into(), "0".into()]);
            }
        }
        args.extend(["-pix_fmt".into(), format.video_codec.pixel_format().into()]);

        if plan.audio_output.is_some() {
            args.extend(["-c:a".into(), format.audio_codec.ffmpeg_encoder().into()]);
            if !format.audio_codec.is_lossless() {
                args.extend(["-b:a".into(), format!("{}k", format.audio_bitrate)]);
            }
            args.extend(["-ar".into(), format.audio_sample_rate.to_string()]);
        } else {
            args.push("-an".into());
        }

        args.push(path_arg(&self.output_path));
        Ok(args)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::compile_render_plan;
    use crate::project::Project;
    use cutline_timeline::{TimelineClip, TimelineTrack};

    fn plan(with_audio: bool) -> RenderPlan {
        let mut project = Project::new("Export");
        let mut video = TimelineTrack::new_video("V1");
        video.add_clip(TimelineClip::new(video.id, "a", 0.0, 10.0));
        project.add_track(video);
        if with_audio {
            let mut audio = TimelineTrack::new_audio("A1");
            audio.add_clip(TimelineClip::new(audio.id, "b", 0.0, 10.0));
            project.add_track(audio);
        }
        compile_render_plan(&project).unwrap()
    }

    fn resolve(media: &str) -> Option<PathBuf> {
        Some(PathBuf::from(format!("/media/{media}.mov")))
    }

    #[test]
    fn test_h264_preset() {
        let fmt = ExportFormat::h264_hd();
        assert_eq!(fmt.video_codec.ffmpeg_encoder(), "libx264");
        assert_eq!(fmt.video_codec.extension(), "mp4");
        assert_eq!(ExportFormat::preset("prores_422"), Some(ExportFormat::prores_422()));
        assert_eq!(ExportFormat::preset("gif"), None);
    }

    #[test]
    fn test_ffmpeg_args() {
        let plan = plan(true);
        let job = ExportJob::new("/tmp/out.mp4", ExportFormat::h264_hd());
        let args = job.ffmpeg_args(&plan, resolve).unwrap();

        assert_eq!(&args[..5], ["-y", "-i", "/media/a.mov", "-i", "/media/b.mov"]);
        let fc = args.iter().position(|a| a == "-filter_complex").unwrap();
        assert_eq!(args[fc + 1], plan.filter_complex());
        assert!(args.windows(2).any(|w| w == ["-map", "[vout]"]));
        assert!(args.windows(2).any(|w| w == ["-map", "[aout]"]));
        assert!(args.windows(2).any(|w| w == ["-crf", "18"]));
        assert!(args.windows(2).any(|w| w == ["-b:a", "192k"]));
        assert!(!args.contains(&"-s".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("/tmp/out.mp4"));
    }

    #[test]
    fn test_silent_plan_drops_audio() {
        let args = ExportJob::new("/tmp/out.mov", ExportFormat::prores_422())
            .ffmpeg_args(&plan(false), resolve)
            .unwrap();
        assert!(args.contains(&"-an".to_string()));
        assert!(args.windows(2).any(|w| w == ["-profile:v", "2"]));
        assert!(args.windows(2).any(|w| w == ["-pix_fmt", "yuv422p10le"]));
    }

    #[test]
    fn test_rescale_and_range() {
        let job = ExportJob::new("/tmp/out.mp4", ExportFormat::h265_4k())
            .with_range(TimeRange::new(2.0, 3.5));
        let plan = plan(false);
        let args = job.ffmpeg_args(&plan, resolve).unwrap();
        assert!(args.windows(2).any(|w| w == ["-s", "3840x2160"]));
        assert!(args.windows(4).any(|w| w == ["-ss", "2", "-t", "3.5"]));
        assert_eq!(job.total_frames(&plan), 105);
    }

    #[test]
    fn test_unresolved_media() {
        let job = ExportJob::new("/tmp/out.mp4", ExportFormat::vp9_web());
        assert!(matches!(
            job.ffmpeg_args(&plan(false), |_| None),
            Err(CutlineError::NotFound(_))
        ));
    }
}
