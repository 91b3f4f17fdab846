//! Compile a project to its render graph, or to full export arguments.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use cutline_render::{compile_render_plan, ExportFormat, ExportJob, RenderPlan};
use serde_json::json;

use crate::OutputFormat;

fn export_args(plan: &RenderPlan, preset: &str, output: &Path, media_dir: &Path) -> anyhow::Result<Vec<String>> {
    let format = ExportFormat::preset(preset).ok_or_else(|| {
        anyhow!(
            "unknown preset '{preset}' (expected one of {})",
            ExportFormat::PRESET_NAMES.join(", ")
        )
    })?;
    let args = ExportJob::new(output, format).ffmpeg_args(plan, |media| Some(media_dir.join(media)))?;
    Ok(args)
}

fn report(plan: &RenderPlan, args: Option<&[String]>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json!({
            "inputs": plan.inputs,
            "filterComplex": plan.filter_complex(),
            "videoOutput": plan.video_output,
            "audioOutput": plan.audio_output,
            "duration": plan.duration,
            "args": args,
        })
        .to_string(),
        OutputFormat::Text => match args {
            Some(args) => args.join(" "),
            None => {
                let mut out = String::new();
                for (i, input) in plan.inputs.iter().enumerate() {
                    out.push_str(&format!("input {i}: {}\n", input.media_id));
                }
                out.push_str(&plan.filter_complex());
                out
            }
        },
    }
}

pub fn run(
    path: PathBuf,
    preset: Option<String>,
    output: PathBuf,
    media_dir: PathBuf,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let project = super::load(&path)?;
    let plan = compile_render_plan(&project)
        .with_context(|| format!("failed to compile {}", path.display()))?;
    let args = preset
        .map(|p| export_args(&plan, &p, &output, &media_dir))
        .transpose()?;
    println!("{}", report(&plan, args.as_deref(), format));
    Ok(())
}
