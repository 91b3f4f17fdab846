//! Create a new project file.

use std::path::{Path, PathBuf};

use anyhow::bail;
use cutline_core::FrameRate;
use cutline_render::{Project, ProjectFile, ProjectSettings};
use cutline_timeline::TimelineTrack;
use tracing::info;

pub fn create(name: String, width: u32, height: u32, fps: u32) -> anyhow::Result<Project> {
    if width == 0 || height == 0 || fps == 0 {
        bail!("width, height and fps must be positive");
    }
    let settings = ProjectSettings {
        width,
        height,
        frame_rate: FrameRate::new(fps, 1),
        ..ProjectSettings::default()
    };
    let mut project = Project::new(name).with_settings(settings);
    project.add_track(TimelineTrack::new_video("Video 1"));
    project.add_track(TimelineTrack::new_audio("Audio 1"));
    project.add_track(TimelineTrack::new_text("Text 1"));
    Ok(project)
}

fn write(path: &Path, project: Project, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    ProjectFile::new(project).save_to_file(path)?;
    Ok(())
}

pub fn run(path: PathBuf, name: String, width: u32, height: u32, fps: u32, force: bool) -> anyhow::Result<()> {
    let project = create(name, width, height, fps)?;
    info!(name = %project.name, width, height, fps, "creating project");
    write(&path, project, force)?;
    println!("Created {}", path.display());
    Ok(())
}
