//! End-to-end tests: timeline edits to project, project to render plan,
//! plan to backend arguments, and the project file on disk.

use std::path::PathBuf;

use cutline_core::{CutlineError, TimeRange};
use cutline_effects::{ClipEffect, EffectType, EffectsAction, Transition, TransitionType};
use cutline_render::{
    compile_render_plan, ExportFormat, ExportJob, Project, ProjectFile, RenderStatus,
};
use cutline_timeline::{TimelineAction, TimelineClip, TimelineTrack};
use uuid::Uuid;

fn two_clip_project() -> (Project, Uuid, Uuid) {
    let mut project = Project::new("Cut");
    let mut video = TimelineTrack::new_video("V1");
    let a = TimelineClip::new(video.id, "intro", 0.0, 4.0);
    let b = TimelineClip::new(video.id, "main", 4.0, 6.0);
    let (a_id, b_id) = (a.id, b.id);
    video.add_clip(a);
    video.add_clip(b);
    project.add_track(video);

    let mut audio = TimelineTrack::new_audio("A1");
    audio.add_clip(TimelineClip::new(audio.id, "score", 0.0, 10.0));
    project.add_track(audio);
    (project, a_id, b_id)
}

fn resolve(media_id: &str) -> Option<PathBuf> {
    Some(PathBuf::from(format!("/media/{media_id}.mov")))
}

#[test]
fn project_compiles_to_backend_arguments() {
    let (mut project, a, b) = two_clip_project();
    project
        .transitions
        .push(Transition::new(a, b, TransitionType::Dissolve).with_duration_ms(500));
    EffectsAction::Add(ClipEffect::with_value(b, EffectType::Blur, 3.0, 0)).apply(&mut project.effects);
    assert!(project.validate().is_empty());

    let plan = compile_render_plan(&project).unwrap();
    assert_eq!(plan.duration, 9.5);

    let job = ExportJob::new("out.mp4", ExportFormat::h264_hd());
    let args = job.ffmpeg_args(&plan, resolve).unwrap();
    assert_eq!(&args[..5], ["-y", "-i", "/media/intro.mov", "-i", "/media/main.mov"]);
    let fc_index = args.iter().position(|a| a == "-filter_complex").unwrap();
    assert!(args[fc_index + 1].contains("xfade=transition=dissolve:duration=0.5:offset=3.5"));
    assert!(args[fc_index + 1].contains("gblur=sigma=3"));
    assert!(args.contains(&"[aout]".to_string()));
    assert!(args.contains(&"libx264".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
    assert_eq!(job.total_frames(&plan), 285);
}

#[test]
fn export_range_limits_frames() {
    let (project, _, _) = two_clip_project();
    let plan = compile_render_plan(&project).unwrap();
    let job = ExportJob::new("clip.webm", ExportFormat::vp9_web()).with_range(TimeRange::new(8.0, 5.0));
    // Only two seconds remain after the range start.
    assert_eq!(job.total_frames(&plan), 60);
    let args = job.ffmpeg_args(&plan, resolve).unwrap();
    assert!(args.windows(2).any(|w| w == ["-ss", "8"]));
}

#[test]
fn unresolved_media_is_reported() {
    let (project, _, _) = two_clip_project();
    let plan = compile_render_plan(&project).unwrap();
    let job = ExportJob::new("out.mov", ExportFormat::prores_422());
    let result = job.ffmpeg_args(&plan, |id| (id != "main").then(|| PathBuf::from(id)));
    assert!(matches!(result, Err(CutlineError::NotFound(_))));
}

#[test]
fn edits_flow_back_and_prune_orphans() {
    let (mut project, a, b) = two_clip_project();
    project
        .transitions
        .push(Transition::new(a, b, TransitionType::Fade));
    EffectsAction::Add(ClipEffect::new(a, EffectType::Sepia, 0)).apply(&mut project.effects);

    let mut state = project.timeline_state();
    TimelineAction::RemoveClip { clip_id: a }.apply(&mut state);
    project.sync_from(&state);

    assert!(project.transitions.is_empty());
    assert!(project.effects.effects_for(a).is_empty());
    assert!(project.find_clip(b).is_some());
    assert_eq!(project.duration, 10.0);
}

#[test]
fn saved_project_round_trips_and_renders() {
    let (mut project, a, b) = two_clip_project();
    project
        .transitions
        .push(Transition::new(a, b, TransitionType::WipeLeft).with_duration_ms(700));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");
    ProjectFile::new(project.clone()).save_to_file(&path).unwrap();
    let loaded = ProjectFile::load_from_file(&path).unwrap().project;

    assert_eq!(loaded, project);
    assert_eq!(
        compile_render_plan(&loaded).unwrap().filter_complex(),
        compile_render_plan(&project).unwrap().filter_complex()
    );
}

#[test]
fn render_lifecycle() {
    let (mut project, _, _) = two_clip_project();
    let plan = project.begin_render().unwrap();
    assert_eq!(project.status, RenderStatus::Processing);

    let job = ExportJob::new("out.mp4", ExportFormat::h264_hd());
    let frames = job.total_frames(&plan);
    project.update_progress(150.0 / frames as f64).unwrap();
    assert_eq!(project.progress, 0.5);

    project.complete().unwrap();
    assert_eq!(project.status, RenderStatus::Completed);
    assert!(project.update_progress(0.1).is_err());

    // A finished project can be rendered again.
    project.begin_render().unwrap();
    project.fail("disk full").unwrap();
    assert_eq!(project.status, RenderStatus::Failed);
    assert_eq!(project.error.as_deref(), Some("disk full"));
}

#[test]
fn gaps_keep_picture_and_sound_aligned() {
    let mut project = Project::new("Gaps");
    let mut video = TimelineTrack::new_video("V1");
    video.add_clip(TimelineClip::new(video.id, "a", 0.0, 2.0));
    video.add_clip(TimelineClip::new(video.id, "b", 5.0, 2.0));
    project.add_track(video);
    let mut audio = TimelineTrack::new_audio("A1");
    audio.add_clip(TimelineClip::new(audio.id, "hit", 5.0, 1.0));
    project.add_track(audio);

    let plan = compile_render_plan(&project).unwrap();
    assert_eq!(plan.duration, 7.0);
    let job = ExportJob::new("out.mp4", ExportFormat::h264_hd());
    assert_eq!(job.total_frames(&plan), 210);

    let args = job.ffmpeg_args(&plan, resolve).unwrap();
    // Two clips and one audio file; the black filler needs no input.
    assert_eq!(args.iter().filter(|a| *a == "-i").count(), 3);
    let fc_index = args.iter().position(|a| a == "-filter_complex").unwrap();
    assert!(args[fc_index + 1].contains("color=c=black:s=1920x1080:r=30:d=3"));
    assert!(args[fc_index + 1].contains("adelay=delays=5000:all=1"));
}
