//! Integration tests for text overlays: animation timing and drawtext
//! compilation through a full project.

use cutline_render::{compile_render_plan, Project};
use cutline_text::{
    animated_state, calculate_animation_progress, create_text_overlay, validate_text_overlay,
    TextAnimation, TextAnimationType, TextOverlayOverrides, TextPreset,
};
use cutline_timeline::{TimelineClip, TimelineTrack};
use uuid::Uuid;

fn fade_in_overlay() -> cutline_text::TextOverlay {
    create_text_overlay(
        Uuid::nil(),
        TextPreset::Custom,
        "Hello",
        2.0,
        3.0,
        &TextOverlayOverrides {
            animation_in: Some(TextAnimation::new(TextAnimationType::Fade, 1.0)),
            ..TextOverlayOverrides::default()
        },
    )
}

#[test]
fn entry_progress_ramps_over_the_animation() {
    let overlay = fade_in_overlay();
    assert_eq!(calculate_animation_progress(&overlay, 2.0).entry, 0.0);
    assert_eq!(calculate_animation_progress(&overlay, 2.5).entry, 0.5);
    assert_eq!(calculate_animation_progress(&overlay, 3.0).entry, 1.0);
    assert_eq!(calculate_animation_progress(&overlay, 4.0).exit, 0.0);
}

#[test]
fn preview_opacity_follows_the_fade() {
    let overlay = fade_in_overlay();
    assert_eq!(animated_state(&overlay, 1.9).opacity, 0.0);
    assert_eq!(animated_state(&overlay, 2.5).opacity, 0.5);
    assert_eq!(animated_state(&overlay, 4.0).opacity, 1.0);
    // The window is half-open.
    assert_eq!(animated_state(&overlay, 5.0).opacity, 0.0);
}

#[test]
fn every_preset_yields_a_valid_overlay() {
    for preset in TextPreset::ALL {
        let overlay = create_text_overlay(
            Uuid::nil(),
            preset,
            "Sample",
            0.0,
            4.0,
            &TextOverlayOverrides::default(),
        );
        assert!(validate_text_overlay(&overlay).is_empty(), "{preset:?}");
    }
}

#[test]
fn special_characters_survive_into_the_render_graph() {
    let mut project = Project::new("Text");
    let mut video = TimelineTrack::new_video("V1");
    video.add_clip(TimelineClip::new(video.id, "a.mp4", 0.0, 5.0));
    project.add_track(video);
    let text = TimelineTrack::new_text("T1");
    let text_track = text.id;
    project.add_track(text);

    project.text_overlays.push(create_text_overlay(
        text_track,
        TextPreset::Custom,
        "50% off: today",
        1.0,
        2.0,
        &TextOverlayOverrides::default(),
    ));

    let fc = compile_render_plan(&project).unwrap().filter_complex();
    assert!(fc.contains(r"[vbase]drawtext=text=50% off\\: today:expansion=none:"));
    assert!(fc.contains("enable=between(t\\,1\\,3)"));
    assert!(fc.ends_with("[vout]"));
}

#[test]
fn overlays_on_hidden_tracks_are_not_drawn() {
    let mut project = Project::new("Hidden text");
    let mut video = TimelineTrack::new_video("V1");
    video.add_clip(TimelineClip::new(video.id, "a.mp4", 0.0, 5.0));
    project.add_track(video);
    let mut text = TimelineTrack::new_text("T1");
    text.visible = false;
    let text_track = text.id;
    project.add_track(text);
    project.text_overlays.push(create_text_overlay(
        text_track,
        TextPreset::Title,
        "Gone",
        0.0,
        2.0,
        &TextOverlayOverrides::default(),
    ));

    let fc = compile_render_plan(&project).unwrap().filter_complex();
    assert!(fc.contains("[vbase]null[vout]"));
}
