//! Integration tests for the mixer and per-clip audio compilation.

use cutline_audio::{
    compile_clip_audio, effective_volume, AudioClip, AudioConfig, AudioMixerState,
    AudioMixerTrack, MixerAction,
};
use cutline_render::{compile_render_plan, Project};
use cutline_timeline::{TimelineClip, TimelineTrack};
use uuid::Uuid;

fn two_track_mixer() -> (AudioMixerState, Uuid, Uuid) {
    let mut mixer = AudioMixerState::new();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    MixerAction::AddTrack(AudioMixerTrack::new(a, "A")).apply(&mut mixer);
    MixerAction::AddTrack(AudioMixerTrack::new(b, "B")).apply(&mut mixer);
    (mixer, a, b)
}

#[test]
fn solo_silences_the_other_tracks() {
    let (mut mixer, a, b) = two_track_mixer();
    MixerAction::ToggleSolo(a).apply(&mut mixer);
    assert_eq!(effective_volume(&mixer, a), 1.0);
    assert_eq!(effective_volume(&mixer, b), 0.0);

    MixerAction::ToggleSolo(a).apply(&mut mixer);
    assert!(!mixer.has_solo);
    assert_eq!(effective_volume(&mixer, b), 1.0);
}

#[test]
fn mute_beats_solo_and_master_mute_beats_everything() {
    let (mut mixer, a, b) = two_track_mixer();
    MixerAction::ToggleSolo(a).apply(&mut mixer);
    MixerAction::ToggleMute(a).apply(&mut mixer);
    assert_eq!(effective_volume(&mixer, a), 0.0);

    MixerAction::ToggleMute(a).apply(&mut mixer);
    MixerAction::SetMasterVolume(0.5).apply(&mut mixer);
    MixerAction::SetTrackVolume {
        track_id: a,
        volume: 0.8,
    }
    .apply(&mut mixer);
    assert_eq!(effective_volume(&mixer, a), 0.4);

    MixerAction::ToggleMasterMute.apply(&mut mixer);
    assert_eq!(effective_volume(&mixer, a), 0.0);
    assert_eq!(effective_volume(&mixer, b), 0.0);
}

#[test]
fn clip_chain_trims_shapes_and_positions() {
    let track_id = Uuid::new_v4();
    let clip = TimelineClip::new(track_id, "voice.wav", 2.5, 4.0).with_source(1.0, 5.0);
    let config = AudioConfig {
        volume: 0.5,
        fade_out: 1.0,
        ..AudioConfig::default()
    };
    let node = compile_clip_audio(&AudioClip::from_clip(&clip, config), "0:a", "ac0", 1.0);
    assert_eq!(
        node.to_string(),
        "[0:a]atrim=start=1:end=5,asetpts=PTS-STARTPTS,volume=0.5,\
         afade=t=out:st=3:d=1,adelay=delays=2500:all=1[ac0]"
    );
}

#[test]
fn solo_in_a_project_drops_the_other_track_from_the_mix() {
    let mut project = Project::new("Mix");
    let mut video = TimelineTrack::new_video("V1");
    video.add_clip(TimelineClip::new(video.id, "v.mp4", 0.0, 6.0));
    project.add_track(video);

    let mut music = TimelineTrack::new_audio("Music");
    music.add_clip(TimelineClip::new(music.id, "music.wav", 0.0, 6.0));
    let music_id = music.id;
    project.add_track(music);

    let mut voice = TimelineTrack::new_audio("Voice");
    voice.add_clip(TimelineClip::new(voice.id, "voice.wav", 1.0, 3.0));
    let voice_id = voice.id;
    project.add_track(voice);

    let plan = compile_render_plan(&project).unwrap();
    assert!(plan.filter_complex().contains("[ac0][ac1]amix=inputs=2"));

    MixerAction::ToggleSolo(voice_id).apply(&mut project.mixer);
    let plan = compile_render_plan(&project).unwrap();
    let fc = plan.filter_complex();
    assert_eq!(plan.inputs.len(), 2);
    assert_eq!(plan.inputs[1].media_id, "voice.wav");
    assert!(fc.ends_with("[ac0]anull[aout]"));
    assert!(project.mixer.track(music_id).is_some());
}
