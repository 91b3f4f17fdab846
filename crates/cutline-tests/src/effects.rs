//! Integration tests for effect stacks and transitions over real clips.

use cutline_effects::{
    compile_css_filter, compile_effect_chain, compile_transition_chain, effect_value_to_css,
    effect_value_to_ffmpeg, is_neutral, validate_transition_duration, ClipEffect, EffectPreset,
    EffectType, EffectsAction, EffectsState, Transition, TransitionType,
};
use cutline_timeline::{TimelineClip, TimelineTrack};
use uuid::Uuid;

#[test]
fn defaults_are_neutral_in_both_mappings() {
    for ty in EffectType::ALL {
        let default = ty.config().primary().default;
        assert!(is_neutral(ty, default), "{ty:?}");
        let effect = ClipEffect::new(Uuid::nil(), ty, 0);
        assert!(compile_effect_chain(&[effect]).is_empty(), "{ty:?}");
    }
    assert_eq!(effect_value_to_css(EffectType::Brightness, 0.0).as_deref(), Some("brightness(1)"));
    assert_eq!(effect_value_to_ffmpeg(EffectType::Brightness, 0.0), 0.0);
}

#[test]
fn eq_stage_precedes_discrete_filters_regardless_of_order() {
    let clip = Uuid::new_v4();
    let mut state = EffectsState::new();
    EffectsAction::Add(ClipEffect::with_value(clip, EffectType::Blur, 4.0, 0)).apply(&mut state);
    EffectsAction::Add(ClipEffect::with_value(clip, EffectType::Contrast, 20.0, 0)).apply(&mut state);

    let chain = compile_effect_chain(state.effects_for(clip));
    assert_eq!(chain.names(), ["eq", "gblur"]);
    assert_eq!(
        compile_css_filter(state.effects_for(clip)),
        "blur(4px) contrast(1.2)"
    );
}

#[test]
fn preset_then_toggle_changes_output() {
    let clip = Uuid::new_v4();
    let mut state = EffectsState::new();
    EffectsAction::ApplyPreset {
        clip_id: clip,
        preset: EffectPreset::ALL[0],
    }
    .apply(&mut state);
    let with_preset = compile_effect_chain(state.effects_for(clip));
    assert!(!with_preset.is_empty());

    let ids: Vec<Uuid> = state.effects_for(clip).iter().map(|e| e.id).collect();
    for effect_id in ids {
        EffectsAction::Toggle { clip_id: clip, effect_id }.apply(&mut state);
    }
    assert!(compile_effect_chain(state.effects_for(clip)).is_empty());
    assert_eq!(compile_css_filter(state.effects_for(clip)), "none");
}

#[test]
fn transition_duration_is_capped_at_two_seconds() {
    let validity = validate_transition_duration(TransitionType::Fade, 2500, 10.0, 10.0);
    assert!(!validity.valid);
    assert_eq!(validity.max_ms, 2000);
    assert!(validate_transition_duration(TransitionType::Fade, 2000, 10.0, 10.0).valid);
}

#[test]
fn three_clip_chain_offsets() {
    let mut track = TimelineTrack::new_video("V1");
    for (i, start) in [0.0, 5.0, 10.0].into_iter().enumerate() {
        track.add_clip(TimelineClip::new(track.id, format!("{i}.mp4"), start, 5.0));
    }
    let clips = &track.clips;
    let transitions = vec![
        Transition::new(clips[0].id, clips[1].id, TransitionType::Fade).with_duration_ms(1000),
        Transition::new(clips[1].id, clips[2].id, TransitionType::Dissolve).with_duration_ms(500),
    ];
    let inputs: Vec<String> = (0..3).map(|i| format!("s{i}")).collect();

    let result = compile_transition_chain(clips, &transitions, &inputs, "out").unwrap();
    assert_eq!(result.offsets, [Some(4.0), Some(8.5)]);
    assert_eq!(result.duration, 13.5);
    assert!(result.graph.check_labels().is_ok());
    assert_eq!(result.graph.terminal_outputs(), ["out"]);
}

#[test]
fn overlapping_transitions_on_short_clip_are_rejected() {
    let mut track = TimelineTrack::new_video("V1");
    for (i, (start, duration)) in [(0.0, 5.0), (5.0, 1.5), (6.5, 5.0)].into_iter().enumerate() {
        track.add_clip(TimelineClip::new(track.id, format!("{i}.mp4"), start, duration));
    }
    let clips = &track.clips;
    let transitions = vec![
        Transition::new(clips[0].id, clips[1].id, TransitionType::Fade).with_duration_ms(1000),
        Transition::new(clips[1].id, clips[2].id, TransitionType::Fade).with_duration_ms(1000),
    ];
    let inputs: Vec<String> = (0..3).map(|i| format!("s{i}")).collect();
    assert!(compile_transition_chain(clips, &transitions, &inputs, "out").is_err());
}
