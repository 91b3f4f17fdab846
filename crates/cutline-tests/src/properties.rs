//! Property tests over the timeline algorithms.

use cutline_timeline::{
    detect_overlap_range, snap_time, split_clip, SnapConfig, SnapTargets, TimelineClip,
};
use proptest::prelude::*;
use uuid::Uuid;

const PIXELS_PER_SECOND: f64 = 100.0;

fn clip(start: f64, duration: f64) -> TimelineClip {
    TimelineClip::new(Uuid::nil(), "m", start, duration).with_source(5.0, 5.0 + duration * 2.0)
}

fn no_grid() -> SnapConfig {
    SnapConfig {
        to_grid: false,
        ..SnapConfig::default()
    }
}

proptest! {
    #[test]
    fn split_halves_tile_the_original(
        start in 0.0f64..100.0,
        duration in 0.2f64..50.0,
        fraction in 0.01f64..0.99,
    ) {
        let original = clip(start, duration);
        let at = start + fraction * duration;
        let (left, right) = split_clip(&original, at).unwrap();

        prop_assert!((left.duration + right.duration - original.duration).abs() < 1e-9);
        prop_assert!((left.end_time() - right.start_time).abs() < 1e-9);
        prop_assert_eq!(left.start_time, original.start_time);
        prop_assert_eq!(left.source_end, right.source_start);
        prop_assert_eq!(left.source_start, original.source_start);
        prop_assert_eq!(right.source_end, original.source_end);
        prop_assert_ne!(left.id, original.id);
        prop_assert_ne!(right.id, original.id);
    }

    #[test]
    fn split_outside_the_clip_is_rejected(
        start in 1.0f64..100.0,
        duration in 0.2f64..50.0,
        outside in 0.0f64..10.0,
    ) {
        let original = clip(start, duration);
        prop_assert!(split_clip(&original, start - outside).is_none());
        prop_assert!(split_clip(&original, original.end_time() + outside).is_none());
    }

    #[test]
    fn overlap_is_symmetric(
        a_start in 0.0f64..50.0,
        a_duration in 0.1f64..20.0,
        b_start in 0.0f64..50.0,
        b_duration in 0.1f64..20.0,
    ) {
        let a = clip(a_start, a_duration);
        let b = clip(b_start, b_duration);
        let a_hits_b = detect_overlap_range(a_start, a_duration, None, std::slice::from_ref(&b)).is_some();
        let b_hits_a = detect_overlap_range(b_start, b_duration, None, std::slice::from_ref(&a)).is_some();
        prop_assert_eq!(a_hits_b, b_hits_a);
    }

    #[test]
    fn touching_clips_never_overlap(start in 0.0f64..50.0, duration in 0.1f64..20.0, next in 0.1f64..20.0) {
        let a = clip(start, duration);
        let b = clip(a.end_time(), next);
        prop_assert!(detect_overlap_range(b.start_time, b.duration, None, std::slice::from_ref(&a)).is_none());
    }

    #[test]
    fn snapping_is_idempotent(
        time in 0.0f64..60.0,
        playhead in 0.0f64..60.0,
        edges in prop::collection::vec(0.0f64..60.0, 0..8),
    ) {
        let config = no_grid();
        let targets = SnapTargets { playhead: Some(playhead), clip_edges: edges };
        let once = snap_time(time, &config, &targets, PIXELS_PER_SECOND);
        let twice = snap_time(once.time, &config, &targets, PIXELS_PER_SECOND);
        prop_assert_eq!(once.time, twice.time);
    }

    #[test]
    fn snapping_stays_within_threshold(
        time in 0.0f64..60.0,
        edges in prop::collection::vec(0.0f64..60.0, 0..8),
    ) {
        let config = SnapConfig::default();
        let targets = SnapTargets { playhead: None, clip_edges: edges };
        let threshold = config.threshold_px / PIXELS_PER_SECOND;
        let snapped = snap_time(time, &config, &targets, PIXELS_PER_SECOND);
        prop_assert!((snapped.time - time).abs() <= threshold);
    }
}
