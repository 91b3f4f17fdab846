//! Benchmarks for cutline-timeline hot paths.
//!
//! Run with: cargo bench -p cutline-timeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cutline_timeline::{
    find_nearest_gap, get_clip_edges, snap_time, SnapConfig, SnapTargets, TimelineClip,
    TimelineTrack,
};

/// Ten tracks of 200 clips with a one-second gap after each clip.
fn busy_timeline() -> Vec<TimelineTrack> {
    (0..10)
        .map(|t| {
            let mut track = TimelineTrack::new_video(format!("V{t}"));
            for i in 0..200 {
                let start = i as f64 * 4.0 + t as f64 * 0.25;
                track.add_clip(TimelineClip::new(track.id, "clip", start, 3.0));
            }
            track
        })
        .collect()
}

fn bench_clip_edges(c: &mut Criterion) {
    let tracks = busy_timeline();
    c.bench_function("clip_edges_2000", |bencher| {
        bencher.iter(|| get_clip_edges(black_box(&tracks), None));
    });
}

fn bench_snap(c: &mut Criterion) {
    let tracks = busy_timeline();
    let targets = SnapTargets::collect(&tracks, 412.3, None);
    let config = SnapConfig::default();

    c.bench_function("snap_time_4000_edges", |bencher| {
        bencher.iter(|| snap_time(black_box(412.27), &config, &targets, 100.0));
    });
}

fn bench_gap_search(c: &mut Criterion) {
    let tracks = busy_timeline();
    let clips = &tracks[0].clips;

    c.bench_function("find_nearest_gap_200", |bencher| {
        bencher.iter(|| find_nearest_gap(black_box(clips), black_box(401.0), 0.5, 900.0));
    });
}

criterion_group!(benches, bench_clip_edges, bench_snap, bench_gap_search);
criterion_main!(benches);
