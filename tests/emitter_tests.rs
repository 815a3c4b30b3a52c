// Host-side tests for spawn timing, initial seeding and random parameter ranges.

use echo_core::constants::*;
use echo_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const VIEWPORT: Viewport = Viewport::new(1920, 1080);
const FRAME: Duration = Duration::from_millis(16);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn unseeded(variant: Variant) -> AnimationConfig {
    let mut config = AnimationConfig::for_variant(variant);
    config.seed_offsets.clear();
    config
}

#[test]
fn periodic_spawn_gaps_stay_within_interval() {
    for seed in 0..8 {
        let mut emitter = Emitter::new(unseeded(Variant::RingAura), seed);
        let mut out = Vec::new();
        let mut spawn_times = vec![Duration::ZERO];
        let mut now = Duration::ZERO;
        while now < ms(240_000) {
            now += FRAME;
            if emitter.maybe_spawn(now, VIEWPORT, &mut out) > 0 {
                spawn_times.push(now);
            }
        }
        assert!(spawn_times.len() > 10, "seed {seed}: only {} spawns", spawn_times.len());
        for pair in spawn_times.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap > ms(8_000), "seed {seed}: gap {gap:?} too short");
            assert!(gap <= ms(12_000) + FRAME, "seed {seed}: gap {gap:?} too long");
        }
    }
}

#[test]
fn seeds_fire_at_their_offsets_without_touching_the_timer() {
    let mut emitter = Emitter::new(AnimationConfig::for_variant(Variant::RingAura), 7);
    let mut out = Vec::new();
    assert_eq!(emitter.pending_seeds(), 3);

    assert_eq!(emitter.maybe_spawn(Duration::ZERO, VIEWPORT, &mut out), 1);
    assert_eq!(emitter.maybe_spawn(ms(1_999), VIEWPORT, &mut out), 0);
    assert_eq!(emitter.maybe_spawn(ms(2_000), VIEWPORT, &mut out), 1);
    assert_eq!(emitter.maybe_spawn(ms(4_000), VIEWPORT, &mut out), 1);
    assert_eq!(emitter.pending_seeds(), 0);
    assert_eq!(emitter.last_spawn(), Duration::ZERO);
    assert_eq!(out.len(), 3);
}

#[test]
fn late_first_frame_fires_all_due_seeds() {
    let mut emitter = Emitter::new(AnimationConfig::for_variant(Variant::BrokenWave), 3);
    let mut out = Vec::new();
    assert_eq!(emitter.maybe_spawn(ms(6_500), VIEWPORT, &mut out), 3);
}

#[test]
fn same_seed_spawns_identical_primitives() {
    for variant in [Variant::RingAura, Variant::BrokenWave] {
        let mut a = Emitter::new(AnimationConfig::for_variant(variant), 42);
        let mut b = Emitter::new(AnimationConfig::for_variant(variant), 42);
        let (mut out_a, mut out_b) = (Vec::new(), Vec::new());
        let mut now = Duration::ZERO;
        while now < ms(60_000) {
            a.maybe_spawn(now, VIEWPORT, &mut out_a);
            b.maybe_spawn(now, VIEWPORT, &mut out_b);
            now += FRAME;
        }
        assert!(!out_a.is_empty());
        assert_eq!(out_a, out_b, "{variant} diverged for the same seed");
    }
}

#[test]
fn different_seeds_differ() {
    let mut a = Emitter::new(AnimationConfig::for_variant(Variant::RingAura), 1);
    let mut b = Emitter::new(AnimationConfig::for_variant(Variant::RingAura), 2);
    assert_ne!(a.spawn(VIEWPORT), b.spawn(VIEWPORT));
}

#[test]
fn broken_ring_segments_cover_expected_ranges() {
    let mut seen_counts = [false; 13];
    for seed in 0..300 {
        let mut rng = StdRng::seed_from_u64(seed);
        let segments = broken_ring_segments(&mut rng);
        let n = segments.len();
        assert!((8..=12).contains(&n), "segment count {n}");
        seen_counts[n] = true;

        let uniform = FULL_TURN / n as f32;
        for &len in &segments {
            assert!(len > 0.0);
            assert!(len >= uniform * 0.7 - 1e-5, "segment {len} below 70% of {uniform}");
            assert!(len <= uniform * 1.3 + 1e-5, "segment {len} above 130% of {uniform}");
        }

        let span = Shape::Broken { segments }.angular_span();
        let gaps = n as f32 * WAVE_SEGMENT_GAP;
        assert!(span >= FULL_TURN * 0.7 + gaps - 1e-4, "span {span}");
        assert!(span <= FULL_TURN * 1.3 + gaps + 1e-4, "span {span}");
    }
    assert!(seen_counts[8] && seen_counts[12], "both ends of 8..=12 should occur");
}

#[test]
fn ring_parameters_stay_in_range() {
    let mut emitter = Emitter::new(AnimationConfig::for_variant(Variant::RingAura), 99);
    let (mut arcs, mut rings) = (0, 0);
    for _ in 0..400 {
        let p = emitter.spawn_ring(VIEWPORT);
        assert!((400.0..=600.0).contains(&p.max_radius()));
        assert!(p.lifetime() >= ms(8_000) && p.lifetime() <= ms(12_000));
        assert_eq!(p.radius(), AURA_SEED_RADIUS);
        assert!((p.opacity() - AURA_BASE_OPACITY).abs() < f32::EPSILON);
        assert!((0.0..=FULL_TURN).contains(&p.rotation()));
        match p.shape() {
            Shape::Arc { .. } => {
                let span = p.shape().angular_span() / FULL_TURN;
                assert!((0.3 - 1e-5..=0.7 + 1e-5).contains(&span), "arc span {span}");
                arcs += 1;
            }
            Shape::FullRing => rings += 1,
            other => panic!("unexpected ring shape {other:?}"),
        }
    }
    // Roughly even split between arcs and full rings
    assert!(arcs > 120 && rings > 120, "arcs {arcs} rings {rings}");
}

#[test]
fn wave_radius_scales_with_viewport() {
    let mut emitter = Emitter::new(AnimationConfig::for_variant(Variant::BrokenWave), 5);
    let p = emitter.spawn_wave(VIEWPORT);
    assert!((p.max_radius() - 1920.0 * 1.2).abs() < 1e-3);
    assert!(p.lifetime() >= ms(10_000) && p.lifetime() <= ms(14_000));
    assert_eq!(p.radius(), WAVE_SEED_RADIUS);

    let tall = emitter.spawn_wave(Viewport::new(400, 900));
    assert!((tall.max_radius() - 900.0 * 1.2).abs() < 1e-3);
}

#[test]
fn spawns_anchor_at_viewport_center() {
    let mut emitter = Emitter::new(AnimationConfig::for_variant(Variant::RingAura), 11);
    let p = emitter.spawn(Viewport::new(1000, 500)).expect("spawn");
    assert_eq!(p.center(), glam::Vec2::new(500.0, 200.0));
}

#[test]
fn empty_viewport_skips_spawns() {
    let mut emitter = Emitter::new(AnimationConfig::for_variant(Variant::RingAura), 0);
    let mut out = Vec::new();
    assert_eq!(emitter.maybe_spawn(ms(4_000), Viewport::new(0, 720), &mut out), 0);
    assert!(out.is_empty());
    assert_eq!(emitter.skipped(), 3);
    assert_eq!(emitter.spawned(), 0);
}

#[test]
fn field_never_spawns() {
    let mut emitter = Emitter::new(AnimationConfig::for_variant(Variant::AmbientField), 0);
    let mut out = Vec::new();
    let mut now = Duration::ZERO;
    while now < ms(60_000) {
        emitter.maybe_spawn(now, VIEWPORT, &mut out);
        now += ms(100);
    }
    assert!(out.is_empty());
    assert!(emitter.spawn(VIEWPORT).is_none());
    assert_eq!(emitter.pending_seeds(), 0);
}
