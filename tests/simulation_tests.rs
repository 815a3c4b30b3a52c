// Host-side tests for primitive growth, decay and culling.
// The web crate is wasm-only; everything here goes through echo-core.

use echo_core::constants::*;
use echo_core::*;
use glam::Vec2;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn ring(max_radius: f32, lifetime: Duration) -> Primitive {
    Primitive::spawn(PrimitiveInit {
        center: Vec2::new(960.0, 432.0),
        shape: Shape::FullRing,
        seed_radius: AURA_SEED_RADIUS,
        max_radius,
        lifetime,
        rotation: 0.0,
        drift_per_sec: AURA_RING_DRIFT_PER_SEC,
        decay: Decay::Linear {
            base: AURA_BASE_OPACITY,
        },
    })
}

fn wave(max_radius: f32, lifetime: Duration) -> Primitive {
    Primitive::spawn(PrimitiveInit {
        center: Vec2::new(960.0, 432.0),
        shape: Shape::Broken {
            segments: std::iter::repeat(FULL_TURN / 10.0).take(10).collect(),
        },
        seed_radius: WAVE_SEED_RADIUS,
        max_radius,
        lifetime,
        rotation: 0.0,
        drift_per_sec: 0.0,
        decay: Decay::Floored {
            base: WAVE_BASE_OPACITY,
            span: WAVE_DECAY_SPAN,
            floor: WAVE_OPACITY_FLOOR,
        },
    })
}

#[test]
fn ring_reaches_half_radius_then_is_culled() {
    let mut p = ring(500.0, ms(10_000));
    assert!(p.step(ms(5_000)), "ring should be alive halfway through");
    assert!((p.radius() - 250.0).abs() < 1e-3, "radius {}", p.radius());
    assert!((p.opacity() - 0.035).abs() < 1e-6, "opacity {}", p.opacity());

    assert!(!p.step(ms(5_000)), "ring should die at the end of its lifetime");
    assert!((p.radius() - 500.0).abs() < 1e-3, "radius {}", p.radius());
    assert!(p.opacity() <= OPACITY_EPSILON);
}

#[test]
fn simulation_removes_dead_primitives() {
    let mut sim = Simulation::new();
    sim.live_mut().push(ring(500.0, ms(10_000)));
    assert_eq!(sim.step(ms(5_000)), 0);
    assert_eq!(sim.len(), 1);
    assert_eq!(sim.step(ms(5_000)), 1);
    assert!(sim.is_empty());
    assert_eq!(sim.culled(), 1);
}

#[test]
fn ring_opacity_never_increases() {
    let mut p = ring(450.0, ms(9_000));
    let mut last = p.opacity();
    while p.step(ms(16)) {
        assert!(p.opacity() <= last, "opacity rose from {last} to {}", p.opacity());
        last = p.opacity();
    }
    assert!(p.opacity() <= OPACITY_EPSILON || p.radius() >= p.max_radius() * CULL_RADIUS_FACTOR);
}

#[test]
fn wave_opacity_decays_to_floor_and_stays() {
    let mut p = wave(2304.0, ms(12_000));
    let mut last = p.opacity();
    for _ in 0..1_000 {
        p.step(ms(16));
        assert!(p.opacity() <= last + 1e-7, "opacity rose from {last} to {}", p.opacity());
        assert!(p.opacity() >= WAVE_OPACITY_FLOOR - 1e-6);
        last = p.opacity();
    }
    // Past the full lifetime the floor holds
    p.step(ms(4_000));
    assert!((p.opacity() - WAVE_OPACITY_FLOOR).abs() < 1e-6, "opacity {}", p.opacity());
}

#[test]
fn radius_and_age_are_monotonic() {
    let mut p = ring(600.0, ms(8_000));
    let (mut radius, mut age) = (p.radius(), p.age());
    for dt in [0, 1, 16, 33, 250, 0, 16] {
        p.step(ms(dt));
        assert!(p.radius() >= radius);
        assert!(p.age() >= age);
        radius = p.radius();
        age = p.age();
    }
}

#[test]
fn seed_radius_is_a_floor() {
    let mut p = ring(500.0, ms(10_000));
    p.step(ms(16));
    // 500 * 0.0016 is far below the seed radius
    assert_eq!(p.radius(), AURA_SEED_RADIUS);
}

#[test]
fn lifetime_is_bounded_for_any_frame_rate() {
    for dt_ms in [1_u64, 16, 250] {
        let dt = ms(dt_ms);

        let mut p = ring(520.0, ms(11_000));
        while p.step(dt) {
            assert!(p.age() <= p.lifetime() + dt, "ring outlived its lifetime at dt={dt_ms}");
        }
        assert!(p.age() <= p.lifetime() + dt);

        // Waves never fade out; they die on the radius bound instead
        let mut w = wave(2304.0, ms(13_000));
        let bound = w.lifetime().mul_f32(CULL_RADIUS_FACTOR) + dt;
        while w.step(dt) {
            assert!(w.age() <= bound, "wave outlived its bound at dt={dt_ms}");
        }
        assert!(w.age() <= bound);
        assert!(w.radius() >= w.max_radius() * CULL_RADIUS_FACTOR);
    }
}

#[test]
fn zero_lifetime_dies_on_first_step() {
    let mut p = ring(500.0, Duration::ZERO);
    assert!(p.progress().is_infinite());
    assert!(!p.step(Duration::ZERO));
    assert!(!p.radius().is_nan());
}

#[test]
fn visible_bound_is_tighter_than_cull_bound() {
    let mut w = wave(1000.0, ms(10_000));
    w.step(ms(11_500));
    // radius 1150: still alive but no longer drawn
    assert!(w.is_alive());
    assert!(!w.is_visible());
}

#[test]
fn ring_rotation_drifts_with_time() {
    let mut p = ring(500.0, ms(10_000));
    p.step(ms(1_000));
    assert!((p.rotation() - AURA_RING_DRIFT_PER_SEC).abs() < 1e-6);
}
