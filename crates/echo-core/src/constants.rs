// Shared tuning constants for the three ambient animation variants.
// Times are milliseconds, lengths are surface pixels, angles are radians.

use std::f32::consts::TAU;

// Liveness
pub const OPACITY_EPSILON: f32 = 0.001; // below this a primitive is considered faded out
pub const CULL_RADIUS_FACTOR: f32 = 1.2; // removed once radius reaches max_radius * this
pub const VISIBLE_RADIUS_FACTOR: f32 = 1.1; // drawn only while radius is below max_radius * this

// Scene anchor (fraction of the surface)
pub const CENTER_X_FRACTION: f32 = 0.5;
pub const CENTER_Y_FRACTION: f32 = 0.4; // slightly above center

// Longest accepted spawn interval, lifetime or seed offset (about 49 days)
pub const MAX_DURATION_MS: f32 = u32::MAX as f32;

// Shared spawn cadence
pub const SPAWN_INTERVAL_MS: (f32, f32) = (8000.0, 12000.0);

// Ring aura
pub const AURA_SEED_RADIUS: f32 = 20.0;
pub const AURA_BASE_OPACITY: f32 = 0.07;
pub const AURA_OPACITY_CAP: f32 = 0.07; // stroke alpha never exceeds this
pub const AURA_MAX_RADIUS_PX: (f32, f32) = (400.0, 600.0);
pub const AURA_LIFETIME_MS: (f32, f32) = (8000.0, 12000.0);
pub const AURA_ARC_PROBABILITY: f64 = 0.5;
pub const AURA_ARC_SPAN_FRACTION: (f32, f32) = (0.3, 0.7); // of a full turn
pub const AURA_RING_DRIFT_PER_SEC: f32 = 0.012; // 0.0002 rad per 60 Hz frame
pub const AURA_GLOBAL_DRIFT_PER_SEC: f32 = 0.03; // 0.0005 rad per 60 Hz frame
pub const AURA_SEED_OFFSETS_MS: [f32; 3] = [0.0, 2000.0, 4000.0];
pub const AURA_TRAIL_FADE_ALPHA: f32 = 0.15;
pub const AURA_LINE_WIDTH: f32 = 1.5;
pub const AURA_GLOW_BLUR: f32 = 20.0;
pub const AURA_GLOW_ALPHA: f32 = 0.3;
pub const AURA_SURFACE_BLUR_PX: f32 = 25.0; // CSS blur applied to the whole canvas
pub const AURA_GRADIENT_HALF_SPAN: f32 = 0.5; // gradient endpoints at +-radius * this

// Broken wave
pub const WAVE_SEED_RADIUS: f32 = 10.0;
pub const WAVE_BASE_OPACITY: f32 = 0.05;
pub const WAVE_OPACITY_FLOOR: f32 = 0.02;
pub const WAVE_DECAY_SPAN: f32 = 0.6; // fraction of base opacity lost at progress 1
pub const WAVE_VIEWPORT_RADIUS_FACTOR: f32 = 1.2; // max radius relative to the larger side
pub const WAVE_LIFETIME_MS: (f32, f32) = (10000.0, 14000.0);
pub const WAVE_SEGMENTS: (usize, usize) = (8, 12); // inclusive
pub const WAVE_SEGMENT_VARIATION: (f32, f32) = (0.7, 1.3); // of the uniform segment length
pub const WAVE_SEGMENT_GAP: f32 = 0.05;
pub const WAVE_SEED_OFFSETS_MS: [f32; 3] = [0.0, 3000.0, 6000.0];
pub const WAVE_TRAIL_FADE_ALPHA: f32 = 0.05;
pub const WAVE_LINE_WIDTH: f32 = 1.5;
pub const WAVE_INNER_RADIUS_FACTOR: f32 = 0.3; // radial gradient starts at radius * this
pub const WAVE_OUTER_ALPHA_FACTOR: f32 = 0.7;

// Ambient field
pub const FIELD_GRID_SPACING: f32 = 60.0;
pub const FIELD_GRID_ALPHA: f32 = 0.03;
pub const FIELD_PARTICLE_COUNT: usize = 30;
pub const FIELD_PARTICLE_STRIDE: (f32, f32) = (137.5, 97.3); // per-index offset
pub const FIELD_PARTICLE_DRIFT: (f32, f32) = (0.1, 0.05); // pixels per tick
pub const FIELD_PARTICLE_ALPHA: f32 = 0.1;
pub const FIELD_PARTICLE_ALPHA_SWING: f32 = 0.05;
pub const FIELD_WAVE_STEP_PX: f32 = 2.0;
pub const FIELD_TICKS_PER_SEC: f32 = 60.0; // field time advances one tick per 60 Hz frame
pub const FIELD_SURFACE_OPACITY: f32 = 0.6;

// (y offset, amplitude, frequency, speed, opacity)
pub const FIELD_WAVES: [(f32, f32, f32, f32, f32); 3] = [
    (-100.0, 30.0, 0.003, 0.5, 0.08),
    (0.0, 20.0, 0.004, 0.3, 0.05),
    (100.0, 25.0, 0.0035, 0.4, 0.06),
];

// Edge vignette: ellipse size relative to the surface and (offset, alpha) stops
pub const VIGNETTE_RADII_FRACTION: (f32, f32) = (0.8, 0.6);
pub const VIGNETTE_STOPS: [(f32, f32); 5] = [
    (0.0, 0.0),
    (0.35, 0.0),
    (0.6, 0.2),
    (0.85, 0.6),
    (1.0, 0.95),
];

// Backdrop
pub const BACKDROP_GRID_ALPHA: f32 = 0.08 * 0.08; // line alpha times layer opacity
pub const BACKDROP_NOISE_CELL: f32 = 24.0;
pub const BACKDROP_NOISE_ALPHA: f32 = 0.03;
pub const BACKDROP_STREAM_COUNT: usize = 8; // one every 45 degrees
pub const BACKDROP_STREAM_LAYER_ALPHA: f32 = 0.06;
pub const BACKDROP_STREAM_PEAK_ALPHA: f32 = 0.3; // line alpha at mid-cycle
pub const BACKDROP_STREAM_STOP_ALPHA: (f32, f32) = (0.15, 0.05); // gradient start/end
pub const BACKDROP_STREAM_DRIFT_PX: f32 = 20.0; // slide per cycle along 45 degrees
pub const BACKDROP_STREAM_STATIC_PHASE: f32 = 0.5; // backdrop repaints on resize only

pub const FULL_TURN: f32 = TAU;
