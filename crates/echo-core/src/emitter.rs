use crate::config::{ms_to_duration, AnimationConfig, MaxRadius, Range, Variant};
use crate::constants::*;
use crate::primitive::{Decay, Primitive, PrimitiveInit, Segments, Shape};
use crate::surface::Viewport;
use rand::prelude::*;
use smallvec::SmallVec;
use std::time::Duration;

/// Decides when primitives are created and draws their random parameters.
///
/// All randomness in a scene flows through the emitter's `StdRng`, so two
/// emitters built from the same config and seed spawn identical primitives
/// at identical times.
pub struct Emitter {
    config: AnimationConfig,
    rng: StdRng,
    last_spawn: Duration,
    next_delay: Duration,
    // Initial seeds still waiting for their virtual start time, ascending.
    pending_seeds: SmallVec<[Duration; 4]>,
    spawned: u64,
    skipped: u64,
}

impl Emitter {
    pub fn new(config: AnimationConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let next_delay = sample_ms(&mut rng, config.spawn_interval);
        let mut pending_seeds: SmallVec<[Duration; 4]> = if config.variant.spawns() {
            config.seed_offsets().collect()
        } else {
            SmallVec::new()
        };
        pending_seeds.sort();
        Self {
            config,
            rng,
            last_spawn: Duration::ZERO,
            next_delay,
            pending_seeds,
            spawned: 0,
            skipped: 0,
        }
    }

    /// Run the once-per-frame spawn check at `now` (time since mount).
    ///
    /// Due initial seeds fire first without touching the periodic timer. The
    /// periodic spawn fires once `now - last_spawn` exceeds the current delay,
    /// after which the delay is redrawn from the configured interval. Returns
    /// the number of primitives pushed onto `out`.
    pub fn maybe_spawn(
        &mut self,
        now: Duration,
        viewport: Viewport,
        out: &mut Vec<Primitive>,
    ) -> usize {
        if !self.config.variant.spawns() {
            return 0;
        }
        let before = out.len();
        let due = self.pending_seeds.iter().take_while(|&&t| t <= now).count();
        for _ in 0..due {
            self.pending_seeds.remove(0);
            self.spawn_into(viewport, out);
        }
        if now.saturating_sub(self.last_spawn) > self.next_delay {
            self.spawn_into(viewport, out);
            self.last_spawn = now;
            self.next_delay = sample_ms(&mut self.rng, self.config.spawn_interval);
            log::trace!(
                "[emitter] {} next spawn in {:.0} ms",
                self.config.variant,
                self.next_delay.as_secs_f32() * 1000.0
            );
        }
        out.len() - before
    }

    fn spawn_into(&mut self, viewport: Viewport, out: &mut Vec<Primitive>) {
        match self.spawn(viewport) {
            Some(p) => out.push(p),
            None => {
                self.skipped += 1;
                log::debug!("[emitter] {} skipped spawn on empty viewport", self.config.variant);
            }
        }
    }

    /// Build one primitive for this emitter's variant, anchored to the current
    /// viewport. Returns `None` for a zero-area viewport or a non-spawning variant.
    pub fn spawn(&mut self, viewport: Viewport) -> Option<Primitive> {
        if viewport.is_empty() {
            return None;
        }
        let primitive = match self.config.variant {
            Variant::RingAura => self.spawn_ring(viewport),
            Variant::BrokenWave => self.spawn_wave(viewport),
            Variant::AmbientField => return None,
        };
        self.spawned += 1;
        log::debug!(
            "[emitter] {} spawned max_radius={:.1} lifetime={:.0}ms",
            self.config.variant,
            primitive.max_radius(),
            primitive.lifetime().as_secs_f32() * 1000.0
        );
        Some(primitive)
    }

    /// A full ring or an arc covering 30-70% of a turn, chosen 50/50.
    pub fn spawn_ring(&mut self, viewport: Viewport) -> Primitive {
        let max_radius = self.sample_max_radius(viewport);
        let lifetime = sample_ms(&mut self.rng, self.config.lifetime);
        let shape = if self.rng.gen_bool(AURA_ARC_PROBABILITY) {
            let start = self.rng.gen::<f32>() * FULL_TURN;
            let span = self
                .rng
                .gen_range(AURA_ARC_SPAN_FRACTION.0..=AURA_ARC_SPAN_FRACTION.1);
            Shape::Arc {
                start,
                end: start + FULL_TURN * span,
            }
        } else {
            Shape::FullRing
        };
        let rotation = self.rng.gen::<f32>() * FULL_TURN;
        Primitive::spawn(PrimitiveInit {
            center: viewport.anchor(),
            shape,
            seed_radius: AURA_SEED_RADIUS,
            max_radius,
            lifetime,
            rotation,
            drift_per_sec: AURA_RING_DRIFT_PER_SEC,
            decay: Decay::Linear {
                base: AURA_BASE_OPACITY,
            },
        })
    }

    /// A broken ring reaching past the viewport edges.
    pub fn spawn_wave(&mut self, viewport: Viewport) -> Primitive {
        let max_radius = self.sample_max_radius(viewport);
        let lifetime = sample_ms(&mut self.rng, self.config.lifetime);
        let segments = broken_ring_segments(&mut self.rng);
        Primitive::spawn(PrimitiveInit {
            center: viewport.anchor(),
            shape: Shape::Broken { segments },
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

    fn sample_max_radius(&mut self, viewport: Viewport) -> f32 {
        match self.config.max_radius {
            MaxRadius::Pixels(range) => sample(&mut self.rng, range),
            MaxRadius::ViewportScaled(factor) => viewport.longest_side() * factor,
        }
    }

    #[inline]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }
    #[inline]
    pub fn last_spawn(&self) -> Duration {
        self.last_spawn
    }
    #[inline]
    pub fn next_delay(&self) -> Duration {
        self.next_delay
    }
    #[inline]
    pub fn pending_seeds(&self) -> usize {
        self.pending_seeds.len()
    }
    /// Primitives created so far, seeds included.
    #[inline]
    pub fn spawned(&self) -> u64 {
        self.spawned
    }
    /// Spawns dropped because the viewport had no area.
    #[inline]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Split a turn into 8-12 segments, each 70-130% of the uniform length.
pub fn broken_ring_segments<R: Rng + ?Sized>(rng: &mut R) -> Segments {
    let count = rng.gen_range(WAVE_SEGMENTS.0..=WAVE_SEGMENTS.1);
    let uniform = FULL_TURN / count as f32;
    (0..count)
        .map(|_| uniform * rng.gen_range(WAVE_SEGMENT_VARIATION.0..=WAVE_SEGMENT_VARIATION.1))
        .collect()
}

#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, range: Range) -> f32 {
    if range.min >= range.max {
        return range.min;
    }
    rng.gen_range(range.min..=range.max)
}

#[inline]
fn sample_ms<R: Rng + ?Sized>(rng: &mut R, range: Range) -> Duration {
    ms_to_duration(sample(rng, range))
}
