//! Spawned rings and waves and their per-frame update.

use crate::constants::{CULL_RADIUS_FACTOR, OPACITY_EPSILON, VISIBLE_RADIUS_FACTOR, WAVE_SEGMENT_GAP};
use glam::Vec2;
use smallvec::SmallVec;
use std::time::Duration;

/// Angular lengths of a broken ring's segments, in drawing order.
pub type Segments = SmallVec<[f32; 12]>;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    FullRing,
    /// Partial ring between two angles, both offset by the primitive's rotation.
    Arc { start: f32, end: f32 },
    /// Ring drawn as consecutive segments separated by a fixed gap.
    Broken { segments: Segments },
}

impl Shape {
    /// Angular extent actually covered when drawn, gaps included.
    pub fn angular_span(&self) -> f32 {
        match self {
            Shape::FullRing => std::f32::consts::TAU,
            Shape::Arc { start, end } => end - start,
            Shape::Broken { segments } => {
                segments.iter().sum::<f32>() + segments.len() as f32 * WAVE_SEGMENT_GAP
            }
        }
    }
}

/// Opacity as a function of progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decay {
    /// `base * (1 - progress)`: fades all the way out.
    Linear { base: f32 },
    /// `max(floor, base * (1 - span * progress))`: never drops below `floor`.
    Floored { base: f32, span: f32, floor: f32 },
}

impl Decay {
    #[inline]
    pub fn opacity(&self, progress: f32) -> f32 {
        match *self {
            Decay::Linear { base } => base * (1.0 - progress),
            Decay::Floored { base, span, floor } => (base * (1.0 - progress * span)).max(floor),
        }
    }

    #[inline]
    pub fn base(&self) -> f32 {
        match *self {
            Decay::Linear { base } | Decay::Floored { base, .. } => base,
        }
    }
}

/// Everything fixed at spawn time.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveInit {
    pub center: Vec2,
    pub shape: Shape,
    pub seed_radius: f32,
    pub max_radius: f32,
    pub lifetime: Duration,
    pub rotation: f32,
    /// Rotation drift in radians per second.
    pub drift_per_sec: f32,
    pub decay: Decay,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    center: Vec2,
    shape: Shape,
    max_radius: f32,
    lifetime: Duration,
    drift_per_sec: f32,
    decay: Decay,
    radius: f32,
    opacity: f32,
    age: Duration,
    rotation: f32,
}

impl Primitive {
    pub fn spawn(init: PrimitiveInit) -> Self {
        Self {
            center: init.center,
            shape: init.shape,
            max_radius: init.max_radius,
            lifetime: init.lifetime,
            drift_per_sec: init.drift_per_sec,
            radius: init.seed_radius,
            opacity: init.decay.base(),
            decay: init.decay,
            age: Duration::ZERO,
            rotation: init.rotation,
        }
    }

    /// Advance by `dt` and report whether the primitive is still alive.
    ///
    /// The seed radius acts as a floor so the radius never shrinks on the
    /// first frames after spawning.
    pub fn step(&mut self, dt: Duration) -> bool {
        self.age += dt;
        let progress = self.progress();
        let target = if progress.is_finite() {
            self.max_radius * progress
        } else {
            f32::INFINITY
        };
        self.radius = self.radius.max(target);
        self.opacity = self.decay.opacity(progress);
        self.rotation += self.drift_per_sec * dt.as_secs_f32();
        self.is_alive()
    }

    /// `age / lifetime`; infinite for a zero lifetime.
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.lifetime.is_zero() {
            return f32::INFINITY;
        }
        (self.age.as_secs_f64() / self.lifetime.as_secs_f64()) as f32
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.opacity > OPACITY_EPSILON && self.radius < self.max_radius * CULL_RADIUS_FACTOR
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.opacity > OPACITY_EPSILON && self.radius < self.max_radius * VISIBLE_RADIUS_FACTOR
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
    #[inline]
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
    #[inline]
    pub fn age(&self) -> Duration {
        self.age
    }
    #[inline]
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }
    #[inline]
    pub fn decay(&self) -> Decay {
        self.decay
    }
}
