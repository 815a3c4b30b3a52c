//! Per-variant animation configuration.
//!
//! Every tunable the emitter and renderer read lives here so a host can
//! override spawn cadence, sizes, colors or the trail fade without touching
//! the simulation. `AnimationConfig::for_variant` returns the stock look.

use crate::color::{CYAN, VIOLET};
use crate::constants::*;
use crate::render::SurfaceStyle;
use crate::Rgba;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} range must be non-negative and finite, got [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} of {ms} ms exceeds the {} ms limit", MAX_DURATION_MS)]
    DurationTooLong { name: &'static str, ms: f32 },
    #[error("lifetime must be positive, got a minimum of {0} ms")]
    ZeroLifetime(f32),
    #[error("trail fade alpha must lie in [0, 1], got {0}")]
    TrailAlpha(f32),
    #[error("surface opacity must lie in [0, 1], got {0}")]
    SurfaceOpacity(f32),
    #[error("unknown animation variant '{0}'")]
    UnknownVariant(String),
}

/// The three animation flavours sharing one simulation contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Expanding rings and arcs with a glow, slowly rotating as a whole.
    RingAura,
    /// Expanding broken rings that fade toward a floor.
    BrokenWave,
    /// Grid, drifting particles and sine waves; spawns nothing.
    AmbientField,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::RingAura, Variant::BrokenWave, Variant::AmbientField];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::RingAura => "aura",
            Variant::BrokenWave => "wave",
            Variant::AmbientField => "field",
        }
    }

    /// Whether this variant runs the emitter at all.
    #[inline]
    pub fn spawns(&self) -> bool {
        !matches!(self, Variant::AmbientField)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aura" | "ring-aura" | "echo-aura" => Ok(Variant::RingAura),
            "wave" | "broken-wave" | "echo-wave" => Ok(Variant::BrokenWave),
            "field" | "ambient-field" | "background" => Ok(Variant::AmbientField),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Closed interval `[min, max]` sampled uniformly by the emitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn from_pair(pair: (f32, f32)) -> Self {
        Self::new(pair.0, pair.1)
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Like `validate`, for ranges that become `Duration`s.
    fn validate_ms(&self, name: &'static str) -> Result<(), ConfigError> {
        self.validate(name)?;
        if self.max > MAX_DURATION_MS {
            return Err(ConfigError::DurationTooLong { name, ms: self.max });
        }
        Ok(())
    }
}

/// Where a spawned primitive's maximum radius comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaxRadius {
    /// Uniform in a fixed pixel range.
    Pixels(Range),
    /// Larger viewport side times this factor, snapshotted at spawn.
    ViewportScaled(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    pub variant: Variant,
    /// Milliseconds between periodic spawns.
    pub spawn_interval: Range,
    pub max_radius: MaxRadius,
    /// Primitive lifetime in milliseconds.
    pub lifetime: Range,
    pub color_stops: [Rgba; 2],
    /// `None` hard-clears the surface every frame.
    pub trail_fade_alpha: Option<f32>,
    /// Virtual start times of the initial seeds, in milliseconds after mount.
    pub seed_offsets: Vec<f32>,
    /// RNG seed; `None` lets the host pick one.
    pub seed: Option<u64>,
    pub style: StyleOverride,
}

/// What mounting does to the CSS of the host's surface element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StyleOverride {
    /// The variant's own look (`Variant::surface_style`).
    #[default]
    Variant,
    /// Host-supplied values replace the variant's.
    Custom(SurfaceStyle),
    /// Leave the element's CSS exactly as the page set it.
    HostManaged,
}

impl StyleOverride {
    /// Build from loose host options. Keeping the host style wins over any
    /// explicit value; with no values at all the variant style applies.
    pub fn from_options(blur_px: Option<f32>, opacity: Option<f32>, keep_host_style: bool) -> Self {
        if keep_host_style {
            StyleOverride::HostManaged
        } else if blur_px.is_some() || opacity.is_some() {
            StyleOverride::Custom(SurfaceStyle { blur_px, opacity })
        } else {
            StyleOverride::Variant
        }
    }

    /// Style to apply to the element, or `None` to leave it alone.
    pub fn resolve(&self, variant: Variant) -> Option<SurfaceStyle> {
        match *self {
            StyleOverride::Variant => Some(variant.surface_style()),
            StyleOverride::Custom(style) => Some(style),
            StyleOverride::HostManaged => None,
        }
    }
}

impl AnimationConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::RingAura => Self {
                variant,
                spawn_interval: Range::from_pair(SPAWN_INTERVAL_MS),
                max_radius: MaxRadius::Pixels(Range::from_pair(AURA_MAX_RADIUS_PX)),
                lifetime: Range::from_pair(AURA_LIFETIME_MS),
                color_stops: [CYAN, VIOLET],
                trail_fade_alpha: Some(AURA_TRAIL_FADE_ALPHA),
                seed_offsets: AURA_SEED_OFFSETS_MS.to_vec(),
                seed: None,
                style: StyleOverride::Variant,
            },
            Variant::BrokenWave => Self {
                variant,
                spawn_interval: Range::from_pair(SPAWN_INTERVAL_MS),
                max_radius: MaxRadius::ViewportScaled(WAVE_VIEWPORT_RADIUS_FACTOR),
                lifetime: Range::from_pair(WAVE_LIFETIME_MS),
                color_stops: [CYAN, VIOLET],
                trail_fade_alpha: Some(WAVE_TRAIL_FADE_ALPHA),
                seed_offsets: WAVE_SEED_OFFSETS_MS.to_vec(),
                seed: None,
                style: StyleOverride::Variant,
            },
            Variant::AmbientField => Self {
                variant,
                spawn_interval: Range::from_pair(SPAWN_INTERVAL_MS),
                max_radius: MaxRadius::Pixels(Range::new(0.0, 0.0)),
                lifetime: Range::from_pair(WAVE_LIFETIME_MS),
                color_stops: [CYAN, VIOLET],
                trail_fade_alpha: None,
                seed_offsets: Vec::new(),
                seed: None,
                style: StyleOverride::Variant,
            },
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spawn_interval.validate_ms("spawn interval")?;
        self.lifetime.validate_ms("lifetime")?;
        if self.variant.spawns() && self.lifetime.min <= 0.0 {
            return Err(ConfigError::ZeroLifetime(self.lifetime.min));
        }
        match self.max_radius {
            MaxRadius::Pixels(r) => r.validate("max radius")?,
            MaxRadius::ViewportScaled(f) => Range::new(f, f).validate("max radius factor")?,
        }
        if let Some(a) = self.trail_fade_alpha {
            if !(0.0..=1.0).contains(&a) {
                return Err(ConfigError::TrailAlpha(a));
            }
        }
        for &offset in &self.seed_offsets {
            Range::new(offset, offset).validate_ms("seed offset")?;
        }
        if let StyleOverride::Custom(style) = self.style {
            if let Some(px) = style.blur_px {
                Range::new(px, px).validate("surface blur")?;
            }
            if let Some(o) = style.opacity {
                if !(0.0..=1.0).contains(&o) {
                    return Err(ConfigError::SurfaceOpacity(o));
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn seed_offsets(&self) -> impl Iterator<Item = Duration> + '_ {
        self.seed_offsets.iter().map(|&ms| ms_to_duration(ms))
    }
}

/// Negative and NaN inputs map to zero; values too large for a `Duration` saturate.
#[inline]
pub fn ms_to_duration(ms: f32) -> Duration {
    Duration::try_from_secs_f64(ms.max(0.0) as f64 / 1000.0).unwrap_or(Duration::MAX)
}
