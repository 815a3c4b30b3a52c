//! Display-list renderer.
//!
//! Each frame is described as an ordered list of [`DrawCmd`]s in surface pixel
//! space. The web frontend replays the list on a `CanvasRenderingContext2d`;
//! tests inspect it directly.

use crate::color::{ColorStop, Rgba, CYAN, INK, MINT, SLATE, TRANSPARENT, VIOLET};
use crate::config::{AnimationConfig, Variant};
use crate::constants::*;
use crate::primitive::{Primitive, Shape};
use crate::surface::Viewport;
use glam::Vec2;
use std::hash::Hasher;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Linear gradient between two points.
    Linear {
        from: Vec2,
        to: Vec2,
        stops: [ColorStop; 2],
    },
    /// Radial gradient between two concentric circles.
    Radial {
        center: Vec2,
        inner: f32,
        outer: f32,
        stops: [ColorStop; 2],
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Erase the whole surface to transparent.
    Clear,
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: Rgba,
    },
    Save,
    Restore,
    /// Rotate subsequent drawing by `angle` around `pivot`.
    RotateAbout { pivot: Vec2, angle: f32 },
    SetShadow { blur: f32, color: Rgba },
    StrokeArc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        paint: Paint,
        line_width: f32,
        alpha: f32,
    },
    /// Independent straight lines, each stroked on its own.
    StrokeLines {
        lines: Vec<(Vec2, Vec2)>,
        color: Rgba,
        line_width: f32,
    },
    /// Single straight line with its own paint and alpha.
    StrokeLine {
        from: Vec2,
        to: Vec2,
        paint: Paint,
        line_width: f32,
        alpha: f32,
    },
    StrokePolyline {
        points: Vec<Vec2>,
        color: Rgba,
        line_width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    /// Fill the whole surface with an elliptical radial gradient.
    FillEllipse {
        center: Vec2,
        radii: Vec2,
        stops: Vec<ColorStop>,
    },
}

#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    cmds: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the list, keeping its allocation for the next frame.
    #[inline]
    pub fn reset(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, DrawCmd> {
        self.cmds.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

/// CSS-level treatment a host should give the surface element.
/// `None` fields leave whatever the page already set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceStyle {
    pub blur_px: Option<f32>,
    pub opacity: Option<f32>,
}

impl Variant {
    pub fn surface_style(&self) -> SurfaceStyle {
        match self {
            Variant::RingAura => SurfaceStyle {
                blur_px: Some(AURA_SURFACE_BLUR_PX),
                opacity: None,
            },
            Variant::BrokenWave => SurfaceStyle::default(),
            Variant::AmbientField => SurfaceStyle {
                blur_px: None,
                opacity: Some(FIELD_SURFACE_OPACITY),
            },
        }
    }

    /// Whether the host should stack the [`vignette_css`] overlay above the surface.
    #[inline]
    pub fn has_vignette(&self) -> bool {
        !matches!(self, Variant::AmbientField)
    }
}

/// Per-scene render state: the shared aura rotation and the field clock.
#[derive(Clone, Debug)]
pub struct Renderer {
    variant: Variant,
    color_stops: [Rgba; 2],
    trail_fade_alpha: Option<f32>,
    global_rotation: f32,
    field_ticks: f32,
}

impl Renderer {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            variant: config.variant,
            color_stops: config.color_stops,
            trail_fade_alpha: config.trail_fade_alpha,
            global_rotation: 0.0,
            field_ticks: 0.0,
        }
    }

    /// Advance the renderer's own animated state.
    pub fn advance(&mut self, dt: Duration) {
        let dt_sec = dt.as_secs_f32();
        match self.variant {
            Variant::RingAura => self.global_rotation += AURA_GLOBAL_DRIFT_PER_SEC * dt_sec,
            Variant::AmbientField => self.field_ticks += FIELD_TICKS_PER_SEC * dt_sec,
            Variant::BrokenWave => {}
        }
    }

    /// Compose one frame: clear or fade, background layers, then live primitives.
    ///
    /// The edge vignette is not part of the frame. Painting it into a surface
    /// that keeps trails would darken the edges further every frame, so hosts
    /// stack it above the surface as a static overlay instead.
    pub fn render(&self, viewport: Viewport, live: &[Primitive], out: &mut DisplayList) {
        out.reset();
        match self.trail_fade_alpha {
            Some(alpha) => trail_fade(viewport, alpha, out),
            None => out.push(DrawCmd::Clear),
        }
        match self.variant {
            Variant::RingAura => self.draw_rings(live, out),
            Variant::BrokenWave => self.draw_waves(live, out),
            Variant::AmbientField => {
                grid(viewport, FIELD_GRID_SPACING, CYAN.with_alpha(FIELD_GRID_ALPHA), out);
                field_particles(viewport, self.field_ticks, out);
                for &(y_offset, amplitude, frequency, speed, opacity) in FIELD_WAVES.iter() {
                    let wave = SineWave {
                        y_offset,
                        amplitude,
                        frequency,
                        speed,
                    };
                    out.push(DrawCmd::StrokePolyline {
                        points: wave.sample(viewport, self.field_ticks),
                        color: CYAN.with_alpha(opacity),
                        line_width: 1.0,
                    });
                }
            }
        }
    }

    fn draw_rings(&self, live: &[Primitive], out: &mut DisplayList) {
        out.push(DrawCmd::SetShadow {
            blur: AURA_GLOW_BLUR,
            color: CYAN.with_alpha(AURA_GLOW_ALPHA),
        });
        for p in live.iter().filter(|p| p.is_visible()) {
            let (start, end) = match p.shape() {
                Shape::Arc { start, end } => (start + p.rotation(), end + p.rotation()),
                _ => (0.0, FULL_TURN),
            };
            let dir = Vec2::from_angle(p.rotation()) * p.radius() * AURA_GRADIENT_HALF_SPAN;
            out.push(DrawCmd::Save);
            out.push(DrawCmd::RotateAbout {
                pivot: p.center(),
                angle: self.global_rotation,
            });
            out.push(DrawCmd::StrokeArc {
                center: p.center(),
                radius: p.radius(),
                start,
                end,
                paint: Paint::Linear {
                    from: p.center() + dir,
                    to: p.center() - dir,
                    stops: [
                        ColorStop::new(0.0, self.color_stops[0]),
                        ColorStop::new(1.0, self.color_stops[1]),
                    ],
                },
                line_width: AURA_LINE_WIDTH,
                alpha: p.opacity().min(AURA_OPACITY_CAP),
            });
            out.push(DrawCmd::Restore);
        }
        out.push(DrawCmd::SetShadow {
            blur: 0.0,
            color: TRANSPARENT,
        });
    }

    fn draw_waves(&self, live: &[Primitive], out: &mut DisplayList) {
        for p in live.iter().filter(|p| p.is_visible()) {
            let Shape::Broken { segments } = p.shape() else {
                continue;
            };
            let opacity = p.opacity();
            let paint = Paint::Radial {
                center: p.center(),
                inner: p.radius() * WAVE_INNER_RADIUS_FACTOR,
                outer: p.radius(),
                stops: [
                    ColorStop::new(0.0, self.color_stops[0].with_alpha(opacity)),
                    ColorStop::new(
                        1.0,
                        self.color_stops[1].with_alpha(opacity * WAVE_OUTER_ALPHA_FACTOR),
                    ),
                ],
            };
            let mut angle = 0.0_f32;
            for &len in segments {
                out.push(DrawCmd::StrokeArc {
                    center: p.center(),
                    radius: p.radius(),
                    start: angle,
                    end: angle + len,
                    paint: paint.clone(),
                    line_width: WAVE_LINE_WIDTH,
                    alpha: 1.0,
                });
                angle += len + WAVE_SEGMENT_GAP;
            }
        }
    }

    #[inline]
    pub fn global_rotation(&self) -> f32 {
        self.global_rotation
    }

    #[inline]
    pub fn field_ticks(&self) -> f32 {
        self.field_ticks
    }
}

/// Low-alpha page-colored fill standing in for a clear, leaving motion trails.
pub fn trail_fade(viewport: Viewport, alpha: f32, out: &mut DisplayList) {
    out.push(DrawCmd::FillRect {
        origin: Vec2::ZERO,
        size: viewport.size(),
        color: INK.with_alpha(alpha),
    });
}

/// Vertical and horizontal lines every `spacing` pixels, edges included.
pub fn grid(viewport: Viewport, spacing: f32, color: Rgba, out: &mut DisplayList) {
    if spacing <= 0.0 {
        return;
    }
    let size = viewport.size();
    let mut lines = Vec::new();
    let mut x = 0.0;
    while x <= size.x {
        lines.push((Vec2::new(x, 0.0), Vec2::new(x, size.y)));
        x += spacing;
    }
    let mut y = 0.0;
    while y <= size.y {
        lines.push((Vec2::new(0.0, y), Vec2::new(size.x, y)));
        y += spacing;
    }
    out.push(DrawCmd::StrokeLines {
        lines,
        color,
        line_width: 1.0,
    });
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParticle {
    pub position: Vec2,
    pub size: f32,
    pub alpha: f32,
}

/// Position, size and alpha of field particle `index` at `ticks`.
/// Deterministic; a zero-sized viewport pins every particle to the origin.
pub fn field_particle(index: usize, ticks: f32, viewport: Viewport) -> FieldParticle {
    let i = index as f32;
    let size = viewport.size();
    let x = wrap(i * FIELD_PARTICLE_STRIDE.0 + ticks * FIELD_PARTICLE_DRIFT.0, size.x);
    let y = wrap(i * FIELD_PARTICLE_STRIDE.1 + ticks * FIELD_PARTICLE_DRIFT.1, size.y);
    FieldParticle {
        position: Vec2::new(x, y),
        size: 1.0 + (ticks * 0.02 + i).sin() * 0.5,
        alpha: FIELD_PARTICLE_ALPHA + (ticks * 0.01 + i * 0.5).sin() * FIELD_PARTICLE_ALPHA_SWING,
    }
}

fn field_particles(viewport: Viewport, ticks: f32, out: &mut DisplayList) {
    for i in 0..FIELD_PARTICLE_COUNT {
        let p = field_particle(i, ticks, viewport);
        out.push(DrawCmd::FillCircle {
            center: p.position,
            radius: p.size,
            color: VIOLET.with_alpha(p.alpha),
        });
    }
}

#[inline]
fn wrap(v: f32, len: f32) -> f32 {
    if len > 0.0 {
        v.rem_euclid(len)
    } else {
        0.0
    }
}

/// Two stacked sines drifting over time, centered on the surface mid-line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SineWave {
    pub y_offset: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
}

impl SineWave {
    pub fn height_at(&self, x: f32, ticks: f32, viewport: Viewport) -> f32 {
        let mid = viewport.height as f32 / 2.0 + self.y_offset;
        mid + (x * self.frequency + ticks * self.speed).sin() * self.amplitude
            + (x * self.frequency * 0.5 + ticks * self.speed * 0.7).sin() * self.amplitude * 0.5
    }

    /// Polyline sampled every couple of pixels across the surface width.
    pub fn sample(&self, viewport: Viewport, ticks: f32) -> Vec<Vec2> {
        let width = viewport.width as f32;
        let mut points = Vec::with_capacity((width / FIELD_WAVE_STEP_PX) as usize + 2);
        points.push(Vec2::new(0.0, viewport.height as f32 / 2.0 + self.y_offset));
        let mut x = 0.0;
        while x <= width {
            points.push(Vec2::new(x, self.height_at(x, ticks, viewport)));
            x += FIELD_WAVE_STEP_PX;
        }
        points
    }
}

/// CSS background for the edge vignette overlay: an ellipse anchored at the
/// scene center, transparent inside and fading to the page color at the rim.
pub fn vignette_css() -> String {
    let stops: Vec<String> = VIGNETTE_STOPS
        .iter()
        .map(|&(offset, alpha)| format!("{} {:.0}%", INK.with_alpha(alpha).to_css(), offset * 100.0))
        .collect();
    format!(
        "radial-gradient(ellipse {:.0}% {:.0}% at {:.0}% {:.0}%, {})",
        VIGNETTE_RADII_FRACTION.0 * 100.0,
        VIGNETTE_RADII_FRACTION.1 * 100.0,
        CENTER_X_FRACTION * 100.0,
        CENTER_Y_FRACTION * 100.0,
        stops.join(", ")
    )
}

/// Static page backdrop: tinted washes, speckle noise, a faint grid and the
/// diagonal stream lines, the latter frozen at the peak of their drift cycle.
/// Depends only on the viewport and `seed`, so hosts repaint it on resize only.
pub fn backdrop(viewport: Viewport, seed: u64, out: &mut DisplayList) {
    out.reset();
    out.push(DrawCmd::Clear);
    if viewport.is_empty() {
        return;
    }
    let size = viewport.size();
    out.push(DrawCmd::FillEllipse {
        center: size * Vec2::new(0.5, 0.5),
        radii: size * 0.75,
        stops: vec![
            ColorStop::new(0.0, SLATE.with_alpha(0.95)),
            ColorStop::new(1.0, SLATE),
        ],
    });
    for (anchor, alpha) in [(Vec2::new(0.2, 0.0), 0.04), (Vec2::new(0.8, 1.0), 0.03)] {
        out.push(DrawCmd::FillEllipse {
            center: size * anchor,
            radii: size,
            stops: vec![
                ColorStop::new(0.0, MINT.with_alpha(alpha)),
                ColorStop::new(0.5, TRANSPARENT),
            ],
        });
    }
    noise(viewport, seed, out);
    grid(viewport, FIELD_GRID_SPACING, MINT.with_alpha(BACKDROP_GRID_ALPHA), out);
    for i in 0..BACKDROP_STREAM_COUNT {
        let line = stream_line(i, BACKDROP_STREAM_STATIC_PHASE, viewport);
        out.push(DrawCmd::StrokeLine {
            from: line.from,
            to: line.to,
            paint: Paint::Linear {
                from: line.from,
                to: line.to,
                stops: [
                    ColorStop::new(0.0, MINT.with_alpha(BACKDROP_STREAM_STOP_ALPHA.0)),
                    ColorStop::new(1.0, MINT.with_alpha(BACKDROP_STREAM_STOP_ALPHA.1)),
                ],
            },
            line_width: 1.0,
            alpha: line.alpha,
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamLine {
    pub from: Vec2,
    pub to: Vec2,
    pub alpha: f32,
}

/// Diagonal backdrop line `index` at `phase` of its drift cycle.
///
/// Lines pass through the surface center at multiples of 45 degrees and reach
/// a full surface size past it on either side. Over one cycle a line slides
/// 20 px down and right while its alpha rises from zero to the peak at
/// mid-cycle and falls back.
pub fn stream_line(index: usize, phase: f32, viewport: Viewport) -> StreamLine {
    let size = viewport.size();
    let angle = index as f32 * FULL_TURN / BACKDROP_STREAM_COUNT as f32;
    let reach = Vec2::from_angle(angle) * size;
    let phase = phase.rem_euclid(1.0);
    let drift = Vec2::from_angle(FULL_TURN / 8.0) * BACKDROP_STREAM_DRIFT_PX * phase;
    let center = size * 0.5 + drift;
    StreamLine {
        from: center + reach,
        to: center - reach,
        alpha: BACKDROP_STREAM_LAYER_ALPHA * BACKDROP_STREAM_PEAK_ALPHA * (1.0 - (2.0 * phase - 1.0).abs()),
    }
}

fn noise(viewport: Viewport, seed: u64, out: &mut DisplayList) {
    let cols = (viewport.width as f32 / BACKDROP_NOISE_CELL).ceil() as u32;
    let rows = (viewport.height as f32 / BACKDROP_NOISE_CELL).ceil() as u32;
    let cell = Vec2::splat(BACKDROP_NOISE_CELL);
    for row in 0..rows {
        for col in 0..cols {
            let level = noise_level(seed, col, row);
            if level < 0.5 {
                continue;
            }
            out.push(DrawCmd::FillRect {
                origin: Vec2::new(col as f32, row as f32) * cell,
                size: cell,
                color: Rgba::opaque(255, 255, 255).with_alpha(BACKDROP_NOISE_ALPHA * level),
            });
        }
    }
}

/// Hash of a noise cell mapped to [0, 1).
pub fn noise_level(seed: u64, col: u32, row: u32) -> f32 {
    let mut h = fnv::FnvHasher::default();
    h.write_u64(seed);
    h.write_u32(col);
    h.write_u32(row);
    (h.finish() >> 40) as f32 / (1u64 << 24) as f32
}
