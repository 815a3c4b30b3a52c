use crate::config::{AnimationConfig, ConfigError, Variant};
use crate::emitter::Emitter;
use crate::render::{DisplayList, Renderer};
use crate::simulation::Simulation;
use crate::surface::{Surface, Viewport};
use std::time::Duration;

/// Counters exposed for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub frames: u64,
    pub live: usize,
    pub spawned: u64,
    pub culled: u64,
}

/// Complete state of one mounted animation.
///
/// A frame runs the spawn check, the simulation step and the renderer in
/// that order, all against the clock value handed in by the host.
pub struct Scene {
    surface: Surface,
    emitter: Emitter,
    sim: Simulation,
    renderer: Renderer,
    list: DisplayList,
    last_frame: Duration,
    frames: u64,
}

impl Scene {
    /// Build a scene and fire any initial seeds due at time zero, so the
    /// first frame already has something to draw.
    pub fn new(config: AnimationConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!(
            "[scene] {} {}x{} seed={}",
            config.variant,
            viewport.width,
            viewport.height,
            seed
        );
        let renderer = Renderer::new(&config);
        let mut scene = Self {
            surface: Surface::new(viewport),
            emitter: Emitter::new(config, seed),
            sim: Simulation::new(),
            renderer,
            list: DisplayList::new(),
            last_frame: Duration::ZERO,
            frames: 0,
        };
        scene
            .emitter
            .maybe_spawn(Duration::ZERO, viewport, scene.sim.live_mut());
        Ok(scene)
    }

    /// Track a new viewport size; live primitives keep their centers.
    #[inline]
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        self.surface.resize(viewport)
    }

    /// Advance to `now` (time since mount) and return the frame to draw.
    pub fn frame(&mut self, now: Duration) -> &DisplayList {
        let dt = now.saturating_sub(self.last_frame);
        self.last_frame = self.last_frame.max(now);
        let viewport = self.surface.viewport();
        self.emitter.maybe_spawn(now, viewport, self.sim.live_mut());
        self.sim.step(dt);
        self.renderer.advance(dt);
        self.renderer.render(viewport, self.sim.live(), &mut self.list);
        self.frames += 1;
        &self.list
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            frames: self.frames,
            live: self.sim.len(),
            spawned: self.emitter.spawned(),
            culled: self.sim.culled(),
        }
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.emitter.config().variant
    }
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }
    #[inline]
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }
    #[inline]
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}
