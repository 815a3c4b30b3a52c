use crate::primitive::Primitive;
use std::time::Duration;

/// Live primitive collection. Order carries no meaning; removal is final.
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    live: Vec<Primitive>,
    culled: u64,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every primitive by `dt` and drop the ones that died.
    /// Returns how many were removed.
    pub fn step(&mut self, dt: Duration) -> usize {
        let before = self.live.len();
        self.live.retain_mut(|p| p.step(dt));
        let removed = before - self.live.len();
        if removed > 0 {
            self.culled += removed as u64;
            log::trace!("[sim] culled {} live={}", removed, self.live.len());
        }
        removed
    }

    /// Spawn buffer for the emitter.
    #[inline]
    pub fn live_mut(&mut self) -> &mut Vec<Primitive> {
        &mut self.live
    }

    #[inline]
    pub fn live(&self) -> &[Primitive] {
        &self.live
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Total primitives removed since creation.
    #[inline]
    pub fn culled(&self) -> u64 {
        self.culled
    }
}
