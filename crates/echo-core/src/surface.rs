//! Surface sizing.
//!
//! The surface tracks the pixel size of the drawing target. Resizing only
//! changes where *future* primitives are anchored; live primitives keep the
//! center they were spawned with.

use crate::constants::{CENTER_X_FRACTION, CENTER_Y_FRACTION};
use glam::Vec2;

/// Viewport (or container) size in pixels. Either side may be zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Length of the longer side in pixels.
    #[inline]
    pub fn longest_side(&self) -> f32 {
        self.width.max(self.height) as f32
    }

    /// Scene anchor: horizontal center, 40% down from the top.
    #[inline]
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * CENTER_X_FRACTION,
            self.height as f32 * CENTER_Y_FRACTION,
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct Surface {
    viewport: Viewport,
    resizes: u32,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            resizes: 0,
        }
    }

    /// Match the surface to `viewport`. Returns `true` when the size changed;
    /// repeating the same size is a no-op.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if self.viewport == viewport {
            return false;
        }
        log::debug!(
            "[surface] {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        self.resizes += 1;
        true
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of effective size changes since creation.
    #[inline]
    pub fn resize_count(&self) -> u32 {
        self.resizes
    }
}
