//! Colors and gradient stops used by the display list.

/// Straight (non-premultiplied) sRGB color with a floating point alpha,
/// mirroring the CSS `rgba()` notation the canvas consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Format as a CSS color string, e.g. `rgba(77, 231, 255, 0.3)`.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a.clamp(0.0, 1.0)
        )
    }
}

// Palette
pub const CYAN: Rgba = Rgba::opaque(77, 231, 255);
pub const VIOLET: Rgba = Rgba::opaque(124, 92, 255);
pub const INK: Rgba = Rgba::opaque(7, 10, 18); // page background
pub const MINT: Rgba = Rgba::opaque(184, 246, 196);
pub const SLATE: Rgba = Rgba::opaque(11, 15, 20);
pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}
