use crate::foundation::error::{DriftError, DriftResult};

pub use kurbo::{Point, Vec2};

/// Largest surface edge the CPU rasterizer accepts.
pub const MAX_SURFACE_EDGE: u32 = u16::MAX as u32;

/// Viewport dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either edge is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel area as a float.
    pub fn area(self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    /// Width as a float.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as a float.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Center point.
    pub fn center(self) -> Point {
        Point::new(self.w() / 2.0, self.h() / 2.0)
    }

    /// Edge lengths narrowed to what the rasterizer accepts.
    pub fn raster_dims(self) -> DriftResult<(u16, u16)> {
        if self.is_empty() {
            return Err(DriftError::render(format!(
                "viewport {}x{} has no pixels",
                self.width, self.height
            )));
        }
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| DriftError::render("viewport width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| DriftError::render("viewport height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha scaled by `opacity` (clamped to `0..=1`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self {
            a: (f64::from(self.a) * o).round() as u8,
            ..self
        }
    }

    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
