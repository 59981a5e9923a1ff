use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{DriftError, DriftResult};
use crate::glyph::font::FontFace;
use crate::glyph::layout::{TextBrush, TextLayoutEngine};
use crate::render::frame::FrameRGBA;
use crate::render::surface::Surface;

/// Per-pixel coverage of a rasterized glyph, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    /// Wrap raw alpha values. `alpha.len()` must equal `width * height`.
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> DriftResult<Self> {
        if alpha.len() != (width as usize) * (height as usize) {
            return Err(DriftError::validation(format!(
                "alpha mask of {}x{} needs {} values, got {}",
                width,
                height,
                (width as usize) * (height as usize),
                alpha.len()
            )));
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Keep the alpha channel of an RGBA8 frame.
    pub fn from_frame(frame: &FrameRGBA) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            alpha: frame.data.chunks_exact(4).map(|px| px[3]).collect(),
        }
    }

    /// Mask width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at `(x, y)`; zero outside the mask.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

/// Shapes a string and draws it offscreen to obtain its coverage mask.
#[derive(Default)]
pub struct GlyphRasterizer {
    engine: TextLayoutEngine,
}

impl GlyphRasterizer {
    /// New rasterizer with empty font caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Family name of the font used by the last rasterization.
    pub fn family_name(&self) -> Option<&str> {
        self.engine.last_family_name()
    }

    /// Draw `text` in opaque white, centered on a transparent viewport-sized surface.
    #[tracing::instrument(skip(self, font), fields(font = font.source()))]
    pub fn rasterize(
        &mut self,
        text: &str,
        font: &FontFace,
        size_px: f32,
        viewport: Viewport,
    ) -> DriftResult<AlphaMask> {
        let mut surface = Surface::new(viewport)?;
        let layout = self
            .engine
            .layout_line(text, font, size_px, TextBrush::WHITE)?;

        let center = viewport.center();
        let offset = Point::new(
            center.x - f64::from(layout.width()) / 2.0,
            center.y - f64::from(layout.height()) / 2.0,
        );

        let data = vello_cpu::peniko::FontData::new(font.blob().clone(), font.index());
        surface.fill_layout(&layout, &data, offset);
        let frame = surface.finish();
        tracing::debug!(covered = frame.covered_pixels(), "rasterized glyph mask");
        Ok(AlphaMask::from_frame(&frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/raster.rs"]
mod tests;
