use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Point, Rgba8, Viewport};
use crate::foundation::error::DriftResult;
use crate::glyph::layout::TextBrush;
use crate::render::frame::FrameRGBA;

/// Flattening tolerance for circles, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU drawing surface sized to the viewport.
///
/// Draw calls are recorded into a `vello_cpu` render context and rasterized into the backing
/// pixmap by [`Surface::finish`]. The surface is exclusively owned by whoever drives the frame
/// loop; nothing else writes to it.
pub struct Surface {
    viewport: Viewport,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocate a transparent surface. Fails for empty or oversized viewports.
    pub fn new(viewport: Viewport) -> DriftResult<Self> {
        let (w, h) = viewport.raster_dims()?;
        Ok(Self {
            viewport,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Drop recorded draw calls and clear the pixels to transparent.
    pub fn clear(&mut self) {
        self.ctx.reset();
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    /// Filled circle. Non-positive radii draw nothing.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        if radius <= 0.0 || color.a == 0 {
            return;
        }
        let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
    }

    /// Filled axis-aligned square with its top-left corner at `origin`.
    pub fn fill_square(&mut self, origin: Point, side: f64, color: Rgba8) {
        if side <= 0.0 || color.a == 0 {
            return;
        }
        self.ctx.set_paint(color.to_cpu());
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            origin.x,
            origin.y,
            origin.x + side,
            origin.y + side,
        ));
    }

    /// Straight line segment.
    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) {
        if width <= 0.0 || color.a == 0 {
            return;
        }
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.set_paint(color.to_cpu());
        self.ctx.stroke_path(&path);
    }

    /// Fill every glyph run of a shaped layout, translated by `offset`.
    pub(crate) fn fill_layout(
        &mut self,
        layout: &parley::Layout<TextBrush>,
        font: &vello_cpu::peniko::FontData,
        offset: Point,
    ) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((offset.x, offset.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Rasterize everything recorded since the last [`Surface::clear`] and read the pixels back.
    pub fn finish(&mut self) -> FrameRGBA {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: self.viewport.width,
            height: self.viewport.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
