use rand::Rng;

use crate::config::LayerConfig;
use crate::foundation::core::Point;
use crate::glyph::raster::AlphaMask;

/// Particle origin on a given depth layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSeed {
    /// Rest position.
    pub origin: Point,
    /// Depth layer, 0 is the front face.
    pub layer: u32,
}

/// Grid-sample `mask` every `stride` pixels, row by row, keeping samples whose alpha is
/// strictly above `threshold`.
///
/// A zero stride is treated as 1.
pub fn sample_mask(mask: &AlphaMask, stride: u32, threshold: u8) -> Vec<(u32, u32)> {
    let step = stride.max(1) as usize;
    let mut out = Vec::new();
    for y in (0..mask.height()).step_by(step) {
        for x in (0..mask.width()).step_by(step) {
            if mask.alpha_at(x, y) > threshold {
                out.push((x, y));
            }
        }
    }
    out
}

/// Expand sampled points into per-layer origins.
///
/// Layer 0 always gets a seed; each deeper layer gets one with probability
/// `layers.density`, shifted by `layer * depth_spacing` right and up.
pub fn seed_layers<R: Rng + ?Sized>(
    points: &[(u32, u32)],
    layers: &LayerConfig,
    rng: &mut R,
) -> Vec<LayerSeed> {
    let mut out = Vec::with_capacity(points.len());
    for &(x, y) in points {
        for layer in 0..layers.count {
            if layer > 0 && rng.random::<f64>() >= layers.density {
                continue;
            }
            let shift = f64::from(layer) * layers.depth_spacing;
            out.push(LayerSeed {
                origin: Point::new(f64::from(x) + shift, f64::from(y) - shift),
                layer,
            });
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/sample.rs"]
mod tests;
