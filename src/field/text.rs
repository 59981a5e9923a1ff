use rand::rngs::StdRng;

use crate::config::{LayerConfig, LayerPalette, TextConfig};
use crate::field::ambient::uniform;
use crate::field::particle::{TextParticle, ease_toward_origin, fly_outward};
use crate::field::regime::{Regime, explosion_step};
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rgba8, Vec2, Viewport};
use crate::foundation::error::{DriftError, DriftResult};
use crate::glyph::font::{FontFace, load_font};
use crate::glyph::raster::{AlphaMask, GlyphRasterizer};
use crate::glyph::sample::{sample_mask, seed_layers};
use crate::render::surface::Surface;
use crate::runtime::effect::Effect;
use crate::runtime::host::FrameInput;

/// Smallest particle edge regardless of layer falloff.
const MIN_PARTICLE_SIZE: f64 = 0.5;

/// Glyph that dissolves into particles as the page scrolls.
pub struct TextField {
    cfg: TextConfig,
    rasterizer: GlyphRasterizer,
    font: Option<FontFace>,
    layer_colors: Vec<Rgba8>,
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("cfg", &self.cfg)
            .field("font_loaded", &self.font.is_some())
            .finish_non_exhaustive()
    }
}

impl TextField {
    /// Effect that loads its font from `cfg.font_path` (or a system fallback) on first use.
    pub fn new(cfg: TextConfig) -> Self {
        let layer_colors = (0..cfg.layers.count)
            .map(|l| layer_color(l, &cfg.layers.palette).with_opacity(cfg.opacity))
            .collect();
        Self {
            cfg,
            rasterizer: GlyphRasterizer::new(),
            font: None,
            layer_colors,
        }
    }

    /// Effect using an already loaded font.
    pub fn with_font(cfg: TextConfig, font: FontFace) -> Self {
        let mut field = Self::new(cfg);
        field.font = Some(font);
        field
    }

    /// Parameters in use.
    pub fn config(&self) -> &TextConfig {
        &self.cfg
    }

    /// Font face, once loaded by the first populate.
    pub fn font(&self) -> Option<&FontFace> {
        self.font.as_ref()
    }

    /// Family of the font used by the last rasterization.
    pub fn font_family(&self) -> Option<&str> {
        self.rasterizer.family_name()
    }

    /// Build particles for every opaque sample of `mask`.
    ///
    /// Particles start scattered uniformly over the viewport and are ordered back layer
    /// first so front layers paint on top.
    pub fn particles_from_mask(
        &self,
        mask: &AlphaMask,
        viewport: Viewport,
        rng: &mut StdRng,
    ) -> Vec<TextParticle> {
        let points = sample_mask(mask, self.cfg.stride, self.cfg.alpha_threshold);
        let seeds = seed_layers(&points, &self.cfg.layers, rng);

        let mut particles: Vec<TextParticle> = seeds
            .into_iter()
            .map(|seed| TextParticle {
                pos: Point::new(
                    uniform(rng, 0.0, viewport.w()),
                    uniform(rng, 0.0, viewport.h()),
                ),
                origin: seed.origin,
                vel: Vec2::new(uniform(rng, -1.0, 1.0), uniform(rng, -1.0, 1.0)),
                ease: self.cfg.ease,
                layer: seed.layer,
                size: layer_size(seed.layer, &self.cfg.layers),
                color: self.layer_colors[seed.layer as usize],
            })
            .collect();
        particles.sort_by(|a, b| b.layer.cmp(&a.layer));
        particles
    }

    fn mask_for(&mut self, viewport: Viewport) -> DriftResult<AlphaMask> {
        if self.font.is_none() {
            let face = load_font(self.cfg.font_path.as_deref())?;
            tracing::debug!(source = face.source(), "loaded font");
            self.font = Some(face);
        }
        let Some(font) = self.font.as_ref() else {
            return Err(DriftError::font("font bytes missing after load"));
        };
        self.rasterizer
            .rasterize(&self.cfg.text, font, self.cfg.font_size_px, viewport)
    }
}

impl Effect for TextField {
    type Particle = TextParticle;
    type Frame = Regime;

    fn name(&self) -> &'static str {
        "text"
    }

    #[tracing::instrument(skip(self, rng), fields(effect = "text"))]
    fn populate(&mut self, viewport: Viewport, rng: &mut StdRng) -> Vec<TextParticle> {
        let mask = match self.mask_for(viewport) {
            Ok(mask) => mask,
            Err(e) => {
                tracing::warn!(error = %e, "glyph rasterization failed, text field stays empty");
                return Vec::new();
            }
        };
        let particles = self.particles_from_mask(&mask, viewport, rng);
        tracing::debug!(count = particles.len(), "spawned text particles");
        particles
    }

    fn begin_frame(&self, input: &FrameInput) -> Regime {
        Regime::from_signal(input.scroll_offset, &self.cfg.explosion)
    }

    fn update(&self, particle: &mut TextParticle, regime: &Regime) {
        match *regime {
            Regime::Resting => ease_toward_origin(particle),
            Regime::Exploding { factor } => {
                let step = explosion_step(factor, particle.layer, &self.cfg.explosion);
                fly_outward(particle, step);
            }
        }
    }

    fn draw(&self, particle: &TextParticle, surface: &mut Surface) {
        surface.fill_square(particle.pos, particle.size, particle.color);
    }
}

/// HSL color of a depth layer.
pub fn layer_color(layer: u32, palette: &LayerPalette) -> Rgba8 {
    let l = (palette.base_lightness - f64::from(layer) * palette.lightness_step).max(0.0);
    let (h, s) = if layer >= palette.deep_from_layer {
        (palette.deep_hue, palette.deep_saturation)
    } else {
        (palette.hue, palette.saturation)
    };
    Color::hsl(h, s, l).to_rgba8()
}

/// Particle edge length on a depth layer.
pub fn layer_size(layer: u32, layers: &LayerConfig) -> f64 {
    (layers.size - f64::from(layer) * layers.size_falloff).max(MIN_PARTICLE_SIZE)
}

#[cfg(test)]
#[path = "../../tests/unit/field/text.rs"]
mod tests;
