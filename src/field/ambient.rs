use rand::Rng;
use rand::rngs::StdRng;

use crate::config::AmbientConfig;
use crate::field::links::find_links;
use crate::field::particle::{AmbientParticle, reflect_and_advance};
use crate::foundation::core::{Point, Rgba8, Vec2, Viewport};
use crate::render::surface::Surface;
use crate::runtime::effect::Effect;
use crate::runtime::host::FrameInput;

/// Drifting swarm with fading connection lines.
#[derive(Clone, Debug)]
pub struct AmbientField {
    cfg: AmbientConfig,
    color: Rgba8,
}

impl AmbientField {
    /// Effect with the given parameters.
    pub fn new(cfg: AmbientConfig) -> Self {
        let color = cfg.color.to_rgba8();
        Self { cfg, color }
    }
}

impl Default for AmbientField {
    fn default() -> Self {
        Self::new(AmbientConfig::default())
    }
}

/// `floor(W * H / density_area)`.
pub fn particle_count(viewport: Viewport, density_area: f64) -> usize {
    (viewport.area() / density_area).floor() as usize
}

impl Effect for AmbientField {
    type Particle = AmbientParticle;
    type Frame = Viewport;

    fn name(&self) -> &'static str {
        "ambient"
    }

    #[tracing::instrument(skip(self, rng), fields(effect = "ambient"))]
    fn populate(&mut self, viewport: Viewport, rng: &mut StdRng) -> Vec<AmbientParticle> {
        let n = particle_count(viewport, self.cfg.density_area);
        let s = self.cfg.max_speed;
        let particles: Vec<AmbientParticle> = (0..n)
            .map(|_| AmbientParticle {
                pos: Point::new(
                    uniform(rng, 0.0, viewport.w()),
                    uniform(rng, 0.0, viewport.h()),
                ),
                vel: Vec2::new(uniform(rng, -s, s), uniform(rng, -s, s)),
                radius: uniform(rng, 0.0, self.cfg.max_radius),
            })
            .collect();
        tracing::debug!(count = particles.len(), "spawned ambient particles");
        particles
    }

    fn begin_frame(&self, input: &FrameInput) -> Viewport {
        input.viewport
    }

    fn update(&self, particle: &mut AmbientParticle, viewport: &Viewport) {
        reflect_and_advance(particle, *viewport);
    }

    fn draw(&self, particle: &AmbientParticle, surface: &mut Surface) {
        surface.fill_circle(particle.pos, particle.radius, self.color);
    }

    fn draw_links(&self, particles: &[AmbientParticle], viewport: &Viewport, surface: &mut Surface) {
        let links = &self.cfg.links;
        if !links.enabled {
            return;
        }
        let positions: Vec<Point> = particles.iter().map(|p| p.pos).collect();
        for link in find_links(&positions, *viewport, links) {
            surface.stroke_line(
                positions[link.a],
                positions[link.b],
                links.line_width,
                self.color.with_opacity(link.opacity),
            );
        }
    }
}

/// Uniform draw from `[lo, hi)`, or `lo` when the range is empty.
pub(crate) fn uniform(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

#[cfg(test)]
#[path = "../../tests/unit/field/ambient.rs"]
mod tests;
