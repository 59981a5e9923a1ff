//! Particle records and the per-particle physics shared by both effects.

use crate::foundation::core::{Point, Rgba8, Vec2, Viewport};

/// Drifting point of the ambient swarm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientParticle {
    /// Current position.
    pub pos: Point,
    /// Displacement per tick.
    pub vel: Vec2,
    /// Circle radius.
    pub radius: f64,
}

/// Point of the text dissolve effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextParticle {
    /// Current position.
    pub pos: Point,
    /// Rest position sampled from the glyph.
    pub origin: Point,
    /// Explosion direction, used only while exploding.
    pub vel: Vec2,
    /// Fraction of the remaining distance covered per resting tick.
    pub ease: f64,
    /// Depth layer, 0 is the front face.
    pub layer: u32,
    /// Square edge length.
    pub size: f64,
    /// Fill color.
    pub color: Rgba8,
}

/// Negate each velocity component whose coordinate is outside the viewport, then advance.
pub fn reflect_and_advance(p: &mut AmbientParticle, viewport: Viewport) {
    if p.pos.x > viewport.w() || p.pos.x < 0.0 {
        p.vel.x = -p.vel.x;
    }
    if p.pos.y > viewport.h() || p.pos.y < 0.0 {
        p.vel.y = -p.vel.y;
    }
    p.pos += p.vel;
}

/// Move a fraction `ease` of the way toward the origin.
pub fn ease_toward_origin(p: &mut TextParticle) {
    p.pos += (p.origin - p.pos) * p.ease;
}

/// Fly along the explosion direction by `step` times its length.
pub fn fly_outward(p: &mut TextParticle, step: f64) {
    p.pos += p.vel * step;
}

#[cfg(test)]
#[path = "../../tests/unit/field/particle.rs"]
mod tests;
