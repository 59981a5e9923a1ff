use crate::config::ExplosionConfig;

/// What every text particle does this frame.
///
/// Derived from the scroll offset alone, with no hysteresis, so an offset hovering around
/// the threshold flips the whole field between regimes from one frame to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Regime {
    /// Ease toward origins.
    Resting,
    /// Fly outward, `factor` scales the step.
    Exploding {
        /// Explosion factor before per-layer parallax.
        factor: f64,
    },
}

impl Regime {
    /// Classify a scroll offset.
    pub fn from_signal(scroll_offset: f64, cfg: &ExplosionConfig) -> Self {
        let factor = explosion_factor(scroll_offset, cfg);
        if factor > cfg.threshold {
            Self::Exploding { factor }
        } else {
            Self::Resting
        }
    }
}

/// `min(scroll / scroll_scale, max_factor)`; non-finite or negative offsets map to 0.
pub fn explosion_factor(scroll_offset: f64, cfg: &ExplosionConfig) -> f64 {
    if !scroll_offset.is_finite() || scroll_offset <= 0.0 {
        return 0.0;
    }
    (scroll_offset / cfg.scroll_scale).min(cfg.max_factor)
}

/// Distance covered per tick by a particle on `layer` while exploding with `factor`.
pub fn explosion_step(factor: f64, layer: u32, cfg: &ExplosionConfig) -> f64 {
    cfg.speed * factor * (1.0 + f64::from(layer) * cfg.layer_parallax)
}

#[cfg(test)]
#[path = "../../tests/unit/field/regime.rs"]
mod tests;
