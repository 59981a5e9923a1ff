//! Effect configuration.
//!
//! Every tunable constant of both effects lives here with its stock value as the serde
//! default, so an empty JSON object reproduces the stock look.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{DriftError, DriftResult};

/// Top-level config file: RNG seed plus the effect to run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Seed for particle spawning.
    #[serde(default)]
    pub seed: u64,
    /// Effect selection and parameters.
    pub field: FieldConfig,
}

impl SceneConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> DriftResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| DriftError::config(format!("parse scene config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_path(path: &Path) -> DriftResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            DriftError::config(format!("read scene config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Validate the selected effect.
    pub fn validate(&self) -> DriftResult<()> {
        match &self.field {
            FieldConfig::Ambient(c) => c.validate(),
            FieldConfig::Text(c) => c.validate(),
        }
    }
}

/// Which effect to run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldConfig {
    /// Drifting swarm with connection lines.
    Ambient(AmbientConfig),
    /// Glyph dissolve driven by scroll offset.
    Text(TextConfig),
}

/// Ambient swarm parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmbientConfig {
    /// Viewport area (px²) per particle.
    pub density_area: f64,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    /// Radii are drawn from `[0, max_radius)`.
    pub max_radius: f64,
    /// Particle and link color.
    pub color: Color,
    /// Connection pass.
    pub links: LinkConfig,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            density_area: 9000.0,
            max_speed: 0.2,
            max_radius: 2.0,
            color: Color::rgba(220.0 / 255.0, 38.0 / 255.0, 38.0 / 255.0, 1.0),
            links: LinkConfig::default(),
        }
    }
}

impl AmbientConfig {
    /// Check ranges.
    pub fn validate(&self) -> DriftResult<()> {
        positive("ambient.density_area", self.density_area)?;
        non_negative("ambient.max_speed", self.max_speed)?;
        non_negative("ambient.max_radius", self.max_radius)?;
        self.links.validate()
    }
}

/// Connection lines between nearby ambient particles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// Draw links at all.
    pub enabled: bool,
    /// Pairs link when `d² < (W / range_divisor) * (H / range_divisor)`.
    pub range_divisor: f64,
    /// Squared distance at which link opacity reaches zero.
    pub fade_dist_sq: f64,
    /// Stroke width in pixels.
    pub line_width: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            range_divisor: 7.0,
            fade_dist_sq: 20_000.0,
            line_width: 1.0,
        }
    }
}

impl LinkConfig {
    fn validate(&self) -> DriftResult<()> {
        positive("links.range_divisor", self.range_divisor)?;
        positive("links.fade_dist_sq", self.fade_dist_sq)?;
        positive("links.line_width", self.line_width)
    }
}

/// Text dissolve parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Glyph string to rasterize.
    pub text: String,
    /// Font file. When unset a list of common system bold fonts is probed.
    pub font_path: Option<PathBuf>,
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Sample every `stride`-th pixel in both directions.
    pub stride: u32,
    /// Samples with alpha strictly above this become particles.
    pub alpha_threshold: u8,
    /// Convergence rate toward the origin, `0 < ease <= 1`.
    pub ease: f64,
    /// Depth layering.
    pub layers: LayerConfig,
    /// Scroll-driven explosion.
    pub explosion: ExplosionConfig,
    /// Global opacity applied to every particle.
    pub opacity: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            text: "N".to_owned(),
            font_path: None,
            font_size_px: 350.0,
            stride: 6,
            alpha_threshold: 128,
            ease: 0.08,
            layers: LayerConfig::default(),
            explosion: ExplosionConfig::default(),
            opacity: 0.8,
        }
    }
}

impl TextConfig {
    /// Check ranges.
    pub fn validate(&self) -> DriftResult<()> {
        if self.text.trim().is_empty() {
            return Err(DriftError::validation("text.text must not be empty"));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(DriftError::validation(
                "text.font_size_px must be finite and > 0",
            ));
        }
        if self.stride == 0 {
            return Err(DriftError::validation("text.stride must be >= 1"));
        }
        if !self.ease.is_finite() || self.ease <= 0.0 || self.ease > 1.0 {
            return Err(DriftError::validation("text.ease must be in (0, 1]"));
        }
        unit_interval("text.opacity", self.opacity)?;
        self.layers.validate()?;
        self.explosion.validate()
    }
}

/// Pseudo-3D depth layers stacked behind the glyph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayerConfig {
    /// Number of layers; layer 0 is the front face.
    pub count: u32,
    /// Probability that a sample also spawns a particle on each deeper layer.
    pub density: f64,
    /// Per-layer origin shift: `+spacing` in x and `-spacing` in y.
    pub depth_spacing: f64,
    /// Front-layer particle edge length.
    pub size: f64,
    /// Edge length lost per layer.
    pub size_falloff: f64,
    /// Per-layer colors.
    pub palette: LayerPalette,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            count: 6,
            density: 0.4,
            depth_spacing: 3.0,
            size: 2.5,
            size_falloff: 0.0,
            palette: LayerPalette::default(),
        }
    }
}

impl LayerConfig {
    fn validate(&self) -> DriftResult<()> {
        if self.count == 0 {
            return Err(DriftError::validation("layers.count must be >= 1"));
        }
        unit_interval("layers.density", self.density)?;
        finite("layers.depth_spacing", self.depth_spacing)?;
        positive("layers.size", self.size)?;
        non_negative("layers.size_falloff", self.size_falloff)?;
        self.palette.validate()
    }
}

/// HSL palette parameterized by layer index.
///
/// Layer `l` gets lightness `base_lightness - l * lightness_step`; from `deep_from_layer` on,
/// hue and saturation switch to the deep pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayerPalette {
    /// Hue (degrees) of shallow layers.
    pub hue: f64,
    /// Saturation of shallow layers.
    pub saturation: f64,
    /// Lightness of layer 0.
    pub base_lightness: f64,
    /// Lightness lost per layer.
    pub lightness_step: f64,
    /// First layer using the deep hue/saturation.
    pub deep_from_layer: u32,
    /// Hue (degrees) of deep layers.
    pub deep_hue: f64,
    /// Saturation of deep layers.
    pub deep_saturation: f64,
}

impl Default for LayerPalette {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 1.0,
            base_lightness: 0.6,
            lightness_step: 0.1,
            deep_from_layer: 4,
            deep_hue: 10.0,
            deep_saturation: 0.8,
        }
    }
}

impl LayerPalette {
    fn validate(&self) -> DriftResult<()> {
        finite("palette.hue", self.hue)?;
        finite("palette.deep_hue", self.deep_hue)?;
        unit_interval("palette.saturation", self.saturation)?;
        unit_interval("palette.deep_saturation", self.deep_saturation)?;
        unit_interval("palette.base_lightness", self.base_lightness)?;
        non_negative("palette.lightness_step", self.lightness_step)
    }
}

/// Scroll-to-explosion mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplosionConfig {
    /// Distance per tick at factor 1.
    pub speed: f64,
    /// Scroll offset that maps to factor 1.
    pub scroll_scale: f64,
    /// Upper bound on the factor.
    pub max_factor: f64,
    /// Factors above this explode; at or below, particles rest.
    pub threshold: f64,
    /// Extra speed per layer: `factor * (1 + layer * layer_parallax)`.
    pub layer_parallax: f64,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            speed: 15.0,
            scroll_scale: 150.0,
            max_factor: 6.0,
            threshold: 0.1,
            layer_parallax: 0.2,
        }
    }
}

impl ExplosionConfig {
    fn validate(&self) -> DriftResult<()> {
        non_negative("explosion.speed", self.speed)?;
        positive("explosion.scroll_scale", self.scroll_scale)?;
        non_negative("explosion.max_factor", self.max_factor)?;
        non_negative("explosion.threshold", self.threshold)?;
        finite("explosion.layer_parallax", self.layer_parallax)
    }
}

fn finite(name: &str, v: f64) -> DriftResult<()> {
    if !v.is_finite() {
        return Err(DriftError::validation(format!("{name} must be finite")));
    }
    Ok(())
}

fn positive(name: &str, v: f64) -> DriftResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(DriftError::validation(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

fn non_negative(name: &str, v: f64) -> DriftResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(DriftError::validation(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn unit_interval(name: &str, v: f64) -> DriftResult<()> {
    if !(0.0..=1.0).contains(&v) {
        return Err(DriftError::validation(format!("{name} must be in [0, 1]")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
