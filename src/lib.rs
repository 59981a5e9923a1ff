//! Driftfield renders decorative particle-field backgrounds on the CPU.
//!
//! Two effects are provided:
//!
//! - [`AmbientField`]: a density-scaled swarm of drifting points with fading connection lines
//! - [`TextField`]: a glyph sampled into particles that rest on its shape and scatter as the
//!   host scrolls
//!
//! A host mounts an effect with [`Animator::mount`], reports viewport changes with
//! [`Animator::resize`] and calls [`Animator::tick`] once per display refresh (or hands
//! itself to [`Animator::run`] as a [`Host`]). Rendering problems never surface as errors:
//! the effect just draws nothing.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod config;
pub(crate) mod field;
pub(crate) mod glyph;
pub(crate) mod render;
pub(crate) mod runtime;

pub use crate::config::{
    AmbientConfig, ExplosionConfig, FieldConfig, LayerConfig, LayerPalette, LinkConfig,
    SceneConfig, TextConfig,
};
pub use crate::field::ambient::{AmbientField, particle_count};
pub use crate::field::links::{Link, connection_opacity, find_links, link_range_sq};
pub use crate::field::particle::{
    AmbientParticle, TextParticle, ease_toward_origin, fly_outward, reflect_and_advance,
};
pub use crate::field::regime::{Regime, explosion_factor, explosion_step};
pub use crate::field::text::{TextField, layer_color, layer_size};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{MAX_SURFACE_EDGE, Point, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{DriftError, DriftResult};
pub use crate::glyph::font::{FontFace, load_font};
pub use crate::glyph::raster::{AlphaMask, GlyphRasterizer};
pub use crate::glyph::sample::{LayerSeed, sample_mask, seed_layers};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::surface::Surface;
pub use crate::runtime::cancel::CancelToken;
pub use crate::runtime::driver::{Animator, RunStats};
pub use crate::runtime::effect::Effect;
pub use crate::runtime::host::{FrameInput, Host};
