use std::collections::HashMap;

use crate::foundation::error::{DriftError, DriftResult};
use crate::glyph::font::FontFace;

/// Brush carried through Parley layouts: straight RGBA8.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl TextBrush {
    /// Opaque white, the color glyph masks are drawn in.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Parley font and layout contexts, reused across rebuilds.
///
/// Each font blob is registered once; later layouts with the same blob reuse the family.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    families: HashMap<(u64, u32), String>,
    last_family_name: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Fresh contexts with no registered fonts. System fonts are not consulted.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext {
                collection: parley::fontique::Collection::new(
                    parley::fontique::CollectionOptions {
                        shared: false,
                        system_fonts: false,
                    },
                ),
                source_cache: parley::fontique::SourceCache::default(),
            },
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
            last_family_name: None,
        }
    }

    /// Family name resolved by the most recent successful layout.
    pub fn last_family_name(&self) -> Option<&str> {
        self.last_family_name.as_deref()
    }

    /// Shape a single unwrapped line of `text` in the family of `font`.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &FontFace,
        size_px: f32,
        brush: TextBrush,
    ) -> DriftResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(DriftError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);

        self.last_family_name = Some(family_name);
        Ok(layout)
    }

    fn family_for(&mut self, font: &FontFace) -> DriftResult<String> {
        let key = (font.blob().id(), font.index());
        if let Some(name) = self.families.get(&key) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(font.blob().clone(), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == font.index()))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| DriftError::font("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DriftError::font("registered font family has no name"))?
            .to_string();
        tracing::debug!(family = %family_name, source = font.source(), "registered font");
        self.families.insert(key, family_name.clone());
        Ok(family_name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/layout.rs"]
mod tests;
