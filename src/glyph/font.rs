use std::path::Path;

use parley::fontique::{
    Attributes, Blob, Collection, CollectionOptions, FontStyle, FontWeight, FontWidth,
    GenericFamily, QueryFamily, QueryStatus, SourceCache, SourceKind,
};

use crate::foundation::error::{DriftError, DriftResult};

/// Family asked for first when no font file is configured.
const PREFERRED_FAMILY: &str = "Arial";

/// One face of a font file, with where it came from.
#[derive(Clone)]
pub struct FontFace {
    source: String,
    data: Blob<u8>,
    index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("source", &self.source)
            .field("len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontFace {
    /// First face of an in-memory font file. `source` is only used for diagnostics.
    pub fn from_bytes(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            data: Blob::from(bytes),
            index: 0,
        }
    }

    /// File path, or a description for faces not read from a known path.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &[u8] {
        self.data.data()
    }

    /// Face index inside a collection file; 0 for plain font files.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn blob(&self) -> &Blob<u8> {
        &self.data
    }
}

/// Read the configured font file, or pick the heaviest system sans-serif face.
///
/// The system lookup asks for weight 900, preferring Arial, and accepts the nearest weight
/// the installed fonts provide.
pub fn load_font(configured: Option<&Path>) -> DriftResult<FontFace> {
    if let Some(p) = configured {
        let bytes = std::fs::read(p)
            .map_err(|e| DriftError::font(format!("failed to read font '{}': {e}", p.display())))?;
        return Ok(FontFace::from_bytes(p.display().to_string(), bytes));
    }
    system_font()
}

fn system_font() -> DriftResult<FontFace> {
    let mut collection = Collection::new(CollectionOptions {
        shared: false,
        system_fonts: true,
    });
    let mut source_cache = SourceCache::default();

    let mut found = None;
    {
        let mut query = collection.query(&mut source_cache);
        query.set_families([
            QueryFamily::Named(PREFERRED_FAMILY),
            QueryFamily::Generic(GenericFamily::SansSerif),
        ]);
        query.set_attributes(Attributes::new(
            FontWidth::NORMAL,
            FontStyle::Normal,
            FontWeight::BLACK,
        ));
        query.matches_with(|font| {
            found = Some((font.family, font.blob.clone(), font.index));
            QueryStatus::Stop
        });
    }

    let Some(((family_id, font_idx), data, index)) = found else {
        return Err(DriftError::font(
            "no font_path configured and no system sans-serif font found",
        ));
    };

    let source = match collection.family(family_id) {
        Some(family) => match family.fonts().get(font_idx).map(|f| &f.source().kind) {
            Some(SourceKind::Path(path)) => path.display().to_string(),
            _ => format!("system font '{}'", family.name()),
        },
        None => "system font".to_owned(),
    };
    tracing::debug!(%source, index, "resolved system font");
    Ok(FontFace {
        source,
        data,
        index,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/font.rs"]
mod tests;
