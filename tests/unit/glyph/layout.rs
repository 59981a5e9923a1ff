use super::*;
use crate::glyph::font::load_font;

#[test]
fn rejects_non_positive_size() {
    let mut engine = TextLayoutEngine::new();
    let face = FontFace::from_bytes("memory", b"not a font".to_vec());
    let err = engine
        .layout_line("N", &face, 0.0, TextBrush::WHITE)
        .err().unwrap();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn garbage_bytes_register_no_family() {
    let mut engine = TextLayoutEngine::new();
    let face = FontFace::from_bytes("memory", b"not a font".to_vec());
    for _ in 0..3 {
        let err = engine
            .layout_line("N", &face, 50.0, TextBrush::WHITE)
            .err().unwrap();
        assert!(err.to_string().contains("font error:"));
    }
    assert!(engine.families.is_empty());
    assert!(engine.last_family_name().is_none());
}

#[test]
fn repeated_layouts_register_the_font_once() {
    let Ok(face) = load_font(None) else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let mut counts = Vec::new();
    for _ in 0..10 {
        engine
            .layout_line("N", &face, 100.0, TextBrush::WHITE)
            .unwrap();
        let name = engine.last_family_name().unwrap().to_owned();
        let family = engine.font_ctx.collection.family_by_name(&name).unwrap();
        counts.push(family.fonts().len());
    }
    // Collection files may put several faces in one family; the count must not grow.
    assert!(counts.iter().all(|&c| c == counts[0]), "{counts:?}");
    assert_eq!(engine.families.len(), 1);

    // A clone shares the blob, so it reuses the registration too.
    let copy = face.clone();
    engine
        .layout_line("N", &copy, 80.0, TextBrush::WHITE)
        .unwrap();
    assert_eq!(engine.families.len(), 1);
}
