use super::*;
use crate::glyph::font::load_font;

#[test]
fn mask_length_must_match_dims() {
    assert!(AlphaMask::new(3, 2, vec![0; 6]).is_ok());
    let err = AlphaMask::new(3, 2, vec![0; 5]).unwrap_err();
    assert!(err.to_string().contains("needs 6 values"));
}

#[test]
fn mask_from_frame_keeps_alpha_channel() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![10, 20, 30, 40, 50, 60, 70, 200],
        premultiplied: true,
    };
    let mask = AlphaMask::from_frame(&frame);
    assert_eq!(mask.alpha_at(0, 0), 40);
    assert_eq!(mask.alpha_at(1, 0), 200);
    assert_eq!(mask.alpha_at(2, 0), 0);
}

#[test]
fn zero_viewport_fails_before_shaping() {
    let mut r = GlyphRasterizer::new();
    let face = FontFace::from_bytes("memory", Vec::new());
    let err = r
        .rasterize("N", &face, 100.0, Viewport::new(0, 300))
        .unwrap_err();
    assert!(err.to_string().contains("render error:"));
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let mut r = GlyphRasterizer::new();
    assert!(
        r.rasterize(
            "N",
            &FontFace::from_bytes("memory", b"not a font".to_vec()),
            100.0,
            Viewport::new(64, 64)
        )
        .is_err()
    );
}

#[test]
fn glyph_is_centered_when_a_system_font_exists() {
    let Ok(face) = load_font(None) else {
        return;
    };
    let vp = Viewport::new(400, 300);
    let mut r = GlyphRasterizer::new();
    let mask = r.rasterize("N", &face, 200.0, vp).unwrap();
    assert!(r.family_name().is_some());

    let mut count = 0u64;
    let (mut sx, mut sy) = (0u64, 0u64);
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.alpha_at(x, y) > 128 {
                count += 1;
                sx += u64::from(x);
                sy += u64::from(y);
            }
        }
    }
    assert!(count > 0);
    let (cx, cy) = ((sx / count) as f64, (sy / count) as f64);
    assert!((cx - 200.0).abs() < 40.0, "cx = {cx}");
    assert!((cy - 150.0).abs() < 60.0, "cy = {cy}");
}
