use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = frame(vec![1, 2, 3, 4, 5, 6, 7, 8], true);
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn unpremultiply_restores_straight_color() {
    let f = frame(vec![64, 0, 0, 128, 0, 0, 0, 0], true);
    let straight = f.to_straight_rgba8();
    assert_eq!(&straight[..4], &[128, 0, 0, 128]);
    assert_eq!(&straight[4..], &[0, 0, 0, 0]);
    assert_eq!(f.covered_pixels(), 1);
}

#[test]
fn straight_frames_pass_through() {
    let f = frame(vec![64, 0, 0, 128, 9, 9, 9, 255], false);
    assert_eq!(f.to_straight_rgba8(), f.data);
}
