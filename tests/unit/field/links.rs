use super::*;

#[test]
fn range_scales_with_viewport() {
    let cfg = LinkConfig::default();
    assert!((link_range_sq(Viewport::new(700, 1400), &cfg) - 20_000.0).abs() < 1e-9);
}

#[test]
fn opacity_is_one_when_coincident_and_zero_at_fade_distance() {
    assert_eq!(connection_opacity(0.0, 20_000.0), 1.0);
    assert!(connection_opacity(20_000.0, 20_000.0).abs() < 1e-12);
    assert_eq!(connection_opacity(35_000.0, 20_000.0), 0.0);
    assert!((connection_opacity(5_000.0, 20_000.0) - 0.75).abs() < 1e-12);
}

#[test]
fn coincident_pair_links_at_full_opacity() {
    let pts = [Point::new(10.0, 10.0), Point::new(10.0, 10.0)];
    let links = find_links(&pts, Viewport::new(700, 700), &LinkConfig::default());
    assert_eq!(
        links,
        vec![Link {
            a: 0,
            b: 1,
            opacity: 1.0
        }]
    );
}

#[test]
fn pairs_at_or_beyond_range_are_not_linked() {
    // 700x1400 with divisor 7 gives range² = 20000, the same as the fade distance.
    let vp = Viewport::new(700, 1400);
    let cfg = LinkConfig::default();
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(142.0, 0.0),
        Point::new(141.0, 0.0),
    ];
    let links = find_links(&pts, vp, &cfg);
    assert!(links.iter().all(|l| !(l.a == 0 && l.b == 1)));
    let near = links.iter().find(|l| l.a == 0 && l.b == 2).unwrap();
    assert!(near.opacity > 0.0 && near.opacity < 0.02);
}

#[test]
fn every_unordered_pair_is_considered_once() {
    let pts: Vec<Point> = (0..6).map(|i| Point::new(f64::from(i), 0.0)).collect();
    let links = find_links(&pts, Viewport::new(700, 700), &LinkConfig::default());
    assert_eq!(links.len(), 15);
    assert!(links.iter().all(|l| l.a < l.b));
}

#[test]
fn no_particles_no_links() {
    assert!(find_links(&[], Viewport::new(10, 10), &LinkConfig::default()).is_empty());
}
