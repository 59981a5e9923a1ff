use crate::config::LinkConfig;
use crate::foundation::core::{Point, Viewport};

/// Connection between two particles, by index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    /// Lower index.
    pub a: usize,
    /// Higher index.
    pub b: usize,
    /// Stroke opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Squared distance under which two particles are linked.
pub fn link_range_sq(viewport: Viewport, cfg: &LinkConfig) -> f64 {
    (viewport.w() / cfg.range_divisor) * (viewport.h() / cfg.range_divisor)
}

/// `1 - d2 / fade_dist_sq`, clamped to `[0, 1]`.
pub fn connection_opacity(dist_sq: f64, fade_dist_sq: f64) -> f64 {
    (1.0 - dist_sq / fade_dist_sq).clamp(0.0, 1.0)
}

/// All unordered pairs closer than the viewport-scaled range. O(n²).
///
/// Self-pairs are skipped: they would be zero-length segments.
pub fn find_links(positions: &[Point], viewport: Viewport, cfg: &LinkConfig) -> Vec<Link> {
    let range_sq = link_range_sq(viewport, cfg);
    let mut out = Vec::new();
    for (a, pa) in positions.iter().enumerate() {
        for (offset, pb) in positions[a + 1..].iter().enumerate() {
            let d2 = (*pa - *pb).hypot2();
            if d2 < range_sq {
                out.push(Link {
                    a,
                    b: a + 1 + offset,
                    opacity: connection_opacity(d2, cfg.fade_dist_sq),
                });
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/field/links.rs"]
mod tests;
