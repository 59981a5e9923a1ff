use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::foundation::core::Viewport;
use crate::foundation::error::DriftResult;
use crate::render::frame::FrameRGBA;
use crate::render::surface::Surface;
use crate::runtime::cancel::CancelToken;
use crate::runtime::effect::Effect;
use crate::runtime::host::{FrameInput, Host};

/// Counters reported by [`Animator::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames handed to the host.
    pub frames_presented: u64,
    /// Particle set rebuilds triggered by viewport changes.
    pub rebuilds: u64,
}

/// Owns an effect, its particle set and its surface, and drives them one tick at a time.
///
/// The animator never reports rendering failures to the host: when no surface can be made
/// for the viewport it simply stays inert until a usable resize arrives.
pub struct Animator<E: Effect> {
    effect: E,
    viewport: Viewport,
    particles: Option<Vec<E::Particle>>,
    surface: Option<Surface>,
    rng: StdRng,
    cancel: CancelToken,
}

impl<E: Effect> Animator<E> {
    /// Mount `effect` onto a surface sized to `viewport` and spawn its particles.
    pub fn mount(effect: E, viewport: Viewport, seed: u64) -> Self {
        let mut animator = Self {
            effect,
            viewport,
            particles: None,
            surface: None,
            rng: StdRng::seed_from_u64(seed),
            cancel: CancelToken::new(),
        };
        animator.rebuild(viewport);
        animator
    }

    /// The driven effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Viewport of the current particle set.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current particles; empty before initialization and after cancellation.
    pub fn particles(&self) -> &[E::Particle] {
        self.particles.as_deref().unwrap_or(&[])
    }

    /// Whether a surface and particle set exist.
    pub fn is_initialized(&self) -> bool {
        self.surface.is_some() && self.particles.is_some()
    }

    /// Handle that stops this animator from anywhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Whether the loop was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop ticking and release the particles and surface. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if self.cancel.cancel() {
            tracing::debug!(effect = self.effect.name(), "animator cancelled");
        }
        self.release();
    }

    /// Resize the surface and replace the particle set wholesale.
    ///
    /// Ignored after cancellation.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.rebuild(viewport);
    }

    /// Run one frame: clear, update then draw each particle, draw links, read back.
    ///
    /// Returns `None` when cancelled or inert.
    pub fn tick(&mut self, scroll_offset: f64) -> Option<FrameRGBA> {
        if self.cancel.is_cancelled() {
            self.release();
            return None;
        }
        let (Some(surface), Some(particles)) = (self.surface.as_mut(), self.particles.as_mut())
        else {
            return None;
        };

        let input = FrameInput {
            viewport: self.viewport,
            scroll_offset,
        };
        let frame = self.effect.begin_frame(&input);

        surface.clear();
        for p in particles.iter_mut() {
            self.effect.update(p, &frame);
            self.effect.draw(p, surface);
        }
        self.effect.draw_links(particles, &frame, surface);
        Some(surface.finish())
    }

    /// Tick once per host frame until the host goes away or the loop is cancelled.
    ///
    /// A viewport change reported by the host rebuilds before that frame is drawn.
    pub fn run<H: Host + ?Sized>(&mut self, host: &mut H) -> DriftResult<RunStats> {
        let mut stats = RunStats::default();
        while !self.cancel.is_cancelled() {
            let Some(input) = host.next_frame() else {
                break;
            };
            if input.viewport != self.viewport {
                self.resize(input.viewport);
                stats.rebuilds += 1;
            }
            if let Some(frame) = self.tick(input.scroll_offset) {
                host.present(&frame)?;
                stats.frames_presented += 1;
            }
        }
        tracing::debug!(
            effect = self.effect.name(),
            frames = stats.frames_presented,
            rebuilds = stats.rebuilds,
            "frame loop finished"
        );
        Ok(stats)
    }

    fn rebuild(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let surface = match Surface::new(viewport) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, effect = self.effect.name(), "no surface, effect idle");
                self.release();
                return;
            }
        };
        let next = self.effect.populate(viewport, &mut self.rng);
        tracing::debug!(
            effect = self.effect.name(),
            width = viewport.width,
            height = viewport.height,
            count = next.len(),
            "particle set rebuilt"
        );
        // The new set is complete before it becomes visible to `tick`.
        self.particles = Some(next);
        self.surface = Some(surface);
    }

    fn release(&mut self) {
        self.particles = None;
        self.surface = None;
    }
}

impl<E: Effect> Drop for Animator<E> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/driver.rs"]
mod tests;
