use rand::rngs::StdRng;

use crate::foundation::core::Viewport;
use crate::render::surface::Surface;
use crate::runtime::host::FrameInput;

/// A particle effect the [`Animator`](crate::Animator) can drive.
///
/// Particles are plain records owned by the animator; the effect only supplies the
/// behaviour. Per tick the animator calls [`Effect::begin_frame`] once, then
/// [`Effect::update`] followed by [`Effect::draw`] for each particle in order, then
/// [`Effect::draw_links`].
pub trait Effect {
    /// Particle record.
    type Particle;
    /// State shared by every particle for one tick.
    type Frame;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Build a complete particle set for `viewport`.
    ///
    /// Failures are handled inside: an effect that cannot populate returns an empty set.
    fn populate(&mut self, viewport: Viewport, rng: &mut StdRng) -> Vec<Self::Particle>;

    /// Derive this tick's shared state from the host input.
    fn begin_frame(&self, input: &FrameInput) -> Self::Frame;

    /// Advance one particle.
    fn update(&self, particle: &mut Self::Particle, frame: &Self::Frame);

    /// Draw one particle.
    fn draw(&self, particle: &Self::Particle, surface: &mut Surface);

    /// Draw anything that depends on the whole, already updated set.
    fn draw_links(
        &self,
        _particles: &[Self::Particle],
        _frame: &Self::Frame,
        _surface: &mut Surface,
    ) {
    }
}
