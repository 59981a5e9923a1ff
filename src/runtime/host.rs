use crate::foundation::core::Viewport;
use crate::foundation::error::DriftResult;
use crate::render::frame::FrameRGBA;

/// What the host reports at each display refresh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Current viewport size.
    pub viewport: Viewport,
    /// Vertical scroll offset in pixels.
    pub scroll_offset: f64,
}

impl FrameInput {
    /// Input with a zero scroll offset.
    pub fn at_rest(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_offset: 0.0,
        }
    }
}

/// The environment an [`Animator`](crate::Animator) is mounted into.
pub trait Host {
    /// Wait for the next display refresh. `None` means the host view is gone.
    fn next_frame(&mut self) -> Option<FrameInput>;

    /// Show a finished frame.
    fn present(&mut self, frame: &FrameRGBA) -> DriftResult<()>;
}
