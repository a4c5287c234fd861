mod frame;
mod null_renderer;
mod primitives;
mod svg_backend;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PolylinePrimitive, TextHAlign, TextPrimitive, TextRole,
};
pub use svg_backend::{SvgRenderStats, SvgRenderer};

use crate::error::NarrativeResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from scene and navigation logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> NarrativeResult<()>;
}
