use crate::core::Viewport;
use crate::error::{NarrativeError, NarrativeResult};
use crate::render::{LinePrimitive, PolylinePrimitive, TextPrimitive, TextRole};

/// Backend-agnostic draw commands for one scene.
///
/// A frame is always built from scratch, so a backend that clears its
/// surface before drawing never shows elements of a previous scene.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            polylines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_polyline(mut self, polyline: PolylinePrimitive) -> Self {
        self.polylines.push(polyline);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn texts_with_role(&self, role: TextRole) -> impl Iterator<Item = &TextPrimitive> {
        self.texts.iter().filter(move |text| text.role == role)
    }

    pub fn validate(&self) -> NarrativeResult<()> {
        if !self.viewport.is_valid() {
            return Err(NarrativeError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }
}
