use serde::{Deserialize, Serialize};

use crate::error::{NarrativeError, NarrativeResult};

/// Size of a drawing area in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot area for axes and titles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    fn validate(self) -> NarrativeResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(NarrativeError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(20.0, 30.0, 50.0, 60.0)
    }
}

/// Plot area plus margins.
///
/// `plot` is the content area the series and annotations are mapped into.
/// Everything in a `RenderFrame` is expressed in surface coordinates, i.e.
/// already offset by `margins.left` / `margins.top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub plot: Viewport,
    pub margins: Margins,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            plot: Viewport::new(800, 400),
            margins: Margins::default(),
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn new(plot: Viewport, margins: Margins) -> Self {
        Self { plot, margins }
    }

    pub fn validate(self) -> NarrativeResult<Self> {
        if !self.plot.is_valid() {
            return Err(NarrativeError::InvalidViewport {
                width: self.plot.width,
                height: self.plot.height,
            });
        }
        self.margins.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        f64::from(self.plot.width)
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        f64::from(self.plot.height)
    }

    /// Full drawing surface, rounded up to whole pixels.
    #[must_use]
    pub fn surface(self) -> Viewport {
        let width = self.plot_width() + self.margins.left + self.margins.right;
        let height = self.plot_height() + self.margins.top + self.margins.bottom;
        Viewport::new(width.ceil() as u32, height.ceil() as u32)
    }

    /// Converts plot-relative coordinates to surface coordinates.
    #[must_use]
    pub fn to_surface(self, x: f64, y: f64) -> (f64, f64) {
        (x + self.margins.left, y + self.margins.top)
    }
}

/// One sample of the trend line: unix seconds on x, case count on y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartLayout, Margins, Viewport};

    #[test]
    fn default_layout_matches_narrative_surface() {
        let layout = ChartLayout::default();
        assert_eq!(layout.plot, Viewport::new(800, 400));
        assert_eq!(layout.margins, Margins::new(20.0, 30.0, 50.0, 60.0));
        assert_eq!(layout.surface(), Viewport::new(890, 470));
        assert_eq!(layout.to_surface(0.0, 0.0), (60.0, 20.0));
    }

    #[test]
    fn layout_rejects_empty_plot() {
        let layout = ChartLayout::new(Viewport::new(0, 400), Margins::default());
        assert!(layout.validate().is_err());
    }
}
