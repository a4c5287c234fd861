use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, DEFAULT_TICK_COUNT, MAX_TICK_COUNT};
use crate::error::{NarrativeError, NarrativeResult};
use crate::render::Color;
use crate::scene::{CatalogVariant, ControllerOptions};

/// Visual styling shared by every scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrativeStyle {
    pub trend_color: Color,
    pub trend_width_px: f64,
    pub axis_color: Color,
    pub axis_width_px: f64,
    pub tick_size_px: f64,
    pub tick_font_size_px: f64,
    pub axis_title_font_size_px: f64,
    pub annotation_font_size_px: f64,
    pub annotation_color: Color,
    pub title_font_size_px: f64,
}

impl Default for NarrativeStyle {
    fn default() -> Self {
        Self {
            trend_color: Color::STEEL_BLUE,
            trend_width_px: 1.5,
            axis_color: Color::BLACK,
            axis_width_px: 1.0,
            tick_size_px: 6.0,
            tick_font_size_px: 10.0,
            axis_title_font_size_px: 12.0,
            annotation_font_size_px: 12.0,
            annotation_color: Color::rgb(0.2, 0.2, 0.2),
            title_font_size_px: 12.0,
        }
    }
}

impl NarrativeStyle {
    fn validate(self) -> NarrativeResult<Self> {
        self.trend_color.validate()?;
        self.axis_color.validate()?;
        self.annotation_color.validate()?;
        for (name, value) in [
            ("trend_width_px", self.trend_width_px),
            ("axis_width_px", self.axis_width_px),
            ("tick_font_size_px", self.tick_font_size_px),
            ("axis_title_font_size_px", self.axis_title_font_size_px),
            ("annotation_font_size_px", self.annotation_font_size_px),
            ("title_font_size_px", self.title_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(NarrativeError::InvalidConfig(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.tick_size_px.is_finite() || self.tick_size_px < 0.0 {
            return Err(NarrativeError::InvalidConfig(
                "style `tick_size_px` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Narrative bootstrap configuration.
///
/// Serializable so hosts can keep chart setup in a JSON file; every field
/// falls back to the stock 800×400 narrative when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrativeConfig {
    #[serde(default)]
    pub layout: ChartLayout,
    #[serde(default)]
    pub catalog: CatalogVariant,
    #[serde(default)]
    pub style: NarrativeStyle,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: usize,
    #[serde(default = "default_time_tick_spacing_px")]
    pub time_tick_spacing_px: f64,
    #[serde(default = "default_axis_transition_ms")]
    pub axis_transition_ms: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            layout: ChartLayout::default(),
            catalog: CatalogVariant::default(),
            style: NarrativeStyle::default(),
            y_tick_count: default_y_tick_count(),
            time_tick_spacing_px: default_time_tick_spacing_px(),
            axis_transition_ms: default_axis_transition_ms(),
        }
    }
}

impl NarrativeConfig {
    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: CatalogVariant) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: NarrativeStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_y_tick_count(mut self, count: usize) -> Self {
        self.y_tick_count = count;
        self
    }

    /// Sets how long the value axis takes to settle after a rescale.
    #[must_use]
    pub fn with_axis_transition_ms(mut self, millis: u64) -> Self {
        self.axis_transition_ms = millis;
        self
    }

    pub fn validate(self) -> NarrativeResult<Self> {
        self.layout.validate()?;
        self.style.validate()?;
        if self.y_tick_count == 0 || self.y_tick_count > MAX_TICK_COUNT {
            return Err(NarrativeError::InvalidConfig(format!(
                "y_tick_count must be in 1..={MAX_TICK_COUNT}"
            )));
        }
        if !self.time_tick_spacing_px.is_finite() || self.time_tick_spacing_px <= 0.0 {
            return Err(NarrativeError::InvalidConfig(
                "time_tick_spacing_px must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(raw: &str) -> NarrativeResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    pub fn from_path(path: impl AsRef<Path>) -> NarrativeResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| NarrativeError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> NarrativeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            tick_count: self.y_tick_count,
            axis_transition: Duration::from_millis(self.axis_transition_ms),
        }
    }
}

fn default_y_tick_count() -> usize {
    DEFAULT_TICK_COUNT
}

fn default_time_tick_spacing_px() -> f64 {
    80.0
}

fn default_axis_transition_ms() -> u64 {
    750
}
