use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::date_to_unix_seconds;
use crate::core::{DataPoint, XDomain, YDomain};
use crate::data::{Record, Region};

/// One vertex of a scene's trend line in data units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub cases: u64,
}

impl TrendPoint {
    #[must_use]
    pub fn to_point(self) -> DataPoint {
        DataPoint::new(date_to_unix_seconds(self.date), self.cases as f64)
    }
}

impl From<&Record> for TrendPoint {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date,
            cases: record.cases,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationAnchor {
    /// Pinned to the subset's highest case count.
    Peak,
    /// Pinned to the middle row of the subset.
    Midpoint,
}

/// Text label anchored at a data-space position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub date: NaiveDate,
    pub value: f64,
    pub anchor: AnnotationAnchor,
}

/// State of the region selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelector {
    pub options: Vec<Region>,
    pub selected: Option<Region>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SceneFocus {
    Year { year: i32 },
    Region { selector: RegionSelector },
}

/// Everything a backend needs to draw one scene, in data units.
///
/// Built fresh for each render; nothing from a previous scene survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneView {
    pub index: usize,
    pub scene_count: usize,
    pub title: String,
    pub focus: SceneFocus,
    pub trend: Vec<TrendPoint>,
    pub annotation: Option<Annotation>,
    pub x_domain: XDomain,
    pub y_domain: YDomain,
}

impl SceneView {
    #[must_use]
    pub fn trend_points(&self) -> Vec<DataPoint> {
        self.trend.iter().map(|point| point.to_point()).collect()
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self.focus, SceneFocus::Region { .. })
    }
}
