//! case-narrative: scene-driven narrative chart of daily COVID-19 cases.
//!
//! A fixed list of scenes (one per calendar year plus an optional per-state
//! explorer) is stepped through with previous/next navigation. Each scene is
//! described as a pure `SceneView` and turned into backend-agnostic draw
//! commands, so any renderer can display it.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{Narrative, NarrativeConfig};
pub use error::{NarrativeError, NarrativeResult};
