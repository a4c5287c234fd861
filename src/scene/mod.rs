//! Scene catalog, navigation state machine and pure scene views.

mod catalog;
mod controller;
mod transition;
mod view;

pub use catalog::{CatalogVariant, SceneCatalog, SceneKind, YearScene};
pub use controller::{ControllerOptions, SceneChange, SceneController};
pub use transition::{AxisTransition, ease_cubic_in_out};
pub use view::{Annotation, AnnotationAnchor, RegionSelector, SceneFocus, SceneView, TrendPoint};
