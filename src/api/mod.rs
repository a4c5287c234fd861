//! Host-facing narrative facade, configuration and frame building.

mod axis_ticks;
mod label_format;
mod narrative;
mod narrative_config;
mod scene_frame_builder;

pub use axis_ticks::{TimeTick, ValueTick, time_ticks, value_ticks};
pub use label_format::{format_count, format_time_tick};
pub use narrative::Narrative;
pub use narrative_config::{NarrativeConfig, NarrativeStyle};
pub use scene_frame_builder::build_scene_frame;
