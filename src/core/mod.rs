pub mod line_series;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;
pub mod value_scale;

pub use line_series::{LineVertex, project_polyline};
pub use scale::LinearScale;
pub use time_scale::XDomain;
pub use types::{ChartLayout, DataPoint, Margins, Viewport};
pub use value_scale::{DEFAULT_TICK_COUNT, MAX_TICK_COUNT, YDomain};
