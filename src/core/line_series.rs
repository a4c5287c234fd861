use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, DataPoint, XDomain, YDomain};
use crate::error::NarrativeResult;

/// Trend line vertex in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineVertex {
    pub x: f64,
    pub y: f64,
}

/// Projects trend points into one connected polyline.
///
/// Points keep their input order; callers pass them chronologically. An empty
/// input yields an empty polyline and a single point yields a single vertex.
pub fn project_polyline(
    points: &[DataPoint],
    x_domain: XDomain,
    y_domain: YDomain,
    layout: ChartLayout,
) -> NarrativeResult<Vec<LineVertex>> {
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let x_scale = x_domain.scale(layout.plot_width())?;
    let y_scale = y_domain.scale(layout.plot_height())?;

    let mut vertices = Vec::with_capacity(points.len());
    for point in points {
        let (x, y) = layout.to_surface(
            x_scale.domain_to_pixel(point.x)?,
            y_scale.domain_to_pixel(point.y)?,
        );
        vertices.push(LineVertex { x, y });
    }
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::project_polyline;
    use crate::core::primitives::date_to_unix_seconds;
    use crate::core::{ChartLayout, DataPoint, XDomain, YDomain};

    #[test]
    fn vertices_land_inside_the_plot_area() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
        let end = NaiveDate::from_ymd_opt(2020, 1, 3).expect("valid date");
        let layout = ChartLayout::default();
        let points = [
            DataPoint::new(date_to_unix_seconds(start), 0.0),
            DataPoint::new(date_to_unix_seconds(end), 100.0),
        ];

        let vertices = project_polyline(
            &points,
            XDomain::new(start, end),
            YDomain::new(0.0, 100.0).expect("valid"),
            layout,
        )
        .expect("projection");

        assert_eq!(vertices.len(), 2);
        assert_relative_eq!(vertices[0].x, 60.0);
        assert_relative_eq!(vertices[0].y, 420.0);
        assert_relative_eq!(vertices[1].x, 860.0);
        assert_relative_eq!(vertices[1].y, 20.0);
    }

    #[test]
    fn empty_points_project_to_empty_line() {
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
        let vertices = project_polyline(
            &[],
            XDomain::new(day, day),
            YDomain::from_max(0, 10),
            ChartLayout::default(),
        )
        .expect("projection");
        assert!(vertices.is_empty());
    }
}
