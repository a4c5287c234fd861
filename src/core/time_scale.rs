use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::primitives::date_to_unix_seconds;
use crate::error::{NarrativeError, NarrativeResult};

/// Horizontal time range shared by every scene.
///
/// Fitted once from the full dataset extent and never rescaled, so yearly
/// scenes occupy their own slice of a common time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XDomain {
    start: NaiveDate,
    end: NaiveDate,
}

impl XDomain {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Extent of `dates`, or `None` when there are none.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        let mut dates = dates.into_iter();
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(min, max), date| {
            (min.min(date), max.max(date))
        });
        Some(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(self) -> NaiveDate {
        self.end
    }

    /// Domain bounds in unix seconds.
    ///
    /// A single-day extent is widened by half a day on each side so the scale
    /// stays invertible.
    #[must_use]
    pub fn seconds(self) -> (f64, f64) {
        let start = date_to_unix_seconds(self.start);
        let end = date_to_unix_seconds(self.end);
        if start == end {
            const HALF_DAY: f64 = 43_200.0;
            return (start - HALF_DAY, end + HALF_DAY);
        }
        (start, end)
    }

    pub fn scale(self, width_px: f64) -> NarrativeResult<LinearScale> {
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(NarrativeError::InvalidData(
                "time axis width must be finite and > 0".to_owned(),
            ));
        }
        let (start, end) = self.seconds();
        LinearScale::new(start, end, 0.0, width_px)
    }

    pub fn date_to_pixel(self, date: NaiveDate, width_px: f64) -> NarrativeResult<f64> {
        self.scale(width_px)?
            .domain_to_pixel(date_to_unix_seconds(date))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::XDomain;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn extent_ignores_input_order() {
        let domain = XDomain::from_dates([date(2021, 6, 1), date(2020, 1, 1), date(2022, 1, 1)])
            .expect("non-empty");
        assert_eq!(domain.start(), date(2020, 1, 1));
        assert_eq!(domain.end(), date(2022, 1, 1));
        assert!(XDomain::from_dates([]).is_none());
    }

    #[test]
    fn endpoints_map_to_plot_edges() {
        let domain = XDomain::new(date(2020, 1, 1), date(2020, 1, 11));
        assert_relative_eq!(domain.date_to_pixel(date(2020, 1, 1), 800.0).expect("map"), 0.0);
        assert_relative_eq!(domain.date_to_pixel(date(2020, 1, 6), 800.0).expect("map"), 400.0);
        assert_relative_eq!(domain.date_to_pixel(date(2020, 1, 11), 800.0).expect("map"), 800.0);
    }

    #[test]
    fn single_day_extent_centers_the_day() {
        let domain = XDomain::new(date(2020, 3, 1), date(2020, 3, 1));
        assert_relative_eq!(domain.date_to_pixel(date(2020, 3, 1), 800.0).expect("map"), 400.0);
    }
}
