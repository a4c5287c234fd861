use chrono::{Datelike, Months, NaiveDate};

use crate::core::{XDomain, YDomain};

use super::label_format::{format_count, format_short_date, format_time_tick};

const MONTH_INTERVALS: [u32; 5] = [1, 2, 3, 6, 12];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTick {
    pub date: NaiveDate,
    pub label: String,
    /// Year boundary.
    pub major: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueTick {
    pub value: f64,
    pub label: String,
}

/// Month-aligned ticks across `domain`, spaced at least `min_spacing_px` apart.
///
/// Picks the smallest interval from 1, 2, 3, 6 or 12 months that fits. Spans
/// shorter than a month get their start day as a single tick.
#[must_use]
pub fn time_ticks(domain: XDomain, width_px: f64, min_spacing_px: f64) -> Vec<TimeTick> {
    let max_ticks = if width_px.is_finite() && min_spacing_px.is_finite() && min_spacing_px > 0.0
    {
        ((width_px / min_spacing_px).floor() as usize).max(1)
    } else {
        1
    };

    for interval in MONTH_INTERVALS {
        let dates = month_ticks(domain, interval);
        if dates.len() <= max_ticks || interval == 12 {
            if dates.is_empty() {
                break;
            }
            return dates
                .into_iter()
                .map(|date| TimeTick {
                    date,
                    label: format_time_tick(date),
                    major: date.month() == 1,
                })
                .collect();
        }
    }

    vec![TimeTick {
        date: domain.start(),
        label: format_short_date(domain.start()),
        major: false,
    }]
}

fn month_ticks(domain: XDomain, interval: u32) -> Vec<NaiveDate> {
    let Some(mut cursor) = NaiveDate::from_ymd_opt(domain.start().year(), domain.start().month(), 1)
    else {
        return Vec::new();
    };
    if cursor < domain.start() {
        cursor = match cursor.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => return Vec::new(),
        };
    }
    while cursor.month0() % interval != 0 {
        cursor = match cursor.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => return Vec::new(),
        };
    }

    let mut dates = Vec::new();
    while cursor <= domain.end() {
        dates.push(cursor);
        cursor = match cursor.checked_add_months(Months::new(interval)) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

#[must_use]
pub fn value_ticks(domain: YDomain, tick_count: usize) -> Vec<ValueTick> {
    domain
        .ticks(tick_count)
        .into_iter()
        .map(|value| ValueTick {
            value,
            label: format_count(value),
        })
        .collect()
}
