use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats a case count with comma thousands separators.
///
/// Non-integral values (only seen on near-empty domains) use the shortest
/// round-trip representation.
#[must_use]
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    if value.fract() != 0.0 || value.abs() >= 1e15 {
        return format!("{value}");
    }

    let digits = format!("{}", value.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Year for January ticks, month name otherwise.
#[must_use]
pub fn format_time_tick(date: NaiveDate) -> String {
    if date.month() == 1 {
        return date.year().to_string();
    }
    MONTH_NAMES[date.month0() as usize].to_owned()
}

#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}
