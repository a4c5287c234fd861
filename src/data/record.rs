use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{NarrativeError, NarrativeResult};

/// Geographic label of a row, usually a U.S. state name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One dataset row. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    pub cases: u64,
    pub region: Region,
}

impl Record {
    #[must_use]
    pub fn new(date: NaiveDate, region: impl Into<Region>, cases: u64) -> Self {
        Self {
            date,
            cases,
            region: region.into(),
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Row shape as it appears in the csv file. Columns other than these are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct RawRecord {
    date: String,
    cases: String,
    state: String,
}

impl RawRecord {
    pub(super) fn parse(self, line: u64) -> NarrativeResult<Record> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|err| {
            NarrativeError::InvalidRecord {
                line,
                reason: format!("date `{}`: {err}", self.date),
            }
        })?;
        let cases = parse_cases(self.cases.trim()).ok_or_else(|| NarrativeError::InvalidRecord {
            line,
            reason: format!("cases `{}` is not a non-negative integer", self.cases),
        })?;

        Ok(Record {
            date,
            cases,
            region: Region::new(self.state.trim()),
        })
    }
}

// Exports sometimes write integral counts as `1234.0`.
fn parse_cases(raw: &str) -> Option<u64> {
    if let Ok(value) = raw.parse::<u64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}
