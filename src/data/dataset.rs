use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::core::XDomain;
use crate::error::{NarrativeError, NarrativeResult};

use super::record::RawRecord;
use super::{Record, Region};

/// Rows in file order plus the distinct regions in first-seen order.
///
/// Loaded once and read-only afterwards; every scene filters from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    regions: IndexSet<Region>,
}

impl Dataset {
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        let regions = records.iter().map(|record| record.region.clone()).collect();
        Self { records, regions }
    }

    /// Loads a csv file with at least `date`, `cases` and `state` columns.
    pub fn load(path: impl AsRef<Path>) -> NarrativeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| NarrativeError::DataLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            records = dataset.len(),
            regions = dataset.regions.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader(mut reader: impl Read) -> NarrativeResult<Self> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input).map_err(csv::Error::from)?;
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(input.as_slice());
        let headers = csv_reader.headers()?.clone();

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let line = row
                .position()
                .map_or(0, |position| record_start_line(&input, position));
            let raw: RawRecord = row.deserialize(Some(&headers))?;
            records.push(raw.parse(line)?);
        }
        debug!(records = records.len(), "parsed csv rows");
        Ok(Self::from_records(records))
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct regions in the order they first appear.
    pub fn regions(&self) -> impl ExactSizeIterator<Item = &Region> {
        self.regions.iter()
    }

    #[must_use]
    pub fn first_region(&self) -> Option<&Region> {
        self.regions.first()
    }

    #[must_use]
    pub fn max_cases(&self) -> Option<u64> {
        self.records.iter().map(|record| record.cases).max()
    }

    #[must_use]
    pub fn date_extent(&self) -> Option<XDomain> {
        XDomain::from_dates(self.records.iter().map(|record| record.date))
    }

    /// Rows dated in `year`, oldest first.
    #[must_use]
    pub fn filter_year(&self, year: i32) -> Vec<&Record> {
        self.chronological(|record| record.year() == year)
    }

    /// Rows labelled `region`, oldest first.
    #[must_use]
    pub fn filter_region(&self, region: &Region) -> Vec<&Record> {
        self.chronological(|record| &record.region == region)
    }

    fn chronological(&self, keep: impl Fn(&Record) -> bool) -> Vec<&Record> {
        let mut rows: Vec<&Record> = self.records.iter().filter(|record| keep(record)).collect();
        // Stable sort keeps file order for same-day rows.
        rows.sort_by_key(|record| record.date);
        rows
    }
}

/// First row holding the largest case count.
#[must_use]
pub fn peak_record<'a>(rows: &[&'a Record]) -> Option<&'a Record> {
    rows.iter()
        .copied()
        .reduce(|best, record| if record.cases > best.cases { record } else { best })
}

/// 1-based line of the first byte of a record.
///
/// The reader stamps a record with the position where it started scanning,
/// which lands on any blank lines skipped before the record.
fn record_start_line(input: &[u8], position: &csv::Position) -> u64 {
    let start = usize::try_from(position.byte()).map_or(input.len(), |byte| byte.min(input.len()));
    let skipped = input[start..]
        .iter()
        .take_while(|byte| matches!(byte, b'\r' | b'\n'))
        .filter(|&&byte| byte == b'\n')
        .count();
    position.line() + skipped as u64
}
