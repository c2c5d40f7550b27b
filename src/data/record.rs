//! Record and Dataset types
//! One row per month of the waste generation series.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One month of the waste series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub year: i32,
    /// Month label as found in the source (e.g. "MARET", "March", "3").
    pub month: String,
    /// First day of the month this row covers.
    pub period: NaiveDate,
    /// Tons of waste generated in the month.
    pub amount_generated: f64,
    pub amount_handled_estimate: f64,
    pub amount_remaining: f64,
    /// Running total of unhandled waste under business-as-usual.
    pub accumulation: f64,
    pub scenario_bau: f64,
    pub scenario_70: f64,
    pub scenario_80: f64,
}

impl Record {
    /// Calendar month number of the period (1-12).
    pub fn month_number(&self) -> u32 {
        self.period.month()
    }
}

/// Chronologically ordered, read-only sequence of records.
///
/// Only the loader and the range filter construct datasets; everything
/// downstream borrows them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, sorting rows by period. The sort is stable so
    /// duplicate periods keep their source order.
    pub(crate) fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.period);
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Chronologically last row.
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// The most recent `n` rows, oldest first.
    pub fn tail(&self, n: usize) -> &[Record] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Copy of the rows matching `keep`, preserving order.
    pub(crate) fn retain_view<F>(&self, keep: F) -> Self
    where
        F: Fn(&Record) -> bool,
    {
        Self {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::data::MONTH_NAMES;

    /// Record for `year`/`month` with every scenario column derived from `generated`.
    pub fn record(year: i32, month: u32, generated: f64) -> Record {
        Record {
            year,
            month: MONTH_NAMES[month as usize - 1].to_string(),
            period: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            amount_generated: generated,
            amount_handled_estimate: generated * 0.6,
            amount_remaining: generated * 0.4,
            accumulation: generated * 0.4,
            scenario_bau: generated * 0.4,
            scenario_70: generated * 0.3,
            scenario_80: generated * 0.2,
        }
    }

    /// One row per year (January) for 2020-2022 with the given generated amounts.
    pub fn yearly(amounts: &[f64]) -> Dataset {
        let records = amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| record(2020 + i as i32, 1, a))
            .collect();
        Dataset::from_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn test_from_records_sorts_by_period() {
        let ds = Dataset::from_records(vec![
            record(2021, 3, 10.0),
            record(2020, 12, 20.0),
            record(2021, 1, 30.0),
        ]);
        let periods: Vec<_> = ds.records().iter().map(|r| r.period).collect();
        assert!(periods.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ds.first().unwrap().year, 2020);
    }

    #[test]
    fn test_years_are_unique_and_sorted() {
        let ds = Dataset::from_records(vec![
            record(2022, 1, 1.0),
            record(2020, 5, 1.0),
            record(2020, 6, 1.0),
        ]);
        assert_eq!(ds.years(), vec![2020, 2022]);
    }

    #[test]
    fn test_tail_returns_latest_rows() {
        let ds = Dataset::from_records((1..=12).map(|m| record(2020, m, m as f64)).collect());
        let tail = ds.tail(3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].month_number(), 10);
        assert_eq!(tail[2].month_number(), 12);
        assert_eq!(ds.tail(100).len(), 12);
    }
}
