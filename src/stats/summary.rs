//! Summary Statistics Module
//! Aggregates over the (possibly filtered) waste series.

use super::format::{format_tons, format_tons_per_month};
use crate::data::Dataset;
use serde::Serialize;
use statrs::statistics;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    #[error("Cannot summarize an empty dataset")]
    EmptyDataset,
}

/// A figure with its display form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryValue {
    pub display: String,
    pub value: f64,
}

/// Dashboard headline figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    /// `"{first year} - {last year}"`
    pub period_label: String,
    pub total_generated: SummaryValue,
    pub mean_handled: SummaryValue,
    pub remaining_last: SummaryValue,
    pub accumulation_last: SummaryValue,
}

/// Computes the headline figures for a view.
pub struct Summarizer;

impl Summarizer {
    pub fn summarize(view: &Dataset) -> Result<SummaryResult, SummaryError> {
        let last = view.last().ok_or(SummaryError::EmptyDataset)?;
        let records = view.records();

        let total: f64 = records.iter().map(|r| r.amount_generated).sum();
        let mean_handled =
            statistics::Statistics::mean(records.iter().map(|r| r.amount_handled_estimate));

        let min_year = records.iter().map(|r| r.year).min().unwrap_or(last.year);
        let max_year = records.iter().map(|r| r.year).max().unwrap_or(last.year);

        Ok(SummaryResult {
            period_label: format!("{} - {}", min_year, max_year),
            total_generated: SummaryValue {
                display: format_tons(total),
                value: total,
            },
            mean_handled: SummaryValue {
                display: format_tons_per_month(mean_handled),
                value: mean_handled,
            },
            remaining_last: SummaryValue {
                display: format_tons(last.amount_remaining),
                value: last.amount_remaining,
            },
            accumulation_last: SummaryValue {
                display: format_tons(last.accumulation),
                value: last.accumulation,
            },
        })
    }
}
