//! Insight Generator Module
//! Turns the view into short, human-readable observations.

use super::format::{format_number, title_case};
use crate::data::{month_number, Dataset, Record, MONTH_NAMES};

/// Derives the dashboard's observations.
pub struct InsightGenerator;

impl InsightGenerator {
    /// Up to three sentences: peak month, lowest month, and how much the 80%
    /// scenario trims the final accumulation versus business-as-usual.
    pub fn generate(view: &Dataset) -> Vec<String> {
        let records = view.records();
        let (Some(highest), Some(lowest), Some(last)) = (
            Self::highest(records),
            Self::lowest(records),
            view.last(),
        ) else {
            return Vec::new();
        };

        let delta = last.scenario_bau - last.scenario_80;

        vec![
            format!(
                "Peak occurred in {} {} at {} tons.",
                month_label(&highest.month),
                highest.year,
                format_number(highest.amount_generated)
            ),
            format!(
                "Lowest period is {} {} at {} tons.",
                month_label(&lowest.month),
                lowest.year,
                format_number(lowest.amount_generated)
            ),
            format!(
                "The 80% scenario reduces final accumulation by {} tons versus business-as-usual.",
                format_number(delta)
            ),
        ]
    }

    /// First row holding the maximum `amount_generated`.
    pub fn highest(records: &[Record]) -> Option<&Record> {
        records.iter().fold(None, |best, r| match best {
            Some(b) if b.amount_generated >= r.amount_generated => Some(b),
            _ => Some(r),
        })
    }

    /// First row holding the minimum `amount_generated`.
    pub fn lowest(records: &[Record]) -> Option<&Record> {
        records.iter().fold(None, |best, r| match best {
            Some(b) if b.amount_generated <= r.amount_generated => Some(b),
            _ => Some(r),
        })
    }
}

/// Month as written in a sentence: numeric labels become English names,
/// everything else is title-cased.
fn month_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(number) = month_number(trimmed) {
            return MONTH_NAMES[number as usize - 1].to_string();
        }
    }
    title_case(raw)
}
