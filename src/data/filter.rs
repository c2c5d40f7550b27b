//! Year range filtering.

use super::record::Dataset;
use serde::Serialize;
use tracing::debug;

/// Inclusive year bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl YearRange {
    pub fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }

    /// Both bounds open.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse raw query values. Anything that is not a plain run of ASCII
    /// digits (surrounding whitespace included) counts as "no bound".
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.and_then(parse_year),
            to: to.and_then(parse_year),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.from.map_or(true, |from| from <= year) && self.to.map_or(true, |to| year <= to)
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Result of applying a range to a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub view: Dataset,
    /// `false` when the bounds were dropped and `view` is the full dataset.
    pub applied: bool,
}

impl FilterOutcome {
    /// Bounds to display after filtering: the requested ones, or none.
    pub fn effective_range(&self, requested: YearRange) -> YearRange {
        if self.applied {
            requested
        } else {
            YearRange::all()
        }
    }
}

/// Restricts a dataset to a year range.
pub struct RangeFilter;

impl RangeFilter {
    /// Keep rows with `from <= year <= to`.
    ///
    /// An interval that matches nothing is not an error: the full dataset
    /// comes back with `applied == false` so the caller can reset its bounds.
    pub fn apply(dataset: &Dataset, range: YearRange) -> FilterOutcome {
        if range.is_unbounded() {
            return FilterOutcome {
                view: dataset.clone(),
                applied: false,
            };
        }

        let view = dataset.retain_view(|r| range.contains(r.year));
        if view.is_empty() {
            debug!(
                from = ?range.from,
                to = ?range.to,
                "year range matched no rows, showing full dataset"
            );
            return FilterOutcome {
                view: dataset.clone(),
                applied: false,
            };
        }

        FilterOutcome {
            view,
            applied: true,
        }
    }
}
