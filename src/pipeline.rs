//! Dashboard Pipeline
//! Loader -> RangeFilter -> {Summarizer, InsightGenerator, SeriesBuilder}.
//!
//! Every run builds its own filtered view. The only state kept between runs
//! is the immutable base dataset inside `DatasetSource`.

use crate::charts::{SeriesBuilder, SeriesSet};
use crate::data::{DataLoader, Dataset, LoaderError, RangeFilter, Record, YearRange};
use crate::stats::{InsightGenerator, SummaryError, SummaryResult, Summarizer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::debug;

/// Rows shown in the table preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 24;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Everything the dashboard renders for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Years available in the full dataset, for the range selectors.
    pub years: Vec<i32>,
    /// Bounds actually in effect (cleared when the request matched nothing).
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub filter_applied: bool,
    pub summary: SummaryResult,
    pub insights: Vec<String>,
    pub series: SeriesSet,
    /// Most recent rows of the view, oldest first.
    pub preview: Vec<Record>,
}

/// Lazily loaded, read-only base dataset.
#[derive(Debug)]
pub struct DatasetSource {
    path: PathBuf,
    cache: OnceLock<Arc<Dataset>>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceLock::new(),
        }
    }

    /// Wrap an already-loaded dataset.
    pub fn from_dataset(path: impl Into<PathBuf>, dataset: Dataset) -> Self {
        let cache = OnceLock::new();
        let _ = cache.set(Arc::new(dataset));
        Self {
            path: path.into(),
            cache,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The base dataset, reading the file on first use.
    ///
    /// A failed read is not cached, so the next call tries again.
    pub fn get(&self) -> Result<Arc<Dataset>, LoaderError> {
        if let Some(dataset) = self.cache.get() {
            return Ok(Arc::clone(dataset));
        }

        let loaded = Arc::new(DataLoader::load_csv(&self.path)?);
        // Another thread may have won the race; either copy is identical.
        Ok(Arc::clone(self.cache.get_or_init(|| loaded)))
    }
}

/// Explicit pipeline object: a dataset source plus presentation settings.
#[derive(Debug)]
pub struct DashboardPipeline {
    source: DatasetSource,
    preview_rows: usize,
}

impl DashboardPipeline {
    pub fn new(source: DatasetSource, preview_rows: usize) -> Self {
        Self {
            source,
            preview_rows,
        }
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn dataset(&self) -> Result<Arc<Dataset>, LoaderError> {
        self.source.get()
    }

    /// Run the full pipeline for one year-range request.
    pub fn run(&self, range: YearRange) -> Result<DashboardReport, PipelineError> {
        let dataset = self.source.get()?;
        build_report(&dataset, range, self.preview_rows)
    }
}

/// Filter `dataset` and derive every dashboard output from the view.
pub fn build_report(
    dataset: &Dataset,
    range: YearRange,
    preview_rows: usize,
) -> Result<DashboardReport, PipelineError> {
    let outcome = RangeFilter::apply(dataset, range);
    let effective = outcome.effective_range(range);
    let view = &outcome.view;

    let summary = Summarizer::summarize(view)?;
    let insights = InsightGenerator::generate(view);
    let series = SeriesBuilder::build(view);

    debug!(
        rows = view.len(),
        applied = outcome.applied,
        "built dashboard report"
    );

    Ok(DashboardReport {
        years: dataset.years(),
        year_from: effective.from,
        year_to: effective.to,
        filter_applied: outcome.applied,
        summary,
        insights,
        series,
        preview: view.tail(preview_rows).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{record, yearly};

    #[test]
    fn test_report_for_full_range() {
        let report = build_report(&yearly(&[100.0, 150.0, 90.0]), YearRange::all(), 24).unwrap();

        assert_eq!(report.years, vec![2020, 2021, 2022]);
        assert!(!report.filter_applied);
        assert_eq!(report.summary.total_generated.value, 340.0);
        assert!(report.insights[0].contains("2021"));
        assert_eq!(report.series.trend.traces[0].points.len(), 3);
        assert_eq!(report.preview.len(), 3);
    }

    #[test]
    fn test_report_resets_bounds_when_nothing_matches() {
        let ds = yearly(&[100.0, 150.0, 90.0]);
        let report = build_report(&ds, YearRange::new(Some(2025), Some(2025)), 24).unwrap();

        assert!(!report.filter_applied);
        assert_eq!(report.year_from, None);
        assert_eq!(report.year_to, None);
        assert_eq!(report.summary.period_label, "2020 - 2022");
    }

    #[test]
    fn test_report_keeps_applied_bounds() {
        let ds = yearly(&[100.0, 150.0, 90.0]);
        let report = build_report(&ds, YearRange::new(Some(2021), None), 24).unwrap();

        assert!(report.filter_applied);
        assert_eq!(report.year_from, Some(2021));
        assert_eq!(report.summary.total_generated.value, 240.0);
        // Selectors still list every year.
        assert_eq!(report.years, vec![2020, 2021, 2022]);
    }

    #[test]
    fn test_preview_is_capped() {
        let ds = Dataset::from_records(
            (2020..=2022)
                .flat_map(|y| (1..=12).map(move |m| record(y, m, 1.0)))
                .collect(),
        );
        let report = build_report(&ds, YearRange::all(), DEFAULT_PREVIEW_ROWS).unwrap();
        assert_eq!(report.preview.len(), 24);
        assert_eq!(report.preview.last().unwrap().period, ds.last().unwrap().period);
        assert!(report.preview.windows(2).all(|w| w[0].period < w[1].period));
    }

    #[test]
    fn test_empty_dataset_surfaces_summary_error() {
        let err = build_report(&Dataset::default(), YearRange::all(), 24).unwrap_err();
        assert_eq!(err, PipelineError::Summary(SummaryError::EmptyDataset));
    }

    #[test]
    fn test_source_serves_cached_dataset() {
        let source = DatasetSource::from_dataset("unused.csv", yearly(&[1.0, 2.0]));
        let first = source.get().unwrap();
        let second = source.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let pipeline = DashboardPipeline::new(source, 24);
        let report = pipeline.run(YearRange::new(Some(2021), Some(2021))).unwrap();
        assert_eq!(report.preview.len(), 1);
    }

    #[test]
    fn test_missing_file_is_reported_and_not_cached() {
        let pipeline =
            DashboardPipeline::new(DatasetSource::new("/nonexistent/waste.csv"), 24);
        let err = pipeline.run(YearRange::all()).unwrap_err();
        assert!(matches!(err, PipelineError::Loader(LoaderError::DataUnavailable(_))));
        assert!(pipeline.dataset().is_err());
    }
}
