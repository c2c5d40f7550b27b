//! Waste Dashboard - monthly waste generation analysis
//!
//! Loads a monthly waste time series, filters it by year range and derives
//! the summary, insights and chart series shown by the dashboard.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use data::{Dataset, Record, YearRange};
pub use pipeline::{build_report, DashboardPipeline, DashboardReport, DatasetSource};
