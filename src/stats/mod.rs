//! Stats module - summary figures, insights and display formatting

pub mod format;
mod insights;
mod summary;

pub use insights::InsightGenerator;
pub use summary::{SummaryError, SummaryResult, SummaryValue, Summarizer};
