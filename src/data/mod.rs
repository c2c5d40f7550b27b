//! Data module - CSV loading, records and range filtering

mod filter;
mod loader;
mod record;

pub use filter::{FilterOutcome, RangeFilter, YearRange};
pub use loader::{month_number, parse_period, DataLoader, LoaderError, MONTH_NAMES};
pub use record::{Dataset, Record};

#[cfg(test)]
pub(crate) use record::fixtures;
