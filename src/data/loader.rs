//! CSV Data Loader Module
//! Reads the waste series with Polars and normalizes it into typed records.

use super::record::{Dataset, Record};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoaderError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
    #[error("Unknown month: {0}")]
    UnknownMonth(String),
}

// Accepted headers per field, matched case-insensitively. The second entry
// is the header used by the Bandung simulation export.
const YEAR_COLUMN: &[&str] = &["year", "tahun"];
const MONTH_COLUMN: &[&str] = &["month", "bulan"];
const PERIOD_COLUMN: &[&str] = &["period", "tanggal"];
const GENERATED_COLUMN: &[&str] = &["amount_generated", "jumlah_sampah"];
const HANDLED_COLUMN: &[&str] = &["amount_handled_estimate", "penanganan_estimasi"];
const REMAINING_COLUMN: &[&str] = &["amount_remaining", "sisa_sampah"];
const ACCUMULATION_COLUMN: &[&str] = &["accumulation", "akumulasi"];
const BAU_COLUMN: &[&str] = &["scenario_bau", "skn_bau"];
const S70_COLUMN: &[&str] = &["scenario_70", "skn_70"];
const S80_COLUMN: &[&str] = &["scenario_80", "skn_80"];

/// English month names, used as labels when the source only has a period column.
pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const INDONESIAN_MONTHS: [&str; 12] = [
    "JANUARI", "FEBRUARI", "MARET", "APRIL", "MEI", "JUNI", "JULI", "AGUSTUS", "SEPTEMBER",
    "OKTOBER", "NOVEMBER", "DESEMBER",
];

/// Upper-cased month label -> month number.
static MONTHS: LazyLock<HashMap<String, u32>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (idx, name) in INDONESIAN_MONTHS.iter().enumerate() {
        map.insert(name.to_string(), idx as u32 + 1);
    }
    for (idx, name) in MONTH_NAMES.iter().enumerate() {
        let number = idx as u32 + 1;
        map.insert(name.to_uppercase(), number);
        map.insert(name[..3].to_uppercase(), number);
        map.insert(number.to_string(), number);
        map.insert(format!("{:02}", number), number);
    }
    map
});

/// Look up a month label (case-insensitive).
pub fn month_number(label: &str) -> Option<u32> {
    MONTHS.get(&label.trim().to_uppercase()).copied()
}

/// Handles CSV loading and period normalization.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and return its rows sorted by period.
    pub fn load_csv(file_path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
        let file_path = file_path.as_ref();
        if !file_path.is_file() {
            return Err(LoaderError::DataUnavailable(format!(
                "{} not found",
                file_path.display()
            )));
        }

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| {
                LoaderError::DataUnavailable(format!("{}: {}", file_path.display(), e))
            })?;

        let dataset = Self::from_dataframe(&df)?;

        match (dataset.first(), dataset.last()) {
            (Some(first), Some(last)) => info!(
                path = %file_path.display(),
                rows = dataset.len(),
                "loaded waste series {} - {}",
                first.year,
                last.year
            ),
            _ => warn!(path = %file_path.display(), "waste series has no rows"),
        }

        Ok(dataset)
    }

    /// Convert an already-read DataFrame into a sorted dataset.
    pub fn from_dataframe(df: &DataFrame) -> Result<Dataset, LoaderError> {
        let height = df.height();

        let generated = Self::numeric_values(df, "amount_generated", GENERATED_COLUMN)?;
        let handled = Self::numeric_values(df, "amount_handled_estimate", HANDLED_COLUMN)?;
        let remaining = Self::numeric_values(df, "amount_remaining", REMAINING_COLUMN)?;
        let accumulation = Self::numeric_values(df, "accumulation", ACCUMULATION_COLUMN)?;
        let bau = Self::numeric_values(df, "scenario_bau", BAU_COLUMN)?;
        let s70 = Self::numeric_values(df, "scenario_70", S70_COLUMN)?;
        let s80 = Self::numeric_values(df, "scenario_80", S80_COLUMN)?;

        let years = Self::year_values(df)?;
        let months = Self::string_values(df, MONTH_COLUMN)?;
        let periods = Self::string_values(df, PERIOD_COLUMN)?;

        if periods.is_none() && (years.is_none() || months.is_none()) {
            return Err(LoaderError::DataUnavailable(
                "either a period column or both year and month columns are required".to_string(),
            ));
        }

        let mut records = Vec::with_capacity(height);
        for row in 0..height {
            let year = years.as_ref().map(|values| values[row]);
            let month = months.as_ref().map(|values| values[row].as_deref());

            let (period, month_label) = match &periods {
                Some(values) => {
                    let raw = values[row]
                        .as_deref()
                        .ok_or_else(|| missing_value("period", row))?;
                    let period = parse_period(raw).ok_or_else(|| {
                        LoaderError::DataUnavailable(format!(
                            "row {}: unrecognised period '{}'",
                            row + 1,
                            raw
                        ))
                    })?;
                    let label = match month {
                        Some(Some(label)) => label.to_string(),
                        _ => MONTH_NAMES[period.month0() as usize].to_string(),
                    };
                    (period, label)
                }
                None => {
                    let year = year.ok_or_else(|| missing_value("year", row))?;
                    let label = month
                        .flatten()
                        .ok_or_else(|| missing_value("month", row))?;
                    let number = month_number(label)
                        .ok_or_else(|| LoaderError::UnknownMonth(label.to_string()))?;
                    let period = NaiveDate::from_ymd_opt(year, number, 1).ok_or_else(|| {
                        LoaderError::DataUnavailable(format!(
                            "row {}: invalid date {}-{}",
                            row + 1,
                            year,
                            number
                        ))
                    })?;
                    (period, label.to_string())
                }
            };

            let year = match year {
                Some(year) if year != period.year() => {
                    return Err(LoaderError::DataUnavailable(format!(
                        "row {}: year {} does not match period {}",
                        row + 1,
                        year,
                        period
                    )));
                }
                Some(year) => year,
                None => period.year(),
            };

            records.push(Record {
                year,
                month: month_label,
                period,
                amount_generated: generated[row],
                amount_handled_estimate: handled[row],
                amount_remaining: remaining[row],
                accumulation: accumulation[row],
                scenario_bau: bau[row],
                scenario_70: s70[row],
                scenario_80: s80[row],
            });
        }

        let dataset = Dataset::from_records(records);

        let duplicates = dataset
            .records()
            .windows(2)
            .filter(|pair| pair[0].period == pair[1].period)
            .count();
        if duplicates > 0 {
            warn!(duplicates, "dataset contains repeated periods");
        }
        debug!(rows = dataset.len(), "normalized waste series");

        Ok(dataset)
    }

    fn find_column<'a>(df: &'a DataFrame, aliases: &[&str]) -> Option<&'a Column> {
        df.get_columns().iter().find(|col| {
            let name = col.name().as_str().trim();
            aliases.iter().any(|alias| name.eq_ignore_ascii_case(alias))
        })
    }

    /// Required numeric column as finite, non-negative floats.
    fn numeric_values(
        df: &DataFrame,
        field: &str,
        aliases: &[&str],
    ) -> Result<Vec<f64>, LoaderError> {
        let column = Self::find_column(df, aliases).ok_or_else(|| {
            LoaderError::DataUnavailable(format!("missing required column '{}'", field))
        })?;
        let value_f64 = column.cast(&DataType::Float64).map_err(|e| polars_error(field, e))?;
        let value_ca = value_f64.f64().map_err(|e| polars_error(field, e))?;

        value_ca
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
                Some(v) => Err(LoaderError::DataUnavailable(format!(
                    "column '{}' row {}: invalid value {}",
                    field,
                    row + 1,
                    v
                ))),
                None => Err(missing_value(field, row)),
            })
            .collect()
    }

    /// Optional year column.
    fn year_values(df: &DataFrame) -> Result<Option<Vec<i32>>, LoaderError> {
        let Some(column) = Self::find_column(df, YEAR_COLUMN) else {
            return Ok(None);
        };
        let year_i64 = column.cast(&DataType::Int64).map_err(|e| polars_error("year", e))?;
        let year_ca = year_i64.i64().map_err(|e| polars_error("year", e))?;

        year_ca
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| missing_value("year", row))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Optional text column, nulls kept as `None`.
    fn string_values(
        df: &DataFrame,
        aliases: &[&str],
    ) -> Result<Option<Vec<Option<String>>>, LoaderError> {
        let Some(column) = Self::find_column(df, aliases) else {
            return Ok(None);
        };
        let field = aliases[0];
        let text = column.cast(&DataType::String).map_err(|e| polars_error(field, e))?;
        let text_ca = text.str().map_err(|e| polars_error(field, e))?;

        Ok(Some(
            text_ca
                .into_iter()
                .map(|v| v.map(|s| s.trim_matches('"').trim().to_string()))
                .collect(),
        ))
    }
}

/// Parse a period string and normalize it to the first of its month.
///
/// Accepts `YYYY-MM-DD` optionally followed by a time part, and `YYYY-MM`.
/// Month and day need not be zero-padded.
pub fn parse_period(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split([' ', 'T']).next()?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", date_part), "%Y-%m-%d"))
        .ok()?;
    date.with_day(1)
}

fn missing_value(field: &str, row: usize) -> LoaderError {
    LoaderError::DataUnavailable(format!("column '{}' row {}: missing value", field, row + 1))
}

fn polars_error(field: &str, err: PolarsError) -> LoaderError {
    LoaderError::DataUnavailable(format!("column '{}': {}", field, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indonesian_frame(months: &[&str]) -> DataFrame {
        let n = months.len();
        let years: Vec<i64> = vec![2021; n];
        let values: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        df!(
            "tahun" => years,
            "bulan" => months.to_vec(),
            "jumlah_sampah" => values.clone(),
            "penanganan_estimasi" => values.clone(),
            "sisa_sampah" => values.clone(),
            "akumulasi" => values.clone(),
            "skn_BAU" => values.clone(),
            "skn_70" => values.clone(),
            "skn_80" => values
        )
        .unwrap()
    }

    #[test]
    fn test_month_lookup_is_case_insensitive() {
        assert_eq!(month_number("januari"), Some(1));
        assert_eq!(month_number("MEI"), Some(5));
        assert_eq!(month_number(" Desember "), Some(12));
        assert_eq!(month_number("march"), Some(3));
        assert_eq!(month_number("Oct"), Some(10));
        assert_eq!(month_number("07"), Some(7));
        assert_eq!(month_number("12"), Some(12));
        assert_eq!(month_number("Smarch"), None);
        assert_eq!(month_number("13"), None);
    }

    #[test]
    fn test_parse_period_normalizes_to_first_of_month() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 1);
        assert_eq!(parse_period("2021-03-15"), expected);
        assert_eq!(parse_period("2021-03-01 00:00:00"), expected);
        assert_eq!(parse_period("2021-03-20T12:30:00"), expected);
        assert_eq!(parse_period("2021-03"), expected);
        assert_eq!(parse_period("March 2021"), None);
    }

    #[test]
    fn test_parse_period_accepts_unpadded_parts() {
        let may = NaiveDate::from_ymd_opt(2021, 5, 1);
        assert_eq!(parse_period("2021-5-1"), may);
        assert_eq!(parse_period("2021-5-17 08:00:00"), may);
        assert_eq!(parse_period("2021-5"), may);
        assert_eq!(parse_period("2021-13-1"), None);
    }

    #[test]
    fn test_reconstructs_period_from_year_and_month_names() {
        let df = indonesian_frame(&["MARET", "januari", "Februari"]);
        let ds = DataLoader::from_dataframe(&df).unwrap();

        let months: Vec<u32> = ds.records().iter().map(|r| r.month_number()).collect();
        assert_eq!(months, vec![1, 2, 3]);
        assert!(ds.records().windows(2).all(|w| w[0].period < w[1].period));
        // Labels are kept as written in the source.
        assert_eq!(ds.records()[0].month, "januari");
        assert_eq!(ds.records()[2].amount_generated, 100.0);
    }

    #[test]
    fn test_unknown_month_is_reported() {
        let df = indonesian_frame(&["JANUARI", "BRUMAIRE"]);
        let err = DataLoader::from_dataframe(&df).unwrap_err();
        assert_eq!(err, LoaderError::UnknownMonth("BRUMAIRE".to_string()));
    }

    #[test]
    fn test_direct_period_column_wins_over_month_names() {
        let df = df!(
            "period" => ["2020-02-01", "2020-01-01"],
            "amount_generated" => [10.0, 20.0],
            "amount_handled_estimate" => [1.0, 2.0],
            "amount_remaining" => [1.0, 2.0],
            "accumulation" => [1.0, 3.0],
            "scenario_bau" => [1.0, 3.0],
            "scenario_70" => [1.0, 2.0],
            "scenario_80" => [1.0, 1.5]
        )
        .unwrap();
        let ds = DataLoader::from_dataframe(&df).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].year, 2020);
        assert_eq!(ds.records()[0].month, "January");
        assert_eq!(ds.records()[0].amount_generated, 20.0);
    }

    #[test]
    fn test_missing_required_column_is_data_unavailable() {
        let df = df!(
            "tahun" => [2020i64],
            "bulan" => ["JANUARI"],
            "jumlah_sampah" => [1.0]
        )
        .unwrap();
        let err = DataLoader::from_dataframe(&df).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::DataUnavailable(msg) if msg.contains("amount_handled_estimate")
        ));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let df = df!(
            "year" => [2020i64],
            "month" => ["January"],
            "amount_generated" => [-5.0],
            "amount_handled_estimate" => [1.0],
            "amount_remaining" => [1.0],
            "accumulation" => [1.0],
            "scenario_bau" => [1.0],
            "scenario_70" => [1.0],
            "scenario_80" => [1.0]
        )
        .unwrap();
        let err = DataLoader::from_dataframe(&df).unwrap_err();
        assert!(matches!(err, LoaderError::DataUnavailable(_)));
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let err = DataLoader::load_csv("/nonexistent/waste.csv").unwrap_err();
        assert!(matches!(err, LoaderError::DataUnavailable(_)));
    }
}
