//! Chart Series Module
//! Projects a view into the three dashboard charts. No aggregation happens
//! here; every row becomes one point on each trace.

use crate::data::{Dataset, Record};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Trace colors (hex)
pub const TREND_COLOR: &str = "#0d6efd";
pub const ACCUMULATION_COLOR: &str = "#d9534f";
pub const BAU_COLOR: &str = "#6c757d";
pub const SCENARIO_70_COLOR: &str = "#0d6efd";
pub const SCENARIO_80_COLOR: &str = "#198754";

/// One (period, value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub period: NaiveDate,
    pub value: f64,
}

/// A named line on a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub color: &'static str,
    pub dashed: bool,
    pub markers: bool,
    pub points: Vec<SeriesPoint>,
}

/// Chart metadata plus its traces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace>,
}

impl ChartSeries {
    /// Period axis shared by every trace (taken from the first one).
    pub fn periods(&self) -> Vec<NaiveDate> {
        self.traces
            .first()
            .map(|t| t.points.iter().map(|p| p.period).collect())
            .unwrap_or_default()
    }

    /// (min, max) over all trace values, `None` when there are no points.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.traces
            .iter()
            .flat_map(|t| t.points.iter().map(|p| p.value))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// The three dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSet {
    pub trend: ChartSeries,
    pub accumulation: ChartSeries,
    pub scenario: ChartSeries,
}

impl SeriesSet {
    /// Charts in display order with a file-friendly key.
    pub fn charts(&self) -> [(&'static str, &ChartSeries); 3] {
        [
            ("trend", &self.trend),
            ("accumulation", &self.accumulation),
            ("scenario", &self.scenario),
        ]
    }
}

/// Builds chart series from a view.
pub struct SeriesBuilder;

impl SeriesBuilder {
    pub fn build(view: &Dataset) -> SeriesSet {
        SeriesSet {
            trend: ChartSeries {
                title: "Monthly Waste Trend".to_string(),
                x_label: "Period".to_string(),
                y_label: "Tons of Waste".to_string(),
                traces: vec![Self::trace(
                    view,
                    "Waste generated",
                    TREND_COLOR,
                    false,
                    true,
                    |r| r.amount_generated,
                )],
            },
            accumulation: ChartSeries {
                title: "Waste Accumulation (BAU)".to_string(),
                x_label: "Period".to_string(),
                y_label: "Tons".to_string(),
                traces: vec![Self::trace(
                    view,
                    "Accumulation",
                    ACCUMULATION_COLOR,
                    false,
                    true,
                    |r| r.accumulation,
                )],
            },
            scenario: ChartSeries {
                title: "Policy Scenario Comparison".to_string(),
                x_label: "Period".to_string(),
                y_label: "Tons".to_string(),
                traces: vec![
                    Self::trace(view, "BAU (60%)", BAU_COLOR, true, false, |r| {
                        r.scenario_bau
                    }),
                    Self::trace(view, "Scenario 70%", SCENARIO_70_COLOR, false, true, |r| {
                        r.scenario_70
                    }),
                    Self::trace(view, "Scenario 80%", SCENARIO_80_COLOR, false, true, |r| {
                        r.scenario_80
                    }),
                ],
            },
        }
    }

    fn trace(
        view: &Dataset,
        name: &str,
        color: &'static str,
        dashed: bool,
        markers: bool,
        value: fn(&Record) -> f64,
    ) -> Trace {
        Trace {
            name: name.to_string(),
            color,
            dashed,
            markers,
            points: view
                .records()
                .iter()
                .map(|r| SeriesPoint {
                    period: r.period,
                    value: value(r),
                })
                .collect(),
        }
    }
}

/// Month index used as the x coordinate of a period (`year * 12 + month0`).
pub fn month_index(period: NaiveDate) -> i32 {
    period.year() * 12 + period.month0() as i32
}

/// `YYYY-MM` label for a month index.
pub fn month_index_label(index: i32) -> String {
    format!("{}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

/// Parse `#rrggbb` into components; malformed input yields black.
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(0)
    };
    if hex.len() != 6 {
        return (0, 0, 0);
    }
    (channel(0..2), channel(2..4), channel(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{record, yearly};

    #[test]
    fn test_series_share_period_axis_with_view() {
        let ds = Dataset::from_records((1..=6).map(|m| record(2021, m, m as f64 * 10.0)).collect());
        let series = SeriesBuilder::build(&ds);
        let periods: Vec<NaiveDate> = ds.records().iter().map(|r| r.period).collect();

        for (_, chart) in series.charts() {
            for trace in &chart.traces {
                assert_eq!(trace.points.len(), ds.len());
                let axis: Vec<NaiveDate> = trace.points.iter().map(|p| p.period).collect();
                assert_eq!(axis, periods);
            }
        }
        assert_eq!(series.scenario.traces.len(), 3);
    }

    #[test]
    fn test_values_are_projected_without_aggregation() {
        let ds = yearly(&[100.0, 150.0, 90.0]);
        let series = SeriesBuilder::build(&ds);

        let trend: Vec<f64> = series.trend.traces[0].points.iter().map(|p| p.value).collect();
        assert_eq!(trend, vec![100.0, 150.0, 90.0]);

        let acc: Vec<f64> = series.accumulation.traces[0]
            .points
            .iter()
            .map(|p| p.value)
            .collect();
        let expected: Vec<f64> = ds.records().iter().map(|r| r.accumulation).collect();
        assert_eq!(acc, expected);

        let names: Vec<&str> = series.scenario.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["BAU (60%)", "Scenario 70%", "Scenario 80%"]);
        assert!(series.scenario.traces[0].dashed);
        assert_eq!(series.scenario.traces[2].points[1].value, ds.records()[1].scenario_80);
    }

    #[test]
    fn test_empty_view_yields_empty_series() {
        let series = SeriesBuilder::build(&Dataset::default());
        for (_, chart) in series.charts() {
            assert!(chart.traces.iter().all(|t| t.points.is_empty()));
            assert_eq!(chart.value_bounds(), None);
        }
    }

    #[test]
    fn test_month_index_round_trips_label() {
        let period = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        assert_eq!(month_index_label(month_index(period)), "2023-11");
        assert_eq!(month_index_label(2024 * 12), "2024-01");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#d9534f"), (217, 83, 79));
        assert_eq!(hex_to_rgb("198754"), (25, 135, 84));
        assert_eq!(hex_to_rgb("#abc"), (0, 0, 0));
    }
}
