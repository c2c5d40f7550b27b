//! Static Chart Renderer
//! Draws chart series to PNG with plotters, for export outside the app.
//!
//! Layout per chart:
//! 1. Title centered at the top
//! 2. Line plot with `YYYY-MM` x labels and thousands-grouped y labels
//! 3. Legend in the upper-left corner (multi-trace charts only)

use super::series::{hex_to_rgb, month_index, month_index_label, ChartSeries, SeriesSet};
use crate::stats::format::format_number;
use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use rayon::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

const LINE_WIDTH: u32 = 2;
const MARKER_RADIUS: i32 = 3;

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render one chart to in-memory PNG bytes.
    pub fn render_png(series: &ChartSeries, width: u32, height: u32) -> Result<Vec<u8>> {
        let mut buffer = vec![255u8; (width as usize) * (height as usize) * 3];
        Self::draw(series, &mut buffer, width, height)
            .with_context(|| format!("drawing chart '{}'", series.title))?;

        let img = RgbImage::from_raw(width, height, buffer)
            .context("chart buffer does not match image size")?;
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .context("encoding chart PNG")?;
        Ok(png)
    }

    /// Render the three dashboard charts into `dir`, one file each.
    pub fn export_all(
        series: &SeriesSet,
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating export directory {}", dir.display()))?;

        let paths = series
            .charts()
            .par_iter()
            .map(|(key, chart)| {
                let png = Self::render_png(chart, width, height)?;
                let path = dir.join(format!("{}.png", key));
                std::fs::write(&path, png)
                    .with_context(|| format!("writing {}", path.display()))?;
                Ok(path)
            })
            .collect::<Result<Vec<_>>>()?;

        info!(count = paths.len(), dir = %dir.display(), "exported chart images");
        Ok(paths)
    }

    /// X range in month indices; a single month is widened so the axis has extent.
    pub fn x_range(series: &ChartSeries) -> std::ops::Range<i32> {
        let periods = series.periods();
        match (periods.first(), periods.last()) {
            (Some(first), Some(last)) => {
                let (lo, hi) = (month_index(*first), month_index(*last));
                if lo == hi {
                    (lo - 1)..(hi + 2)
                } else {
                    lo..(hi + 1)
                }
            }
            _ => 0..1,
        }
    }

    /// Y range with 10% headroom, never dipping below zero for non-negative data.
    pub fn y_range(series: &ChartSeries) -> std::ops::Range<f64> {
        let Some((min, max)) = series.value_bounds() else {
            return 0.0..1.0;
        };
        let span = if max > min { max - min } else { max.abs().max(1.0) };
        let pad = span * 0.1;
        let lo = if min >= 0.0 { (min - pad).max(0.0) } else { min - pad };
        lo..(max + pad)
    }

    fn draw(series: &ChartSeries, buffer: &mut [u8], width: u32, height: u32) -> Result<()> {
        let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&series.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(Self::x_range(series), Self::y_range(series))?;

        chart
            .configure_mesh()
            .x_desc(series.x_label.as_str())
            .y_desc(series.y_label.as_str())
            .x_label_formatter(&|x| month_index_label(*x))
            .y_label_formatter(&|y| format_number(*y))
            .draw()?;

        for trace in &series.traces {
            let (r, g, b) = hex_to_rgb(trace.color);
            let color = RGBColor(r, g, b);
            let points: Vec<(i32, f64)> = trace
                .points
                .iter()
                .map(|p| (month_index(p.period), p.value))
                .collect();

            let style = color.stroke_width(LINE_WIDTH);
            let drawn = if trace.dashed {
                chart.draw_series(DashedLineSeries::new(points.clone(), 8, 5, style))?
            } else {
                chart.draw_series(LineSeries::new(points.clone(), style))?
            };
            drawn
                .label(trace.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                });

            if trace.markers {
                chart.draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), MARKER_RADIUS, color.filled())),
                )?;
            }
        }

        if series.traces.len() > 1 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&WHITE.mix(0.85))
                .border_style(&BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::SeriesBuilder;
    use crate::data::fixtures::{record, yearly};
    use crate::data::Dataset;

    #[test]
    fn test_x_range_covers_all_periods() {
        let series = SeriesBuilder::build(&yearly(&[1.0, 2.0, 3.0]));
        let range = ChartRenderer::x_range(&series.trend);
        assert_eq!(range.start, 2020 * 12);
        assert_eq!(range.end, 2022 * 12 + 1);
    }

    #[test]
    fn test_single_month_is_widened() {
        let ds = Dataset::from_records(vec![record(2021, 6, 10.0)]);
        let series = SeriesBuilder::build(&ds);
        let range = ChartRenderer::x_range(&series.trend);
        assert!(range.end - range.start >= 2);
    }

    #[test]
    fn test_y_range_pads_and_clamps_at_zero() {
        let series = SeriesBuilder::build(&yearly(&[100.0, 150.0, 90.0]));
        let range = ChartRenderer::y_range(&series.trend);
        assert!(range.start >= 0.0 && range.start < 90.0);
        assert!(range.end > 150.0);

        let empty = SeriesBuilder::build(&Dataset::default());
        assert_eq!(ChartRenderer::y_range(&empty.trend), 0.0..1.0);
    }

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_render_png_produces_png_bytes() {
        let series = SeriesBuilder::build(&yearly(&[100.0, 150.0, 90.0]));
        let png = ChartRenderer::render_png(&series.scenario, 400, 300).unwrap();
        assert!(png.starts_with(PNG_SIGNATURE));

        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (400, 300));
    }

    #[test]
    fn test_empty_series_renders_axis_frame() {
        let series = SeriesBuilder::build(&Dataset::default());
        for (_, chart) in series.charts() {
            let png = ChartRenderer::render_png(chart, 320, 240).unwrap();
            assert!(png.starts_with(PNG_SIGNATURE));
        }
    }

    #[test]
    fn test_export_all_writes_one_file_per_chart() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let series = SeriesBuilder::build(&yearly(&[10.0, 20.0]));

        let paths = ChartRenderer::export_all(&series, &out, 400, 300).unwrap();
        assert_eq!(paths.len(), 3);
        for name in ["trend.png", "accumulation.png", "scenario.png"] {
            let bytes = std::fs::read(out.join(name)).unwrap();
            assert!(bytes.starts_with(PNG_SIGNATURE), "{} is not a PNG", name);
        }
    }
}
