//! Charts module - chart series, interactive plots and static rendering

mod plotter;
mod renderer;
mod series;

pub use plotter::ChartPlotter;
pub use renderer::ChartRenderer;
pub use series::{
    hex_to_rgb, month_index, month_index_label, ChartSeries, SeriesBuilder, SeriesPoint,
    SeriesSet, Trace,
};
