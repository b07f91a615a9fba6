use std::path::Path;

use plotters::prelude::*;

use crate::services::chart_slot::ChartError;
use crate::services::comparison_presenter::ComparisonRow;
use crate::services::histogram::HistogramBin;

/// Draws dashboard charts into image files.
pub trait ChartRenderer {
    fn render_histogram(&self, output: &Path, bins: &[HistogramBin]) -> Result<(), ChartError>;
    fn render_time_series(&self, output: &Path, samples: &[f64]) -> Result<(), ChartError>;
    fn render_comparison(&self, output: &Path, rows: &[ComparisonRow]) -> Result<(), ChartError>;
}

/// Renders PNG charts with plotters' bitmap backend.
pub struct PlottersRenderer;

const CHART_SIZE: (u32, u32) = (900, 600);
const BAR_COLOR: RGBColor = RGBColor(30, 122, 204);
const SECONDARY_BAR_COLOR: RGBColor = RGBColor(244, 67, 54);

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

impl ChartRenderer for PlottersRenderer {
    fn render_histogram(&self, output: &Path, bins: &[HistogramBin]) -> Result<(), ChartError> {
        if bins.is_empty() {
            return Err(ChartError::EmptyData("histogram bins"));
        }

        let max_count = bins.iter().map(|bin| bin.count).max().unwrap_or(0);
        let max_x = bins.len() as i32;

        let root = BitMapBackend::new(output, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption("Max Queue Distribution", ("sans-serif", 30))
            .x_label_area_size(55)
            .y_label_area_size(65)
            .build_cartesian_2d(0..max_x, 0..(max_count + 1))
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Max queue (vehicles)")
            .y_desc("Frequency")
            .label_style(("sans-serif", 14))
            .axis_desc_style(("sans-serif", 22))
            .x_labels(bins.len().min(10))
            .x_label_formatter(&|index| {
                if *index < 0 {
                    return String::new();
                }
                bins.get(*index as usize)
                    .map(|bin| bin.range_label.clone())
                    .unwrap_or_default()
            })
            .draw()
            .map_err(render_err)?;

        let bar_style = ShapeStyle::from(&BAR_COLOR).filled();
        chart
            .draw_series(bins.iter().enumerate().map(|(idx, bin)| {
                Rectangle::new([(idx as i32, 0), (idx as i32 + 1, bin.count)], bar_style)
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn render_time_series(&self, output: &Path, samples: &[f64]) -> Result<(), ChartError> {
        if samples.is_empty() {
            return Err(ChartError::EmptyData("queue history"));
        }

        let max_y = samples.iter().cloned().fold(0.0_f64, f64::max).max(1.0) * 1.1;
        let max_x = (samples.len() as f64 - 1.0).max(1.0);

        let root = BitMapBackend::new(output, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption("Queue Length Over Time", ("sans-serif", 30))
            .x_label_area_size(55)
            .y_label_area_size(65)
            .build_cartesian_2d(0.0..max_x, 0.0..max_y)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Time (minutes)")
            .y_desc("Queue length")
            .label_style(("sans-serif", 18))
            .axis_desc_style(("sans-serif", 22))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                samples
                    .iter()
                    .enumerate()
                    .map(|(minute, queue)| (minute as f64, *queue)),
                ShapeStyle::from(&BAR_COLOR).stroke_width(2),
            ))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn render_comparison(&self, output: &Path, rows: &[ComparisonRow]) -> Result<(), ChartError> {
        if rows.is_empty() {
            return Err(ChartError::EmptyData("comparison rows"));
        }

        // Each scenario takes three x units: queue bar, waiting-time bar, gap.
        let max_x = rows.len() as i32 * 3;
        let max_queue = rows
            .iter()
            .map(|row| row.avg_max_queue)
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.1;
        let max_wait = rows
            .iter()
            .map(|row| row.avg_waiting_time)
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.1;

        let root = BitMapBackend::new(output, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption("Scenario Comparison", ("sans-serif", 30))
            .x_label_area_size(55)
            .y_label_area_size(65)
            .right_y_label_area_size(65)
            .build_cartesian_2d(0..max_x, 0.0..max_queue)
            .map_err(render_err)?
            .set_secondary_coord(0..max_x, 0.0..max_wait);

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Scenario")
            .y_desc("Avg max queue (vehicles)")
            .label_style(("sans-serif", 14))
            .axis_desc_style(("sans-serif", 20))
            .x_labels(rows.len() * 3)
            .x_label_formatter(&|position| {
                if *position < 0 || position % 3 != 0 {
                    return String::new();
                }
                rows.get((*position / 3) as usize)
                    .map(|row| row.scenario.clone())
                    .unwrap_or_default()
            })
            .draw()
            .map_err(render_err)?;

        chart
            .configure_secondary_axes()
            .y_desc("Avg waiting time (minutes)")
            .label_style(("sans-serif", 14))
            .axis_desc_style(("sans-serif", 20))
            .draw()
            .map_err(render_err)?;

        let queue_style = ShapeStyle::from(&BAR_COLOR).filled();
        chart
            .draw_series(rows.iter().enumerate().map(|(idx, row)| {
                let x = idx as i32 * 3;
                Rectangle::new([(x, 0.0), (x + 1, row.avg_max_queue)], queue_style)
            }))
            .map_err(render_err)?
            .label("Avg max queue")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], queue_style));

        let wait_style = ShapeStyle::from(&SECONDARY_BAR_COLOR).filled();
        chart
            .draw_secondary_series(rows.iter().enumerate().map(|(idx, row)| {
                let x = idx as i32 * 3 + 1;
                Rectangle::new([(x, 0.0), (x + 1, row.avg_waiting_time)], wait_style)
            }))
            .map_err(render_err)?
            .label("Avg waiting time")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], wait_style));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}
