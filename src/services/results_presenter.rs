use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::simulation_result::SimulationResult;
use crate::services::chart_renderer::ChartRenderer;
use crate::services::chart_slot::{ChartError, ChartSlot, ViewSlot};
use crate::services::export::ExportError;
use crate::services::histogram::{bin_samples, HistogramBin, HISTOGRAM_BINS};
use crate::services::recommendations::{recommend, RecommendationOutcome};

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("incomplete simulation response: {0}")]
    Incomplete(String),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("post-render export failed: {0}")]
    Export(#[from] ExportError),
}

/// Runs after a successful render, e.g. to offer or trigger exports.
///
/// A failing hook does not undo the render; the failure is reported on the view.
pub type PostRenderHook<'a> = Box<dyn FnMut(&ResultsView) -> Result<(), PresenterError> + 'a>;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProbabilityBar {
    pub label: &'static str,
    pub probability: f64,
    pub width_percent: f64,
}

#[derive(Debug, Clone)]
pub struct ResultsView {
    pub result: SimulationResult,
    pub histogram: Vec<HistogramBin>,
    pub time_series: Vec<f64>,
    pub recommendations: RecommendationOutcome,
    pub probability_bars: Vec<ProbabilityBar>,
    pub charts: Vec<PathBuf>,
    /// Set when the post-render hook failed.
    pub post_render_failure: Option<String>,
}

/// Checks that a response carries everything the results view needs.
pub fn validate_response(response: &Value) -> Result<SimulationResult, PresenterError> {
    let result = SimulationResult::deserialize(response)
        .map_err(|e| PresenterError::Incomplete(e.to_string()))?;
    if result.all_max_queues.is_empty() {
        return Err(PresenterError::Incomplete(
            "all_max_queues has no samples".to_string(),
        ));
    }
    Ok(result)
}

pub fn probability_bars(result: &SimulationResult) -> Vec<ProbabilityBar> {
    [
        ("Light traffic", result.prob_light_traffic),
        ("Moderate jam", result.prob_moderate_jam),
        ("Severe jam", result.prob_severe_jam),
    ]
    .into_iter()
    .map(|(label, probability)| ProbabilityBar {
        label,
        probability,
        width_percent: (probability * 100.0).clamp(0.0, 100.0),
    })
    .collect()
}

/// Turns one simulation response into a results view.
///
/// Owns the histogram and time-series chart slots; each call replaces the
/// charts of the previous call instead of adding new ones.
pub struct ResultsPresenter<'a> {
    renderer: Box<dyn ChartRenderer>,
    histogram_slot: ChartSlot,
    time_series_slot: ChartSlot,
    charts_enabled: bool,
    post_render: Option<PostRenderHook<'a>>,
}

impl<'a> ResultsPresenter<'a> {
    pub fn new(renderer: Box<dyn ChartRenderer>, output_prefix: &str) -> Self {
        Self {
            renderer,
            histogram_slot: ChartSlot::new(ViewSlot::Histogram, output_prefix),
            time_series_slot: ChartSlot::new(ViewSlot::TimeSeries, output_prefix),
            charts_enabled: true,
            post_render: None,
        }
    }

    pub fn with_charts(mut self, enabled: bool) -> Self {
        self.charts_enabled = enabled;
        self
    }

    pub fn with_post_render_hook(mut self, hook: PostRenderHook<'a>) -> Self {
        self.post_render = Some(hook);
        self
    }

    #[cfg(test)]
    pub fn chart_slots(&self) -> [&ChartSlot; 2] {
        [&self.histogram_slot, &self.time_series_slot]
    }

    pub fn present(&mut self, response: &Value) -> Result<ResultsView, PresenterError> {
        let result = validate_response(response)?;

        let histogram = bin_samples(&result.all_max_queues, HISTOGRAM_BINS);
        let time_series = result.sample_queue_history.clone();
        let recommendations = recommend(&result);
        let bars = probability_bars(&result);
        debug!(
            samples = result.all_max_queues.len(),
            advisories = recommendations.recommendations().len(),
            all_clear = recommendations.is_all_clear(),
            "results computed"
        );

        let mut charts = Vec::new();
        if self.charts_enabled {
            let renderer = &self.renderer;
            let instance = self
                .histogram_slot
                .replace_with(|path| renderer.render_histogram(path, &histogram))?;
            charts.push(instance.path.clone());

            if time_series.is_empty() {
                info!("sample queue history is empty, no time-series chart");
                self.time_series_slot.clear()?;
            } else {
                let instance = self
                    .time_series_slot
                    .replace_with(|path| renderer.render_time_series(path, &time_series))?;
                charts.push(instance.path.clone());
            }
            debug!(
                histogram_live = self.histogram_slot.live_instances(),
                time_series_live = self.time_series_slot.live_instances(),
                "chart slots updated"
            );
        }

        let mut view = ResultsView {
            result,
            histogram,
            time_series,
            recommendations,
            probability_bars: bars,
            charts,
            post_render_failure: None,
        };

        if let Some(hook) = self.post_render.as_mut() {
            if let Err(e) = hook(&view) {
                warn!(error = %e, "post-render step failed");
                view.post_render_failure = Some(e.to_string());
            }
        }
        Ok(view)
    }
}
