use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use serde_json::{json, Value};

use crate::domain::simulation_result::SimulationResult;
use crate::services::chart_renderer::ChartRenderer;
use crate::services::chart_slot::{ChartError, ViewSlot};
use crate::services::comparison_presenter::ComparisonRow;
use crate::services::histogram::HistogramBin;

/// A backend-shaped simulation response with the given headline metrics.
pub fn simulation_response(
    avg_max_queue: f64,
    avg_service_rate: f64,
    avg_waiting_time: f64,
    avg_accidents_per_hour: f64,
    prob_severe_jam: f64,
) -> Value {
    let all_max_queues: Vec<f64> = (0..25)
        .map(|i| (avg_max_queue - 12.0 + i as f64).max(0.0))
        .collect();
    let sample_queue_history: Vec<f64> = (0..60).map(|minute| (minute % 17) as f64).collect();
    json!({
        "avg_max_queue": avg_max_queue,
        "avg_waiting_time": avg_waiting_time,
        "avg_service_rate": avg_service_rate,
        "avg_accidents_per_hour": avg_accidents_per_hour,
        "prob_light_traffic": 0.6,
        "prob_moderate_jam": 0.3,
        "prob_severe_jam": prob_severe_jam,
        "all_max_queues": all_max_queues,
        "sample_queue_history": sample_queue_history
    })
}

pub fn build_result(
    avg_max_queue: f64,
    avg_service_rate: f64,
    avg_waiting_time: f64,
    avg_accidents_per_hour: f64,
    prob_severe_jam: f64,
) -> SimulationResult {
    serde_json::from_value(simulation_response(
        avg_max_queue,
        avg_service_rate,
        avg_waiting_time,
        avg_accidents_per_hour,
        prob_severe_jam,
    ))
    .unwrap()
}

// Writes a placeholder file per render and remembers which slot was drawn.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    calls: Rc<RefCell<Vec<ViewSlot>>>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> Vec<ViewSlot> {
        self.calls.borrow().clone()
    }

    fn record(&self, slot: ViewSlot, output: &Path) -> Result<(), ChartError> {
        self.calls.borrow_mut().push(slot);
        std::fs::write(output, b"chart").map_err(|e| ChartError::Render(e.to_string()))
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render_histogram(&self, output: &Path, _bins: &[HistogramBin]) -> Result<(), ChartError> {
        self.record(ViewSlot::Histogram, output)
    }

    fn render_time_series(&self, output: &Path, _samples: &[f64]) -> Result<(), ChartError> {
        self.record(ViewSlot::TimeSeries, output)
    }

    fn render_comparison(&self, output: &Path, _rows: &[ComparisonRow]) -> Result<(), ChartError> {
        self.record(ViewSlot::Comparison, output)
    }
}
