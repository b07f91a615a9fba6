use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::services::chart_renderer::ChartRenderer;
use crate::services::chart_slot::{ChartSlot, ViewSlot};
use crate::services::results_presenter::PresenterError;

/// Scenario the backend labels as the current configuration.
pub const BASELINE_SCENARIO: &str = "Baseline (Current)";

#[derive(Deserialize)]
struct ScenarioSummary {
    avg_max_queue: f64,
    avg_waiting_time: f64,
    avg_service_rate: f64,
    prob_severe_jam: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub scenario: String,
    pub avg_max_queue: f64,
    pub avg_waiting_time: f64,
    pub avg_service_rate: f64,
    pub prob_severe_jam: f64,
    /// 1 = lowest average max queue.
    pub rank: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Improvement {
    pub scenario: String,
    pub queue_reduction_pct: Option<f64>,
    pub waiting_time_reduction_pct: Option<f64>,
    pub service_rate_improvement_pct: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComparisonAnalysis {
    pub best_scenario: String,
    pub worst_scenario: String,
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, Clone)]
pub struct ComparisonView {
    pub rows: Vec<ComparisonRow>,
    pub analysis: ComparisonAnalysis,
    pub chart: Option<PathBuf>,
}

/// Builds table rows in the order the scenarios appear in `response`.
pub fn build_rows(response: &Value) -> Result<Vec<ComparisonRow>, PresenterError> {
    let scenarios = response.as_object().ok_or_else(|| {
        PresenterError::Incomplete("comparison response is not an object".to_string())
    })?;
    if scenarios.is_empty() {
        return Err(PresenterError::Incomplete(
            "comparison response has no scenarios".to_string(),
        ));
    }

    let mut rows = scenarios
        .iter()
        .map(|(name, value)| -> Result<ComparisonRow, PresenterError> {
            let summary = ScenarioSummary::deserialize(value)
                .map_err(|e| PresenterError::Incomplete(format!("{name}: {e}")))?;
            Ok(ComparisonRow {
                scenario: name.clone(),
                avg_max_queue: summary.avg_max_queue,
                avg_waiting_time: summary.avg_waiting_time,
                avg_service_rate: summary.avg_service_rate,
                prob_severe_jam: summary.prob_severe_jam,
                rank: 0,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (position, index) in ranking(&rows).into_iter().enumerate() {
        rows[index].rank = position + 1;
    }
    Ok(rows)
}

/// Row indices ordered by ascending average max queue; ties keep input order.
fn ranking(rows: &[ComparisonRow]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|a, b| {
        rows[*a]
            .avg_max_queue
            .partial_cmp(&rows[*b].avg_max_queue)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

pub fn analyze(rows: &[ComparisonRow]) -> Option<ComparisonAnalysis> {
    let order = ranking(rows);
    let best = rows.get(*order.first()?)?;
    let worst = rows.get(*order.last()?)?;

    let improvements = match rows.iter().find(|row| row.scenario == BASELINE_SCENARIO) {
        Some(baseline) => rows
            .iter()
            .filter(|row| row.scenario != BASELINE_SCENARIO)
            .map(|row| Improvement {
                scenario: row.scenario.clone(),
                queue_reduction_pct: reduction_pct(baseline.avg_max_queue, row.avg_max_queue),
                waiting_time_reduction_pct: reduction_pct(
                    baseline.avg_waiting_time,
                    row.avg_waiting_time,
                ),
                service_rate_improvement_pct: reduction_pct(
                    baseline.avg_service_rate,
                    row.avg_service_rate,
                )
                .map(|pct| -pct),
            })
            .collect(),
        None => Vec::new(),
    };

    Some(ComparisonAnalysis {
        best_scenario: best.scenario.clone(),
        worst_scenario: worst.scenario.clone(),
        improvements,
    })
}

fn reduction_pct(baseline: f64, value: f64) -> Option<f64> {
    if baseline == 0.0 {
        None
    } else {
        Some((baseline - value) / baseline * 100.0)
    }
}

/// Turns a multi-scenario comparison response into a table and a grouped bar chart.
pub struct ComparisonPresenter {
    renderer: Box<dyn ChartRenderer>,
    slot: ChartSlot,
    charts_enabled: bool,
}

impl ComparisonPresenter {
    pub fn new(renderer: Box<dyn ChartRenderer>, output_prefix: &str) -> Self {
        Self {
            renderer,
            slot: ChartSlot::new(ViewSlot::Comparison, output_prefix),
            charts_enabled: true,
        }
    }

    pub fn with_charts(mut self, enabled: bool) -> Self {
        self.charts_enabled = enabled;
        self
    }

    #[cfg(test)]
    pub fn chart_slot(&self) -> &ChartSlot {
        &self.slot
    }

    pub fn present(&mut self, response: &Value) -> Result<ComparisonView, PresenterError> {
        let rows = build_rows(response)?;
        let analysis = analyze(&rows).ok_or_else(|| {
            PresenterError::Incomplete("comparison response has no scenarios".to_string())
        })?;
        debug!(scenarios = rows.len(), best = %analysis.best_scenario, "comparison computed");

        let chart = if self.charts_enabled {
            let renderer = &self.renderer;
            let instance = self
                .slot
                .replace_with(|path| renderer.render_comparison(path, &rows))?;
            Some(instance.path.clone())
        } else {
            None
        };

        Ok(ComparisonView {
            rows,
            analysis,
            chart,
        })
    }
}
