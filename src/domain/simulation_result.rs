use serde::{Deserialize, Serialize};

use crate::domain::traffic_level::TrafficLevel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Aggregated statistics for one simulation request, as returned by the backend.
///
/// The first block of fields is required; a payload without them is not
/// presentable. Everything else is optional and only shown when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub avg_max_queue: f64,
    pub avg_waiting_time: f64,
    pub avg_service_rate: f64,
    pub avg_accidents_per_hour: f64,
    pub prob_light_traffic: f64,
    pub prob_moderate_jam: f64,
    pub prob_severe_jam: f64,
    pub all_max_queues: Vec<f64>,
    pub sample_queue_history: Vec<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_level: Option<TrafficLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_level_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_level_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_max_queue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_max_queue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_95: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_99: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_waiting_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_service_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_accidents: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_interval_95: Option<ConfidenceInterval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_throughput_history: Option<Vec<f64>>,
}

impl SimulationResult {
    /// Level reported by the backend, or the local classification when absent.
    pub fn traffic_level(&self) -> TrafficLevel {
        self.traffic_level
            .clone()
            .unwrap_or_else(|| TrafficLevel::classify(self.avg_max_queue))
    }

    pub fn traffic_level_description(&self) -> String {
        match &self.traffic_level_description {
            Some(description) => description.clone(),
            None => self.traffic_level().description().to_string(),
        }
    }
}
