use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntersectionSummary {
    pub avg_max_queue: f64,
    pub avg_waiting_time: f64,
    pub avg_service_rate: f64,
    #[serde(default)]
    pub std_max_queue: Option<f64>,
    #[serde(default)]
    pub median_max_queue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub avg_total_max_queue: f64,
    pub avg_network_service_rate: f64,
    #[serde(default)]
    pub std_total_max_queue: Option<f64>,
}

/// Response of `POST /network/simulate/{topology}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkResult {
    intersections: Map<String, Value>,
    pub network_summary: NetworkSummary,
}

impl NetworkResult {
    /// Intersections in the order the backend listed them.
    pub fn intersections(&self) -> Result<Vec<(String, IntersectionSummary)>, serde_json::Error> {
        self.intersections
            .iter()
            .map(|(id, value)| {
                IntersectionSummary::deserialize(value).map(|summary| (id.clone(), summary))
            })
            .collect()
    }
}
