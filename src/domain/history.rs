use chrono::NaiveDateTime;
use serde::Deserialize;

/// One row of the backend's simulation history.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub scenario_name: String,
    #[serde(default)]
    pub num_simulations: Option<u32>,
    #[serde(default)]
    pub avg_max_queue: Option<f64>,
    #[serde(default)]
    pub avg_waiting_time: Option<f64>,
    #[serde(default)]
    pub avg_service_rate: Option<f64>,
    #[serde(default)]
    pub prob_severe_jam: Option<f64>,
    #[serde(default)]
    pub traffic_level: Option<String>,
}

impl HistoryEntry {
    /// The timestamp as `YYYY-MM-DD HH:MM:SS`, or verbatim if it is not ISO 8601.
    pub fn display_timestamp(&self) -> String {
        parse_timestamp(&self.timestamp)
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.clone())
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_timestamp_drops_fractional_seconds() {
        let entry: HistoryEntry = serde_json::from_value(serde_json::json!({
            "id": 7,
            "timestamp": "2026-03-01T08:15:42.123456",
            "scenario_name": "baseline",
            "avg_max_queue": 51.2
        }))
        .unwrap();

        assert_eq!(entry.display_timestamp(), "2026-03-01 08:15:42");
        assert_eq!(entry.num_simulations, None);
    }

    #[test]
    fn display_timestamp_keeps_unparseable_text() {
        let entry: HistoryEntry = serde_json::from_value(serde_json::json!({
            "timestamp": "yesterday",
            "scenario_name": "weekend"
        }))
        .unwrap();

        assert_eq!(entry.display_timestamp(), "yesterday");
    }
}
