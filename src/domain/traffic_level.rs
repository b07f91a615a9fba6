use serde::{Deserialize, Serialize};

/// Congestion classification reported by the backend for a simulation run.
///
/// Levels the dashboard does not know about are kept verbatim in `Unknown`
/// so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrafficLevel {
    Light,
    Moderate,
    Heavy,
    Severe,
    Unknown(String),
}

impl TrafficLevel {
    /// Classifies an average maximum queue length with the backend's thresholds.
    pub fn classify(avg_max_queue: f64) -> Self {
        if avg_max_queue <= 30.0 {
            TrafficLevel::Light
        } else if avg_max_queue <= 60.0 {
            TrafficLevel::Moderate
        } else if avg_max_queue <= 100.0 {
            TrafficLevel::Heavy
        } else {
            TrafficLevel::Severe
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TrafficLevel::Light => "light",
            TrafficLevel::Moderate => "moderate",
            TrafficLevel::Heavy => "heavy",
            TrafficLevel::Severe => "severe",
            TrafficLevel::Unknown(value) => value,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TrafficLevel::Light => "Traffic flowing smoothly",
            TrafficLevel::Moderate => "Some congestion, manageable",
            TrafficLevel::Heavy => "Heavy congestion, slow movement",
            TrafficLevel::Severe => "Severe congestion, major delays",
            TrafficLevel::Unknown(_) => "Unclassified traffic level",
        }
    }
}

impl From<String> for TrafficLevel {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "light" => TrafficLevel::Light,
            "moderate" => TrafficLevel::Moderate,
            "heavy" => TrafficLevel::Heavy,
            "severe" => TrafficLevel::Severe,
            _ => TrafficLevel::Unknown(value),
        }
    }
}

impl From<TrafficLevel> for String {
    fn from(level: TrafficLevel) -> Self {
        level.as_str().to_string()
    }
}

impl std::fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_inclusive_upper_bounds() {
        assert_eq!(TrafficLevel::classify(30.0), TrafficLevel::Light);
        assert_eq!(TrafficLevel::classify(30.5), TrafficLevel::Moderate);
        assert_eq!(TrafficLevel::classify(60.0), TrafficLevel::Moderate);
        assert_eq!(TrafficLevel::classify(100.0), TrafficLevel::Heavy);
        assert_eq!(TrafficLevel::classify(100.1), TrafficLevel::Severe);
    }

    #[test]
    fn unknown_levels_round_trip_their_name() {
        let level: TrafficLevel = serde_json::from_str("\"gridlock\"").unwrap();
        assert_eq!(level, TrafficLevel::Unknown("gridlock".to_string()));
        assert_eq!(serde_json::to_string(&level).unwrap(), "\"gridlock\"");
    }

    #[test]
    fn known_levels_are_case_insensitive() {
        let level: TrafficLevel = serde_json::from_str("\"Severe\"").unwrap();
        assert_eq!(level, TrafficLevel::Severe);
    }
}
