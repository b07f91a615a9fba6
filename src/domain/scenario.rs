use std::collections::BTreeMap;
use std::fs;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to read parameter file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse parameter yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("{field}: lower bound {lower} exceeds upper bound {upper}")]
    InvalidRange {
        field: &'static str,
        lower: u32,
        upper: u32,
    },
    #[error("accident_probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("rush_hour_minutes ({rush}) exceeds simulation_minutes ({total})")]
    RushHourTooLong { rush: u32, total: u32 },
}

/// Body of `POST /simulate/enhanced`: a fully custom scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancedSimulationRequest {
    pub rush_hour_rate: [u32; 2],
    pub normal_rate: [u32; 2],
    pub green_capacity_normal: u32,
    pub green_capacity_accident: u32,
    pub accident_probability: f64,
    pub accident_duration_range: [u32; 2],
    pub rush_hour_minutes: u32,
    pub simulation_minutes: u32,
    pub simulations: u32,
}

impl Default for EnhancedSimulationRequest {
    fn default() -> Self {
        Self {
            rush_hour_rate: [12, 25],
            normal_rate: [5, 15],
            green_capacity_normal: 8,
            green_capacity_accident: 2,
            accident_probability: 0.05,
            accident_duration_range: [5, 15],
            rush_hour_minutes: 20,
            simulation_minutes: 60,
            simulations: 1000,
        }
    }
}

impl EnhancedSimulationRequest {
    /// Loads parameters from YAML; omitted keys keep their defaults.
    pub fn from_yaml_file(filepath: &str) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(filepath)?;
        let request: EnhancedSimulationRequest = serde_yaml::from_str(&contents)?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        check_range("rush_hour_rate", self.rush_hour_rate)?;
        check_range("normal_rate", self.normal_rate)?;
        check_range("accident_duration_range", self.accident_duration_range)?;
        if !(0.0..=1.0).contains(&self.accident_probability) {
            return Err(ScenarioError::InvalidProbability(self.accident_probability));
        }
        if self.simulations == 0 {
            return Err(ScenarioError::NotPositive("simulations"));
        }
        if self.simulation_minutes == 0 {
            return Err(ScenarioError::NotPositive("simulation_minutes"));
        }
        if self.rush_hour_minutes > self.simulation_minutes {
            return Err(ScenarioError::RushHourTooLong {
                rush: self.rush_hour_minutes,
                total: self.simulation_minutes,
            });
        }
        Ok(())
    }
}

fn check_range(field: &'static str, range: [u32; 2]) -> Result<(), ScenarioError> {
    if range[0] > range[1] {
        return Err(ScenarioError::InvalidRange {
            field,
            lower: range[0],
            upper: range[1],
        });
    }
    Ok(())
}

/// Body of `POST /scenarios/{name}`.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRunRequest {
    pub simulations: u32,
}

/// Body of `POST /scenarios/compare`.
#[derive(Debug, Clone, Serialize)]
pub struct CompareRequest {
    pub scenarios: Vec<String>,
    pub simulations: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioPreset {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response of `GET /scenarios`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioCatalog {
    pub scenarios: Vec<String>,
    #[serde(default)]
    pub details: BTreeMap<String, ScenarioPreset>,
}
