pub mod base_commands;
pub mod compare_cmd;
pub mod defaults_cmd;
pub mod export_cmd;
pub mod history_cmd;
pub mod network_cmd;
pub mod report_format;
pub mod results_output;
pub mod scenario_cmd;
pub mod scenarios_cmd;
pub mod simulate_cmd;

use thiserror::Error;

use crate::domain::scenario::ScenarioError;
use crate::services::dashboard_config::{ConfigError, DashboardConfig};
use crate::services::export::ExportError;
use crate::services::results_presenter::PresenterError;
use crate::services::traffic_api::{ApiError, TrafficApiClient};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Presenter(#[from] PresenterError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("failed to encode json output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode yaml output: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to write output file: {0}")]
    Write(#[from] std::io::Error),
}

/// Resolved configuration plus the backend client shared by all commands.
pub struct DashboardContext {
    pub config: DashboardConfig,
    pub client: TrafficApiClient,
}

impl DashboardContext {
    pub fn new(config: DashboardConfig) -> Result<Self, CommandError> {
        let client = TrafficApiClient::new(&config.base_url)?;
        Ok(Self { config, client })
    }

    pub fn from_args(
        config_path: Option<&str>,
        base_url: Option<&str>,
    ) -> Result<Self, CommandError> {
        Self::new(DashboardConfig::resolve(config_path, base_url)?)
    }

    /// Run count from the command line, else from config.
    pub fn simulations(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.config.simulations)
    }
}
