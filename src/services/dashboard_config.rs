use std::env;
use std::fs;

use serde::Deserialize;
use thiserror::Error;

pub const BASE_URL_ENV: &str = "TRAFFIC_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub simulations: u32,
    pub history_limit: u32,
    pub export_dir: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            simulations: 1000,
            history_limit: 10,
            export_dir: "exports".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(filepath)?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Config file (or defaults), then `TRAFFIC_API_URL`, then `--base-url`.
    pub fn resolve(
        config_path: Option<&str>,
        base_url_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        if let Ok(url) = env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Some(url) = base_url_override {
            config.base_url = url.to_string();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn from_yaml_file_fills_missing_keys_with_defaults() {
        let file = assert_fs::NamedTempFile::new("dashboard.yaml").unwrap();
        file.write_str("base_url: http://sim.local:8080\nsimulations: 250\n")
            .unwrap();

        let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.base_url, "http://sim.local:8080");
        assert_eq!(config.simulations, 250);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.export_dir, "exports");
    }

    #[test]
    fn resolve_prefers_command_line_override() {
        let file = assert_fs::NamedTempFile::new("dashboard.yaml").unwrap();
        file.write_str("base_url: http://from-file:1\n").unwrap();

        let config = DashboardConfig::resolve(
            Some(file.path().to_str().unwrap()),
            Some("http://from-flag:2"),
        )
        .unwrap();

        assert_eq!(config.base_url, "http://from-flag:2");
    }

    #[test]
    fn from_yaml_file_rejects_invalid_yaml() {
        let file = assert_fs::NamedTempFile::new("broken.yaml").unwrap();
        file.write_str("simulations: [not a number\n").unwrap();

        let error = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
