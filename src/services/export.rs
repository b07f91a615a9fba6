use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::services::traffic_api::{ApiError, TrafficApiClient};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to read result file: {0}")]
    ReadResult(#[source] std::io::Error),
    #[error("result file is not valid json: {0}")]
    ParseResult(#[from] serde_json::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("backend returned an empty export")]
    EmptyExport,
    #[error("failed to write export file: {0}")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Body of `POST /export/{format}`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest {
    pub result_data: Value,
    pub scenario_name: String,
}

/// `{scenario}_{YYYYmmdd_HHMMSS}.{ext}`, with path separators and spaces replaced.
pub fn export_filename(scenario_name: &str, format: ExportFormat, at: NaiveDateTime) -> String {
    let safe_name: String = scenario_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let safe_name = if safe_name.is_empty() {
        "simulation".to_string()
    } else {
        safe_name
    };
    format!(
        "{safe_name}_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Scenario name stored in a result, falling back to `simulation`.
pub fn scenario_name_of(result_data: &Value) -> String {
    result_data
        .get("scenario_name")
        .and_then(|value| value.as_str())
        .unwrap_or("simulation")
        .to_string()
}

/// Asks the backend to export `result_data` and saves the returned file in `dir`.
pub fn export_result(
    client: &TrafficApiClient,
    format: ExportFormat,
    result_data: &Value,
    scenario_name: &str,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let request = ExportRequest {
        result_data: result_data.clone(),
        scenario_name: scenario_name.to_string(),
    };
    let contents = client.export(format, &request)?;
    if contents.is_empty() {
        return Err(ExportError::EmptyExport);
    }

    fs::create_dir_all(dir).map_err(ExportError::Write)?;
    let path = dir.join(export_filename(
        scenario_name,
        format,
        Local::now().naive_local(),
    ));
    fs::write(&path, contents).map_err(ExportError::Write)?;
    info!(path = %path.display(), "export saved");
    Ok(path)
}

/// Exports a previously saved result file (`{prefix}.json`).
pub fn export_result_file(
    client: &TrafficApiClient,
    format: ExportFormat,
    result_path: &str,
    scenario_name: Option<&str>,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let contents = fs::read_to_string(result_path).map_err(ExportError::ReadResult)?;
    let result_data: Value = serde_json::from_str(&contents)?;
    let scenario_name = match scenario_name {
        Some(name) => name.to_string(),
        None => scenario_name_of(&result_data),
    };
    export_result(client, format, &result_data, &scenario_name, dir)
}
