use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::history::HistoryEntry;
use crate::domain::network::NetworkResult;
use crate::domain::scenario::{
    CompareRequest, EnhancedSimulationRequest, ScenarioCatalog, ScenarioRunRequest,
};
use crate::services::export::{ExportFormat, ExportRequest};
use crate::services::request_gate::RequestGate;

const COMPARE_ROUTE: &str = "compare";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("could not reach the simulation backend: {0}")]
    Transport(String),
    #[error("backend responded with status {0}")]
    Status(u16),
    #[error("malformed backend response: {0}")]
    Malformed(String),
    #[error("another request is still running")]
    Busy,
    #[error("{0}")]
    Other(String),
}

/// Blocking client for the traffic-simulation backend.
pub struct TrafficApiClient {
    base_url: String,
    client: Client,
    gate: RequestGate,
}

impl TrafficApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Other("backend base_url is empty".to_string()));
        }
        Url::parse(&base_url)
            .map_err(|e| ApiError::Other(format!("invalid backend base_url {base_url}: {e}")))?;

        Ok(Self {
            base_url,
            client: Client::new(),
            gate: RequestGate::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Other(format!("invalid backend base_url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Other(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send(&self, label: &str, request: RequestBuilder) -> Result<reqwest::blocking::Response, ApiError> {
        let _in_flight = self.gate.begin(label).ok_or(ApiError::Busy)?;
        let response = request
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "backend responded");
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response)
    }

    fn fetch_json<T: DeserializeOwned>(
        &self,
        label: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(label, request)?
            .json::<T>()
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        label: &str,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        self.fetch_json(label, self.client.post(self.url(segments)?).json(body))
    }

    /// `POST /simulate/enhanced`
    pub fn simulate_enhanced(&self, request: &EnhancedSimulationRequest) -> Result<Value, ApiError> {
        self.post_json("Running custom simulation", &["simulate", "enhanced"], request)
    }

    /// `POST /scenarios/{name}`
    pub fn simulate_scenario(&self, name: &str, simulations: u32) -> Result<Value, ApiError> {
        // `/scenarios/compare` is the comparison route, not a preset.
        if name == COMPARE_ROUTE {
            return Err(ApiError::Other(format!("{name} is not a scenario name")));
        }
        self.post_json(
            &format!("Running scenario {name}"),
            &["scenarios", name],
            &ScenarioRunRequest { simulations },
        )
    }

    /// `POST /scenarios/compare`
    pub fn compare_scenarios(&self, scenarios: &[String], simulations: u32) -> Result<Value, ApiError> {
        let body = CompareRequest {
            scenarios: scenarios.to_vec(),
            simulations,
        };
        self.post_json("Comparing scenarios", &["scenarios", COMPARE_ROUTE], &body)
    }

    /// `GET /scenarios`
    pub fn list_scenarios(&self) -> Result<ScenarioCatalog, ApiError> {
        self.fetch_json("Loading scenarios", self.client.get(self.url(&["scenarios"])?))
    }

    /// `GET /config`
    pub fn default_parameters(&self) -> Result<EnhancedSimulationRequest, ApiError> {
        self.fetch_json("Loading default parameters", self.client.get(self.url(&["config"])?))
    }

    /// `POST /export/{excel|pdf}`; returns the raw file contents.
    pub fn export(&self, format: ExportFormat, request: &ExportRequest) -> Result<Vec<u8>, ApiError> {
        let response = self.send(
            &format!("Exporting {}", format.endpoint()),
            self.client
                .post(self.url(&["export", format.endpoint()])?)
                .json(request),
        )?;
        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    /// `GET /history/recent?limit=N`
    pub fn recent_history(&self, limit: u32) -> Result<Vec<HistoryEntry>, ApiError> {
        self.fetch_json(
            "Loading history",
            self.client
                .get(self.url(&["history", "recent"])?)
                .query(&[("limit", limit)]),
        )
    }

    /// `POST /network/simulate/{topology}`
    pub fn simulate_network(&self, topology: &str) -> Result<NetworkResult, ApiError> {
        self.fetch_json(
            &format!("Simulating network {topology}"),
            self.client
                .post(self.url(&["network", "simulate", topology])?)
                .json(&serde_json::json!({})),
        )
    }

    /// `POST /advanced/simulate/{pattern}`
    pub fn simulate_advanced(&self, pattern: &str) -> Result<Value, ApiError> {
        self.fetch_json(
            &format!("Simulating pattern {pattern}"),
            self.client
                .post(self.url(&["advanced", "simulate", pattern])?)
                .json(&serde_json::json!({})),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let client = TrafficApiClient::new("http://localhost:5000/").unwrap();

        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url(&["config"]).unwrap().as_str(),
            "http://localhost:5000/config"
        );
    }

    #[test]
    fn url_escapes_names_used_as_path_segments() {
        let client = TrafficApiClient::new("http://localhost:5000/api/").unwrap();

        let url = client.url(&["scenarios", "rush?hour#1/peak"]).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/scenarios/rush%3Fhour%231%2Fpeak"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn compare_is_not_a_scenario_name() {
        let client = TrafficApiClient::new("http://127.0.0.1:9").unwrap();

        let error = client.simulate_scenario("compare", 10).unwrap_err();
        assert!(matches!(error, ApiError::Other(_)));
    }

    #[test]
    fn new_rejects_unparsable_base_url() {
        assert!(matches!(
            TrafficApiClient::new("localhost 5000"),
            Err(ApiError::Other(_))
        ));
    }

    #[test]
    fn new_rejects_empty_base_url() {
        assert!(matches!(
            TrafficApiClient::new(""),
            Err(ApiError::Other(_))
        ));
    }

    #[test]
    fn request_is_refused_while_gate_is_held() {
        let client = TrafficApiClient::new("http://127.0.0.1:9").unwrap();
        let _held = client.gate.begin("Running simulation").unwrap();

        let error = client.simulate_scenario("baseline", 10).unwrap_err();
        assert!(matches!(error, ApiError::Busy));
    }

    #[test]
    fn unreachable_backend_is_a_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let client = TrafficApiClient::new("http://127.0.0.1:9").unwrap();

        let error = client.recent_history(5).unwrap_err();
        assert!(matches!(error, ApiError::Transport(_)));
        assert!(!client.gate.is_busy());
    }
}
