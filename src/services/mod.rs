pub mod chart_renderer;
pub mod chart_slot;
pub mod comparison_presenter;
pub mod dashboard_config;
pub mod export;
pub mod histogram;
pub mod recommendations;
pub mod request_gate;
pub mod results_presenter;
pub mod traffic_api;
