pub mod history;
pub mod network;
pub mod scenario;
pub mod simulation_result;
pub mod traffic_level;
