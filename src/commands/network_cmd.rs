use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_network_report;
use crate::commands::results_output::write_result_json;
use crate::commands::{CommandError, DashboardContext};
use crate::services::traffic_api::ApiError;

pub fn network_command(context: &DashboardContext, cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Network { topology, output } = cmd {
        let result = context.client.simulate_network(&topology)?;
        let intersections = result
            .intersections()
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        if intersections.is_empty() {
            return Err(ApiError::Malformed("network has no intersections".to_string()).into());
        }

        let json_path = write_result_json(&output, &result)?;
        println!(
            "{}",
            format_network_report(&topology, &intersections, &result.network_summary)
        );
        println!();
        println!("Result written to {json_path}");
    }
    Ok(())
}
