use crate::commands::base_commands::Commands;
use crate::commands::results_output::{present_simulation, ResultsOutput};
use crate::commands::{CommandError, DashboardContext};
use crate::domain::scenario::EnhancedSimulationRequest;

pub fn simulate_command(context: &DashboardContext, cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Simulate {
        params,
        simulations,
        output,
        no_charts,
        export,
    } = cmd
    {
        let mut request = match &params {
            Some(path) => EnhancedSimulationRequest::from_yaml_file(path)?,
            None => EnhancedSimulationRequest {
                simulations: context.config.simulations,
                ..EnhancedSimulationRequest::default()
            },
        };
        if let Some(simulations) = simulations {
            request.simulations = simulations;
        }
        request.validate()?;

        let response = context.client.simulate_enhanced(&request)?;
        present_simulation(
            context,
            &response,
            &ResultsOutput {
                prefix: &output,
                charts: !no_charts,
                export,
            },
        )?;
    }
    Ok(())
}

/// `advanced <pattern>` renders through the same results view.
pub fn advanced_command(context: &DashboardContext, cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Advanced {
        pattern,
        output,
        no_charts,
        export,
    } = cmd
    {
        let response = context.client.simulate_advanced(&pattern)?;
        present_simulation(
            context,
            &response,
            &ResultsOutput {
                prefix: &output,
                charts: !no_charts,
                export,
            },
        )?;
    }
    Ok(())
}
