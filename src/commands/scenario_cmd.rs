use crate::commands::base_commands::Commands;
use crate::commands::results_output::{present_simulation, ResultsOutput};
use crate::commands::{CommandError, DashboardContext};

pub fn scenario_command(context: &DashboardContext, cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Scenario {
        name,
        simulations,
        output,
        no_charts,
        export,
    } = cmd
    {
        let response = context
            .client
            .simulate_scenario(&name, context.simulations(simulations))?;
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
