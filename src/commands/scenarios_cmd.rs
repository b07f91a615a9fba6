use crate::commands::report_format::format_scenario_catalog;
use crate::commands::{CommandError, DashboardContext};

pub fn scenarios_command(context: &DashboardContext) -> Result<(), CommandError> {
    let catalog = context.client.list_scenarios()?;
    println!("{}", format_scenario_catalog(&catalog));
    Ok(())
}
