use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_history;
use crate::commands::{CommandError, DashboardContext};

pub fn history_command(context: &DashboardContext, cmd: Commands) -> Result<(), CommandError> {
    if let Commands::History { limit } = cmd {
        let limit = limit.unwrap_or(context.config.history_limit);
        let entries = context.client.recent_history(limit)?;
        println!("{}", format_history(&entries));
    }
    Ok(())
}
