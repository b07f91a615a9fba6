use std::path::Path;

use crate::commands::base_commands::Commands;
use crate::commands::{CommandError, DashboardContext};
use crate::services::export::export_result_file;

pub fn export_command(context: &DashboardContext, cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Export {
        format,
        input,
        scenario_name,
        dir,
    } = cmd
    {
        let dir = dir.unwrap_or_else(|| context.config.export_dir.clone());
        let path = export_result_file(
            &context.client,
            format,
            &input,
            scenario_name.as_deref(),
            Path::new(&dir),
        )?;
        println!("Export written to {}", path.display());
    }
    Ok(())
}
