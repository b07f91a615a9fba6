use crate::commands::base_commands::Commands;
use crate::commands::{CommandError, DashboardContext};

pub fn defaults_command(context: &DashboardContext, cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Defaults { output } = cmd {
        let defaults = context.client.default_parameters()?;
        let yaml = serde_yaml::to_string(&defaults)?;
        match output {
            Some(path) => {
                std::fs::write(&path, yaml)?;
                println!("Default parameters written to {path}");
            }
            None => print!("{yaml}"),
        }
    }
    Ok(())
}
