mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::compare_cmd::compare_command;
use crate::commands::defaults_cmd::defaults_command;
use crate::commands::export_cmd::export_command;
use crate::commands::history_cmd::history_command;
use crate::commands::network_cmd::network_command;
use crate::commands::scenario_cmd::scenario_command;
use crate::commands::scenarios_cmd::scenarios_command;
use crate::commands::simulate_cmd::{advanced_command, simulate_command};
use crate::commands::{CommandError, DashboardContext};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug,hyper=info,hyper_util=info,reqwest=info,rustls=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_completions(shell: clap_complete::Shell) {
    let mut command = CliArgs::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

fn run(args: CliArgs) -> Result<(), CommandError> {
    // Completions need no config or backend.
    if let Commands::Completions { shell } = args.command {
        print_completions(shell);
        return Ok(());
    }

    let context = DashboardContext::from_args(args.config.as_deref(), args.base_url.as_deref())?;
    debug!(base_url = context.client.base_url(), "backend configured");

    match args.command {
        cmd @ Commands::Simulate { .. } => simulate_command(&context, cmd),
        cmd @ Commands::Scenario { .. } => scenario_command(&context, cmd),
        cmd @ Commands::Compare { .. } => compare_command(&context, cmd),
        Commands::Scenarios => scenarios_command(&context),
        cmd @ Commands::Defaults { .. } => defaults_command(&context, cmd),
        cmd @ Commands::Export { .. } => export_command(&context, cmd),
        cmd @ Commands::History { .. } => history_command(&context, cmd),
        cmd @ Commands::Network { .. } => network_command(&context, cmd),
        cmd @ Commands::Advanced { .. } => advanced_command(&context, cmd),
        Commands::Completions { .. } => Ok(()),
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let action = args.command.action();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{action} failed");
            debug!(error = %e, detail = ?e, "command error");
            eprintln!("{action} failed. Please try again.");
            ExitCode::FAILURE
        }
    }
}
