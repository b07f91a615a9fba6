use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::services::export::ExportFormat;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Path to dashboard config YAML
    #[arg(short, long, global = true)]
    pub config: Option<String>,
    /// Backend base URL (overrides config file and TRAFFIC_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a custom-parameter simulation
    Simulate {
        /// Simulation parameter YAML (missing keys use backend defaults)
        #[arg(short, long)]
        params: Option<String>,
        /// Number of simulation runs
        #[arg(short = 'n', long)]
        simulations: Option<u32>,
        /// Output prefix for the result JSON and charts
        #[arg(short, long)]
        output: String,
        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
        /// Export the result after rendering
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,
    },
    /// Run a preset scenario
    Scenario {
        /// Scenario name, e.g. baseline or heavy_traffic
        name: String,
        /// Number of simulation runs
        #[arg(short = 'n', long)]
        simulations: Option<u32>,
        /// Output prefix for the result JSON and charts
        #[arg(short, long)]
        output: String,
        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
        /// Export the result after rendering
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,
    },
    /// Compare preset scenarios side by side
    Compare {
        /// Scenario to include (repeatable)
        #[arg(short, long = "scenario", default_values = ["baseline", "optimized"])]
        scenarios: Vec<String>,
        /// Number of simulation runs per scenario
        #[arg(short = 'n', long)]
        simulations: Option<u32>,
        /// Output prefix for the result JSON and chart
        #[arg(short, long)]
        output: String,
        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },
    /// List the backend's preset scenarios
    Scenarios,
    /// Print the backend's default simulation parameters as YAML
    Defaults {
        /// Write the parameters to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Export a saved result as Excel or PDF
    Export {
        /// Export format
        #[arg(value_enum)]
        format: ExportFormat,
        /// Result JSON written by simulate, scenario or advanced
        #[arg(short, long)]
        input: String,
        /// Scenario name used in the export (defaults to the one in the result)
        #[arg(long)]
        scenario_name: Option<String>,
        /// Directory for the exported file
        #[arg(short, long)]
        dir: Option<String>,
    },
    /// Show recent simulation runs
    History {
        /// Number of runs to show
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Simulate a multi-intersection network
    Network {
        /// Network topology, e.g. simple_two_intersection or four_way_grid
        topology: String,
        /// Output prefix for the result JSON
        #[arg(short, long)]
        output: String,
    },
    /// Simulate an advanced traffic pattern
    Advanced {
        /// Pattern name, e.g. surabaya_morning_commute
        pattern: String,
        /// Output prefix for the result JSON and charts
        #[arg(short, long)]
        output: String,
        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
        /// Export the result after rendering
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Name of the action used in the failure notice.
    pub fn action(&self) -> &'static str {
        match self {
            Commands::Simulate { .. } => "Simulation",
            Commands::Scenario { .. } => "Scenario simulation",
            Commands::Compare { .. } => "Scenario comparison",
            Commands::Scenarios => "Scenario listing",
            Commands::Defaults { .. } => "Default parameter lookup",
            Commands::Export { .. } => "Export",
            Commands::History { .. } => "History lookup",
            Commands::Network { .. } => "Network simulation",
            Commands::Advanced { .. } => "Advanced simulation",
            Commands::Completions { .. } => "Completion generation",
        }
    }
}
