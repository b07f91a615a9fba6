use tracing::debug;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_comparison_report;
use crate::commands::results_output::write_result_json;
use crate::commands::{CommandError, DashboardContext};
use crate::services::chart_renderer::PlottersRenderer;
use crate::services::comparison_presenter::ComparisonPresenter;

pub fn compare_command(context: &DashboardContext, cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Compare {
        scenarios,
        simulations,
        output,
        no_charts,
    } = cmd
    {
        let response = context
            .client
            .compare_scenarios(&scenarios, context.simulations(simulations))?;

        let mut presenter =
            ComparisonPresenter::new(Box::new(PlottersRenderer), &output).with_charts(!no_charts);
        let view = presenter.present(&response)?;
        let json_path = write_result_json(&output, &response)?;
        debug!(path = %json_path, "comparison saved");

        println!("{}", format_comparison_report(&view));
        println!();
        println!("Result written to {json_path}");
        if let Some(chart) = &view.chart {
            println!("Chart written to {}", chart.display());
        }
    }
    Ok(())
}
