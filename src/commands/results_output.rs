use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::commands::report_format::format_results_report;
use crate::commands::{CommandError, DashboardContext};
use crate::services::chart_renderer::PlottersRenderer;
use crate::services::export::{export_result, scenario_name_of, ExportFormat};
use crate::services::results_presenter::{PresenterError, ResultsPresenter, ResultsView};

/// How a single-result command renders its response.
pub struct ResultsOutput<'a> {
    pub prefix: &'a str,
    pub charts: bool,
    pub export: Option<ExportFormat>,
}

pub fn result_json_path(prefix: &str) -> String {
    format!("{prefix}.json")
}

/// Writes `value` as pretty JSON to `{prefix}.json`.
pub fn write_result_json<T: Serialize>(prefix: &str, value: &T) -> Result<String, CommandError> {
    let path = result_json_path(prefix);
    fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(path)
}

/// Presents one simulation response: report on stdout, charts, result JSON and
/// an optional export once everything rendered.
///
/// A failed export is reported on its own and does not fail the command.
pub fn present_simulation(
    context: &DashboardContext,
    response: &Value,
    output: &ResultsOutput,
) -> Result<ResultsView, CommandError> {
    let export_dir = Path::new(&context.config.export_dir);
    let exported: RefCell<Option<PathBuf>> = RefCell::new(None);
    let exported_slot = &exported;

    let mut presenter =
        ResultsPresenter::new(Box::new(PlottersRenderer), output.prefix).with_charts(output.charts);
    if let Some(format) = output.export {
        presenter = presenter.with_post_render_hook(Box::new(
            move |_view: &ResultsView| -> Result<(), PresenterError> {
                let name = scenario_name_of(response);
                let path = export_result(&context.client, format, response, &name, export_dir)?;
                exported_slot.replace(Some(path));
                Ok(())
            },
        ));
    }

    let view = presenter.present(response)?;
    let json_path = write_result_json(output.prefix, response)?;
    debug!(path = %json_path, "result saved");

    println!("{}", format_results_report(&view));
    println!();
    println!("Result written to {json_path}");
    for chart in &view.charts {
        println!("Chart written to {}", chart.display());
    }
    if let Some(path) = exported.take() {
        println!("Export written to {}", path.display());
    }
    if let Some(failure) = &view.post_render_failure {
        debug!(error = %failure, "export detail");
        eprintln!("Export failed. Please try again.");
    }
    Ok(view)
}
