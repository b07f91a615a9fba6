use crate::domain::history::HistoryEntry;
use crate::domain::network::{IntersectionSummary, NetworkSummary};
use crate::domain::scenario::ScenarioCatalog;
use crate::domain::traffic_level::TrafficLevel;
use crate::services::comparison_presenter::ComparisonView;
use crate::services::recommendations::RecommendationOutcome;
use crate::services::results_presenter::{ProbabilityBar, ResultsView};

const BAR_CELLS: usize = 20;

pub fn format_results_report(view: &ResultsView) -> String {
    let result = &view.result;
    let mut lines = Vec::new();
    lines.push("Simulation Report".to_string());
    if let Some(name) = &result.scenario_name {
        lines.push(format!("Scenario: {name}"));
    }
    if let Some(description) = &result.scenario_description {
        lines.push(format!("Description: {description}"));
    }
    lines.push(format!(
        "Traffic level: {} ({})",
        result.traffic_level(),
        result.traffic_level_description()
    ));
    lines.push(String::new());
    lines.push("Metric | Value".to_string());
    lines.push("-------|------".to_string());
    lines.push(format!("Avg max queue | {:.2} vehicles", result.avg_max_queue));
    lines.push(format!("Avg waiting time | {:.2} min", result.avg_waiting_time));
    lines.push(format!("Service rate | {:.1}%", result.avg_service_rate * 100.0));
    lines.push(format!("Accidents per hour | {:.2}", result.avg_accidents_per_hour));
    if let Some(p95) = result.percentile_95 {
        lines.push(format!("P95 max queue | {p95:.2}"));
    }
    if let Some(ci) = &result.confidence_interval_95 {
        lines.push(format!("95% CI max queue | {:.2} - {:.2}", ci.lower, ci.upper));
    }
    lines.push(String::new());

    lines.push("Probabilities:".to_string());
    for bar in &view.probability_bars {
        lines.push(format_probability_bar(bar));
    }
    lines.push(String::new());

    lines.push(format!(
        "Max queue distribution ({} runs):",
        result.all_max_queues.len()
    ));
    lines.push("Range | Count".to_string());
    lines.push("------|------".to_string());
    for bin in &view.histogram {
        lines.push(format!("{} | {}", bin.range_label, bin.count));
    }
    lines.push(String::new());

    lines.push("Recommendations:".to_string());
    lines.extend(format_recommendations(&view.recommendations));

    lines.join("\n")
}

fn format_probability_bar(bar: &ProbabilityBar) -> String {
    let filled = ((bar.width_percent / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!(
        "{:<13} [{}{}] {:.1}%",
        bar.label,
        "#".repeat(filled),
        ".".repeat(BAR_CELLS - filled),
        bar.width_percent
    )
}

fn format_recommendations(outcome: &RecommendationOutcome) -> Vec<String> {
    match outcome {
        RecommendationOutcome::AllClear => {
            vec!["No issues detected: all metrics are within healthy thresholds.".to_string()]
        }
        RecommendationOutcome::Advisories(items) => items
            .iter()
            .map(|item| format!("[{}] {}: {}", item.severity.label(), item.title, item.body))
            .collect(),
    }
}

pub fn format_comparison_report(view: &ComparisonView) -> String {
    let mut lines = Vec::new();
    lines.push("Scenario Comparison".to_string());
    lines.push("Scenario | Avg Max Queue | Avg Waiting Time | Service Rate | Severe Jam | Rank".to_string());
    lines.push("---------|---------------|------------------|--------------|------------|-----".to_string());
    for row in &view.rows {
        lines.push(format!(
            "{} | {:.2} | {:.2} | {:.1}% | {:.1}% | {}",
            row.scenario,
            row.avg_max_queue,
            row.avg_waiting_time,
            row.avg_service_rate * 100.0,
            row.prob_severe_jam * 100.0,
            row.rank
        ));
    }
    lines.push(String::new());
    lines.push(format!("Best scenario: {}", view.analysis.best_scenario));
    lines.push(format!("Worst scenario: {}", view.analysis.worst_scenario));

    if !view.analysis.improvements.is_empty() {
        lines.push(String::new());
        lines.push("Improvements vs baseline:".to_string());
        for improvement in &view.analysis.improvements {
            lines.push(format!(
                "{}: queue {} | waiting time {} | service rate {}",
                improvement.scenario,
                format_pct(improvement.queue_reduction_pct, "reduction"),
                format_pct(improvement.waiting_time_reduction_pct, "reduction"),
                format_pct(improvement.service_rate_improvement_pct, "improvement"),
            ));
        }
    }

    lines.join("\n")
}

fn format_pct(value: Option<f64>, kind: &str) -> String {
    match value {
        Some(pct) => format!("{pct:.1}% {kind}"),
        None => "n/a".to_string(),
    }
}

pub fn format_network_report(
    topology: &str,
    intersections: &[(String, IntersectionSummary)],
    summary: &NetworkSummary,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Network Report: {topology}"));
    lines.push("Intersection | Avg Max Queue | Avg Waiting Time | Service Rate | Level".to_string());
    lines.push("-------------|---------------|------------------|--------------|------".to_string());
    for (id, intersection) in intersections {
        lines.push(format!(
            "{id} | {:.2} | {:.2} | {:.1}% | {}",
            intersection.avg_max_queue,
            intersection.avg_waiting_time,
            intersection.avg_service_rate * 100.0,
            TrafficLevel::classify(intersection.avg_max_queue)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Total max queue: {:.2} vehicles",
        summary.avg_total_max_queue
    ));
    lines.push(format!(
        "Network service rate: {:.1}%",
        summary.avg_network_service_rate * 100.0
    ));
    if let Some((id, worst)) = intersections.iter().max_by(|a, b| {
        a.1.avg_max_queue
            .partial_cmp(&b.1.avg_max_queue)
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        lines.push(format!(
            "Bottleneck: {id} ({:.2} vehicles)",
            worst.avg_max_queue
        ));
    }
    lines.join("\n")
}

pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No simulation history yet.".to_string();
    }

    let mut lines = Vec::new();
    lines.push("Recent Simulations".to_string());
    lines.push(
        "Timestamp | Scenario | Runs | Avg Max Queue | Avg Waiting Time | Service Rate | Severe Jam | Level"
            .to_string(),
    );
    lines.push(
        "----------|----------|------|---------------|------------------|--------------|------------|------"
            .to_string(),
    );
    for entry in entries {
        lines.push(format!(
            "{} | {} | {} | {} | {} | {} | {} | {}",
            entry.display_timestamp(),
            entry.scenario_name,
            or_na(entry.num_simulations.map(|runs| runs.to_string())),
            or_na(entry.avg_max_queue.map(|queue| format!("{queue:.2}"))),
            or_na(entry.avg_waiting_time.map(|wait| format!("{wait:.2}"))),
            or_na(entry.avg_service_rate.map(|rate| format!("{:.1}%", rate * 100.0))),
            or_na(entry.prob_severe_jam.map(|prob| format!("{:.1}%", prob * 100.0))),
            entry.traffic_level.as_deref().unwrap_or("n/a"),
        ));
    }
    lines.join("\n")
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| "n/a".to_string())
}

pub fn format_scenario_catalog(catalog: &ScenarioCatalog) -> String {
    let mut lines = vec!["Available scenarios:".to_string()];
    for key in &catalog.scenarios {
        match catalog.details.get(key) {
            Some(preset) => {
                let description = preset.description.as_deref().unwrap_or("");
                lines.push(format!("{key} | {} | {description}", preset.name));
            }
            None => lines.push(key.clone()),
        }
    }
    lines.join("\n")
}
