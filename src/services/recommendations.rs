use serde::Serialize;

use crate::domain::simulation_result::SimulationResult;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

/// The summary statistic a rule looks at.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AvgMaxQueue,
    AvgServiceRate,
    AvgWaitingTime,
    AvgAccidentsPerHour,
    ProbSevereJam,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub severity: Severity,
    pub metric: Metric,
    pub title: String,
    pub body: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", content = "recommendations", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// Every rule was checked and none fired.
    AllClear,
    Advisories(Vec<Recommendation>),
}

impl RecommendationOutcome {
    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            RecommendationOutcome::AllClear => &[],
            RecommendationOutcome::Advisories(items) => items,
        }
    }

    pub fn is_all_clear(&self) -> bool {
        matches!(self, RecommendationOutcome::AllClear)
    }
}

struct Rule {
    title: &'static str,
    severity: Severity,
    metric: Metric,
    applies: fn(&SimulationResult) -> bool,
    body: fn(&SimulationResult) -> String,
}

// Evaluation order is the order advisories are reported in.
const RULES: [Rule; 6] = [
    Rule {
        title: "Very High Queue Length",
        severity: Severity::Critical,
        metric: Metric::AvgMaxQueue,
        applies: |r| r.avg_max_queue > 100.0,
        body: |r| {
            format!(
                "Average max queue is {:.1} vehicles. Increase green light capacity or duration (expected: 30-50% reduction in queue).",
                r.avg_max_queue
            )
        },
    },
    Rule {
        title: "Moderate Congestion",
        severity: Severity::Warning,
        metric: Metric::AvgMaxQueue,
        applies: |r| r.avg_max_queue > 60.0 && r.avg_max_queue <= 100.0,
        body: |r| {
            format!(
                "Average max queue is {:.1} vehicles. Consider traffic light optimization (expected: 15-25% improvement).",
                r.avg_max_queue
            )
        },
    },
    Rule {
        title: "Low Service Rate",
        severity: Severity::Critical,
        metric: Metric::AvgServiceRate,
        applies: |r| r.avg_service_rate < 0.7,
        body: |r| {
            format!(
                "Only {:.1}% of vehicles are served. The intersection cannot handle current demand and requires capacity expansion.",
                r.avg_service_rate * 100.0
            )
        },
    },
    Rule {
        title: "High Waiting Time",
        severity: Severity::Warning,
        metric: Metric::AvgWaitingTime,
        applies: |r| r.avg_waiting_time > 10.0,
        body: |r| {
            format!(
                "Vehicles wait {:.1} minutes on average. Implement adaptive traffic light timing (expected: 20-30% waiting time reduction).",
                r.avg_waiting_time
            )
        },
    },
    Rule {
        title: "High Accident Frequency",
        severity: Severity::Info,
        metric: Metric::AvgAccidentsPerHour,
        applies: |r| r.avg_accidents_per_hour > 2.0,
        body: |r| {
            format!(
                "{:.1} accidents per hour on average. Improve road safety measures and emergency response to shorten incident impact.",
                r.avg_accidents_per_hour
            )
        },
    },
    Rule {
        title: "High Severe Jam Probability",
        severity: Severity::Critical,
        metric: Metric::ProbSevereJam,
        applies: |r| r.prob_severe_jam > 0.2,
        body: |r| {
            format!(
                "{:.1}% of runs end in a severe jam. Immediate intervention needed: consider alternative routes or timing changes.",
                r.prob_severe_jam * 100.0
            )
        },
    },
];

/// Evaluates every advisory rule against `result`.
pub fn recommend(result: &SimulationResult) -> RecommendationOutcome {
    let advisories: Vec<Recommendation> = RULES
        .iter()
        .filter(|rule| (rule.applies)(result))
        .map(|rule| Recommendation {
            severity: rule.severity,
            metric: rule.metric,
            title: rule.title.to_string(),
            body: (rule.body)(result),
        })
        .collect();

    if advisories.is_empty() {
        RecommendationOutcome::AllClear
    } else {
        RecommendationOutcome::Advisories(advisories)
    }
}
