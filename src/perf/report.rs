//! Human-readable performance reports
//!
//! A report is built from recorded [`PerformanceMetrics`] and rendered as a
//! fixed-width block of `name: value unit` lines. Two samples can be
//! compared metric by metric.

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::performance::PerformanceMetrics;

pub const REPORT_TITLE: &str = "Dish list performance report";
const REPORT_RULE_WIDTH: usize = 50;
const COMPARISON_RULE_WIDTH: usize = 60;
const NAME_WIDTH: usize = 24;

/// Value of one report line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MetricValue {
    Number(f64),
    /// Milestone not reached; carries the placeholder to print
    Missing(&'static str),
}

impl MetricValue {
    fn from_option(value: Option<f64>, placeholder: &'static str) -> Self {
        value.map_or(MetricValue::Missing(placeholder), MetricValue::Number)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(value) => write!(f, "{value:.2}"),
            MetricValue::Missing(placeholder) => f.write_str(placeholder),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricLine {
    pub name: &'static str,
    pub value: MetricValue,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub title: String,
    pub timestamp: DateTime<Local>,
    pub metrics: Vec<MetricLine>,
}

pub fn create_performance_report(metrics: &PerformanceMetrics) -> PerformanceReport {
    PerformanceReport {
        title: REPORT_TITLE.to_string(),
        timestamp: Local::now(),
        metrics: vec![
            MetricLine {
                name: "First render",
                value: MetricValue::from_option(metrics.first_render_ms, "not recorded"),
                unit: "ms",
            },
            MetricLine {
                name: "First meaningful paint",
                value: MetricValue::from_option(metrics.fmp_ms, "not reached"),
                unit: "ms",
            },
            MetricLine {
                name: "Data load",
                value: MetricValue::from_option(metrics.data_load_ms, "not reached"),
                unit: "ms",
            },
            MetricLine {
                name: "First screen items",
                value: MetricValue::Number(metrics.list_item_count as f64),
                unit: "items",
            },
            MetricLine {
                name: "Total",
                value: MetricValue::Number(metrics.fmp_ms.unwrap_or(0.0)),
                unit: "ms",
            },
        ],
    }
}

pub fn format_performance_report(report: &PerformanceReport) -> String {
    let rule = "=".repeat(REPORT_RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        report.title.clone(),
        format!("Time: {}", report.timestamp.format("%Y-%m-%d %H:%M:%S")),
        rule.clone(),
    ];
    lines.extend(report.metrics.iter().map(|metric| {
        format!(
            "{:<width$}: {} {}",
            metric.name,
            metric.value,
            metric.unit,
            width = NAME_WIDTH
        )
    }));
    lines.push(rule);
    lines.join("\n")
}

/// Plain figures of one measurement, as compared by [`compare_performance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerformanceSample {
    pub first_render_ms: f64,
    pub fmp_ms: f64,
    pub data_load_ms: f64,
    pub list_item_count: usize,
}

impl From<&PerformanceMetrics> for PerformanceSample {
    fn from(metrics: &PerformanceMetrics) -> Self {
        Self {
            first_render_ms: metrics.first_render_ms.unwrap_or(0.0),
            fmp_ms: metrics.fmp_ms.unwrap_or(0.0),
            data_load_ms: metrics.data_load_ms.unwrap_or(0.0),
            list_item_count: metrics.list_item_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub name: &'static str,
    pub before: f64,
    pub after: f64,
    pub unit: &'static str,
}

impl Comparison {
    /// Amount saved; positive means `after` is smaller
    pub fn difference(&self) -> f64 {
        self.before - self.after
    }

    /// Saving relative to `before`, `0.0` when there is nothing to relate to
    pub fn percentage(&self) -> f64 {
        if self.before > 0.0 {
            self.difference() * 100.0 / self.before
        } else {
            0.0
        }
    }

    fn sign(&self) -> &'static str {
        let difference = self.difference();
        if difference > 0.0 {
            "-"
        } else if difference < 0.0 {
            "+"
        } else {
            ""
        }
    }
}

pub fn compare_performance(before: &PerformanceSample, after: &PerformanceSample) -> Vec<Comparison> {
    vec![
        Comparison {
            name: "First render",
            before: before.first_render_ms,
            after: after.first_render_ms,
            unit: "ms",
        },
        Comparison {
            name: "First meaningful paint",
            before: before.fmp_ms,
            after: after.fmp_ms,
            unit: "ms",
        },
        Comparison {
            name: "Data load",
            before: before.data_load_ms,
            after: after.data_load_ms,
            unit: "ms",
        },
        Comparison {
            name: "First screen items",
            before: before.list_item_count as f64,
            after: after.list_item_count as f64,
            unit: "items",
        },
    ]
}

pub fn format_comparison(title: &str, comparisons: &[Comparison]) -> String {
    let rule = "=".repeat(COMPARISON_RULE_WIDTH);
    let mut lines = vec![rule.clone(), title.to_string(), rule.clone()];
    for comparison in comparisons {
        let sign = comparison.sign();
        lines.push(String::new());
        lines.push(format!("{}:", comparison.name));
        lines.push(format!("  before: {} {}", comparison.before, comparison.unit));
        lines.push(format!("  after:  {} {}", comparison.after, comparison.unit));
        lines.push(format!(
            "  change: {sign}{} {} ({sign}{:.2}%)",
            comparison.difference().abs(),
            comparison.unit,
            comparison.percentage().abs()
        ));
    }
    lines.push(String::new());
    lines.push(rule);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_create_report_with_missing_values() {
        let metrics = PerformanceMetrics {
            first_render_ms: Some(12.5),
            fmp_ms: None,
            data_load_ms: None,
            list_item_count: 0,
        };
        let report = create_performance_report(&metrics);

        assert_eq!(report.title, REPORT_TITLE);
        assert_eq!(report.metrics.len(), 5);
        assert_eq!(report.metrics[0].value, MetricValue::Number(12.5));
        assert_eq!(report.metrics[1].value, MetricValue::Missing("not reached"));
        assert_eq!(report.metrics[4].value, MetricValue::Number(0.0));
    }

    #[test]
    fn test_format_report() {
        let metrics = PerformanceMetrics {
            first_render_ms: Some(3.0),
            fmp_ms: Some(120.25),
            data_load_ms: Some(100.0),
            list_item_count: 10,
        };
        let formatted = format_performance_report(&create_performance_report(&metrics));
        let lines: Vec<&str> = formatted.lines().collect();

        assert_eq!(lines[0], "=".repeat(50));
        assert_eq!(lines[1], REPORT_TITLE);
        assert!(lines[2].starts_with("Time: "));
        assert_eq!(lines[4], "First render            : 3.00 ms");
        assert_eq!(lines[5], "First meaningful paint  : 120.25 ms");
        assert_eq!(lines[7], "First screen items      : 10.00 items");
        assert_eq!(lines.last().copied(), Some("=".repeat(50).as_str()));
    }

    #[rstest]
    #[case(1000.0, 200.0, 800.0, 80.0)]
    #[case(100.0, 150.0, -50.0, -50.0)]
    #[case(0.0, 395.0, -395.0, 0.0)]
    #[case(10.0, 10.0, 0.0, 0.0)]
    fn test_comparison_figures(
        #[case] before: f64,
        #[case] after: f64,
        #[case] difference: f64,
        #[case] percentage: f64,
    ) {
        let comparison = Comparison {
            name: "x",
            before,
            after,
            unit: "ms",
        };
        assert_eq!(comparison.difference(), difference);
        assert_eq!(comparison.percentage(), percentage);
    }

    #[test]
    fn test_format_comparison_signs() {
        let before = PerformanceSample {
            first_render_ms: 1000.0,
            fmp_ms: 0.0,
            data_load_ms: 100.0,
            list_item_count: 100,
        };
        let after = PerformanceSample {
            first_render_ms: 200.0,
            fmp_ms: 395.0,
            data_load_ms: 100.0,
            list_item_count: 10,
        };
        let formatted = format_comparison("Comparison", &compare_performance(&before, &after));

        assert!(formatted.contains("  change: -800 ms (-80.00%)"));
        assert!(formatted.contains("  change: +395 ms (+0.00%)"));
        assert!(formatted.contains("  change: 0 ms (0.00%)"));
        assert!(formatted.contains("  change: -90 items (-90.00%)"));
    }
}
