//! Text and JSON rendering of simulation results

use std::fmt::Write;

use serde::Serialize;
use trialsim_core::analysis::ColumnSummary;
use trialsim_core::{PipelineParameters, SimulationSummary, TimeUnit};

const RULE_WIDTH: usize = 50;
const SECTION_WIDTH: usize = 30;

/// Insert thousands separators into the integer part of `value`
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a count with thousands separators
pub fn format_count(value: usize) -> String {
    group_thousands(value as u64)
}

/// Format an amount in millions, e.g. `$1,234.5M`
pub fn format_millions(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}M");
    }
    let abs_value = value.abs();
    let whole = abs_value.trunc() as u64;
    let tenths = ((abs_value - whole as f64) * 10.0).round() as u64;
    // Rounding 0.95 up carries into the whole part
    let (whole, tenths) = if tenths == 10 { (whole + 1, 0) } else { (whole, tenths) };

    let sign = if value < 0.0 && (whole > 0 || tenths > 0) { "-" } else { "" };
    format!("{}${}.{}M", sign, group_thousands(whole), tenths)
}

/// Format a ratio as a percentage with one decimal
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn unit_label(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Years => "years",
        TimeUnit::Months => "months",
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}:");
    let _ = writeln!(out, "{}", "-".repeat(SECTION_WIDTH));
}

/// Render the human-readable report.
///
/// `source` names where the parameters came from (scenario or file).
pub fn render_text(
    source: &str,
    params: &PipelineParameters,
    summary: &SimulationSummary,
    description: &[ColumnSummary],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Pipeline Monte Carlo Simulator");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Parameters: {source}");

    heading(&mut out, "SIMULATION RESULTS");
    let overall = &summary.overall;
    let financial = &summary.financial;
    let _ = writeln!(out, "Total Simulations: {}", format_count(overall.total_simulations));
    let _ = writeln!(out, "Success Rate: {}", format_percentage(overall.success_rate));
    let _ = writeln!(out, "Mean Cost: {}", format_millions(summary.costs.mean_cost));
    let _ = writeln!(out, "Mean NPV: {}", format_millions(financial.mean_npv));
    let _ = writeln!(out, "Mean ROI: {}", format_percentage(financial.mean_roi));
    let _ = writeln!(
        out,
        "Positive NPV Rate: {}",
        format_percentage(financial.positive_npv_rate)
    );

    if !summary.failures_by_stage.is_empty() {
        heading(&mut out, "FAILURES BY STAGE");
        // Pipeline order first, then anything not in the current stage list
        let mut names: Vec<&str> = params
            .stages()
            .iter()
            .map(|s| s.name())
            .filter(|name| summary.failures_by_stage.contains_key(*name))
            .collect();
        for name in summary.failures_by_stage.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        for name in names {
            let count = summary.failures_by_stage[name];
            let share = count as f64 / overall.total_simulations as f64;
            let _ = writeln!(
                out,
                "{name}: {} ({})",
                format_count(count),
                format_percentage(share)
            );
        }
    }

    heading(&mut out, "EXPECTED VALUES");
    let _ = writeln!(out, "Expected Cost: {}", format_millions(params.total_expected_cost()));
    let _ = writeln!(
        out,
        "Expected Time: {:.1} {}",
        params.total_expected_time(),
        unit_label(params.time_unit())
    );
    let _ = writeln!(
        out,
        "Compounded Success Probability: {}",
        format_percentage(params.overall_success_probability())
    );

    heading(&mut out, "DETAILED STATISTICS");
    out.push_str(&render_description(description));
    out
}

/// Render the per-column statistics as a fixed-width table
pub fn render_description(description: &[ColumnSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8}{:>10}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}",
        "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for column in description {
        let _ = writeln!(
            out,
            "{:<8}{:>10}{:>12.3}{:>12.3}{:>12.3}{:>12.3}{:>12.3}{:>12.3}{:>12.3}",
            column.column.name(),
            column.count,
            column.mean,
            column.std,
            column.min,
            column.p25,
            column.p50,
            column.p75,
            column.max
        );
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    summary: &'a SimulationSummary,
    description: &'a [ColumnSummary],
}

/// Render summary and per-column statistics as pretty JSON
pub fn render_json(
    source: &str,
    summary: &SimulationSummary,
    description: &[ColumnSummary],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        source,
        summary,
        description,
    })
}
