//! Text rendering for terminal output.

use emergence_model::{format_value, Configuration, Metrics, Series};
use emergence_scenarios::{CompareList, SavedList, Scenario};

use std::fmt::Write;

/// Headline summary of the primary configuration and the compare list.
pub fn summary(primary: &Configuration, metrics: &Metrics, compare: &CompareList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Emergence Risk Calculator");
    let _ = writeln!(out, "=========================");
    let _ = writeln!(out);
    let _ = writeln!(out, "  Configuration:  {primary}");
    if !primary.topology().uses_cap() {
        let _ = writeln!(out, "                  (cap has no effect on {})", primary.topology().label());
    }
    let _ = writeln!(out, "  Edges:          {}", metrics.edges);
    let _ = writeln!(out, "  Linear risk:    {}", format_value(metrics.baseline));
    let _ = writeln!(out, "  Connected risk: {}", format_value(metrics.connected));
    let _ = writeln!(out, "  Risk multiple:  {}", metrics.display_multiple);
    let _ = writeln!(out, "  Axis max:       {}", format_value(metrics.y_axis_max));

    if !compare.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Comparing:");
        for scenario in compare {
            let _ = writeln!(out, "  {}", scenario_line(scenario));
        }
    }
    out
}

/// Series as an aligned text table, printing every `every`th row plus the last.
pub fn table(series: &Series, names: &[String], every: u32) -> String {
    let every = every.max(1) as usize;
    let mut out = String::new();

    let mut header = format!("{:>6} {:>12} {:>12}", "agents", "linear", "current");
    for name in names {
        let _ = write!(header, " {:>12}", truncate(name, 12));
    }
    let _ = writeln!(out, "{header}");

    let last = series.len().saturating_sub(1);
    for (i, row) in series.rows().iter().enumerate() {
        if i % every != 0 && i != last {
            continue;
        }
        let _ = write!(
            out,
            "{:>6} {:>12} {:>12}",
            row.agents,
            format_value(row.baseline),
            cell(row.current)
        );
        for value in &row.scenarios {
            let _ = write!(out, " {:>12}", cell(*value));
        }
        let _ = writeln!(out);
    }
    out
}

/// Saved scenarios, one per line.
pub fn saved_list(saved: &SavedList) -> String {
    if saved.is_empty() {
        return "No saved scenarios.\n".to_string();
    }
    let mut out = String::new();
    for scenario in saved {
        let _ = writeln!(out, "{}  {}", scenario.id, scenario_line(scenario));
    }
    out
}

fn scenario_line(scenario: &Scenario) -> String {
    format!("{}: {}", scenario.name, scenario.config)
}

fn cell(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_else(|| "-".to_string())
}

fn truncate(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}
