//! Derived values shown next to the chart.

use serde::Serialize;

use crate::config::Configuration;
use crate::formula::ratio;
use crate::series::Series;

/// Y-axis upper bound used when every value is zero or absent.
pub const DEFAULT_AXIS_MAX: f64 = 1.0;

/// Headline numbers at the primary agent count, plus axis scaling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Primary agent count the headline values describe.
    pub agents: u32,
    /// Edge count of the primary configuration.
    pub edges: u64,
    /// Linear baseline at the primary agent count.
    pub baseline: f64,
    /// Connected value at the primary agent count.
    pub connected: f64,
    /// `connected / baseline`, or 0 when the baseline is not positive.
    pub risk_multiple: f64,
    /// Rounded risk multiple, e.g. `"46x"`.
    pub display_multiple: String,
    /// Largest finite value in the series, for axis scaling.
    pub y_axis_max: f64,
}

impl Metrics {
    /// Derive metrics from a series generated for `primary`.
    pub fn from_series(series: &Series, primary: &Configuration) -> Self {
        let (baseline, connected) = series
            .row(primary.agents())
            .map(|row| (row.baseline, row.current.unwrap_or(0.0)))
            .unwrap_or((0.0, 0.0));
        let risk_multiple = ratio(connected, baseline);

        Self {
            agents: primary.agents(),
            edges: primary.edges(),
            baseline,
            connected,
            risk_multiple,
            display_multiple: format_multiple(risk_multiple),
            y_axis_max: axis_max(series),
        }
    }
}

/// Largest finite value in the series, or [`DEFAULT_AXIS_MAX`] if none is positive.
pub fn axis_max(series: &Series) -> f64 {
    match series.max_value() {
        Some(max) if max > 0.0 => max,
        _ => DEFAULT_AXIS_MAX,
    }
}

/// Two-decimal on-screen rendering.
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

/// Risk multiple rounded to the nearest integer, e.g. `"46x"`.
pub fn format_multiple(multiple: f64) -> String {
    format!("{}x", multiple.round() as i64)
}
