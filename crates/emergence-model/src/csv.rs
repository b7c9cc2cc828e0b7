//! CSV export of a series.
//!
//! One line per row, CRLF-separated, with a connected value and a multiple
//! per curve. A cell past a curve's agent count is left empty, so it stays
//! distinguishable from a computed value of zero. Every field is numeric or
//! empty, so nothing is quoted.

use std::fmt::Write;

use crate::formula::ratio;
use crate::series::Series;

/// Default file name for exported tables.
pub const CSV_FILE_NAME: &str = "emergence-risk-calculator.csv";

/// Line terminator.
pub const CRLF: &str = "\r\n";

/// Render the header line for the given scenario keys.
pub fn header(keys: &[String]) -> String {
    let mut fields = vec![
        "agents".to_string(),
        "baseline_linear".to_string(),
        "current_connected".to_string(),
        "current_multiple".to_string(),
    ];
    for key in keys {
        fields.push(format!("{key}_connected"));
        fields.push(format!("{key}_multiple"));
    }
    fields.join(",")
}

/// Render the whole series as CSV text.
pub fn to_csv(series: &Series) -> String {
    let mut lines = Vec::with_capacity(series.len() + 1);
    lines.push(header(series.keys()));

    for row in series.rows() {
        let mut line = String::new();
        let _ = write!(line, "{},{}", row.agents, row.baseline);
        for value in std::iter::once(row.current).chain(row.scenarios.iter().copied()) {
            push_curve(&mut line, value, row.baseline);
        }
        lines.push(line);
    }

    lines.join(CRLF)
}

fn push_curve(line: &mut String, value: Option<f64>, baseline: f64) {
    line.push(',');
    if let Some(value) = value {
        let _ = write!(line, "{value}");
    }
    line.push(',');
    if let Some(value) = value.filter(|_| baseline > 0.0) {
        let _ = write!(line, "{}", ratio(value, baseline));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::formula::ModelConstants;
    use crate::series::generate;
    use emergence_topology::Topology;

    #[test]
    fn header_lists_each_scenario_twice() {
        let keys = vec!["s_a".to_string(), "s_b".to_string()];
        assert_eq!(
            header(&keys),
            "agents,baseline_linear,current_connected,current_multiple,\
             s_a_connected,s_a_multiple,s_b_connected,s_b_multiple"
        );
    }

    #[test]
    fn small_table_exact() {
        let primary = Configuration::clamped(2, 5, 1, Topology::Pipeline);
        let series = generate(&primary, Vec::<(String, Configuration)>::new(), &ModelConstants::STANDARD);
        let csv = to_csv(&series);
        let lines: Vec<_> = csv.split(CRLF).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,1,1,1");
        let expected = crate::formula::evaluate(2, 1, 5, &ModelConstants::STANDARD)
            .unwrap()
            .connected;
        assert_eq!(lines[2], format!("2,2,{},{}", expected, expected / 2.0));
        assert!(!csv.ends_with(CRLF));
    }

    #[test]
    fn row_count_and_empty_cells() {
        let primary = Configuration::clamped(3, 5, 2, Topology::BoundedDegree);
        let other = Configuration::clamped(6, 4, 2, Topology::HubAndSpoke);
        let series = generate(&primary, [("s_o", other)], &ModelConstants::STANDARD);
        let csv = to_csv(&series);
        let lines: Vec<_> = csv.split(CRLF).collect();

        assert_eq!(lines.len(), series.len() + 1);
        for line in &lines[1..] {
            let fields: Vec<_> = line.split(',').collect();
            assert_eq!(fields.len(), 6);
            let agents: u32 = fields[0].parse().unwrap();
            assert_eq!(fields[2].is_empty(), agents > 3);
            assert_eq!(fields[3].is_empty(), agents > 3);
            assert!(!fields[4].is_empty());
            assert!(!fields[5].is_empty());
        }
    }

    #[test]
    fn zero_baseline_leaves_multiple_empty() {
        let zero = ModelConstants {
            r0: 0.0,
            ..ModelConstants::STANDARD
        };
        let primary = Configuration::clamped(2, 5, 1, Topology::BoundedDegree);
        let series = generate(&primary, Vec::<(String, Configuration)>::new(), &zero);
        let csv = to_csv(&series);
        let last = csv.split(CRLF).last().unwrap();
        let fields: Vec<_> = last.split(',').collect();
        assert_eq!(fields[1], "0");
        assert!(!fields[2].is_empty());
        assert!(fields[3].is_empty());
    }
}
