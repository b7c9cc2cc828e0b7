//! Series generation over the agent-count domain.
//!
//! A series has one row per agent count from 1 to the largest agent count
//! among the primary configuration and the compare scenarios. Each curve is
//! defined only up to its own agent count; beyond it the cell is `None`.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::config::{Configuration, MIN_AGENTS};
use crate::formula::{linear, ModelConstants};

/// Column key of the linear baseline.
pub const BASELINE_KEY: &str = "baseline";

/// Column key of the primary configuration's connected curve.
pub const CURRENT_KEY: &str = "current";

/// One agent count's values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Agent count this row describes.
    pub agents: u32,
    /// Linear baseline, always defined.
    pub baseline: f64,
    /// Primary connected value, `None` past the primary agent count.
    pub current: Option<f64>,
    /// Compare-scenario values, aligned with [`Series::keys`].
    pub scenarios: Vec<Option<f64>>,
}

impl Row {
    /// Iterate `(key, value)` for every column of this row.
    pub fn columns<'a>(&'a self, keys: &'a [String]) -> impl Iterator<Item = (&'a str, Option<f64>)> + 'a {
        [(BASELINE_KEY, Some(self.baseline)), (CURRENT_KEY, self.current)]
            .into_iter()
            .chain(keys.iter().map(String::as_str).zip(self.scenarios.iter().copied()))
    }

    /// Every defined value in this row.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.baseline)
            .chain(self.current)
            .chain(self.scenarios.iter().flatten().copied())
    }
}

/// Rows plus the ordered compare-scenario column keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    keys: Vec<String>,
    rows: Vec<Row>,
}

impl Series {
    /// Number of rows, i.e. the domain length.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, ordered by agent count.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Compare-scenario column keys, in compare-list order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The row for a given agent count.
    pub fn row(&self, agents: u32) -> Option<&Row> {
        let index = agents.checked_sub(MIN_AGENTS)? as usize;
        self.rows.get(index)
    }

    /// Position of a compare-scenario column.
    pub fn key_index(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Look up a single cell by agent count and column key.
    pub fn value(&self, agents: u32, key: &str) -> Option<f64> {
        let row = self.row(agents)?;
        match key {
            BASELINE_KEY => Some(row.baseline),
            CURRENT_KEY => row.current,
            _ => row.scenarios[self.key_index(key)?],
        }
    }

    /// Largest defined value across all rows and columns.
    pub fn max_value(&self) -> Option<f64> {
        self.rows
            .iter()
            .flat_map(Row::values)
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}

/// Serializes as a sequence of flat row objects with `null` for absent cells.
impl Serialize for Series {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowObject { row, keys: &self.keys })?;
        }
        seq.end()
    }
}

struct RowObject<'a> {
    row: &'a Row,
    keys: &'a [String],
}

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.keys.len()))?;
        map.serialize_entry("agents", &self.row.agents)?;
        for (key, value) in self.row.columns(self.keys) {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

/// Generate the series for a primary configuration and compare scenarios.
///
/// Each scenario is given as `(column key, configuration)`. Scenario
/// configurations are re-clamped before use.
pub fn generate<I, K>(primary: &Configuration, scenarios: I, constants: &ModelConstants) -> Series
where
    I: IntoIterator<Item = (K, Configuration)>,
    K: Into<String>,
{
    let (keys, configs): (Vec<String>, Vec<Configuration>) = scenarios
        .into_iter()
        .map(|(key, config)| (key.into(), config.normalized()))
        .unzip();

    let domain = configs
        .iter()
        .map(Configuration::agents)
        .chain([primary.agents(), MIN_AGENTS])
        .max()
        .unwrap_or(MIN_AGENTS);

    let rows = (MIN_AGENTS..=domain)
        .map(|agents| Row {
            agents,
            baseline: linear(agents, constants),
            current: curve_value(primary, agents, constants),
            scenarios: configs
                .iter()
                .map(|config| curve_value(config, agents, constants))
                .collect(),
        })
        .collect();

    tracing::debug!(domain, scenarios = keys.len(), "generated risk series");

    Series { keys, rows }
}

fn curve_value(config: &Configuration, agents: u32, constants: &ModelConstants) -> Option<f64> {
    (agents <= config.agents()).then(|| config.evaluate_at(agents, constants).connected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emergence_topology::Topology;
    use proptest::prelude::*;

    fn none() -> Vec<(String, Configuration)> {
        Vec::new()
    }

    #[test]
    fn primary_only_domain() {
        let series = generate(&Configuration::DEFAULT, none(), &ModelConstants::STANDARD);
        assert_eq!(series.len(), 30);
        assert!(series.keys().is_empty());
        assert!(series.rows().iter().all(|r| r.current.is_some()));
        assert_eq!(series.rows()[0].agents, 1);
        assert_eq!(series.rows()[29].agents, 30);
    }

    #[test]
    fn domain_extends_to_largest_scenario() {
        let primary = Configuration::clamped(10, 5, 3, Topology::BoundedDegree);
        let wide = Configuration::clamped(25, 2, 1, Topology::Pipeline);
        let narrow = Configuration::clamped(4, 9, 3, Topology::FullMesh);
        let series = generate(
            &primary,
            [("s_wide", wide), ("s_narrow", narrow)],
            &ModelConstants::STANDARD,
        );

        assert_eq!(series.len(), 25);
        assert_eq!(series.keys(), ["s_wide", "s_narrow"]);

        let row11 = series.row(11).unwrap();
        assert_eq!(row11.baseline, 11.0);
        assert_eq!(row11.current, None);
        assert!(row11.scenarios[0].is_some());
        assert_eq!(row11.scenarios[1], None);

        assert!(series.value(4, "s_narrow").is_some());
        assert_eq!(series.value(5, "s_narrow"), None);
        assert_eq!(series.value(5, "s_missing"), None);
        assert_eq!(series.value(26, BASELINE_KEY), None);
    }

    #[test]
    fn baseline_always_defined() {
        let primary = Configuration::clamped(3, 5, 2, Topology::FullMesh);
        let wide = Configuration::clamped(50, 5, 2, Topology::FullMesh);
        let series = generate(&primary, [("s_1", wide)], &ModelConstants::STANDARD);
        for row in series.rows() {
            assert_eq!(row.baseline, row.agents as f64);
        }
    }

    #[test]
    fn curve_matches_formula_at_each_count() {
        let primary = Configuration::DEFAULT;
        let series = generate(&primary, none(), &ModelConstants::STANDARD);
        let last = series.row(30).unwrap().current.unwrap();
        assert!((last - 1386.264).abs() < 1e-6);
        // agent 2 with k=3: one edge
        let p = crate::formula::evaluate(2, 1, 5, &ModelConstants::STANDARD).unwrap();
        assert_eq!(series.row(2).unwrap().current, Some(p.connected));
    }

    #[test]
    fn row_lookup_bounds() {
        let series = generate(&Configuration::DEFAULT, none(), &ModelConstants::STANDARD);
        assert!(series.row(0).is_none());
        assert!(series.row(1).is_some());
        assert!(series.row(31).is_none());
    }

    #[test]
    fn serializes_rows_with_nulls() {
        let primary = Configuration::clamped(1, 5, 0, Topology::BoundedDegree);
        let other = Configuration::clamped(2, 5, 1, Topology::Pipeline);
        let series = generate(&primary, [("s_x", other)], &ModelConstants::STANDARD);
        let json = serde_json::to_value(&series).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["agents"], 1);
        assert_eq!(rows[0]["current"], 1.0);
        assert_eq!(rows[0]["s_x"], 1.0);
        assert!(rows[1]["current"].is_null());
        assert!(rows[1]["s_x"].is_number());
    }

    #[test]
    fn max_value_covers_scenarios() {
        let primary = Configuration::clamped(5, 1, 0, Topology::BoundedDegree);
        let big = Configuration::clamped(5, 10, 4, Topology::FullMesh);
        let series = generate(&primary, [("s_big", big)], &ModelConstants::STANDARD);
        let expected = series.value(5, "s_big").unwrap();
        assert_eq!(series.max_value(), Some(expected));
    }

    proptest! {
        #[test]
        fn cells_defined_exactly_up_to_agent_count(
            n in 1i64..=200,
            m in 1i64..=200,
            k in 0i64..=20,
        ) {
            let primary = Configuration::clamped(n, 5, k, Topology::BoundedDegree);
            let other = Configuration::clamped(m, 3, k, Topology::HubAndSpoke);
            let series = generate(&primary, [("s_o", other)], &ModelConstants::STANDARD);
            prop_assert_eq!(series.len() as i64, n.max(m));
            for row in series.rows() {
                prop_assert_eq!(row.current.is_some(), (row.agents as i64) <= n);
                prop_assert_eq!(row.scenarios[0].is_some(), (row.agents as i64) <= m);
            }
        }
    }
}
