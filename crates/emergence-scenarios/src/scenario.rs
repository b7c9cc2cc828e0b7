//! Scenario model and the boundary sanitizer.
//!
//! Scenarios arrive from two untrusted places: the persisted store and share
//! links. Both go through [`sanitize_scenarios`], which repairs or drops each
//! field independently instead of rejecting the whole list.

use std::collections::HashSet;

use emergence_model::{Configuration, Topology};
use serde::Serialize;
use serde_json::{Map, Value};

/// Default name for entries on the saved list.
pub const SAVED_DEFAULT_NAME: &str = "Saved";

/// Longest identifier accepted from untrusted input.
const MAX_ID_LEN: usize = 64;

/// A named, identified configuration.
///
/// Serializes as `{id, name, n, autonomy, k, topology}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Stable unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Parameter values.
    #[serde(flatten)]
    pub config: Configuration,
}

impl Scenario {
    /// Create a scenario with a fresh identifier.
    pub fn new(config: Configuration, name: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            name: name.into(),
            config,
        }
    }

    /// Copy of this scenario's values under a fresh identifier.
    pub fn duplicate(&self) -> Self {
        Self::new(self.config, self.name.clone())
    }

    /// Chart and CSV column key. Stable for the scenario's lifetime.
    pub fn column_key(&self) -> String {
        format!("s_{}", self.id)
    }
}

/// A new unique identifier.
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Default name for the compare-list entry at `index` (0-based).
pub fn compare_default_name(index: usize) -> String {
    format!("Scenario {}", index + 1)
}

/// Sanitize an untrusted JSON array of scenarios.
///
/// - a non-array yields an empty list
/// - non-object entries are dropped
/// - missing or unusable fields take their defaults, then every value is clamped
/// - a repeated identifier is replaced with a fresh one
/// - the result is truncated to `cap` entries
pub fn sanitize_scenarios<F>(value: &Value, default_name: F, cap: usize) -> Vec<Scenario>
where
    F: Fn(usize) -> String,
{
    let Some(entries) = value.as_array() else {
        tracing::warn!("discarding scenario list: expected a JSON array");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let scenarios: Vec<Scenario> = entries
        .iter()
        .filter_map(Value::as_object)
        .take(cap)
        .enumerate()
        .map(|(index, fields)| {
            let mut scenario = sanitize_scenario(fields, || default_name(index));
            if !seen.insert(scenario.id.clone()) {
                tracing::debug!(id = %scenario.id, "replacing repeated scenario id");
                scenario.id = fresh_id();
                seen.insert(scenario.id.clone());
            }
            scenario
        })
        .collect();

    if scenarios.len() < entries.len().min(cap) {
        tracing::debug!(
            kept = scenarios.len(),
            received = entries.len(),
            "dropped malformed scenario entries"
        );
    }
    scenarios
}

/// Sanitize a single scenario object.
pub fn sanitize_scenario<F>(fields: &Map<String, Value>, default_name: F) -> Scenario
where
    F: FnOnce() -> String,
{
    let defaults = Configuration::DEFAULT;
    let config = Configuration::clamped(
        int_field(fields.get("n")).unwrap_or(defaults.agents() as i64),
        int_field(fields.get("autonomy")).unwrap_or(defaults.autonomy() as i64),
        int_field(fields.get("k")).unwrap_or(defaults.cap() as i64),
        topology_field(fields.get("topology")),
    );

    let id = fields
        .get("id")
        .and_then(id_field)
        .unwrap_or_else(fresh_id);

    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(default_name);

    Scenario { id, name, config }
}

/// Coerce a JSON number or numeric string to the nearest integer.
pub fn int_field(value: Option<&Value>) -> Option<i64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_number(s)?,
        _ => return None,
    };
    Some(number.round() as i64)
}

/// Parse a finite number from text, ignoring surrounding whitespace.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Topology from a code, defaulting to bounded degree.
pub fn topology_field(value: Option<&Value>) -> Topology {
    value
        .and_then(Value::as_str)
        .and_then(Topology::from_code)
        .unwrap_or_default()
}

fn id_field(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    is_valid_id(&id).then_some(id)
}

/// Identifiers are non-empty ASCII alphanumerics, `-` and `_`.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
