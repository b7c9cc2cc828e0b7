//! Compare and saved scenario lists.
//!
//! Both lists are values: every operation borrows the current list and
//! returns the next one, and every operation is total.
//!
//! # Capacity
//!
//! - Compare list: at most [`COMPARE_CAP`] entries in insertion order.
//!   The list is truncated to its first entries after an append, so pinning
//!   onto a full list drops the new entry.
//! - Saved list: at most [`SAVED_CAP`] entries, newest first. Saving onto a
//!   full list drops the oldest entry.

use emergence_model::Configuration;
use serde::Serialize;

use crate::scenario::{compare_default_name, Scenario, SAVED_DEFAULT_NAME};

/// Maximum number of pinned compare scenarios.
pub const COMPARE_CAP: usize = 8;

/// Maximum number of saved scenarios.
pub const SAVED_CAP: usize = 20;

/// Copy a scenario's values onto the primary configuration.
pub fn apply(scenario: &Scenario) -> Configuration {
    scenario.config.normalized()
}

fn non_blank(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.trim().is_empty())
}

/// Pinned scenarios shown alongside the primary curve.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CompareList(Vec<Scenario>);

impl CompareList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing scenarios, keeping the first [`COMPARE_CAP`].
    pub fn from_scenarios(mut scenarios: Vec<Scenario>) -> Self {
        scenarios.truncate(COMPARE_CAP);
        Self(scenarios)
    }

    /// Pin a configuration under a fresh identifier.
    ///
    /// Without a usable name the entry is called `Scenario {position}`.
    pub fn pin(&self, config: Configuration, name: Option<&str>) -> Self {
        let name = non_blank(name)
            .map(str::to_string)
            .unwrap_or_else(|| compare_default_name(self.0.len()));
        self.append(Scenario::new(config.normalized(), name))
    }

    /// Pin a copy of a saved scenario under a fresh identifier.
    pub fn add_saved(&self, saved: &Scenario) -> Self {
        self.pin(saved.config, Some(saved.name.as_str()))
    }

    fn append(&self, scenario: Scenario) -> Self {
        let mut next = self.0.clone();
        next.push(scenario);
        if next.len() > COMPARE_CAP {
            tracing::debug!(cap = COMPARE_CAP, "compare list full, dropping new entry");
            next.truncate(COMPARE_CAP);
        }
        Self(next)
    }

    /// Remove by identifier. No-op if absent.
    pub fn unpin(&self, id: &str) -> Self {
        Self(self.0.iter().filter(|s| s.id != id).cloned().collect())
    }

    /// Rename by identifier. Blank names and unknown identifiers are ignored.
    pub fn rename(&self, id: &str, name: &str) -> Self {
        Self(rename_in(&self.0, id, name))
    }

    /// An empty list.
    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Look up by identifier.
    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.0.iter().find(|s| s.id == id)
    }

    /// Scenarios in insertion order.
    pub fn as_slice(&self) -> &[Scenario] {
        &self.0
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.0.iter()
    }

    /// Number of pinned scenarios.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is pinned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether another pin would be dropped.
    pub fn is_full(&self) -> bool {
        self.0.len() >= COMPARE_CAP
    }

    /// `(column key, configuration)` pairs for series generation.
    pub fn columns(&self) -> Vec<(String, Configuration)> {
        self.0.iter().map(|s| (s.column_key(), s.config)).collect()
    }
}

impl<'a> IntoIterator for &'a CompareList {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Scenarios kept across sessions, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SavedList(Vec<Scenario>);

impl SavedList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing scenarios, keeping the first [`SAVED_CAP`].
    pub fn from_scenarios(mut scenarios: Vec<Scenario>) -> Self {
        scenarios.truncate(SAVED_CAP);
        Self(scenarios)
    }

    /// Save a copy of a scenario's values under a fresh identifier.
    ///
    /// The copy goes to the front. A blank name becomes `Saved`.
    pub fn save(&self, scenario: &Scenario) -> Self {
        let name = non_blank(Some(scenario.name.as_str())).unwrap_or(SAVED_DEFAULT_NAME);
        let copy = Scenario::new(scenario.config.normalized(), name);

        let mut next = Vec::with_capacity(self.0.len() + 1);
        next.push(copy);
        next.extend(self.0.iter().cloned());
        if next.len() > SAVED_CAP {
            tracing::debug!(cap = SAVED_CAP, "saved list full, dropping oldest entry");
            next.truncate(SAVED_CAP);
        }
        Self(next)
    }

    /// Save a configuration directly.
    pub fn save_config(&self, config: Configuration, name: Option<&str>) -> Self {
        let name = non_blank(name).unwrap_or(SAVED_DEFAULT_NAME);
        self.save(&Scenario::new(config, name))
    }

    /// Remove by identifier. No-op if absent.
    pub fn delete(&self, id: &str) -> Self {
        Self(self.0.iter().filter(|s| s.id != id).cloned().collect())
    }

    /// Rename by identifier. Blank names and unknown identifiers are ignored.
    pub fn rename(&self, id: &str, name: &str) -> Self {
        Self(rename_in(&self.0, id, name))
    }

    /// Look up by identifier.
    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.0.iter().find(|s| s.id == id)
    }

    /// Scenarios, newest first.
    pub fn as_slice(&self) -> &[Scenario] {
        &self.0
    }

    /// Iterate newest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.0.iter()
    }

    /// Number of saved scenarios.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SavedList {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn rename_in(scenarios: &[Scenario], id: &str, name: &str) -> Vec<Scenario> {
    scenarios
        .iter()
        .map(|s| match non_blank(Some(name)) {
            Some(name) if s.id == id => Scenario {
                name: name.to_string(),
                ..s.clone()
            },
            _ => s.clone(),
        })
        .collect()
}
