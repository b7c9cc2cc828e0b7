//! Interactive session state.
//!
//! A [`Session`] owns the primary configuration, both scenario lists and the
//! saved-scenario store. Derived data (series, metrics, CSV, share link) is
//! computed on demand from the current values and never cached.
//!
//! Store failures are logged and swallowed; the in-memory saved list stays
//! authoritative for the rest of the session.

use emergence_model::{generate, to_csv, Configuration, Metrics, ModelConstants, Series};

use crate::codec::{self, SharedState};
use crate::lists::{apply, CompareList, SavedList};
use crate::scenario::Scenario;
use crate::store::ScenarioStore;

/// Calculator state bound to a saved-scenario store.
#[derive(Debug)]
pub struct Session<S> {
    primary: Configuration,
    compare: CompareList,
    saved: SavedList,
    constants: ModelConstants,
    store: S,
}

impl<S: ScenarioStore> Session<S> {
    /// Start from the default configuration, loading saved scenarios.
    pub fn new(store: S) -> Self {
        Self::with_state(store, SharedState::default())
    }

    /// Start from a decoded share link, loading saved scenarios.
    pub fn from_share_query(store: S, query: &str) -> Self {
        Self::with_state(store, codec::decode(query))
    }

    /// Start from explicit state, loading saved scenarios.
    pub fn with_state(store: S, state: SharedState) -> Self {
        let saved = match store.load() {
            Ok(scenarios) => SavedList::from_scenarios(scenarios),
            Err(e) => {
                tracing::warn!(error = %e, "saved scenarios unavailable, starting empty");
                SavedList::new()
            }
        };
        Self {
            primary: state.primary.normalized(),
            compare: state.compare,
            saved,
            constants: ModelConstants::STANDARD,
            store,
        }
    }

    /// Use different model constants.
    pub fn with_constants(mut self, constants: ModelConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Primary configuration.
    pub fn primary(&self) -> &Configuration {
        &self.primary
    }

    /// Replace the primary configuration (clamped).
    pub fn set_primary(&mut self, config: Configuration) {
        self.primary = config.normalized();
    }

    /// Pinned compare scenarios.
    pub fn compare(&self) -> &CompareList {
        &self.compare
    }

    /// Saved scenarios, newest first.
    pub fn saved(&self) -> &SavedList {
        &self.saved
    }

    /// Model constants in use.
    pub fn constants(&self) -> &ModelConstants {
        &self.constants
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Compare list ---

    /// Pin a configuration. Returns the new entry's id, or `None` if the
    /// list was full and the pin was dropped.
    pub fn pin(&mut self, config: Configuration, name: Option<&str>) -> Option<String> {
        let next = self.compare.pin(config, name);
        let id = newest_id(&self.compare, &next);
        self.compare = next;
        id
    }

    /// Pin the current primary configuration.
    pub fn pin_current(&mut self, name: Option<&str>) -> Option<String> {
        self.pin(self.primary, name)
    }

    /// Remove a pinned scenario.
    pub fn unpin(&mut self, id: &str) {
        self.compare = self.compare.unpin(id);
    }

    /// Rename a pinned scenario.
    pub fn rename_pinned(&mut self, id: &str, name: &str) {
        self.compare = self.compare.rename(id, name);
    }

    /// Pin a copy of a saved scenario. Returns the new entry's id.
    pub fn add_saved_to_compare(&mut self, saved_id: &str) -> Option<String> {
        let saved = self.saved.get(saved_id)?.clone();
        let next = self.compare.add_saved(&saved);
        let id = newest_id(&self.compare, &next);
        self.compare = next;
        id
    }

    // --- Saved list ---

    /// Save a copy of any scenario. Returns the saved copy's id.
    pub fn save(&mut self, scenario: &Scenario) -> String {
        self.saved = self.saved.save(scenario);
        self.persist();
        self.front_saved_id()
    }

    /// Save the current primary configuration.
    pub fn save_current(&mut self, name: Option<&str>) -> String {
        self.saved = self.saved.save_config(self.primary, name);
        self.persist();
        self.front_saved_id()
    }

    /// Save a copy of a pinned scenario.
    pub fn save_pinned(&mut self, id: &str) -> Option<String> {
        let pinned = self.compare.get(id)?.clone();
        Some(self.save(&pinned))
    }

    /// Delete a saved scenario.
    pub fn delete_saved(&mut self, id: &str) {
        self.saved = self.saved.delete(id);
        self.persist();
    }

    /// Rename a saved scenario.
    pub fn rename_saved(&mut self, id: &str, name: &str) {
        self.saved = self.saved.rename(id, name);
        self.persist();
    }

    /// Copy a pinned or saved scenario's values onto the primary.
    ///
    /// Returns whether a scenario with that id was found.
    pub fn apply(&mut self, id: &str) -> bool {
        match self.compare.get(id).or_else(|| self.saved.get(id)) {
            Some(scenario) => {
                self.primary = apply(scenario);
                true
            }
            None => false,
        }
    }

    fn front_saved_id(&self) -> String {
        self.saved
            .as_slice()
            .first()
            .map(|s| s.id.clone())
            .unwrap_or_default()
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(self.saved.as_slice()) {
            tracing::warn!(error = %e, "failed to persist saved scenarios");
        }
    }

    // --- Derived data ---

    /// Series for the primary and every pinned scenario.
    pub fn series(&self) -> Series {
        generate(&self.primary, self.compare.columns(), &self.constants)
    }

    /// Headline metrics.
    pub fn metrics(&self) -> Metrics {
        Metrics::from_series(&self.series(), &self.primary)
    }

    /// CSV export of the current series.
    pub fn csv(&self) -> String {
        to_csv(&self.series())
    }

    /// Current shareable state.
    pub fn shared_state(&self) -> SharedState {
        SharedState {
            primary: self.primary,
            compare: self.compare.clone(),
        }
    }

    /// Current state as a share query string.
    pub fn share_query(&self) -> String {
        codec::encode(&self.primary, &self.compare)
    }
}

fn newest_id(before: &CompareList, after: &CompareList) -> Option<String> {
    (after.len() > before.len())
        .then(|| after.as_slice().last().map(|s| s.id.clone()))
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::{COMPARE_CAP, SAVED_CAP};
    use crate::store::MemoryStore;
    use emergence_model::Topology;

    #[test]
    fn starts_from_defaults() {
        let session = Session::new(MemoryStore::new());
        assert_eq!(*session.primary(), Configuration::DEFAULT);
        assert!(session.compare().is_empty());
        assert!(session.saved().is_empty());
        assert_eq!(session.metrics().display_multiple, "46x");
    }

    #[test]
    fn loads_saved_from_store() {
        let store = MemoryStore::with_contents(r#"[{"id":"a1","name":"Old","n":9,"autonomy":2,"k":8,"topology":"pipeline"}]"#);
        let session = Session::new(store);
        assert_eq!(session.saved().len(), 1);
        assert_eq!(session.saved().as_slice()[0].name, "Old");
    }

    #[test]
    fn pinning_extends_series() {
        let mut session = Session::new(MemoryStore::new());
        let id = session
            .pin(Configuration::clamped(60, 5, 3, Topology::FullMesh), None)
            .unwrap();
        let series = session.series();
        assert_eq!(series.len(), 60);
        let key = session.compare().get(&id).unwrap().column_key();
        assert_eq!(series.keys(), [key]);
        assert!(session.csv().lines().next().unwrap().contains("_multiple"));
    }

    #[test]
    fn pin_beyond_cap_returns_none() {
        let mut session = Session::new(MemoryStore::new());
        for _ in 0..COMPARE_CAP {
            assert!(session.pin_current(None).is_some());
        }
        assert!(session.pin_current(Some("extra")).is_none());
        assert_eq!(session.compare().len(), COMPARE_CAP);
    }

    #[test]
    fn saving_persists_to_store() {
        let mut session = Session::new(MemoryStore::new());
        let id = session.save_current(Some("Mine"));
        assert_eq!(session.saved().as_slice()[0].id, id);

        let reloaded = MemoryStore::with_contents(session.store().contents().unwrap());
        let loaded = reloaded.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Mine");

        session.delete_saved(&id);
        let reloaded = MemoryStore::with_contents(session.store().contents().unwrap());
        assert!(reloaded.load().unwrap().is_empty());
    }

    #[test]
    fn saved_and_pinned_copies_are_independent() {
        let mut session = Session::new(MemoryStore::new());
        let pinned = session.pin_current(Some("Team")).unwrap();
        let saved = session.save_pinned(&pinned).unwrap();
        assert_ne!(pinned, saved);

        session.rename_saved(&saved, "Renamed");
        assert_eq!(session.compare().get(&pinned).unwrap().name, "Team");

        session.unpin(&pinned);
        assert!(session.saved().get(&saved).is_some());
    }

    #[test]
    fn store_failure_is_swallowed() {
        let mut session = Session::new(MemoryStore::new().fail_writes());
        for _ in 0..(SAVED_CAP + 3) {
            session.save_current(None);
        }
        assert_eq!(session.saved().len(), SAVED_CAP);
        assert!(session.store().contents().is_none());
    }

    #[test]
    fn unreadable_store_starts_empty_and_still_saves() {
        let store = MemoryStore::with_contents(r#"[{"id":"a1","name":"Old"}]"#).fail_reads();
        let mut session = Session::new(store);
        assert!(session.saved().is_empty());

        let id = session.save_current(Some("Fresh"));
        assert_eq!(session.saved().len(), 1);
        assert_eq!(session.saved().as_slice()[0].id, id);
        assert!(session.store().contents().unwrap().contains("Fresh"));
    }

    #[test]
    fn renaming_a_pin_keeps_its_column() {
        let mut session = Session::new(MemoryStore::new());
        let id = session.pin_current(None).unwrap();
        let key = session.compare().get(&id).unwrap().column_key();

        session.rename_pinned(&id, "Baseline team");
        let pinned = session.compare().get(&id).unwrap();
        assert_eq!(pinned.name, "Baseline team");
        assert_eq!(pinned.column_key(), key);

        session.rename_pinned(&id, "   ");
        assert_eq!(session.compare().get(&id).unwrap().name, "Baseline team");
    }

    #[test]
    fn custom_constants_flow_into_metrics() {
        let constants = ModelConstants {
            alpha: 0.0,
            gamma: 0.0,
            ..ModelConstants::STANDARD
        };
        let session = Session::new(MemoryStore::new()).with_constants(constants);
        assert_eq!(*session.constants(), constants);

        let metrics = session.metrics();
        assert_eq!(metrics.connected, metrics.baseline);
        assert_eq!(metrics.display_multiple, "1x");
    }

    #[test]
    fn apply_from_either_list() {
        let mut session = Session::new(MemoryStore::new());
        let target = Configuration::clamped(150, 7, 9, Topology::HubAndSpoke);
        let pinned = session.pin(target, None).unwrap();
        assert!(session.apply(&pinned));
        assert_eq!(*session.primary(), target);

        session.set_primary(Configuration::DEFAULT);
        let saved = session.save(&Scenario::new(target, "S"));
        assert!(session.apply(&saved));
        assert_eq!(*session.primary(), target);

        assert!(!session.apply("nope"));
    }

    #[test]
    fn saved_entry_can_be_compared() {
        let mut session = Session::new(MemoryStore::new());
        let saved = session.save_current(Some("Keep"));
        let pinned = session.add_saved_to_compare(&saved).unwrap();
        assert_ne!(pinned, saved);
        assert_eq!(session.compare().get(&pinned).unwrap().name, "Keep");
        assert!(session.add_saved_to_compare("missing").is_none());
    }

    #[test]
    fn share_round_trip_through_session() {
        let mut session = Session::new(MemoryStore::new());
        session.set_primary(Configuration::clamped(44, 3, 2, Topology::Pipeline));
        session.pin(Configuration::clamped(10, 10, 9, Topology::FullMesh), Some("Mesh"));

        let restored = Session::from_share_query(MemoryStore::new(), &session.share_query());
        assert_eq!(restored.shared_state(), session.shared_state());
        assert_eq!(restored.series(), session.series());
    }
}
