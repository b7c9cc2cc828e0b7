//! Persisted storage for saved scenarios.
//!
//! The store holds one JSON array of `{id, name, n, autonomy, k, topology}`
//! objects, capped at [`SAVED_CAP`] entries on both read and write.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::lists::SAVED_CAP;
use crate::scenario::{sanitize_scenarios, Scenario, SAVED_DEFAULT_NAME};

/// Backend holding the saved-scenario list between sessions.
pub trait ScenarioStore {
    /// Read the saved list, newest first.
    fn load(&self) -> Result<Vec<Scenario>>;

    /// Replace the saved list.
    fn save(&mut self, scenarios: &[Scenario]) -> Result<()>;
}

/// Parse persisted text into scenarios, discarding whatever is malformed.
pub fn parse_saved(text: &str) -> Vec<Scenario> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => sanitize_scenarios(&value, |_| SAVED_DEFAULT_NAME.to_string(), SAVED_CAP),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable saved scenarios");
            Vec::new()
        }
    }
}

fn capped(scenarios: &[Scenario]) -> &[Scenario] {
    &scenarios[..scenarios.len().min(SAVED_CAP)]
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
    reads_fail: bool,
    writes_fail: bool,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with raw persisted text.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            ..Self::default()
        }
    }

    /// Make every subsequent read fail, as an unavailable store would.
    pub fn fail_reads(mut self) -> Self {
        self.reads_fail = true;
        self
    }

    /// Make every subsequent write fail, as an unavailable store would.
    pub fn fail_writes(mut self) -> Self {
        self.writes_fail = true;
        self
    }

    /// Raw persisted text, if anything was written.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ScenarioStore for MemoryStore {
    fn load(&self) -> Result<Vec<Scenario>> {
        if self.reads_fail {
            return Err(Error::Storage("store is unavailable".to_string()));
        }
        Ok(self.contents.as_deref().map(parse_saved).unwrap_or_default())
    }

    fn save(&mut self, scenarios: &[Scenario]) -> Result<()> {
        if self.writes_fail {
            return Err(Error::Storage("store is unavailable".to_string()));
        }
        self.contents = Some(serde_json::to_string(capped(scenarios))?);
        Ok(())
    }
}

/// Single JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`. Nothing is touched until used.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScenarioStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Scenario>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_saved(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, scenarios: &[Scenario]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(capped(scenarios))?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), count = scenarios.len().min(SAVED_CAP), "wrote saved scenarios");
        Ok(())
    }
}
