//! Runtime configuration from environment variables.

use std::path::PathBuf;

/// Default directory for persisted data.
pub const DEFAULT_DATA_DIR: &str = "./emergence-data";

/// File name of the saved-scenario store inside the data directory.
pub const STORE_FILE_NAME: &str = "saved-scenarios.json";

/// Default prefix for printed share links.
pub const DEFAULT_BASE_URL: &str = "https://example.invalid/emergence-risk-calculator";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding persisted data
    pub data_dir: PathBuf,

    /// Saved-scenario JSON file
    pub store_file: PathBuf,

    /// Prefix for share links
    pub base_url: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl CliConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(
            lookup("EMERGENCE_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );

        let store_file = lookup("EMERGENCE_STORE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(STORE_FILE_NAME));

        let base_url = lookup("EMERGENCE_BASE_URL")
            .map(|url| url.trim_end_matches(&['?', '/'][..]).to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            data_dir,
            store_file,
            base_url,
        }
    }

    /// Full share link for a query string.
    pub fn share_link(&self, query: &str) -> String {
        format!("{}?{}", self.base_url, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = CliConfig::from_lookup(lookup(&[]));
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.store_file, PathBuf::from(DEFAULT_DATA_DIR).join(STORE_FILE_NAME));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn store_file_follows_data_dir() {
        let config = CliConfig::from_lookup(lookup(&[("EMERGENCE_DATA_DIR", "/tmp/em")]));
        assert_eq!(config.store_file, PathBuf::from("/tmp/em").join(STORE_FILE_NAME));
    }

    #[test]
    fn explicit_store_file_wins() {
        let config = CliConfig::from_lookup(lookup(&[
            ("EMERGENCE_DATA_DIR", "/tmp/em"),
            ("EMERGENCE_STORE_FILE", "/var/saved.json"),
        ]));
        assert_eq!(config.store_file, PathBuf::from("/var/saved.json"));
    }

    #[test]
    fn share_link_joins_cleanly() {
        let config = CliConfig::from_lookup(lookup(&[("EMERGENCE_BASE_URL", "https://calc.test/app/")]));
        assert_eq!(config.share_link("n=3"), "https://calc.test/app?n=3");

        let blank = CliConfig::from_lookup(lookup(&[("EMERGENCE_BASE_URL", "/")]));
        assert_eq!(blank.base_url, DEFAULT_BASE_URL);
    }
}
