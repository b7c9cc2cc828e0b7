//! Calculator configuration and boundary clamping.
//!
//! Every external input (CLI flags, share links, saved scenarios) passes
//! through [`Configuration::clamped`]. Out-of-range values are clamped,
//! never rejected.

use emergence_topology::{edge_count, Topology};
use serde::{Deserialize, Serialize};

use crate::formula::{self, ModelConstants, RiskPoint};

/// Smallest agent count.
pub const MIN_AGENTS: u32 = 1;

/// Largest agent count.
pub const MAX_AGENTS: u32 = 200;

/// Lowest autonomy score.
pub const MIN_AUTONOMY: u32 = 1;

/// Highest autonomy score.
pub const MAX_AUTONOMY: u32 = 10;

/// One set of calculator parameters.
///
/// Invariant: `1 <= agents <= 200`, `1 <= autonomy <= 10` and
/// `cap <= agents - 1`. The fields are private so the invariant holds for
/// every value in circulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ConfigurationFields")]
pub struct Configuration {
    #[serde(rename = "n")]
    agents: u32,
    autonomy: u32,
    #[serde(rename = "k")]
    cap: u32,
    topology: Topology,
}

/// Wire shape of a configuration before clamping.
#[derive(Deserialize)]
struct ConfigurationFields {
    n: i64,
    autonomy: i64,
    k: i64,
    topology: Topology,
}

impl From<ConfigurationFields> for Configuration {
    fn from(f: ConfigurationFields) -> Self {
        Self::clamped(f.n, f.autonomy, f.k, f.topology)
    }
}

impl Configuration {
    /// The calculator's starting parameters.
    pub const DEFAULT: Self = Self {
        agents: 30,
        autonomy: 5,
        cap: 3,
        topology: Topology::BoundedDegree,
    };

    /// Build a configuration, clamping every field into its domain.
    ///
    /// The cap is clamped after the agent count, against the clamped count.
    pub fn clamped(agents: i64, autonomy: i64, cap: i64, topology: Topology) -> Self {
        let agents = agents.clamp(MIN_AGENTS as i64, MAX_AGENTS as i64) as u32;
        let autonomy = autonomy.clamp(MIN_AUTONOMY as i64, MAX_AUTONOMY as i64) as u32;
        let cap = cap.clamp(0, (agents - 1) as i64) as u32;
        Self {
            agents,
            autonomy,
            cap,
            topology,
        }
    }

    /// Re-apply clamping to the current values.
    pub fn normalized(&self) -> Self {
        Self::clamped(
            self.agents as i64,
            self.autonomy as i64,
            self.cap as i64,
            self.topology,
        )
    }

    /// Agent count `n`.
    pub const fn agents(&self) -> u32 {
        self.agents
    }

    /// Autonomy score `A`.
    pub const fn autonomy(&self) -> u32 {
        self.autonomy
    }

    /// Connection cap `k`.
    pub const fn cap(&self) -> u32 {
        self.cap
    }

    /// Topology kind.
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Copy with a new agent count. The cap is re-clamped to the new count.
    pub fn with_agents(&self, agents: i64) -> Self {
        Self::clamped(agents, self.autonomy as i64, self.cap as i64, self.topology)
    }

    /// Copy with a new autonomy score.
    pub fn with_autonomy(&self, autonomy: i64) -> Self {
        Self::clamped(self.agents as i64, autonomy, self.cap as i64, self.topology)
    }

    /// Copy with a new connection cap.
    pub fn with_cap(&self, cap: i64) -> Self {
        Self::clamped(self.agents as i64, self.autonomy as i64, cap, self.topology)
    }

    /// Copy with a new topology.
    pub fn with_topology(&self, topology: Topology) -> Self {
        Self { topology, ..*self }
    }

    /// Edge count at this configuration's agent count.
    pub fn edges(&self) -> u64 {
        self.edges_at(self.agents)
    }

    /// Edge count when only the first `agents` agents have joined.
    pub fn edges_at(&self, agents: u32) -> u64 {
        edge_count(agents, self.cap, self.topology)
    }

    /// Risk at this configuration's agent count.
    pub fn evaluate(&self, constants: &ModelConstants) -> RiskPoint {
        self.evaluate_at(self.agents, constants)
    }

    /// Risk when only the first `agents` agents have joined.
    ///
    /// `agents` of zero is treated as one.
    pub(crate) fn evaluate_at(&self, agents: u32, constants: &ModelConstants) -> RiskPoint {
        let agents = agents.max(MIN_AGENTS);
        formula::point(agents, self.edges_at(agents), self.autonomy, constants)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n={} A={} k={} {}",
            self.agents,
            self.autonomy,
            self.cap,
            self.topology.label()
        )
    }
}
